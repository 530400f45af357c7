//! Code generation: lower the AST into assembly for the register VM.
//!
//! The target is an accumulator machine: every fully evaluated expression
//! leaves its value in register A. Binary operators save the left operand
//! on the machine stack while the right one is evaluated, so every subtree
//! leaves the stack balanced by the time control returns to its parent.
//! Named variables live in a flat set of storage cells declared up front
//! in a DATA segment; control transfer goes through symbolic labels that
//! the downstream assembler resolves to addresses.
//!
//! Booleans are 1 for true and 0 for false everywhere, so comparison
//! results feed straight back into `WHILE`/`IF` conditions and into
//! further boolean operators without coercion.

use std::collections::BTreeSet;
use std::fmt;

use crate::ast::Node;
use crate::error::{CompileError, CompileResult, Diagnostic};

/// The registers the translator may name: the accumulator and two scratch
/// slots. Scratch values never survive across statement boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
  A,
  B,
  C,
}

impl fmt::Display for Reg {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Reg::A => "eax",
      Reg::B => "ebx",
      Reg::C => "ecx",
    };
    f.write_str(name)
  }
}

/// A unique symbolic jump target such as `end_while_3`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Label {
  prefix: &'static str,
  index: u32,
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}_{}", self.prefix, self.index)
  }
}

/// Result of one generation pass: the full assembly text plus whatever
/// diagnostics were accumulated while recovering from unsupported nodes.
#[derive(Debug, Clone)]
pub struct Translation {
  pub assembly: String,
  pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
  /// Escalate accumulated diagnostics into a hard error. The translator
  /// itself never aborts on a bad node; deciding that a partial result is
  /// unacceptable belongs to the caller.
  pub fn into_result(self) -> CompileResult<String> {
    if self.diagnostics.is_empty() {
      Ok(self.assembly)
    } else {
      Err(CompileError::Translation {
        diagnostics: self.diagnostics,
      })
    }
  }
}

/// Translate a whole program tree. A fresh translator is built per call;
/// the instance state (variable set, label counter, code buffer) is never
/// shared between passes, so concurrent generations cannot interfere.
pub fn generate(root: &Node) -> Translation {
  let mut translator = Translator::new();
  translator.emit_node(root);
  debug_assert_eq!(
    translator.pushes, translator.pops,
    "emitted push/pop must balance over a full pass"
  );
  translator.finish()
}

struct Translator {
  code: String,
  /// Distinct names seen as assignment or read targets. A `BTreeSet`
  /// keeps the DATA segment order deterministic.
  variables: BTreeSet<String>,
  label_counter: u32,
  pushes: usize,
  pops: usize,
  diagnostics: Vec<Diagnostic>,
}

impl Translator {
  fn new() -> Self {
    Self {
      code: String::new(),
      variables: BTreeSet::new(),
      label_counter: 0,
      pushes: 0,
      pops: 0,
      diagnostics: Vec::new(),
    }
  }

  /// Wrap the generated instruction stream in its DATA and CODE segments.
  fn finish(self) -> Translation {
    let mut assembly = String::new();
    assembly.push_str("DATA SEGMENT\n");
    for variable in &self.variables {
      assembly.push_str(&format!("\t{variable} DD\n"));
    }
    assembly.push_str("DATA ENDS\n");
    assembly.push_str("CODE SEGMENT\n");
    assembly.push_str(&self.code);
    assembly.push_str("CODE ENDS\n");
    Translation {
      assembly,
      diagnostics: self.diagnostics,
    }
  }

  /// Postorder walk emitting code for one node. Every expression leaves
  /// its value in A; statements simply discard whatever is left there.
  fn emit_node(&mut self, node: &Node) {
    match node {
      Node::Nil => {}
      Node::Number(value) => self.mov_imm(Reg::A, *value),
      Node::Ident(name) => {
        self.variables.insert(name.clone());
        self.instr(&format!("mov {}, {name}", Reg::A));
      }
      Node::Input => self.emit1("input", Reg::A),
      Node::Output(expr) => {
        self.emit_node(expr);
        self.emit1("output", Reg::A);
      }
      Node::Let { name, expr } => {
        self.variables.insert(name.clone());
        self.emit_node(expr);
        self.instr(&format!("mov {name}, {}", Reg::A));
      }
      Node::Seq(first, second) => {
        self.emit_node(first);
        self.emit_node(second);
      }
      Node::Unary { op, expr } => self.emit_unary(op, expr),
      Node::Binary { op, lhs, rhs } => self.emit_binary(op, lhs, rhs),
      Node::While { cond, body } => self.emit_while(cond, body),
      Node::If {
        cond,
        then_branch,
        else_branch,
      } => self.emit_if(cond, then_branch, else_branch),
    }
  }

  fn emit_unary(&mut self, op: &str, expr: &Node) {
    self.emit_node(expr);
    match op {
      "-" => self.emit1("neg", Reg::A),
      "NOT" => {
        let false_label = self.fresh_label("not_false");
        let end_label = self.fresh_label("not_end");
        self.cmp_zero(Reg::A);
        self.jump("jnz", &false_label);
        self.mov_imm(Reg::A, 1);
        self.jump("jmp", &end_label);
        self.place(&false_label);
        self.mov_imm(Reg::A, 0);
        self.place(&end_label);
      }
      _ => self.diagnostics.push(Diagnostic::UnsupportedUnaryOperator {
        op: op.to_string(),
      }),
    }
  }

  /// Generic binary lowering: evaluate left into A, save it on the stack
  /// while the right side is evaluated, then pop it into B. From here B
  /// holds the left operand and A the right one.
  fn emit_binary(&mut self, op: &str, lhs: &Node, rhs: &Node) {
    self.emit_node(lhs);
    self.push(Reg::A);
    self.emit_node(rhs);
    self.pop(Reg::B);

    match op {
      "+" => self.emit2("add", Reg::A, Reg::B),
      "-" => {
        // left - right is B - A; move the result back to A
        self.emit2("sub", Reg::B, Reg::A);
        self.emit2("mov", Reg::A, Reg::B);
      }
      "*" => self.emit2("mul", Reg::A, Reg::B),
      "/" => {
        // Rounding is whatever the machine's div primitive does.
        self.emit2("div", Reg::B, Reg::A);
        self.emit2("mov", Reg::A, Reg::B);
      }
      "MOD" | "%" => {
        // remainder = left - (left / right) * right, quotient held in C
        self.emit2("mov", Reg::C, Reg::B);
        self.emit2("div", Reg::C, Reg::A);
        self.emit2("mul", Reg::C, Reg::A);
        self.emit2("sub", Reg::B, Reg::C);
        self.emit2("mov", Reg::A, Reg::B);
      }
      "==" => self.emit_comparison("jnz", "eq_false", "eq_end"),
      ">" => self.emit_comparison("jle", "gt_false", "gt_end"),
      ">=" => self.emit_comparison("jl", "ge_false", "ge_end"),
      "<" => self.emit_comparison("jge", "lt_false", "lt_end"),
      "AND" => self.emit_and(),
      "OR" => self.emit_or(),
      _ => self.diagnostics.push(Diagnostic::UnsupportedOperator {
        op: op.to_string(),
      }),
    }
  }

  /// Lower a comparison of left (B) against right (A). The sign of B - A
  /// drives the branch; the fallthrough path is the true case.
  fn emit_comparison(
    &mut self,
    branch_if_false: &str,
    false_prefix: &'static str,
    end_prefix: &'static str,
  ) {
    let false_label = self.fresh_label(false_prefix);
    let end_label = self.fresh_label(end_prefix);
    self.emit2("sub", Reg::B, Reg::A);
    self.jump(branch_if_false, &false_label);
    self.mov_imm(Reg::A, 1);
    self.jump("jmp", &end_label);
    self.place(&false_label);
    self.mov_imm(Reg::A, 0);
    self.place(&end_label);
  }

  /// Non-short-circuit AND: both operands were already fully evaluated by
  /// the generic binary prologue; true iff neither is zero.
  fn emit_and(&mut self) {
    let false_label = self.fresh_label("and_false");
    let end_label = self.fresh_label("and_end");
    self.cmp_zero(Reg::B);
    self.jump("jz", &false_label);
    self.cmp_zero(Reg::A);
    self.jump("jz", &false_label);
    self.mov_imm(Reg::A, 1);
    self.jump("jmp", &end_label);
    self.place(&false_label);
    self.mov_imm(Reg::A, 0);
    self.place(&end_label);
  }

  /// Non-short-circuit OR: true iff either operand is nonzero.
  fn emit_or(&mut self) {
    let true_label = self.fresh_label("or_true");
    let end_label = self.fresh_label("or_end");
    self.cmp_zero(Reg::B);
    self.jump("jnz", &true_label);
    self.cmp_zero(Reg::A);
    self.jump("jnz", &true_label);
    self.mov_imm(Reg::A, 0);
    self.jump("jmp", &end_label);
    self.place(&true_label);
    self.mov_imm(Reg::A, 1);
    self.place(&end_label);
  }

  /// The condition is re-evaluated on every iteration; nothing is hoisted.
  fn emit_while(&mut self, cond: &Node, body: &Node) {
    let start_label = self.fresh_label("start_while");
    let end_label = self.fresh_label("end_while");
    self.place(&start_label);
    self.emit_node(cond);
    self.cmp_zero(Reg::A);
    self.jump("jz", &end_label);
    self.emit_node(body);
    self.jump("jmp", &start_label);
    self.place(&end_label);
  }

  fn emit_if(&mut self, cond: &Node, then_branch: &Node, else_branch: &Node) {
    let else_label = self.fresh_label("else");
    let end_label = self.fresh_label("end_if");
    self.emit_node(cond);
    self.cmp_zero(Reg::A);
    self.jump("jz", &else_label);
    self.emit_node(then_branch);
    self.jump("jmp", &end_label);
    self.place(&else_label);
    self.emit_node(else_branch);
    self.place(&end_label);
  }

  /// Mint a label that is unique for this generation pass. The counter is
  /// instance state, so independent passes never collide with each other
  /// and labels inside one pass never repeat.
  fn fresh_label(&mut self, prefix: &'static str) -> Label {
    let index = self.label_counter;
    self.label_counter += 1;
    Label { prefix, index }
  }

  /// Append one tab-indented instruction line.
  fn instr(&mut self, text: &str) {
    self.code.push('\t');
    self.code.push_str(text);
    self.code.push('\n');
  }

  /// Append a label definition; labels sit unindented at column zero.
  fn place(&mut self, label: &Label) {
    self.code.push_str(&format!("{label}:\n"));
  }

  fn mov_imm(&mut self, dst: Reg, value: i64) {
    self.instr(&format!("mov {dst}, {value}"));
  }

  fn cmp_zero(&mut self, reg: Reg) {
    self.instr(&format!("cmp {reg}, 0"));
  }

  fn jump(&mut self, mnemonic: &str, target: &Label) {
    self.instr(&format!("{mnemonic} {target}"));
  }

  /// Single-register instruction: `neg`, `input`, `output`.
  fn emit1(&mut self, mnemonic: &str, reg: Reg) {
    self.instr(&format!("{mnemonic} {reg}"));
  }

  /// Two-register instruction with the destination first.
  fn emit2(&mut self, mnemonic: &str, dst: Reg, src: Reg) {
    self.instr(&format!("{mnemonic} {dst}, {src}"));
  }

  fn push(&mut self, reg: Reg) {
    self.pushes += 1;
    self.emit1("push", reg);
  }

  fn pop(&mut self, reg: Reg) {
    self.pops += 1;
    self.emit1("pop", reg);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::Node;

  /// Instruction lines of the CODE segment, stripped of indentation.
  fn code_lines(assembly: &str) -> Vec<&str> {
    let start = assembly
      .find("CODE SEGMENT\n")
      .expect("missing CODE SEGMENT")
      + "CODE SEGMENT\n".len();
    let end = assembly.rfind("CODE ENDS").expect("missing CODE ENDS");
    assembly[start..end]
      .lines()
      .map(|line| line.trim_start_matches('\t'))
      .collect()
  }

  fn data_lines(assembly: &str) -> Vec<&str> {
    let start = assembly
      .find("DATA SEGMENT\n")
      .expect("missing DATA SEGMENT")
      + "DATA SEGMENT\n".len();
    let end = assembly.find("DATA ENDS").expect("missing DATA ENDS");
    assembly[start..end]
      .lines()
      .map(|line| line.trim_start_matches('\t'))
      .collect()
  }

  fn label_definitions(assembly: &str) -> Vec<&str> {
    code_lines(assembly)
      .into_iter()
      .filter_map(|line| line.strip_suffix(':'))
      .collect()
  }

  fn count(lines: &[&str], wanted: &str) -> usize {
    lines.iter().filter(|line| **line == wanted).count()
  }

  #[test]
  fn let_stores_accumulator_into_cell() {
    let translation = generate(&Node::assign("x", Node::number(5)));
    assert!(translation.diagnostics.is_empty());
    assert_eq!(
      translation.assembly,
      concat!(
        "DATA SEGMENT\n",
        "\tx DD\n",
        "DATA ENDS\n",
        "CODE SEGMENT\n",
        "\tmov eax, 5\n",
        "\tmov x, eax\n",
        "CODE ENDS\n",
      )
    );
  }

  #[test]
  fn addition_saves_left_operand_on_the_stack() {
    let translation = generate(&Node::binary("+", Node::number(2), Node::number(3)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines,
      vec![
        "mov eax, 2",
        "push eax",
        "mov eax, 3",
        "pop ebx",
        "add eax, ebx",
      ]
    );
  }

  #[test]
  fn subtraction_orders_operands_left_minus_right() {
    let translation = generate(&Node::binary("-", Node::number(7), Node::number(3)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(lines[4..], ["sub ebx, eax", "mov eax, ebx"]);
  }

  #[test]
  fn division_orders_operands_left_over_right() {
    let translation = generate(&Node::binary("/", Node::ident("a"), Node::number(2)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(lines[4..], ["div ebx, eax", "mov eax, ebx"]);
  }

  #[test]
  fn modulo_builds_remainder_through_scratch_c() {
    let translation = generate(&Node::binary("MOD", Node::ident("a"), Node::number(3)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[4..],
      [
        "mov ecx, ebx",
        "div ecx, eax",
        "mul ecx, eax",
        "sub ebx, ecx",
        "mov eax, ebx",
      ]
    );
  }

  #[test]
  fn percent_is_an_alias_for_mod() {
    let spelled = generate(&Node::binary("MOD", Node::number(7), Node::number(3)));
    let symbol = generate(&Node::binary("%", Node::number(7), Node::number(3)));
    assert_eq!(spelled.assembly, symbol.assembly);
  }

  #[test]
  fn less_than_is_true_when_difference_is_negative() {
    // left = 1 lands in B, right = 2 in A; B - A = -1 so the jge branch
    // falls through to the true path.
    let translation = generate(&Node::binary("<", Node::number(1), Node::number(2)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[4..],
      [
        "sub ebx, eax",
        "jge lt_false_0",
        "mov eax, 1",
        "jmp lt_end_1",
        "lt_false_0:",
        "mov eax, 0",
        "lt_end_1:",
      ]
    );
  }

  #[test]
  fn greater_or_equal_is_true_when_difference_is_not_negative() {
    // left = 2 lands in B, right = 2 in A; B - A = 0 so the jl branch
    // falls through to the true path on the equal boundary.
    let translation = generate(&Node::binary(">=", Node::number(2), Node::number(2)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[4..],
      [
        "sub ebx, eax",
        "jl ge_false_0",
        "mov eax, 1",
        "jmp ge_end_1",
        "ge_false_0:",
        "mov eax, 0",
        "ge_end_1:",
      ]
    );
  }

  #[test]
  fn equality_tests_the_difference_for_zero() {
    let translation = generate(&Node::binary("==", Node::ident("a"), Node::ident("b")));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[4..],
      [
        "sub ebx, eax",
        "jnz eq_false_0",
        "mov eax, 1",
        "jmp eq_end_1",
        "eq_false_0:",
        "mov eax, 0",
        "eq_end_1:",
      ]
    );
  }

  #[test]
  fn and_evaluates_both_operands_without_short_circuit() {
    let translation = generate(&Node::binary(
      "AND",
      Node::ident("p"),
      Node::output(Node::ident("q")),
    ));
    let lines = code_lines(&translation.assembly);
    // The right operand's output instruction runs unconditionally, before
    // any test of the left operand.
    let output_at = lines.iter().position(|l| *l == "output eax").unwrap();
    let first_test = lines.iter().position(|l| *l == "cmp ebx, 0").unwrap();
    assert!(output_at < first_test);
    assert_eq!(count(&lines, "jz and_false_0"), 2);
  }

  #[test]
  fn or_is_true_when_either_operand_is_nonzero() {
    let translation = generate(&Node::binary("OR", Node::number(0), Node::number(1)));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[4..],
      [
        "cmp ebx, 0",
        "jnz or_true_0",
        "cmp eax, 0",
        "jnz or_true_0",
        "mov eax, 0",
        "jmp or_end_1",
        "or_true_0:",
        "mov eax, 1",
        "or_end_1:",
      ]
    );
  }

  #[test]
  fn not_flips_between_zero_and_one() {
    let translation = generate(&Node::unary("NOT", Node::ident("p")));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines[1..],
      [
        "cmp eax, 0",
        "jnz not_false_0",
        "mov eax, 1",
        "jmp not_end_1",
        "not_false_0:",
        "mov eax, 0",
        "not_end_1:",
      ]
    );
  }

  #[test]
  fn unary_minus_negates_in_place() {
    let translation = generate(&Node::unary("-", Node::number(4)));
    assert_eq!(code_lines(&translation.assembly), vec!["mov eax, 4", "neg eax"]);
  }

  #[test]
  fn while_reevaluates_its_condition_each_iteration() {
    let translation = generate(&Node::while_loop(
      Node::binary(">", Node::ident("i"), Node::number(0)),
      Node::output(Node::ident("i")),
    ));
    let lines = code_lines(&translation.assembly);
    assert_eq!(lines.first(), Some(&"start_while_0:"));
    assert_eq!(lines.last(), Some(&"end_while_1:"));
    // Condition code sits between the start label and the exit branch, so
    // it runs again on every trip around the back edge.
    let exit = lines.iter().position(|l| *l == "jz end_while_1").unwrap();
    let back_edge = lines.iter().position(|l| *l == "jmp start_while_0").unwrap();
    let cond = lines.iter().position(|l| *l == "mov eax, i").unwrap();
    assert!(cond < exit && exit < back_edge);
  }

  #[test]
  fn if_branches_to_else_when_condition_is_zero() {
    let translation = generate(&Node::if_else(
      Node::number(0),
      Node::output(Node::number(1)),
      Node::output(Node::number(2)),
    ));
    let lines = code_lines(&translation.assembly);
    assert_eq!(
      lines,
      vec![
        "mov eax, 0",
        "cmp eax, 0",
        "jz else_0",
        "mov eax, 1",
        "output eax",
        "jmp end_if_1",
        "else_0:",
        "mov eax, 2",
        "output eax",
        "end_if_1:",
      ]
    );
  }

  #[test]
  fn nested_control_flow_never_reuses_a_label() {
    let inner_if = Node::if_else(
      Node::binary("==", Node::ident("i"), Node::number(1)),
      Node::output(Node::number(1)),
      Node::output(Node::number(2)),
    );
    let tree = Node::while_loop(
      Node::binary(">", Node::ident("i"), Node::number(0)),
      Node::seq(inner_if, Node::assign("i", Node::binary("-", Node::ident("i"), Node::number(1)))),
    );
    let translation = generate(&tree);
    let defined = label_definitions(&translation.assembly);
    let mut unique = defined.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(defined.len(), unique.len());

    // Four label families with distinct counter suffixes.
    for family in ["start_while_", "end_while_", "else_", "end_if_"] {
      assert!(defined.iter().any(|label| label.starts_with(family)));
    }
    let mut indices: Vec<u32> = defined
      .iter()
      .map(|label| label.rsplit('_').next().unwrap().parse().unwrap())
      .collect();
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), defined.len());
  }

  #[test]
  fn each_variable_is_declared_exactly_once() {
    let tree = Node::seq(
      Node::assign("x", Node::ident("y")),
      Node::seq(
        Node::assign("y", Node::ident("x")),
        Node::output(Node::ident("x")),
      ),
    );
    let translation = generate(&tree);
    assert_eq!(data_lines(&translation.assembly), vec!["x DD", "y DD"]);
  }

  #[test]
  fn reading_an_unassigned_variable_still_declares_it() {
    let translation = generate(&Node::output(Node::ident("ghost")));
    assert_eq!(data_lines(&translation.assembly), vec!["ghost DD"]);
  }

  #[test]
  fn pushes_and_pops_balance_in_nested_expressions() {
    // ((1 + 2) * (3 - (4 / 5)))
    let tree = Node::binary(
      "*",
      Node::binary("+", Node::number(1), Node::number(2)),
      Node::binary(
        "-",
        Node::number(3),
        Node::binary("/", Node::number(4), Node::number(5)),
      ),
    );
    let translation = generate(&tree);
    let lines = code_lines(&translation.assembly);
    let pushes = lines.iter().filter(|l| l.starts_with("push ")).count();
    let pops = lines.iter().filter(|l| l.starts_with("pop ")).count();
    // One pair per binary operator: *, +, - and /.
    assert_eq!(pushes, 4);
    assert_eq!(pushes, pops);
  }

  #[test]
  fn input_lands_in_the_accumulator() {
    let translation = generate(&Node::assign("n", Node::Input));
    assert_eq!(
      code_lines(&translation.assembly),
      vec!["input eax", "mov n, eax"]
    );
  }

  #[test]
  fn nil_emits_nothing() {
    let translation = generate(&Node::Nil);
    assert!(code_lines(&translation.assembly).is_empty());
    assert!(data_lines(&translation.assembly).is_empty());
  }

  #[test]
  fn unknown_operator_is_reported_but_siblings_still_translate() {
    let tree = Node::seq(
      Node::binary("^", Node::number(1), Node::number(2)),
      Node::output(Node::number(3)),
    );
    let translation = generate(&tree);
    assert_eq!(
      translation.diagnostics,
      vec![Diagnostic::UnsupportedOperator { op: "^".into() }]
    );
    // The sibling's code is still there, and the operands of the bad node
    // were evaluated with a balanced stack.
    let lines = code_lines(&translation.assembly);
    assert!(lines.contains(&"output eax"));
    assert_eq!(count(&lines, "push eax"), count(&lines, "pop ebx"));
  }

  #[test]
  fn unknown_unary_operator_is_reported() {
    let translation = generate(&Node::unary("ABS", Node::number(-3)));
    assert_eq!(
      translation.diagnostics,
      vec![Diagnostic::UnsupportedUnaryOperator { op: "ABS".into() }]
    );
  }

  #[test]
  fn into_result_escalates_diagnostics() {
    let clean = generate(&Node::number(1));
    assert!(clean.into_result().is_ok());

    let dirty = generate(&Node::binary("^", Node::number(1), Node::number(2)));
    assert!(matches!(
      dirty.into_result(),
      Err(CompileError::Translation { .. })
    ));
  }

  #[test]
  fn comparison_feeds_directly_into_a_loop_condition() {
    // while (NOT (i == 0)) do i := i - 1: the boolean convention lets the
    // NOT result drive the jz exit branch without coercion.
    let tree = Node::while_loop(
      Node::unary("NOT", Node::binary("==", Node::ident("i"), Node::number(0))),
      Node::assign("i", Node::binary("-", Node::ident("i"), Node::number(1))),
    );
    let translation = generate(&tree);
    assert!(translation.diagnostics.is_empty());
    let lines = code_lines(&translation.assembly);
    let not_end = lines
      .iter()
      .position(|l| l.starts_with("not_end_"))
      .unwrap();
    let exit = lines
      .iter()
      .position(|l| l.starts_with("jz end_while_"))
      .unwrap();
    assert_eq!(lines[not_end + 1], "cmp eax, 0");
    assert_eq!(exit, not_end + 2);
  }
}
