//! AST node definitions consumed by the translator.
//!
//! The tree is produced by an external front end; this crate only fixes
//! its shape. Control flow gets dedicated variants (`Seq`, `While`, `If`)
//! instead of riding on `Binary` with magic operator tags, so the
//! translator never has to sniff a tag before lowering. The front end's
//! raw tagged shape is still accepted through [`Node::from_tagged`], which
//! rejects a malformed `IF` at construction time instead of letting it
//! silently vanish during generation.
//!
//! Arithmetic, comparison and boolean operators stay string tags on
//! purpose: an unrecognised tag must be representable so the translator
//! can report it and keep going.

use std::fmt;

use crate::error::{CompileError, CompileResult};

/// One node of the program tree. Finite, immutable once built, and only
/// ever borrowed read-only by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// Integer literal.
  Number(i64),
  /// Variable read. Reading a never-assigned name is legal and registers
  /// a storage cell; its runtime value is whatever the cell default
  /// initialises to.
  Ident(String),
  /// Read one value from the machine's input channel.
  Input,
  /// Placeholder produced by the front end; generates no code.
  Nil,
  /// Assignment. There is no declaration form; the first write (or read)
  /// of a name allocates its cell.
  Let { name: String, expr: Box<Node> },
  /// Arithmetic, comparison or boolean operator.
  Binary {
    op: String,
    lhs: Box<Node>,
    rhs: Box<Node>,
  },
  /// Arithmetic negation `-` or logical negation `NOT`.
  Unary { op: String, expr: Box<Node> },
  /// Evaluate and write one value to the machine's output channel.
  Output(Box<Node>),
  /// Statement sequencing; each side discards any leftover value.
  Seq(Box<Node>, Box<Node>),
  While {
    cond: Box<Node>,
    body: Box<Node>,
  },
  If {
    cond: Box<Node>,
    then_branch: Box<Node>,
    else_branch: Box<Node>,
  },
}

impl Node {
  pub fn number(value: i64) -> Self {
    Self::Number(value)
  }

  pub fn ident(name: impl Into<String>) -> Self {
    Self::Ident(name.into())
  }

  pub fn assign(name: impl Into<String>, expr: Node) -> Self {
    Self::Let {
      name: name.into(),
      expr: Box::new(expr),
    }
  }

  pub fn binary(op: impl Into<String>, lhs: Node, rhs: Node) -> Self {
    Self::Binary {
      op: op.into(),
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }

  pub fn unary(op: impl Into<String>, expr: Node) -> Self {
    Self::Unary {
      op: op.into(),
      expr: Box::new(expr),
    }
  }

  pub fn output(expr: Node) -> Self {
    Self::Output(Box::new(expr))
  }

  pub fn seq(first: Node, second: Node) -> Self {
    Self::Seq(Box::new(first), Box::new(second))
  }

  pub fn while_loop(cond: Node, body: Node) -> Self {
    Self::While {
      cond: Box::new(cond),
      body: Box::new(body),
    }
  }

  pub fn if_else(cond: Node, then_branch: Node, else_branch: Node) -> Self {
    Self::If {
      cond: Box::new(cond),
      then_branch: Box::new(then_branch),
      else_branch: Box::new(else_branch),
    }
  }

  /// Bridge from the front end's raw tagged binary shape. `";"`, `"WHILE"`
  /// and `"IF"` map onto the dedicated control-flow variants; an `"IF"`
  /// whose right child is not a `"THEN_ELSE"` pair is a hard error. Any
  /// other tag builds a plain `Binary` whose validity is checked during
  /// translation, so unknown operators stay recoverable.
  pub fn from_tagged(op: &str, lhs: Node, rhs: Node) -> CompileResult<Node> {
    match op {
      ";" => Ok(Node::seq(lhs, rhs)),
      "WHILE" => Ok(Node::while_loop(lhs, rhs)),
      "IF" => match rhs {
        Node::Binary {
          op,
          lhs: then_branch,
          rhs: else_branch,
        } if op == "THEN_ELSE" => Ok(Node::If {
          cond: Box::new(lhs),
          then_branch,
          else_branch,
        }),
        _ => Err(CompileError::MalformedIf),
      },
      _ => Ok(Node::binary(op, lhs, rhs)),
    }
  }
}

/// Render the parenthesized tree form the front end prints, e.g.
/// `(; (LET x 5) (OUTPUT x))`. The control-flow variants print their raw
/// tagged spelling so the output stays readable by [`crate::sexpr`].
impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Node::Number(value) => write!(f, "{value}"),
      Node::Ident(name) => f.write_str(name),
      Node::Input => f.write_str("INPUT"),
      Node::Nil => f.write_str("NIL"),
      Node::Let { name, expr } => write!(f, "(LET {name} {expr})"),
      Node::Binary { op, lhs, rhs } => write!(f, "({op} {lhs} {rhs})"),
      Node::Unary { op, expr } => write!(f, "({op} {expr})"),
      Node::Output(expr) => write!(f, "(OUTPUT {expr})"),
      Node::Seq(first, second) => write!(f, "(; {first} {second})"),
      Node::While { cond, body } => write!(f, "(WHILE {cond} {body})"),
      Node::If {
        cond,
        then_branch,
        else_branch,
      } => write!(f, "(IF {cond} (THEN_ELSE {then_branch} {else_branch}))"),
    }
  }
}
