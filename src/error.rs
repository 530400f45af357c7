//! Shared error utilities used across the translation pipeline.
//!
//! Two layers of reporting live here. `CompileError` is the hard-failure
//! type: reader errors point at the offending byte with a caret, and a
//! caller that refuses to accept a partial translation can escalate the
//! accumulated diagnostics into one. `Diagnostic` is the soft layer: the
//! translator records one per unsupported node and keeps going, so a
//! single bad operator never aborts the surrounding program.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("{expr_line}\n{marker} {message}"))]
  WithLocation {
    expr_line: String,
    marker: String,
    message: String,
  },

  #[snafu(display("IF node requires a THEN_ELSE pair as its right child"))]
  MalformedIf,

  #[snafu(display("translation produced {} diagnostic(s): {}", diagnostics.len(), join_diagnostics(diagnostics)))]
  Translation { diagnostics: Vec<Diagnostic> },
}

impl CompileError {
  /// Construct an error anchored at a specific byte offset in the source.
  pub fn at(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let expr_line = format!("'{expr}'");
    let safe_loc = loc.min(expr.len());
    let char_offset = expr[..safe_loc].chars().count() + 1; // account for opening quote
    let marker = format!("{}^", " ".repeat(char_offset));
    Self::WithLocation {
      expr_line,
      marker,
      message: message.into(),
    }
  }
}

/// Per-node problems the translator recovers from locally. Sibling nodes
/// keep translating; the node itself emits no instructions.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum Diagnostic {
  #[snafu(display("unsupported operator '{op}'"))]
  UnsupportedOperator { op: String },

  #[snafu(display("unsupported unary operator '{op}'"))]
  UnsupportedUnaryOperator { op: String },
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
  diagnostics
    .iter()
    .map(Diagnostic::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}
