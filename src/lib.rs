//! Crate root: wires together the translation pipeline.
//!
//! The stages are intentionally small and composable so they can be
//! evolved independently:
//! - `ast` defines the tree handed over by the language front end.
//! - `sexpr` reads the front end's printed tree form (driver glue).
//! - `translator` lowers the tree into assembly for the register VM.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod ast;
pub mod error;
pub mod sexpr;
pub mod translator;

pub use ast::Node;
pub use error::{CompileError, CompileResult, Diagnostic};
pub use translator::{Reg, Translation, generate};

/// Translate the printed tree form of a program into register-VM
/// assembly. Any diagnostics accumulated during generation are escalated
/// into a hard error; use [`sexpr::parse`] with [`generate`] directly to
/// accept a partial result.
pub fn generate_assembly(tree: &str) -> CompileResult<String> {
  let root = sexpr::parse(tree)?;
  generate(&root).into_result()
}
