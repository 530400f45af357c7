use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use rvmc::{sexpr, translator};

/// Thin driver: read one tree from a file argument or standard input,
/// translate it, print the assembly on stdout. Diagnostics go to stderr
/// and make the exit status nonzero, but the partial assembly is still
/// printed so it can be inspected.
fn main() {
  let args: Vec<String> = env::args().collect();
  if args.len() > 2 {
    let program = args.first().map(String::as_str).unwrap_or("rvmc");
    eprintln!("usage: {program} [tree-file]");
    process::exit(1);
  }

  let source = match read_source(args.get(1)) {
    Ok(text) => text,
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  };

  let root = match sexpr::parse(source.trim()) {
    Ok(root) => root,
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  };

  let translation = translator::generate(&root);
  for diagnostic in &translation.diagnostics {
    eprintln!("{diagnostic}");
  }
  print!("{}", translation.assembly);
  if !translation.diagnostics.is_empty() {
    process::exit(1);
  }
}

fn read_source(path: Option<&String>) -> io::Result<String> {
  match path {
    Some(path) => fs::read_to_string(path),
    None => {
      let mut buffer = String::new();
      io::stdin().read_to_string(&mut buffer)?;
      Ok(buffer)
    }
  }
}
