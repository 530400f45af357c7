//! Reader for the front end's printed tree form.
//!
//! The language front end is an external collaborator; what crosses the
//! boundary in practice is the parenthesized dump it prints, e.g.
//! `(; (LET x 5) (OUTPUT x))`. This module turns that text back into a
//! [`Node`] so the driver can be fed a file or a pipe. It is deliberately
//! not a parser for the language itself – atoms, parentheses and operator
//! heads are all it knows.

use crate::ast::Node;
use crate::error::{CompileError, CompileResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
  LParen,
  RParen,
  Number(i64),
  Symbol,
  Eof,
}

#[derive(Debug, Clone)]
struct Token {
  kind: TokenKind,
  loc: usize,
  len: usize,
}

/// Lex the input into a flat vector of tokens terminated by an `Eof`
/// marker. Symbols are maximal runs of anything that is not whitespace or
/// a parenthesis, which covers identifiers and operator spellings like
/// `>=` or `;` alike.
fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if c.is_ascii_whitespace() {
      i += 1;
      continue;
    }

    if c == b'(' || c == b')' {
      let kind = if c == b'(' {
        TokenKind::LParen
      } else {
        TokenKind::RParen
      };
      tokens.push(Token { kind, loc: i, len: 1 });
      i += 1;
      continue;
    }

    let start = i;
    while i < bytes.len()
      && !bytes[i].is_ascii_whitespace()
      && bytes[i] != b'('
      && bytes[i] != b')'
    {
      i += 1;
    }
    let text = &input[start..i];

    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
      let value = text
        .parse::<i64>()
        .map_err(|err| CompileError::at(input, start, format!("invalid number: {err}")))?;
      tokens.push(Token {
        kind: TokenKind::Number(value),
        loc: start,
        len: text.len(),
      });
    } else {
      tokens.push(Token {
        kind: TokenKind::Symbol,
        loc: start,
        len: text.len(),
      });
    }
  }

  tokens.push(Token {
    kind: TokenKind::Eof,
    loc: input.len(),
    len: 0,
  });
  Ok(tokens)
}

/// Parse one complete tree; trailing input is an error.
pub fn parse(input: &str) -> CompileResult<Node> {
  let tokens = tokenize(input)?;
  let mut stream = TokenStream::new(tokens, input);
  let node = stream.parse_node()?;
  if !stream.is_eof() {
    let token = stream.peek();
    return Err(CompileError::at(
      input,
      token.loc,
      "unexpected trailing input after tree",
    ));
  }
  Ok(node)
}

/// Lightweight cursor over the token vector.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> &Token {
    // The Eof sentinel makes the vector non-empty at every position.
    &self.tokens[self.pos.min(self.tokens.len() - 1)]
  }

  fn advance(&mut self) -> Token {
    let token = self.peek().clone();
    if self.pos < self.tokens.len() - 1 {
      self.pos += 1;
    }
    token
  }

  fn is_eof(&self) -> bool {
    self.peek().kind == TokenKind::Eof
  }

  fn text(&self, token: &Token) -> &'a str {
    &self.source[token.loc..token.loc + token.len]
  }

  fn parse_node(&mut self) -> CompileResult<Node> {
    let token = self.advance();
    match token.kind {
      TokenKind::Number(value) => Ok(Node::number(value)),
      TokenKind::Symbol => match self.text(&token) {
        "INPUT" => Ok(Node::Input),
        "NIL" => Ok(Node::Nil),
        name => Ok(Node::ident(name)),
      },
      TokenKind::LParen => self.parse_list(&token),
      TokenKind::RParen => Err(CompileError::at(
        self.source,
        token.loc,
        "unexpected ')'",
      )),
      TokenKind::Eof => Err(CompileError::at(
        self.source,
        token.loc,
        "unexpected end of input, expected a tree",
      )),
    }
  }

  /// Parse the remainder of a `( head ... )` form. `LET` and `OUTPUT` have
  /// fixed shapes; every other head is an operator applied to one operand
  /// (unary) or two (binary, bridged through [`Node::from_tagged`]).
  fn parse_list(&mut self, open: &Token) -> CompileResult<Node> {
    let head = self.advance();
    if head.kind != TokenKind::Symbol {
      return Err(CompileError::at(
        self.source,
        head.loc,
        "expected an operator after '('",
      ));
    }
    let op = self.text(&head).to_string();

    match op.as_str() {
      "LET" => {
        let name_token = self.advance();
        if name_token.kind != TokenKind::Symbol {
          return Err(CompileError::at(
            self.source,
            name_token.loc,
            "LET expects an identifier",
          ));
        }
        let name = self.text(&name_token).to_string();
        let expr = self.parse_node()?;
        self.expect_rparen(open)?;
        Ok(Node::assign(name, expr))
      }
      "OUTPUT" => {
        let expr = self.parse_node()?;
        self.expect_rparen(open)?;
        Ok(Node::output(expr))
      }
      _ => {
        let first = self.parse_node()?;
        if self.peek().kind == TokenKind::RParen {
          self.advance();
          return Ok(Node::unary(op, first));
        }
        let second = self.parse_node()?;
        self.expect_rparen(open)?;
        Node::from_tagged(&op, first, second)
      }
    }
  }

  fn expect_rparen(&mut self, open: &Token) -> CompileResult<()> {
    let token = self.advance();
    if token.kind == TokenKind::RParen {
      Ok(())
    } else {
      Err(CompileError::at(
        self.source,
        open.loc,
        "unclosed '(' in tree",
      ))
    }
  }
}
