//! Lexical analysis for Jack source text.
//!
//! The scanner walks the character stream once with one character of
//! lookahead, eliding whitespace and comments and classifying everything
//! else into the five token categories: keywords, symbols, identifiers,
//! integer constants and string constants.
//!
//! We can't tell a reserved word like `class` from an identifier like
//! `classy` until the maximal run of identifier characters has ended, so
//! classification happens after the run is consumed (`maximal munch`).
mod token;

use std::{iter::Peekable, str::CharIndices};

use anyhow::Context;
pub(crate) use token::*;

use crate::error::scanner::{ScanError, ScanErrorType, ScannerError};

/// A scanner for Jack source code
pub(crate) struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points one past the character most recently consumed
	cursor:      usize,
	/// Tracks what source line the cursor is on, so scan errors can name it
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan the source to exhaustion. The first scan error aborts the whole
	/// scan; there is no recovery.
	pub fn tokenise(&mut self) -> Result<Vec<Token<'a>>, ScannerError> {
		let mut tokens = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = index;
			if let Some(token) = self.scan_token()? {
				tokens.push(token);
			}
		}
		Ok(tokens)
	}

	/// Scan a single token; whitespace and comments produce nothing.
	fn scan_token(&mut self) -> Result<Option<Token<'a>>, ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		let kind = match next_char {
			' ' | '\r' | '\t' => return Ok(None),
			'\n' => {
				self.line += 1;
				return Ok(None);
			}
			'/' => {
				if self.match_next('/') {
					// Consume through the newline, inclusive. A line comment
					// running into EOF terminates cleanly.
					while let Some(c) = self.advance() {
						if c == '\n' {
							self.line += 1;
							break;
						}
					}
					return Ok(None);
				} else if self.match_next('*') {
					self.block_comment()?;
					return Ok(None);
				} else {
					TokenKind::Symbol
				}
			}
			'"' => return self.string().map(Some),
			c if c.is_ascii_digit() => {
				while self.peek().is_some_and(|c| c.is_ascii_digit()) {
					self.advance();
				}
				TokenKind::IntegerConstant
			}
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			c if is_symbol(c) => TokenKind::Symbol,
			c => return Err(ScanError::new(self.line, ScanErrorType::UnrecognizedCharacter(c)).into()),
		};

		let lexeme = &self.source[self.start..self.cursor];
		Ok(Some(Token::new(kind, lexeme)))
	}

	/// Consume a block comment body, closing `*/` included.
	fn block_comment(&mut self) -> Result<(), ScannerError> {
		while let Some(c) = self.peek() {
			if c == '*' && self.peek_second() == Some('/') {
				self.advance(); // consume '*'
				self.advance(); // consume '/'
				return Ok(());
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}
		Err(ScanError::new(self.line, ScanErrorType::UnterminatedBlockComment).into())
	}

	/// Scan a string constant. The token's lexeme excludes the quotes; no
	/// escape processing happens. The printable-ASCII restriction on string
	/// contents is enforced later, when the constant is lowered.
	fn string(&mut self) -> Result<Token<'a>, ScannerError> {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}

		self.peek().ok_or_else(|| ScanError::new(self.line, ScanErrorType::UnterminatedString))?;
		self.advance(); // The closing "
		let lexeme = &self.source[self.start + 1..self.cursor - 1];
		Ok(Token::new(TokenKind::StringConstant, lexeme))
	}

	/// Scan the tail of an identifier or keyword and classify it
	fn identifier(&mut self) -> TokenKind {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		TokenKind::keyword_or_identifier(&self.source[self.start..self.cursor])
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}
}

fn is_symbol(c: char) -> bool {
	matches!(
		c,
		'{' | '}' | '(' | ')' | '[' | ']' | '.' | ',' | ';' | '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '=' | '~'
	)
}
