//! Recursive-descent parsing of the Jack grammar.
//!
//! The scanner's alphabet is characters and its strings are lexemes; the
//! parser's alphabet is tokens and its strings are grammar productions.
//! Each production consumes tokens through a one-token lookahead and
//! returns an element whose children interleave the consumed terminals
//! with sub-productions, in source order.
//!
//! Jack grammar:
//!
//! ``` BNF
//! class           -> "class" IDENTIFIER "{" classVarDec* subroutineDec* "}" ;
//! classVarDec     -> ("static" | "field") type IDENTIFIER ("," IDENTIFIER)* ";" ;
//! subroutineDec   -> ("constructor" | "function" | "method") (type | "void")
//!                    IDENTIFIER "(" parameterList ")" subroutineBody ;
//! parameterList   -> ((type IDENTIFIER) ("," type IDENTIFIER)*)? ;
//! subroutineBody  -> "{" varDec* statements "}" ;
//! varDec          -> "var" type IDENTIFIER ("," IDENTIFIER)* ";" ;
//! statements      -> statement* ;
//! statement       -> letStatement | ifStatement | whileStatement | doStatement | returnStatement ;
//! letStatement    -> "let" IDENTIFIER ("[" expression "]")? "=" expression ";" ;
//! ifStatement     -> "if" "(" expression ")" "{" statements "}" ("else" "{" statements "}")? ;
//! whileStatement  -> "while" "(" expression ")" "{" statements "}" ;
//! doStatement     -> "do" subroutineCall ";" ;
//! returnStatement -> "return" expression? ";" ;
//! expression      -> term (op term)* ;
//! term            -> INTEGER | STRING | keywordConstant | IDENTIFIER
//!                  | IDENTIFIER "[" expression "]" | subroutineCall
//!                  | "(" expression ")" | unaryOp term ;
//! subroutineCall  -> IDENTIFIER ("." IDENTIFIER)? "(" expressionList ")" ;
//! expressionList  -> (expression ("," expression)*)? ;
//! ```
//!
//! There is no operator precedence. An `expression` element carries at
//! most one operator; a longer chain folds the element parsed so far into
//! a synthetic `term`, so `a + b * c` groups as `(a + b) * c` and the code
//! generator's left-to-right concatenation yields correct postfix without
//! a precedence layer.

pub(crate) mod node;

use std::{iter::Peekable, vec::IntoIter};

pub(crate) use node::*;

use crate::{
	error::parser::{ParseError, ParserError},
	scanner::{Matcher, Token},
};

/// A recursive-descent parser over a finite token sequence
pub(crate) struct Parser<'a> {
	/// The tokens to parse
	tokens: Peekable<IntoIter<Token<'a>>>,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens: tokens.into_iter().peekable() } }

	/// Parse the whole token stream. A Jack source unit is a sequence of
	/// classes (in practice exactly one per file); the first grammar
	/// mismatch aborts the parse.
	pub fn parse(mut self) -> Result<Vec<Node<'a>>, ParserError> {
		let mut nodes = Vec::new();
		while self.tokens.peek().is_some() {
			nodes.push(self.parse_class()?.into());
		}
		Ok(nodes)
	}

	/// Consume one token; error unless it satisfies the matcher.
	fn expect(&mut self, expected: &Matcher) -> Result<Token<'a>, ParserError> {
		match self.tokens.next() {
			Some(token) if expected.matches(&token) => Ok(token),
			Some(token) => Err(ParseError::new(expected.to_string(), token.to_string()).into()),
			None => Err(ParseError::new(expected.to_string(), "end of input".into()).into()),
		}
	}

	/// Consume and return the lookahead only if it satisfies the matcher.
	fn expect_maybe(&mut self, expected: &Matcher) -> Option<Token<'a>> {
		if self.peek_matches(expected) { self.tokens.next() } else { None }
	}

	/// Consume one token per matcher, all or nothing.
	fn expect_sequence(&mut self, expected: &[Matcher]) -> Result<Vec<Token<'a>>, ParserError> {
		expected.iter().map(|matcher| self.expect(matcher)).collect()
	}

	/// Repeat the matcher sequence until the terminator appears at the
	/// lookahead; short-circuits to nothing when it is already there.
	fn parse_repeated_sequence_until(
		&mut self,
		sequence: &[Matcher],
		terminator: &Matcher,
	) -> Result<Vec<Node<'a>>, ParserError> {
		let mut nodes = Vec::new();
		while !self.peek_matches(terminator) {
			for token in self.expect_sequence(sequence)? {
				nodes.push(token.into());
			}
		}
		Ok(nodes)
	}

	fn peek(&mut self) -> Option<&Token<'a>> { self.tokens.peek() }

	fn peek_matches(&mut self, matcher: &Matcher) -> bool { self.peek().is_some_and(|token| matcher.matches(token)) }

	/// class -> "class" IDENTIFIER "{" classVarDec* subroutineDec* "}"
	fn parse_class(&mut self) -> Result<Element<'a>, ParserError> {
		let tokens = self.expect_sequence(&[Matcher::keyword("class"), Matcher::ANY_IDENTIFIER, Matcher::symbol("{")])?;
		let mut children: Vec<Node<'a>> = tokens.into_iter().map(Node::from).collect();
		children.extend(self.parse_until(&Matcher::symbol("}"))?);
		children.push(self.expect(&Matcher::symbol("}"))?.into());
		Ok(Element::new("class", children))
	}

	/// Dispatch class-body declarations until the terminator shows up at
	/// the lookahead. The terminator is left unconsumed.
	fn parse_until(&mut self, terminator: &Matcher) -> Result<Vec<Node<'a>>, ParserError> {
		let mut nodes = Vec::new();
		loop {
			let Some(&token) = self.peek() else {
				return Err(ParseError::new(terminator.to_string(), "end of input".into()).into());
			};
			if terminator.matches(&token) {
				return Ok(nodes);
			}
			let declaration = if Matcher::ANY_CLASS_VAR_KEYWORD.matches(&token) {
				self.parse_class_var_dec()?
			} else if Matcher::ANY_SUBROUTINE_KEYWORD.matches(&token) {
				self.parse_subroutine_dec()?
			} else {
				return Err(ParseError::new("class variable or subroutine declaration".into(), token.to_string()).into());
			};
			nodes.push(declaration.into());
		}
	}

	/// classVarDec -> ("static" | "field") type IDENTIFIER ("," IDENTIFIER)* ";"
	fn parse_class_var_dec(&mut self) -> Result<Element<'a>, ParserError> {
		let keyword = self.expect(&Matcher::ANY_CLASS_VAR_KEYWORD)?;
		let mut children = vec![keyword.into()];
		self.parse_declared_names(&mut children)?;
		Ok(Element::new("classVarDec", children))
	}

	/// varDec -> "var" type IDENTIFIER ("," IDENTIFIER)* ";"
	fn parse_var_dec(&mut self) -> Result<Element<'a>, ParserError> {
		let keyword = self.expect(&Matcher::keyword("var"))?;
		let mut children = vec![keyword.into()];
		self.parse_declared_names(&mut children)?;
		Ok(Element::new("varDec", children))
	}

	/// The shared tail of classVarDec and varDec: a type, one or more
	/// comma-separated names, and the closing semicolon.
	fn parse_declared_names(&mut self, children: &mut Vec<Node<'a>>) -> Result<(), ParserError> {
		let tokens = self.expect_sequence(&[Matcher::VALID_TYPE, Matcher::ANY_IDENTIFIER])?;
		children.extend(tokens.into_iter().map(Node::from));
		children.extend(
			self.parse_repeated_sequence_until(&[Matcher::symbol(","), Matcher::ANY_IDENTIFIER], &Matcher::symbol(";"))?,
		);
		children.push(self.expect(&Matcher::symbol(";"))?.into());
		Ok(())
	}

	/// subroutineDec -> ("constructor" | "function" | "method") (type | "void")
	///                  IDENTIFIER "(" parameterList ")" subroutineBody
	fn parse_subroutine_dec(&mut self) -> Result<Element<'a>, ParserError> {
		let tokens = self.expect_sequence(&[
			Matcher::ANY_SUBROUTINE_KEYWORD,
			Matcher::VALID_TYPE,
			Matcher::ANY_IDENTIFIER,
			Matcher::symbol("("),
		])?;
		let mut children: Vec<Node<'a>> = tokens.into_iter().map(Node::from).collect();
		children.push(self.parse_parameter_list()?.into());
		children.push(self.expect(&Matcher::symbol(")"))?.into());
		children.push(self.parse_subroutine_body()?.into());
		Ok(Element::new("subroutineDec", children))
	}

	/// parameterList -> ((type IDENTIFIER) ("," type IDENTIFIER)*)?
	fn parse_parameter_list(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = Vec::new();
		if !self.peek_matches(&Matcher::symbol(")")) {
			let tokens = self.expect_sequence(&[Matcher::VALID_TYPE, Matcher::ANY_IDENTIFIER])?;
			children.extend(tokens.into_iter().map(Node::from));
			children.extend(self.parse_repeated_sequence_until(
				&[Matcher::symbol(","), Matcher::VALID_TYPE, Matcher::ANY_IDENTIFIER],
				&Matcher::symbol(")"),
			)?);
		}
		Ok(Element::new("parameterList", children))
	}

	/// subroutineBody -> "{" varDec* statements "}"
	fn parse_subroutine_body(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = vec![self.expect(&Matcher::symbol("{"))?.into()];
		while self.peek_matches(&Matcher::keyword("var")) {
			children.push(self.parse_var_dec()?.into());
		}
		children.push(self.parse_statements()?.into());
		children.push(self.expect(&Matcher::symbol("}"))?.into());
		Ok(Element::new("subroutineBody", children))
	}

	/// statements -> statement*
	fn parse_statements(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = Vec::new();
		while self.peek_matches(&Matcher::ANY_STATEMENT) {
			children.push(self.parse_statement()?.into());
		}
		Ok(Element::new("statements", children))
	}

	fn parse_statement(&mut self) -> Result<Element<'a>, ParserError> {
		let Some(&token) = self.peek() else {
			return Err(ParseError::new("statement".into(), "end of input".into()).into());
		};
		match token.lexeme {
			"let" => self.parse_let(),
			"if" => self.parse_if(),
			"while" => self.parse_while(),
			"do" => self.parse_do(),
			"return" => self.parse_return(),
			_ => Err(ParseError::new("statement".into(), token.to_string()).into()),
		}
	}

	/// letStatement -> "let" IDENTIFIER ("[" expression "]")? "=" expression ";"
	fn parse_let(&mut self) -> Result<Element<'a>, ParserError> {
		let tokens = self.expect_sequence(&[Matcher::keyword("let"), Matcher::ANY_IDENTIFIER])?;
		let mut children: Vec<Node<'a>> = tokens.into_iter().map(Node::from).collect();
		if let Some(open) = self.expect_maybe(&Matcher::symbol("[")) {
			children.push(open.into());
			children.push(self.parse_expression()?.into());
			children.push(self.expect(&Matcher::symbol("]"))?.into());
		}
		children.push(self.expect(&Matcher::symbol("="))?.into());
		children.push(self.parse_expression()?.into());
		children.push(self.expect(&Matcher::symbol(";"))?.into());
		Ok(Element::new("letStatement", children))
	}

	/// ifStatement -> "if" "(" expression ")" "{" statements "}"
	///                ("else" "{" statements "}")?
	fn parse_if(&mut self) -> Result<Element<'a>, ParserError> {
		let tokens = self.expect_sequence(&[Matcher::keyword("if"), Matcher::symbol("(")])?;
		let mut children: Vec<Node<'a>> = tokens.into_iter().map(Node::from).collect();
		children.push(self.parse_expression()?.into());
		children.push(self.expect(&Matcher::symbol(")"))?.into());
		children.push(self.expect(&Matcher::symbol("{"))?.into());
		children.push(self.parse_statements()?.into());
		children.push(self.expect(&Matcher::symbol("}"))?.into());
		if let Some(else_keyword) = self.expect_maybe(&Matcher::keyword("else")) {
			children.push(else_keyword.into());
			children.push(self.expect(&Matcher::symbol("{"))?.into());
			children.push(self.parse_statements()?.into());
			children.push(self.expect(&Matcher::symbol("}"))?.into());
		}
		Ok(Element::new("ifStatement", children))
	}

	/// whileStatement -> "while" "(" expression ")" "{" statements "}"
	fn parse_while(&mut self) -> Result<Element<'a>, ParserError> {
		let tokens = self.expect_sequence(&[Matcher::keyword("while"), Matcher::symbol("(")])?;
		let mut children: Vec<Node<'a>> = tokens.into_iter().map(Node::from).collect();
		children.push(self.parse_expression()?.into());
		children.push(self.expect(&Matcher::symbol(")"))?.into());
		children.push(self.expect(&Matcher::symbol("{"))?.into());
		children.push(self.parse_statements()?.into());
		children.push(self.expect(&Matcher::symbol("}"))?.into());
		Ok(Element::new("whileStatement", children))
	}

	/// doStatement -> "do" subroutineCall ";"
	fn parse_do(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = vec![self.expect(&Matcher::keyword("do"))?.into()];
		let callee = self.expect(&Matcher::ANY_IDENTIFIER)?;
		self.parse_call(callee, &mut children)?;
		children.push(self.expect(&Matcher::symbol(";"))?.into());
		Ok(Element::new("doStatement", children))
	}

	/// subroutineCall -> IDENTIFIER ("." IDENTIFIER)? "(" expressionList ")"
	/// The callee identifier has already been consumed by the caller.
	fn parse_call(&mut self, callee: Token<'a>, children: &mut Vec<Node<'a>>) -> Result<(), ParserError> {
		children.push(callee.into());
		if let Some(dot) = self.expect_maybe(&Matcher::symbol(".")) {
			children.push(dot.into());
			children.push(self.expect(&Matcher::ANY_IDENTIFIER)?.into());
		}
		children.push(self.expect(&Matcher::symbol("("))?.into());
		children.push(self.parse_expression_list()?.into());
		children.push(self.expect(&Matcher::symbol(")"))?.into());
		Ok(())
	}

	/// returnStatement -> "return" expression? ";"
	fn parse_return(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = vec![self.expect(&Matcher::keyword("return"))?.into()];
		if !self.peek_matches(&Matcher::symbol(";")) {
			children.push(self.parse_expression()?.into());
		}
		children.push(self.expect(&Matcher::symbol(";"))?.into());
		Ok(Element::new("returnStatement", children))
	}

	/// expression -> term (op term)*
	fn parse_expression(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children: Vec<Node<'a>> = vec![self.parse_term()?.into()];
		while let Some(op) = self.expect_maybe(&Matcher::ANY_OPERATION) {
			if children.len() > 1 {
				// At most one operator per expression element: fold what is
				// parsed so far into a term, nesting the chain left-to-right.
				let nested = Element::new("expression", children);
				children = vec![Element::new("term", vec![nested.into()]).into()];
			}
			children.push(op.into());
			children.push(self.parse_term()?.into());
		}
		Ok(Element::new("expression", children))
	}

	/// expressionList -> (expression ("," expression)*)?
	fn parse_expression_list(&mut self) -> Result<Element<'a>, ParserError> {
		let mut children = Vec::new();
		if !self.peek_matches(&Matcher::symbol(")")) {
			children.push(self.parse_expression()?.into());
			while let Some(comma) = self.expect_maybe(&Matcher::symbol(",")) {
				children.push(comma.into());
				children.push(self.parse_expression()?.into());
			}
		}
		Ok(Element::new("expressionList", children))
	}

	/// term -> INTEGER | STRING | keywordConstant | IDENTIFIER
	///       | IDENTIFIER "[" expression "]" | subroutineCall
	///       | "(" expression ")" | unaryOp term
	fn parse_term(&mut self) -> Result<Element<'a>, ParserError> {
		let Some(&token) = self.peek() else {
			return Err(ParseError::new("term".into(), "end of input".into()).into());
		};
		let mut children: Vec<Node<'a>> = Vec::new();
		if Matcher::ANY_UNARY_OPERATION.matches(&token) {
			self.tokens.next();
			children.push(token.into());
			children.push(self.parse_term()?.into());
		} else if Matcher::symbol("(").matches(&token) {
			self.tokens.next();
			children.push(token.into());
			children.push(self.parse_expression()?.into());
			children.push(self.expect(&Matcher::symbol(")"))?.into());
		} else if Matcher::ANY_CONSTANT.matches(&token) {
			self.tokens.next();
			children.push(token.into());
		} else if Matcher::ANY_IDENTIFIER.matches(&token) {
			self.tokens.next();
			if let Some(open) = self.expect_maybe(&Matcher::symbol("[")) {
				children.push(token.into());
				children.push(open.into());
				children.push(self.parse_expression()?.into());
				children.push(self.expect(&Matcher::symbol("]"))?.into());
			} else if self.peek_matches(&Matcher::symbol("(")) || self.peek_matches(&Matcher::symbol(".")) {
				self.parse_call(token, &mut children)?;
			} else {
				children.push(token.into());
			}
		} else {
			return Err(ParseError::new("term".into(), token.to_string()).into());
		}
		Ok(Element::new("term", children))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::{Scanner, TokenKind};

	fn scan(input: &'static str) -> Vec<Token<'static>> {
		let mut scanner = Scanner::new(input);
		scanner.tokenise().unwrap()
	}

	fn parse_class(input: &'static str) -> Element<'static> {
		let nodes = Parser::new(scan(input)).parse().unwrap();
		assert_eq!(nodes.len(), 1);
		match nodes.into_iter().next().unwrap() {
			Node::Element(element) => element,
			Node::Token(token) => panic!("expected a class element, got {token}"),
		}
	}

	/// Pre-order leaf tokens of a node
	fn flatten<'a>(node: &Node<'a>, leaves: &mut Vec<Token<'a>>) {
		match node {
			Node::Token(token) => leaves.push(*token),
			Node::Element(element) => {
				for child in &element.children {
					flatten(child, leaves);
				}
			}
		}
	}

	#[test]
	fn parse_let_statement_shape() {
		let mut parser = Parser::new(scan("let a = 5;"));
		let statement = parser.parse_statement().unwrap();

		let expected = Element::new("letStatement", vec![
			Token::new(TokenKind::Keyword, "let").into(),
			Token::new(TokenKind::Identifier, "a").into(),
			Token::new(TokenKind::Symbol, "=").into(),
			Element::new("expression", vec![Element::new("term", vec![
				Token::new(TokenKind::IntegerConstant, "5").into(),
			])
			.into()])
			.into(),
			Token::new(TokenKind::Symbol, ";").into(),
		]);
		assert_eq!(statement, expected);
	}

	#[test]
	fn parse_let_with_subscript() {
		let mut parser = Parser::new(scan("let a[i] = 5;"));
		let statement = parser.parse_statement().unwrap();
		assert_eq!(statement.children.len(), 8);
		assert_eq!(statement.child_as_token(2).unwrap().lexeme, "[");
		assert_eq!(statement.child_as_element(3).unwrap().tag, "expression");
		assert_eq!(statement.child_as_token(4).unwrap().lexeme, "]");
		assert_eq!(statement.child_as_token(5).unwrap().lexeme, "=");
		assert_eq!(statement.child_as_element(6).unwrap().tag, "expression");
	}

	#[test]
	fn parse_expression_single_operator() {
		let mut parser = Parser::new(scan("1 + 2"));
		let expression = parser.parse_expression().unwrap();
		assert_eq!(expression.children.len(), 3);
		assert_eq!(expression.child_as_element(0).unwrap().tag, "term");
		assert_eq!(expression.child_as_token(1).unwrap().lexeme, "+");
		assert_eq!(expression.child_as_element(2).unwrap().tag, "term");
	}

	#[test]
	fn parse_expression_chain_nests_left_to_right() {
		// `1 + 2 * 3` keeps one operator per expression element; the `1 + 2`
		// element is folded into a synthetic term, so the chain groups as
		// `(1 + 2) * 3`.
		let mut parser = Parser::new(scan("1 + 2 * 3"));
		let expression = parser.parse_expression().unwrap();
		assert_eq!(expression.children.len(), 3);
		assert_eq!(expression.child_as_token(1).unwrap().lexeme, "*");

		let folded = expression.child_as_element(0).unwrap();
		assert_eq!(folded.tag, "term");
		assert_eq!(folded.children.len(), 1);
		let inner = folded.child_as_element(0).unwrap();
		assert_eq!(inner.tag, "expression");
		assert_eq!(inner.child_as_token(1).unwrap().lexeme, "+");
	}

	#[test]
	fn parse_parenthesized_expression() {
		let mut parser = Parser::new(scan("1 + (2 * 3)"));
		let expression = parser.parse_expression().unwrap();
		assert_eq!(expression.children.len(), 3);
		let term = expression.child_as_element(2).unwrap();
		assert_eq!(term.child_as_token(0).unwrap().lexeme, "(");
		assert_eq!(term.child_as_element(1).unwrap().tag, "expression");
		assert_eq!(term.child_as_token(2).unwrap().lexeme, ")");
	}

	#[test]
	fn parse_unary_term() {
		let mut parser = Parser::new(scan("-x"));
		let term = parser.parse_term().unwrap();
		assert_eq!(term.child_as_token(0).unwrap().lexeme, "-");
		assert_eq!(term.child_as_element(1).unwrap().tag, "term");
	}

	#[test]
	fn parse_subroutine_call_term() {
		let mut parser = Parser::new(scan("game.run()"));
		let term = parser.parse_term().unwrap();
		assert_eq!(term.child_as_token(0).unwrap().lexeme, "game");
		assert_eq!(term.child_as_token(1).unwrap().lexeme, ".");
		assert_eq!(term.child_as_token(2).unwrap().lexeme, "run");
		assert_eq!(term.child_as_token(3).unwrap().lexeme, "(");
		assert_eq!(term.child_as_element(4).unwrap().tag, "expressionList");
		assert_eq!(term.child_as_token(5).unwrap().lexeme, ")");
	}

	#[test]
	fn parse_expression_list() {
		let mut parser = Parser::new(scan("f(1, x, true)"));
		let term = parser.parse_term().unwrap();
		let list = term.child_as_element(2).unwrap();
		assert_eq!(list.tag, "expressionList");
		assert_eq!(list.child_elements_by_tag("expression").len(), 3);
		// Commas stay in the tree.
		assert_eq!(list.children.len(), 5);
	}

	#[test]
	fn parse_empty_expression_list() {
		let mut parser = Parser::new(scan("f()"));
		let term = parser.parse_term().unwrap();
		let list = term.child_as_element(2).unwrap();
		assert!(list.children.is_empty());
	}

	#[test]
	fn parse_class_declarations() {
		let class = parse_class(
			"class Point {
				field int x, y;
				static Point origin;
				method int getX() { return x; }
			}",
		);
		assert_eq!(class.tag, "class");
		assert_eq!(class.child_as_token(1).unwrap().lexeme, "Point");
		assert_eq!(class.child_elements_by_tag("classVarDec").len(), 2);
		assert_eq!(class.child_elements_by_tag("subroutineDec").len(), 1);

		let fields = class.child_as_element(3).unwrap();
		assert_eq!(fields.child_as_token(0).unwrap().lexeme, "field");
		assert_eq!(fields.child_as_token(1).unwrap().lexeme, "int");
		assert_eq!(fields.child_tokens().iter().filter(|t| t.kind == TokenKind::Identifier).count(), 2);
	}

	#[test]
	fn parse_subroutine_positions() {
		let class = parse_class("class Main { function void main(int a, boolean b) { return; } }");
		let subroutine = class.child_elements_by_tag("subroutineDec")[0];
		assert_eq!(subroutine.child_as_token(0).unwrap().lexeme, "function");
		assert_eq!(subroutine.child_as_token(1).unwrap().lexeme, "void");
		assert_eq!(subroutine.child_as_token(2).unwrap().lexeme, "main");
		assert_eq!(subroutine.child_as_token(3).unwrap().lexeme, "(");

		let parameters = subroutine.child_as_element(4).unwrap();
		assert_eq!(parameters.tag, "parameterList");
		assert_eq!(parameters.children.len(), 5); // int a , boolean b
		assert_eq!(subroutine.child_as_token(5).unwrap().lexeme, ")");

		let body = subroutine.child_as_element(6).unwrap();
		assert_eq!(body.tag, "subroutineBody");
		assert!(body.find_child_element("statements").is_some());
	}

	#[test]
	fn parse_if_else_positions() {
		let mut parser = Parser::new(scan("if (x) { return; } else { let y = 1; }"));
		let statement = parser.parse_statement().unwrap();
		assert_eq!(statement.child_as_element(2).unwrap().tag, "expression");
		assert_eq!(statement.child_as_element(5).unwrap().tag, "statements");
		assert_eq!(statement.child_as_token(7).unwrap().lexeme, "else");
		assert_eq!(statement.child_as_element(9).unwrap().tag, "statements");
	}

	#[test]
	fn parse_return_without_value() {
		let mut parser = Parser::new(scan("return;"));
		let statement = parser.parse_statement().unwrap();
		assert_eq!(statement.children.len(), 2);
		assert!(statement.find_child_element("expression").is_none());
	}

	#[test]
	fn flattened_leaves_equal_token_stream() {
		let source = "class Main {
			field int size;
			function void main() {
				var Array a;
				let a[1] = -size;
				if (a = null) { do Output.println(); } else { while (true) { return; } }
				return;
			}
		}";
		let tokens = scan(source);
		let nodes = Parser::new(scan(source)).parse().unwrap();

		let mut leaves = Vec::new();
		for node in &nodes {
			flatten(node, &mut leaves);
		}
		assert_eq!(leaves, tokens);
	}

	#[test]
	fn parse_errors() {
		for source in [
			"class Main (",
			"class Main { let }",
			"class Main { function void main() { let x 5; } }",
			"class Main { function void main() { let x = 5 } }",
			"class Main { function void main() { do f(; } }",
			"class",
		] {
			let result = Parser::new(scan(source)).parse();
			assert!(result.is_err(), "{source}");
		}
	}
}
