//! Lowering the concrete syntax tree to VM instructions.
//!
//! The generator walks each class element once, keeping two scopes of
//! declared names: the class table (`static`/`field`, alive for the class)
//! and the subroutine table (`argument`/`local`, cleared at every
//! subroutine entry). Name resolution consults the subroutine table first,
//! then the class table; a miss is fatal except for a call qualifier,
//! where it signals a static call on a class name.
//!
//! Control flow lowers to `IF_TRUE<k>`/`IF_FALSE<k>`/`IF_END<k>` and
//! `WHILE_EXP<k>`/`WHILE_END<k>` labels, with both counters reset at each
//! subroutine entry so labels stay unique within one `function` body.
mod symbol;

use anyhow::anyhow;
pub(crate) use symbol::*;

use crate::{
	error::codegen::{CodegenError, MissingChild},
	parser::{Element, Node, element_at, token_at},
	scanner::{Token, TokenKind},
};

/// Subroutine flavors differ only in their preamble: constructors allocate
/// and anchor `this`, methods anchor it on the hidden receiver argument,
/// functions take neither.
#[derive(Clone, Copy)]
enum SubroutineFlavor {
	Constructor,
	Function,
	Method,
}

pub(crate) struct CodeGenerator<'a> {
	/// `static` and `field` declarations; lives for one class compilation
	class_symbols:      SymbolTable<'a>,
	/// `argument` and `local` declarations; cleared at subroutine entry
	subroutine_symbols: SymbolTable<'a>,
	/// The class being compiled, target of implicit `this` calls
	current_class:      Option<&'a str>,
	/// Per-subroutine counters behind the synthesized control-flow labels
	if_count:           usize,
	while_count:        usize,
	/// Emitted instructions, one per line
	code:               Vec<String>,
}

impl<'a> CodeGenerator<'a> {
	pub fn new() -> Self {
		Self {
			class_symbols:      SymbolTable::new(),
			subroutine_symbols: SymbolTable::new(),
			current_class:      None,
			if_count:           0,
			while_count:        0,
			code:               Vec::new(),
		}
	}

	/// Lower every class element to VM assembly, newline-joined with no
	/// trailing newline.
	pub fn generate(mut self, nodes: &[Node<'a>]) -> Result<String, CodegenError> {
		for node in nodes {
			if let Node::Element(element) = node {
				if element.tag == "class" {
					self.compile_class(element)?;
				}
			}
		}
		Ok(self.code.join("\n"))
	}

	fn emit(&mut self, instruction: impl Into<String>) { self.code.push(instruction.into()); }

	fn current_class(&self) -> Result<&'a str, CodegenError> {
		self.current_class.ok_or_else(|| CodegenError::InternalError(anyhow!("no enclosing class")))
	}

	/// Resolution order is fixed: the subroutine table shadows the class
	/// table.
	fn find_symbol(&self, name: &str) -> Option<Symbol<'a>> {
		self.subroutine_symbols.get(name).or_else(|| self.class_symbols.get(name))
	}

	fn resolve(&self, name: &str) -> Result<Symbol<'a>, CodegenError> {
		self.find_symbol(name).ok_or_else(|| CodegenError::SymbolNotFound(name.to_string()))
	}

	fn compile_class(&mut self, class: &Element<'a>) -> Result<(), CodegenError> {
		self.current_class = Some(class.child_as_token(1)?.lexeme);
		self.class_symbols.clear();

		for dec in class.child_elements_by_tag("classVarDec") {
			let kind = match dec.child_as_token(0)?.lexeme {
				"static" => SymbolKind::Static,
				"field" => SymbolKind::Field,
				other => {
					return Err(CodegenError::InternalError(anyhow!("unexpected class variable kind '{other}'")));
				}
			};
			let (r#type, names) = declared_names(dec)?;
			for name in names {
				self.class_symbols.define(name, r#type, kind);
			}
		}

		for dec in class.child_elements_by_tag("subroutineDec") {
			self.compile_subroutine(dec)?;
		}
		Ok(())
	}

	fn compile_subroutine(&mut self, dec: &Element<'a>) -> Result<(), CodegenError> {
		self.subroutine_symbols.clear();

		let flavor = match dec.child_as_token(0)?.lexeme {
			"constructor" => SubroutineFlavor::Constructor,
			"function" => SubroutineFlavor::Function,
			"method" => SubroutineFlavor::Method,
			other => return Err(CodegenError::UnknownSubroutineFlavor(other.to_string())),
		};
		let name = dec.child_as_token(2)?.lexeme;
		let class = self.current_class()?;

		// Methods receive the object they act on as a hidden first argument,
		// reserving `argument 0` for `this`.
		if let SubroutineFlavor::Method = flavor {
			self.subroutine_symbols.define("this", class, SymbolKind::Argument);
		}

		let parameters = dec.child_as_element(4)?;
		let declarations: Vec<&Token<'a>> =
			parameters.child_tokens().into_iter().filter(|token| token.kind != TokenKind::Symbol).collect();
		for pair in declarations.chunks(2) {
			let &[r#type, parameter] = pair else {
				return Err(CodegenError::InternalError(anyhow!("dangling parameter declaration")));
			};
			self.subroutine_symbols.define(parameter.lexeme, r#type.lexeme, SymbolKind::Argument);
		}

		let body = dec.child_as_element(6)?;
		for var_dec in body.child_elements_by_tag("varDec") {
			let (r#type, names) = declared_names(var_dec)?;
			for name in names {
				self.subroutine_symbols.define(name, r#type, SymbolKind::Local);
			}
		}
		let locals = self.subroutine_symbols.count(SymbolKind::Local);

		self.if_count = 0;
		self.while_count = 0;

		self.emit(format!("function {class}.{name} {locals}"));
		match flavor {
			SubroutineFlavor::Constructor => {
				let fields = self.class_symbols.count(SymbolKind::Field);
				self.emit(format!("push constant {fields}"));
				self.emit("call Memory.alloc 1");
				self.emit("pop pointer 0");
			}
			SubroutineFlavor::Method => {
				self.emit("push argument 0");
				self.emit("pop pointer 0");
			}
			SubroutineFlavor::Function => {}
		}

		let statements = body.find_child_element("statements").ok_or(MissingChild::Tag("statements"))?;
		self.compile_statements(statements)
	}

	fn compile_statements(&mut self, statements: &Element<'a>) -> Result<(), CodegenError> {
		for statement in statements.child_elements() {
			self.compile_statement(statement)?;
		}
		Ok(())
	}

	fn compile_statement(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		match statement.tag {
			"letStatement" => self.compile_let(statement),
			"ifStatement" => self.compile_if(statement),
			"whileStatement" => self.compile_while(statement),
			"doStatement" => self.compile_do(statement),
			"returnStatement" => self.compile_return(statement),
			other => Err(CodegenError::InternalError(anyhow!("unexpected statement element '{other}'"))),
		}
	}

	fn compile_let(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		let target = statement.child_as_token(1)?.lexeme;
		let symbol = self.resolve(target)?;

		let subscripted = matches!(statement.child_as_token(2), Ok(token) if token.lexeme == "[");
		if subscripted {
			// The target address is computed before the value, and the value
			// is parked in temp 0 while pointer 1 is anchored, so an array
			// read on the right-hand side cannot clobber `that`.
			self.compile_expression(statement.child_as_element(3)?)?;
			self.emit(format!("push {} {}", symbol.kind.segment(), symbol.index));
			self.emit("add");
			self.compile_expression(statement.child_as_element(6)?)?;
			self.emit("pop temp 0");
			self.emit("pop pointer 1");
			self.emit("push temp 0");
			self.emit("pop that 0");
		} else {
			self.compile_expression(statement.child_as_element(3)?)?;
			self.emit(format!("pop {} {}", symbol.kind.segment(), symbol.index));
		}
		Ok(())
	}

	fn compile_if(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		let n = self.if_count;
		self.if_count += 1;

		self.compile_expression(statement.child_as_element(2)?)?;
		self.emit(format!("if-goto IF_TRUE{n}"));
		self.emit(format!("goto IF_FALSE{n}"));
		self.emit(format!("label IF_TRUE{n}"));
		self.compile_statements(statement.child_as_element(5)?)?;

		if statement.find_child_token(TokenKind::Keyword, "else").is_some() {
			self.emit(format!("goto IF_END{n}"));
			self.emit(format!("label IF_FALSE{n}"));
			self.compile_statements(statement.child_as_element(9)?)?;
			self.emit(format!("label IF_END{n}"));
		} else {
			self.emit(format!("label IF_FALSE{n}"));
		}
		Ok(())
	}

	fn compile_while(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		let n = self.while_count;
		self.while_count += 1;

		self.emit(format!("label WHILE_EXP{n}"));
		self.compile_expression(statement.child_as_element(2)?)?;
		self.emit("not");
		self.emit(format!("if-goto WHILE_END{n}"));
		self.compile_statements(statement.child_as_element(5)?)?;
		self.emit(format!("goto WHILE_EXP{n}"));
		self.emit(format!("label WHILE_END{n}"));
		Ok(())
	}

	fn compile_do(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		let end = statement.children.len().saturating_sub(1);
		let call = statement.children.get(1..end).ok_or(MissingChild::Index(1))?;
		self.compile_call(call)?;
		// A do statement discards the called subroutine's return value.
		self.emit("pop temp 0");
		Ok(())
	}

	fn compile_return(&mut self, statement: &Element<'a>) -> Result<(), CodegenError> {
		match statement.find_child_element("expression") {
			Some(expression) => self.compile_expression(expression)?,
			// A void return still leaves a word for the caller to discard.
			None => self.emit("push constant 0"),
		}
		self.emit("return");
		Ok(())
	}

	/// Compile the first term, then the optional `(op term)` pair. Longer
	/// chains arrive pre-nested from the parser, so the concatenation is
	/// already correct postfix.
	fn compile_expression(&mut self, expression: &Element<'a>) -> Result<(), CodegenError> {
		self.compile_term(expression.child_as_element(0)?)?;
		if expression.children.len() > 1 {
			let op = expression.child_as_token(1)?.lexeme;
			self.compile_term(expression.child_as_element(2)?)?;
			let instruction = match op {
				"+" => "add",
				"-" => "sub",
				"*" => "call Math.multiply 2",
				"/" => "call Math.divide 2",
				"&" => "and",
				"|" => "or",
				"<" => "lt",
				">" => "gt",
				"=" => "eq",
				other => return Err(CodegenError::UnknownOperator(other.to_string())),
			};
			self.emit(instruction);
		}
		Ok(())
	}

	/// Dispatch on the term's first child and shape.
	fn compile_term(&mut self, term: &Element<'a>) -> Result<(), CodegenError> {
		match term.child(0)? {
			// A folded operator chain: an expression standing alone as a term.
			Node::Element(expression) if expression.tag == "expression" => self.compile_expression(expression),
			Node::Element(element) => {
				Err(CodegenError::InternalError(anyhow!("unexpected '{}' element in term", element.tag)))
			}
			Node::Token(token) => match token.kind {
				TokenKind::IntegerConstant => {
					self.emit(format!("push constant {}", token.lexeme));
					Ok(())
				}
				TokenKind::StringConstant => self.compile_string_constant(token.lexeme),
				TokenKind::Keyword => self.compile_keyword_constant(token.lexeme),
				TokenKind::Identifier => self.compile_identifier_term(term),
				TokenKind::Symbol => match token.lexeme {
					"(" => self.compile_expression(term.child_as_element(1)?),
					"-" => {
						self.compile_term(term.child_as_element(1)?)?;
						self.emit("neg");
						Ok(())
					}
					"~" => {
						self.compile_term(term.child_as_element(1)?)?;
						self.emit("not");
						Ok(())
					}
					other => Err(CodegenError::UnknownUnaryOperator(other.to_string())),
				},
			},
		}
	}

	/// true is all ones, false and null are zero, this is the anchored
	/// receiver.
	fn compile_keyword_constant(&mut self, lexeme: &str) -> Result<(), CodegenError> {
		match lexeme {
			"true" => {
				self.emit("push constant 0");
				self.emit("not");
			}
			"false" | "null" => self.emit("push constant 0"),
			"this" => self.emit("push pointer 0"),
			other => return Err(CodegenError::InternalError(anyhow!("unexpected keyword '{other}' in term"))),
		}
		Ok(())
	}

	/// A string constant builds a String object at runtime, one appendChar
	/// per code point; the receiver flows through the stack.
	fn compile_string_constant(&mut self, value: &str) -> Result<(), CodegenError> {
		self.emit(format!("push constant {}", value.chars().count()));
		self.emit("call String.new 1");
		for c in value.chars() {
			// The target character set is printable ASCII, nothing else.
			if !(' '..='~').contains(&c) {
				return Err(CodegenError::UnknownCharacter(c));
			}
			self.emit(format!("push constant {}", c as u32));
			self.emit("call String.appendChar 2");
		}
		Ok(())
	}

	/// An identifier term is a plain variable, an array read, or a
	/// subroutine call, told apart by what follows the identifier.
	fn compile_identifier_term(&mut self, term: &Element<'a>) -> Result<(), CodegenError> {
		let identifier = term.child_as_token(0)?.lexeme;
		let follows = term.child_as_token(1).map(|token| token.lexeme).unwrap_or_default();
		match follows {
			"[" => {
				let symbol = self.resolve(identifier)?;
				self.compile_expression(term.child_as_element(2)?)?;
				self.emit(format!("push {} {}", symbol.kind.segment(), symbol.index));
				self.emit("add");
				self.emit("pop pointer 1");
				self.emit("push that 0");
				Ok(())
			}
			"(" | "." => self.compile_call(&term.children),
			_ => {
				let symbol = self.resolve(identifier)?;
				self.emit(format!("push {} {}", symbol.kind.segment(), symbol.index));
				Ok(())
			}
		}
	}

	/// Compile a subroutine call. The slice starts at the callee identifier
	/// and ends at the closing parenthesis.
	fn compile_call(&mut self, call: &[Node<'a>]) -> Result<(), CodegenError> {
		let callee = token_at(call, 0)?.lexeme;
		let qualified = matches!(token_at(call, 1), Ok(token) if token.lexeme == ".");

		if qualified {
			let name = token_at(call, 2)?.lexeme;
			let arguments = element_at(call, 4)?;
			match self.find_symbol(callee) {
				// A method call on a variable: the object rides along as the
				// hidden first argument, and the call targets its type.
				Some(symbol) => {
					self.emit(format!("push {} {}", symbol.kind.segment(), symbol.index));
					let count = self.compile_expression_list(arguments)?;
					self.emit(format!("call {}.{} {}", symbol.r#type, name, count + 1));
				}
				// An unresolved qualifier is a class name: a static call.
				None => {
					let count = self.compile_expression_list(arguments)?;
					self.emit(format!("call {callee}.{name} {count}"));
				}
			}
		} else {
			// Unqualified calls target the current class and pass `this` on.
			let arguments = element_at(call, 2)?;
			let class = self.current_class()?;
			self.emit("push pointer 0");
			let count = self.compile_expression_list(arguments)?;
			self.emit(format!("call {class}.{callee} {}", count + 1));
		}
		Ok(())
	}

	fn compile_expression_list(&mut self, list: &Element<'a>) -> Result<usize, CodegenError> {
		let expressions = list.child_elements_by_tag("expression");
		for expression in &expressions {
			self.compile_expression(expression)?;
		}
		Ok(expressions.len())
	}
}

/// The names declared by a classVarDec or varDec, with their shared type.
/// The type sits at child 1 and may itself be an identifier (a class
/// name), so the declared names are read from child 2 onward.
fn declared_names<'a>(dec: &Element<'a>) -> Result<(&'a str, Vec<&'a str>), MissingChild> {
	let r#type = dec.child_as_token(1)?.lexeme;
	let names = dec
		.children
		.iter()
		.skip(2)
		.filter_map(Node::as_token)
		.filter(|token| token.kind == TokenKind::Identifier)
		.map(|token| token.lexeme)
		.collect();
	Ok((r#type, names))
}
