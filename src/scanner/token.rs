use TokenKind::*;

/// The 21 reserved words of the Jack language. Any other identifier-shaped
/// lexeme is an identifier.
const KEYWORDS: [&str; 21] = [
	"class",
	"constructor",
	"function",
	"method",
	"field",
	"static",
	"var",
	"int",
	"char",
	"boolean",
	"void",
	"true",
	"false",
	"null",
	"this",
	"let",
	"do",
	"if",
	"else",
	"while",
	"return",
];

/// A token produced by the scanner. The lexeme borrows the source text;
/// for string constants it excludes the surrounding quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
	pub kind:   TokenKind,
	pub lexeme: &'a str,
}

impl<'a> Token<'a> {
	pub fn new(kind: TokenKind, lexeme: &'a str) -> Self { Self { kind, lexeme } }
}

impl std::fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} '{}'", self.kind, self.lexeme)
	}
}

/// The five token categories of the Jack lexical grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
	Keyword,
	Symbol,
	Identifier,
	IntegerConstant,
	StringConstant,
}

impl TokenKind {
	/// We can't tell a reserved word from an identifier until we've reached
	/// the end of the maximal run, so the scanner classifies afterwards.
	pub fn keyword_or_identifier(lexeme: &str) -> Self {
		if KEYWORDS.contains(&lexeme) { Keyword } else { Identifier }
	}
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Keyword => "keyword",
			Symbol => "symbol",
			Identifier => "identifier",
			IntegerConstant => "integer constant",
			StringConstant => "string constant",
		};
		write!(f, "{name}")
	}
}

/// A predicate over tokens, used by the parser to compose grammar
/// productions. An empty lexeme on either side (matcher or token) is a
/// wildcard over that side; the kind always binds.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Matcher {
	Exact { kind: TokenKind, lexeme: &'static str },
	OneOf(&'static [Matcher]),
}

impl Matcher {
	pub const fn any(kind: TokenKind) -> Self { Self::Exact { kind, lexeme: "" } }

	pub const fn keyword(lexeme: &'static str) -> Self { Self::Exact { kind: Keyword, lexeme } }

	pub const fn symbol(lexeme: &'static str) -> Self { Self::Exact { kind: Symbol, lexeme } }

	pub fn matches(&self, token: &Token) -> bool {
		match self {
			Self::Exact { kind, lexeme } => {
				*kind == token.kind && (lexeme.is_empty() || token.lexeme.is_empty() || *lexeme == token.lexeme)
			}
			Self::OneOf(matchers) => matchers.iter().any(|matcher| matcher.matches(token)),
		}
	}

	pub const ANY_IDENTIFIER: Matcher = Matcher::any(Identifier);

	pub const ANY_STATEMENT: Matcher = Matcher::OneOf(&[
		Matcher::keyword("let"),
		Matcher::keyword("return"),
		Matcher::keyword("do"),
		Matcher::keyword("if"),
		Matcher::keyword("while"),
	]);

	pub const VALID_TYPE: Matcher = Matcher::OneOf(&[
		Matcher::keyword("int"),
		Matcher::keyword("void"),
		Matcher::keyword("boolean"),
		Matcher::keyword("char"),
		Matcher::any(Identifier),
	]);

	pub const ANY_OPERATION: Matcher = Matcher::OneOf(&[
		Matcher::symbol("+"),
		Matcher::symbol("-"),
		Matcher::symbol("*"),
		Matcher::symbol("/"),
		Matcher::symbol("&"),
		Matcher::symbol("|"),
		Matcher::symbol("<"),
		Matcher::symbol(">"),
		Matcher::symbol("="),
	]);

	pub const ANY_UNARY_OPERATION: Matcher = Matcher::OneOf(&[Matcher::symbol("-"), Matcher::symbol("~")]);

	pub const ANY_KEYWORD_CONSTANT: Matcher = Matcher::OneOf(&[
		Matcher::keyword("true"),
		Matcher::keyword("false"),
		Matcher::keyword("null"),
		Matcher::keyword("this"),
	]);

	pub const ANY_CONSTANT: Matcher = Matcher::OneOf(&[
		Matcher::any(IntegerConstant),
		Matcher::any(StringConstant),
		Matcher::ANY_KEYWORD_CONSTANT,
	]);

	pub const ANY_CLASS_VAR_KEYWORD: Matcher = Matcher::OneOf(&[Matcher::keyword("static"), Matcher::keyword("field")]);

	pub const ANY_SUBROUTINE_KEYWORD: Matcher = Matcher::OneOf(&[
		Matcher::keyword("constructor"),
		Matcher::keyword("function"),
		Matcher::keyword("method"),
	]);
}

impl std::fmt::Display for Matcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Exact { kind, lexeme } => {
				if lexeme.is_empty() {
					write!(f, "{kind}")
				} else {
					write!(f, "{kind} '{lexeme}'")
				}
			}
			Self::OneOf(matchers) => {
				for (i, matcher) in matchers.iter().enumerate() {
					if i > 0 {
						write!(f, " or ")?;
					}
					write!(f, "{matcher}")?;
				}
				Ok(())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matches(matcher: &Matcher, kind: TokenKind, lexeme: &str) -> bool {
		matcher.matches(&Token::new(kind, lexeme))
	}

	#[test]
	fn exact_matcher() {
		let let_keyword = Matcher::keyword("let");
		assert!(matches(&let_keyword, Keyword, "let"));
		assert!(!matches(&let_keyword, Keyword, "do"));
		assert!(!matches(&let_keyword, Identifier, "let"));
	}

	#[test]
	fn matcher_side_wildcard() {
		let any_identifier = Matcher::any(Identifier);
		assert!(matches(&any_identifier, Identifier, "x"));
		assert!(matches(&any_identifier, Identifier, "SquareGame"));
		assert!(!matches(&any_identifier, Keyword, "class"));
	}

	#[test]
	fn token_side_wildcard() {
		// An empty lexeme on the token side satisfies any lexeme constraint
		// of the same kind.
		let open_brace = Matcher::symbol("{");
		assert!(matches(&open_brace, Symbol, ""));
		assert!(!matches(&open_brace, Keyword, ""));
	}

	#[test]
	fn one_of_matcher() {
		assert!(matches(&Matcher::ANY_STATEMENT, Keyword, "let"));
		assert!(matches(&Matcher::ANY_STATEMENT, Keyword, "while"));
		assert!(!matches(&Matcher::ANY_STATEMENT, Keyword, "else"));
		assert!(!matches(&Matcher::ANY_STATEMENT, Symbol, "let"));
	}

	#[test]
	fn valid_type_matcher() {
		assert!(matches(&Matcher::VALID_TYPE, Keyword, "int"));
		assert!(matches(&Matcher::VALID_TYPE, Keyword, "void"));
		assert!(matches(&Matcher::VALID_TYPE, Identifier, "Square"));
		assert!(!matches(&Matcher::VALID_TYPE, Keyword, "class"));
	}

	#[test]
	fn operation_matchers() {
		for lexeme in ["+", "-", "*", "/", "&", "|", "<", ">", "="] {
			assert!(matches(&Matcher::ANY_OPERATION, Symbol, lexeme));
		}
		assert!(!matches(&Matcher::ANY_OPERATION, Symbol, "~"));
		assert!(matches(&Matcher::ANY_UNARY_OPERATION, Symbol, "~"));
		assert!(matches(&Matcher::ANY_UNARY_OPERATION, Symbol, "-"));
		assert!(!matches(&Matcher::ANY_UNARY_OPERATION, Symbol, "+"));
	}

	#[test]
	fn constant_matchers() {
		assert!(matches(&Matcher::ANY_CONSTANT, IntegerConstant, "5"));
		assert!(matches(&Matcher::ANY_CONSTANT, StringConstant, "hello"));
		assert!(matches(&Matcher::ANY_CONSTANT, Keyword, "true"));
		assert!(matches(&Matcher::ANY_CONSTANT, Keyword, "this"));
		assert!(!matches(&Matcher::ANY_CONSTANT, Keyword, "var"));
	}

	#[test]
	fn keyword_classification() {
		assert_eq!(TokenKind::keyword_or_identifier("class"), Keyword);
		assert_eq!(TokenKind::keyword_or_identifier("boolean"), Keyword);
		assert_eq!(TokenKind::keyword_or_identifier("classy"), Identifier);
		assert_eq!(TokenKind::keyword_or_identifier("x"), Identifier);
	}

	#[test]
	fn display_for_errors() {
		assert_eq!(Token::new(Keyword, "class").to_string(), "keyword 'class'");
		assert_eq!(Matcher::symbol(";").to_string(), "symbol ';'");
		assert_eq!(Matcher::any(Identifier).to_string(), "identifier");
		assert_eq!(Matcher::ANY_UNARY_OPERATION.to_string(), "symbol '-' or symbol '~'");
	}
}
