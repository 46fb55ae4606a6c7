/// Errors that can occur while lowering a syntax tree to VM instructions.
#[derive(thiserror::Error, Debug)]
pub enum CodegenError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error("unknown subroutine flavor '{0}'")]
	UnknownSubroutineFlavor(String),
	#[error("unknown operator '{0}'")]
	UnknownOperator(String),
	#[error("unknown unary operator '{0}'")]
	UnknownUnaryOperator(String),
	#[error("symbol '{0}' not found")]
	SymbolNotFound(String),
	#[error("character '{0}' cannot appear in a string constant")]
	UnknownCharacter(char),
	#[error(transparent)]
	MissingChild(#[from] MissingChild),
}

/// A structural violation in the syntax tree. The parser only produces
/// trees whose children conform to their grammar production, so one of
/// these indicates a parser bug or a corrupted tree.
#[derive(thiserror::Error, Debug)]
pub enum MissingChild {
	#[error("no child at index {0}")]
	Index(usize),
	#[error("child at index {0} is not a token")]
	NotToken(usize),
	#[error("child at index {0} is not an element")]
	NotElement(usize),
	#[error("no child element tagged '{0}'")]
	Tag(&'static str),
}
