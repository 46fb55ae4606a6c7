pub mod codegen;
pub mod parser;
pub mod scanner;

/// JackError is the top-level error type for the Jack compiler.
#[derive(thiserror::Error, Debug)]
pub enum JackError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	Scanner(#[from] scanner::ScannerError),
	#[error(transparent)]
	Parser(#[from] parser::ParserError),
	#[error(transparent)]
	Codegen(#[from] codegen::CodegenError),
}
