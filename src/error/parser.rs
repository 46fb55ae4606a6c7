/// Errors that can occur during parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// The token stream diverged from the grammar
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A grammar mismatch: what the active production wanted, what it got.
/// Parsing stops at the first mismatch, so one of these is always the
/// whole story.
#[derive(thiserror::Error, Debug)]
#[error("expected {expected}, encountered {got}")]
pub struct ParseError {
	expected: String,
	got:      String,
}

impl ParseError {
	pub fn new(expected: String, got: String) -> Self { Self { expected, got } }
}
