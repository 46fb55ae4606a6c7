//! # How Jack source text becomes VM assembly
//!
//! A Jack class: `class Main { function void main() { do Output.printInt(7); return; } }`

//! ## Scanning
//!
//! Also known as `lexing`, takes in the characters and converts them into
//! tokens. Single characters `{`, `;`, numbers `123`, string literals
//! `"hi!"`, keywords `class` and identifiers `Main` are all tokens.
//!
//! Whitespace and comments are elided, so the token stream for the class
//! above starts `["class", "Main", "{", "function", "void", "main", ...]`.
//! Jack's five token categories are keyword, symbol, identifier, integer
//! constant and string constant.

//! ## Parsing
//!
//! A recursive-descent parser builds a tree over the token stream, one
//! element per grammar production. The tree is a `concrete` syntax tree:
//! every terminal the grammar mentions stays in it, interleaved with the
//! sub-productions, because the code generator reads several children by
//! position. Grammar mismatches abort the parse at the first error.

//! ## Code generation
//!
//! The backend targets the Hack VM, a stack machine with eight memory
//! segments (`argument`, `local`, `static`, `this`, `that`, `pointer`,
//! `temp`, `constant`). Two symbol tables drive name resolution: a class
//! table for `static`/`field` declarations and a subroutine table for
//! `argument`/`local` ones, consulted in that order. Fields live in the
//! `this` segment behind `pointer 0`; array elements go through `that`
//! behind `pointer 1`.
//!
//! Subroutine flavors differ only in their preamble: a constructor
//! allocates its object with `Memory.alloc` and anchors `this` on it, a
//! method anchors `this` on the hidden receiver argument, and a function
//! does neither. Control flow lowers to `if-goto`/`goto` over labels
//! numbered per subroutine.
//!
//! There is deliberately no optimizer and no type checker: the output is
//! the in-order traversal of the tree, and anything the grammar admits is
//! lowered as-is. Cross-class references are left for the VM linker.

pub mod cli;
mod codegen;
mod error;
mod jackc;
mod parser;
mod scanner;

pub use error::{
	JackError,
	codegen::{CodegenError, MissingChild},
	parser::{ParseError, ParserError},
	scanner::{ScanError, ScanErrorType, ScannerError},
};
pub use jackc::Jackc;

/// Result alias over the compiler's top-level error.
pub type Result<T> = std::result::Result<T, JackError>;
