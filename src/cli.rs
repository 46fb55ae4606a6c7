use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(name = "jackc", after_long_help = "Compiles Jack sources to Hack VM assembly.")]
pub struct Cli {
	/// A .jack source file, or a directory tree of .jack sources
	pub path: PathBuf,
}
