use std::{fs, path::Path};

use anyhow::Context;

use crate::{codegen::CodeGenerator, parser::Parser, scanner::Scanner};

/// The compiler driver: walks the filesystem and funnels each source unit
/// through the scan, parse and generate stages. Source units compile
/// independently of one another.
pub struct Jackc;

impl Jackc {
	/// Compile a `.jack` file, or every `.jack` file under a directory.
	pub fn compile_path(&self, path: &Path) -> crate::Result<()> {
		let metadata = fs::metadata(path).context("Failed read input path")?;
		if metadata.is_dir() { self.compile_dir(path) } else { self.compile_file(path) }
	}

	/// Compile every `.jack` file in a directory tree.
	pub fn compile_dir(&self, dir: &Path) -> crate::Result<()> {
		for entry in fs::read_dir(dir).context("Failed read directory")? {
			let path = entry.context("Failed read directory entry")?.path();
			if path.is_dir() {
				self.compile_dir(&path)?;
			} else if path.extension().is_some_and(|extension| extension == "jack") {
				self.compile_file(&path)?;
			}
		}
		Ok(())
	}

	/// Compile one source file and write the sibling `.vm` file. The target
	/// is written only once the whole unit has compiled, so a failed
	/// compile leaves no partial output behind.
	pub fn compile_file(&self, path: &Path) -> crate::Result<()> {
		let source = fs::read_to_string(path).context("Failed open source file")?;
		let assembly = self.compile(&source)?;
		fs::write(path.with_extension("vm"), assembly + "\n").context("Failed write target file")?;
		Ok(())
	}

	/// Compile one source unit to VM assembly.
	pub fn compile(&self, source: &str) -> crate::Result<String> {
		let mut scanner = Scanner::new(source);
		let tokens = scanner.tokenise()?;
		let tree = Parser::new(tokens).parse()?;
		let assembly = CodeGenerator::new().generate(&tree)?;
		Ok(assembly)
	}
}
