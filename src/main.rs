use jackc::{Jackc, cli::Cli};
use palc::Parser;

fn main() {
	if let Err(e) = Jackc.compile_path(&Cli::parse().path) {
		eprintln!("Failed compile: {e}");
		std::process::exit(1);
	}
}
