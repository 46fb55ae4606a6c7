/// Where a declared name lives. `Static` and `Field` come from class-level
/// declarations; `Argument` and `Local` from subroutine-level ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolKind {
	Static,
	Field,
	Argument,
	Local,
}

impl SymbolKind {
	/// The VM has no `field` segment; fields live in the `this` segment
	/// relative to `pointer 0`. The translation happens here, at the
	/// emission point, so the table stays a faithful picture of the source
	/// declarations.
	pub fn segment(self) -> &'static str {
		match self {
			Self::Static => "static",
			Self::Field => "this",
			Self::Argument => "argument",
			Self::Local => "local",
		}
	}
}

/// One declared name. The index is the symbol's slot within its segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Symbol<'a> {
	pub name:   &'a str,
	pub r#type: &'a str,
	pub kind:   SymbolKind,
	pub index:  usize,
}

/// An insertion-ordered symbol table. Insertion order determines the
/// per-kind index, which determines the emitted VM slot, so rows stay in
/// a flat list rather than a map.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable<'a> {
	rows: Vec<Symbol<'a>>,
}

impl<'a> SymbolTable<'a> {
	pub fn new() -> Self { Self { rows: Vec::new() } }

	/// Insert a symbol; its index is its position among same-kind rows at
	/// insertion time.
	pub fn define(&mut self, name: &'a str, r#type: &'a str, kind: SymbolKind) {
		let index = self.count(kind);
		self.rows.push(Symbol { name, r#type, kind, index });
	}

	/// Look a name up, first match in insertion order.
	pub fn get(&self, name: &str) -> Option<Symbol<'a>> { self.rows.iter().find(|row| row.name == name).copied() }

	pub fn count(&self, kind: SymbolKind) -> usize { self.rows.iter().filter(|row| row.kind == kind).count() }

	pub fn clear(&mut self) { self.rows.clear(); }
}
