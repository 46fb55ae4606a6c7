use crate::{
	error::codegen::MissingChild,
	scanner::{Token, TokenKind},
};

/// A node of the concrete syntax tree: either a terminal token or an
/// element tagged with the grammar non-terminal it was produced by.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node<'a> {
	Token(Token<'a>),
	Element(Element<'a>),
}

impl<'a> Node<'a> {
	pub fn as_token(&self) -> Option<&Token<'a>> {
		match self {
			Self::Token(token) => Some(token),
			Self::Element(_) => None,
		}
	}

	pub fn as_element(&self) -> Option<&Element<'a>> {
		match self {
			Self::Token(_) => None,
			Self::Element(element) => Some(element),
		}
	}
}

impl<'a> From<Token<'a>> for Node<'a> {
	fn from(token: Token<'a>) -> Self { Self::Token(token) }
}

impl<'a> From<Element<'a>> for Node<'a> {
	fn from(element: Element<'a>) -> Self { Self::Element(element) }
}

/// An interior node. Children preserve source order and keep the
/// terminals interleaved with sub-productions, so the tree is a concrete
/// syntax tree; the code generator reads several children positionally.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element<'a> {
	pub tag:      &'static str,
	pub children: Vec<Node<'a>>,
}

impl<'a> Element<'a> {
	pub fn new(tag: &'static str, children: Vec<Node<'a>>) -> Self { Self { tag, children } }

	pub fn child(&self, index: usize) -> Result<&Node<'a>, MissingChild> {
		self.children.get(index).ok_or(MissingChild::Index(index))
	}

	pub fn child_as_token(&self, index: usize) -> Result<&Token<'a>, MissingChild> {
		self.child(index)?.as_token().ok_or(MissingChild::NotToken(index))
	}

	pub fn child_as_element(&self, index: usize) -> Result<&Element<'a>, MissingChild> {
		self.child(index)?.as_element().ok_or(MissingChild::NotElement(index))
	}

	/// All terminal children, in order
	pub fn child_tokens(&self) -> Vec<&Token<'a>> { self.children.iter().filter_map(Node::as_token).collect() }

	/// All element children, in order
	pub fn child_elements(&self) -> Vec<&Element<'a>> { self.children.iter().filter_map(Node::as_element).collect() }

	/// Direct element children carrying the given tag
	pub fn child_elements_by_tag(&self, tag: &str) -> Vec<&Element<'a>> {
		self.children.iter().filter_map(Node::as_element).filter(|element| element.tag == tag).collect()
	}

	pub fn find_child_element(&self, tag: &str) -> Option<&Element<'a>> {
		self.children.iter().filter_map(Node::as_element).find(|element| element.tag == tag)
	}

	/// First terminal child of the given kind; an empty lexeme matches any
	pub fn find_child_token(&self, kind: TokenKind, lexeme: &str) -> Option<&Token<'a>> {
		self.children
			.iter()
			.filter_map(Node::as_token)
			.find(|token| token.kind == kind && (lexeme.is_empty() || token.lexeme == lexeme))
	}
}

/// Terminal lookup inside a raw child slice; used where a production is
/// addressed as a window of its parent's children.
pub(crate) fn token_at<'e, 'a>(children: &'e [Node<'a>], index: usize) -> Result<&'e Token<'a>, MissingChild> {
	children.get(index).ok_or(MissingChild::Index(index))?.as_token().ok_or(MissingChild::NotToken(index))
}

pub(crate) fn element_at<'e, 'a>(children: &'e [Node<'a>], index: usize) -> Result<&'e Element<'a>, MissingChild> {
	children.get(index).ok_or(MissingChild::Index(index))?.as_element().ok_or(MissingChild::NotElement(index))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Element<'static> {
		Element::new("letStatement", vec![
			Token::new(TokenKind::Keyword, "let").into(),
			Token::new(TokenKind::Identifier, "x").into(),
			Token::new(TokenKind::Symbol, "=").into(),
			Element::new("expression", vec![Element::new("term", vec![
				Token::new(TokenKind::IntegerConstant, "5").into(),
			])
			.into()])
			.into(),
			Token::new(TokenKind::Symbol, ";").into(),
		])
	}

	#[test]
	fn positional_access() {
		let element = sample();
		assert_eq!(element.child_as_token(1).unwrap().lexeme, "x");
		assert_eq!(element.child_as_element(3).unwrap().tag, "expression");
		assert!(matches!(element.child(9), Err(MissingChild::Index(9))));
		assert!(matches!(element.child_as_token(3), Err(MissingChild::NotToken(3))));
		assert!(matches!(element.child_as_element(0), Err(MissingChild::NotElement(0))));
	}

	#[test]
	fn child_filters() {
		let element = sample();
		assert_eq!(element.child_tokens().len(), 4);
		assert_eq!(element.child_elements().len(), 1);
		assert_eq!(element.child_elements_by_tag("expression").len(), 1);
		assert!(element.child_elements_by_tag("term").is_empty());
	}

	#[test]
	fn find_children() {
		let element = sample();
		assert!(element.find_child_element("expression").is_some());
		assert!(element.find_child_element("statements").is_none());
		assert_eq!(element.find_child_token(TokenKind::Symbol, "=").unwrap().lexeme, "=");
		// An empty lexeme is a wildcard over the lexeme.
		assert_eq!(element.find_child_token(TokenKind::Symbol, "").unwrap().lexeme, "=");
		assert!(element.find_child_token(TokenKind::StringConstant, "").is_none());
	}

	#[test]
	fn slice_access() {
		let element = sample();
		assert_eq!(token_at(&element.children, 0).unwrap().lexeme, "let");
		assert_eq!(element_at(&element.children, 3).unwrap().tag, "expression");
		assert!(token_at(&element.children, 3).is_err());
		assert!(element_at(&element.children, 99).is_err());
	}
}
