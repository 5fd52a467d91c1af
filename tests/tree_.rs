//! Helpers for inspecting rendered fragments without a document.

use lignin::{Element, Node, ThreadBound};

/// Concatenates every text node in the fragment, in document order.
pub fn collect_text(node: Node<'_, ThreadBound>, into: &mut String) {
	match node {
		Node::Text { text, .. } => into.push_str(text),
		Node::HtmlElement { element, .. } => collect_text(element.content, into),
		Node::Multi(nodes) => {
			for node in nodes {
				collect_text(*node, into);
			}
		}
		_ => (),
	}
}

pub fn text_of(node: Node<'_, ThreadBound>) -> String {
	let mut text = String::new();
	collect_text(node, &mut text);
	text
}

/// Depth-first search for an element matching `predicate`.
pub fn find_element<'a>(
	node: Node<'a, ThreadBound>,
	predicate: &dyn Fn(&Element<'a, ThreadBound>) -> bool,
) -> Option<&'a Element<'a, ThreadBound>> {
	match node {
		Node::HtmlElement { element, .. } => {
			if predicate(element) {
				Some(element)
			} else {
				find_element(element.content, predicate)
			}
		}
		Node::Multi(nodes) => nodes.iter().find_map(|node| find_element(*node, predicate)),
		_ => None,
	}
}

/// The first element with tag `name` whose own text equals `label`.
pub fn find_labelled<'a>(
	node: Node<'a, ThreadBound>,
	name: &str,
	label: &str,
) -> Option<&'a Element<'a, ThreadBound>> {
	find_element(node, &|element| {
		element.name == name && text_of(element.content) == label
	})
}

pub fn has_attribute(element: &Element<'_, ThreadBound>, name: &str) -> bool {
	element.attributes.iter().any(|attribute| attribute.name == name)
}

pub fn attribute_value<'a>(element: &Element<'a, ThreadBound>, name: &str) -> Option<&'a str> {
	element
		.attributes
		.iter()
		.find(|attribute| attribute.name == name)
		.map(|attribute| attribute.value)
}
