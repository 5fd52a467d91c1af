//! Builds one page of the forum listing: rendered question cards followed by
//! the previous/indicator/next controls row.

use crate::{
	model::ForumPage,
	render::{self, BodyContext, Callback},
};
use bumpalo::Bump;
use lignin::{
	Attribute, Element, ElementCreationOptions, EventBinding, EventBindingOptions, Node, ThreadBound,
};

/// A page of question cards plus its pagination controls.
///
/// The previous/next controls are interactive only where the wire reports a
/// target page; a disabled control carries no event binding at all, so a
/// click on it cannot issue a fetch. Enabled controls carry exactly one
/// binding each — bindings are rebuilt on every render, so repeated renders
/// cannot stack handlers and a pagination click issues exactly one fetch.
///
/// `search_term` only affects presentation here (the results banner); the
/// `previous`/`next` callbacks are expected to close over the same filter
/// context and route their refetch accordingly.
#[must_use]
pub fn forum_listing<'a>(
	bump: &'a Bump,
	forum_page: &ForumPage,
	page_number: u32,
	search_term: &str,
	follow: Option<Callback>,
	previous: Callback,
	next: Callback,
) -> Node<'a, ThreadBound> {
	let banner = if search_term.is_empty() {
		Node::Multi(&[])
	} else {
		search_banner(bump, search_term)
	};

	let questions = forum_page.page_questions.as_slice();
	let cards = bump.alloc_slice_fill_with(questions.len(), |i| {
		render::question_card(bump, &questions[i], BodyContext::Listing, follow)
	});

	let controls = Node::HtmlElement {
		element: bump.alloc_with(|| Element {
			name: "DIV",
			creation_options: ElementCreationOptions::new(),
			attributes: bump.alloc([Attribute {
				name: "class",
				value: "pagination-controls",
			}]),
			content: Node::Multi(bump.alloc([
				page_control(bump, "Previous", forum_page.has_previous(), previous),
				page_indicator(bump, page_number, forum_page.number_of_pages),
				page_control(bump, "Next", forum_page.has_next(), next),
			])),
			event_bindings: &[],
		}),
		dom_binding: None,
	};

	Node::Multi(bump.alloc([banner, Node::Multi(cards), controls]))
}

fn search_banner<'a>(bump: &'a Bump, search_term: &str) -> Node<'a, ThreadBound> {
	Node::HtmlElement {
		element: bump.alloc_with(|| Element {
			name: "DIV",
			creation_options: ElementCreationOptions::new(),
			attributes: bump.alloc([Attribute {
				name: "class",
				value: "search-banner",
			}]),
			content: Node::Multi(bump.alloc([
				Node::Text {
					text: bump.alloc_str(&format!("Results for \"{}\" — ", search_term)),
					dom_binding: None,
				},
				Node::HtmlElement {
					element: bump.alloc_with(|| Element {
						name: "A",
						creation_options: ElementCreationOptions::new(),
						attributes: bump.alloc([Attribute {
							name: "href",
							value: crate::api::routes::HOME,
						}]),
						content: Node::Text {
							text: "back to all questions",
							dom_binding: None,
						},
						event_bindings: &[],
					}),
					dom_binding: None,
				},
			])),
			event_bindings: &[],
		}),
		dom_binding: None,
	}
}

fn page_indicator<'a>(bump: &'a Bump, page_number: u32, number_of_pages: u32) -> Node<'a, ThreadBound> {
	Node::HtmlElement {
		element: bump.alloc_with(|| Element {
			name: "SPAN",
			creation_options: ElementCreationOptions::new(),
			attributes: bump.alloc([Attribute {
				name: "class",
				value: "page-indicator",
			}]),
			content: Node::Text {
				text: bump.alloc_str(&format!("Page {} of {}", page_number, number_of_pages)),
				dom_binding: None,
			},
			event_bindings: &[],
		}),
		dom_binding: None,
	}
}

fn page_control<'a>(bump: &'a Bump, label: &'a str, enabled: bool, callback: Callback) -> Node<'a, ThreadBound> {
	let attributes: &[Attribute] = if enabled {
		bump.alloc([
			Attribute {
				name: "type",
				value: "button",
			},
			Attribute {
				name: "class",
				value: "page-control",
			},
		])
	} else {
		bump.alloc([
			Attribute {
				name: "type",
				value: "button",
			},
			Attribute {
				name: "class",
				value: "page-control",
			},
			Attribute {
				name: "disabled",
				value: "",
			},
		])
	};

	let event_bindings: &[EventBinding<ThreadBound>] = if enabled {
		bump.alloc([EventBinding {
			name: "click",
			callback,
			options: EventBindingOptions::new(),
		}])
	} else {
		&[]
	};

	Node::HtmlElement {
		element: bump.alloc_with(|| Element {
			name: "BUTTON",
			creation_options: ElementCreationOptions::new(),
			attributes,
			content: Node::Text {
				text: label,
				dom_binding: None,
			},
			event_bindings,
		}),
		dom_binding: None,
	}
}
