//! Instantiates [`Node`] fragments into the real document, plus the handful
//! of `window`-level helpers the controllers need (redirects, query string).
//!
//! Rendering is always clear-and-replace inside a container the widget owns:
//! there is no diffing, and the wasm [`Closure`]s backing a render's event
//! bindings live exactly until the next render of the same container.
//!
//! DOM failures are logged and tolerated; a botched node is skipped rather
//! than escalated.

use lignin::{DomRef, EventBinding, Node, ThreadBound};
use tracing::{error, info, instrument, trace, warn};
use wasm_bindgen::{closure::Closure, JsCast, UnwrapThrowExt};

/// Nesting cut-off while instantiating fragments. The forum's fragments are
/// shallow; hitting this means a renderer bug, not real content.
const DEPTH_LIMIT: usize = 32;

/// Attached to a single [`web_sys::Element`], this `struct` replaces that
/// element's children with rendered fragments and keeps the event listeners
/// of the current render alive.
pub struct Mount {
	container: web_sys::Element,
	listeners: Vec<Closure<dyn Fn(web_sys::Event)>>,
}

impl Mount {
	#[must_use]
	pub fn new(container: web_sys::Element) -> Self {
		Self {
			container,
			listeners: Vec::new(),
		}
	}

	#[must_use]
	pub fn container(&self) -> &web_sys::Element {
		&self.container
	}

	/// Removes all children (and drops the listeners of the previous render).
	pub fn clear(&mut self) {
		self.listeners.clear();
		while let Some(child) = self.container.first_child() {
			if let Err(error) = self.container.remove_child(&child) {
				error!("Failed to clear the mount container: {:?}", error);
				break;
			}
		}
	}

	/// Replaces the container's content with `content`.
	#[instrument(skip(self, content))]
	pub fn replace(&mut self, content: Node<'_, ThreadBound>) {
		self.clear();
		let document = self
			.container
			.owner_document()
			.expect_throw("mintern-client: No owner document for the mount container.");
		let container = self.container.clone();
		self.append_into(&document, &container, content, DEPTH_LIMIT);
		trace!("Installed {} event listener(s).", self.listeners.len());
	}

	#[allow(clippy::too_many_lines)]
	fn append_into(&mut self, document: &web_sys::Document, parent: &web_sys::Element, node: Node<'_, ThreadBound>, depth_limit: usize) {
		if depth_limit == 0 {
			return error!("Depth limit reached");
		}

		match node {
			Node::Text { text, dom_binding } => {
				let dom_text = document.create_text_node(text);
				if let Err(error) = parent.append_child(dom_text.as_ref()) {
					return error!("Failed to insert text: {:?}", error);
				}
				if let Some(dom_binding) = dom_binding {
					dom_binding.call(DomRef::Added(&dom_text.into()));
				}
			}

			Node::Comment { comment, dom_binding } => {
				let dom_comment = document.create_comment(comment);
				if let Err(error) = parent.append_child(dom_comment.as_ref()) {
					return error!("Failed to insert comment: {:?}", error);
				}
				if let Some(dom_binding) = dom_binding {
					dom_binding.call(DomRef::Added(&dom_comment.into()));
				}
			}

			Node::HtmlElement { element, dom_binding } => {
				let dom_element = match document.create_element(element.name) {
					Ok(element) => element,
					Err(error) => {
						return error!("Failed to create HTML element <{}>: {:?}", element.name, error);
					}
				};

				let attributes = dom_element.attributes();
				for attribute in element.attributes {
					add_attribute(document, &attributes, attribute);
				}
				for binding in element.event_bindings {
					self.add_event_listener(&dom_element, binding);
				}
				self.append_into(document, &dom_element, element.content, depth_limit - 1);

				if let Err(error) = parent.append_child(dom_element.as_ref()) {
					return error!("Failed to insert HTML element <{}>: {:?}", element.name, error);
				}
				let dom_element = dom_element.dyn_into::<web_sys::HtmlElement>().unwrap_throw();
				if let Some(dom_binding) = dom_binding {
					dom_binding.call(DomRef::Added(&dom_element.into()));
				}
			}

			Node::Multi(nodes) => {
				for node in nodes {
					self.append_into(document, parent, *node, depth_limit - 1);
				}
			}

			Node::Keyed(reorderable_fragments) => {
				// No reordering without diffing; keyed content instantiates in order.
				for reorderable_fragment in reorderable_fragments {
					self.append_into(document, parent, reorderable_fragment.content, depth_limit - 1);
				}
			}

			Node::Memoized { state_key: _, content } => self.append_into(document, parent, *content, depth_limit - 1),

			// The forum renderers only produce HTML content.
			Node::SvgElement { element, dom_binding: _ } => {
				error!("Unexpected SVG element <{}>; skipping.", element.name);
			}
			Node::MathMlElement { element, dom_binding: _ } => {
				error!("Unexpected MathML element <{}>; skipping.", element.name);
			}
			Node::RemnantSite(_) => error!("Unexpected remnant site; skipping."),
		}
	}

	fn add_event_listener(&mut self, element: &web_sys::Element, binding: &EventBinding<'_, ThreadBound>) {
		let callback = binding.callback;
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| callback.call(event.into())) as Box<dyn Fn(web_sys::Event)>);

		let mut options = web_sys::AddEventListenerOptions::new();
		options
			.capture(binding.options.capture())
			.once(binding.options.once())
			.passive(binding.options.passive());

		if let Err(error) = element.add_event_listener_with_callback_and_add_event_listener_options(
			binding.name,
			closure.as_ref().unchecked_ref(),
			&options,
		) {
			error!("Failed to add event listener {:?}: {:?}", binding.name, error);
		}
		self.listeners.push(closure);
	}
}

fn add_attribute(document: &web_sys::Document, attributes: &web_sys::NamedNodeMap, &lignin::Attribute { name, value }: &lignin::Attribute) {
	let attribute = match document.create_attribute(name) {
		Ok(attribute) => attribute,
		Err(error) => return error!("Could not create attribute {:?}: {:?}", name, error),
	};
	if !value.is_empty() {
		attribute.set_value(value);
	}
	match attributes.set_named_item(&attribute) {
		Ok(None) => (),
		Err(error) => error!("Could not add attribute {:?}={:?}: {:?}", name, value, error),
		Ok(Some(replaced)) => error!("Attribute collision. Added attribute {:?}={:?} was {:?} before", name, value, replaced),
	}
}

/// Makes a `hidden` element visible. Used for the logged-in-only page areas.
pub fn reveal(element: &web_sys::Element) {
	if let Err(error) = element.remove_attribute("hidden") {
		warn!("Failed to reveal element: {:?}", error);
	}
}

/// Navigates away from the current page. Anything the controllers still hold
/// becomes irrelevant once this resolves.
pub fn redirect_to(url: &str) {
	info!("Redirecting to {:?}.", url);
	match web_sys::window() {
		Some(window) => {
			if let Err(error) = window.location().set_href(url) {
				error!("Failed to redirect to {:?}: {:?}", url, error);
			}
		}
		None => error!("No window to redirect from."),
	}
}

/// Reloads the current page, re-syncing every widget from the server.
pub fn reload() {
	match web_sys::window() {
		Some(window) => {
			if let Err(error) = window.location().reload() {
				error!("Failed to reload: {:?}", error);
			}
		}
		None => error!("No window to reload."),
	}
}

/// Reads one query-string parameter of the current page.
#[must_use]
pub fn query_parameter(name: &str) -> Option<String> {
	let window = web_sys::window()?;
	let search = window.location().search().ok()?;
	let parameters = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
	parameters.get(name)
}
