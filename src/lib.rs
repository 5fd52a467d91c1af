#![doc(html_root_url = "https://docs.rs/mintern-client/0.1.0")]
#![warn(clippy::pedantic)]

//! Browser client for the Mintern Q&A mentorship forum.
//!
//! Each page of the forum loads this module and calls its boot entry point
//! (see [`controller`]), passing in the elements the page dedicates to each
//! widget. The controllers fetch JSON from the forum server, render
//! [`lignin`] fragments and instantiate them into those elements; the server
//! side (sessions, persistence, mail) is reached exclusively through the
//! [`api`] endpoints.

pub use lignin;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod api;
pub mod controller;
pub mod dom;
pub mod model;
pub mod nav;
pub mod notifications;
pub mod pagination;
pub mod render;

use wasm_bindgen::prelude::wasm_bindgen;

/// Installs the `tracing` subscriber when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
	// A second instantiation keeps the first subscriber.
	drop(tracing_wasm::try_set_as_global_default());
}
