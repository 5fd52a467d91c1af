//! The notification dropdown: fetched fresh on every page load, rendered in
//! server order.

use crate::{api::Api, dom::Mount, render};
use core::cell::RefCell;
use bumpalo::Bump;
use lignin::Node;
use tracing::{error, instrument, trace};

/// Owns the dropdown container inside the navbar bell.
pub struct NotificationWidget {
	dropdown: RefCell<Mount>,
}

impl NotificationWidget {
	#[must_use]
	pub fn new(dropdown: web_sys::Element) -> Self {
		Self {
			dropdown: RefCell::new(Mount::new(dropdown)),
		}
	}

	/// Fetches the session's pending notifications and refills the dropdown.
	///
	/// The server's ordering is authoritative; entries are not re-sorted. On a
	/// transport failure the dropdown keeps whatever it showed before.
	#[instrument(skip(self, api))]
	pub async fn refresh(&self, api: &Api) {
		match api.notifications().await {
			Ok(notifications) => {
				trace!("Fetched {} notification(s).", notifications.len());
				let bump = Bump::new();
				let entries = bump.alloc_slice_fill_with(notifications.len(), |i| {
					render::notification_entry(&bump, &notifications[i])
				});
				self.dropdown.borrow_mut().replace(Node::Multi(entries));
			}
			Err(error) => error!("Failed to fetch notifications: {:?}", error),
		}
	}
}
