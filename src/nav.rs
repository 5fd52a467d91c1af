//! The navbar authentication widget: swaps the signup/login/logout controls
//! to match the session, reveals the logged-in-only page areas and kicks off
//! the notification dropdown.

use crate::{
	api::{routes, Api},
	dom::{self, Mount},
	model::Session,
	notifications::NotificationWidget,
	render,
};
use core::cell::RefCell;
use bumpalo::Bump;
use tracing::{error, info, instrument};

/// What to do with a logged-in but unregistered visitor.
///
/// Every gated page sends them to the signup route; the signup page itself
/// must not, or it would redirect to itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirectPolicy {
	RedirectUnregistered,
	StayOnPage,
}

/// How [`NavWidget::apply`] resolved a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavOutcome {
	/// The unregistered redirect won; nothing was rendered.
	Redirected,
	LoggedIn,
	LoggedOut,
}

/// Owns the navbar authentication container, the notification bell and the
/// optional wrapper around the page's logged-in-only forms.
pub struct NavWidget {
	authentication: RefCell<Mount>,
	bell: web_sys::Element,
	gated: Option<web_sys::Element>,
	notifications: NotificationWidget,
}

impl NavWidget {
	/// `bell` is the bell wrapper (revealed when logged in); `dropdown` is the
	/// list container inside it that receives the notification entries.
	#[must_use]
	pub fn new(
		authentication: web_sys::Element,
		bell: web_sys::Element,
		dropdown: web_sys::Element,
		gated: Option<web_sys::Element>,
	) -> Self {
		Self {
			authentication: RefCell::new(Mount::new(authentication)),
			bell,
			gated,
			notifications: NotificationWidget::new(dropdown),
		}
	}

	/// Fetches the session and applies it, then refreshes the notification
	/// dropdown for logged-in sessions.
	///
	/// Independent of any content fetch the page issues; this widget only
	/// ever mutates its own containers.
	#[instrument(skip(self, api))]
	pub async fn refresh(&self, api: &Api, policy: RedirectPolicy) {
		match api.authentication().await {
			Ok(session) => {
				if self.apply(&session, policy) == NavOutcome::LoggedIn {
					self.notifications.refresh(api).await;
				}
			}
			// Transport failure: the navbar keeps its last-known state.
			Err(error) => error!("Failed to fetch the session state: {:?}", error),
		}
	}

	/// The fetch-free part of [`NavWidget::refresh`].
	///
	/// The unregistered redirect is checked first and returns before any DOM
	/// mutation, so no partial navbar can remain visible once it fires.
	pub fn apply(&self, session: &Session, policy: RedirectPolicy) -> NavOutcome {
		if session.is_user_logged_in && !session.is_user_registered && policy == RedirectPolicy::RedirectUnregistered {
			info!("Logged-in session without a registration; sending to signup.");
			dom::redirect_to(routes::SIGNUP);
			return NavOutcome::Redirected;
		}

		let bump = Bump::new();
		if session.is_user_logged_in {
			self.authentication
				.borrow_mut()
				.replace(render::logout_controls(&bump, &session.authentication_url));
			dom::reveal(&self.bell);
			if let Some(gated) = &self.gated {
				dom::reveal(gated);
			}
			NavOutcome::LoggedIn
		} else {
			self.authentication
				.borrow_mut()
				.replace(render::login_controls(&bump, &session.authentication_url));
			NavOutcome::LoggedOut
		}
	}
}
