//! One controller per logical page. Each boot entry point receives the
//! elements its widgets own (pages never re-query the document by id), wires
//! the interactions and issues the page's initial fetches.
//!
//! Controllers are pinned and leaked at boot: they live until the page is
//! navigated away from, at which point the browser reclaims the whole module
//! instance. Event handlers receive the controller back as a raw pointer
//! through [`CallbackRegistration`] and rely on that leak for validity.

use crate::{
	api::{routes, Api, FollowAction, NotificationTopic},
	dom::{self, Mount},
	model::{Answer, Answers, ApprovalNotice, ForumPage, MentorEvidence, Question},
	nav::{NavWidget, RedirectPolicy},
	pagination,
	render::{self, BodyContext},
};
use core::{
	cell::{Cell, RefCell},
	pin::Pin,
};
use bumpalo::Bump;
use lignin::{web::Event, CallbackRegistration, Node};
use tracing::{error, info, instrument, warn};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, UnwrapThrowExt};
use wasm_bindgen_futures::spawn_local;

/// Pins a value for the rest of the page's life.
///
/// Navigation is the only way a page controller ends, and it reclaims the
/// entire module instance, so nothing here ever needs to be dropped.
fn leak<T>(value: T) -> Pin<&'static T> {
	unsafe {
		//SAFETY: The value is boxed and never dropped or moved again.
		Pin::new_unchecked(Box::leak(Box::new(value)))
	}
}

/// Builds the page's [`NavWidget`] and refreshes it concurrently with
/// whatever content fetches the caller issues. Completion order is
/// unconstrained; the widget only ever mutates its own containers.
fn spawn_nav_refresh(
	api: &Api,
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	gated: Option<web_sys::Element>,
	policy: RedirectPolicy,
) {
	let nav = leak(NavWidget::new(navbar, bell, dropdown, gated));
	let api = api.clone();
	spawn_local(async move { nav.refresh(&api, policy).await });
}

/// Sends logged-out visitors of a gated page home.
fn gate_logged_out(api: &Api) {
	let api = api.clone();
	spawn_local(async move {
		match api.authentication().await {
			Ok(session) => {
				if !session.is_user_logged_in {
					dom::redirect_to(routes::HOME);
				}
			}
			Err(error) => error!("Failed to fetch the session state: {:?}", error),
		}
	});
}

/// Disposition of a listing fetch that came back empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmptyListing {
	/// Empty result for a filtered or out-of-range request; go home.
	Redirect,
	/// Already at the home defaults, where a redirect would loop onto the
	/// same page; render the empty container instead.
	Render,
}

/// How the forum controller treats an empty listing response.
#[must_use]
pub fn empty_listing_disposition(page: u32, search_term: &str) -> EmptyListing {
	if page <= 1 && search_term.is_empty() {
		EmptyListing::Render
	} else {
		EmptyListing::Redirect
	}
}

#[derive(Clone, Copy)]
struct ForumRefs {
	follow: render::Callback,
	previous: render::Callback,
	next: render::Callback,
}

struct ForumCallbacks {
	follow: CallbackRegistration<ForumController, fn(Event)>,
	previous: CallbackRegistration<ForumController, fn(Event)>,
	next: CallbackRegistration<ForumController, fn(Event)>,
}

/// The forum listing: paged, optionally filtered by the `search` query-string
/// parameter, with follow toggles on every card.
///
/// Search submissions and "back to home" are plain navigations, so the filter
/// context is fixed for this controller's lifetime; only the page number
/// moves in place.
pub struct ForumController {
	api: Api,
	/// Filter context; empty selects the unfiltered listing.
	search: String,
	page: Cell<u32>,
	forum: RefCell<Option<ForumPage>>,
	listing: RefCell<Mount>,
	refs: Cell<Option<ForumRefs>>,
}

impl ForumController {
	/// Wires the listing into `listing` and issues the initial fetch.
	pub fn boot(api: Api, listing: web_sys::Element) {
		let search = dom::query_parameter("search").unwrap_or_default();
		let page = dom::query_parameter("page")
			.and_then(|page| page.parse().ok())
			.unwrap_or(1);
		info!("Booting the forum listing on page {} (search: {:?}).", page, search);

		let controller = leak(Self {
			api,
			search,
			page: Cell::new(page),
			forum: RefCell::new(None),
			listing: RefCell::new(Mount::new(listing)),
			refs: Cell::new(None),
		});
		let callbacks = leak(ForumCallbacks {
			follow: CallbackRegistration::<_, fn(Event)>::new(controller, handle_forum_follow),
			previous: CallbackRegistration::<_, fn(Event)>::new(controller, handle_previous_page),
			next: CallbackRegistration::<_, fn(Event)>::new(controller, handle_next_page),
		});
		controller.refs.set(Some(ForumRefs {
			follow: callbacks.follow.to_ref_thread_bound(),
			previous: callbacks.previous.to_ref_thread_bound(),
			next: callbacks.next.to_ref_thread_bound(),
		}));

		controller.get_ref().load(page);
	}

	/// Fetches `page` in the current filter context and re-renders on arrival.
	/// Exactly one fetch per call.
	#[instrument(skip(self))]
	fn load(&'static self, page: u32) {
		spawn_local(async move {
			let fetched = if self.search.is_empty() {
				self.api.forum_page(page).await
			} else {
				self.api.search_questions(&self.search, page).await
			};
			match fetched {
				Ok(forum) => self.present(forum, page),
				// Transport failure: the listing keeps its last-known state.
				Err(error) => error!("Failed to fetch the forum listing: {:?}", error),
			}
		});
	}

	fn present(&self, forum: ForumPage, page: u32) {
		if forum.page_questions.is_empty() {
			match empty_listing_disposition(page, &self.search) {
				EmptyListing::Redirect => return dom::redirect_to(routes::HOME),
				EmptyListing::Render => warn!("The forum has no questions to show."),
			}
		}
		self.page.set(page);
		*self.forum.borrow_mut() = Some(forum);
		self.render_listing();
	}

	fn render_listing(&self) {
		let forum = self.forum.borrow();
		let forum = match &*forum {
			Some(forum) => forum,
			None => return,
		};
		let refs = self
			.refs
			.get()
			.expect_throw("mintern-client: Forum callbacks not registered.");
		let bump = Bump::new();
		self.listing.borrow_mut().replace(pagination::forum_listing(
			&bump,
			forum,
			self.page.get(),
			&self.search,
			Some(refs.follow),
			refs.previous,
			refs.next,
		));
	}

	/// Optimistic toggle: the local record and the rendered count change
	/// immediately; the server call follows and is never awaited for UI
	/// state, nor rolled back on failure. The next page load re-syncs.
	fn toggle_follow(&'static self, question_id: i64) {
		let now_following = {
			let mut forum = self.forum.borrow_mut();
			let question = forum.as_mut().and_then(|forum| {
				forum
					.page_questions
					.iter_mut()
					.find(|question| question.id == question_id)
			});
			match question {
				Some(question) => question.toggle_followed(),
				None => return warn!("Follow toggled for unknown question {}.", question_id),
			}
		};
		self.render_listing();
		spawn_local(async move {
			if let Err(error) = self
				.api
				.set_following(FollowAction::for_state(now_following), question_id)
				.await
			{
				error!("Failed to persist the follow state for question {}: {:?}", question_id, error);
			}
		});
	}
}

fn handle_previous_page(controller: *const ForumController, _: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	let target = controller.page.get().saturating_sub(1).max(1);
	controller.load(target);
}

fn handle_next_page(controller: *const ForumController, _: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	controller.load(controller.page.get() + 1);
}

fn handle_forum_follow(controller: *const ForumController, event: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	match follow_target(event) {
		Some(question_id) => controller.toggle_follow(question_id),
		None => warn!("Follow toggle without a usable question id."),
	}
}

/// Reads the `data-question-id` attribute off the clicked follow control.
#[cfg(target_arch = "wasm32")]
fn follow_target(event: Event) -> Option<i64> {
	use lignin::Materialize;
	use wasm_bindgen::JsValue;

	let event = event.materialize();
	let event: &JsValue = event.as_ref();
	let event = event.dyn_ref::<web_sys::Event>()?;
	let target = event.current_target()?;
	let element = target.dyn_ref::<web_sys::Element>()?;
	element.get_attribute("data-question-id")?.parse().ok()
}

/// Events only ever originate in the browser.
#[cfg(not(target_arch = "wasm32"))]
fn follow_target(_: Event) -> Option<i64> {
	None
}

#[derive(Clone, Copy)]
struct QuestionRefs {
	follow: render::Callback,
}

struct QuestionCallbacks {
	follow: CallbackRegistration<QuestionController, fn(Event)>,
}

/// A single question with its answers and their comments.
pub struct QuestionController {
	api: Api,
	question_id: i64,
	question: RefCell<Option<Question>>,
	question_mount: RefCell<Mount>,
	answers_mount: RefCell<Mount>,
	refs: Cell<Option<QuestionRefs>>,
}

impl QuestionController {
	/// Reads the question id from the query string; a page without a usable
	/// id has nothing to show and redirects home.
	pub fn boot(api: Api, question: web_sys::Element, answers: web_sys::Element, answer_form: Option<web_sys::Element>) {
		let question_id = match dom::query_parameter("id").and_then(|id| id.parse().ok()) {
			Some(id) => id,
			None => {
				warn!("Question page without a usable id; sending home.");
				return dom::redirect_to(routes::HOME);
			}
		};
		info!("Booting the question page for question {}.", question_id);

		let controller = leak(Self {
			api,
			question_id,
			question: RefCell::new(None),
			question_mount: RefCell::new(Mount::new(question)),
			answers_mount: RefCell::new(Mount::new(answers)),
			refs: Cell::new(None),
		});
		let callbacks = leak(QuestionCallbacks {
			follow: CallbackRegistration::<_, fn(Event)>::new(controller, handle_question_follow),
		});
		controller.refs.set(Some(QuestionRefs {
			follow: callbacks.follow.to_ref_thread_bound(),
		}));

		if let Some(form) = answer_form {
			notify_followers_on_submit(&controller.api, &form, question_id);
		}
		controller.get_ref().load();
	}

	/// The question and its answers load independently and may arrive in
	/// either order; each render only touches its own mount.
	#[instrument(skip(self))]
	fn load(&'static self) {
		spawn_local(async move {
			match self.api.questions(self.question_id).await {
				Ok(questions) => match questions.into_iter().next() {
					Some(question) => {
						*self.question.borrow_mut() = Some(question);
						self.render_question();
					}
					None => {
						// An empty record set for a required id is a redirect
						// signal, not an error state.
						warn!("No question with id {}; sending home.", self.question_id);
						dom::redirect_to(routes::HOME);
					}
				},
				Err(error) => error!("Failed to fetch question {}: {:?}", self.question_id, error),
			}
		});
		spawn_local(async move {
			match self.api.answers(self.question_id).await {
				Ok(answers) => self.render_answers(answers),
				Err(error) => error!("Failed to fetch answers for question {}: {:?}", self.question_id, error),
			}
		});
	}

	fn render_question(&self) {
		let question = self.question.borrow();
		let question = match &*question {
			Some(question) => question,
			None => return,
		};
		let refs = self
			.refs
			.get()
			.expect_throw("mintern-client: Question callbacks not registered.");
		let bump = Bump::new();
		self.question_mount.borrow_mut().replace(render::question_card(
			&bump,
			question,
			BodyContext::Detail,
			Some(refs.follow),
		));
	}

	fn render_answers(&self, answers: Answers) {
		let mut answers: Vec<Answer> = answers.into_iter().map(|(_, answer)| answer).collect();
		// Object member order is not contractual; ids are assigned in
		// insertion order, which tracks the server's date ordering.
		answers.sort_unstable_by_key(|answer| answer.id);
		let bump = Bump::new();
		let entries = bump.alloc_slice_fill_with(answers.len(), |i| render::answer_entry(&bump, &answers[i]));
		self.answers_mount.borrow_mut().replace(Node::Multi(entries));
	}

	/// Same optimistic semantics as the forum listing's toggle.
	fn toggle_follow(&'static self) {
		let now_following = {
			let mut question = self.question.borrow_mut();
			match &mut *question {
				Some(question) => question.toggle_followed(),
				None => return,
			}
		};
		self.render_question();
		let question_id = self.question_id;
		spawn_local(async move {
			if let Err(error) = self
				.api
				.set_following(FollowAction::for_state(now_following), question_id)
				.await
			{
				error!("Failed to persist the follow state for question {}: {:?}", question_id, error);
			}
		});
	}
}

fn handle_question_follow(controller: *const QuestionController, _: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	controller.toggle_follow();
}

/// Installs a non-intercepting `submit` listener that tells the question's
/// followers about the new answer. The native submission proceeds and
/// navigates; the notification write is fire-and-forget.
fn notify_followers_on_submit(api: &Api, form: &web_sys::Element, question_id: i64) {
	let api = api.clone();
	let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
		let api = api.clone();
		spawn_local(async move {
			if let Err(error) = api.post_notification(NotificationTopic::Question, question_id).await {
				error!("Failed to notify followers of question {}: {:?}", question_id, error);
			}
		});
	}) as Box<dyn Fn(web_sys::Event)>);
	if let Err(error) = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref()) {
		error!("Failed to attach the answer submit listener: {:?}", error);
	}
	// Page-lifetime listener.
	closure.forget();
}

/// The signup page: fills the form option lists. The forms themselves post
/// natively.
pub struct SignupController {
	api: Api,
	mentee_majors: RefCell<Mount>,
	mentor_majors: RefCell<Mount>,
	mentor_tags: RefCell<Mount>,
}

impl SignupController {
	pub fn boot(
		api: Api,
		mentee_majors: web_sys::Element,
		mentor_majors: web_sys::Element,
		mentor_tags: web_sys::Element,
	) {
		let controller = leak(Self {
			api,
			mentee_majors: RefCell::new(Mount::new(mentee_majors)),
			mentor_majors: RefCell::new(Mount::new(mentor_majors)),
			mentor_tags: RefCell::new(Mount::new(mentor_tags)),
		})
		.get_ref();
		controller.gate();
		controller.load();
	}

	/// Signup is only for logged-in visitors who have not registered yet;
	/// everyone else is sent home.
	fn gate(&'static self) {
		spawn_local(async move {
			match self.api.authentication().await {
				Ok(session) => {
					if !session.is_user_logged_in || session.is_user_registered {
						dom::redirect_to(routes::HOME);
					}
				}
				Err(error) => error!("Failed to fetch the session state: {:?}", error),
			}
		});
	}

	#[instrument(skip(self))]
	fn load(&'static self) {
		spawn_local(async move {
			match self.api.majors().await {
				Ok(majors) => {
					let mut majors: Vec<(u32, String)> = majors.into_iter().collect();
					// Stable option order; the map itself has none.
					majors.sort_unstable_by_key(|&(id, _)| id);
					let bump = Bump::new();
					self.mentee_majors
						.borrow_mut()
						.replace(render::major_options(&bump, &majors));
					self.mentor_majors
						.borrow_mut()
						.replace(render::major_options(&bump, &majors));
				}
				Err(error) => error!("Failed to fetch majors: {:?}", error),
			}
		});
		spawn_local(async move {
			match self.api.subject_tags().await {
				Ok(tags) => {
					let bump = Bump::new();
					self.mentor_tags
						.borrow_mut()
						.replace(render::tag_checkboxes(&bump, &tags));
				}
				Err(error) => error!("Failed to fetch subject tags: {:?}", error),
			}
		});
	}
}

#[derive(Clone, Copy)]
struct ApprovalRefs {
	approve: render::Callback,
	reject: render::Callback,
}

struct ApprovalCallbacks {
	approve: CallbackRegistration<ApprovalController, fn(Event)>,
	reject: CallbackRegistration<ApprovalController, fn(Event)>,
}

/// The mentor-approval page: one of seven notices depending on the viewer's
/// role and the review state, with decision buttons for a pending review.
pub struct ApprovalController {
	api: Api,
	mentor_id: i64,
	evidence: RefCell<Option<MentorEvidence>>,
	notice: RefCell<Mount>,
	refs: Cell<Option<ApprovalRefs>>,
}

impl ApprovalController {
	pub fn boot(api: Api, notice: web_sys::Element) {
		let mentor_id = match dom::query_parameter("id").and_then(|id| id.parse().ok()) {
			Some(id) => id,
			None => {
				warn!("Approval page without a usable mentor id; sending home.");
				return dom::redirect_to(routes::HOME);
			}
		};
		info!("Booting the approval page for mentor {}.", mentor_id);

		let controller = leak(Self {
			api,
			mentor_id,
			evidence: RefCell::new(None),
			notice: RefCell::new(Mount::new(notice)),
			refs: Cell::new(None),
		});
		let callbacks = leak(ApprovalCallbacks {
			approve: CallbackRegistration::<_, fn(Event)>::new(controller, handle_approve),
			reject: CallbackRegistration::<_, fn(Event)>::new(controller, handle_reject),
		});
		controller.refs.set(Some(ApprovalRefs {
			approve: callbacks.approve.to_ref_thread_bound(),
			reject: callbacks.reject.to_ref_thread_bound(),
		}));

		controller.get_ref().load();
	}

	#[instrument(skip(self))]
	fn load(&'static self) {
		spawn_local(async move {
			match self.api.mentor_approval(self.mentor_id).await {
				Ok(evidence) => match evidence.notice(self.mentor_id) {
					Some(notice) => {
						*self.evidence.borrow_mut() = Some(evidence);
						self.render_notice(notice);
					}
					None => {
						// Neither the mentor nor an assigned approver.
						warn!("Approval page visited without a matching role; sending home.");
						dom::redirect_to(routes::HOME);
					}
				},
				Err(error) => error!("Failed to fetch the approval record for mentor {}: {:?}", self.mentor_id, error),
			}
		});
	}

	fn render_notice(&self, notice: ApprovalNotice) {
		let evidence = self.evidence.borrow();
		let evidence = match &*evidence {
			Some(evidence) => evidence,
			None => return,
		};
		let refs = self
			.refs
			.get()
			.expect_throw("mintern-client: Approval callbacks not registered.");
		let bump = Bump::new();
		self.notice.borrow_mut().replace(render::approval_notice(
			&bump,
			evidence,
			notice,
			Some(refs.approve),
			Some(refs.reject),
		));
	}

	/// Posts the decision, then forces a full reload so every widget reflects
	/// the new review state.
	fn decide(&'static self, is_approved: bool) {
		spawn_local(async move {
			match self.api.post_approval(self.mentor_id, is_approved).await {
				Ok(()) => dom::reload(),
				Err(error) => error!("Failed to post the review decision for mentor {}: {:?}", self.mentor_id, error),
			}
		});
	}
}

fn handle_approve(controller: *const ApprovalController, _: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	controller.decide(true);
}

fn handle_reject(controller: *const ApprovalController, _: Event) {
	//SAFETY: Page controllers are leaked at boot and never dropped.
	let controller = unsafe { &*controller };
	controller.decide(false);
}

/// Entry point for the forum index: navbar, notification bell and the paged,
/// searchable question listing. The search form and the "back to home" link
/// are plain navigations and need no wiring here.
#[wasm_bindgen]
pub fn boot_forum_page(
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	gated: Option<web_sys::Element>,
	listing: web_sys::Element,
) {
	let api = Api::from_window();
	spawn_nav_refresh(&api, navbar, bell, dropdown, gated, RedirectPolicy::RedirectUnregistered);
	ForumController::boot(api, listing);
}

/// Entry point for the single-question page. `answer_form` is the (optional)
/// post-answer form; comment forms post natively and are not passed in.
#[wasm_bindgen]
pub fn boot_question_page(
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	gated: Option<web_sys::Element>,
	question: web_sys::Element,
	answers: web_sys::Element,
	answer_form: Option<web_sys::Element>,
) {
	let api = Api::from_window();
	spawn_nav_refresh(&api, navbar, bell, dropdown, gated, RedirectPolicy::RedirectUnregistered);
	QuestionController::boot(api, question, answers, answer_form);
}

/// Entry point for the signup page.
#[wasm_bindgen]
pub fn boot_signup_page(
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	mentee_majors: web_sys::Element,
	mentor_majors: web_sys::Element,
	mentor_tags: web_sys::Element,
) {
	let api = Api::from_window();
	// This *is* the signup page; the unregistered redirect must not fire here.
	spawn_nav_refresh(&api, navbar, bell, dropdown, None, RedirectPolicy::StayOnPage);
	SignupController::boot(api, mentee_majors, mentor_majors, mentor_tags);
}

/// Entry point for the mentor-verification page; the evidence form posts
/// natively, so the page only needs the navbar and its access gates.
#[wasm_bindgen]
pub fn boot_verification_page(
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	gated: Option<web_sys::Element>,
) {
	let api = Api::from_window();
	spawn_nav_refresh(&api, navbar, bell, dropdown, gated, RedirectPolicy::RedirectUnregistered);
	gate_logged_out(&api);
}

/// Entry point for the mentor-approval page.
#[wasm_bindgen]
pub fn boot_approval_page(
	navbar: web_sys::Element,
	bell: web_sys::Element,
	dropdown: web_sys::Element,
	notice: web_sys::Element,
) {
	let api = Api::from_window();
	spawn_nav_refresh(&api, navbar, bell, dropdown, None, RedirectPolicy::RedirectUnregistered);
	ApprovalController::boot(api, notice);
}
