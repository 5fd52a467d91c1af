use core::cell::RefCell;
use bumpalo::Bump;
use lignin::{web::Event, CallbackRegistration};
use mintern_client::{
	controller::{empty_listing_disposition, EmptyListing},
	model::{ForumPage, Question},
	pagination,
	render::Callback,
};

mod tree_;
use tree_::{attribute_value, find_labelled, has_attribute, text_of};

fn question(id: i64) -> Question {
	Question {
		id,
		title: format!("Question {}", id),
		body: None,
		asker_name: "avery".to_string(),
		asker_id: 1,
		date_time: "Jul 30, 2026 1:00:00 PM".to_string(),
		number_of_followers: 0,
		number_of_answers: 0,
		user_follows_question: false,
	}
}

fn forum_page(previous_page: Option<u32>, next_page: Option<u32>) -> ForumPage {
	ForumPage {
		page_questions: vec![question(1), question(2)],
		previous_page,
		next_page,
		number_of_pages: 3,
	}
}

/// Runs `check` with a pair of live pagination callbacks.
fn with_callbacks(check: impl FnOnce(Callback, Callback)) {
	let receiver = Box::pin(RefCell::new(0));
	let previous = CallbackRegistration::<_, fn(Event)>::new(receiver.as_ref(), |_, _| ());
	let next = CallbackRegistration::<_, fn(Event)>::new(receiver.as_ref(), |_, _| ());
	check(previous.to_ref_thread_bound(), next.to_ref_thread_bound());
}

#[test]
fn first_page_disables_previous_only() {
	with_callbacks(|previous, next| {
		let bump = Bump::new();
		let listing = pagination::forum_listing(&bump, &forum_page(None, Some(2)), 1, "", None, previous, next);

		let previous_control = find_labelled(listing, "BUTTON", "Previous").expect("no previous control");
		assert!(has_attribute(previous_control, "disabled"));
		assert!(previous_control.event_bindings.is_empty());

		let next_control = find_labelled(listing, "BUTTON", "Next").expect("no next control");
		assert!(!has_attribute(next_control, "disabled"));
		assert_eq!(next_control.event_bindings.len(), 1);
		assert_eq!(next_control.event_bindings[0].name, "click");

		assert!(text_of(listing).contains("Page 1 of 3"));
	});
}

#[test]
fn last_page_disables_next_only() {
	with_callbacks(|previous, next| {
		let bump = Bump::new();
		let listing = pagination::forum_listing(&bump, &forum_page(Some(2), None), 3, "", None, previous, next);

		let previous_control = find_labelled(listing, "BUTTON", "Previous").expect("no previous control");
		assert_eq!(previous_control.event_bindings.len(), 1);
		let next_control = find_labelled(listing, "BUTTON", "Next").expect("no next control");
		assert!(has_attribute(next_control, "disabled"));
		assert!(next_control.event_bindings.is_empty());

		assert!(text_of(listing).contains("Page 3 of 3"));
	});
}

#[test]
fn rendered_questions_precede_the_controls() {
	with_callbacks(|previous, next| {
		let bump = Bump::new();
		let listing = pagination::forum_listing(&bump, &forum_page(None, Some(2)), 1, "", None, previous, next);
		let text = text_of(listing);

		let first_question = text.find("Question 1").expect("first question missing");
		let controls = text.find("Page 1 of 3").expect("indicator missing");
		assert!(first_question < controls);
		assert!(text.contains("Question 2"));
	});
}

#[test]
fn search_context_adds_a_banner_with_a_way_home() {
	with_callbacks(|previous, next| {
		let bump = Bump::new();

		let unfiltered = pagination::forum_listing(&bump, &forum_page(None, Some(2)), 1, "", None, previous, next);
		assert!(!text_of(unfiltered).contains("Results for"));

		let filtered = pagination::forum_listing(&bump, &forum_page(None, Some(2)), 1, "interviews", None, previous, next);
		let text = text_of(filtered);
		assert!(text.contains("Results for \"interviews\""), "got {:?}", text);
		let home = find_labelled(filtered, "A", "back to all questions").expect("no way back home");
		assert_eq!(attribute_value(home, "href"), Some("/index.html"));
	});
}

#[test]
fn empty_listings_redirect_unless_already_at_the_home_defaults() {
	assert_eq!(empty_listing_disposition(1, ""), EmptyListing::Render);
	assert_eq!(empty_listing_disposition(2, ""), EmptyListing::Redirect);
	assert_eq!(empty_listing_disposition(1, "interviews"), EmptyListing::Redirect);
	assert_eq!(empty_listing_disposition(5, "interviews"), EmptyListing::Redirect);
}
