use core::cell::RefCell;
use bumpalo::Bump;
use lignin::{web::Event, CallbackRegistration};
use mintern_client::{
	api::FollowAction,
	model::{Answer, Comment, Notification, Question},
	render::{self, BodyContext, BODY_PREVIEW_LIMIT},
};

mod tree_;
use tree_::{attribute_value, find_element, find_labelled, text_of};

fn question() -> Question {
	Question {
		id: 7,
		title: "How do I prepare for an internship interview?".to_string(),
		body: Some("Practice.".to_string()),
		asker_name: "dana".to_string(),
		asker_id: 3,
		date_time: "Aug 5, 2026 10:15:00 AM".to_string(),
		number_of_followers: 1,
		number_of_answers: 2,
		user_follows_question: false,
	}
}

fn comment(body: Option<&str>) -> Comment {
	Comment {
		body: body.map(str::to_string),
		author_name: body.map(|_| "casey".to_string()),
		date_time: body.map(|_| "Aug 5, 2026 11:00:00 AM".to_string()),
		is_verified_mentor: false,
	}
}

#[test]
fn counts_are_singular_exactly_at_one() {
	for count in 0..=4 {
		let label = render::count_label(count, "follower");
		if count == 1 {
			assert_eq!(label, "1 follower");
		} else {
			assert_eq!(label, format!("{} followers", count));
		}
	}
}

#[test]
fn listing_preview_truncates_past_the_threshold() {
	let body: String = "a".repeat(BODY_PREVIEW_LIMIT + 40);
	let preview = render::body_preview(&body, BodyContext::Listing);
	assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
	assert!(preview.ends_with('…'));
}

#[test]
fn listing_preview_keeps_bodies_at_the_threshold() {
	let body: String = "b".repeat(BODY_PREVIEW_LIMIT);
	assert_eq!(render::body_preview(&body, BodyContext::Listing), body);
}

#[test]
fn previews_flatten_line_breaks() {
	let preview = render::body_preview("one\r\ntwo\nthree\rfour", BodyContext::Listing);
	assert_eq!(preview, "one two three four");
}

#[test]
fn detail_context_never_truncates() {
	let body: String = "c".repeat(BODY_PREVIEW_LIMIT * 3);
	let preview = render::body_preview(&body, BodyContext::Detail);
	assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT * 3);
}

#[test]
fn question_card_shows_both_counts() {
	let bump = Bump::new();
	let card = render::question_card(&bump, &question(), BodyContext::Listing, None);
	let text = text_of(card);
	assert!(text.contains("1 follower"), "got {:?}", text);
	assert!(!text.contains("1 followers"), "got {:?}", text);
	assert!(text.contains("2 answers"), "got {:?}", text);
}

#[test]
fn question_card_truncates_only_in_listing_context() {
	let mut question = question();
	question.body = Some("d".repeat(BODY_PREVIEW_LIMIT * 2));

	let bump = Bump::new();
	let listing = text_of(render::question_card(&bump, &question, BodyContext::Listing, None));
	let detail = text_of(render::question_card(&bump, &question, BodyContext::Detail, None));
	assert!(listing.contains('…'));
	assert!(!detail.contains('…'));
}

#[test]
fn follow_toggle_updates_the_rendered_count_and_reports_follow() {
	let mut question = question();
	assert_eq!(question.number_of_followers, 1);
	assert!(!question.user_follows_question);

	let now_following = question.toggle_followed();
	assert!(now_following);
	assert_eq!(FollowAction::for_state(now_following), FollowAction::Follow);
	assert_eq!(FollowAction::for_state(now_following).as_str(), "follow");

	let bump = Bump::new();
	let text = text_of(render::question_card(&bump, &question, BodyContext::Listing, None));
	assert!(text.contains("2 followers"), "got {:?}", text);

	assert!(!question.toggle_followed());
	assert_eq!(question.number_of_followers, 1);
}

#[test]
fn follow_control_carries_the_question_id_and_state() {
	let receiver = Box::pin(RefCell::new(0));
	let callback = CallbackRegistration::<_, fn(Event)>::new(receiver.as_ref(), |_, _| ());

	let mut question = question();
	question.user_follows_question = true;

	let bump = Bump::new();
	let card = render::question_card(&bump, &question, BodyContext::Listing, Some(callback.to_ref_thread_bound()));
	let control = find_element(card, &|element| {
		element.name == "BUTTON" && element.attributes.iter().any(|attribute| attribute.name == "data-question-id")
	})
	.expect("no follow control rendered");

	assert_eq!(attribute_value(control, "data-question-id"), Some("7"));
	assert_eq!(attribute_value(control, "class"), Some("follow-toggle following"));
	assert_eq!(control.event_bindings.len(), 1);
	assert_eq!(control.event_bindings[0].name, "click");

	drop(callback);
}

#[test]
fn verified_mentors_get_a_marker() {
	let answer = Answer {
		id: 1,
		body: "Reach out to your recruiter early.".to_string(),
		author_name: "sam".to_string(),
		date_time: "Aug 1, 2026 9:00:00 AM".to_string(),
		is_verified_mentor: true,
		comment_list: Vec::new(),
	};

	let bump = Bump::new();
	let text = text_of(render::answer_entry(&bump, &answer));
	assert!(text.contains("sam ✔"), "got {:?}", text);
}

#[test]
fn unverified_authors_get_no_marker() {
	let bump = Bump::new();
	let text = text_of(render::comment_entry(&bump, &comment(Some("Thanks!"))));
	assert!(!text.contains('✔'), "got {:?}", text);
}

#[test]
fn absent_comments_are_filtered_before_rendering() {
	let answer = Answer {
		id: 2,
		body: "Keep a list of projects you liked.".to_string(),
		author_name: "ren".to_string(),
		date_time: "Aug 2, 2026 3:30:00 PM".to_string(),
		is_verified_mentor: false,
		comment_list: vec![None, Some(comment(None)), Some(comment(Some("Good call.")))],
	};
	assert_eq!(answer.present_comments().count(), 1);

	let bump = Bump::new();
	let text = text_of(render::answer_entry(&bump, &answer));
	assert!(text.contains("Good call."));
	assert!(text.contains("casey"));
}

#[test]
fn notification_entries_link_to_their_element() {
	let notification = Notification {
		message: "You got an answer".to_string(),
		timestamp: "Aug 4, 2026 8:00:00 PM".to_string(),
		url: "/question.html?id=12".to_string(),
	};

	let bump = Bump::new();
	let entry = render::notification_entry(&bump, &notification);
	let anchor = find_element(entry, &|element| element.name == "A").expect("no anchor rendered");
	assert_eq!(attribute_value(anchor, "href"), Some("/question.html?id=12"));
	let text = text_of(entry);
	assert!(text.contains("You got an answer"));
	assert!(text.contains("Aug 4, 2026 8:00:00 PM"));
}

#[test]
fn navbar_controls_follow_the_session() {
	let bump = Bump::new();

	let logged_out = render::login_controls(&bump, "/log-me-in");
	for label in &["Sign Up", "Log In"] {
		let control = find_labelled(logged_out, "A", label).expect("missing navbar control");
		assert_eq!(attribute_value(control, "href"), Some("/log-me-in"));
	}

	let logged_in = render::logout_controls(&bump, "/log-me-out");
	let control = find_labelled(logged_in, "A", "Log Out").expect("missing logout control");
	assert_eq!(attribute_value(control, "href"), Some("/log-me-out"));
	assert!(find_labelled(logged_in, "A", "Sign Up").is_none());
}
