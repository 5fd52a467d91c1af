//! Fragment builders for the forum's domain records.
//!
//! Every function here is pure: it maps a record (and, where interaction is
//! possible, a pre-registered callback) to a [`Node`] tree allocated in the
//! caller's [`Bump`]. No function touches the document, issues a fetch or
//! reads globals, so the same input always produces the same fragment.

use crate::{
	api::routes,
	model::{Answer, ApprovalNotice, Comment, MentorEvidence, Notification, Question, SubjectTag},
};
use bumpalo::Bump;
use lignin::{
	web::Event,
	Attribute, CallbackRef, Element, ElementCreationOptions, EventBinding, EventBindingOptions, Node, ThreadBound,
};

/// Event callback as the controllers hand it to renderers.
pub type Callback = CallbackRef<ThreadBound, fn(Event)>;

/// Canonical body-preview threshold for listing contexts, in characters.
pub const BODY_PREVIEW_LIMIT: usize = 80;

/// Where a question body is being shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BodyContext {
	/// Forum listing: line breaks flattened, preview cut to
	/// [`BODY_PREVIEW_LIMIT`] characters plus an ellipsis.
	Listing,
	/// Single-question page: line breaks flattened, nothing truncated.
	Detail,
}

fn element<'a>(
	bump: &'a Bump,
	name: &'a str,
	attributes: &'a [Attribute<'a>],
	content: &'a [Node<'a, ThreadBound>],
	event_bindings: &'a [EventBinding<'a, ThreadBound>],
) -> Node<'a, ThreadBound> {
	Node::HtmlElement {
		element: bump.alloc_with(|| Element {
			name,
			creation_options: ElementCreationOptions::new(),
			attributes,
			content: Node::Multi(content),
			event_bindings,
		}),
		dom_binding: None,
	}
}

fn text<'a>(bump: &'a Bump, text: &str) -> Node<'a, ThreadBound> {
	Node::Text {
		text: bump.alloc_str(text),
		dom_binding: None,
	}
}

fn attribute<'a>(name: &'a str, value: &'a str) -> Attribute<'a> {
	Attribute { name, value }
}

fn click<'a>(callback: Callback) -> EventBinding<'a, ThreadBound> {
	EventBinding {
		name: "click",
		callback,
		options: EventBindingOptions::new(),
	}
}

/// `"1 follower"`, `"3 followers"` — singular exactly at a count of one.
#[must_use]
pub fn count_label(count: u32, noun: &str) -> String {
	if count == 1 {
		format!("1 {}", noun)
	} else {
		format!("{} {}s", count, noun)
	}
}

/// Flattens line breaks to spaces and, in [`BodyContext::Listing`], cuts the
/// result to [`BODY_PREVIEW_LIMIT`] characters with a trailing `…`.
#[must_use]
pub fn body_preview(body: &str, context: BodyContext) -> String {
	let flat = body.replace("\r\n", " ").replace(['\r', '\n'], " ");
	match context {
		BodyContext::Detail => flat,
		BodyContext::Listing => {
			if flat.chars().count() > BODY_PREVIEW_LIMIT {
				let mut preview: String = flat.chars().take(BODY_PREVIEW_LIMIT).collect();
				preview.push('…');
				preview
			} else {
				flat
			}
		}
	}
}

/// Author display name, with the verified-mentor marker appended.
fn author_label(name: &str, is_verified_mentor: bool) -> String {
	if is_verified_mentor {
		format!("{} ✔", name)
	} else {
		name.to_string()
	}
}

/// One question, as a card for the forum listing or the single-question page.
///
/// When `follow` is given, the card carries a follow toggle that reports the
/// clicked question through a `data-question-id` attribute on the control.
#[must_use]
pub fn question_card<'a>(
	bump: &'a Bump,
	question: &Question,
	context: BodyContext,
	follow: Option<Callback>,
) -> Node<'a, ThreadBound> {
	let title = element(
		bump,
		"A",
		bump.alloc([
			attribute("class", "question-title"),
			attribute("href", bump.alloc_str(&format!("{}?id={}", routes::QUESTION, question.id))),
		]),
		bump.alloc([text(bump, &question.title)]),
		&[],
	);

	let follow_control = match follow {
		Some(callback) => element(
			bump,
			"BUTTON",
			bump.alloc([
				attribute("type", "button"),
				attribute(
					"class",
					if question.user_follows_question {
						"follow-toggle following"
					} else {
						"follow-toggle"
					},
				),
				attribute("data-question-id", bump.alloc_str(&question.id.to_string())),
			]),
			bump.alloc([text(bump, if question.user_follows_question { "★" } else { "☆" })]),
			bump.alloc([click(callback)]),
		),
		None => Node::Multi(&[]),
	};

	let meta = element(
		bump,
		"SMALL",
		bump.alloc([attribute("class", "question-meta")]),
		bump.alloc([text(
			bump,
			&format!("asked by {} · {}", question.asker_name, question.date_time),
		)]),
		&[],
	);

	let body = match &question.body {
		Some(body) if !body.is_empty() => element(
			bump,
			"P",
			bump.alloc([attribute("class", "question-body")]),
			bump.alloc([text(bump, &body_preview(body, context))]),
			&[],
		),
		_ => Node::Multi(&[]),
	};

	let counts = element(
		bump,
		"SMALL",
		bump.alloc([attribute("class", "question-counts")]),
		bump.alloc([text(
			bump,
			&format!(
				"{} · {}",
				count_label(question.number_of_followers, "follower"),
				count_label(question.number_of_answers, "answer"),
			),
		)]),
		&[],
	);

	element(
		bump,
		"DIV",
		bump.alloc([attribute("class", "question-card")]),
		bump.alloc([
			element(
				bump,
				"DIV",
				bump.alloc([attribute("class", "question-header")]),
				bump.alloc([title, follow_control]),
				&[],
			),
			meta,
			body,
			counts,
		]),
		&[],
	)
}

/// One answer with its present comments, in server order.
#[must_use]
pub fn answer_entry<'a>(bump: &'a Bump, answer: &Answer) -> Node<'a, ThreadBound> {
	let comments: Vec<&Comment> = answer.present_comments().collect();
	let comments = bump.alloc_slice_fill_with(comments.len(), |i| comment_entry(bump, comments[i]));

	element(
		bump,
		"DIV",
		bump.alloc([attribute("class", "answer-entry")]),
		bump.alloc([
			element(
				bump,
				"P",
				bump.alloc([attribute("class", "answer-body")]),
				bump.alloc([text(bump, &answer.body)]),
				&[],
			),
			element(
				bump,
				"SMALL",
				bump.alloc([attribute("class", "answer-meta")]),
				bump.alloc([text(
					bump,
					&format!(
						"{} · {}",
						author_label(&answer.author_name, answer.is_verified_mentor),
						answer.date_time,
					),
				)]),
				&[],
			),
			element(
				bump,
				"DIV",
				bump.alloc([attribute("class", "comment-list")]),
				comments,
				&[],
			),
		]),
		&[],
	)
}

/// One comment. Callers are expected to have filtered absent comments via
/// [`Answer::present_comments`] already; missing members render empty here.
#[must_use]
pub fn comment_entry<'a>(bump: &'a Bump, comment: &Comment) -> Node<'a, ThreadBound> {
	let author = author_label(
		comment.author_name.as_deref().unwrap_or(""),
		comment.is_verified_mentor,
	);
	element(
		bump,
		"DIV",
		bump.alloc([attribute("class", "comment-entry")]),
		bump.alloc([
			element(
				bump,
				"SPAN",
				bump.alloc([attribute("class", "comment-body")]),
				bump.alloc([text(bump, comment.body.as_deref().unwrap_or(""))]),
				&[],
			),
			element(
				bump,
				"SMALL",
				bump.alloc([attribute("class", "comment-meta")]),
				bump.alloc([text(
					bump,
					&format!("{} · {}", author, comment.date_time.as_deref().unwrap_or("")),
				)]),
				&[],
			),
		]),
		&[],
	)
}

/// One notification dropdown entry, linking to the modified element.
#[must_use]
pub fn notification_entry<'a>(bump: &'a Bump, notification: &Notification) -> Node<'a, ThreadBound> {
	element(
		bump,
		"A",
		bump.alloc([
			attribute("class", "notification-entry"),
			attribute("href", bump.alloc_str(&notification.url)),
		]),
		bump.alloc([
			element(
				bump,
				"SPAN",
				bump.alloc([attribute("class", "notification-message")]),
				bump.alloc([text(bump, &notification.message)]),
				&[],
			),
			element(
				bump,
				"SMALL",
				bump.alloc([attribute("class", "notification-timestamp")]),
				bump.alloc([text(bump, &notification.timestamp)]),
				&[],
			),
		]),
		&[],
	)
}

/// Navbar content for a logged-in session: a logout control.
#[must_use]
pub fn logout_controls<'a>(bump: &'a Bump, authentication_url: &str) -> Node<'a, ThreadBound> {
	navbar_item(bump, "Log Out", "btn btn-outline-success", authentication_url)
}

/// Navbar content for a logged-out session: signup and login controls, both
/// bound to the same authentication URL.
#[must_use]
pub fn login_controls<'a>(bump: &'a Bump, authentication_url: &str) -> Node<'a, ThreadBound> {
	Node::Multi(bump.alloc([
		navbar_item(bump, "Sign Up", "btn btn-success", authentication_url),
		navbar_item(bump, "Log In", "btn btn-outline-success", authentication_url),
	]))
}

fn navbar_item<'a>(bump: &'a Bump, label: &'a str, class: &'a str, href: &str) -> Node<'a, ThreadBound> {
	element(
		bump,
		"LI",
		bump.alloc([attribute("class", "nav-item")]),
		bump.alloc([element(
			bump,
			"A",
			bump.alloc([attribute("class", class), attribute("href", bump.alloc_str(href))]),
			bump.alloc([text(bump, label)]),
			&[],
		)]),
		&[],
	)
}

/// `<option>` list for a major `<select>`, in the caller's (sorted) order.
#[must_use]
pub fn major_options<'a>(bump: &'a Bump, majors: &[(u32, String)]) -> Node<'a, ThreadBound> {
	Node::Multi(bump.alloc_slice_fill_with(majors.len(), |i| {
		let (id, name) = &majors[i];
		element(
			bump,
			"OPTION",
			bump.alloc([attribute("value", bump.alloc_str(&id.to_string()))]),
			bump.alloc([text(bump, name)]),
			&[],
		)
	}))
}

/// Checkbox list for the mentor signup form's experience tags.
#[must_use]
pub fn tag_checkboxes<'a>(bump: &'a Bump, tags: &[SubjectTag]) -> Node<'a, ThreadBound> {
	Node::Multi(bump.alloc_slice_fill_with(tags.len(), |i| {
		let tag = &tags[i];
		element(
			bump,
			"LABEL",
			bump.alloc([attribute("class", "experience-tag")]),
			bump.alloc([
				element(
					bump,
					"INPUT",
					bump.alloc([
						attribute("type", "checkbox"),
						attribute("name", "experience"),
						attribute("value", bump.alloc_str(&tag.id.to_string())),
					]),
					&[],
					&[],
				),
				text(bump, &format!("{} ({})", tag.subject, tag.category)),
			]),
			&[],
		)
	}))
}

/// The approval-page notice, one of the seven variants of
/// [`MentorEvidence::notice`]. The pending-review variant renders the
/// evidence paragraph and the decision buttons; every other variant is a
/// plain message.
#[must_use]
pub fn approval_notice<'a>(
	bump: &'a Bump,
	evidence: &MentorEvidence,
	notice: ApprovalNotice,
	approve: Option<Callback>,
	reject: Option<Callback>,
) -> Node<'a, ThreadBound> {
	let message = |bump: &'a Bump, message: &str| {
		element(
			bump,
			"P",
			bump.alloc([attribute("class", "approval-message")]),
			bump.alloc([text(bump, message)]),
			&[],
		)
	};

	match notice {
		ApprovalNotice::SelfApproved => message(bump, "Congratulations! Your mentor application was approved."),
		ApprovalNotice::SelfRejected => message(bump, "Your mentor application was rejected."),
		ApprovalNotice::SelfPending => message(bump, "Your mentor application is still under review."),
		ApprovalNotice::MentorApproved => message(
			bump,
			&format!("{} was approved as a mentor.", evidence.mentor_username),
		),
		ApprovalNotice::MentorRejected => message(
			bump,
			&format!("{} was not approved as a mentor.", evidence.mentor_username),
		),
		ApprovalNotice::AlreadyReviewed => message(
			bump,
			&format!(
				"You already reviewed {}. The application is waiting on the remaining approvers.",
				evidence.mentor_username,
			),
		),
		ApprovalNotice::PendingReview => {
			let decision_button = |label: &'a str, class: &'a str, callback: Option<Callback>| {
				element(
					bump,
					"BUTTON",
					bump.alloc([attribute("type", "button"), attribute("class", class)]),
					bump.alloc([text(bump, label)]),
					match callback {
						Some(callback) => &*bump.alloc([click(callback)]),
						None => &[],
					},
				)
			};

			element(
				bump,
				"DIV",
				bump.alloc([attribute("class", "approval-review")]),
				bump.alloc([
					element(
						bump,
						"H3",
						&[],
						bump.alloc([text(
							bump,
							&format!("Review {}'s mentor application", evidence.mentor_username),
						)]),
						&[],
					),
					element(
						bump,
						"P",
						bump.alloc([attribute("class", "approval-evidence")]),
						bump.alloc([text(bump, &evidence.paragraph)]),
						&[],
					),
					element(
						bump,
						"DIV",
						bump.alloc([attribute("class", "approval-decision")]),
						bump.alloc([
							decision_button("Approve", "btn btn-success", approve),
							decision_button("Reject", "btn btn-outline-danger", reject),
						]),
						&[],
					),
				]),
				&[],
			)
		}
	}
}
