//! Wire model for the forum server's JSON payloads, plus the pure decision
//! logic that hangs directly off those records.
//!
//! Member names follow the server's Gson output (camelCase). Nullable columns
//! surface as [`Option`]s rather than sentinel values.

use hashbrown::HashMap;
use serde::Deserialize;

/// A forum question, as reported by `/question` and `/fetch-questions`.
///
/// `number_of_followers` and `user_follows_question` are viewer-relative and
/// may be mutated locally by the follow toggle; a page reload re-syncs them.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
	pub id: i64,
	pub title: String,
	#[serde(default)]
	pub body: Option<String>,
	#[serde(default)]
	pub asker_name: String,
	#[serde(default)]
	pub asker_id: i64,
	/// Server-formatted timestamp, displayed verbatim.
	#[serde(default)]
	pub date_time: String,
	#[serde(default)]
	pub number_of_followers: u32,
	#[serde(default)]
	pub number_of_answers: u32,
	#[serde(default)]
	pub user_follows_question: bool,
}

impl Question {
	/// Applies the viewer's follow toggle to the local record and reports the
	/// state the server should now be told about (`true` = follow).
	///
	/// The mutation is optimistic: it happens before (and regardless of) the
	/// matching network call.
	pub fn toggle_followed(&mut self) -> bool {
		if self.user_follows_question {
			self.user_follows_question = false;
			self.number_of_followers = self.number_of_followers.saturating_sub(1);
		} else {
			self.user_follows_question = true;
			self.number_of_followers += 1;
		}
		self.user_follows_question
	}
}

/// An answer below a question, with its comments inline.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
	pub id: i64,
	#[serde(default)]
	pub body: String,
	#[serde(default)]
	pub author_name: String,
	#[serde(default)]
	pub date_time: String,
	#[serde(default)]
	pub is_verified_mentor: bool,
	#[serde(default)]
	pub comment_list: Vec<Option<Comment>>,
}

impl Answer {
	/// Comments that actually exist.
	///
	/// The server's LEFT JOIN produces `null` entries and comment objects with
	/// all-null members for answers without comments; both shapes are skipped.
	pub fn present_comments(&self) -> impl Iterator<Item = &Comment> {
		self.comment_list
			.iter()
			.flatten()
			.filter(|comment| comment.body.is_some())
	}
}

/// A comment below an answer. All members are nullable on the wire.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	#[serde(default)]
	pub body: Option<String>,
	#[serde(default)]
	pub author_name: Option<String>,
	#[serde(default)]
	pub date_time: Option<String>,
	#[serde(default)]
	pub is_verified_mentor: bool,
}

/// One pending notification for the current session.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub timestamp: String,
	#[serde(default)]
	pub url: String,
}

/// The `/authentication` payload driving the navbar and gated-page redirects.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	#[serde(default)]
	pub is_user_logged_in: bool,
	#[serde(default)]
	pub is_user_registered: bool,
	/// Login URL when logged out, logout URL when logged in.
	#[serde(default)]
	pub authentication_url: String,
	#[serde(default)]
	pub email: String,
}

/// One page of the (possibly filtered) forum listing.
///
/// `previous_page`/`next_page` carry the actual target page numbers; `None`
/// means the respective control has nowhere to go and renders disabled.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPage {
	#[serde(default)]
	pub page_questions: Vec<Question>,
	#[serde(default)]
	pub previous_page: Option<u32>,
	#[serde(default)]
	pub next_page: Option<u32>,
	#[serde(default)]
	pub number_of_pages: u32,
}

impl ForumPage {
	#[must_use]
	pub fn has_previous(&self) -> bool {
		self.previous_page.is_some()
	}

	#[must_use]
	pub fn has_next(&self) -> bool {
		self.next_page.is_some()
	}
}

/// The `/mentor-approval` record shown on the approval page.
///
/// `user_id` is the *viewer's* id. The mentor under review is identified by
/// the page's `id` query parameter, so "the viewer is the mentor" means
/// `user_id` equals that parameter.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorEvidence {
	#[serde(default)]
	pub user_id: i64,
	#[serde(default)]
	pub mentor_username: String,
	#[serde(default)]
	pub paragraph: String,
	#[serde(default)]
	pub is_approver: bool,
	#[serde(default)]
	pub is_approved: bool,
	#[serde(default)]
	pub is_rejected: bool,
	#[serde(default)]
	pub has_reviewed: bool,
}

/// Which of the seven approval-page notices applies to the viewer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApprovalNotice {
	/// The viewer is the mentor and was approved.
	SelfApproved,
	/// The viewer is the mentor and was rejected.
	SelfRejected,
	/// The viewer is the mentor and no decision has been made yet.
	SelfPending,
	/// The viewer is an assigned approver; the mentor has since been approved.
	MentorApproved,
	/// The viewer is an assigned approver; the mentor has since been rejected.
	MentorRejected,
	/// The viewer is an assigned approver and already submitted their review.
	AlreadyReviewed,
	/// The viewer is an assigned approver with a review still to submit.
	PendingReview,
}

impl MentorEvidence {
	/// Selects the approval-page notice for a viewer looking at `mentor_id`'s
	/// application, or [`None`] if no role matches (which callers treat as an
	/// unauthorized view and redirect).
	///
	/// Exactly one branch fires for any input. `is_approved` is checked ahead
	/// of `is_rejected`, so an inconsistent record that claims both still
	/// resolves deterministically.
	#[must_use]
	pub fn notice(&self, mentor_id: i64) -> Option<ApprovalNotice> {
		if self.user_id == mentor_id {
			Some(if self.is_approved {
				ApprovalNotice::SelfApproved
			} else if self.is_rejected {
				ApprovalNotice::SelfRejected
			} else {
				ApprovalNotice::SelfPending
			})
		} else if self.is_approver {
			Some(if self.is_approved {
				ApprovalNotice::MentorApproved
			} else if self.is_rejected {
				ApprovalNotice::MentorRejected
			} else if self.has_reviewed {
				ApprovalNotice::AlreadyReviewed
			} else {
				ApprovalNotice::PendingReview
			})
		} else {
			None
		}
	}
}

/// One selectable mentor experience tag from `/signup-mentor`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTag {
	pub id: u32,
	#[serde(default)]
	pub subject: String,
	#[serde(default)]
	pub category: String,
}

/// Majors offered on the signup forms, keyed by id.
pub type Majors = HashMap<u32, String>;

/// Answers to one question, keyed by answer id.
///
/// JSON object member order is not contractual, so callers sort by id before
/// rendering.
pub type Answers = HashMap<i64, Answer>;
