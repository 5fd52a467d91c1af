//! Typed wrappers over the forum server's HTTP surface.
//!
//! Every call is a plain JSON round trip; the server owns sessions,
//! persistence and mail. Non-2xx responses become errors carrying the call
//! name, URL and status. Nothing here retries.

use crate::model::{Answers, ForumPage, Majors, MentorEvidence, Notification, Question, Session, SubjectTag};
use anyhow::{anyhow, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::UnwrapThrowExt;

/// Page routes the controllers redirect to.
pub mod routes {
	pub const HOME: &str = "/index.html";
	pub const SIGNUP: &str = "/signup.html";
	pub const QUESTION: &str = "/question.html";
}

/// `id` value selecting every question on `/question` and `/fetch-questions`.
pub const FETCH_ALL_QUESTIONS: i64 = -1;

/// Direction of a follow toggle, as the `/follower-system` endpoint spells it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FollowAction {
	Follow,
	Unfollow,
}

impl FollowAction {
	/// The action that brings the server in line with a locally toggled record.
	#[must_use]
	pub fn for_state(now_following: bool) -> Self {
		if now_following {
			Self::Follow
		} else {
			Self::Unfollow
		}
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Follow => "follow",
			Self::Unfollow => "unfollow",
		}
	}
}

/// What a follower notification is about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationTopic {
	/// A question received a new answer.
	Question,
	/// An answer received a new comment.
	Answer,
}

impl NotificationTopic {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Question => "question",
			Self::Answer => "answer",
		}
	}
}

/// Client for the forum server's endpoints.
#[derive(Clone, Debug)]
pub struct Api {
	base: String,
	client: Client,
}

impl Api {
	#[must_use]
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			base: base.into(),
			client: Client::new(),
		}
	}

	/// Resolves the server origin from the current window.
	///
	/// The client is deployed same-origin with the server; tests can point
	/// [`Api::new`] at a stub instead.
	#[must_use]
	pub fn from_window() -> Self {
		let origin = web_sys::window()
			.expect_throw("mintern-client: No window to resolve the API origin from.")
			.location()
			.origin()
			.expect_throw("mintern-client: Could not read the window origin.");
		Self::new(origin)
	}

	fn get_request_builder(&self, path: &str) -> RequestBuilder {
		self.client.get(format!("{}{}", self.base, path))
	}

	fn post_request_builder(&self, path: &str) -> RequestBuilder {
		self.client.post(format!("{}{}", self.base, path))
	}

	fn check_response(name: &str, response: &Response) -> Result<()> {
		if !response.status().is_success() {
			return Err(anyhow!(
				"{} to {} failed with status code {}.",
				name,
				response.url().clone(),
				response.status()
			));
		}
		Ok(())
	}

	async fn get_json<T: DeserializeOwned>(&self, name: &str, request: RequestBuilder) -> Result<T> {
		let response = request.send().await?;
		Self::check_response(name, &response)?;
		Ok(response.json().await?)
	}

	/// `GET /authentication`
	pub async fn authentication(&self) -> Result<Session> {
		self.get_json("getAuthentication", self.get_request_builder("/authentication")).await
	}

	/// `GET /fetch-questions` — `id` of [`FETCH_ALL_QUESTIONS`] selects all.
	pub async fn questions(&self, id: i64) -> Result<Vec<Question>> {
		let request = self
			.get_request_builder("/fetch-questions")
			.query(&[("id", id.to_string())]);
		self.get_json("getQuestions", request).await
	}

	/// `GET /question` with `id=-1` — one page of the unfiltered listing.
	pub async fn forum_page(&self, page: u32) -> Result<ForumPage> {
		let request = self.get_request_builder("/question").query(&[
			("id", FETCH_ALL_QUESTIONS.to_string()),
			("page", page.to_string()),
		]);
		self.get_json("getForumPage", request).await
	}

	/// `GET /question` with a concrete `id` — a single-element array.
	pub async fn question(&self, id: i64) -> Result<Vec<Question>> {
		let request = self
			.get_request_builder("/question")
			.query(&[("id", id.to_string())]);
		self.get_json("getQuestion", request).await
	}

	/// `GET /search-question` — one page of the listing filtered by `input`.
	pub async fn search_questions(&self, input: &str, page: u32) -> Result<ForumPage> {
		let page = page.to_string();
		let request = self
			.get_request_builder("/search-question")
			.query(&[("inputString", input), ("page", page.as_str())]);
		self.get_json("getSearchQuestions", request).await
	}

	/// `GET /fetch-answers` — the answers below one question, keyed by id.
	pub async fn answers(&self, question_id: i64) -> Result<Answers> {
		let request = self
			.get_request_builder("/fetch-answers")
			.query(&[("id", question_id.to_string())]);
		self.get_json("getAnswers", request).await
	}

	/// `GET /notification` — pending notifications for the current session.
	pub async fn notifications(&self) -> Result<Vec<Notification>> {
		self.get_json("getNotifications", self.get_request_builder("/notification")).await
	}

	/// `GET /signup` — majors for the signup forms.
	pub async fn majors(&self) -> Result<Majors> {
		self.get_json("getMajors", self.get_request_builder("/signup")).await
	}

	/// `GET /signup-mentor` — experience tags for the mentor signup form.
	pub async fn subject_tags(&self) -> Result<Vec<SubjectTag>> {
		self.get_json("getSubjectTags", self.get_request_builder("/signup-mentor")).await
	}

	/// `GET /mentor-approval` — the approval record for `mentor_id`.
	pub async fn mentor_approval(&self, mentor_id: i64) -> Result<MentorEvidence> {
		let request = self
			.get_request_builder("/mentor-approval")
			.query(&[("id", mentor_id.to_string())]);
		self.get_json("getMentorApproval", request).await
	}

	/// `POST /mentor-approval` — submit the viewer's review decision.
	pub async fn post_approval(&self, mentor_id: i64, is_approved: bool) -> Result<()> {
		let response = self
			.post_request_builder("/mentor-approval")
			.query(&[("id", mentor_id.to_string()), ("isApproved", is_approved.to_string())])
			.send()
			.await?;
		Self::check_response("postApproval", &response)
	}

	/// `POST /follower-system` — follow or unfollow a question.
	pub async fn set_following(&self, action: FollowAction, question_id: i64) -> Result<()> {
		let question_id = question_id.to_string();
		let response = self
			.post_request_builder("/follower-system")
			.query(&[("type", action.as_str()), ("question-id", question_id.as_str())])
			.send()
			.await?;
		Self::check_response("postFollower", &response)
	}

	/// `POST /notification` — notify followers of a modified question/answer.
	pub async fn post_notification(&self, topic: NotificationTopic, modified_element_id: i64) -> Result<()> {
		let modified_element_id = modified_element_id.to_string();
		let response = self
			.post_request_builder("/notification")
			.query(&[
				("type", topic.as_str()),
				("modifiedElementId", modified_element_id.as_str()),
			])
			.send()
			.await?;
		Self::check_response("postNotification", &response)
	}
}
