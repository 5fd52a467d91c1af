//! Decoding fixtures shaped like the server's actual Gson output.

use mintern_client::model::{Answers, ForumPage, Majors, MentorEvidence, Notification, Question, Session, SubjectTag};

#[test]
fn question_decodes_the_server_members() {
	let question: Question = serde_json::from_str(
		r#"{
			"id": 12,
			"title": "Is a return offer negotiable?",
			"body": "Asking for a friend.\nSeriously.",
			"askerName": "noor",
			"askerId": 4,
			"dateTime": "Aug 3, 2026 6:12:41 PM",
			"numberOfFollowers": 3,
			"numberOfAnswers": 1,
			"userFollowsQuestion": true
		}"#,
	)
	.unwrap();

	assert_eq!(question.id, 12);
	assert_eq!(question.asker_name, "noor");
	assert_eq!(question.number_of_followers, 3);
	assert!(question.user_follows_question);
	assert_eq!(question.body.as_deref(), Some("Asking for a friend.\nSeriously."));
}

#[test]
fn question_tolerates_absent_viewer_members() {
	let question: Question = serde_json::from_str(r#"{"id": 1, "title": "t"}"#).unwrap();
	assert_eq!(question.body, None);
	assert_eq!(question.number_of_followers, 0);
	assert!(!question.user_follows_question);
}

#[test]
fn forum_page_carries_nullable_page_numbers() {
	let page: ForumPage = serde_json::from_str(
		r#"{
			"nextPage": 2,
			"previousPage": null,
			"numberOfPages": 3,
			"pageQuestions": [{"id": 1, "title": "t"}]
		}"#,
	)
	.unwrap();

	assert!(!page.has_previous());
	assert!(page.has_next());
	assert_eq!(page.next_page, Some(2));
	assert_eq!(page.number_of_pages, 3);
	assert_eq!(page.page_questions.len(), 1);
}

#[test]
fn answers_decode_as_a_map_and_filter_join_artifacts() {
	let answers: Answers = serde_json::from_str(
		r#"{
			"4": {
				"id": 4,
				"body": "Usually, yes.",
				"authorName": "sam",
				"dateTime": "Aug 4, 2026 9:00:00 AM",
				"isVerifiedMentor": true,
				"commentList": [
					null,
					{"body": null, "authorName": null, "dateTime": null},
					{"body": "It worked for me.", "authorName": "casey", "dateTime": "Aug 4, 2026 10:00:00 AM"}
				]
			},
			"9": {
				"id": 9,
				"body": "Depends on the company.",
				"authorName": "ren",
				"dateTime": "Aug 4, 2026 11:00:00 AM",
				"commentList": []
			}
		}"#,
	)
	.unwrap();

	assert_eq!(answers.len(), 2);
	let answer = &answers[&4];
	assert!(answer.is_verified_mentor);
	assert_eq!(answer.comment_list.len(), 3);
	let present: Vec<_> = answer.present_comments().collect();
	assert_eq!(present.len(), 1);
	assert_eq!(present[0].author_name.as_deref(), Some("casey"));
	assert!(!answers[&9].is_verified_mentor);
}

#[test]
fn session_decodes_the_authentication_payload() {
	let session: Session = serde_json::from_str(
		r#"{
			"email": "visitor@example.com",
			"isUserLoggedIn": true,
			"isUserRegistered": false,
			"authenticationUrl": "/signup.html"
		}"#,
	)
	.unwrap();

	assert!(session.is_user_logged_in);
	assert!(!session.is_user_registered);
	assert_eq!(session.authentication_url, "/signup.html");
}

#[test]
fn notifications_decode_in_order() {
	let notifications: Vec<Notification> = serde_json::from_str(
		r#"[
			{"message": "You got an answer", "timestamp": "Aug 4, 2026 8:00:00 PM", "url": "/question.html?id=12"},
			{"message": "Somebody commented your answer", "timestamp": "Aug 3, 2026 7:00:00 PM", "url": "/question.html?id=9"}
		]"#,
	)
	.unwrap();

	assert_eq!(notifications.len(), 2);
	assert_eq!(notifications[0].message, "You got an answer");
	assert_eq!(notifications[1].url, "/question.html?id=9");
}

#[test]
fn mentor_evidence_decodes_the_review_flags() {
	let evidence: MentorEvidence = serde_json::from_str(
		r#"{
			"userId": 21,
			"mentorUsername": "jordan",
			"paragraph": "Two summers at a robotics startup.",
			"isApprover": true,
			"isApproved": false,
			"isRejected": false,
			"hasReviewed": true
		}"#,
	)
	.unwrap();

	assert_eq!(evidence.user_id, 21);
	assert!(evidence.is_approver);
	assert!(evidence.has_reviewed);
	assert_eq!(evidence.mentor_username, "jordan");
}

#[test]
fn signup_option_lists_decode() {
	let majors: Majors = serde_json::from_str(r#"{"1": "Computer Science", "2": "Mechatronics"}"#).unwrap();
	assert_eq!(majors.len(), 2);
	assert_eq!(majors[&1], "Computer Science");

	let tags: Vec<SubjectTag> = serde_json::from_str(
		r#"[{"id": 1, "subject": "Interview prep", "category": "career"}]"#,
	)
	.unwrap();
	assert_eq!(tags[0].id, 1);
	assert_eq!(tags[0].subject, "Interview prep");
}
