use super::*;
use crate::api::{HistoryEntry, QueryReply, NO_RESPONSE_TEXT};
use crate::core::dispatcher::{QueryService, REQUEST_FAILED_TEXT};
use crate::core::message::{Sender, Source, LOADING_TEXT};
use crate::utils::test_utils::{create_test_app, create_test_app_with_base_url};
use serde_json::json;
use tui_textarea::{Input, Key};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn texts(app: &App) -> Vec<(Sender, String, bool)> {
    app.conversation
        .messages()
        .iter()
        .map(|m| (m.sender, m.text.clone(), m.is_loading))
        .collect()
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        apply_action(
            app,
            AppAction::Textarea(Input {
                key: Key::Char(ch),
                ..Input::default()
            }),
        );
    }
}

#[test]
fn submit_appends_user_message_and_loading_placeholder() {
    let mut app = create_test_app();
    let params = app.submit_query("What is Rust?").expect("accepted");

    assert_eq!(
        texts(&app),
        [
            (Sender::User, "What is Rust?".to_string(), false),
            (Sender::Bot, LOADING_TEXT.to_string(), true),
        ]
    );
    assert!(app.is_pending());
    assert_eq!(params.request.query, "What is Rust?");
    assert!(params.request.conversation_history.is_empty());
}

#[test]
fn blank_submissions_are_ignored() {
    let mut app = create_test_app();
    assert!(app.submit_query("").is_none());
    assert!(app.submit_query("   \n\t ").is_none());
    assert!(app.conversation.is_empty());
    assert!(!app.is_pending());
}

#[test]
fn submissions_while_pending_are_ignored() {
    let mut app = create_test_app();
    app.submit_query("first").expect("accepted");
    let before = texts(&app);

    assert!(app.submit_query("second").is_none());
    assert_eq!(texts(&app), before);
    assert!(app.is_pending());
}

#[test]
fn completion_replaces_placeholder_and_clears_pending() {
    let mut app = create_test_app();
    let params = app.submit_query("hi").expect("accepted");

    let reply = QueryReply {
        text: "Hello".into(),
        sources: vec![Source(json!({"title": "x"}))],
    };
    assert!(app.complete_query(QueryOutcome::Answered(reply), params.request_id));

    assert_eq!(app.conversation.len(), 2);
    let last = app.conversation.messages().last().expect("bot reply");
    assert_eq!(last.text, "Hello");
    assert_eq!(last.sources, vec![Source(json!({"title": "x"}))]);
    assert!(!last.is_loading);
    assert!(!app.is_pending());
}

#[test]
fn failure_shows_the_fixed_error_text() {
    let mut app = create_test_app();
    let params = app.submit_query("hi").expect("accepted");
    app.complete_query(QueryOutcome::Failed, params.request_id);

    let last = app.conversation.messages().last().expect("bot reply");
    assert_eq!(last.text, REQUEST_FAILED_TEXT);
    assert!(last.is_error);
    assert!(last.sources.is_empty());
    assert!(!app.is_pending());
    assert!(!app.conversation.messages().iter().any(|m| m.is_loading));
}

#[test]
fn history_excludes_the_new_message_and_placeholder() {
    let mut app = create_test_app();
    let first = app.submit_query("one").expect("accepted");
    app.complete_query(
        QueryOutcome::Answered(QueryReply {
            text: "uno".into(),
            sources: Vec::new(),
        }),
        first.request_id,
    );

    let second = app.submit_query("two").expect("accepted");
    assert_eq!(
        second.request.conversation_history,
        vec![
            HistoryEntry {
                text: "one".into(),
                sender: Sender::User
            },
            HistoryEntry {
                text: "uno".into(),
                sender: Sender::Bot
            },
        ]
    );
}

#[test]
fn new_conversation_resets_everything_even_while_pending() {
    let mut app = create_test_app();
    app.submit_query("hi").expect("accepted");
    app.ui.set_input_text("draft".to_string());

    apply_action(&mut app, AppAction::NewConversation);

    assert!(app.conversation.is_empty());
    assert!(!app.is_pending());
    assert_eq!(app.ui.get_input_text(), "");
}

#[test]
fn stale_outcomes_after_new_conversation_are_dropped() {
    let mut app = create_test_app();
    let old = app.submit_query("old question").expect("accepted");
    app.new_conversation();
    let fresh = app.submit_query("new question").expect("accepted");

    assert!(!app.complete_query(QueryOutcome::Failed, old.request_id));
    assert_eq!(app.conversation.len(), 2);
    assert!(app.conversation.messages().iter().any(|m| m.is_loading));
    assert!(app.is_pending());

    assert!(app.complete_query(QueryOutcome::Failed, fresh.request_id));
    assert!(!app.is_pending());
}

#[test]
fn submit_action_takes_the_input_box_text() {
    let mut app = create_test_app();
    type_text(&mut app, "hey");
    apply_action(&mut app, AppAction::InsertNewline);
    type_text(&mut app, "there");

    let command = apply_action(&mut app, AppAction::SubmitInput);
    match command {
        Some(AppCommand::SpawnQuery(params)) => assert_eq!(params.request.query, "hey\nthere"),
        _ => panic!("expected a query to be spawned"),
    }
    assert_eq!(app.ui.get_input_text(), "");
}

#[test]
fn rejected_submit_keeps_the_input() {
    let mut app = create_test_app();
    app.submit_query("first").expect("accepted");
    app.ui.set_input_text("queued?".to_string());

    assert!(apply_action(&mut app, AppAction::SubmitInput).is_none());
    assert_eq!(app.ui.get_input_text(), "queued?");
}

#[test]
fn suggestions_fill_the_input_without_submitting() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::ApplySuggestion { index: 2 });
    assert_eq!(app.ui.get_input_text(), SUGGESTIONS[2]);
    assert!(app.conversation.is_empty());

    apply_action(&mut app, AppAction::ApplySuggestion { index: 9 });
    assert_eq!(app.ui.get_input_text(), SUGGESTIONS[2]);
}

#[test]
fn copy_actions_resolve_code_blocks() {
    let mut app = create_test_app();
    let params = app.submit_query("show me").expect("accepted");
    app.complete_query(
        QueryOutcome::Answered(QueryReply {
            text: "```rust\nfn a() {}\n```\n\n```\nsecond\n```\n".into(),
            sources: Vec::new(),
        }),
        params.request_id,
    );

    match apply_action(&mut app, AppAction::CopyCodeBlock { number: 1 }) {
        Some(AppCommand::CopyToClipboard { text, .. }) => assert_eq!(text, "fn a() {}"),
        _ => panic!("expected a copy command"),
    }
    match apply_action(&mut app, AppAction::CopyLastCodeBlock) {
        Some(AppCommand::CopyToClipboard { text, label }) => {
            assert_eq!(text, "second");
            assert_eq!(label, "code block 2");
        }
        _ => panic!("expected a copy command"),
    }
    assert!(apply_action(&mut app, AppAction::CopyCodeBlock { number: 7 }).is_none());
    assert_eq!(app.ui.status.as_deref(), Some("No code block 7"));
}

#[test]
fn copying_scrolls_an_off_screen_block_into_view() {
    let mut app = create_test_app();
    app.ui.transcript_size = (80, 5);
    let params = app.submit_query("long answer").expect("accepted");
    let filler: Vec<String> = (1..=20).map(|i| format!("paragraph {i}")).collect();
    app.complete_query(
        QueryOutcome::Answered(QueryReply {
            text: format!("```\nfirst\n```\n\n{}", filler.join("\n\n")),
            sources: Vec::new(),
        }),
        params.request_id,
    );
    assert!(app.ui.auto_scroll);

    let header = app.code_block(1).expect("block").header_line as u16;
    assert!(apply_action(&mut app, AppAction::CopyCodeBlock { number: 1 }).is_some());
    assert_eq!(app.ui.scroll_offset, header);
    assert!(!app.ui.auto_scroll);

    // Already visible: the view stays put.
    app.ui.scroll_offset = header.saturating_sub(2);
    assert!(apply_action(&mut app, AppAction::CopyLastCodeBlock).is_some());
    assert_eq!(app.ui.scroll_offset, header.saturating_sub(2));
}

#[test]
fn quit_sets_the_exit_flag() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::Quit);
    assert!(app.ui.exit_requested);
}

#[tokio::test]
async fn query_service_round_trip_through_the_app() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_json(json!({
            "query": "ping",
            "conversation_history": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = create_test_app_with_base_url(&server.uri());
    let (service, mut rx) = QueryService::new();
    let params = app.submit_query("ping").expect("accepted");
    service.spawn_query(params);

    let (outcome, request_id) = rx.recv().await.expect("outcome");
    app.complete_query(outcome, request_id);

    let last = app.conversation.messages().last().expect("bot reply");
    assert_eq!(last.text, "{}");
    assert!(!app.is_pending());
}

#[tokio::test]
async fn empty_body_yields_no_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut app = create_test_app_with_base_url(&server.uri());
    let (service, mut rx) = QueryService::new();
    service.spawn_query(app.submit_query("ping").expect("accepted"));

    let (outcome, request_id) = rx.recv().await.expect("outcome");
    app.complete_query(outcome, request_id);
    assert_eq!(
        app.conversation.messages().last().map(|m| m.text.as_str()),
        Some(NO_RESPONSE_TEXT)
    );
}
