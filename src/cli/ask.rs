//! One-shot query without the full-screen interface.

use ratatui::crossterm::terminal;
use tracing::warn;

use crate::api::QueryRequest;
use crate::core::config::Config;
use crate::core::dispatcher::{send_query, QueryError, REQUEST_FAILED_TEXT};
use crate::core::message::Message;
use crate::ui::markdown::{render_message_with_config, MessageRenderConfig};
use crate::ui::theme::Theme;

/// Send `query` with an empty history and render the answer, sources
/// included, as plain text lines.
pub async fn ask_lines(
    client: &reqwest::Client,
    config: &Config,
    query: String,
    width: Option<usize>,
) -> Result<Vec<String>, QueryError> {
    let request = QueryRequest {
        query,
        conversation_history: Vec::new(),
    };
    let reply = send_query(client, &config.base_url(), &request).await?;
    let message = Message::bot_with_sources(reply.text, reply.sources);

    // Output is plain text, so highlighting would be discarded anyway.
    let rendered = render_message_with_config(
        &message,
        &Theme::from_name(config.theme_name()),
        MessageRenderConfig::markdown(config.markdown_enabled(), false).with_terminal_width(width),
    );
    Ok(rendered.lines.iter().map(|line| line.to_string()).collect())
}

/// Returns the process exit code.
pub async fn run_ask(query: Vec<String>, config: &Config) -> i32 {
    let query = query.join(" ");
    if query.trim().is_empty() {
        eprintln!("Usage: copilot-chat ask <QUERY>...");
        return 1;
    }

    let width = terminal::size().ok().map(|(w, _)| w as usize);
    match ask_lines(&reqwest::Client::new(), config, query, width).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Err(err) => {
            warn!(%err, "query failed");
            eprintln!("{REQUEST_FAILED_TEXT}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        Config {
            base_url: Some(server.uri()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn answers_are_rendered_with_their_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .and(body_json(json!({
                "query": "what is tokio?",
                "conversation_history": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "An **async** runtime.",
                "sources": [{"title": "tokio.rs", "url": "https://tokio.rs"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lines = ask_lines(
            &reqwest::Client::new(),
            &config_for(&server),
            "what is tokio?".into(),
            Some(80),
        )
        .await
        .expect("answer");

        assert!(lines.iter().any(|l| l == "An async runtime."));
        assert!(lines.iter().any(|l| l.contains("Sources")));
        assert!(lines.iter().any(|l| l.contains("tokio.rs")));
    }

    #[tokio::test]
    async fn server_errors_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = ask_lines(&reqwest::Client::new(), &config_for(&server), "x".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Status { .. }));
    }

    #[tokio::test]
    async fn blank_queries_exit_with_usage() {
        assert_eq!(run_ask(vec!["  ".into()], &Config::default()).await, 1);
        assert_eq!(run_ask(Vec::new(), &Config::default()).await, 1);
    }
}
