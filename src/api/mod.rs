//! Wire types for the copilot backend's query endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::message::{Message, Sender, Source};

/// Path of the query endpoint, relative to the configured base URL.
pub const QUERY_ENDPOINT: &str = "api/query";

/// Shown when a successful response carries no usable text at all.
pub const NO_RESPONSE_TEXT: &str = "No response received";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sender: Sender,
}

impl From<&Message> for HistoryEntry {
    fn from(msg: &Message) -> Self {
        Self {
            text: msg.text.clone(),
            sender: msg.sender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub conversation_history: Vec<HistoryEntry>,
}

/// The parts of a successful response the client displays.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReply {
    pub text: String,
    pub sources: Vec<Source>,
}

impl QueryReply {
    /// Interpret a 2xx response body.
    ///
    /// `summary` wins when truthy; otherwise the raw payload is shown, and an
    /// empty or falsy payload collapses to [`NO_RESPONSE_TEXT`]. A JSON string
    /// payload is shown unquoted; bodies that are not JSON are treated as raw
    /// text.
    pub fn from_body(body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();

        let summary = parsed
            .as_ref()
            .and_then(|v| v.get("summary"))
            .filter(|v| is_truthy(v))
            .map(display_value);

        let text = summary.unwrap_or_else(|| match &parsed {
            Some(value) if !is_truthy(value) => NO_RESPONSE_TEXT.to_string(),
            Some(value @ Value::String(_)) => display_value(value),
            Some(_) => body.trim().to_string(),
            None if body.trim().is_empty() => NO_RESPONSE_TEXT.to_string(),
            None => body.trim().to_string(),
        });

        let sources = parsed
            .as_ref()
            .and_then(|v| v.get("sources"))
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(Source).collect())
            .unwrap_or_default();

        Self { text, sources }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_and_sources_are_extracted() {
        let reply = QueryReply::from_body(r#"{"summary":"Hello","sources":[{"title":"x"}]}"#);
        assert_eq!(reply.text, "Hello");
        assert_eq!(reply.sources, vec![Source(json!({"title": "x"}))]);
    }

    #[test]
    fn missing_summary_falls_back_to_raw_payload() {
        let reply = QueryReply::from_body(r#"{"answer":"elsewhere"}"#);
        assert_eq!(reply.text, r#"{"answer":"elsewhere"}"#);
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn empty_summary_falls_back_to_raw_payload() {
        let reply = QueryReply::from_body(r#"{"summary":"","sources":[]}"#);
        assert_eq!(reply.text, r#"{"summary":"","sources":[]}"#);
    }

    #[test]
    fn falsy_bodies_yield_placeholder_text() {
        for body in ["", "   ", "null", "false", "0", "\"\""] {
            let reply = QueryReply::from_body(body);
            assert_eq!(reply.text, NO_RESPONSE_TEXT, "body {body:?}");
        }
    }

    #[test]
    fn non_json_body_is_shown_verbatim() {
        let reply = QueryReply::from_body("plain text answer\n");
        assert_eq!(reply.text, "plain text answer");
    }

    #[test]
    fn json_string_body_is_shown_unquoted() {
        let reply = QueryReply::from_body(r#""plain answer""#);
        assert_eq!(reply.text, "plain answer");
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn non_string_summary_is_rendered_as_json() {
        let reply = QueryReply::from_body(r#"{"summary":42}"#);
        assert_eq!(reply.text, "42");
    }

    #[test]
    fn non_array_sources_are_ignored() {
        let reply = QueryReply::from_body(r#"{"summary":"ok","sources":"nope"}"#);
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn request_serializes_with_history_pairs() {
        let request = QueryRequest {
            query: "next".into(),
            conversation_history: vec![
                HistoryEntry::from(&Message::user("first")),
                HistoryEntry::from(&Message::bot("answer")),
            ],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "next",
                "conversation_history": [
                    {"text": "first", "sender": "user"},
                    {"text": "answer", "sender": "bot"}
                ]
            })
        );
    }
}
