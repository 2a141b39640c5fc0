use std::error::Error;
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{QueryReply, QueryRequest};
use crate::core::message::Message;
use crate::utils::url::query_url;

/// The only failure text a user ever sees.
pub const REQUEST_FAILED_TEXT: &str = "Sorry, I encountered an error while processing your request. Please make sure the backend server is running and try again.";

/// Why a query failed. Kept for logs; the transcript only shows
/// [`REQUEST_FAILED_TEXT`].
#[derive(Debug)]
pub enum QueryError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    Transport(reqwest::Error),
    /// The backend answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The response body could not be read.
    Body(reqwest::Error),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Transport(err) => write!(f, "request failed: {err}"),
            QueryError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "backend returned {status}")
                } else {
                    write!(f, "backend returned {status}: {body}")
                }
            }
            QueryError::Body(err) => write!(f, "failed to read response body: {err}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Transport(err) | QueryError::Body(err) => Some(err),
            QueryError::Status { .. } => None,
        }
    }
}

/// Perform one POST against the query endpoint and interpret the reply.
pub async fn send_query(
    client: &reqwest::Client,
    base_url: &str,
    request: &QueryRequest,
) -> Result<QueryReply, QueryError> {
    let url = query_url(base_url);
    debug!(
        %url,
        history_len = request.conversation_history.len(),
        "dispatching query"
    );

    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(QueryError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(QueryError::Status { status, body });
    }

    let body = response.text().await.map_err(QueryError::Body)?;
    Ok(QueryReply::from_body(&body))
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
    Answered(QueryReply),
    Failed,
}

impl QueryOutcome {
    pub fn from_result(result: Result<QueryReply, QueryError>) -> Self {
        match result {
            Ok(reply) => QueryOutcome::Answered(reply),
            Err(err) => {
                warn!(error = %err, "query failed");
                QueryOutcome::Failed
            }
        }
    }

    /// The bot message that takes the loading placeholder's place.
    pub fn into_message(self) -> Message {
        match self {
            QueryOutcome::Answered(reply) => Message::bot_with_sources(reply.text, reply.sources),
            QueryOutcome::Failed => Message::failed(REQUEST_FAILED_TEXT),
        }
    }
}

pub struct QueryParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub request: QueryRequest,
    pub request_id: u64,
}

/// Runs queries off the event loop and reports each outcome tagged with the
/// id it was dispatched under.
#[derive(Clone)]
pub struct QueryService {
    tx: mpsc::UnboundedSender<(QueryOutcome, u64)>,
}

impl QueryService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(QueryOutcome, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_query(&self, params: QueryParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let QueryParams {
                client,
                base_url,
                request,
                request_id,
            } = params;

            let result = send_query(&client, &base_url, &request).await;
            let outcome = QueryOutcome::from_result(result);
            debug!(request_id, failed = outcome == QueryOutcome::Failed, "query finished");
            let _ = tx.send((outcome, request_id));
        });
    }
}
