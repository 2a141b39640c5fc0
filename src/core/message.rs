use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text shown in the transient placeholder while a query is outstanding.
pub const LOADING_TEXT: &str = "Searching and analyzing information...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.as_str().to_string()
    }
}

/// A reference object returned alongside a summary.
///
/// The backend does not promise a shape for these, so the raw JSON is kept
/// verbatim and only a few well-known fields are probed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(pub Value);

impl Source {
    pub fn title(&self) -> Option<&str> {
        self.field(&["title", "name"])
    }

    pub fn url(&self) -> Option<&str> {
        self.field(&["url", "link", "href"])
    }

    /// One-line label used when listing citations.
    pub fn label(&self) -> String {
        match (self.title(), self.url()) {
            (Some(title), Some(url)) => format!("{title} - {url}"),
            (Some(title), None) => title.to_string(),
            (None, Some(url)) => url.to_string(),
            (None, None) => match &self.0 {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    fn field(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,
    /// Set on the bot message that replaces a failed query.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            is_loading: false,
            is_error: false,
            sources: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn bot_with_sources(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            sources,
            ..Self::bot(text)
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::bot(text)
        }
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::bot(LOADING_TEXT)
        }
    }
}
