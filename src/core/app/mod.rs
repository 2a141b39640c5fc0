use tracing::{debug, info};

use crate::api::QueryRequest;
use crate::core::config::Config;
use crate::core::conversation::Conversation;
use crate::core::dispatcher::{QueryOutcome, QueryParams};
use crate::core::message::Message;
use crate::ui::layout::Layout;
use crate::ui::markdown::CodeBlock;
use crate::ui::theme::Theme;

pub mod actions;
pub mod ui_state;

#[cfg(test)]
mod tests;

pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use ui_state::UiState;

/// Prompts offered while the conversation is empty.
pub const SUGGESTIONS: [&str; 4] = [
    "Explain quantum computing in simple terms",
    "Got any creative ideas for a 10 year old's birthday?",
    "How do I make an HTTP request in Javascript?",
    "Explain options trading in simple terms",
];

/// Resolved startup settings, after CLI flags have been layered over the
/// config file.
#[derive(Debug, Clone)]
pub struct AppInitConfig {
    pub base_url: String,
    pub theme: String,
    pub markdown: bool,
    pub syntax: bool,
    pub sidebar: bool,
}

impl AppInitConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url(),
            theme: config.theme_name().to_string(),
            markdown: config.markdown_enabled(),
            syntax: config.syntax_enabled(),
            sidebar: config.sidebar_enabled(),
        }
    }
}

pub struct App {
    pub conversation: Conversation,
    pub ui: UiState,
    pub client: reqwest::Client,
    pub base_url: String,
    next_request_id: u64,
    active_request: Option<u64>,
    /// Bumped on every transcript change so cached layouts can be reused.
    revision: u64,
}

impl App {
    pub fn new(init: AppInitConfig) -> Self {
        let theme = Theme::from_name(&init.theme);
        Self {
            conversation: Conversation::new(),
            ui: UiState::new_basic(theme, init.markdown, init.syntax, init.sidebar),
            client: reqwest::Client::new(),
            base_url: init.base_url,
            next_request_id: 1,
            active_request: None,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn is_pending(&self) -> bool {
        self.conversation.is_pending()
    }

    /// Start a query for `text`.
    ///
    /// Blank input and submissions while a request is outstanding are
    /// ignored. Otherwise the user message and the loading placeholder are
    /// appended, the pending flag is raised and the request to dispatch is
    /// returned. The history sent is the conversation as it stood before
    /// this submission.
    pub fn submit_query(&mut self, text: &str) -> Option<QueryParams> {
        if text.trim().is_empty() {
            return None;
        }
        if self.conversation.is_pending() {
            debug!("submission ignored while a request is pending");
            return None;
        }

        let conversation_history = self.conversation.history();
        self.conversation.push(Message::user(text));
        self.conversation.push(Message::loading());
        self.conversation.set_pending(true);
        self.touch();
        self.ui.restart_spinner();
        self.ui.auto_scroll = true;

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.active_request = Some(request_id);

        Some(QueryParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            request: QueryRequest {
                query: text.to_string(),
                conversation_history,
            },
            request_id,
        })
    }

    /// Submit whatever is in the input box, clearing it when accepted.
    pub fn submit_input(&mut self) -> Option<QueryParams> {
        let text = self.ui.get_input_text();
        let params = self.submit_query(&text)?;
        self.ui.clear_input();
        Some(params)
    }

    /// Apply a finished request. Outcomes for anything but the current
    /// request (for example one started before "new conversation") are
    /// dropped.
    pub fn complete_query(&mut self, outcome: QueryOutcome, request_id: u64) -> bool {
        if self.active_request != Some(request_id) {
            debug!(request_id, "dropping stale query outcome");
            return false;
        }
        self.active_request = None;
        self.conversation.replace_last(outcome.into_message());
        self.conversation.set_pending(false);
        self.touch();
        true
    }

    /// Clear messages, input and the pending flag unconditionally.
    pub fn new_conversation(&mut self) {
        info!(messages = self.conversation.len(), "starting a new conversation");
        self.conversation.clear();
        self.active_request = None;
        self.ui.clear_input();
        self.ui.clear_status();
        self.ui.scroll_offset = 0;
        self.ui.auto_scroll = true;
        self.touch();
    }

    /// Put suggestion `index` into the input box without submitting it.
    pub fn apply_suggestion(&mut self, index: usize) -> bool {
        match SUGGESTIONS.get(index) {
            Some(text) => {
                self.ui.set_input_text((*text).to_string());
                true
            }
            None => false,
        }
    }

    /// Layout of the current transcript at `width` columns.
    pub fn layout(&mut self, width: usize) -> &Layout {
        let frame = self.ui.loading_frame();
        let revision = self.revision;
        self.ui
            .layout_for(self.conversation.messages(), revision, width, frame)
    }

    fn transcript_width(&self) -> usize {
        self.ui.transcript_size.0.max(1) as usize
    }

    /// Code block `number` (1-based, transcript order).
    pub fn code_block(&mut self, number: usize) -> Option<CodeBlock> {
        let width = self.transcript_width();
        self.layout(width).code_block(number).cloned()
    }

    pub fn last_code_block(&mut self) -> Option<CodeBlock> {
        let width = self.transcript_width();
        self.layout(width).code_blocks.last().cloned()
    }

    /// Scroll so `block`'s header is on screen, leaving the view alone when
    /// it already is.
    pub fn reveal_code_block(&mut self, block: &CodeBlock) {
        let max = self.max_scroll_offset();
        let top = if self.ui.auto_scroll {
            max
        } else {
            self.ui.scroll_offset.min(max)
        };
        let header = block.header_line.min(u16::MAX as usize) as u16;
        if (top..top.saturating_add(self.ui.transcript_size.1)).contains(&header) {
            return;
        }
        self.ui.scroll_offset = header.min(max);
        self.ui.auto_scroll = self.ui.scroll_offset >= max;
    }

    pub fn max_scroll_offset(&mut self) -> u16 {
        let width = self.transcript_width();
        let total = self.layout(width).lines.len();
        self.ui.max_scroll_offset(total)
    }
}
