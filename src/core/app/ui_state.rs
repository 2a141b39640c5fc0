use std::time::{Duration, Instant};

use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::core::message::Message;
use crate::ui::layout::{Layout, LayoutConfig, LayoutEngine};
use crate::ui::theme::Theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Spinner glyph for the given time since the animation started.
pub fn spinner_frame(elapsed: Duration) -> &'static str {
    let idx = (elapsed.as_millis() / SPINNER_INTERVAL.as_millis()) as usize;
    SPINNER_FRAMES[idx % SPINNER_FRAMES.len()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    width: usize,
    markdown: bool,
    syntax: bool,
    frame: &'static str,
}

#[derive(Debug, Clone)]
pub struct UiState {
    textarea: TextArea<'static>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub theme: Theme,
    pub markdown_enabled: bool,
    pub syntax_enabled: bool,
    pub sidebar_enabled: bool,
    pub status: Option<String>,
    pub status_set_at: Option<Instant>,
    pub pulse_start: Instant,
    pub exit_requested: bool,
    /// Transcript viewport (width, height) from the most recent draw.
    pub transcript_size: (u16, u16),
    layout_cache: Option<(LayoutKey, Layout)>,
}

impl UiState {
    pub(crate) fn new_basic(
        theme: Theme,
        markdown_enabled: bool,
        syntax_enabled: bool,
        sidebar_enabled: bool,
    ) -> Self {
        let mut ui = Self {
            textarea: TextArea::default(),
            scroll_offset: 0,
            auto_scroll: true,
            theme,
            markdown_enabled,
            syntax_enabled,
            sidebar_enabled,
            status: None,
            status_set_at: None,
            pulse_start: Instant::now(),
            exit_requested: false,
            transcript_size: (80, 24),
            layout_cache: None,
        };
        ui.configure_textarea();
        ui
    }

    pub(crate) fn configure_textarea(&mut self) {
        let textarea_style = self
            .theme
            .input_text_style
            .patch(Style::default().bg(self.theme.background_color));
        self.textarea.set_style(textarea_style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea
            .set_placeholder_text("Message the copilot...");
        self.textarea.set_placeholder_style(self.theme.title_style);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: String) {
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(|s| s.to_string()).collect()
        };
        self.textarea = TextArea::from(lines);
        if !text.is_empty() {
            let last_row = self.textarea.lines().len().saturating_sub(1) as u16;
            let last_col = self
                .textarea
                .lines()
                .last()
                .map(|l| l.chars().count() as u16)
                .unwrap_or(0);
            self.textarea.move_cursor(CursorMove::Jump(last_row, last_col));
        }
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.set_input_text(String::new());
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len().max(1)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }

    /// Drop the status once it has been visible long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if let Some(set_at) = self.status_set_at {
            if now.duration_since(set_at) >= STATUS_TTL {
                self.clear_status();
            }
        }
    }

    pub fn restart_spinner(&mut self) {
        self.pulse_start = Instant::now();
    }

    pub fn loading_frame(&self) -> &'static str {
        spinner_frame(self.pulse_start.elapsed())
    }

    /// Layout for `messages` at `width`, reused while nothing that affects
    /// it has changed. `revision` must change whenever the messages do.
    pub fn layout_for(
        &mut self,
        messages: &[Message],
        revision: u64,
        width: usize,
        frame: &'static str,
    ) -> &Layout {
        let animating = messages.iter().any(|m| m.is_loading);
        let key = LayoutKey {
            revision,
            width,
            markdown: self.markdown_enabled,
            syntax: self.syntax_enabled,
            frame: if animating { frame } else { "" },
        };
        let entry = match self.layout_cache.take() {
            Some((cached, layout)) if cached == key => (cached, layout),
            _ => {
                let cfg = LayoutConfig {
                    width: Some(width),
                    markdown_enabled: self.markdown_enabled,
                    syntax_enabled: self.syntax_enabled,
                    loading_frame: frame,
                };
                (key, LayoutEngine::layout_messages(messages, &self.theme, &cfg))
            }
        };
        &self.layout_cache.insert(entry).1
    }

    pub fn max_scroll_offset(&self, total_lines: usize) -> u16 {
        let height = self.transcript_size.1 as usize;
        total_lines.saturating_sub(height).min(u16::MAX as usize) as u16
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scroll down, re-enabling auto-scroll once the bottom is reached.
    pub fn scroll_down(&mut self, lines: u16, max_scroll: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_scroll);
        self.auto_scroll = self.scroll_offset >= max_scroll;
    }

    pub fn page_step(&self) -> u16 {
        self.transcript_size.1.saturating_sub(1).max(1)
    }

    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self, max_scroll: u16) {
        self.scroll_offset = max_scroll;
        self.auto_scroll = true;
    }
}
