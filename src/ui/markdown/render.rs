use super::code::{language_hint_from_codeblock_kind, render_code_block, CodeBlock};
use super::lists::{ListKind, MAX_LIST_HANGING_INDENT_WIDTH};
use super::table::TableRenderer;
use super::wrap::wrap_spans;
use crate::core::message::{Message, Sender};
use crate::ui::theme::Theme;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub const USER_PREFIX: &str = "You: ";
const USER_CONTINUATION_INDENT: &str = "     ";
pub const BOT_LABEL: &str = "AI";
const RULE_MAX_WIDTH: usize = 48;

/// Lines for a single message plus the code blocks found in it.
#[derive(Debug, Clone, Default)]
pub struct RenderedMessage {
    pub lines: Vec<Line<'static>>,
    pub code_blocks: Vec<CodeBlock>,
}

/// Configuration for rendering one message.
#[derive(Clone, Copy, Debug)]
pub struct MessageRenderConfig {
    pub markdown: bool,
    pub syntax_highlighting: bool,
    pub terminal_width: Option<usize>,
    /// Number given to the first code block of this message.
    pub first_code_block: usize,
    /// Spinner glyph drawn in front of the loading placeholder.
    pub loading_frame: &'static str,
}

impl MessageRenderConfig {
    pub fn markdown(markdown_enabled: bool, syntax_highlighting: bool) -> Self {
        Self {
            markdown: markdown_enabled,
            syntax_highlighting: markdown_enabled && syntax_highlighting,
            terminal_width: None,
            first_code_block: 1,
            loading_frame: "⠋",
        }
    }

    pub fn with_terminal_width(mut self, width: Option<usize>) -> Self {
        self.terminal_width = width;
        self
    }

    pub fn with_first_code_block(mut self, number: usize) -> Self {
        self.first_code_block = number;
        self
    }

    pub fn with_loading_frame(mut self, frame: &'static str) -> Self {
        self.loading_frame = frame;
        self
    }
}

pub fn render_message_with_config(
    msg: &Message,
    theme: &Theme,
    config: MessageRenderConfig,
) -> RenderedMessage {
    match msg.sender {
        Sender::User => RenderedMessage {
            lines: render_user_lines(&msg.text, theme, config.terminal_width),
            code_blocks: Vec::new(),
        },
        Sender::Bot => render_bot_message(msg, theme, config),
    }
}

fn render_user_lines(text: &str, theme: &Theme, width: Option<usize>) -> Vec<Line<'static>> {
    let first = vec![Span::styled(USER_PREFIX, theme.user_prefix_style)];
    let cont = vec![Span::raw(USER_CONTINUATION_INDENT)];
    let mut lines = Vec::new();
    for (i, raw) in text.split('\n').enumerate() {
        let content = vec![Span::styled(raw.replace('\t', "    "), theme.user_text_style)];
        let prefix = if i == 0 { &first } else { &cont };
        lines.extend(wrap_spans(&content, width, prefix, &cont));
    }
    lines
}

fn render_plain_lines(text: &str, style: Style, width: Option<usize>) -> Vec<Line<'static>> {
    text.split('\n')
        .flat_map(|raw| {
            let content = vec![Span::styled(raw.replace('\t', "    "), style)];
            wrap_spans(&content, width, &[], &[])
        })
        .collect()
}

fn render_bot_message(
    msg: &Message,
    theme: &Theme,
    config: MessageRenderConfig,
) -> RenderedMessage {
    let mut lines = vec![Line::from(Span::styled(BOT_LABEL, theme.bot_prefix_style))];

    if msg.is_loading {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", config.loading_frame), theme.loading_style),
            Span::styled(msg.text.clone(), theme.loading_style),
        ]));
        return RenderedMessage {
            lines,
            code_blocks: Vec::new(),
        };
    }

    let mut code_blocks = Vec::new();
    if msg.is_error {
        lines.extend(render_plain_lines(
            &msg.text,
            theme.error_text_style,
            config.terminal_width,
        ));
    } else if config.markdown {
        let offset = lines.len();
        let rendered = MarkdownRenderer::new(&msg.text, theme, config).render();
        lines.extend(rendered.lines);
        code_blocks.extend(rendered.code_blocks.into_iter().map(|mut block| {
            block.header_line += offset;
            block
        }));
    } else {
        lines.extend(render_plain_lines(
            &msg.text,
            theme.bot_text_style,
            config.terminal_width,
        ));
    }

    if !msg.sources.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Sources",
            theme.source_heading_style,
        )));
        for (i, source) in msg.sources.iter().enumerate() {
            let marker = format!("[{}] ", i + 1);
            let cont = vec![Span::raw(" ".repeat(marker.width()))];
            let first = vec![Span::styled(marker, theme.source_heading_style)];
            let content = vec![Span::styled(source.label(), theme.source_style)];
            lines.extend(wrap_spans(&content, config.terminal_width, &first, &cont));
        }
    }

    RenderedMessage { lines, code_blocks }
}

fn is_blank(line: &Line<'_>) -> bool {
    line.spans.iter().all(|s| s.content.trim().is_empty())
}

struct PendingCodeBlock {
    language: Option<String>,
    buffer: String,
}

pub(super) struct MarkdownRenderer<'a> {
    content: &'a str,
    theme: &'a Theme,
    config: MessageRenderConfig,
    lines: Vec<Line<'static>>,
    code_blocks: Vec<CodeBlock>,
    current_spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    list_stack: Vec<ListKind>,
    list_indent_stack: Vec<usize>,
    pending_marker: Option<String>,
    quote_depth: usize,
    link_stack: Vec<(String, usize)>,
    code_block: Option<PendingCodeBlock>,
    table: Option<TableRenderer>,
}

impl<'a> MarkdownRenderer<'a> {
    pub(super) fn new(content: &'a str, theme: &'a Theme, config: MessageRenderConfig) -> Self {
        Self {
            content,
            theme,
            config,
            lines: Vec::new(),
            code_blocks: Vec::new(),
            current_spans: Vec::new(),
            style_stack: vec![theme.bot_text_style],
            list_stack: Vec::new(),
            list_indent_stack: Vec::new(),
            pending_marker: None,
            quote_depth: 0,
            link_stack: Vec::new(),
            code_block: None,
            table: None,
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self.current_style().add_modifier(modifier);
        self.style_stack.push(style);
    }

    fn push_patch(&mut self, patch: Style) {
        let style = self.current_style().patch(patch);
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.table.as_mut() {
            Some(table) => table.push_span(span),
            None => self.current_spans.push(span),
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.current_style();
        self.push_span(Span::styled(text.to_string(), style));
    }

    fn push_empty_line(&mut self) {
        if self.lines.last().is_some_and(|l| !is_blank(l)) {
            self.lines.push(Line::default());
        }
    }

    fn list_indent(&self) -> usize {
        self.list_indent_stack
            .iter()
            .sum::<usize>()
            .min(MAX_LIST_HANGING_INDENT_WIDTH)
    }

    fn quote_prefix(&self) -> Vec<Span<'static>> {
        (0..self.quote_depth)
            .map(|_| Span::styled("│ ", self.theme.md_blockquote))
            .collect()
    }

    /// Prefixes for the first and following lines of the current block.
    fn block_prefixes(
        &self,
        marker: Option<String>,
    ) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
        let mut cont = self.quote_prefix();
        let mut first = cont.clone();
        let total = self.list_indent();
        if total > 0 {
            cont.push(Span::raw(" ".repeat(total)));
        }
        match marker {
            Some(marker) => {
                let parent = total.saturating_sub(marker.width());
                if parent > 0 {
                    first.push(Span::raw(" ".repeat(parent)));
                }
                first.push(Span::styled(marker, self.theme.md_list_marker));
            }
            None => first = cont.clone(),
        }
        (first, cont)
    }

    fn flush_current_spans(&mut self) {
        let marker = self.pending_marker.take();
        let spans = std::mem::take(&mut self.current_spans);
        let has_text = spans.iter().any(|s| !s.content.trim().is_empty());
        if !has_text && marker.is_none() {
            return;
        }
        let (first, cont) = self.block_prefixes(marker);
        let wrapped = wrap_spans(&spans, self.config.terminal_width, &first, &cont);
        self.lines.extend(wrapped);
    }

    fn flush_code_block(&mut self, pending: PendingCodeBlock) {
        let content = pending
            .buffer
            .strip_suffix('\n')
            .unwrap_or(&pending.buffer)
            .to_string();
        let number = self.config.first_code_block + self.code_blocks.len();
        let (_, prefix) = self.block_prefixes(None);
        let rendered = render_code_block(
            pending.language.as_deref(),
            &content,
            number,
            self.theme,
            self.config.syntax_highlighting,
            &prefix,
        );
        self.code_blocks.push(CodeBlock {
            number,
            language: pending.language,
            content,
            header_line: self.lines.len(),
        });
        self.lines.extend(rendered);
    }

    fn flush_table(&mut self, table: TableRenderer) {
        let (_, indent) = self.block_prefixes(None);
        let rendered = table.render(self.theme, self.config.terminal_width, &indent);
        self.lines.extend(rendered);
    }

    fn push_rule(&mut self) {
        let width = self
            .config
            .terminal_width
            .unwrap_or(RULE_MAX_WIDTH)
            .min(RULE_MAX_WIDTH);
        self.lines.push(Line::from(Span::styled(
            "─".repeat(width),
            self.theme.md_rule,
        )));
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.flush_current_spans();
                let style = self.theme.md_heading_style(level as u8);
                self.push_patch(style);
            }
            Tag::BlockQuote(_) => {
                self.flush_current_spans();
                self.quote_depth += 1;
                self.push_patch(self.theme.md_blockquote);
            }
            Tag::List(start) => {
                self.flush_current_spans();
                self.list_stack.push(ListKind::from_start(start));
                self.list_indent_stack.push(0);
            }
            Tag::Item => {
                self.flush_current_spans();
                let depth = self.list_stack.len();
                let marker = match self.list_stack.last_mut() {
                    Some(kind) => kind.next_marker(depth),
                    None => ListKind::Unordered.next_marker(depth),
                };
                if let Some(indent) = self.list_indent_stack.last_mut() {
                    *indent = marker.width();
                }
                self.pending_marker = Some(marker);
            }
            Tag::CodeBlock(kind) => {
                self.flush_current_spans();
                self.code_block = Some(PendingCodeBlock {
                    language: language_hint_from_codeblock_kind(kind),
                    buffer: String::new(),
                });
            }
            Tag::Emphasis => self.push_modifier(Modifier::ITALIC),
            Tag::Strong => self.push_modifier(Modifier::BOLD),
            Tag::Strikethrough => self.push_modifier(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                let start = self.current_spans.len();
                self.link_stack.push((dest_url.to_string(), start));
                self.push_patch(self.theme.md_link);
            }
            Tag::Table(_) => {
                self.flush_current_spans();
                self.table = Some(TableRenderer::new());
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.start_cell();
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_current_spans();
                if self.list_stack.is_empty() {
                    self.push_empty_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush_current_spans();
                self.pop_style();
                self.push_empty_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_current_spans();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
                self.push_empty_line();
            }
            TagEnd::List(_) => {
                self.flush_current_spans();
                self.list_stack.pop();
                self.list_indent_stack.pop();
                if self.list_stack.is_empty() {
                    self.push_empty_line();
                }
            }
            TagEnd::Item => self.flush_current_spans(),
            TagEnd::CodeBlock => {
                if let Some(pending) = self.code_block.take() {
                    self.flush_code_block(pending);
                }
                self.push_empty_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link | TagEnd::Image => {
                self.pop_style();
                if let Some((url, start)) = self.link_stack.pop() {
                    let label: String = self
                        .current_spans
                        .get(start..)
                        .unwrap_or_default()
                        .iter()
                        .map(|s| s.content.as_ref())
                        .collect();
                    if !url.is_empty() && label.trim() != url && self.table.is_none() {
                        let style = self.current_style();
                        self.push_span(Span::styled(format!(" ({url})"), style));
                    }
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.end_header();
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.end_cell();
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.flush_table(table);
                }
                self.push_empty_line();
            }
            _ => {}
        }
    }

    pub(super) fn render(mut self) -> RenderedMessage {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        let parser = Parser::new_ext(self.content, options);

        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => match self.code_block.as_mut() {
                    Some(pending) => pending.buffer.push_str(&text),
                    None => self.push_text(&text),
                },
                Event::Code(code) => {
                    let style = self.current_style().patch(self.theme.md_inline_code);
                    self.push_span(Span::styled(code.to_string(), style));
                }
                Event::SoftBreak | Event::HardBreak => {
                    if self.table.is_some() {
                        self.push_text(" ");
                    } else {
                        self.flush_current_spans();
                    }
                }
                Event::Rule => {
                    self.flush_current_spans();
                    self.push_rule();
                    self.push_empty_line();
                }
                Event::TaskListMarker(checked) => {
                    let mark = if checked { "[x] " } else { "[ ] " };
                    self.push_span(Span::styled(mark, self.theme.md_list_marker));
                }
                Event::Html(html) => {
                    self.flush_current_spans();
                    for line in html.lines().filter(|l| !l.trim().is_empty()) {
                        self.push_text(line);
                        self.flush_current_spans();
                    }
                }
                Event::InlineHtml(html) => self.push_text(&html),
                Event::FootnoteReference(label) => self.push_text(&format!("[^{label}]")),
                _ => {}
            }
        }

        self.flush_current_spans();
        if let Some(pending) = self.code_block.take() {
            self.flush_code_block(pending);
        }
        while self.lines.last().is_some_and(is_blank) {
            self.lines.pop();
        }

        RenderedMessage {
            lines: self.lines,
            code_blocks: self.code_blocks,
        }
    }
}
