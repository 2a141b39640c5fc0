use super::wrap::{pad_to_width, spans_width};
use crate::ui::theme::Theme;
use pulldown_cmark::CodeBlockKind;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// A fenced or indented code block pulled out of a bot reply so it can be
/// copied from the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// 1-based position among all code blocks in the transcript.
    pub number: usize,
    pub language: Option<String>,
    pub content: String,
    /// Index of the block's header line within its message's lines.
    pub header_line: usize,
}

pub(super) fn language_hint_from_codeblock_kind(kind: CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Indented => None,
        CodeBlockKind::Fenced(info) => info
            .split_ascii_whitespace()
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

/// Text of the copy hint shown at the right of a code block header.
pub(crate) fn copy_hint(number: usize) -> String {
    if (1..=9).contains(&number) {
        format!(" Copy code [Alt+{number}] ")
    } else {
        format!(" Copy code [#{number}] ")
    }
}

fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}

fn plain_codeblock_lines(code: &str, theme: &Theme) -> Vec<Line<'static>> {
    let style = theme.md_codeblock_text_style();
    code.lines()
        .map(|line| Line::from(vec![Span::styled(detab(line), style)]))
        .collect()
}

/// Render a code block as a header line followed by its body.
///
/// Each line starts with `prefix` (quote bars and list indentation) and is
/// padded so the background forms a solid box.
pub(super) fn render_code_block(
    language: Option<&str>,
    code: &str,
    number: usize,
    theme: &Theme,
    syntax_enabled: bool,
    prefix: &[Span<'static>],
) -> Vec<Line<'static>> {
    let body = if syntax_enabled {
        crate::utils::syntax::highlight_code_block(language.unwrap_or(""), code, theme)
            .unwrap_or_else(|| plain_codeblock_lines(code, theme))
    } else {
        plain_codeblock_lines(code, theme)
    };

    let label = format!(" {} ", language.unwrap_or("text"));
    let hint = copy_hint(number);
    let code_width = body.iter().map(|l| spans_width(&l.spans)).max().unwrap_or(0) + 2;
    let block_width = code_width.max(label.width() + hint.width() + 1);
    let prefix_width = spans_width(prefix);
    let body_style = theme.md_codeblock_text_style();

    let mut out = Vec::with_capacity(body.len() + 1);

    let mut header = prefix.to_vec();
    header.push(Span::styled(label.clone(), theme.md_codeblock_header));
    let fill = block_width.saturating_sub(label.width() + hint.width());
    header.push(Span::styled(" ".repeat(fill), theme.md_codeblock_header));
    header.push(Span::styled(hint, theme.md_codeblock_copy_hint));
    out.push(Line::from(header));

    for line in body {
        let mut spans = Vec::with_capacity(line.spans.len() + 3);
        spans.extend_from_slice(prefix);
        spans.push(Span::styled(" ", body_style));
        spans.extend(line.spans);
        pad_to_width(&mut spans, prefix_width + block_width, body_style);
        out.push(Line::from(spans));
    }
    out
}
