use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::theme::Theme;

pub const SIDEBAR_WIDTH: u16 = 30;
/// Terminals narrower than this hide the sidebar to leave room for the transcript.
pub const SIDEBAR_MIN_TERMINAL_WIDTH: u16 = 72;

pub const NEW_CHAT_LABEL: &str = "+ New chat (Ctrl+N)";
const CURRENT_CHAT: &str = "Personal AI Copilot";
const PREVIOUS_CHATS: [&str; 12] = [
    "Content structuring for project",
    "Course feedback review",
    "Email to support",
    "ChromeDriver setup guide",
    "Cloud journey post",
    "Cloud Spanner Error Fix",
    "Exam notes structure",
    "Cloud Function deployment issue",
    "Fix Translation API Errors",
    "Hackathon project",
    "Understanding node types",
    "Mock interview script",
];

/// Cut `text` to `width` columns, ending in an ellipsis when shortened.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn item_line(text: &str, width: usize, style: Style) -> Line<'static> {
    let label = truncate_to_width(text, width.saturating_sub(1));
    let pad = width.saturating_sub(label.width() + 1);
    Line::from(Span::styled(format!(" {label}{}", " ".repeat(pad)), style))
}

/// Static sidebar content; `width` is the inner width available.
pub fn sidebar_lines(theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            truncate_to_width(NEW_CHAT_LABEL, width),
            theme.sidebar_header_style,
        )),
        Line::default(),
        Line::from(Span::styled("Today", theme.sidebar_section_style)),
        item_line(CURRENT_CHAT, width, theme.sidebar_active_style),
        Line::default(),
        Line::from(Span::styled("Previous 7 Days", theme.sidebar_section_style)),
    ];
    lines.extend(
        PREVIOUS_CHATS
            .iter()
            .map(|title| item_line(title, width, theme.sidebar_item_style)),
    );
    lines
}

pub fn render_sidebar(f: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.sidebar_border_style);
    let inner = block.inner(area);
    let lines = sidebar_lines(theme, inner.width as usize);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_adds_an_ellipsis() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 8), "a longe…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn sections_appear_in_order_with_the_current_chat_active() {
        let theme = Theme::dark_default();
        let lines = sidebar_lines(&theme, 28);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], NEW_CHAT_LABEL);
        assert_eq!(text[2], "Today");
        assert_eq!(text[3].trim(), CURRENT_CHAT);
        assert_eq!(lines[3].spans[0].style, theme.sidebar_active_style);
        assert_eq!(text[5], "Previous 7 Days");
        assert_eq!(lines.len(), 6 + PREVIOUS_CHATS.len());
        assert!(lines.iter().all(|l| l.width() <= 28));
    }
}
