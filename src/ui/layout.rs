use ratatui::text::Line;

use super::markdown::{render_message_with_config, CodeBlock, MessageRenderConfig};
use super::theme::Theme;
use crate::core::message::Message;

/// Layout configuration used by the layout engine.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub width: Option<usize>,
    pub markdown_enabled: bool,
    pub syntax_enabled: bool,
    pub loading_frame: &'static str,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: None,
            markdown_enabled: true,
            syntax_enabled: true,
            loading_frame: "⠋",
        }
    }
}

/// Result of a layout pass: the flattened transcript lines and every code
/// block numbered in transcript order.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub lines: Vec<Line<'static>>,
    /// Code blocks with `header_line` rebased onto `lines`.
    pub code_blocks: Vec<CodeBlock>,
}

impl Layout {
    pub fn code_block(&self, number: usize) -> Option<&CodeBlock> {
        self.code_blocks.iter().find(|b| b.number == number)
    }
}

pub struct LayoutEngine;

impl LayoutEngine {
    /// Lay out every message with one blank line between messages. This is the
    /// only width-aware pass; the renderer and scroll math consume its output
    /// without wrapping again.
    pub fn layout_messages(messages: &[Message], theme: &Theme, cfg: &LayoutConfig) -> Layout {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut code_blocks = Vec::new();

        for (i, msg) in messages.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            let render_cfg = MessageRenderConfig::markdown(cfg.markdown_enabled, cfg.syntax_enabled)
                .with_terminal_width(cfg.width)
                .with_first_code_block(code_blocks.len() + 1)
                .with_loading_frame(cfg.loading_frame);
            let rendered = render_message_with_config(msg, theme, render_cfg);

            let start = lines.len();
            lines.extend(rendered.lines);
            code_blocks.extend(rendered.code_blocks.into_iter().map(|mut block| {
                block.header_line += start;
                block
            }));
        }

        Layout { lines, code_blocks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_messages;

    #[test]
    fn messages_are_separated_by_blank_lines() {
        let layout = LayoutEngine::layout_messages(
            &create_test_messages(),
            &Theme::dark_default(),
            &LayoutConfig::default(),
        );
        let text: Vec<String> = layout.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            text,
            [
                "You: Hello",
                "",
                "AI",
                "Hi there!",
                "",
                "You: How are you?",
                "",
                "AI",
                "I'm doing well, thank you for asking!"
            ]
        );
    }

    #[test]
    fn code_blocks_are_numbered_across_messages() {
        let messages = vec![
            Message::bot("```rust\nfn a() {}\n```"),
            Message::user("more"),
            Message::bot("```\none\n```\n\n```sh\ntwo\n```"),
        ];
        let cfg = LayoutConfig {
            width: Some(60),
            syntax_enabled: false,
            ..LayoutConfig::default()
        };
        let layout = LayoutEngine::layout_messages(&messages, &Theme::dark_default(), &cfg);

        let numbers: Vec<usize> = layout.code_blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(layout.code_block(3).map(|b| b.content.as_str()), Some("two"));
        for block in &layout.code_blocks {
            let header = layout.lines[block.header_line].to_string();
            assert!(header.contains(&format!("[Alt+{}]", block.number)), "{header}");
        }
    }

    #[test]
    fn markdown_off_yields_no_code_blocks() {
        let messages = vec![Message::bot("```\ncode\n```")];
        let cfg = LayoutConfig {
            markdown_enabled: false,
            ..LayoutConfig::default()
        };
        let layout = LayoutEngine::layout_messages(&messages, &Theme::dark_default(), &cfg);
        assert!(layout.code_blocks.is_empty());
        assert_eq!(layout.lines.len(), 4);
    }
}
