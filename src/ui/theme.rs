use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,
    pub loading_style: Style,
    pub error_text_style: Style,
    pub source_heading_style: Style,
    pub source_style: Style,

    // Chrome
    pub title_style: Style,
    pub status_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,

    // Sidebar and empty state
    pub sidebar_border_style: Style,
    pub sidebar_header_style: Style,
    pub sidebar_section_style: Style,
    pub sidebar_item_style: Style,
    pub sidebar_active_style: Style,
    pub empty_title_style: Style,
    pub suggestion_style: Style,
    pub suggestion_key_style: Style,

    // Markdown
    pub md_h1: Style,
    pub md_h2: Style,
    pub md_h3: Style,
    pub md_h_other: Style,
    pub md_list_marker: Style,
    pub md_blockquote: Style,
    pub md_inline_code: Style,
    pub md_link: Style,
    pub md_rule: Style,
    pub md_table_border: Style,
    pub md_table_header: Style,
    pub md_codeblock_text: Style,
    pub md_codeblock_bg: Option<Color>,
    pub md_codeblock_header: Style,
    pub md_codeblock_copy_hint: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        let code_bg = Color::Rgb(40, 44, 52);
        Theme {
            background_color: Color::Rgb(33, 33, 38),

            user_prefix_style: Style::default()
                .fg(Color::Rgb(120, 200, 255))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(170, 220, 255)),
            bot_prefix_style: Style::default()
                .fg(Color::Rgb(16, 163, 127))
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Rgb(230, 230, 230)),
            loading_style: Style::default()
                .fg(Color::Rgb(150, 150, 160))
                .add_modifier(Modifier::ITALIC),
            error_text_style: Style::default().fg(Color::Rgb(255, 120, 120)),
            source_heading_style: Style::default()
                .fg(Color::Rgb(180, 180, 190))
                .add_modifier(Modifier::BOLD),
            source_style: Style::default().fg(Color::Rgb(140, 170, 220)),

            title_style: Style::default().fg(Color::Rgb(160, 160, 170)),
            status_style: Style::default().fg(Color::Rgb(16, 163, 127)),
            input_border_style: Style::default().fg(Color::Rgb(110, 110, 120)),
            input_title_style: Style::default().fg(Color::Rgb(160, 160, 170)),
            input_text_style: Style::default().fg(Color::Rgb(235, 235, 235)),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            sidebar_border_style: Style::default().fg(Color::Rgb(70, 70, 80)),
            sidebar_header_style: Style::default()
                .fg(Color::Rgb(235, 235, 235))
                .add_modifier(Modifier::BOLD),
            sidebar_section_style: Style::default().fg(Color::Rgb(130, 130, 140)),
            sidebar_item_style: Style::default().fg(Color::Rgb(200, 200, 205)),
            sidebar_active_style: Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(52, 53, 65)),
            empty_title_style: Style::default()
                .fg(Color::Rgb(235, 235, 235))
                .add_modifier(Modifier::BOLD),
            suggestion_style: Style::default().fg(Color::Rgb(200, 200, 205)),
            suggestion_key_style: Style::default()
                .fg(Color::Rgb(16, 163, 127))
                .add_modifier(Modifier::BOLD),

            md_h1: Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            md_h2: Style::default()
                .fg(Color::Rgb(240, 240, 240))
                .add_modifier(Modifier::BOLD),
            md_h3: Style::default()
                .fg(Color::Rgb(225, 225, 225))
                .add_modifier(Modifier::BOLD),
            md_h_other: Style::default()
                .fg(Color::Rgb(210, 210, 210))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            md_list_marker: Style::default().fg(Color::Rgb(16, 163, 127)),
            md_blockquote: Style::default()
                .fg(Color::Rgb(170, 170, 180))
                .add_modifier(Modifier::ITALIC),
            md_inline_code: Style::default()
                .fg(Color::Rgb(255, 200, 140))
                .bg(Color::Rgb(50, 50, 58)),
            md_link: Style::default()
                .fg(Color::Rgb(120, 170, 255))
                .add_modifier(Modifier::UNDERLINED),
            md_rule: Style::default().fg(Color::Rgb(90, 90, 100)),
            md_table_border: Style::default().fg(Color::Rgb(90, 90, 100)),
            md_table_header: Style::default()
                .fg(Color::Rgb(240, 240, 240))
                .add_modifier(Modifier::BOLD),
            md_codeblock_text: Style::default().fg(Color::Rgb(220, 220, 220)),
            md_codeblock_bg: Some(code_bg),
            md_codeblock_header: Style::default()
                .fg(Color::Rgb(180, 180, 190))
                .bg(Color::Rgb(52, 53, 65)),
            md_codeblock_copy_hint: Style::default()
                .fg(Color::Rgb(140, 140, 150))
                .bg(Color::Rgb(52, 53, 65)),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::Rgb(250, 250, 250),

            user_prefix_style: Style::default()
                .fg(Color::Rgb(20, 90, 170))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(20, 70, 140)),
            bot_prefix_style: Style::default()
                .fg(Color::Rgb(10, 120, 95))
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Rgb(30, 30, 30)),
            loading_style: Style::default()
                .fg(Color::Rgb(110, 110, 120))
                .add_modifier(Modifier::ITALIC),
            error_text_style: Style::default().fg(Color::Rgb(180, 30, 30)),
            source_heading_style: Style::default()
                .fg(Color::Rgb(70, 70, 80))
                .add_modifier(Modifier::BOLD),
            source_style: Style::default().fg(Color::Rgb(30, 80, 170)),

            title_style: Style::default().fg(Color::Rgb(90, 90, 100)),
            status_style: Style::default().fg(Color::Rgb(10, 120, 95)),
            input_border_style: Style::default().fg(Color::Rgb(150, 150, 160)),
            input_title_style: Style::default().fg(Color::Rgb(90, 90, 100)),
            input_text_style: Style::default().fg(Color::Rgb(20, 20, 20)),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            sidebar_border_style: Style::default().fg(Color::Rgb(200, 200, 205)),
            sidebar_header_style: Style::default()
                .fg(Color::Rgb(20, 20, 20))
                .add_modifier(Modifier::BOLD),
            sidebar_section_style: Style::default().fg(Color::Rgb(120, 120, 130)),
            sidebar_item_style: Style::default().fg(Color::Rgb(50, 50, 55)),
            sidebar_active_style: Style::default()
                .fg(Color::Rgb(0, 0, 0))
                .bg(Color::Rgb(225, 225, 232)),
            empty_title_style: Style::default()
                .fg(Color::Rgb(20, 20, 20))
                .add_modifier(Modifier::BOLD),
            suggestion_style: Style::default().fg(Color::Rgb(60, 60, 65)),
            suggestion_key_style: Style::default()
                .fg(Color::Rgb(10, 120, 95))
                .add_modifier(Modifier::BOLD),

            md_h1: Style::default()
                .fg(Color::Rgb(0, 0, 0))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            md_h2: Style::default()
                .fg(Color::Rgb(15, 15, 15))
                .add_modifier(Modifier::BOLD),
            md_h3: Style::default()
                .fg(Color::Rgb(30, 30, 30))
                .add_modifier(Modifier::BOLD),
            md_h_other: Style::default()
                .fg(Color::Rgb(45, 45, 45))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            md_list_marker: Style::default().fg(Color::Rgb(10, 120, 95)),
            md_blockquote: Style::default()
                .fg(Color::Rgb(90, 90, 100))
                .add_modifier(Modifier::ITALIC),
            md_inline_code: Style::default()
                .fg(Color::Rgb(160, 60, 20))
                .bg(Color::Rgb(236, 236, 240)),
            md_link: Style::default()
                .fg(Color::Rgb(20, 80, 200))
                .add_modifier(Modifier::UNDERLINED),
            md_rule: Style::default().fg(Color::Rgb(190, 190, 195)),
            md_table_border: Style::default().fg(Color::Rgb(170, 170, 175)),
            md_table_header: Style::default()
                .fg(Color::Rgb(15, 15, 15))
                .add_modifier(Modifier::BOLD),
            md_codeblock_text: Style::default().fg(Color::Rgb(30, 30, 30)),
            md_codeblock_bg: Some(Color::Rgb(242, 242, 245)),
            md_codeblock_header: Style::default()
                .fg(Color::Rgb(70, 70, 80))
                .bg(Color::Rgb(225, 225, 232)),
            md_codeblock_copy_hint: Style::default()
                .fg(Color::Rgb(110, 110, 120))
                .bg(Color::Rgb(225, 225, 232)),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" | "default" | "default-dark" => Self::dark_default(),
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "dark" | "default" | "default-dark" | "light"
        )
    }

    pub fn md_heading_style(&self, level: u8) -> Style {
        match level {
            1 => self.md_h1,
            2 => self.md_h2,
            3 => self.md_h3,
            _ => self.md_h_other,
        }
    }

    pub fn md_codeblock_text_style(&self) -> Style {
        match self.md_codeblock_bg {
            Some(bg) => self.md_codeblock_text.bg(bg),
            None => self.md_codeblock_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_dark() {
        let theme = Theme::from_name("solarized-neon");
        assert_eq!(theme.background_color, Theme::dark_default().background_color);
        assert!(!Theme::is_known("solarized-neon"));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            Theme::from_name("LIGHT").background_color,
            Theme::light().background_color
        );
        assert!(Theme::is_known("Dark"));
    }

    #[test]
    fn headings_beyond_three_share_a_style() {
        let theme = Theme::dark_default();
        assert_eq!(theme.md_heading_style(4), theme.md_heading_style(6));
        assert_ne!(theme.md_heading_style(1), theme.md_heading_style(2));
    }
}
