use crate::core::app::{App, SUGGESTIONS};
use crate::ui::sidebar::{render_sidebar, SIDEBAR_MIN_TERMINAL_WIDTH, SIDEBAR_WIDTH};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MAX_INPUT_LINES: u16 = 6;
pub const EMPTY_STATE_TITLE: &str = "What can I help with?";

/// Split the frame into (sidebar, transcript, input) areas.
pub fn frame_areas(
    area: Rect,
    sidebar_enabled: bool,
    input_lines: u16,
) -> (Option<Rect>, Rect, Rect) {
    let (sidebar, main) = if sidebar_enabled && area.width >= SIDEBAR_MIN_TERMINAL_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        (Some(cols[0]), cols[1])
    } else {
        (None, area)
    };

    let input_height = input_lines.clamp(1, MAX_INPUT_LINES) + 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(input_height)])
        .split(main);
    (sidebar, rows[0], rows[1])
}

fn title_line(app: &App, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" copilot-chat ", theme.title_style),
        Span::styled(format!("· {} ", app.base_url), theme.title_style),
    ];
    if let Some(status) = &app.ui.status {
        spans.push(Span::styled(format!("· {status} "), theme.status_style));
    }
    Line::from(spans)
}

fn empty_state_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(EMPTY_STATE_TITLE, theme.empty_title_style)),
        Line::default(),
    ];
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("F{} ", i + 1), theme.suggestion_key_style),
            Span::styled(*suggestion, theme.suggestion_style),
        ]));
    }
    lines
}

fn render_empty_state(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = empty_state_lines(theme);
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect {
        y: top,
        height: height.min(area.height),
        ..area
    };
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

fn render_transcript(f: &mut Frame, area: Rect, app: &mut App) {
    let width = area.width.max(1);
    let height = area.height;
    app.ui.transcript_size = (width, height);

    let max_offset = app.max_scroll_offset();
    if app.ui.auto_scroll {
        app.ui.scroll_offset = max_offset;
    } else {
        app.ui.scroll_offset = app.ui.scroll_offset.min(max_offset);
    }
    let offset = app.ui.scroll_offset as usize;

    let layout = app.layout(width as usize);
    let end = (offset + height as usize).min(layout.lines.len());
    let visible = layout.lines.get(offset..end).unwrap_or_default().to_vec();
    f.render_widget(Paragraph::new(visible), area);
}

fn input_title(app: &App) -> String {
    if app.is_pending() {
        format!(" {} Waiting for a response... ", app.ui.loading_frame())
    } else {
        " Message (Enter send · Alt+Enter newline · Ctrl+N new chat · Ctrl+C quit) ".to_string()
    }
}

/// Draw one frame. Takes `&mut App` because the transcript layout cache and
/// scroll position are refreshed while drawing.
pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.ui.theme.clone();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let input_lines = app.ui.input_line_count().min(u16::MAX as usize) as u16;
    let (sidebar, transcript, input) = frame_areas(area, app.ui.sidebar_enabled, input_lines);

    if let Some(sidebar) = sidebar {
        render_sidebar(f, sidebar, &theme);
    }

    let transcript_block = Block::default().title(title_line(app, &theme));
    let transcript_inner = transcript_block.inner(transcript);
    f.render_widget(transcript_block, transcript);
    if app.conversation.is_empty() {
        app.ui.transcript_size = (transcript_inner.width, transcript_inner.height);
        render_empty_state(f, transcript_inner, &theme);
    } else {
        render_transcript(f, transcript_inner, app);
    }

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(input_title(app), theme.input_title_style));
    let input_inner = input_block.inner(input);
    f.render_widget(input_block, input);
    f.render_widget(app.ui.textarea(), input_inner);
}
