use super::wrap::{pad_to_width, push_styled, wrap_spans};
use crate::ui::theme::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

type TableCell = Vec<Span<'static>>;

/// Collects markdown table events and lays the table out with box-drawing
/// borders once it is complete.
pub(crate) struct TableRenderer {
    rows: Vec<Vec<TableCell>>,
    header_rows: usize,
    current_row: Vec<TableCell>,
    current_cell: TableCell,
}

impl TableRenderer {
    pub(crate) fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            current_row: Vec::new(),
            current_cell: Vec::new(),
        }
    }

    pub(crate) fn end_header(&mut self) {
        if !self.current_row.is_empty() {
            self.rows.push(std::mem::take(&mut self.current_row));
            self.header_rows = self.rows.len();
        }
    }

    pub(crate) fn end_row(&mut self) {
        if !self.current_row.is_empty() {
            self.rows.push(std::mem::take(&mut self.current_row));
        }
    }

    pub(crate) fn start_cell(&mut self) {
        self.current_cell = Vec::new();
    }

    pub(crate) fn end_cell(&mut self) {
        self.current_row.push(std::mem::take(&mut self.current_cell));
    }

    pub(crate) fn push_span(&mut self, span: Span<'static>) {
        self.current_cell.push(span);
    }

    /// Lay the table out within `available` columns (unbounded when `None`).
    pub(crate) fn render(
        &self,
        theme: &Theme,
        available: Option<usize>,
        indent: &[Span<'static>],
    ) -> Vec<Line<'static>> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }

        let mut natural = vec![1usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let w: usize = cell.iter().map(|s| s.content.width()).sum();
                natural[i] = natural[i].max(w);
            }
        }

        let indent_width: usize = indent.iter().map(Span::width).sum();
        let chrome = 3 * columns + 1;
        let widths = match available {
            Some(total) => {
                fit_column_widths(&natural, total.saturating_sub(indent_width + chrome))
            }
            None => natural,
        };

        let border = theme.md_table_border;
        let rule = |left: &str, mid: &str, right: &str| -> Line<'static> {
            let mut spans = indent.to_vec();
            let mut text = String::from(left);
            for (i, w) in widths.iter().enumerate() {
                if i > 0 {
                    text.push_str(mid);
                }
                text.push_str(&"─".repeat(w + 2));
            }
            text.push_str(right);
            spans.push(Span::styled(text, border));
            Line::from(spans)
        };

        let mut out = vec![rule("┌", "┬", "┐")];
        for (row_idx, row) in self.rows.iter().enumerate() {
            let is_header = row_idx < self.header_rows;
            let wrapped: Vec<Vec<Line<'static>>> = (0..columns)
                .map(|i| {
                    let cell: TableCell = row
                        .get(i)
                        .map(|cell| {
                            if is_header {
                                cell.iter()
                                    .map(|s| s.clone().patch_style(theme.md_table_header))
                                    .collect()
                            } else {
                                cell.clone()
                            }
                        })
                        .unwrap_or_default();
                    wrap_spans(&cell, Some(widths[i]), &[], &[])
                })
                .collect();
            let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

            for line_idx in 0..height {
                let mut spans = indent.to_vec();
                push_styled(&mut spans, "│ ", border);
                for (i, cell_lines) in wrapped.iter().enumerate() {
                    if i > 0 {
                        push_styled(&mut spans, " │ ", border);
                    }
                    let mut cell_spans = cell_lines
                        .get(line_idx)
                        .map(|l| l.spans.clone())
                        .unwrap_or_default();
                    pad_to_width(&mut cell_spans, widths[i], Style::default());
                    spans.extend(cell_spans);
                }
                push_styled(&mut spans, " │", border);
                out.push(Line::from(spans));
            }

            if is_header && row_idx + 1 == self.header_rows && self.rows.len() > self.header_rows
            {
                out.push(rule("├", "┼", "┤"));
            }
        }
        out.push(rule("└", "┴", "┘"));
        out
    }
}

/// Shrink column widths to fit `available` columns.
///
/// Narrow columns keep their natural width; the remaining space is shared
/// evenly among the wider ones. Every column keeps at least one cell.
pub(crate) fn fit_column_widths(natural: &[usize], available: usize) -> Vec<usize> {
    if natural.iter().sum::<usize>() <= available {
        return natural.to_vec();
    }
    let mut order: Vec<usize> = (0..natural.len()).collect();
    order.sort_by_key(|&i| natural[i]);

    let mut widths = vec![1usize; natural.len()];
    let mut remaining = available;
    for (placed, &i) in order.iter().enumerate() {
        let left = natural.len() - placed;
        let share = (remaining / left).max(1);
        let w = natural[i].min(share);
        widths[i] = w;
        remaining = remaining.saturating_sub(w);
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_that_fit_keep_their_width() {
        assert_eq!(fit_column_widths(&[3, 5, 2], 20), vec![3, 5, 2]);
    }

    #[test]
    fn wide_columns_share_the_leftover_space() {
        assert_eq!(fit_column_widths(&[2, 30, 40], 22), vec![2, 10, 10]);
    }

    #[test]
    fn every_column_keeps_one_cell() {
        assert_eq!(fit_column_widths(&[5, 5, 5], 0), vec![1, 1, 1]);
    }

    fn sample_table() -> TableRenderer {
        let mut table = TableRenderer::new();
        for text in ["Name", "Role"] {
            table.start_cell();
            table.push_span(Span::raw(text));
            table.end_cell();
        }
        table.end_header();
        for text in ["Ada", "engineer"] {
            table.start_cell();
            table.push_span(Span::raw(text));
            table.end_cell();
        }
        table.end_row();
        table
    }

    #[test]
    fn renders_borders_and_header_separator() {
        let theme = Theme::dark_default();
        let lines: Vec<String> = sample_table()
            .render(&theme, None, &[])
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            lines,
            [
                "┌──────┬──────────┐",
                "│ Name │ Role     │",
                "├──────┼──────────┤",
                "│ Ada  │ engineer │",
                "└──────┴──────────┘",
            ]
        );
    }

    #[test]
    fn narrow_tables_wrap_cells() {
        let theme = Theme::dark_default();
        let lines = sample_table().render(&theme, Some(14), &[]);
        assert!(lines.iter().all(|l| l.width() <= 14), "{lines:?}");
        assert!(lines.len() > 5);
    }
}
