//! Width-aware wrapping of styled spans.
//!
//! Everything in the transcript is pre-wrapped here so that the number of
//! rendered lines is known up front and scrolling math stays exact.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(Span::width).sum()
}

/// Append `text` to `line`, merging into the last span when styles match.
pub(crate) fn push_styled(line: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = line.last_mut() {
        if last.style == style {
            last.content.to_mut().push_str(text);
            return;
        }
    }
    line.push(Span::styled(text.to_string(), style));
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_runs(s: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (idx, ch) in s.char_indices() {
        let is_space = ch.is_whitespace();
        match current {
            Some(kind) if kind == is_space => {}
            Some(kind) => {
                runs.push((kind, &s[start..idx]));
                start = idx;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(kind) = current {
        runs.push((kind, &s[start..]));
    }
    runs
}

/// Split `word` so the head fits in `max_width` columns; the head always
/// holds at least one character.
fn split_at_width(word: &str, max_width: usize) -> (&str, &str) {
    let mut used = 0;
    let mut cut = 0;
    for (idx, ch) in word.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width && cut > 0 {
            break;
        }
        used += w;
        cut = idx + ch.len_utf8();
    }
    word.split_at(cut)
}

struct LineBuilder<'p> {
    out: Vec<Line<'static>>,
    line: Vec<Span<'static>>,
    used: usize,
    has_content: bool,
    pending_space: Option<(String, Style)>,
    cont_prefix: &'p [Span<'static>],
    cont_width: usize,
}

impl<'p> LineBuilder<'p> {
    fn break_line(&mut self) {
        let finished = std::mem::replace(&mut self.line, self.cont_prefix.to_vec());
        self.out.push(Line::from(finished));
        self.used = self.cont_width;
        self.has_content = false;
        self.pending_space = None;
    }

    fn place(&mut self, text: &str, style: Style, width: usize) {
        if let Some((space, space_style)) = self.pending_space.take() {
            push_styled(&mut self.line, &space, space_style);
        }
        push_styled(&mut self.line, text, style);
        self.used += width;
        self.has_content = true;
    }
}

/// Wrap `spans` into lines of at most `width` columns.
///
/// `first_prefix` starts the first line and `cont_prefix` every following
/// one (list markers, quote bars, the `You: ` label). Without a width the
/// spans are emitted as one line behind `first_prefix`.
pub(crate) fn wrap_spans(
    spans: &[Span<'static>],
    width: Option<usize>,
    first_prefix: &[Span<'static>],
    cont_prefix: &[Span<'static>],
) -> Vec<Line<'static>> {
    let Some(width) = width else {
        let mut line = first_prefix.to_vec();
        for span in spans {
            push_styled(&mut line, &span.content, span.style);
        }
        return vec![Line::from(line)];
    };

    let mut b = LineBuilder {
        out: Vec::new(),
        line: first_prefix.to_vec(),
        used: spans_width(first_prefix),
        has_content: false,
        pending_space: None,
        cont_prefix,
        cont_width: spans_width(cont_prefix),
    };

    for span in spans {
        for (is_space, run) in split_runs(&span.content) {
            if is_space {
                if b.has_content {
                    b.pending_space = Some((run.to_string(), span.style));
                }
                continue;
            }

            let mut word = run;
            while !word.is_empty() {
                let pending = b
                    .pending_space
                    .as_ref()
                    .map(|(s, _)| UnicodeWidthStr::width(s.as_str()))
                    .unwrap_or(0);
                let w = UnicodeWidthStr::width(word);
                if b.used + pending + w <= width {
                    b.place(word, span.style, pending + w);
                    break;
                }
                if b.has_content {
                    b.break_line();
                    continue;
                }
                let avail = width.saturating_sub(b.used).max(1);
                let (head, tail) = split_at_width(word, avail);
                let head_width = UnicodeWidthStr::width(head);
                b.place(head, span.style, head_width);
                word = tail;
                if !word.is_empty() {
                    b.break_line();
                }
            }
        }
    }

    if b.has_content || b.out.is_empty() {
        b.out.push(Line::from(b.line));
    }
    b.out
}

/// Pad `line` with spaces in `style` until it is `width` columns wide.
pub(crate) fn pad_to_width(line: &mut Vec<Span<'static>>, width: usize, style: Style) {
    let current = spans_width(line);
    if current < width {
        push_styled(line, &" ".repeat(width - current), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn texts(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn wraps_on_word_boundaries_without_trailing_spaces() {
        let spans = vec![Span::raw("the quick brown fox jumps")];
        let lines = wrap_spans(&spans, Some(10), &[], &[]);
        assert_eq!(texts(&lines), ["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn prefixes_apply_to_first_and_continuation_lines() {
        let spans = vec![Span::raw("alpha beta gamma")];
        let first = vec![Span::raw("- ")];
        let cont = vec![Span::raw("  ")];
        let lines = wrap_spans(&spans, Some(12), &first, &cont);
        assert_eq!(texts(&lines), ["- alpha beta", "  gamma"]);
    }

    #[test]
    fn long_words_are_split_by_character() {
        let spans = vec![Span::raw("abcdefghij")];
        let lines = wrap_spans(&spans, Some(4), &[], &[]);
        assert_eq!(texts(&lines), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn styles_survive_wrapping() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let spans = vec![Span::raw("plain "), Span::styled("bold words", bold)];
        let lines = wrap_spans(&spans, Some(11), &[], &[]);
        assert_eq!(texts(&lines), ["plain bold", "words"]);
        assert_eq!(lines[1].spans[0].style, bold);
    }

    #[test]
    fn wide_characters_count_double() {
        let spans = vec![Span::raw("日本語 テキスト")];
        let lines = wrap_spans(&spans, Some(7), &[], &[]);
        assert_eq!(texts(&lines), ["日本語", "テキス", "ト"]);
    }

    #[test]
    fn no_width_keeps_a_single_line() {
        let spans = vec![Span::raw("one two three")];
        let lines = wrap_spans(&spans, None, &[Span::raw("> ")], &[]);
        assert_eq!(texts(&lines), ["> one two three"]);
    }

    #[test]
    fn empty_input_still_yields_the_prefix_line() {
        let lines = wrap_spans(&[], Some(10), &[Span::raw("You: ")], &[]);
        assert_eq!(texts(&lines), ["You: "]);
    }
}
