/// Hanging indents beyond this are clamped so deep nesting stays readable.
pub(super) const MAX_LIST_HANGING_INDENT_WIDTH: usize = 24;

#[derive(Clone, Debug)]
pub(super) enum ListKind {
    Unordered,
    Ordered(u64),
}

impl ListKind {
    pub(super) fn from_start(start: Option<u64>) -> Self {
        match start {
            Some(n) => ListKind::Ordered(n),
            None => ListKind::Unordered,
        }
    }

    /// Marker for the next item; ordered lists advance their counter.
    pub(super) fn next_marker(&mut self, depth: usize) -> String {
        match self {
            ListKind::Unordered => match depth {
                0 | 1 => "• ".to_string(),
                2 => "◦ ".to_string(),
                _ => "▪ ".to_string(),
            },
            ListKind::Ordered(n) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_lists_count_from_their_start() {
        let mut kind = ListKind::from_start(Some(4));
        assert_eq!(kind.next_marker(1), "4. ");
        assert_eq!(kind.next_marker(1), "5. ");
    }

    #[test]
    fn bullets_vary_with_depth() {
        let mut kind = ListKind::from_start(None);
        assert_eq!(kind.next_marker(1), "• ");
        assert_eq!(kind.next_marker(2), "◦ ");
        assert_eq!(kind.next_marker(5), "▪ ");
    }
}
