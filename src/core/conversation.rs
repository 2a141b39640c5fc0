//! Conversation state: the ordered message list plus the pending flag.

use crate::api::HistoryEntry;
use crate::core::message::Message;

#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swap the last message for `message` and return the one it replaced.
    /// An empty conversation simply receives `message`.
    pub fn replace_last(&mut self, message: Message) -> Option<Message> {
        match self.messages.last_mut() {
            Some(last) => Some(std::mem::replace(last, message)),
            None => {
                self.messages.push(message);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending = false;
    }

    /// Prior exchanges in display order, without any loading placeholder.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .filter(|m| !m.is_loading)
            .map(HistoryEntry::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Sender, LOADING_TEXT};

    #[test]
    fn push_preserves_insertion_order() {
        let mut conv = Conversation::new();
        conv.push(Message::user("one"));
        conv.push(Message::bot("two"));
        conv.push(Message::user("three"));
        let texts: Vec<&str> = conv.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn replace_last_swaps_placeholder() {
        let mut conv = Conversation::new();
        conv.push(Message::user("q"));
        conv.push(Message::loading());

        let replaced = conv.replace_last(Message::bot("a")).expect("had a last message");
        assert!(replaced.is_loading);
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[1].text, "a");
        assert!(conv.history().iter().all(|entry| entry.text != LOADING_TEXT));
    }

    #[test]
    fn replace_last_on_empty_appends() {
        let mut conv = Conversation::new();
        assert!(conv.replace_last(Message::bot("late")).is_none());
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn clear_resets_messages_and_pending() {
        let mut conv = Conversation::new();
        conv.push(Message::user("q"));
        conv.set_pending(true);
        conv.clear();
        assert!(conv.is_empty());
        assert!(!conv.is_pending());
    }

    #[test]
    fn history_skips_loading_placeholder() {
        let mut conv = Conversation::new();
        conv.push(Message::user("q"));
        conv.push(Message::loading());
        let history = conv.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "q");
        assert_eq!(history[0].sender, Sender::User);
    }
}
