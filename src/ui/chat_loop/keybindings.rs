//! Translation of terminal events into reducer actions.

use crate::core::app::AppAction;
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tui_textarea::Input as TAInput;

const WHEEL_LINES: u16 = 3;

/// Map one terminal event to an action. `None` means the event is ignored.
pub fn map_event(event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Paste(text) => Some(AppAction::Paste { text }),
        _ => None,
    }
}

pub fn map_key(key: KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let action = match key.code {
        KeyCode::Char('c') if ctrl => AppAction::Quit,
        KeyCode::Char('n') if ctrl => AppAction::NewConversation,
        KeyCode::Char('y') if ctrl => AppAction::CopyLastCodeBlock,
        KeyCode::Char(d @ '1'..='9') if alt => AppAction::CopyCodeBlock {
            number: d as usize - '0' as usize,
        },
        KeyCode::Enter if alt || shift => AppAction::InsertNewline,
        KeyCode::Enter => AppAction::SubmitInput,
        KeyCode::F(n @ 1..=4) => AppAction::ApplySuggestion {
            index: usize::from(n - 1),
        },
        // Shift+Up/Down move the cursor inside a multi-line draft.
        KeyCode::Up | KeyCode::Down if shift => {
            let plain = KeyEvent::new(key.code, KeyModifiers::NONE);
            AppAction::Textarea(TAInput::from(plain))
        }
        KeyCode::Up => AppAction::ScrollUp { lines: 1 },
        KeyCode::Down => AppAction::ScrollDown { lines: 1 },
        KeyCode::PageUp => AppAction::PageUp,
        KeyCode::PageDown => AppAction::PageDown,
        KeyCode::Home if ctrl || key.modifiers.is_empty() => AppAction::ScrollToTop,
        KeyCode::End if ctrl || key.modifiers.is_empty() => AppAction::ScrollToBottom,
        _ => AppAction::Textarea(TAInput::from(key)),
    };
    Some(action)
}

fn map_mouse(mouse: MouseEvent) -> Option<AppAction> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp { lines: WHEEL_LINES }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown { lines: WHEEL_LINES }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<AppAction> {
        map_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn enter_submits_and_modified_enter_inserts_a_newline() {
        assert!(matches!(
            key(KeyCode::Enter, KeyModifiers::NONE),
            Some(AppAction::SubmitInput)
        ));
        assert!(matches!(
            key(KeyCode::Enter, KeyModifiers::ALT),
            Some(AppAction::InsertNewline)
        ));
        assert!(matches!(
            key(KeyCode::Enter, KeyModifiers::SHIFT),
            Some(AppAction::InsertNewline)
        ));
    }

    #[test]
    fn control_shortcuts() {
        assert!(matches!(
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            key(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Some(AppAction::NewConversation)
        ));
        assert!(matches!(
            key(KeyCode::Char('y'), KeyModifiers::CONTROL),
            Some(AppAction::CopyLastCodeBlock)
        ));
    }

    #[test]
    fn alt_digits_copy_numbered_blocks() {
        assert!(matches!(
            key(KeyCode::Char('3'), KeyModifiers::ALT),
            Some(AppAction::CopyCodeBlock { number: 3 })
        ));
        assert!(matches!(
            key(KeyCode::Char('3'), KeyModifiers::NONE),
            Some(AppAction::Textarea(_))
        ));
    }

    #[test]
    fn function_keys_pick_suggestions() {
        assert!(matches!(
            key(KeyCode::F(1), KeyModifiers::NONE),
            Some(AppAction::ApplySuggestion { index: 0 })
        ));
        assert!(matches!(
            key(KeyCode::F(4), KeyModifiers::NONE),
            Some(AppAction::ApplySuggestion { index: 3 })
        ));
        assert!(matches!(
            key(KeyCode::F(5), KeyModifiers::NONE),
            Some(AppAction::Textarea(_))
        ));
    }

    #[test]
    fn navigation_keys_scroll() {
        assert!(matches!(
            key(KeyCode::Up, KeyModifiers::NONE),
            Some(AppAction::ScrollUp { lines: 1 })
        ));
        assert!(matches!(
            key(KeyCode::PageDown, KeyModifiers::NONE),
            Some(AppAction::PageDown)
        ));
        assert!(matches!(
            key(KeyCode::Home, KeyModifiers::NONE),
            Some(AppAction::ScrollToTop)
        ));
        assert!(matches!(
            key(KeyCode::Up, KeyModifiers::SHIFT),
            Some(AppAction::Textarea(_))
        ));
    }

    #[test]
    fn release_events_and_wheel() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(map_event(Event::Key(release)).is_none());

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(
            map_event(Event::Mouse(wheel)),
            Some(AppAction::ScrollDown { lines: 3 })
        ));
        assert!(matches!(
            map_event(Event::Paste("a\nb".into())),
            Some(AppAction::Paste { .. })
        ));
    }
}
