use tracing::debug;
use tui_textarea::Input;

use super::App;
use crate::core::dispatcher::{QueryOutcome, QueryParams};

pub enum AppAction {
    /// Raw key input for the input box.
    Textarea(Input),
    InsertNewline,
    /// Bracketed paste; inserted verbatim, newlines included.
    Paste {
        text: String,
    },
    SubmitInput,
    QueryFinished {
        outcome: QueryOutcome,
        request_id: u64,
    },
    NewConversation,
    ApplySuggestion {
        index: usize,
    },
    CopyCodeBlock {
        number: usize,
    },
    CopyLastCodeBlock,
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    Quit,
}

/// Side effects the event loop performs on the reducer's behalf.
pub enum AppCommand {
    SpawnQuery(QueryParams),
    CopyToClipboard { text: String, label: String },
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    actions
        .into_iter()
        .filter_map(|action| apply_action(app, action))
        .collect()
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::Textarea(input) => {
            app.ui.apply_textarea_edit(|textarea| {
                textarea.input(input);
            });
            None
        }
        AppAction::InsertNewline => {
            app.ui.apply_textarea_edit(|textarea| textarea.insert_newline());
            None
        }
        AppAction::Paste { text } => {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            app.ui.apply_textarea_edit(|textarea| {
                textarea.insert_str(text);
            });
            None
        }
        AppAction::SubmitInput => app.submit_input().map(AppCommand::SpawnQuery),
        AppAction::QueryFinished {
            outcome,
            request_id,
        } => {
            app.complete_query(outcome, request_id);
            None
        }
        AppAction::NewConversation => {
            app.new_conversation();
            None
        }
        AppAction::ApplySuggestion { index } => {
            if !app.conversation.is_empty() {
                debug!(index, "suggestions are only offered on an empty conversation");
            } else {
                app.apply_suggestion(index);
            }
            None
        }
        AppAction::CopyCodeBlock { number } => match app.code_block(number) {
            Some(block) => {
                app.reveal_code_block(&block);
                Some(AppCommand::CopyToClipboard {
                    text: block.content,
                    label: format!("code block {number}"),
                })
            }
            None => {
                app.ui.set_status(format!("No code block {number}"));
                None
            }
        },
        AppAction::CopyLastCodeBlock => match app.last_code_block() {
            Some(block) => {
                app.reveal_code_block(&block);
                Some(AppCommand::CopyToClipboard {
                    text: block.content,
                    label: format!("code block {}", block.number),
                })
            }
            None => {
                app.ui.set_status("No code blocks to copy");
                None
            }
        },
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            let max = app.max_scroll_offset();
            app.ui.scroll_down(lines, max);
            None
        }
        AppAction::PageUp => {
            let step = app.ui.page_step();
            app.ui.scroll_up(step);
            None
        }
        AppAction::PageDown => {
            let step = app.ui.page_step();
            let max = app.max_scroll_offset();
            app.ui.scroll_down(step, max);
            None
        }
        AppAction::ScrollToTop => {
            app.ui.scroll_to_top();
            None
        }
        AppAction::ScrollToBottom => {
            let max = app.max_scroll_offset();
            app.ui.scroll_to_bottom(max);
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
    }
}
