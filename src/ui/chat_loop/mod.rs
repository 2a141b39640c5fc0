//! Main chat event loop
//!
//! Terminal events and finished queries are turned into [`AppAction`]s,
//! reduced against the [`App`], and the resulting [`AppCommand`]s are
//! executed here. The app has a single writer: this loop.

mod keybindings;
mod lifecycle;

use self::keybindings::map_event;
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use crate::core::app::{apply_actions, App, AppAction, AppCommand, AppInitConfig};
use crate::core::dispatcher::{QueryOutcome, QueryService};
use crate::ui::renderer::ui;
use crate::utils::clipboard::{copy_to_clipboard, ClipboardMethod};
use ratatui::crossterm::event::{self, Event};
use std::{
    error::Error,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Redraw cadence while idle; drives the loading spinner and status expiry.
const TICK: Duration = Duration::from_millis(100);

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

fn execute_command(app: &mut App, service: &QueryService, command: AppCommand) {
    match command {
        AppCommand::SpawnQuery(params) => service.spawn_query(params),
        AppCommand::CopyToClipboard { text, label } => match copy_to_clipboard(&text) {
            Ok(ClipboardMethod::Command(cmd)) => {
                debug!(cmd, "copied through clipboard command");
                app.ui.set_status(format!("Copied {label}"))
            }
            Ok(ClipboardMethod::Osc52) => {
                app.ui.set_status(format!("Copied {label} (terminal clipboard)"))
            }
            Err(err) => {
                warn!(%err, "clipboard copy failed");
                app.ui.set_status(format!("Copy failed: {err}"));
            }
        },
    }
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    service: &QueryService,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    outcome_rx: &mut mpsc::UnboundedReceiver<(QueryOutcome, u64)>,
) -> Result<(), Box<dyn Error>> {
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| ui(f, app))?;

        let mut pending: Vec<AppAction> = Vec::new();
        tokio::select! {
            Some(ev) = event_rx.recv() => {
                pending.extend(map_event(ev));
                // Drain whatever else arrived so a paste burst costs one redraw.
                while let Ok(ev) = event_rx.try_recv() {
                    pending.extend(map_event(ev));
                }
            }
            Some((outcome, request_id)) = outcome_rx.recv() => {
                pending.push(AppAction::QueryFinished { outcome, request_id });
            }
            _ = tick.tick() => {
                app.ui.expire_status(Instant::now());
            }
        }

        for command in apply_actions(app, pending) {
            execute_command(app, service, command);
        }

        if app.ui.exit_requested {
            return Ok(());
        }
    }
}

pub async fn run_chat(init: AppInitConfig) -> Result<(), Box<dyn Error>> {
    info!(base_url = %init.base_url, "starting chat session");
    let mut app = App::new(init);
    let (service, mut outcome_rx) = QueryService::new();

    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let reader = spawn_event_reader(event_tx);

    let result = event_loop(
        &mut terminal,
        &mut app,
        &service,
        &mut event_rx,
        &mut outcome_rx,
    )
    .await;

    reader.abort();
    restore_terminal(&mut terminal)?;
    info!("chat session ended");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    #[tokio::test]
    async fn query_commands_are_dispatched_through_the_service() {
        let mut app = create_test_app_for_unreachable_backend();
        let (service, mut outcome_rx) = QueryService::new();
        app.ui.set_input_text("hello".to_string());

        for command in apply_actions(&mut app, [AppAction::SubmitInput]) {
            execute_command(&mut app, &service, command);
        }

        let (outcome, request_id) = outcome_rx.recv().await.expect("outcome");
        assert!(matches!(outcome, QueryOutcome::Failed));
        assert!(app.complete_query(outcome, request_id));
        assert!(!app.is_pending());
    }

    fn create_test_app_for_unreachable_backend() -> App {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let mut app = create_test_app();
        app.base_url = format!("http://127.0.0.1:{port}");
        app
    }
}
