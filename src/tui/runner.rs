//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, spawns the input reader, runs main TEA loop, and hands
//! accepted snapshots to the submitter on a separate task so the form stays
//! responsive while the endpoint works.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::config::AppConfig;
use crate::submit::Submitter;

use super::app::FormApp;
use super::event::{spawn_input_reader, AppMessage};
use super::layout;

/// Send the app's pending snapshot, if any, to the submitter.
///
/// The result comes back as `AppMessage::SubmitFinished` on `tx`. If the
/// receiver is gone by then (session ended) the result is dropped.
pub fn dispatch_pending(
    app: &mut FormApp,
    submitter: &Arc<dyn Submitter>,
    tx: &UnboundedSender<AppMessage>,
) -> Option<JoinHandle<()>> {
    let snapshot = app.pending_submit.take()?;
    let submitter = Arc::clone(submitter);
    let tx = tx.clone();
    Some(tokio::spawn(async move {
        let result = submitter.submit(&snapshot).await;
        let _ = tx.send(AppMessage::SubmitFinished(result));
    }))
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(config: &AppConfig, submitter: Arc<dyn Submitter>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = FormApp::new(config.theme);
    app.endpoint = config.endpoint.clone();
    tracing::info!(session = %app.session.id(), "form session opened");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = spawn_input_reader(tx.clone());
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    let result: anyhow::Result<()> = async {
        loop {
            tokio::select! {
                _ = render_interval.tick() => {
                    terminal.draw(|f| layout::draw(f, &app))?;
                }
                Some(msg) = rx.recv() => {
                    app.update(msg);
                }
            }

            dispatch_pending(&mut app, &submitter, &tx);

            if app.should_quit {
                break;
            }
        }
        Ok(())
    }
    .await;

    if app.session.is_submitting() {
        tracing::warn!(session = %app.session.id(), "quitting with a submission outstanding; its result is discarded");
    }

    // Stop the input reader, then restore terminal
    drop(rx);
    let _ = reader.await;
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
