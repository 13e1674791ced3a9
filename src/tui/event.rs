//! Messages that drive the TUI update loop.
//!
//! A blocking reader thread forwards crossterm key events, and spawned
//! submission tasks report their result, through one mpsc channel.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::submit::{SubmitError, SubmitReceipt};

#[derive(Debug)]
pub enum AppMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// The endpoint answered (or failed) for the in-flight submission.
    SubmitFinished(Result<SubmitReceipt, SubmitError>),
    /// Quit the TUI.
    Quit,
}

/// Forward key presses into `tx` until the receiver is dropped.
///
/// A terminal error ends the reader and asks the app to quit.
pub fn spawn_input_reader(tx: UnboundedSender<AppMessage>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!("input poll failed: {e}");
                    let _ = tx.send(AppMessage::Quit);
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppMessage::Input(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("input read failed: {e}");
                    let _ = tx.send(AppMessage::Quit);
                    break;
                }
            }
        }
    })
}
