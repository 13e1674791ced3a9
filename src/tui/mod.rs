//! Terminal front-end for the circular form — ratatui presentation layer.
//!
//! ## Architecture (TEA)
//!
//! Model (`FormApp`) + Update (message handler) + View (render).
//! Immediate mode, no retained widget state. The view reads the form
//! session; only update mutates it.

pub mod app;
pub mod date_picker;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
