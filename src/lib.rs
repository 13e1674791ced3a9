//! GenCircular — form state and validation engine for official circulars.
//!
//! A single form session holds the circular's fields, derives counters,
//! validates recipients, renders a read-only preview and gates submission
//! to an external generation endpoint. The TUI and the headless `fill`
//! command are thin layers over the same session.

pub mod config;
pub mod form;
pub mod headless;
pub mod markup;
pub mod preview;
pub mod session;
pub mod submit;
pub mod tui;
pub mod validate;
