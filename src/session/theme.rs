//! Light/dark UI mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Light,
    Dark,
}

impl UiMode {
    pub fn flipped(self) -> Self {
        match self {
            UiMode::Light => UiMode::Dark,
            UiMode::Dark => UiMode::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeController {
    mode: UiMode,
}

impl ThemeController {
    pub fn new(mode: UiMode) -> Self {
        Self { mode }
    }

    pub fn current(&self) -> UiMode {
        self.mode
    }

    /// Flip the mode and return the new one.
    pub fn toggle(&mut self) -> UiMode {
        self.mode = self.mode.flipped();
        tracing::debug!(mode = ?self.mode, "theme toggled");
        self.mode
    }

    /// Caption for the toggle button: names the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            UiMode::Light => "Dark Mode",
            UiMode::Dark => "Light Mode",
        }
    }
}
