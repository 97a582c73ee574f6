//! Terminal color utilities for prompts, banners and help output.
//!
//! Provides ANSI color codes and a [`Painter`] that is handed to prompt and
//! banner producers so user-supplied display strings follow the command's
//! colour setting.

use std::io::IsTerminal;

use crate::types::ColorMode;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

/// Turns bold/dim off without resetting the foreground colour.
pub const NORMAL_INTENSITY: &str = "\x1b[22m";

// ============================================================================
// Color State
// ============================================================================

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    /// A painter that never emits escape codes.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn red(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    pub fn green(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    pub fn blue(&self, s: &str) -> String {
        self.wrap(s, BLUE)
    }

    pub fn magenta(&self, s: &str) -> String {
        self.wrap(s, MAGENTA)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    /// Bold text closed with the normal-intensity code, so a surrounding
    /// colour survives.
    pub fn bold(&self, s: &str) -> String {
        self.wrap_with(s, BOLD, NORMAL_INTENSITY)
    }

    // === Raw color access ===

    pub fn wrap(&self, s: &str, code: &str) -> String {
        self.wrap_with(s, code, RESET)
    }

    pub fn wrap_with(&self, s: &str, open: &str, close: &str) -> String {
        if self.enabled {
            format!("{open}{s}{close}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::plain()
    }
}
