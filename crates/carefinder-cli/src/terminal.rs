//! Terminal styling and color detection.

use std::io::IsTerminal;

/// ANSI escape codes used by the CLI.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for area names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for footers and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for facility markers.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
        }
    }

    /// `colored()` when stdout is a color-capable terminal, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether colored output should be written to stdout.
///
/// Piped output is never colored.
#[must_use]
pub fn supports_color() -> bool {
    color_allowed_by_env() && std::io::stdout().is_terminal()
}

/// Check the `NO_COLOR` (https://no-color.org/) and `TERM=dumb` conventions.
#[must_use]
pub fn color_allowed_by_env() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
