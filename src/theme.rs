//! Theme and styling for terminal output
//!
//! Official Pulumi brand color palette.
//! Brand colors: Yellow, Salmon, Fuchsia, Purple, Violet, Blue
//!
//! Styling is only emitted when the target stream is a terminal and
//! `NO_COLOR` is unset, so piped output stays free of escape codes.

use crossterm::style::{Color, ContentStyle, StyledContent, Stylize};
use std::ffi::OsStr;
use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Official Pulumi brand colors
pub mod brand {
    use crossterm::style::Color;

    /// Pulumi Yellow - #f7bf2a (RGB 247, 191, 42)
    pub const YELLOW: Color = Color::Rgb { r: 247, g: 191, b: 42 };

    /// Pulumi Salmon - #f26e7e (RGB 242, 110, 126)
    pub const SALMON: Color = Color::Rgb { r: 242, g: 110, b: 126 };

    /// Pulumi Purple - #8a3391 (RGB 138, 51, 145)
    pub const PURPLE: Color = Color::Rgb { r: 138, g: 51, b: 145 };

    /// Pulumi Violet - #805ac3 (RGB 128, 90, 195)
    pub const VIOLET: Color = Color::Rgb { r: 128, g: 90, b: 195 };

    /// Pulumi Blue - #4d5bd9 (RGB 77, 91, 217)
    pub const BLUE: Color = Color::Rgb { r: 77, g: 91, b: 217 };
}

/// Pulumi-inspired color palette
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub text_muted: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    /// Whether escape codes are written at all
    pub enabled: bool,
}

/// Decide whether a stream should get colors
pub fn color_enabled(is_terminal: bool, no_color: Option<&OsStr>) -> bool {
    is_terminal && no_color.map_or(true, |v| v.is_empty())
}

impl Theme {
    /// Theme for text written to stdout
    pub fn for_stdout() -> Self {
        Self::for_stream(io::stdout().is_terminal())
    }

    /// Theme for text written to stderr
    pub fn for_stderr() -> Self {
        Self::for_stream(io::stderr().is_terminal())
    }

    fn for_stream(is_terminal: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR");
        Self::with_color(color_enabled(is_terminal, no_color.as_deref()))
    }

    pub fn with_color(enabled: bool) -> Self {
        Self {
            primary: brand::VIOLET,
            accent: brand::YELLOW,
            text_muted: Color::Grey,
            success: Color::Rgb { r: 80, g: 200, b: 120 },
            warning: brand::YELLOW,
            error: brand::SALMON,
            info: brand::BLUE,
            enabled,
        }
    }

    /// Apply a style, or nothing when colors are off
    fn apply<D: Display>(&self, style: ContentStyle, text: D) -> StyledContent<D> {
        if self.enabled {
            style.apply(text)
        } else {
            ContentStyle::new().apply(text)
        }
    }

    fn paint<D: Display>(&self, color: Color, text: D) -> StyledContent<D> {
        self.apply(ContentStyle::new().with(color), text)
    }

    pub fn title<D: Display>(&self, text: D) -> StyledContent<D> {
        self.apply(ContentStyle::new().with(self.primary).bold(), text)
    }

    pub fn key_hint<D: Display>(&self, text: D) -> StyledContent<D> {
        self.paint(self.accent, text)
    }

    pub fn text_muted<D: Display>(&self, text: D) -> StyledContent<D> {
        self.paint(self.text_muted, text)
    }

    pub fn success<D: Display>(&self, text: D) -> StyledContent<D> {
        self.apply(ContentStyle::new().with(self.success).bold(), text)
    }

    pub fn warning<D: Display>(&self, text: D) -> StyledContent<D> {
        self.paint(self.warning, text)
    }

    pub fn error<D: Display>(&self, text: D) -> StyledContent<D> {
        self.apply(ContentStyle::new().with(self.error).bold(), text)
    }

    pub fn info<D: Display>(&self, text: D) -> StyledContent<D> {
        self.paint(self.info, text)
    }

    /// Style for a command name
    pub fn command<D: Display>(&self, text: D) -> StyledContent<D> {
        self.apply(ContentStyle::new().with(brand::PURPLE).bold(), text)
    }
}
