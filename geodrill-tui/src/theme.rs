//! Parrot/neon theme tokens for the geodrill TUI.
//!
//! Chrome (borders, status, overlays) uses the neon palette on a dark
//! background. Map fills come from the region's color scale instead, see
//! [`region_color`].

use ratatui::style::{Color, Modifier, Style};

use geodrill_core::Rgb;

/// Near-black background.
pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
/// Electric cyan: focus, highlights.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
/// Neon green.
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
/// Hot pink: failures.
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
/// Neon orange.
pub const WARNING: Color = Color::Rgb(255, 140, 0);
/// Cool purple.
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
/// Steel blue: disabled and secondary text.
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Selected row in a list.
pub fn selected_row() -> Style {
    Style::default()
        .fg(BACKGROUND)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// The Back button: bright when usable, dim otherwise.
pub fn back_button(enabled: bool) -> Style {
    if enabled {
        accent_bold()
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    }
}

/// Convert a scale color to a terminal color.
pub fn region_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
