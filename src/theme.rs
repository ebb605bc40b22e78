//! Theme support for the TUI.
//!
//! Semantic color roles mapped to ratatui `Style` values. `ThemeVariant`
//! selects between the Dark and Light palettes and can be cycled at runtime.

use ratatui::style::{Color, Modifier, Style};

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from the config file (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant, wrapping from Light back to Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

/// A complete palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Table --
    pub table_header: Style,
    /// Header cell of the active (cursor) column.
    pub table_header_active: Style,
    pub table_row: Style,
    pub table_row_selected: Style,
    /// Dimmed text: empty-table placeholder, dialog key hints.
    pub table_dim: Style,
    /// Marker on headers that carry an active filter.
    pub filter_marker: Style,

    // -- Chrome --
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub info_bar: Style,
    pub status_bar: Style,

    // -- Dialogs --
    pub dialog_text: Style,
    pub dialog_label: Style,
    pub dialog_field: Style,
    pub dialog_field_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            table_header: Style::default().add_modifier(Modifier::BOLD),
            table_header_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default(),
            table_row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            table_dim: Style::default().fg(Color::DarkGray),
            filter_marker: Style::default().fg(Color::Yellow),

            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            info_bar: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),

            dialog_text: Style::default(),
            dialog_label: Style::default().fg(Color::Cyan),
            dialog_field: Style::default().fg(Color::Gray),
            dialog_field_focused: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            table_header: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            table_header_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_selected: Style::default().bg(Color::Gray).fg(Color::Black),
            table_dim: Style::default().fg(Color::Gray),
            filter_marker: Style::default().fg(Color::Magenta),

            panel_border: Style::default().fg(Color::Black),
            panel_border_focused: Style::default().fg(Color::Blue),
            info_bar: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),

            dialog_text: Style::default().fg(Color::Black),
            dialog_label: Style::default().fg(Color::Blue),
            dialog_field: Style::default().fg(Color::DarkGray),
            dialog_field_focused: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}
