//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! `ThemeVariant` selects between Dark and Light palettes and `StyleMap`
//! resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
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

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Cat list --
    pub list_normal: Style,
    pub list_selected: Style,
    pub list_empty: Style,

    // -- Details panel --
    pub detail_label: Style,
    pub detail_value: Style,
    pub detail_link: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_error: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    // -- Help overlay --
    pub help_heading: Style,
    pub help_body: Style,
    pub help_hint: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            list_normal: Style::default(),
            list_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            list_empty: Style::default().fg(Color::DarkGray),

            detail_label: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_value: Style::default(),
            detail_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default().bg(Color::DarkGray).fg(Color::LightRed),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),

            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default(),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            list_normal: Style::default().fg(Color::Black),
            list_selected: Style::default().bg(Color::Blue).fg(Color::White),
            list_empty: Style::default().fg(Color::DarkGray),

            detail_label: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_value: Style::default().fg(Color::Black),
            detail_link: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::UNDERLINED),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default().bg(Color::White).fg(Color::Red),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),

            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default().fg(Color::Black),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 13] = [
    "list_normal",
    "list_selected",
    "list_empty",
    "detail_label",
    "detail_value",
    "detail_link",
    "status_bar",
    "status_error",
    "panel_border",
    "panel_border_focused",
    "help_heading",
    "help_body",
    "help_hint",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 13] = [
            p.list_normal,
            p.list_selected,
            p.list_empty,
            p.detail_label,
            p.detail_value,
            p.detail_link,
            p.status_bar,
            p.status_error,
            p.panel_border,
            p.panel_border_focused,
            p.help_heading,
            p.help_body,
            p.help_hint,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
