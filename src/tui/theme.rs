//! Theme definitions for the TUI
//!
//! Dark and light variants. The default is "dark"; "light" can be selected
//! via the config file or `HIRRD_THEME`.

use ratatui::style::Color;

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    /// Brand accent: loading bars, active page, header links
    pub accent: Color,
    pub error: Color,
    pub warn: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,

    /// Job card states
    pub open: Color,
    pub closed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            accent: Color::Rgb(54, 215, 183), // #36d7b7
            error: Color::Rgb(255, 80, 80),
            warn: Color::Rgb(255, 180, 0),

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,

            open: Color::Rgb(0, 200, 0),
            closed: Color::Rgb(255, 80, 80),
        }
    }

    /// Create a light theme
    /// Darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            muted: Color::Rgb(90, 90, 90),
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            accent: Color::Rgb(0, 140, 120),
            error: Color::Rgb(200, 0, 0),
            warn: Color::Rgb(200, 120, 0),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,

            open: Color::Rgb(0, 140, 0),
            closed: Color::Rgb(200, 0, 0),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::parse(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Color for a job's open/closed badge
    pub fn job_status_color(&self, is_open: bool) -> Color {
        if is_open { self.open } else { self.closed }
    }
}
