use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the config. Only the first call has effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.clone().into_theme());
}

/// Get the active theme, falling back to the default one.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub reminder: Style,
    pub alert: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            reminder: Style::default().fg(Color::Green),
            alert: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        let bg = Color::Rgb(68, 71, 90);
        let fg = Color::Rgb(248, 248, 242);
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(bg),
            status: Style::default().fg(fg).bg(bg),
            highlight: Style::default().bg(bg).add_modifier(Modifier::BOLD),
            reminder: Style::default().fg(Color::Rgb(80, 250, 123)),
            alert: Style::default().fg(Color::Rgb(255, 184, 108)).add_modifier(Modifier::BOLD),
            error: Style::default().fg(fg).bg(Color::Rgb(255, 85, 85)),
        }
    }

    fn gruvbox() -> Self {
        let bg = Color::Rgb(80, 73, 69);
        let fg = Color::Rgb(235, 219, 178);
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default().fg(fg).bg(bg),
            highlight: Style::default().bg(bg).add_modifier(Modifier::BOLD),
            reminder: Style::default().fg(Color::Rgb(184, 187, 38)),
            alert: Style::default().fg(Color::Rgb(254, 128, 25)).add_modifier(Modifier::BOLD),
            error: Style::default().fg(fg).bg(Color::Rgb(204, 36, 29)),
        }
    }

    fn nord() -> Self {
        let bg = Color::Rgb(67, 76, 94);
        let fg = Color::Rgb(229, 233, 240);
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(bg),
            status: Style::default().fg(fg).bg(bg),
            highlight: Style::default().bg(bg).add_modifier(Modifier::BOLD),
            reminder: Style::default().fg(Color::Rgb(163, 190, 140)),
            alert: Style::default().fg(Color::Rgb(208, 135, 112)).add_modifier(Modifier::BOLD),
            error: Style::default().fg(fg).bg(Color::Rgb(191, 97, 106)),
        }
    }
}

// ── [theme] section of config.toml ──

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub reminder_fg: Option<String>,
    pub alert_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        set_fg(&mut theme.today, &self.today_fg);
        set_bg(&mut theme.today, &self.today_bg);
        set_fg(&mut theme.selected, &self.selected_fg);
        set_bg(&mut theme.selected, &self.selected_bg);
        set_fg(&mut theme.header, &self.header_fg);
        set_fg(&mut theme.dim, &self.dim_fg);
        set_fg(&mut theme.border, &self.border_fg);
        set_fg(&mut theme.status, &self.status_fg);
        set_bg(&mut theme.status, &self.status_bg);
        set_fg(&mut theme.reminder, &self.reminder_fg);
        set_fg(&mut theme.alert, &self.alert_fg);

        theme
    }
}

fn set_fg(style: &mut Style, value: &Option<String>) {
    if let Some(c) = value.as_deref().and_then(parse_color) {
        *style = style.fg(c);
    }
}

fn set_bg(style: &mut Style, value: &Option<String>) {
    if let Some(c) = value.as_deref().and_then(parse_color) {
        *style = style.bg(c);
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}
