// ui/theme.rs - Colors for the editor front-end

use ratatui::style::Color;

#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub general: GeneralTheme,
    pub ui: UiTheme,
}

#[derive(Debug, Clone)]
pub struct GeneralTheme {
    pub background: Color,
    pub foreground: Color,
    pub comment: Color,
}

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_modified_fg: Color,
    pub gutter_fg: Color,
    pub gutter_current_fg: Color,
}

impl Default for GeneralTheme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::Rgb(248, 248, 242),
            comment: Color::Rgb(98, 114, 164),
        }
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            status_bar_bg: Color::Blue,
            status_bar_fg: Color::White,
            status_modified_fg: Color::Yellow,
            gutter_fg: Color::DarkGray,
            gutter_current_fg: Color::Gray,
        }
    }
}
