// ui/widgets/status_bar.rs - Status bar widget

use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Line, widgets::Widget};

use crate::app::App;
use crate::ui::theme::Theme;

/// File name, language, caret position and history depth, then the latest
/// message.
pub struct StatusBar<'a> {
    pub app: &'a App,
    pub theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }
}

pub fn status_text(app: &App) -> String {
    let buffer = app.engine.buffer();
    let caret = app.caret();
    let history = app.engine.history();

    let base = format!(
        " {}{} | {} | {}:{} | history {}/{}",
        app.display_name(),
        if app.modified { " [+]" } else { "" },
        app.engine.mode().display_name(),
        buffer.line_of(caret) + 1,
        buffer.column(caret) + 1,
        history.index() + 1,
        history.len(),
    );
    match &app.status_message {
        Some(msg) => format!("{} | {}", base, msg),
        None => base,
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = status_text(self.app);
        let width = area.width as usize;
        let used = status.chars().count();
        let padded = if used < width {
            format!("{}{}", status, " ".repeat(width - used))
        } else {
            status
        };

        let fg = if self.app.modified {
            self.theme.ui.status_modified_fg
        } else {
            self.theme.ui.status_bar_fg
        };
        let line_widget = Line::from(padded).style(Style::default().bg(self.theme.ui.status_bar_bg).fg(fg));
        buf.set_line(area.x, area.y, &line_widget, area.width);
    }
}
