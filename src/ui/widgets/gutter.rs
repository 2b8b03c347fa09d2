// ui/widgets/gutter.rs - Line numbers

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::App;
use crate::ui::theme::Theme;

pub struct Gutter<'a> {
    pub app: &'a App,
    pub theme: &'a Theme,
}

impl<'a> Gutter<'a> {
    pub fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }
}

impl Widget for Gutter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let buffer = self.app.engine.buffer();
        let current = buffer.line_of(self.app.caret());

        for i in 0..area.height as usize {
            let line_idx = self.app.viewport.offset_line + i;
            let (text, color) = if line_idx < buffer.line_count() {
                let color = if line_idx == current {
                    self.theme.ui.gutter_current_fg
                } else {
                    self.theme.ui.gutter_fg
                };
                (format!("{:>3} ", line_idx + 1), color)
            } else {
                ("    ".to_string(), self.theme.ui.gutter_fg)
            };

            let line_widget = Line::from(Span::styled(text, Style::default().fg(color)));
            buf.set_line(area.x, area.y + i as u16, &line_widget, area.width);
        }
    }
}
