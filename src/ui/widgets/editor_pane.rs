// ui/widgets/editor_pane.rs - Document text

use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Line, widgets::Widget};

use crate::app::App;
use crate::ui::theme::Theme;

/// Renders the visible window of the document. Lines that start with the
/// mode's comment prefix are drawn in the comment color so the result of a
/// toggle is visible at a glance.
pub struct EditorPane<'a> {
    pub app: &'a App,
    pub theme: &'a Theme,
}

impl<'a> EditorPane<'a> {
    pub fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn line_style(&self, line: &str) -> Style {
        let prefix = self.app.engine.mode().comment_prefix().trim_end();
        let fg = if line.trim_start().starts_with(prefix) {
            self.theme.general.comment
        } else {
            self.theme.general.foreground
        };
        Style::default().fg(fg).bg(self.theme.general.background)
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..area.height {
            for x in 0..area.width {
                buf.get_mut(area.x + x, area.y + y)
                    .set_char(' ')
                    .set_style(Style::default().bg(self.theme.general.background));
            }
        }

        let buffer = self.app.engine.buffer();
        for i in 0..area.height as usize {
            let line_idx = self.app.viewport.offset_line + i;
            let Some(line) = buffer.line(line_idx) else {
                break;
            };
            let visible: String = line.chars().skip(self.app.viewport.offset_col).collect();
            let line_widget = Line::from(visible).style(self.line_style(&line));
            buf.set_line(area.x, area.y + i as u16, &line_widget, area.width);
        }
    }
}
