// ui/renderer.rs - Ratatui-based renderer for the editor

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::Stdout;

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::widgets::editor_pane::EditorPane;
use crate::ui::widgets::gutter::Gutter;
use crate::ui::widgets::status_bar::StatusBar;

const GUTTER_WIDTH: u16 = 4;

pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
}

impl TuiRenderer {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            theme: Theme::default(),
        })
    }

    /// Draw one frame. Any caret move still pending from the last command is
    /// applied here, now that the new text is what gets drawn.
    pub fn draw(&mut self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        self.terminal.draw(|f| {
            let size = f.size();

            let vertical_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Editor area
                    Constraint::Length(1), // Status bar
                ])
                .split(size);

            let editor_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(GUTTER_WIDTH), Constraint::Min(1)])
                .split(vertical_chunks[0]);

            let text_area = editor_chunks[1];
            let (line, col) = app.prepare_frame(text_area.height as usize, text_area.width as usize);

            f.render_widget(Gutter::new(app, &self.theme), editor_chunks[0]);
            f.render_widget(EditorPane::new(app, &self.theme), text_area);
            f.render_widget(StatusBar::new(app, &self.theme), vertical_chunks[1]);

            let cursor_row = line.saturating_sub(app.viewport.offset_line) as u16;
            let cursor_col = col.saturating_sub(app.viewport.offset_col) as u16;
            if cursor_row < text_area.height && cursor_col < text_area.width {
                f.set_cursor(text_area.x + cursor_col, text_area.y + cursor_row);
            }
        })?;

        Ok(())
    }
}
