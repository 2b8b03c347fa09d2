// src/app.rs - Terminal editing session around the editor engine
//
// The app owns the caret. Every key is first offered to the engine; keys it
// does not handle get ordinary text-input behavior here. Caret moves coming
// from the engine are applied in two phases: the text is committed at once
// and the caret is settled when the next frame is prepared (or when the next
// key arrives, if that comes first).

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::buffer::{BufferError, TextBuffer};
use crate::command::EditCommand;
use crate::engine::{EditResult, EditorEngine, KeyOutcome};
use crate::mode::Mode;
use crate::viewport::Viewport;

pub struct App {
    pub engine: EditorEngine,
    pub file_path: Option<PathBuf>,
    pub viewport: Viewport,
    pub status_message: Option<String>,
    pub modified: bool,
    pub should_quit: bool,
    caret: usize,
    pending_caret: Option<usize>,
    quit_armed: bool,
}

impl App {
    pub fn new(engine: EditorEngine) -> Self {
        Self {
            engine,
            file_path: None,
            viewport: Viewport::new(20, 80),
            status_message: None,
            modified: false,
            should_quit: false,
            caret: 0,
            pending_caret: None,
            quit_armed: false,
        }
    }

    /// Load a file as a fresh document. `mode` overrides detection from the
    /// file extension.
    pub fn open_file(&mut self, path: &Path, mode: Option<Mode>) -> Result<(), BufferError> {
        let mut buffer = TextBuffer::new();
        buffer.load_from_file(path)?;

        self.engine
            .load_document(&buffer.text(), mode.or_else(|| mode_for_path(path)));
        self.file_path = Some(path.to_path_buf());
        self.caret = 0;
        self.pending_caret = None;
        self.modified = false;
        self.status_message = Some(format!("Opened {}", path.display()));
        Ok(())
    }

    /// Name a document that does not exist on disk yet. It is created on the
    /// first save.
    pub fn start_new_file(&mut self, path: &Path, mode: Option<Mode>) {
        if let Some(mode) = mode.or_else(|| mode_for_path(path)) {
            self.engine.set_mode(mode);
        }
        self.file_path = Some(path.to_path_buf());
        self.status_message = Some(format!("New file {}", path.display()));
    }

    /// Write the document to its file, or to `solution.<ext>` when unnamed.
    pub fn save(&mut self) -> Result<PathBuf, BufferError> {
        let path = self.file_path.clone().unwrap_or_else(|| {
            PathBuf::from(self.engine.mode().default_file_name())
        });
        TextBuffer::from_text(&self.engine.text()).save_to_file(&path)?;
        self.file_path = Some(path.clone());
        self.modified = false;
        Ok(path)
    }

    pub fn display_name(&self) -> String {
        match &self.file_path {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => self.engine.mode().default_file_name(),
        }
    }

    /// Apply a caret move the engine asked for.
    pub fn settle_caret(&mut self) {
        if let Some(pos) = self.pending_caret.take() {
            self.caret = self.engine.buffer().clamp(pos);
        }
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as (line, column), after settling any pending move.
    pub fn cursor_position(&mut self) -> (usize, usize) {
        self.settle_caret();
        let buffer = self.engine.buffer();
        (buffer.line_of(self.caret), buffer.column(self.caret))
    }

    /// Settle the caret and scroll it into a `rows` x `cols` text area.
    /// Called by the renderer right before drawing.
    pub fn prepare_frame(&mut self, rows: usize, cols: usize) -> (usize, usize) {
        let (line, col) = self.cursor_position();
        self.viewport.resize(rows, cols);
        self.viewport.scroll_to_cursor(line, col);
        (line, col)
    }

    pub fn has_pending_caret(&self) -> bool {
        self.pending_caret.is_some()
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        // Leave room for the status bar and the gutter
        self.viewport
            .resize((rows as usize).saturating_sub(1), (cols as usize).saturating_sub(4));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        self.settle_caret();

        if self.handle_app_key(&key) {
            return;
        }

        let text = self.engine.text();
        match self.engine.handle_key(&key, &text, self.caret, self.caret) {
            KeyOutcome::Handled(result) => self.apply(result),
            KeyOutcome::Unhandled => self.default_input(&key, &text),
        }
    }

    /// Save, quit, mode switching and the Ctrl+Y redo fallback for terminals
    /// that cannot report Ctrl+Shift+Z. Returns true when the key was
    /// consumed.
    fn handle_app_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let quit = key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('q'));
        if !quit {
            self.quit_armed = false;
        }

        match key.code {
            _ if quit => self.request_quit(),
            KeyCode::Char('y') if ctrl => {
                let text = self.engine.text();
                let result = self
                    .engine
                    .execute(EditCommand::Redo, &text, self.caret, self.caret);
                self.apply(result);
            }
            KeyCode::Char('s') if ctrl => {
                self.status_message = Some(match self.save() {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(e) => format!("Save failed: {}", e),
                });
            }
            KeyCode::F(2) => {
                let mode = self.engine.mode().next();
                self.engine.set_mode(mode);
                self.status_message = Some(format!("Language: {}", mode));
            }
            _ => return false,
        }
        true
    }

    /// Quitting with unsaved changes takes a second press.
    fn request_quit(&mut self) {
        if self.modified && !self.quit_armed {
            self.quit_armed = true;
            self.status_message =
                Some("Unsaved changes. Press again to quit, Ctrl+S to save".to_string());
        } else {
            self.should_quit = true;
        }
    }

    fn apply(&mut self, result: EditResult) {
        let command = result.command;
        self.modified |= result.changed;
        self.pending_caret = Some(result.cursor_start);
        self.status_message = match (command, result.changed) {
            (_, false) if command.is_history_navigation() => {
                Some(format!("Nothing to {}", command.label().to_lowercase()))
            }
            (_, false) => Some(format!("{}: nothing to change here", command.label())),
            (EditCommand::CutLine, true) => Some(format!("{} to clipboard", command.label())),
            _ => None,
        };
    }

    fn default_input(&mut self, key: &KeyEvent, text: &str) {
        let mut buffer = TextBuffer::from_text(text);
        let caret = buffer.clamp(self.caret);
        let line = buffer.line_of(caret);
        let col = buffer.column(caret);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Char(c) if plain => {
                buffer.rope.insert_char(caret, c);
                self.record(&buffer, caret + 1);
            }
            KeyCode::Backspace if caret > 0 => {
                buffer.rope.remove(caret - 1..caret);
                self.record(&buffer, caret - 1);
            }
            KeyCode::Delete if caret < buffer.len_chars() => {
                buffer.rope.remove(caret..caret + 1);
                self.record(&buffer, caret);
            }
            KeyCode::Left => self.caret = caret.saturating_sub(1),
            KeyCode::Right => self.caret = (caret + 1).min(buffer.len_chars()),
            KeyCode::Home => self.caret = buffer.line_start(caret),
            KeyCode::End => self.caret = buffer.line_end(caret),
            KeyCode::Up if line > 0 => self.caret = buffer.offset_of(line - 1, col),
            KeyCode::Down if line + 1 < buffer.line_count() => {
                self.caret = buffer.offset_of(line + 1, col)
            }
            _ => {}
        }
    }

    fn record(&mut self, buffer: &TextBuffer, caret: usize) {
        self.engine.set_text_at(&buffer.text(), caret);
        self.caret = caret;
        self.modified = true;
        self.status_message = None;
    }
}

fn mode_for_path(path: &Path) -> Option<Mode> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Mode::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_typing_records_history_with_caret() {
        let mut app = App::new(EditorEngine::default());
        type_str(&mut app, "ab");
        assert_eq!(app.engine.text(), "ab");
        assert_eq!(app.caret(), 2);
        assert_eq!(app.engine.history().len(), 3);
        assert_eq!(app.engine.history().current().cursor, 2);
        assert!(app.modified);
    }

    #[test]
    fn test_brace_block_round_trip() {
        let mut app = App::new(EditorEngine::default());
        type_str(&mut app, "if (x) {");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        type_str(&mut app, "y;");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        type_str(&mut app, "}");
        assert_eq!(app.engine.text(), "if (x) {\n    y;\n}");
        assert_eq!(app.cursor_position(), (2, 1));
    }

    #[test]
    fn test_undo_moves_caret_on_settle() {
        let mut app = App::new(EditorEngine::default());
        type_str(&mut app, "abc");
        press(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(app.engine.text(), "ab");
        assert_eq!(app.cursor_position(), (0, 2));
    }

    #[test]
    fn test_undo_at_start_reports() {
        let mut app = App::new(EditorEngine::default());
        press(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(app.status_message.as_deref(), Some("Nothing to undo"));
        assert!(!app.modified);
    }

    #[test]
    fn test_navigation_and_delete() {
        let mut app = App::new(EditorEngine::new("abc\nde", Mode::Java));
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::End, KeyModifiers::NONE);
        assert_eq!(app.cursor_position(), (1, 2));
        press(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.cursor_position(), (0, 2));
        press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        press(&mut app, KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(app.engine.text(), "a\nde");
    }

    #[test]
    fn test_mode_cycles_and_quit() {
        let mut app = App::new(EditorEngine::default());
        press(&mut app, KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(app.engine.mode(), Mode::Python);
        assert_eq!(app.display_name(), "solution.py");
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_with_unsaved_changes_needs_second_press() {
        let mut app = App::new(EditorEngine::default());
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.should_quit);
        assert!(app.status_message.as_deref().unwrap().starts_with("Unsaved changes"));

        // Any other key disarms the pending quit
        press(&mut app, KeyCode::Left, KeyModifiers::NONE);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_engine_caret_waits_for_next_frame() {
        let mut app = App::new(EditorEngine::new("ab", Mode::Java));
        press(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(app.engine.text(), "ab\nab");
        assert!(app.has_pending_caret());
        assert_eq!(app.caret(), 0);

        assert_eq!(app.prepare_frame(10, 40), (1, 0));
        assert!(!app.has_pending_caret());
        assert_eq!(app.caret(), 3);
    }

    #[test]
    fn test_ctrl_y_redoes() {
        let mut app = App::new(EditorEngine::default());
        type_str(&mut app, "ab");
        press(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(app.engine.text(), "ab");
        assert_eq!(app.cursor_position(), (0, 2));

        press(&mut app, KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(app.status_message.as_deref(), Some("Nothing to redo"));
    }

    #[test]
    fn test_noop_command_reports_label() {
        let mut app = App::new(EditorEngine::new("x", Mode::Java));
        press(&mut app, KeyCode::Up, KeyModifiers::ALT);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Move line up: nothing to change here")
        );
    }

    #[test]
    fn test_open_and_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Main.py");
        fs::write(&path, "x = 1\n").unwrap();

        let mut app = App::new(EditorEngine::default());
        app.open_file(&path, None).unwrap();
        assert_eq!(app.engine.mode(), Mode::Python);
        assert_eq!(app.engine.history().len(), 1);

        press(&mut app, KeyCode::Char('/'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!app.modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# x = 1\n");
    }

    #[test]
    fn test_new_file_created_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.rb");

        let mut app = App::new(EditorEngine::default());
        app.start_new_file(&path, None);
        assert_eq!(app.engine.mode(), Mode::Ruby);
        assert!(!path.exists());

        type_str(&mut app, "p 1");
        assert_eq!(app.save().unwrap(), path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "p 1");
    }

    #[test]
    fn test_explicit_mode_beats_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.py");
        fs::write(&path, "").unwrap();

        let mut app = App::new(EditorEngine::default());
        app.open_file(&path, Some(Mode::C)).unwrap();
        assert_eq!(app.engine.mode(), Mode::C);
    }
}
