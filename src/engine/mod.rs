// src/engine/mod.rs - Editor state engine: key chords in, new text and caret out

pub mod edits;

use crossterm::event::KeyEvent;
use log::{debug, warn};

use crate::buffer::TextBuffer;
use crate::clipboard::{ClipboardWriter, MemoryClipboard};
use crate::command::EditCommand;
use crate::history::{History, HistoryEntry};
use crate::keymap;
use crate::mode::Mode;
use edits::{Direction, Edit};

/// What the caller should apply to its text control after a handled key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub command: EditCommand,
    pub text: String,
    pub cursor_start: usize,
    pub cursor_end: usize,
    /// Text written to the clipboard by a line cut.
    pub clipboard: Option<String>,
    /// False for handled no-ops (undo at the oldest state, outdent with
    /// nothing to remove, ...).
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a structural chord; the caller applies its default behavior.
    Unhandled,
    Handled(EditResult),
}

/// Owns the document text, the language mode and the undo/redo history.
///
/// The engine never touches a rendered control. It returns data and the
/// caller applies it: commit the text first, then restore the caret once the
/// control shows the new text.
pub struct EditorEngine {
    buffer: TextBuffer,
    mode: Mode,
    history: History,
    clipboard: Box<dyn ClipboardWriter>,
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new("", Mode::default())
    }
}

impl EditorEngine {
    /// Start a session on `text`. Cut lines go to an in-memory clipboard
    /// until [`EditorEngine::with_clipboard`] installs another one.
    pub fn new(text: &str, mode: Mode) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            mode,
            history: History::new(HistoryEntry::new(text, 0)),
            clipboard: Box::new(MemoryClipboard::new()),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardWriter>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Open a new document: replaces the text and collapses history to it.
    pub fn load_document(&mut self, text: &str, mode: Option<Mode>) {
        self.buffer = TextBuffer::from_text(text);
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self.history.reset(HistoryEntry::new(text, 0));
        debug!("loaded document ({} chars, {})", self.buffer.len_chars(), self.mode);
    }

    /// Record a free-form edit. The caret is not known here, so undoing back
    /// to this state puts the caret at 0; see [`EditorEngine::set_text_at`].
    pub fn set_text(&mut self, text: &str) {
        self.set_text_at(text, 0);
    }

    /// Record a free-form edit along with the caret it left behind.
    pub fn set_text_at(&mut self, text: &str, cursor: usize) {
        self.buffer.replace(text);
        let cursor = self.buffer.clamp(cursor);
        self.history.push(HistoryEntry::new(text, cursor));
    }

    /// Step back one history entry. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.history.undo()?.clone();
        self.buffer.replace(&entry.text);
        Some(entry)
    }

    /// Step forward one history entry. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.history.redo()?.clone();
        self.buffer.replace(&entry.text);
        Some(entry)
    }

    /// Dispatch a key chord against the caller's current text and selection.
    ///
    /// Offsets are char indices. Offsets past the end are clamped and a
    /// reversed selection is reordered.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        text: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> KeyOutcome {
        let buffer = TextBuffer::from_text(text);
        let (start, end) = normalize_selection(&buffer, selection_start, selection_end);

        let Some(command) = keymap::resolve(key, start == end) else {
            return KeyOutcome::Unhandled;
        };
        match self.run(command, &buffer, start, end) {
            Some(result) => KeyOutcome::Handled(result),
            None => KeyOutcome::Unhandled,
        }
    }

    /// Run a command directly, bypassing chord recognition.
    ///
    /// A command that does not apply at this position (a line cut or
    /// close-brace with a selection, a close-brace after non-whitespace)
    /// comes back with `changed == false`.
    pub fn execute(
        &mut self,
        command: EditCommand,
        text: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> EditResult {
        let buffer = TextBuffer::from_text(text);
        let (start, end) = normalize_selection(&buffer, selection_start, selection_end);
        self.run(command, &buffer, start, end)
            .unwrap_or_else(|| self.unchanged(command, &buffer, start, end))
    }

    /// `None` when the command does not apply and the key should fall
    /// through to default text input.
    fn run(
        &mut self,
        command: EditCommand,
        buffer: &TextBuffer,
        start: usize,
        end: usize,
    ) -> Option<EditResult> {
        debug!("{:?} at {}..{}", command, start, end);
        let caret_only = start == end;

        let edit = match command {
            EditCommand::Undo | EditCommand::Redo => {
                let entry = if command == EditCommand::Undo {
                    self.undo()
                } else {
                    self.redo()
                };
                return Some(match entry {
                    Some(entry) => restored(command, entry),
                    None => self.unchanged(command, buffer, start, end),
                });
            }
            EditCommand::Indent => Some(edits::indent(buffer, start, end)),
            EditCommand::Outdent => edits::outdent(buffer, start, end),
            EditCommand::DuplicateLine => Some(edits::duplicate_line(buffer, start)),
            EditCommand::ToggleComment => Some(edits::toggle_comment(
                buffer,
                start,
                end,
                self.mode.comment_prefix(),
            )),
            EditCommand::CutLine if caret_only => Some(edits::cut_line(buffer, start)),
            EditCommand::MoveLineUp => edits::move_line(buffer, start, Direction::Up),
            EditCommand::MoveLineDown => edits::move_line(buffer, start, Direction::Down),
            EditCommand::SmartNewline => Some(edits::smart_newline(buffer, start, end)),
            EditCommand::CloseBrace if caret_only => {
                Some(edits::close_brace(buffer, start)?)
            }
            EditCommand::CutLine | EditCommand::CloseBrace => return None,
        };

        Some(match edit {
            Some(edit) => self.commit(command, edit),
            None => self.unchanged(command, buffer, start, end),
        })
    }

    fn commit(&mut self, command: EditCommand, edit: Edit) -> EditResult {
        if let Some(cut) = &edit.clipboard
            && let Err(e) = self.clipboard.write_text(cut)
        {
            warn!("clipboard write failed: {}", e);
        }

        self.buffer.replace(&edit.text);
        self.history
            .push(HistoryEntry::new(edit.text.clone(), edit.cursor_start));

        EditResult {
            command,
            text: edit.text,
            cursor_start: edit.cursor_start,
            cursor_end: edit.cursor_end,
            clipboard: edit.clipboard,
            changed: true,
        }
    }

    /// Handled, but nothing to do. The caller's text stays authoritative.
    fn unchanged(
        &mut self,
        command: EditCommand,
        buffer: &TextBuffer,
        start: usize,
        end: usize,
    ) -> EditResult {
        let text = buffer.text();
        if self.buffer.rope != buffer.rope {
            self.buffer.replace(&text);
        }
        EditResult {
            command,
            text,
            cursor_start: start,
            cursor_end: end,
            clipboard: None,
            changed: false,
        }
    }
}

fn restored(command: EditCommand, entry: HistoryEntry) -> EditResult {
    let cursor = entry.cursor.min(entry.text.chars().count());
    EditResult {
        command,
        text: entry.text,
        cursor_start: cursor,
        cursor_end: cursor,
        clipboard: None,
        changed: true,
    }
}

fn normalize_selection(buffer: &TextBuffer, a: usize, b: usize) -> (usize, usize) {
    let (a, b) = (buffer.clamp(a), buffer.clamp(b));
    if a <= b { (a, b) } else { (b, a) }
}
