// Common test utilities for driving the editor engine

use codegenie::engine::{EditResult, EditorEngine, KeyOutcome};
use codegenie::mode::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key chords as a user would type them
pub mod keys {
    use super::*;

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[allow(dead_code)]
    pub fn ctrl_shift(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
    }

    #[allow(dead_code)]
    pub fn alt(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::ALT)
    }

    #[allow(dead_code)]
    pub fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[allow(dead_code)]
    pub fn shift_tab() -> KeyEvent {
        KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)
    }
}

/// Engine session that tracks the caller side (text and selection) the way
/// a text control would.
pub struct Session {
    pub engine: EditorEngine,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Session {
    pub fn new(text: &str, caret: usize) -> Self {
        Self::with_mode(text, caret, Mode::Java)
    }

    pub fn with_mode(text: &str, caret: usize, mode: Mode) -> Self {
        Self {
            engine: EditorEngine::new(text, mode),
            text: text.to_string(),
            start: caret,
            end: caret,
        }
    }

    /// Press a chord and apply the result. Panics if the engine passes.
    pub fn press(&mut self, key: KeyEvent) -> EditResult {
        match self.engine.handle_key(&key, &self.text, self.start, self.end) {
            KeyOutcome::Handled(result) => {
                self.text = result.text.clone();
                self.start = result.cursor_start;
                self.end = result.cursor_end;
                result
            }
            KeyOutcome::Unhandled => panic!("{:?} was not handled", key),
        }
    }

    #[allow(dead_code)]
    pub fn outcome(&mut self, key: KeyEvent) -> KeyOutcome {
        self.engine.handle_key(&key, &self.text, self.start, self.end)
    }

    #[allow(dead_code)]
    pub fn select(&mut self, start: usize, end: usize) {
        self.start = start;
        self.end = end;
    }
}
