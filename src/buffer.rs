use ropey::Rope;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document text addressed by char offsets.
///
/// All offsets are char indices (not bytes). Lines are separated by `\n`
/// only; a trailing `\n` yields a final empty line.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::from(""),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Replace the whole document.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// Index of the line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp(offset))
    }

    /// Offset of the first char of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        self.rope.line_to_char(self.line_of(offset))
    }

    /// Offset of the `\n` ending the line containing `offset`, or the buffer end.
    pub fn line_end(&self, offset: usize) -> usize {
        let line = self.line_of(offset);
        self.line_end_of(line)
    }

    fn line_end_of(&self, line: usize) -> usize {
        if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1) - 1
        } else {
            self.rope.len_chars()
        }
    }

    pub fn column(&self, offset: usize) -> usize {
        self.clamp(offset) - self.line_start(offset)
    }

    /// Offset of `col` on `line`, clamped to the line's length.
    pub fn offset_of(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let start = self.rope.line_to_char(line);
        start + col.min(self.line_end_of(line) - start)
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = self.clamp(end);
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx < self.rope.len_lines() {
            let line = self.rope.line(line_idx).to_string();
            if line.ends_with('\n') {
                Some(line.trim_end_matches('\n').to_string())
            } else {
                Some(line)
            }
        } else {
            None
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BufferError> {
        let content = fs::read_to_string(path.as_ref())?;
        self.rope = Rope::from_str(&content);
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BufferError> {
        fs::write(path.as_ref(), self.rope.to_string())?;
        Ok(())
    }
}
