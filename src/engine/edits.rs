// src/engine/edits.rs - Pure text transforms behind each structural command
//
// Every function reads a buffer plus a caret/selection and returns the new
// document as a fresh string. `None` means the command does not apply here.

use crate::buffer::TextBuffer;

pub const INDENT_WIDTH: usize = 4;
pub const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub cursor_start: usize,
    pub cursor_end: usize,
    /// Text to place on the clipboard.
    pub clipboard: Option<String>,
}

impl Edit {
    fn caret(text: String, pos: usize) -> Self {
        Self {
            text,
            cursor_start: pos,
            cursor_end: pos,
            clipboard: None,
        }
    }
}

/// Replace `start..end` with `insert`.
fn splice(buffer: &TextBuffer, start: usize, end: usize, insert: &str) -> String {
    let mut rope = buffer.rope.clone();
    rope.remove(start..end);
    rope.insert(start, insert);
    rope.to_string()
}

/// Shift an offset left by `width` after `width` chars were removed at
/// `at`. Offsets inside the removed span collapse onto `at`.
fn shift_back(pos: usize, at: usize, width: usize) -> usize {
    if pos >= at + width {
        pos - width
    } else {
        pos.min(at)
    }
}

pub fn indent(buffer: &TextBuffer, start: usize, end: usize) -> Edit {
    Edit::caret(splice(buffer, start, end, INDENT), start + INDENT_WIDTH)
}

pub fn outdent(buffer: &TextBuffer, start: usize, end: usize) -> Option<Edit> {
    let line_start = buffer.line_start(start);
    if buffer.slice(line_start, line_start + INDENT_WIDTH) != INDENT {
        return None;
    }
    Some(Edit {
        text: splice(buffer, line_start, line_start + INDENT_WIDTH, ""),
        cursor_start: shift_back(start, line_start, INDENT_WIDTH),
        cursor_end: shift_back(end, line_start, INDENT_WIDTH),
        clipboard: None,
    })
}

pub fn duplicate_line(buffer: &TextBuffer, caret: usize) -> Edit {
    let line_start = buffer.line_start(caret);
    let line_end = buffer.line_end(caret);
    let line = buffer.slice(line_start, line_end);
    let text = splice(buffer, line_end, line_end, &format!("\n{}", line));
    Edit::caret(text, line_end + 1 + (caret - line_start))
}

pub fn toggle_comment(buffer: &TextBuffer, start: usize, end: usize, prefix: &str) -> Edit {
    let line_start = buffer.line_start(start);
    let width = prefix.chars().count();

    if buffer.slice(line_start, line_start + width) == prefix {
        Edit {
            text: splice(buffer, line_start, line_start + width, ""),
            cursor_start: shift_back(start, line_start, width),
            cursor_end: shift_back(end, line_start, width),
            clipboard: None,
        }
    } else {
        Edit {
            text: splice(buffer, line_start, line_start, prefix),
            cursor_start: start + width,
            cursor_end: end + width,
            clipboard: None,
        }
    }
}

/// Remove the caret's line together with its trailing newline.
pub fn cut_line(buffer: &TextBuffer, caret: usize) -> Edit {
    let line_start = buffer.line_start(caret);
    let line_end = buffer.line_end(caret);
    let cut_end = if line_end < buffer.len_chars() {
        line_end + 1
    } else {
        line_end
    };

    let mut edit = Edit::caret(splice(buffer, line_start, cut_end, ""), line_start);
    edit.clipboard = Some(buffer.slice(line_start, cut_end));
    edit
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

pub fn move_line(buffer: &TextBuffer, caret: usize, direction: Direction) -> Option<Edit> {
    let line = buffer.line_of(caret);
    let target = match direction {
        Direction::Up => line.checked_sub(1)?,
        Direction::Down if line + 1 < buffer.line_count() => line + 1,
        Direction::Down => return None,
    };
    let col = buffer.column(caret);

    let text = buffer.text();
    let mut lines: Vec<&str> = text.split('\n').collect();
    lines.swap(line, target);
    let moved = TextBuffer::from_text(&lines.join("\n"));

    let pos = moved.offset_of(target, col);
    Some(Edit::caret(moved.text(), pos))
}

/// Newline that carries the current indentation, one level deeper after `{`.
pub fn smart_newline(buffer: &TextBuffer, start: usize, end: usize) -> Edit {
    let line_start = buffer.line_start(start);
    let before = buffer.slice(line_start, start);

    let mut indent: String = before.chars().take_while(|c| c.is_whitespace()).collect();
    if before.trim().ends_with('{') {
        indent.push_str(INDENT);
    }

    let insert = format!("\n{}", indent);
    let pos = start + insert.chars().count();
    Edit::caret(splice(buffer, start, end, &insert), pos)
}

/// Typing `}` on a whitespace-only prefix drops one indent level first.
pub fn close_brace(buffer: &TextBuffer, caret: usize) -> Option<Edit> {
    let line_start = buffer.line_start(caret);
    let before = buffer.slice(line_start, caret);
    if before.is_empty() || !before.chars().all(char::is_whitespace) {
        return None;
    }

    let width = before.chars().count();
    if width < INDENT_WIDTH {
        return None;
    }
    let kept: String = before.chars().take(width - INDENT_WIDTH).collect();
    let pos = line_start + width - INDENT_WIDTH + 1;
    Some(Edit::caret(
        splice(buffer, line_start, caret, &format!("{}}}", kept)),
        pos,
    ))
}
