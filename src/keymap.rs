// src/keymap.rs - Chord recognition for structural edit commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::command::EditCommand;

/// Ctrl on Linux/Windows, Cmd (reported as SUPER or META) on macOS.
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

/// Map a key event to the structural command it triggers, if any.
///
/// Chords are tested in priority order and the first match wins.
/// `selection_empty` gates the line cut and the close-brace dedent, which
/// only apply to a bare caret. Release events never map to a command.
pub fn resolve(key: &KeyEvent, selection_empty: bool) -> Option<EditCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let mods = key.modifiers;
    let command = has_command_modifier(mods);
    let shift = mods.contains(KeyModifiers::SHIFT);
    let alt = mods.contains(KeyModifiers::ALT);

    if command && !shift && key.code == KeyCode::Char('z') {
        return Some(EditCommand::Undo);
    }
    if command && shift && matches!(key.code, KeyCode::Char('z') | KeyCode::Char('Z')) {
        return Some(EditCommand::Redo);
    }

    match key.code {
        KeyCode::Tab if !shift => return Some(EditCommand::Indent),
        KeyCode::Tab | KeyCode::BackTab => return Some(EditCommand::Outdent),
        _ => {}
    }

    if command && !shift && key.code == KeyCode::Char('d') {
        return Some(EditCommand::DuplicateLine);
    }
    if command && key.code == KeyCode::Char('/') {
        return Some(EditCommand::ToggleComment);
    }
    // Without keyboard enhancement, Ctrl+/ arrives as the 0x1F control byte,
    // which crossterm decodes as Ctrl+7.
    if mods.contains(KeyModifiers::CONTROL) && !shift && key.code == KeyCode::Char('7') {
        return Some(EditCommand::ToggleComment);
    }
    if command && selection_empty && key.code == KeyCode::Char('x') {
        return Some(EditCommand::CutLine);
    }

    if alt {
        match key.code {
            KeyCode::Up => return Some(EditCommand::MoveLineUp),
            KeyCode::Down => return Some(EditCommand::MoveLineDown),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Enter => Some(EditCommand::SmartNewline),
        KeyCode::Char('}') if selection_empty => Some(EditCommand::CloseBrace),
        _ => None,
    }
}
