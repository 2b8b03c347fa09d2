/// Structural editing commands, listed in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Undo,
    Redo,
    Indent,
    Outdent,
    DuplicateLine,
    ToggleComment,
    CutLine,
    MoveLineUp,
    MoveLineDown,
    SmartNewline,
    CloseBrace,
}

impl EditCommand {
    /// Short label for status messages.
    pub fn label(self) -> &'static str {
        match self {
            EditCommand::Undo => "Undo",
            EditCommand::Redo => "Redo",
            EditCommand::Indent => "Indent",
            EditCommand::Outdent => "Outdent",
            EditCommand::DuplicateLine => "Duplicate line",
            EditCommand::ToggleComment => "Toggle comment",
            EditCommand::CutLine => "Cut line",
            EditCommand::MoveLineUp => "Move line up",
            EditCommand::MoveLineDown => "Move line down",
            EditCommand::SmartNewline => "Newline",
            EditCommand::CloseBrace => "Close brace",
        }
    }

    /// Whether the command walks history instead of recording into it.
    pub fn is_history_navigation(self) -> bool {
        matches!(self, EditCommand::Undo | EditCommand::Redo)
    }
}
