//! Default keyboard shortcuts.

use crate::input::{Key, Modifiers};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Editor operations invocable from the keyboard or programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorCommand {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    DeleteSelection,
    ClearAll,
    SelectAll,
    Rotate,
    FlipHorizontal,
    FlipVertical,
    ToggleGrid,
    ToggleSnap,
    ResetView,
    ZoomIn,
    ZoomOut,
    Cancel,
    SetTool(ToolKind),
}

/// Look up the command bound to a key press.
///
/// Arrow keys are not commands; the editor pans on them directly.
pub fn command_for(key: Key, modifiers: Modifiers) -> Option<EditorCommand> {
    match key {
        Key::Escape => Some(EditorCommand::Cancel),
        Key::Delete | Key::Backspace => Some(EditorCommand::DeleteSelection),
        Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => None,
        Key::Character(c) if modifiers.command() => command_chord(c.to_ascii_lowercase(), modifiers),
        Key::Character(c) => plain_key(c.to_ascii_lowercase(), modifiers),
    }
}

fn command_chord(c: char, modifiers: Modifiers) -> Option<EditorCommand> {
    let command = match c {
        'z' if modifiers.shift => EditorCommand::Redo,
        'z' => EditorCommand::Undo,
        'y' => EditorCommand::Redo,
        'c' => EditorCommand::Copy,
        'x' => EditorCommand::Cut,
        'v' => EditorCommand::Paste,
        'd' => EditorCommand::Duplicate,
        'a' => EditorCommand::SelectAll,
        'r' => EditorCommand::Rotate,
        '0' => EditorCommand::ResetView,
        '=' | '+' => EditorCommand::ZoomIn,
        '-' => EditorCommand::ZoomOut,
        _ => return None,
    };
    Some(command)
}

fn plain_key(c: char, modifiers: Modifiers) -> Option<EditorCommand> {
    if modifiers.shift {
        return match c {
            'h' => Some(EditorCommand::FlipHorizontal),
            'v' => Some(EditorCommand::FlipVertical),
            'g' => Some(EditorCommand::ToggleSnap),
            _ => None,
        };
    }
    if c == 'g' {
        return Some(EditorCommand::ToggleGrid);
    }
    ToolKind::from_shortcut(c).map(EditorCommand::SetTool)
}
