//! Input events forwarded by the presentation layer.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
///
/// Double-clicks are reported by the presentation layer as their own event;
/// the engine does no click timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    DoubleClick {
        position: Point,
    },
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorAction {
    Undo,
    Redo,
    DeleteSelected,
    ClosePolygon,
    Cancel,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl EditorAction {
    /// Map a key press to an action. `key` uses the names of the W3C
    /// `KeyboardEvent.key` values ("Delete", "Enter", "z", ...).
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        let cmd = modifiers.command();
        match key {
            "z" | "Z" if cmd && modifiers.shift => Some(EditorAction::Redo),
            "z" | "Z" if cmd => Some(EditorAction::Undo),
            "y" | "Y" if cmd => Some(EditorAction::Redo),
            "+" | "=" if cmd => Some(EditorAction::ZoomIn),
            "-" if cmd => Some(EditorAction::ZoomOut),
            "0" if cmd => Some(EditorAction::ZoomReset),
            "Delete" | "Backspace" => Some(EditorAction::DeleteSelected),
            "Enter" => Some(EditorAction::ClosePolygon),
            "Escape" => Some(EditorAction::Cancel),
            _ => None,
        }
    }
}
