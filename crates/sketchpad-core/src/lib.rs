//! Sketchpad Core Library
//!
//! Platform-agnostic element model and interaction engine for a 2D vector
//! sketchpad: element storage, viewport transform, hit-testing and resize
//! handles, the gesture state machine, undo/redo and the clipboard.
//! Rendering and text entry are left to the host.

pub mod camera;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod elements;
pub mod handles;
pub mod history;
pub mod input;
pub mod keymap;
pub mod render;
pub mod selection;
pub mod snap;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use clipboard::Clipboard;
pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use editor::{Editor, EditorResponse, GestureKind, TextEntryRequest};
pub use elements::{
    Circle, DrawingElement, ElementId, ElementKind, ElementStyle, ElementTransform, Line, Rectangle,
    SerializableColor, Stroke, Text,
};
pub use handles::{HandleMarker, ResizeHandle};
pub use history::{HistoryManager, HistorySnapshot};
pub use input::{InputEvent, Key, Modifiers, MouseButton};
pub use keymap::EditorCommand;
pub use render::{GridLines, RenderFrame, Renderer};
pub use selection::Selection;
pub use snap::{GRID_SIZE, Grid, snap_to_grid, snap_value};
pub use store::ElementStore;
pub use tools::ToolKind;
