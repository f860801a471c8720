//! VectorPad Core Library
//!
//! Shape editing engine for the VectorPad drawing surface: geometry, selection,
//! drag/resize gestures, undo/redo, project files and SVG export. Rendering and
//! windowing live outside this crate.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod export;
pub mod factory;
pub mod geometry;
pub mod history;
pub mod input;
pub mod interaction;
pub mod project;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorError};
pub use export::{ExportError, export_svg, save_svg};
pub use history::{Command, CommandError, History};
pub use input::{EditorAction, Modifiers, MouseButton, PointerEvent};
pub use interaction::{DragOutcome, GestureState, ResizeOutcome};
pub use project::{ProjectError, ProjectFile, ShapeRecord};
pub use selection::{Handle, ResizeHandle};
pub use shapes::{ArgbColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use tools::{ToolError, ToolKind, ToolManager};
