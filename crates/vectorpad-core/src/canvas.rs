//! Canvas document and selection state.

use crate::config::EditorConfig;
use crate::interaction::GestureState;
use crate::selection::{self, Handle, ResizeHandle, ResizeLimits};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The ordered list of shapes on the canvas plus its size.
///
/// Insertion order is paint order: later shapes are drawn on top and are hit
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    shapes: Vec<Shape>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self::new(config.default_canvas_width, config.default_canvas_height)
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Create a document from an ordered shape list.
    pub fn with_shapes(width: f64, height: f64, shapes: Vec<Shape>) -> Self {
        Self {
            width,
            height,
            shapes,
        }
    }

    /// Append a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert a shape at `index` in paint order. Indices past the end append.
    pub fn insert_shape(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Remove a shape, returning it with the index it occupied.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        Some((index, self.shapes.remove(index)))
    }

    /// Clear all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Position of a shape in paint order.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Shapes back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// The shape store: a document plus the single selection, its resize handles
/// and the gesture in progress.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    selection: Option<ShapeId>,
    markers: Vec<Handle>,
    pub(crate) gesture: GestureState,
    /// Line hit distance.
    pub hit_threshold: f64,
    /// Side of each handle's hit square.
    pub handle_size: f64,
    /// Limits applied by resize gestures.
    pub resize_limits: ResizeLimits,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document and default settings.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Create an empty canvas sized and tuned from `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self::with_document(
            CanvasDocument::new(config.default_canvas_width, config.default_canvas_height),
            config,
        )
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument, config: &EditorConfig) -> Self {
        Self {
            document,
            selection: None,
            markers: Vec::new(),
            gesture: GestureState::Idle,
            hit_threshold: config.hit_threshold,
            handle_size: config.handle_size,
            resize_limits: ResizeLimits::from(config),
        }
    }

    /// Replace the document, dropping selection and any gesture.
    pub fn set_document(&mut self, document: CanvasDocument) {
        self.document = document;
        self.clear_selection();
    }

    /// Append a shape and select it.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        self.document.add_shape(shape);
        self.select(id);
    }

    /// Select a shape (clears previous selection). Returns false if the shape
    /// is not on the canvas.
    pub fn select(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.document.get_shape_mut(id) else {
            return false;
        };
        shape.ensure_positioned();
        self.selection = Some(id);
        self.gesture = GestureState::Idle;
        self.update_selection_markers();
        true
    }

    /// Clear selection. Any gesture in progress is abandoned where it is.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.gesture = GestureState::Idle;
        self.markers.clear();
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.document.get_shape(id))
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection == Some(id)
    }

    /// Remove the selected shape, returning it with its former index.
    pub fn delete_selected(&mut self) -> Option<(usize, Shape)> {
        let id = self.selection?;
        let removed = self.document.remove_shape(id);
        self.clear_selection();
        removed
    }

    /// Top-most shape under `point`, skipping the selected shape.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.document
            .shapes()
            .iter()
            .rev()
            .filter(|s| Some(s.id()) != self.selection)
            .find(|s| s.hit_test(point, self.hit_threshold))
            .map(Shape::id)
    }

    /// Resize handle of the selected shape under `point`.
    pub fn handle_at_point(&self, point: Point) -> Option<ResizeHandle> {
        let shape = self.selected_shape()?;
        selection::hit_test_handles(shape, point, self.handle_size)
    }

    /// Recompute handle positions from the selected shape's geometry.
    ///
    /// Needed after any change made outside a gesture, such as undo.
    pub fn update_selection_markers(&mut self) {
        self.markers = self
            .selected_shape()
            .map(selection::get_handles)
            .unwrap_or_default();
    }

    /// Current handle positions; empty when nothing is selected.
    pub fn handles(&self) -> &[Handle] {
        &self.markers
    }

    /// Hit rectangles of the current handles. Disabled handles stay off-canvas.
    pub fn handle_rects(&self) -> Vec<Rect> {
        self.markers
            .iter()
            .map(|h| h.rect(self.handle_size))
            .collect()
    }
}
