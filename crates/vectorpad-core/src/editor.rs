//! Editor facade tying the canvas, tools, history and zoom together.
//!
//! The presentation layer forwards pointer and keyboard input here and reads
//! back the shape list, selection handles and status text. All positions are
//! in canvas coordinates; zoom is applied by the caller.

use crate::camera::Camera;
use crate::canvas::{Canvas, CanvasDocument};
use crate::config::{ConfigError, EditorConfig};
use crate::export::{self, ExportError};
use crate::factory;
use crate::history::{Command, CommandError, History};
use crate::input::{EditorAction, MouseButton, PointerEvent};
use crate::project::{ProjectError, ProjectFile};
use crate::shapes::{Shape, ShapeStyle};
use crate::storage::{Storage, StorageError};
use crate::tools::{ToolError, ToolKind, ToolManager};
use kurbo::Point;
use log::{debug, info, warn};
use std::path::Path;
use thiserror::Error;

/// Anything the editor can report back to its caller.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An editing session over one canvas.
#[derive(Debug, Clone)]
pub struct Editor {
    canvas: Canvas,
    history: History,
    tools: ToolManager,
    camera: Camera,
    config: EditorConfig,
    /// Last user-facing message, shown in the status text.
    message: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            canvas: Canvas::with_config(&config),
            history: History::new(config.max_undo_depth),
            tools: ToolManager::new(),
            camera: Camera::from_config(&config),
            config,
            message: None,
        }
    }

    /// Create an editor tuned by a JSON config file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        Ok(Self::with_config(EditorConfig::load(path)?))
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Properties applied to newly drawn shapes.
    pub fn current_style(&self) -> &ShapeStyle {
        &self.tools.current_style
    }

    /// The shape being drawn, for rendering.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    // --- Input ---

    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Result<(), EditorError> {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                Ok(())
            }
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            PointerEvent::DoubleClick { position } => self.double_click(position),
        }
    }

    pub fn handle_action(&mut self, action: EditorAction) -> Result<(), EditorError> {
        match action {
            EditorAction::Undo => {
                self.undo()?;
            }
            EditorAction::Redo => {
                self.redo()?;
            }
            EditorAction::DeleteSelected => {
                self.delete_selected()?;
            }
            EditorAction::ClosePolygon => {
                self.close_polygon()?;
            }
            EditorAction::Cancel => self.cancel(),
            EditorAction::ZoomIn => self.zoom_in(),
            EditorAction::ZoomOut => self.zoom_out(),
            EditorAction::ZoomReset => self.zoom_reset(),
        }
        Ok(())
    }

    pub fn pointer_down(&mut self, point: Point, button: MouseButton) -> Result<(), EditorError> {
        // A down without the matching up: settle the old gesture first
        if !self.canvas.gesture().is_idle() {
            self.finish_gesture();
        }

        match (self.tools.current_tool, button) {
            (ToolKind::Select, MouseButton::Left) => {
                self.select_at(point);
                Ok(())
            }
            (ToolKind::Polygon, MouseButton::Left) => {
                let closed = self
                    .tools
                    .add_polygon_point(point, self.config.polygon_close_distance);
                self.commit_polygon(closed)
            }
            (ToolKind::Polygon, MouseButton::Right) => self.close_polygon().map(|_| ()),
            (ToolKind::Select | ToolKind::Polygon, _) => Ok(()),
            (_, MouseButton::Left) => {
                self.tools.begin(point);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.canvas.is_dragging() {
            self.canvas.update_drag(point);
        } else if self.canvas.is_resizing() {
            self.canvas.update_resize(point);
        } else {
            self.tools.update(point);
        }
    }

    pub fn pointer_up(&mut self, point: Point, button: MouseButton) -> Result<(), EditorError> {
        if button != MouseButton::Left {
            return Ok(());
        }
        if !self.canvas.gesture().is_idle() {
            self.pointer_move(point);
            self.finish_gesture();
            return Ok(());
        }
        match self.tools.end(point) {
            Some(shape) => self.commit_shape(shape),
            None => Ok(()),
        }
    }

    /// Double-click reported by the presentation layer. Finishes a polygon in
    /// progress.
    pub fn double_click(&mut self, _point: Point) -> Result<(), EditorError> {
        if self.tools.current_tool == ToolKind::Polygon {
            self.close_polygon()?;
        }
        Ok(())
    }

    /// Select-mode pointer down: handle, then selected shape, then any other
    /// shape, else deselect.
    fn select_at(&mut self, point: Point) {
        if let Some(handle) = self.canvas.handle_at_point(point) {
            self.canvas.start_resize(handle, point);
            return;
        }
        let threshold = self.canvas.hit_threshold;
        let on_selected = self
            .canvas
            .selected_shape()
            .is_some_and(|shape| shape.hit_test(point, threshold));
        if on_selected {
            self.canvas.start_drag(point);
            return;
        }
        match self.canvas.shape_at_point(point) {
            Some(id) => {
                self.canvas.select(id);
                self.canvas.start_drag(point);
            }
            None => self.canvas.clear_selection(),
        }
    }

    /// End the active gesture and record its net effect.
    fn finish_gesture(&mut self) {
        if self.canvas.is_dragging() {
            if let Some(outcome) = self.canvas.end_drag() {
                self.history.record(Command::MoveShape {
                    shape_id: outcome.shape_id,
                    from: outcome.from,
                    to: outcome.to,
                });
            }
        } else if let Some(outcome) = self.canvas.end_resize() {
            self.history.record(Command::ResizeShape {
                shape_id: outcome.shape_id,
                before: outcome.before,
                after: outcome.after,
            });
        }
    }

    fn commit_shape(&mut self, shape: Shape) -> Result<(), EditorError> {
        debug!("adding {} {}", shape.kind(), shape.id());
        self.history
            .execute(Command::AddShape { shape }, &mut self.canvas)?;
        self.message = None;
        Ok(())
    }

    fn commit_polygon(&mut self, result: Result<Option<Shape>, ToolError>) -> Result<(), EditorError> {
        match result {
            Ok(Some(shape)) => self.commit_shape(shape),
            Ok(None) => Ok(()),
            Err(err) => {
                self.message = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    // --- Commands ---

    /// Switch tools. Unfinished drawing is discarded and a drag or resize in
    /// progress is abandoned where it is without a history entry. Picking a
    /// drawing tool also drops the selection.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.tools.current_tool == tool {
            return;
        }
        self.canvas.cancel_gesture();
        self.tools.set_tool(tool);
        if tool != ToolKind::Select {
            self.canvas.clear_selection();
        }
        debug!("tool: {}", tool.name());
    }

    /// Set the properties for new shapes and restyle the selected shape.
    ///
    /// Returns true if a property change was recorded.
    pub fn set_properties(&mut self, style: ShapeStyle) -> Result<bool, EditorError> {
        if !(style.stroke_thickness.is_finite() && style.stroke_thickness > 0.0) {
            warn!("ignoring stroke thickness {}", style.stroke_thickness);
            return Ok(false);
        }
        self.tools.current_style = style.clone();
        let Some(shape) = self.canvas.selected_shape() else {
            return Ok(false);
        };
        let before = shape.style().clone();
        if factory::effective_style(shape.kind(), &style) == before {
            return Ok(false);
        }
        let command = Command::ChangeProperties {
            shape_id: shape.id(),
            before,
            after: style,
        };
        self.history.execute(command, &mut self.canvas)?;
        Ok(true)
    }

    /// Delete the selected shape. Returns false if nothing was selected.
    pub fn delete_selected(&mut self) -> Result<bool, EditorError> {
        let Some(id) = self.canvas.selected_id() else {
            return Ok(false);
        };
        self.canvas.cancel_gesture();
        let command = Command::remove(&self.canvas, id)?;
        self.history.execute(command, &mut self.canvas)?;
        Ok(true)
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.canvas.cancel_gesture();
        let label = self.history.undo_label();
        let undone = self.history.undo(&mut self.canvas)?;
        if let (true, Some(label)) = (undone, label) {
            self.message = Some(format!("Undo: {label}"));
        }
        self.canvas.update_selection_markers();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.canvas.cancel_gesture();
        let label = self.history.redo_label();
        let redone = self.history.redo(&mut self.canvas)?;
        if let (true, Some(label)) = (redone, label) {
            self.message = Some(format!("Redo: {label}"));
        }
        self.canvas.update_selection_markers();
        Ok(redone)
    }

    /// Finish the polygon being drawn. Returns true if a polygon was added.
    pub fn close_polygon(&mut self) -> Result<bool, EditorError> {
        let result = self.tools.finish_polygon();
        let added = matches!(result, Ok(Some(_)));
        self.commit_polygon(result)?;
        Ok(added)
    }

    /// Abandon whatever is in progress: drawing is discarded and a drag or
    /// resize puts the shape back where it started.
    pub fn cancel(&mut self) {
        self.tools.cancel();
        self.canvas.revert_gesture();
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn zoom_reset(&mut self) {
        self.camera.reset();
    }

    pub fn zoom_text(&self) -> String {
        self.camera.zoom_text()
    }

    /// One-line summary for a status bar.
    pub fn status_text(&self) -> String {
        let mut text = format!(
            "Tool: {} | Shapes: {} | Zoom: {}",
            self.tools.current_tool.name(),
            self.canvas.document.len(),
            self.zoom_text()
        );
        if let Some(message) = &self.message {
            text.push_str(" | ");
            text.push_str(message);
        }
        text
    }

    // --- Projects ---

    /// Start over with an empty canvas of the given size.
    pub fn new_project(&mut self, width: f64, height: f64) -> Result<(), EditorError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(width) || !size_ok(height) {
            return Err(ProjectError::CanvasSize { width, height }.into());
        }
        self.replace_document(CanvasDocument::new(width, height));
        info!("new project {width}x{height}");
        Ok(())
    }

    /// Replace the canvas with a saved project. Every record is validated
    /// before anything changes; on error the editor is left as it was.
    pub fn load_project(&mut self, project: &ProjectFile) -> Result<(), EditorError> {
        let document = project.to_document().inspect_err(|err| {
            warn!("rejected project: {err}");
        })?;
        info!("loaded project with {} shapes", document.len());
        self.replace_document(document);
        Ok(())
    }

    pub fn save_project(&self) -> ProjectFile {
        ProjectFile::from_document(&self.canvas.document)
    }

    pub fn save_to(&self, storage: &dyn Storage, id: &str) -> Result<(), EditorError> {
        storage.save(id, &self.save_project())?;
        info!("saved project {id}");
        Ok(())
    }

    pub fn load_from(&mut self, storage: &dyn Storage, id: &str) -> Result<(), EditorError> {
        let project = storage.load(id)?;
        self.load_project(&project)
    }

    pub fn export_svg(&self) -> Result<String, EditorError> {
        Ok(export::export_svg(&self.canvas.document)?)
    }

    fn replace_document(&mut self, document: CanvasDocument) {
        self.tools.cancel();
        self.canvas.set_document(document);
        self.history.clear();
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ResizeHandle;
    use crate::shapes::{ArgbColor, ShapeGeometry, ShapeKind};
    use crate::storage::MemoryStorage;
    use kurbo::Rect;

    fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        editor.pointer_down(Point::new(from.0, from.1), MouseButton::Left).unwrap();
        editor.pointer_move(Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
        editor.pointer_move(Point::new(to.0, to.1));
        editor.pointer_up(Point::new(to.0, to.1), MouseButton::Left).unwrap();
    }

    fn click(editor: &mut Editor, at: (f64, f64), button: MouseButton) -> Result<(), EditorError> {
        editor.pointer_down(Point::new(at.0, at.1), button)?;
        editor.pointer_up(Point::new(at.0, at.1), button)
    }

    fn only_shape(editor: &Editor) -> &Shape {
        assert_eq!(editor.canvas().document.len(), 1);
        &editor.canvas().document.shapes()[0]
    }

    #[test]
    fn test_draw_rectangle_is_one_command() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (100.0, 100.0), (20.0, 40.0));

        let shape = only_shape(&editor);
        assert_eq!(shape.bounds(), Rect::new(20.0, 40.0, 100.0, 100.0));
        assert!(editor.canvas().is_selected(shape.id()));
        assert_eq!(editor.history().undo_count(), 1);

        editor.undo().unwrap();
        assert!(editor.canvas().document.is_empty());
        assert!(editor.canvas().handles().is_empty());
    }

    #[test]
    fn test_draw_square_normalizes() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Square);
        drag(&mut editor, (10.0, 10.0), (50.0, 30.0));
        assert_eq!(only_shape(&editor).bounds(), Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_new_shapes_use_current_properties() {
        let mut editor = Editor::new();
        let style = ShapeStyle {
            stroke_color: ArgbColor::rgb(255, 0, 0),
            fill_color: ArgbColor::rgb(0, 0, 255),
            stroke_thickness: 4.0,
            has_fill: true,
        };
        assert!(!editor.set_properties(style.clone()).unwrap());
        editor.select_tool(ToolKind::Ellipse);
        drag(&mut editor, (0.0, 0.0), (40.0, 20.0));
        assert_eq!(only_shape(&editor).style(), &style);
    }

    #[test]
    fn test_resize_scenario_with_undo() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        assert_eq!(
            editor.canvas().handle_at_point(Point::new(100.0, 100.0)),
            Some(ResizeHandle::BottomRight)
        );
        drag(&mut editor, (100.0, 100.0), (150.0, 150.0));
        assert_eq!(only_shape(&editor).bounds(), Rect::new(0.0, 0.0, 150.0, 150.0));
        assert_eq!(editor.history().undo_label(), Some("Resize shape"));

        editor.undo().unwrap();
        assert_eq!(only_shape(&editor).bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        editor.redo().unwrap();
        assert_eq!(only_shape(&editor).bounds(), Rect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[test]
    fn test_line_resize_scenario() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Line);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        drag(&mut editor, (100.0, 100.0), (110.0, 100.0));
        assert_eq!(
            only_shape(&editor).geometry(),
            ShapeGeometry::Segment {
                start: Point::ZERO,
                end: Point::new(110.0, 100.0),
            }
        );
    }

    #[test]
    fn test_drag_selected_shape_records_move() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        drag(&mut editor, (50.0, 50.0), (80.0, 70.0));
        assert_eq!(only_shape(&editor).anchor(), Point::new(30.0, 20.0));
        assert_eq!(editor.history().undo_count(), 2);

        editor.undo().unwrap();
        assert_eq!(only_shape(&editor).anchor(), Point::ZERO);
        // Handles follow the restored geometry
        assert_eq!(editor.canvas().handles()[0].position, Point::ZERO);
    }

    #[test]
    fn test_click_without_motion_records_nothing() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        click(&mut editor, (50.0, 50.0), MouseButton::Left).unwrap();
        assert_eq!(editor.history().undo_count(), 1);
    }

    #[test]
    fn test_click_selects_topmost_then_empty_clears() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        drag(&mut editor, (50.0, 50.0), (150.0, 150.0));
        let shapes: Vec<_> = editor.canvas().document.shapes().iter().map(Shape::id).collect();
        editor.select_tool(ToolKind::Select);
        // The last drawn shape stays selected
        assert_eq!(editor.canvas().selected_id(), Some(shapes[1]));

        click(&mut editor, (75.0, 75.0), MouseButton::Left).unwrap();
        assert_eq!(editor.canvas().selected_id(), Some(shapes[1]));

        // The selected shape is skipped when looking for another one
        click(&mut editor, (20.0, 20.0), MouseButton::Left).unwrap();
        assert_eq!(editor.canvas().selected_id(), Some(shapes[0]));

        click(&mut editor, (500.0, 500.0), MouseButton::Left).unwrap();
        assert_eq!(editor.canvas().selected_id(), None);
        assert!(editor.canvas().handles().is_empty());
    }

    #[test]
    fn test_polygon_closed_by_right_click() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Polygon);
        for p in [(0.0, 0.0), (100.0, 0.0), (50.0, 80.0)] {
            click(&mut editor, p, MouseButton::Left).unwrap();
        }
        assert!(editor.canvas().document.is_empty());
        click(&mut editor, (300.0, 300.0), MouseButton::Right).unwrap();

        let Shape::Polygon(poly) = only_shape(&editor) else {
            panic!("expected polygon");
        };
        assert_eq!(poly.points.len(), 3);
        assert_eq!(editor.history().undo_count(), 1);
    }

    #[test]
    fn test_polygon_closed_near_first_point_and_by_double_click() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Polygon);
        for p in [(0.0, 0.0), (100.0, 0.0), (50.0, 80.0), (3.0, 4.0)] {
            click(&mut editor, p, MouseButton::Left).unwrap();
        }
        assert_eq!(editor.canvas().document.len(), 1);

        for p in [(200.0, 0.0), (300.0, 0.0), (250.0, 80.0)] {
            click(&mut editor, p, MouseButton::Left).unwrap();
        }
        editor.double_click(Point::new(250.0, 80.0)).unwrap();
        assert_eq!(editor.canvas().document.len(), 2);
        assert_eq!(editor.history().undo_count(), 2);
    }

    #[test]
    fn test_short_polygon_is_discarded() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Polygon);
        click(&mut editor, (0.0, 0.0), MouseButton::Left).unwrap();
        click(&mut editor, (100.0, 0.0), MouseButton::Left).unwrap();

        let err = editor.handle_action(EditorAction::ClosePolygon).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Tool(ToolError::NotEnoughPolygonPoints(2))
        ));
        assert!(editor.canvas().document.is_empty());
        assert!(!editor.can_undo());
        assert!(editor.status_text().contains("at least 3 points"));
        // Nothing left to close
        assert!(!editor.close_polygon().unwrap());
    }

    #[test]
    fn test_switching_tool_discards_drawing() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        editor.pointer_down(Point::ZERO, MouseButton::Left).unwrap();
        editor.pointer_move(Point::new(50.0, 50.0));
        assert!(editor.preview_shape().is_some());
        editor.select_tool(ToolKind::Select);
        editor.pointer_up(Point::new(50.0, 50.0), MouseButton::Left).unwrap();
        assert!(editor.canvas().document.is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_switching_tool_abandons_drag() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        editor.pointer_down(Point::new(50.0, 50.0), MouseButton::Left).unwrap();
        editor.pointer_move(Point::new(80.0, 70.0));
        editor.select_tool(ToolKind::Line);

        assert!(editor.canvas().gesture().is_idle());
        assert_eq!(editor.history().undo_count(), 1);
        assert_eq!(only_shape(&editor).anchor(), Point::new(30.0, 20.0));
        assert!(editor.canvas().selected_id().is_none());
    }

    #[test]
    fn test_set_properties_on_selection() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let original = only_shape(&editor).style().clone();

        let style = ShapeStyle {
            stroke_thickness: 5.0,
            ..ShapeStyle::default()
        };
        assert!(editor.set_properties(style.clone()).unwrap());
        assert_eq!(only_shape(&editor).style().stroke_thickness, 5.0);
        // Same properties again: nothing new to record
        assert!(!editor.set_properties(style).unwrap());
        assert_eq!(editor.history().undo_count(), 2);

        editor.undo().unwrap();
        assert_eq!(only_shape(&editor).style(), &original);
    }

    #[test]
    fn test_line_ignores_fill_when_restyled() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Line);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let style = ShapeStyle {
            fill_color: ArgbColor::rgb(255, 0, 0),
            has_fill: true,
            ..ShapeStyle::default()
        };
        // Only the fill differs, and lines never fill
        assert!(!editor.set_properties(style).unwrap());
    }

    #[test]
    fn test_non_positive_thickness_is_ignored() {
        let mut editor = Editor::new();
        let style = ShapeStyle {
            stroke_thickness: 0.0,
            ..ShapeStyle::default()
        };
        assert!(!editor.set_properties(style).unwrap());
        assert_eq!(editor.current_style().stroke_thickness, 2.0);
    }

    #[test]
    fn test_delete_and_undo_restores_order() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        drag(&mut editor, (20.0, 0.0), (30.0, 10.0));
        drag(&mut editor, (40.0, 0.0), (50.0, 10.0));
        let before = editor.canvas().document.clone();

        editor.select_tool(ToolKind::Select);
        click(&mut editor, (25.0, 5.0), MouseButton::Left).unwrap();
        assert!(editor.delete_selected().unwrap());
        assert_eq!(editor.canvas().document.len(), 2);
        assert_eq!(editor.canvas().selected_id(), None);
        assert!(!editor.delete_selected().unwrap());

        editor.handle_action(EditorAction::Undo).unwrap();
        assert_eq!(editor.canvas().document, before);
        assert!(editor.status_text().ends_with("Undo: Delete shape"));
    }

    #[test]
    fn test_undo_everything_then_redo() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Ellipse);
        drag(&mut editor, (0.0, 0.0), (100.0, 50.0));
        editor.select_tool(ToolKind::Select);
        drag(&mut editor, (50.0, 25.0), (60.0, 35.0));
        drag(&mut editor, (110.0, 60.0), (130.0, 80.0));
        let end_state = editor.canvas().document.clone();

        while editor.undo().unwrap() {}
        assert!(editor.canvas().document.is_empty());
        while editor.redo().unwrap() {}
        assert_eq!(editor.canvas().document, end_state);
    }

    #[test]
    fn test_cancel_reverts_resize() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (100.0, 100.0));
        editor.select_tool(ToolKind::Select);

        editor.pointer_down(Point::new(100.0, 100.0), MouseButton::Left).unwrap();
        editor.pointer_move(Point::new(200.0, 200.0));
        editor.handle_action(EditorAction::Cancel).unwrap();
        editor.pointer_up(Point::new(200.0, 200.0), MouseButton::Left).unwrap();
        assert_eq!(only_shape(&editor).bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(editor.history().undo_count(), 1);
    }

    #[test]
    fn test_zoom_leaves_shapes_alone() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let before = editor.canvas().document.clone();

        editor.handle_action(EditorAction::ZoomIn).unwrap();
        editor.handle_action(EditorAction::ZoomIn).unwrap();
        assert_eq!(editor.zoom_text(), "120%");
        assert_eq!(editor.canvas().document, before);
        editor.zoom_reset();
        assert_eq!(editor.zoom_text(), "100%");
        assert!(editor.status_text().contains("Shapes: 1"));
    }

    #[test]
    fn test_load_project_replaces_state_and_clears_history() {
        let mut source = Editor::new();
        source.select_tool(ToolKind::Circle);
        drag(&mut source, (0.0, 0.0), (30.0, 30.0));
        let project = source.save_project();

        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        editor.load_project(&project).unwrap();

        assert_eq!(only_shape(&editor).kind(), ShapeKind::Ellipse);
        assert!(!editor.can_undo());
        assert_eq!(editor.canvas().selected_id(), None);
    }

    #[test]
    fn test_bad_project_leaves_editor_unchanged() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let before = editor.canvas().document.clone();

        let mut project = editor.save_project();
        project.shapes.push(project.shapes[0].clone());
        project.shapes[1].stroke_color = "#nothex".to_string();

        assert!(matches!(
            editor.load_project(&project),
            Err(EditorError::Project(ProjectError::Shape { index: 1, .. }))
        ));
        assert_eq!(editor.canvas().document, before);
        assert!(editor.can_undo());
    }

    #[test]
    fn test_new_project() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Line);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        assert!(editor.new_project(0.0, 100.0).is_err());
        assert_eq!(editor.canvas().document.len(), 1);

        editor.new_project(640.0, 480.0).unwrap();
        assert!(editor.canvas().document.is_empty());
        assert_eq!(editor.canvas().document.width, 640.0);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_storage_round_trip() {
        let storage = MemoryStorage::new();
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Rectangle);
        drag(&mut editor, (5.0, 5.0), (25.0, 15.0));
        editor.save_to(&storage, "sketch").unwrap();

        let mut other = Editor::new();
        other.load_from(&storage, "sketch").unwrap();
        assert_eq!(only_shape(&other).bounds(), Rect::new(5.0, 5.0, 25.0, 15.0));
        assert!(matches!(
            other.load_from(&storage, "missing"),
            Err(EditorError::Storage(StorageError::NotFound(_)))
        ));
    }

    #[test]
    fn test_export_svg() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Line);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let svg = editor.export_svg().unwrap();
        assert!(svg.contains("<line"));
    }

    #[test]
    fn test_config_drives_history_depth() {
        let config = EditorConfig {
            max_undo_depth: 2,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(config);
        editor.select_tool(ToolKind::Rectangle);
        for i in 0..4 {
            let x = i as f64 * 20.0;
            drag(&mut editor, (x, 0.0), (x + 10.0, 10.0));
        }
        assert_eq!(editor.history().undo_count(), 2);
    }

    #[test]
    fn test_pointer_events() {
        let mut editor = Editor::new();
        editor.select_tool(ToolKind::Line);
        for event in [
            PointerEvent::Down {
                position: Point::ZERO,
                button: MouseButton::Left,
            },
            PointerEvent::Move {
                position: Point::new(30.0, 40.0),
            },
            PointerEvent::Up {
                position: Point::new(30.0, 40.0),
                button: MouseButton::Left,
            },
        ] {
            editor.handle_pointer_event(event).unwrap();
        }
        assert_eq!(only_shape(&editor).bounds(), Rect::new(0.0, 0.0, 30.0, 40.0));
    }
}
