//! The editing session: tool-driven interaction state machine.
//!
//! One [`Editor`] owns the document, camera, grid, selection and command
//! stack for a session, and turns pointer/keyboard events into commands.
//! Every entry point returns `true` when state changed and a redraw is
//! warranted, `false` for a no-op.

use crate::camera::Camera;
use crate::command::Command;
use crate::document::Document;
use crate::grid::GridSettings;
use crate::history::CommandStack;
use crate::selection::Selection;
use crate::shapes::{Circle, Line, Polygon, Rectangle, Shape, ShapeId, ShapeStyle};
use kurbo::{Point, Rect, Vec2};
use log::trace;
use serde::{Deserialize, Serialize};

/// Hit-test tolerance in screen pixels; divided by zoom when testing in
/// world space so clicking feels the same at any zoom level.
const HIT_TOLERANCE_PX: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Select,
    Line,
    Rectangle,
    Circle,
    Polygon,
}

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
    /// The add-to-selection modifier.
    pub fn extends_selection(&self) -> bool {
        self.shift
    }
}

/// Interaction state of the editor.
#[derive(Debug, Clone, Default)]
enum EditorState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A shape is being drawn; preview only, the document is untouched.
    Drawing {
        shape: Shape,
        /// Current (snapped) pointer position in world space.
        cursor: Point,
    },
    /// The selection is being dragged; the move commits as one command on
    /// release.
    Dragging {
        anchor: Point,
        current: Point,
    },
    /// A rubber-band selection rectangle is being stretched.
    RubberBand {
        start: Point,
        current: Point,
    },
    /// The view is being panned with the middle button.
    Panning {
        last_screen: Point,
    },
}

/// An interactive editing session.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: Document,
    camera: Camera,
    grid: GridSettings,
    selection: Selection,
    history: CommandStack,
    tool: Tool,
    state: EditorState,
    /// Style applied to newly drawn shapes; set by tooling.
    pub current_style: ShapeStyle,
}

impl Editor {
    /// Create a new editor with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor over an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    // --- query surface (consumed once per frame by the renderer) ---

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The in-progress shape being drawn, if any. For an open polygon the
    /// current cursor is appended as a trailing preview vertex.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.state {
            EditorState::Drawing { shape, cursor } => match shape {
                Shape::Polygon(poly) => {
                    let mut preview = poly.clone();
                    if preview.vertices.last() != Some(cursor) {
                        preview.append_vertex(*cursor);
                    }
                    Some(Shape::Polygon(preview))
                }
                other => Some(other.clone()),
            },
            _ => None,
        }
    }

    /// The rubber-band rectangle being stretched, if any.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self.state {
            EditorState::RubberBand { start, current } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    /// Live offset of the dragged selection, for preview rendering. The
    /// document itself moves only when the drag commits.
    pub fn drag_offset(&self) -> Option<Vec2> {
        match self.state {
            EditorState::Dragging { anchor, current } => Some(current - anchor),
            _ => None,
        }
    }

    // --- command surface (one entry point per user action) ---

    /// Switch tools, abandoning any in-progress interaction.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        let cancelled = self.cancel();
        if self.tool == tool {
            return cancelled;
        }
        trace!("tool: {:?} -> {:?}", self.tool, tool);
        self.tool = tool;
        true
    }

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(&mut self, screen: Point, button: MouseButton, mods: Modifiers) -> bool {
        match button {
            MouseButton::Middle => {
                self.state = EditorState::Panning {
                    last_screen: screen,
                };
                true
            }
            MouseButton::Left => self.left_down(screen, mods),
            MouseButton::Right => false,
        }
    }

    fn left_down(&mut self, screen: Point, mods: Modifiers) -> bool {
        let world = self.camera.screen_to_world(screen);
        let snapped = self.grid.snap(world);

        match self.tool {
            Tool::Select => {
                // Hit test on the raw point: snapping is for placement, not
                // picking
                match self.document.shape_at_point(world, self.world_tolerance()) {
                    Some(id) => {
                        if mods.extends_selection() {
                            self.selection.toggle(id);
                        } else if !self.selection.contains(id) {
                            self.selection.select_only(id);
                        }
                        if self.selection.contains(id) {
                            self.state = EditorState::Dragging {
                                anchor: snapped,
                                current: snapped,
                            };
                        }
                    }
                    None => {
                        if !mods.extends_selection() {
                            self.selection.clear();
                        }
                        self.state = EditorState::RubberBand {
                            start: world,
                            current: world,
                        };
                    }
                }
                true
            }
            Tool::Polygon => {
                match &mut self.state {
                    EditorState::Drawing {
                        shape: Shape::Polygon(poly),
                        cursor,
                    } => {
                        poly.append_vertex(snapped);
                        *cursor = snapped;
                    }
                    _ => {
                        let mut poly = Polygon::new(snapped);
                        poly.style = self.current_style;
                        self.state = EditorState::Drawing {
                            shape: Shape::Polygon(poly),
                            cursor: snapped,
                        };
                    }
                }
                true
            }
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                let mut shape = match self.tool {
                    Tool::Line => Shape::Line(Line::new(snapped, snapped)),
                    Tool::Rectangle => Shape::Rectangle(Rectangle::new(snapped, snapped)),
                    _ => Shape::Circle(Circle::new(snapped, snapped)),
                };
                *shape.style_mut() = self.current_style;
                self.state = EditorState::Drawing {
                    shape,
                    cursor: snapped,
                };
                true
            }
        }
    }

    /// Handle pointer movement.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        let world = self.camera.screen_to_world(screen);
        let snapped = self.grid.snap(world);

        match &mut self.state {
            EditorState::Idle => false,
            EditorState::Drawing { shape, cursor } => {
                *cursor = snapped;
                // Update the free endpoint of two-point shapes; a polygon
                // only gains vertices on clicks
                match shape {
                    Shape::Line(line) => line.end = snapped,
                    Shape::Rectangle(rect) => rect.opposite = snapped,
                    Shape::Circle(circle) => circle.edge = snapped,
                    Shape::Polygon(_) => {}
                }
                true
            }
            EditorState::Dragging { current, .. } => {
                *current = snapped;
                true
            }
            EditorState::RubberBand { current, .. } => {
                *current = world;
                true
            }
            EditorState::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.camera.pan(delta);
                true
            }
        }
    }

    /// Handle a pointer release.
    pub fn pointer_up(&mut self, _screen: Point, button: MouseButton) -> bool {
        match (button, std::mem::take(&mut self.state)) {
            (MouseButton::Middle, EditorState::Panning { .. }) => true,
            (MouseButton::Left, EditorState::Drawing { shape, cursor }) => {
                if let Shape::Polygon(_) = shape {
                    // Polygons finalize via complete_polygon, not release
                    self.state = EditorState::Drawing { shape, cursor };
                    return false;
                }
                self.history
                    .execute(Command::add_shape(shape), &mut self.document, &mut self.selection);
                true
            }
            (MouseButton::Left, EditorState::Dragging { anchor, current }) => {
                let delta = current - anchor;
                match Command::move_shapes(&self.document, self.selection.ids(), delta) {
                    Some(cmd) => {
                        self.history
                            .execute(cmd, &mut self.document, &mut self.selection);
                        true
                    }
                    // Zero-delta release: a plain click, selection already
                    // updated on pointer-down
                    None => true,
                }
            }
            (MouseButton::Left, EditorState::RubberBand { start, current }) => {
                let rect = Rect::from_points(start, current);
                let hits = self.document.shapes_in_rect(rect);
                self.selection.extend(hits);
                true
            }
            (_, state) => {
                // Unrelated button: keep the interaction going
                self.state = state;
                false
            }
        }
    }

    /// Finalize the polygon under construction. Requires at least three
    /// vertices; fewer discards the in-progress shape silently.
    pub fn complete_polygon(&mut self) -> bool {
        let EditorState::Drawing {
            shape: Shape::Polygon(mut poly),
            ..
        } = std::mem::take(&mut self.state)
        else {
            return false;
        };
        if poly.close() {
            self.history.execute(
                Command::add_shape(Shape::Polygon(poly)),
                &mut self.document,
                &mut self.selection,
            );
        } else {
            trace!("polygon discarded with {} vertices", poly.vertices.len());
        }
        true
    }

    /// Abandon any in-progress drawing, drag, rubber band or pan without
    /// touching the command stack.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.state, EditorState::Idle) {
            return false;
        }
        self.state = EditorState::Idle;
        true
    }

    /// Delete the selected shapes as one command. No-op on an empty
    /// selection.
    pub fn delete_selection(&mut self) -> bool {
        let Some(cmd) = Command::delete_shapes(&self.document, self.selection.ids()) else {
            return false;
        };
        self.history
            .execute(cmd, &mut self.document, &mut self.selection);
        true
    }

    /// Replace one control point of a shape as a reversible command. The
    /// new position is snapped like any other placement.
    pub fn reshape_shape(&mut self, id: ShapeId, point_index: usize, point: Point) -> bool {
        let snapped = self.grid.snap(point);
        let Some(shape) = self.document.get(id) else {
            return false;
        };
        let after = shape.with_point(point_index, snapped);
        if after == *shape {
            return false;
        }
        let Some(cmd) = Command::reshape_shape(&self.document, after) else {
            return false;
        };
        self.history
            .execute(cmd, &mut self.document, &mut self.selection);
        true
    }

    /// Undo the last command; reconciles the selection afterwards.
    pub fn undo(&mut self) -> bool {
        let done = self.history.undo(&mut self.document, &mut self.selection);
        if done {
            self.selection.retain_existing(&self.document);
        }
        done
    }

    /// Redo the last undone command; reconciles the selection afterwards.
    pub fn redo(&mut self) -> bool {
        let done = self.history.redo(&mut self.document, &mut self.selection);
        if done {
            self.selection.retain_existing(&self.document);
        }
        done
    }

    /// Toggle grid snapping; takes effect on the next pointer interaction.
    pub fn toggle_grid_snap(&mut self) -> bool {
        self.grid.snap_enabled = !self.grid.snap_enabled;
        true
    }

    /// Toggle the grid overlay.
    pub fn toggle_grid_visible(&mut self) -> bool {
        self.grid.visible = !self.grid.visible;
        true
    }

    /// Pan the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }
        self.camera.pan(delta);
        true
    }

    /// Zoom, keeping the screen anchor fixed. Returns false when the zoom
    /// was already clamped at the requested end of the range.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        let before = self.camera.zoom;
        self.camera.zoom_at(anchor, factor);
        (self.camera.zoom - before).abs() >= f64::EPSILON
    }

    fn world_tolerance(&self) -> f64 {
        HIT_TOLERANCE_PX / self.camera.zoom
    }
}
