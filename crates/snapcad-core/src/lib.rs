//! SnapCAD Core Library
//!
//! Rendering-agnostic editing engine for the SnapCAD 2D vector drawing
//! application: shape model, reversible command history, selection and
//! hit-testing, and view/grid state.

pub mod camera;
pub mod command;
pub mod document;
pub mod editor;
pub mod error;
pub mod grid;
pub mod history;
pub mod selection;
pub mod shapes;

pub use camera::Camera;
pub use command::Command;
pub use document::{Document, RemovedShape};
pub use editor::{Editor, Modifiers, MouseButton, Tool};
pub use error::Error;
pub use grid::{DEFAULT_GRID_SIZE, GridSettings};
pub use history::CommandStack;
pub use selection::Selection;
pub use shapes::{
    Circle, Line, MIN_POLYGON_VERTICES, Polygon, Rectangle, Rgba, Shape, ShapeId, ShapeStyle,
};
