//! # Kanban Drag Core
//!
//! Drag-and-drop reordering engine for kanban board UIs.
//!
//! The rendering layer reports measured rectangles and raw pointer
//! positions; this crate resolves where a dragged card would land, enforces
//! column placement rules and reports the resulting move or reorder. The
//! card collection itself stays with the application, which can apply the
//! reported changes with the pure functions in [`domain::collection`].

pub mod domain;
pub mod drag;
pub mod error;
pub mod kanban;
pub mod layout;

// Re-export commonly used types
pub use domain::{
    board::{BoardConfig, Column},
    card::{Card, CardId, ColumnId},
    geometry::{Point, Rect},
};
pub use drag::{BoardEvent, Callbacks, CardMoveEvent, CardReorderEvent, DropTarget, EventSink};
pub use error::{DragError, Result};
pub use kanban::{BoardId, KanbanBoard};
pub use layout::LayoutRegistry;
