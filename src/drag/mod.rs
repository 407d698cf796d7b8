pub mod event;
pub mod session;
pub mod target;

pub use event::{BoardEvent, Callbacks, CardMoveEvent, CardReorderEvent, EventSink};
pub use session::{DragSession, DragState};
pub use target::{resolve_drop_target, DropTarget};
