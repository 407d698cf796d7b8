use crate::domain::card::{CardId, ColumnId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card was dropped into a different column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMoveEvent {
    pub card_id: CardId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
    /// Position in the source column, when the card was still in the collection
    pub from_index: Option<usize>,
    pub to_index: usize,
    pub timestamp: DateTime<Utc>,
}

/// A card changed position inside its own column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReorderEvent {
    /// Absent for reorders requested by index only
    pub card_id: Option<CardId>,
    pub column_id: ColumnId,
    pub from_index: usize,
    pub to_index: usize,
    pub timestamp: DateTime<Utc>,
}

/// Change requested by a finished drag or a programmatic action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    CardMoved(CardMoveEvent),
    CardReordered(CardReorderEvent),
}

/// Receiver of board events.
///
/// The application owns the card collection; it applies each event (for
/// example with [`move_card`](crate::domain::collection::move_card) or
/// [`reorder`](crate::domain::collection::reorder)) and re-renders.
pub trait EventSink {
    fn emit(&mut self, event: BoardEvent);
}

impl EventSink for Vec<BoardEvent> {
    fn emit(&mut self, event: BoardEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: BoardEvent) {
        (**self).emit(event);
    }
}

#[cfg(feature = "channel-sink")]
impl EventSink for tokio::sync::mpsc::UnboundedSender<BoardEvent> {
    fn emit(&mut self, event: BoardEvent) {
        if self.send(event).is_err() {
            tracing::debug!("board event dropped, receiver closed");
        }
    }
}

type MoveCallback = Box<dyn FnMut(&CardId, &ColumnId, &ColumnId, usize)>;
type ReorderCallback = Box<dyn FnMut(&ColumnId, usize, usize)>;

/// Plain callbacks in the shape of `onCardMove` / `onCardReorder` handlers
#[derive(Default)]
pub struct Callbacks {
    on_card_move: Option<MoveCallback>,
    on_card_reorder: Option<ReorderCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with `(card_id, from_column, to_column, new_index)`
    pub fn on_card_move<F>(mut self, f: F) -> Self
    where
        F: FnMut(&CardId, &ColumnId, &ColumnId, usize) + 'static,
    {
        self.on_card_move = Some(Box::new(f));
        self
    }

    /// Called with `(column, from_index, to_index)`
    pub fn on_card_reorder<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ColumnId, usize, usize) + 'static,
    {
        self.on_card_reorder = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_card_move", &self.on_card_move.is_some())
            .field("on_card_reorder", &self.on_card_reorder.is_some())
            .finish()
    }
}

impl EventSink for Callbacks {
    fn emit(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::CardMoved(e) => {
                if let Some(cb) = self.on_card_move.as_mut() {
                    cb(&e.card_id, &e.from_column_id, &e.to_column_id, e.to_index);
                }
            }
            BoardEvent::CardReordered(e) => {
                if let Some(cb) = self.on_card_reorder.as_mut() {
                    cb(&e.column_id, e.from_index, e.to_index);
                }
            }
        }
    }
}
