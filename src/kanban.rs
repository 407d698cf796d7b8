//! A board instance: the drag session, layout registry and column state
//! belonging to one rendered kanban board.
//!
//! The application keeps owning the cards. Every call that needs them takes
//! the current collection by reference, and the changes a drop asks for come
//! out of the board's [`EventSink`].

use crate::domain::board::BoardConfig;
use crate::domain::card::{Card, CardId, ColumnId};
use crate::domain::collection::{find_card, index_in_column};
use crate::domain::geometry::{Point, Rect};
use crate::drag::event::{BoardEvent, CardMoveEvent, CardReorderEvent, EventSink};
use crate::drag::session::{DragSession, DragState};
use crate::drag::target::{resolve_drop_target, DropTarget};
use crate::error::Result;
use crate::layout::LayoutRegistry;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Identifies one board instance in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(Uuid);

impl BoardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kanban board state
#[derive(Debug)]
pub struct KanbanBoard<S> {
    id: BoardId,
    config: BoardConfig,
    layouts: LayoutRegistry,
    session: DragSession,
    collapsed: HashSet<ColumnId>,
    sink: S,
}

impl<S: EventSink> KanbanBoard<S> {
    pub fn new(config: BoardConfig, sink: S) -> Self {
        let collapsed = config
            .columns
            .iter()
            .filter(|col| col.collapsed)
            .map(|col| col.id.clone())
            .collect();

        Self {
            id: BoardId::new(),
            session: DragSession::new(config.drag_enabled),
            config,
            layouts: LayoutRegistry::new(),
            collapsed,
            sink,
        }
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    pub fn register_column_layout(&mut self, column_id: impl Into<ColumnId>, rect: Rect) {
        self.layouts.register_column_layout(column_id.into(), rect);
    }

    pub fn register_card_layout(&mut self, card_id: impl Into<CardId>, rect: Rect) {
        self.layouts.register_card_layout(card_id.into(), rect);
    }

    /// Enables or disables dragging for drags started from now on
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config.drag_enabled = enabled;
        self.session.set_drag_enabled(enabled);
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn drag_state(&self) -> &DragState {
        self.session.state()
    }

    /// Picks up a card at `position`.
    ///
    /// The card's own position becomes the initial target, so releasing it
    /// without ever hovering an accepting column changes nothing. Returns
    /// `false` when the card is unknown, dragging is disabled or a drag is
    /// already running.
    pub fn begin_drag<P>(&mut self, cards: &[Card<P>], card_id: &CardId, position: Point) -> bool {
        let Some(card) = find_card(cards, card_id) else {
            tracing::debug!(board = %self.id, card = %card_id, "drag start on unknown card");
            return false;
        };

        if let Some(active) = &self.session.state().active_card_id {
            tracing::warn!(
                board = %self.id,
                card = %card_id,
                active = %active,
                "drag already in progress, start rejected"
            );
            return false;
        }

        if !self
            .session
            .start(card.id.clone(), card.column_id.clone(), position)
        {
            return false;
        }

        tracing::debug!(board = %self.id, card = %card.id, column = %card.column_id, "drag started");
        let index = index_in_column(cards, card_id);
        self.session.update(position, None, index);
        true
    }

    /// Follows the pointer and resolves the drop target under it.
    ///
    /// A position over no accepting column leaves the previous target in
    /// place. Does nothing while idle.
    pub fn drag_to<P>(&mut self, cards: &[Card<P>], position: Point) -> Option<DropTarget> {
        let card_id = self.session.state().active_card_id.clone()?;

        let target = find_card(cards, &card_id).and_then(|card| {
            resolve_drop_target(position, card, &self.config.columns, cards, &self.layouts)
        });

        match &target {
            Some(t) => {
                tracing::trace!(board = %self.id, column = %t.column_id, index = t.index, "drag over target");
                self.session
                    .update(position, Some(t.column_id.clone()), Some(t.index));
            }
            None => self.session.update(position, None, None),
        }

        target
    }

    /// Drops the dragged card on the last resolved target
    pub fn finish_drag<P>(&mut self, cards: &[Card<P>]) -> Option<BoardEvent> {
        self.end_drag(cards, None, None)
    }

    /// Drops the dragged card on an explicit target
    pub fn finish_drag_at<P>(
        &mut self,
        cards: &[Card<P>],
        column_id: ColumnId,
        index: usize,
    ) -> Option<BoardEvent> {
        self.end_drag(cards, Some(column_id), Some(index))
    }

    pub fn cancel_drag(&mut self) {
        if let Some(card_id) = &self.session.state().active_card_id {
            tracing::debug!(board = %self.id, card = %card_id, "drag cancelled");
        }
        self.session.cancel();
    }

    /// Requests a move without a gesture. Unknown cards are ignored.
    pub fn move_card_action<P>(
        &mut self,
        cards: &[Card<P>],
        card_id: &CardId,
        to_column_id: ColumnId,
        to_index: usize,
    ) -> Option<BoardEvent> {
        let card = find_card(cards, card_id)?;

        let event = BoardEvent::CardMoved(CardMoveEvent {
            card_id: card.id.clone(),
            from_column_id: card.column_id.clone(),
            to_column_id,
            from_index: index_in_column(cards, card_id),
            to_index,
            timestamp: Utc::now(),
        });
        self.dispatch(Some(event))
    }

    /// Requests a reorder inside `column_id` without a gesture
    pub fn reorder_card_action(
        &mut self,
        column_id: ColumnId,
        from_index: usize,
        to_index: usize,
    ) -> Option<BoardEvent> {
        let event = BoardEvent::CardReordered(CardReorderEvent {
            card_id: None,
            column_id,
            from_index,
            to_index,
            timestamp: Utc::now(),
        });
        self.dispatch(Some(event))
    }

    /// Flips a column between collapsed and expanded, returning the new state
    pub fn toggle_column_collapse(&mut self, column_id: &ColumnId) -> Result<bool> {
        self.config.column(column_id)?;

        let collapsed = if self.collapsed.remove(column_id) {
            false
        } else {
            self.collapsed.insert(column_id.clone());
            true
        };
        Ok(collapsed)
    }

    pub fn is_column_collapsed(&self, column_id: &ColumnId) -> bool {
        self.collapsed.contains(column_id)
    }

    fn end_drag<P>(
        &mut self,
        cards: &[Card<P>],
        column_id: Option<ColumnId>,
        index: Option<usize>,
    ) -> Option<BoardEvent> {
        let card_id = self.session.state().active_card_id.clone();
        let event = self.session.end(cards, column_id, index);
        if let Some(card_id) = card_id {
            tracing::debug!(board = %self.id, card = %card_id, changed = event.is_some(), "drag ended");
        }
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: Option<BoardEvent>) -> Option<BoardEvent> {
        let event = event?;
        match &event {
            BoardEvent::CardMoved(e) => tracing::debug!(
                board = %self.id,
                card = %e.card_id,
                from = %e.from_column_id,
                to = %e.to_column_id,
                index = e.to_index,
                "card moved"
            ),
            BoardEvent::CardReordered(e) => tracing::debug!(
                board = %self.id,
                column = %e.column_id,
                from = e.from_index,
                to = e.to_index,
                "card reordered"
            ),
        }
        self.sink.emit(event.clone());
        Some(event)
    }
}
