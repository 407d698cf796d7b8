//! Drag session state machine.
//!
//! One session exists per board. It is `Idle` until [`DragSession::start`],
//! follows the pointer through any number of [`DragSession::update`] calls
//! and returns to `Idle` on [`DragSession::end`] or
//! [`DragSession::cancel`]. The session never touches the card collection;
//! `end` only reports which change the drop asks for.

use crate::domain::card::{Card, CardId, ColumnId};
use crate::domain::collection::cards_in_column;
use crate::domain::geometry::Point;
use crate::drag::event::{BoardEvent, CardMoveEvent, CardReorderEvent};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Snapshot of the in-progress drag. The default value is the idle state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub active_card_id: Option<CardId>,
    /// Column the card was picked up from
    pub active_column_id: Option<ColumnId>,
    pub target_column_id: Option<ColumnId>,
    /// Insertion index within `target_column_id`
    pub target_index: usize,
    pub position: Point,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.active_card_id.is_some()
    }
}

/// The single drag of one board
#[derive(Debug, Clone)]
pub struct DragSession {
    state: DragState,
    drag_enabled: bool,
}

impl DragSession {
    pub fn new(drag_enabled: bool) -> Self {
        Self {
            state: DragState::default(),
            drag_enabled,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_active()
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    /// Takes effect on the next `start`; a drag already running is not affected
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    /// Picks up `card_id` from `column_id`.
    ///
    /// Returns `false` without touching the state when dragging is disabled
    /// or another drag is still active.
    pub fn start(&mut self, card_id: CardId, column_id: ColumnId, position: Point) -> bool {
        if !self.drag_enabled {
            tracing::trace!(card = %card_id, "drag disabled, start ignored");
            return false;
        }

        if self.is_dragging() {
            tracing::trace!(card = %card_id, "drag already in progress, start ignored");
            return false;
        }

        self.state = DragState {
            active_card_id: Some(card_id),
            active_column_id: Some(column_id.clone()),
            target_column_id: Some(column_id),
            target_index: 0,
            position,
        };
        true
    }

    /// Moves the drag to `position`.
    ///
    /// The target column and index are only replaced when given; `None`
    /// keeps the previous value. Ignored while idle.
    pub fn update(
        &mut self,
        position: Point,
        target_column_id: Option<ColumnId>,
        target_index: Option<usize>,
    ) {
        if !self.is_dragging() {
            tracing::trace!("update on idle drag session ignored");
            return;
        }

        self.state.position = position;
        if let Some(column_id) = target_column_id {
            self.state.target_column_id = Some(column_id);
        }
        if let Some(index) = target_index {
            self.state.target_index = index;
        }
    }

    /// Drops the card and returns to idle.
    ///
    /// Explicit arguments override the last target seen by `update`. A drop
    /// into the source column yields a reorder event when the index changes;
    /// a drop into another column yields a move event. `cards` is the
    /// collection as the application currently holds it and is only read to
    /// find the card's index in the source column. A card that is no longer
    /// in the source column produces no reorder.
    pub fn end<P>(
        &mut self,
        cards: &[Card<P>],
        target_column_id: Option<ColumnId>,
        target_index: Option<usize>,
    ) -> Option<BoardEvent> {
        let state = std::mem::take(&mut self.state);

        let (Some(card_id), Some(source)) = (state.active_card_id, state.active_column_id) else {
            tracing::trace!("end on idle drag session ignored");
            return None;
        };

        let target = target_column_id.or(state.target_column_id);
        let to_index = target_index.unwrap_or(state.target_index);
        let from_index = cards_in_column(cards, &source)
            .iter()
            .position(|c| c.id == card_id);

        match target {
            Some(target) if target == source => match from_index {
                Some(from_index) if from_index != to_index => {
                    Some(BoardEvent::CardReordered(CardReorderEvent {
                        card_id: Some(card_id),
                        column_id: source,
                        from_index,
                        to_index,
                        timestamp: Utc::now(),
                    }))
                }
                Some(_) => None,
                None => {
                    tracing::trace!(card = %card_id, "dragged card left its column, reorder dropped");
                    None
                }
            },
            Some(target) => Some(BoardEvent::CardMoved(CardMoveEvent {
                card_id,
                from_column_id: source,
                to_column_id: target,
                from_index,
                to_index,
                timestamp: Utc::now(),
            })),
            None => None,
        }
    }

    /// Abandons the drag without reporting anything
    pub fn cancel(&mut self) {
        self.state = DragState::default();
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![
            Card::bare("1", "new"),
            Card::bare("2", "new"),
            Card::bare("3", "done"),
        ]
    }

    fn started(card: &str, column: &str) -> DragSession {
        let mut session = DragSession::default();
        assert!(session.start(card.into(), column.into(), Point::new(10.0, 10.0)));
        session
    }

    #[test]
    fn test_start_sets_state() {
        let session = started("1", "new");
        let state = session.state();

        assert!(session.is_dragging());
        assert_eq!(state.active_card_id, Some(CardId::from("1")));
        assert_eq!(state.active_column_id, Some(ColumnId::from("new")));
        assert_eq!(state.target_column_id, Some(ColumnId::from("new")));
        assert_eq!(state.target_index, 0);
        assert_eq!(state.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_start_when_disabled_is_noop() {
        let mut session = DragSession::new(false);

        assert!(!session.start("1".into(), "new".into(), Point::default()));
        assert_eq!(session.state(), &DragState::default());

        session.set_drag_enabled(true);
        assert!(session.start("1".into(), "new".into(), Point::default()));
    }

    #[test]
    fn test_reentrant_start_rejected() {
        let mut session = started("1", "new");

        assert!(!session.start("2".into(), "new".into(), Point::new(99.0, 99.0)));
        assert_eq!(session.state().active_card_id, Some(CardId::from("1")));
        assert_eq!(session.state().position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_update_is_partial() {
        let mut session = started("1", "new");

        session.update(Point::new(300.0, 40.0), Some("done".into()), Some(1));
        assert_eq!(session.state().target_column_id, Some(ColumnId::from("done")));
        assert_eq!(session.state().target_index, 1);

        session.update(Point::new(310.0, 45.0), None, None);
        assert_eq!(session.state().position, Point::new(310.0, 45.0));
        assert_eq!(session.state().target_column_id, Some(ColumnId::from("done")));
        assert_eq!(session.state().target_index, 1);

        session.update(Point::new(320.0, 10.0), None, Some(0));
        assert_eq!(session.state().target_column_id, Some(ColumnId::from("done")));
        assert_eq!(session.state().target_index, 0);
    }

    #[test]
    fn test_update_while_idle_is_ignored() {
        let mut session = DragSession::default();
        session.update(Point::new(5.0, 5.0), Some("done".into()), Some(3));
        assert_eq!(session.state(), &DragState::default());
    }

    #[test]
    fn test_end_cross_column_emits_move() {
        let mut session = started("1", "new");
        session.update(Point::new(300.0, 5.0), Some("done".into()), Some(0));

        let event = session.end(&cards(), None, None);

        match event {
            Some(BoardEvent::CardMoved(e)) => {
                assert_eq!(e.card_id, CardId::from("1"));
                assert_eq!(e.from_column_id, ColumnId::from("new"));
                assert_eq!(e.to_column_id, ColumnId::from("done"));
                assert_eq!(e.from_index, Some(0));
                assert_eq!(e.to_index, 0);
            }
            other => panic!("expected move, got {:?}", other),
        }
        assert!(!session.is_dragging());
        assert_eq!(session.state(), &DragState::default());
    }

    #[test]
    fn test_end_same_column_emits_reorder() {
        let mut session = started("1", "new");
        session.update(Point::new(10.0, 90.0), None, Some(1));

        match session.end(&cards(), None, None) {
            Some(BoardEvent::CardReordered(e)) => {
                assert_eq!(e.column_id, ColumnId::from("new"));
                assert_eq!(e.from_index, 0);
                assert_eq!(e.to_index, 1);
            }
            other => panic!("expected reorder, got {:?}", other),
        }
    }

    #[test]
    fn test_end_same_position_emits_nothing() {
        let mut session = started("2", "new");
        session.update(Point::new(10.0, 50.0), None, Some(1));

        assert_eq!(session.end(&cards(), None, None), None);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_end_arguments_override_session_target() {
        let mut session = started("2", "new");
        session.update(Point::new(300.0, 5.0), Some("done".into()), Some(1));

        let event = session.end(&cards(), Some("new".into()), Some(0));
        assert!(matches!(
            event,
            Some(BoardEvent::CardReordered(CardReorderEvent { from_index: 1, to_index: 0, .. }))
        ));
    }

    #[test]
    fn test_end_with_vanished_card() {
        let remaining = vec![Card::bare("3", "done")];

        let mut session = started("1", "new");
        session.update(Point::default(), None, Some(1));
        assert_eq!(session.end(&remaining, None, None), None);

        let mut session = started("1", "new");
        session.update(Point::default(), Some("done".into()), Some(1));
        match session.end(&remaining, None, None) {
            Some(BoardEvent::CardMoved(e)) => assert_eq!(e.from_index, None),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_end_after_card_moved_elsewhere() {
        // The application moved card 1 to "done" while it was being dragged
        let current = vec![
            Card::bare("2", "new"),
            Card::bare("3", "done"),
            Card::bare("1", "done"),
        ];

        let mut session = started("1", "new");
        session.update(Point::default(), None, Some(0));
        assert_eq!(session.end(&current, None, None), None);

        let mut session = started("1", "new");
        session.update(Point::default(), Some("done".into()), Some(0));
        match session.end(&current, None, None) {
            Some(BoardEvent::CardMoved(e)) => assert_eq!(e.from_index, None),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_end_while_idle_is_noop() {
        let mut session = DragSession::default();
        assert_eq!(session.end(&cards(), Some("done".into()), Some(0)), None);
    }

    #[test]
    fn test_cancel_resets_without_event() {
        let mut session = started("1", "new");
        session.update(Point::new(300.0, 5.0), Some("done".into()), Some(0));

        session.cancel();

        assert_eq!(session.state(), &DragState::default());
        assert_eq!(session.end(&cards(), None, None), None);
        assert!(session.start("2".into(), "new".into(), Point::default()));
    }
}
