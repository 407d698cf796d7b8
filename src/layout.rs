use crate::domain::card::{CardId, ColumnId};
use crate::domain::geometry::Rect;
use std::collections::HashMap;

/// Last measured screen rectangles of the columns and cards of one board.
///
/// The rendering layer pushes a measurement whenever an element's bounds
/// change. Entries are never evicted: ids that disappear from the board are
/// simply not asked for anymore, and a missing entry means "not measured yet".
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    columns: HashMap<ColumnId, Rect>,
    cards: HashMap<CardId, Rect>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a column's bounds, replacing any previous measurement
    pub fn register_column_layout(&mut self, column_id: ColumnId, rect: Rect) {
        self.columns.insert(column_id, rect);
    }

    /// Records a card's bounds, replacing any previous measurement
    pub fn register_card_layout(&mut self, card_id: CardId, rect: Rect) {
        self.cards.insert(card_id, rect);
    }

    pub fn column_layout(&self, column_id: &ColumnId) -> Option<Rect> {
        self.columns.get(column_id).copied()
    }

    pub fn card_layout(&self, card_id: &CardId) -> Option<Rect> {
        self.cards.get(card_id).copied()
    }

    /// Rectangles of the given cards in iteration order, skipping unmeasured ones
    pub fn card_layouts<'a, I>(&self, card_ids: I) -> Vec<Rect>
    where
        I: IntoIterator<Item = &'a CardId>,
    {
        card_ids
            .into_iter()
            .filter_map(|id| self.card_layout(id))
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}
