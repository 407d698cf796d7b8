use crate::domain::board::Column;
use crate::domain::card::{Card, ColumnId};
use crate::domain::collection::can_place;
use crate::domain::geometry::{drop_index, Point};
use crate::layout::LayoutRegistry;
use serde::{Deserialize, Serialize};

/// Where a dragged card would land if dropped now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub column_id: ColumnId,
    pub index: usize,
}

/// Maps a pointer position to a drop target for `card`.
///
/// Columns are tested in declaration order against their registered
/// rectangles and the first one containing `position` is the candidate, even
/// when later rectangles overlap it. Columns without a measurement are
/// skipped. If the candidate refuses the card the scan stops and there is no
/// target. Otherwise the index comes from the vertical position against the
/// column's other cards that have been measured.
pub fn resolve_drop_target<P>(
    position: Point,
    card: &Card<P>,
    columns: &[Column],
    cards: &[Card<P>],
    layouts: &LayoutRegistry,
) -> Option<DropTarget> {
    let column = columns.iter().find(|column| {
        layouts
            .column_layout(&column.id)
            .is_some_and(|rect| rect.contains_point(position))
    })?;

    if !can_place(card, &column.id, columns, cards) {
        tracing::trace!(card = %card.id, column = %column.id, "column refuses card");
        return None;
    }

    let siblings = cards
        .iter()
        .filter(|c| c.is_in(&column.id) && c.id != card.id)
        .map(|c| &c.id);
    let rects = layouts.card_layouts(siblings);

    Some(DropTarget {
        column_id: column.id.clone(),
        index: drop_index(position.y, &rects),
    })
}
