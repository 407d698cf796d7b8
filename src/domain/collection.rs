//! Pure operations over the card collection.
//!
//! The collection is an ordered slice of cards. A column's visual order is
//! the order its cards appear in the slice, so every operation here keeps
//! the relative order of the cards it does not move. None of them mutate
//! their input.

use crate::domain::board::Column;
use crate::domain::card::{Card, CardId, ColumnId};
use crate::error::{DragError, Result};

/// Cards belonging to `column_id`, in collection order
pub fn cards_in_column<'a, P>(cards: &'a [Card<P>], column_id: &ColumnId) -> Vec<&'a Card<P>> {
    cards.iter().filter(|card| card.is_in(column_id)).collect()
}

/// Groups cards by column, columns in order of first appearance
pub fn group_by_column<P>(cards: &[Card<P>]) -> Vec<(ColumnId, Vec<&Card<P>>)> {
    let mut groups: Vec<(ColumnId, Vec<&Card<P>>)> = Vec::new();

    for card in cards {
        match groups.iter_mut().find(|(id, _)| id == &card.column_id) {
            Some((_, group)) => group.push(card),
            None => groups.push((card.column_id.clone(), vec![card])),
        }
    }

    groups
}

pub fn find_card<'a, P>(cards: &'a [Card<P>], card_id: &CardId) -> Option<&'a Card<P>> {
    cards.iter().find(|card| &card.id == card_id)
}

/// Position of a card within its own column, `None` if the card is absent
pub fn index_in_column<P>(cards: &[Card<P>], card_id: &CardId) -> Option<usize> {
    let card = find_card(cards, card_id)?;
    cards
        .iter()
        .filter(|c| c.is_in(&card.column_id))
        .position(|c| &c.id == card_id)
}

/// Moves the card at `from_index` of a column to `to_index` of the same column.
///
/// Cards of other columns come first in the result, in their original order,
/// followed by the reordered column. Equal indices return the collection
/// unchanged.
///
/// # Errors
/// Returns [`DragError::IndexOutOfRange`] if `from_index` does not address a
/// card of the column or `to_index` lies past the end of the column once the
/// card has been taken out.
pub fn reorder<P: Clone>(
    cards: &[Card<P>],
    column_id: &ColumnId,
    from_index: usize,
    to_index: usize,
) -> Result<Vec<Card<P>>> {
    let (mut column, others): (Vec<Card<P>>, Vec<Card<P>>) =
        cards.iter().cloned().partition(|card| card.is_in(column_id));

    if from_index >= column.len() {
        return Err(DragError::IndexOutOfRange {
            index: from_index,
            len: column.len(),
        });
    }
    if to_index >= column.len() {
        return Err(DragError::IndexOutOfRange {
            index: to_index,
            len: column.len(),
        });
    }

    if from_index == to_index {
        return Ok(cards.to_vec());
    }

    let moved = column.remove(from_index);
    column.insert(to_index, moved);

    Ok(others.into_iter().chain(column).collect())
}

/// Moves a card to `to_index` of `to_column_id`.
///
/// Moving within the card's own column is a [`reorder`]. Otherwise the card
/// takes the new column id and is inserted into the target column, which is
/// placed after all remaining cards. A card id that is not in the collection
/// leaves it unchanged.
///
/// # Errors
/// Returns [`DragError::IndexOutOfRange`] if `to_index` lies past the end of
/// the target column.
pub fn move_card<P: Clone>(
    cards: &[Card<P>],
    card_id: &CardId,
    to_column_id: &ColumnId,
    to_index: usize,
) -> Result<Vec<Card<P>>> {
    let Some(card) = find_card(cards, card_id) else {
        return Ok(cards.to_vec());
    };

    if card.is_in(to_column_id) {
        let from_index = cards
            .iter()
            .filter(|c| c.is_in(to_column_id))
            .position(|c| &c.id == card_id)
            .unwrap_or_default();
        return reorder(cards, to_column_id, from_index, to_index);
    }

    let mut moved = card.clone();
    moved.column_id = to_column_id.clone();

    let (mut target, others): (Vec<Card<P>>, Vec<Card<P>>) = cards
        .iter()
        .filter(|c| &c.id != card_id)
        .cloned()
        .partition(|c| c.is_in(to_column_id));

    if to_index > target.len() {
        return Err(DragError::IndexOutOfRange {
            index: to_index,
            len: target.len(),
        });
    }
    target.insert(to_index, moved);

    Ok(others.into_iter().chain(target).collect())
}

/// Decides whether `card` may be dropped into `target_column_id`.
///
/// The target must be a known column, its source allowlist (if any) must
/// name the card's current column, and a capped column must have room for a
/// card coming from another column. Moving within the same column never
/// counts against the cap.
pub fn can_place<P>(
    card: &Card<P>,
    target_column_id: &ColumnId,
    columns: &[Column],
    cards: &[Card<P>],
) -> bool {
    let Some(target) = columns.iter().find(|col| &col.id == target_column_id) else {
        return false;
    };

    if !target.accepts_from(&card.column_id) {
        return false;
    }

    match target.max_cards {
        Some(max_cards) if !card.is_in(target_column_id) => {
            cards.iter().filter(|c| c.is_in(target_column_id)).count() < max_cards
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(id: &str) -> ColumnId {
        ColumnId::from(id)
    }

    fn ids<P>(cards: &[Card<P>]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    fn sample() -> Vec<Card> {
        vec![
            Card::bare("a", "mid"),
            Card::bare("x", "left"),
            Card::bare("b", "mid"),
            Card::bare("y", "left"),
            Card::bare("c", "mid"),
            Card::bare("z", "right"),
        ]
    }

    #[test]
    fn test_cards_in_column_keeps_order() {
        let cards = sample();
        let mid: Vec<&str> = cards_in_column(&cards, &col("mid"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();

        assert_eq!(mid, vec!["a", "b", "c"]);
        assert!(cards_in_column(&cards, &col("nowhere")).is_empty());
    }

    #[test]
    fn test_group_by_column() {
        let cards = sample();
        let groups = group_by_column(&cards);

        let order: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["mid", "left", "right"]);
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].1[1].id.as_str(), "y");
    }

    #[test]
    fn test_index_in_column() {
        let cards = sample();

        assert_eq!(index_in_column(&cards, &CardId::from("a")), Some(0));
        assert_eq!(index_in_column(&cards, &CardId::from("c")), Some(2));
        assert_eq!(index_in_column(&cards, &CardId::from("y")), Some(1));
        assert_eq!(index_in_column(&cards, &CardId::from("missing")), None);
    }

    #[test]
    fn test_reorder_moves_within_column() {
        let cards = sample();
        let result = reorder(&cards, &col("mid"), 0, 2).unwrap();

        let mid: Vec<&str> = cards_in_column(&result, &col("mid"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(mid, vec!["b", "c", "a"]);

        let others: Vec<&str> = result
            .iter()
            .filter(|c| !c.is_in(&col("mid")))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(others, vec!["x", "y", "z"]);
        assert_eq!(result.len(), cards.len());
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let cards = vec![Card::bare("a", "mid"), Card::bare("b", "mid"), Card::bare("c", "mid")];

        for i in 0..cards.len() {
            assert_eq!(reorder(&cards, &col("mid"), i, i).unwrap(), cards);
        }
    }

    #[test]
    fn test_reorder_same_index_keeps_interleaved_order() {
        let cards = vec![Card::bare("a", "mid"), Card::bare("x", "left"), Card::bare("b", "mid")];

        let result = reorder(&cards, &col("mid"), 0, 0).unwrap();
        assert_eq!(ids(&result), vec!["a", "x", "b"]);

        let cards = sample();
        for i in 0..3 {
            assert_eq!(reorder(&cards, &col("mid"), i, i).unwrap(), cards);
        }
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let cards = sample();

        assert!(matches!(
            reorder(&cards, &col("mid"), 3, 0),
            Err(DragError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            reorder(&cards, &col("mid"), 0, 3),
            Err(DragError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(reorder(&cards, &col("empty"), 0, 0).is_err());
    }

    #[test]
    fn test_move_card_across_columns() {
        let cards = vec![
            Card::bare("1", "new"),
            Card::bare("2", "new"),
            Card::bare("3", "done"),
        ];

        let result = move_card(&cards, &CardId::from("1"), &col("done"), 0).unwrap();

        assert_eq!(ids(&result), vec!["2", "1", "3"]);
        assert_eq!(result[1].column_id, col("done"));
        assert_eq!(result[0].column_id, col("new"));
    }

    #[test]
    fn test_move_card_appends_and_keeps_others_in_order() {
        let cards = sample();
        let result = move_card(&cards, &CardId::from("x"), &col("mid"), 3).unwrap();

        assert_eq!(result.len(), cards.len());
        let mid: Vec<&str> = cards_in_column(&result, &col("mid"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(mid, vec!["a", "b", "c", "x"]);

        let untouched: Vec<&str> = result
            .iter()
            .filter(|c| !c.is_in(&col("mid")))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(untouched, vec!["y", "z"]);
    }

    #[test]
    fn test_move_card_into_new_column() {
        let cards = sample();
        let result = move_card(&cards, &CardId::from("z"), &col("archive"), 0).unwrap();

        assert_eq!(ids(&result).last(), Some(&"z"));
        assert_eq!(result.last().unwrap().column_id, col("archive"));
    }

    #[test]
    fn test_move_card_same_column_delegates_to_reorder() {
        let cards = sample();

        let moved = move_card(&cards, &CardId::from("a"), &col("mid"), 2).unwrap();
        let reordered = reorder(&cards, &col("mid"), 0, 2).unwrap();
        assert_eq!(moved, reordered);
    }

    #[test]
    fn test_move_card_missing_id_returns_input() {
        let cards = sample();
        let result = move_card(&cards, &CardId::from("ghost"), &col("mid"), 0).unwrap();
        assert_eq!(result, cards);
    }

    #[test]
    fn test_move_card_rejects_out_of_range() {
        let cards = sample();
        assert!(matches!(
            move_card(&cards, &CardId::from("x"), &col("right"), 2),
            Err(DragError::IndexOutOfRange { index: 2, len: 1 })
        ));
    }

    #[test]
    fn test_move_card_keeps_payload() {
        let cards = vec![Card::new("1", "new", "payload".to_string())];
        let result = move_card(&cards, &CardId::from("1"), &col("done"), 0).unwrap();
        assert_eq!(result[0].payload, "payload");
    }

    #[test]
    fn test_can_place_capacity() {
        let columns = vec![
            Column::new("new", "New"),
            Column::new("done", "Done").with_max_cards(2),
        ];
        let cards = vec![
            Card::bare("1", "new"),
            Card::bare("2", "done"),
            Card::bare("3", "done"),
        ];

        assert!(!can_place(&cards[0], &col("done"), &columns, &cards));
        // Already a member: the cap does not apply
        assert!(can_place(&cards[1], &col("done"), &columns, &cards));
        assert!(can_place(&cards[1], &col("new"), &columns, &cards));

        let roomy = &cards[..2];
        assert!(can_place(&roomy[0], &col("done"), &columns, roomy));
    }

    #[test]
    fn test_can_place_allowlist() {
        let columns = vec![
            Column::new("new", "New"),
            Column::new("pending", "Pending"),
            Column::new("review", "Review").accept_from(["new"]),
        ];
        let cards = vec![Card::bare("1", "new"), Card::bare("2", "pending")];

        assert!(can_place(&cards[0], &col("review"), &columns, &cards));
        assert!(!can_place(&cards[1], &col("review"), &columns, &cards));
    }

    #[test]
    fn test_can_place_unknown_column() {
        let columns = vec![Column::new("new", "New")];
        let cards = vec![Card::bare("1", "new")];

        assert!(!can_place(&cards[0], &col("ghost"), &columns, &cards));
    }
}
