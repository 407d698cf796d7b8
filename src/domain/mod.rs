pub mod board;
pub mod card;
pub mod collection;
pub mod geometry;

pub use board::{BoardConfig, Column};
pub use card::{Card, CardId, ColumnId};
pub use collection::{
    can_place, cards_in_column, find_card, group_by_column, index_in_column, move_card, reorder,
};
pub use geometry::{drop_index, Point, Rect};
