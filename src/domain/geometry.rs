//! Screen-space primitives used for hit-testing during a drag.
//!
//! All coordinates are in the same screen space the rendering layer measures
//! in. Nothing here knows about cards or columns.

use serde::{Deserialize, Serialize};

/// A pointer position or any other screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Last measured bounds of a rendered card or column
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Checks if the point lies inside the rectangle, edges included
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Checks if two rectangles share interior area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Area of the intersection, zero when disjoint
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let x_overlap = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let y_overlap = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        x_overlap * y_overlap
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Vertical midpoint, the line a dragged card has to cross to pass this one
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Checks if `point` lies inside `rect`, edges included
pub fn contains_point(point: Point, rect: &Rect) -> bool {
    rect.contains_point(point)
}

pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

pub fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    a.overlap_area(b)
}

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

pub fn center(rect: &Rect) -> Point {
    rect.center()
}

/// Computes where a card dragged to `drag_y` would be inserted.
///
/// `card_rects` are the rectangles of the cards currently in the column, in
/// visual order, without the dragged card. Returns the index of the first
/// card whose vertical midpoint lies below `drag_y`, or the number of cards
/// when the pointer is past all of them.
///
/// # Examples
/// ```
/// use kanban_drag_core::domain::geometry::{drop_index, Rect};
///
/// let cards = [Rect::new(0.0, 0.0, 100.0, 40.0), Rect::new(0.0, 50.0, 100.0, 40.0)];
/// assert_eq!(drop_index(10.0, &cards), 0);
/// assert_eq!(drop_index(30.0, &cards), 1);
/// assert_eq!(drop_index(500.0, &cards), 2);
/// ```
pub fn drop_index(drag_y: f64, card_rects: &[Rect]) -> usize {
    card_rects
        .iter()
        .position(|rect| drag_y < rect.mid_y())
        .unwrap_or(card_rects.len())
}

/// Y offset of the `index`-th card in a vertically stacked column
pub fn stack_offset(index: usize, heights: &[f64], gap: f64, padding: f64) -> f64 {
    heights
        .iter()
        .take(index)
        .fold(padding, |y, height| y + height + gap)
}

/// Total content height of a vertically stacked column
pub fn stack_extent(heights: &[f64], gap: f64, padding: f64) -> f64 {
    if heights.is_empty() {
        return padding * 2.0;
    }

    let cards: f64 = heights.iter().sum();
    let gaps = (heights.len() - 1) as f64 * gap;
    cards + gaps + padding * 2.0
}
