//! Geometry primitives and nearest-corners drop-target selection.
//!
//! This crate is pure geometry: no I/O, no board semantics. It provides the
//! [`Point`] and [`Rect`] types used to describe on-screen layout, and
//! [`closest_candidate`], the deterministic selection of the drop candidate
//! nearest to a dragged rectangle.
//!
//! Coordinates are `f64` screen pixels with the origin at the top-left and
//! the y axis pointing down.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The rectangle shifted by the given offsets.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The four corners, clockwise from top-left.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Aggregate corner distance to another rectangle: the sum of the
    /// distances between corresponding corners. Zero for identical rects.
    pub fn corner_distance(&self, other: &Rect) -> f64 {
        self.corners()
            .iter()
            .zip(other.corners().iter())
            .map(|(a, b)| a.distance_to(b))
            .sum()
    }
}

/// Index of the candidate rectangle nearest to `dragged` by aggregate corner
/// distance, or `None` when there are no candidates.
///
/// Ties are broken by declaration order: a later candidate replaces the
/// current winner only when strictly closer. Repeated calls over the same
/// geometry always return the same index.
pub fn closest_candidate(dragged: &Rect, candidates: &[Rect]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, rect) in candidates.iter().enumerate() {
        let distance = dragged.corner_distance(rect);
        match best {
            Some((_, winning)) if distance >= winning => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(&Point::new(0.0, 0.0)));
        assert!(rect.contains(&Point::new(5.0, 9.9)));
        assert!(!rect.contains(&Point::new(10.0, 5.0)));
        assert!(!rect.contains(&Point::new(-1.0, 5.0)));
    }

    #[test]
    fn test_translated() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let moved = rect.translated(10.0, -2.0);
        assert_eq!(moved, Rect::new(11.0, 0.0, 3.0, 4.0));
        assert_eq!(moved.width, rect.width);
    }

    #[test]
    fn test_corner_distance_identical_is_zero() {
        let rect = Rect::new(5.0, 5.0, 20.0, 30.0);
        assert_eq!(rect.corner_distance(&rect), 0.0);
    }

    #[test]
    fn test_corner_distance_pure_translation() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shifted 3 right / 4 down: every corner moves by 5.
        let shifted = rect.translated(3.0, 4.0);
        assert_eq!(rect.corner_distance(&shifted), 20.0);
    }

    #[test]
    fn test_closest_candidate_picks_nearest() {
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);
        let candidates = [
            Rect::new(100.0, 100.0, 10.0, 10.0),
            Rect::new(2.0, 2.0, 10.0, 10.0),
            Rect::new(50.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(closest_candidate(&dragged, &candidates), Some(1));
    }

    #[test]
    fn test_closest_candidate_empty() {
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(closest_candidate(&dragged, &[]), None);
    }

    #[test]
    fn test_closest_candidate_tie_prefers_declaration_order() {
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Two identical candidates equidistant from the dragged rect.
        let twin = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert_eq!(closest_candidate(&dragged, &[twin, twin]), Some(0));
    }

    #[test]
    fn test_closest_candidate_is_deterministic() {
        let dragged = Rect::new(13.0, 7.0, 24.0, 8.0);
        let candidates = [
            Rect::new(0.0, 0.0, 28.0, 60.0),
            Rect::new(30.0, 0.0, 28.0, 60.0),
            Rect::new(30.0, 10.0, 24.0, 8.0),
            Rect::new(60.0, 0.0, 28.0, 60.0),
        ];
        let first = closest_candidate(&dragged, &candidates);
        for _ in 0..100 {
            assert_eq!(closest_candidate(&dragged, &candidates), first);
        }
    }

    #[test]
    fn test_rect_serde_round_trip() {
        let rect = Rect::new(1.5, 2.5, 3.0, 4.0);
        let json = serde_json::to_string(&rect).unwrap();
        let parsed: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rect);
    }
}
