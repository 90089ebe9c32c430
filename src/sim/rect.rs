//! Axis-aligned rectangles in internal pixel space
//!
//! Everything that collides in Halloween Run is a rectangle: the cat and
//! each obstacle. Coordinates grow right and down, like the canvas.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer rectangle with top-left `pos` and `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w.max(0), h.max(0)),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Horizontal center, rounded toward the left like the canvas does
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }

    /// True when the two rectangles share a region of positive area.
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Shift so the rectangle lies within `[min, max)` horizontally
    pub fn clamp_x(&mut self, min: i32, max: i32) {
        if self.left() < min {
            self.pos.x = min;
        }
        if self.right() > max {
            self.pos.x = max - self.size.x;
        }
    }

    /// Shift so the rectangle lies within `[min, max)` vertically
    pub fn clamp_y(&mut self, min: i32, max: i32) {
        if self.top() < min {
            self.pos.y = min;
        }
        if self.bottom() > max {
            self.pos.y = max - self.size.y;
        }
    }

    /// Whether the rectangle is fully inside the vertical band `[min, max)`
    pub fn within_y(&self, min: i32, max: i32) -> bool {
        self.top() >= min && self.bottom() <= max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_edge_contact() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(a.intersects(&Rect::new(2, 2, 3, 3))); // contained
        // Sharing an edge is not a hit
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(!a.intersects(&Rect::new(30, 30, 5, 5)));
    }

    #[test]
    fn test_negative_size_is_zeroed() {
        let r = Rect::new(4, 4, -3, 7);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 7);
    }

    #[test]
    fn test_clamp() {
        let mut r = Rect::new(-5, 145, 10, 10);
        r.clamp_x(0, 200);
        r.clamp_y(40, 140);
        assert_eq!(r.pos, IVec2::new(0, 130));
        assert!(r.within_y(40, 140));

        let mut r = Rect::new(195, 20, 10, 10);
        r.clamp_x(0, 200);
        r.clamp_y(40, 140);
        assert_eq!(r.right(), 200);
        assert_eq!(r.top(), 40);
    }

    #[test]
    fn test_center_x() {
        assert_eq!(Rect::new(95, 70, 10, 10).center_x(), 100);
        assert_eq!(Rect::new(0, 0, 9, 9).center_x(), 4);
    }
}
