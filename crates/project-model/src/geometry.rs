//! Pixel-space geometry primitives.
//!
//! Unlike normalized capture coordinates, every value here is in pixels of
//! whichever space the owner documents (source video or output canvas).

use serde::{Deserialize, Serialize};

/// Tolerance used by approximate comparisons, in pixels.
pub const PIXEL_EPSILON: f64 = 1e-6;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height; 1.0 for degenerate sizes.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Larger of the two dimensions.
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect anchored at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Rect of the given dimensions centered on `center`.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Tight bounding box of a set of points. `None` for an empty set.
    pub fn bounding_box<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside this rect (within [`PIXEL_EPSILON`]).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - PIXEL_EPSILON
            && other.y >= self.y - PIXEL_EPSILON
            && other.right() <= self.right() + PIXEL_EPSILON
            && other.bottom() <= self.bottom() + PIXEL_EPSILON
    }

    /// Overlapping region, or `None` when the rects do not overlap with
    /// positive area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Crop to `bounds`. A rect entirely outside collapses to a zero-size
    /// rect on the nearest edge.
    pub fn clamp_to_bounds(&self, bounds: &Rect) -> Rect {
        let x = self.x.min(bounds.right()).max(bounds.x);
        let y = self.y.min(bounds.bottom()).max(bounds.y);
        let right = self.right().min(bounds.right()).max(bounds.x);
        let bottom = self.bottom().min(bounds.bottom()).max(bounds.y);
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Translate into `bounds` keeping the size. Dimensions larger than the
    /// bounds are shrunk to fit.
    pub fn clamp_preserving_size(&self, bounds: &Rect) -> Rect {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        // `right - width` may round below the left edge; max goes last.
        let x = self.x.min(bounds.right() - width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - height).max(bounds.y);
        Rect::new(x, y, width, height)
    }

    /// Scale around the rect's own center.
    pub fn scale_from_center(&self, scale: f64) -> Rect {
        Rect::centered_at(self.center(), self.width * scale, self.height * scale)
    }

    /// Grow every side outward by `amount` (negative shrinks).
    pub fn enlarge(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            (self.width + 2.0 * amount).max(0.0),
            (self.height + 2.0 * amount).max(0.0),
        )
    }

    /// Linear interpolation between two rects. `t` is not clamped.
    pub fn lerp(a: &Rect, b: &Rect, t: f64) -> Rect {
        Rect {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            width: a.width + (b.width - a.width) * t,
            height: a.height + (b.height - a.height) * t,
        }
    }

    /// Edge-wise comparison with a tolerance.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}
