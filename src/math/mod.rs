pub mod arc_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type. Plan coordinates grow rightward in x and downward in y.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// An axis-aligned rectangle in plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Rect2 {
    /// Creates the rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates the square of half-size `margin` centered on `center`.
    #[must_use]
    pub fn around(center: Point2, margin: f64) -> Self {
        let m = margin.abs();
        Self {
            min: Point2::new(center.x - m, center.y - m),
            max: Point2::new(center.x + m, center.y + m),
        }
    }

    /// Returns whether `p` lies inside or on the border of the rectangle.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns the four corners, counter-clockwise from `min`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }
}
