//! 2D vector, size, and rectangle value types.
//!
//! These are the "opaque value types" the core consumes from its math
//! collaborator (§6 of the specification): addition, subtraction, scalar
//! scale, length, distance, dot product, and point/rect containment and
//! overlap. Nothing here renders, loads, or parses anything.

/// A 2D vector / point, stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }

    #[inline]
    pub fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }

    #[inline]
    pub fn scale(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        self.sub(other).length()
    }

    /// Euclidean distance, squared — avoids the `sqrt` when only comparing
    /// distances (used by nearest-cell snapping).
    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f32 {
        let d = self.sub(other);
        d.dot(d)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        self.add(rhs)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        self.sub(rhs)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        self.scale(rhs)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A 2D extent (width, height). Never negative in well-formed input.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, stored as origin + size.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Vec2,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub fn new(origin: Vec2, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: Size::new(max.x - min.x, max.y - min.y),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.width, self.origin.y + self.size.height)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    /// `true` if `point` falls within this rectangle.
    ///
    /// Edge ties are inclusive on the min edge and exclusive on the max edge,
    /// so adjacent rectangles tiling a grid never both claim a boundary point
    /// — the caller (grid) relies on this to resolve ties to the lower index.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < max.x
            && point.y < max.y
    }

    /// `true` if this rectangle and `other` overlap (share positive area or
    /// touch at an edge).
    #[inline]
    pub fn overlaps(self, other: Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.origin.x <= b_max.x
            && a_max.x >= other.origin.x
            && self.origin.y <= b_max.y
            && a_max.y >= other.origin.y
    }
}
