//! Planar geometry: points, vectors, and simple polygons.

use std::ops::{Add, Mul, Neg, Sub};

/// A position in the simulation plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// Create a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displace this point by a vector.
    pub fn translate(self, v: Vector2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement or direction in the simulation plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector2 {
    /// Create a vector from its components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Unit vector at the given angle (radians, counter-clockwise from +x).
    pub fn unit_at(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Dot product.
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Direction of this vector, counter-clockwise from +x.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// This vector scaled to unit length, or zero if degenerate.
    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n > 0.0 {
            Self::new(self.x / n, self.y / n)
        } else {
            Self::zero()
        }
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A simple polygon given by its ordered vertices.
///
/// Voxel projections use four vertices, but the type is not restricted
/// to quadrilaterals.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly {
    vertices: Vec<Point2>,
}

impl Poly {
    /// Build a polygon from an ordered vertex list.
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    /// The ordered vertices.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise winding. A sign flip relative to
    /// the rest shape means the polygon has turned inside out.
    pub fn signed_area(&self) -> f64 {
        let l = self.vertices.len();
        let mut a = 0.0;
        for i in 0..l {
            let prev = &self.vertices[(l + i - 1) % l];
            let next = &self.vertices[(i + 1) % l];
            a += self.vertices[i].x * (next.y - prev.y);
        }
        0.5 * a
    }

    /// Unsigned polygon area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Vertex mean. Independent of vertex ordering.
    pub fn center(&self) -> Point2 {
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(x, y), v| (x + v.x, y + v.y));
        Point2::new(sx / n, sy / n)
    }
}
