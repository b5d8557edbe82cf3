// vector.rs - 2D vector value type
//
// Plain Copy value. Every operation returns a new vector.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean norm
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    pub fn negate(self) -> Self {
        self.scale(-1.0)
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Returns `other - self`.
    ///
    /// Note the argument order: this is the vector pointing from `self`
    /// to `other`, not the usual `self - other`.
    pub fn difference(self, other: Self) -> Self {
        Self::new(other.x - self.x, other.y - self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        self.difference(other).magnitude()
    }

    /// Unit vector in the same direction, or zero for the zero vector
    pub fn normalize(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / m)
    }

    /// Counter-clockwise rotation by `theta` radians
    pub fn rotate(self, theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Mean of a set of points; the origin when the set is empty
    pub fn average<I: IntoIterator<Item = Vector>>(points: I) -> Self {
        let mut sum = Self::ZERO;
        let mut n = 0usize;
        for p in points {
            sum += p;
            n += 1;
        }
        if n == 0 {
            return Self::ZERO;
        }
        sum.scale(1.0 / n as f32)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Vector::add(self, o)
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f32> for Vector {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, o: Self) {
        self.x += o.x;
        self.y += o.y;
    }
}

#[cfg(test)]
mod tests {
    use super::Vector;
    use std::f32::consts::PI;

    const EPS: f32 = 1e-5;

    fn close(a: Vector, b: Vector) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn normalized_vector_has_unit_length() {
        for v in [Vector::new(3.0, 4.0), Vector::new(-0.001, 0.0), Vector::new(1e4, -2e4)] {
            assert!((v.normalize().magnitude() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn normalizing_zero_gives_zero() {
        assert_eq!(Vector::ZERO.normalize(), Vector::ZERO);
    }

    #[test]
    fn rotation_round_trips() {
        let v = Vector::new(2.5, -1.25);
        for i in 0..16 {
            let theta = i as f32 * PI / 7.0 - 3.0;
            assert!(close(v.rotate(theta).rotate(-theta), v));
        }
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        assert!(close(Vector::new(1.0, 0.0).rotate(PI / 2.0), Vector::new(0.0, 1.0)));
    }

    #[test]
    fn difference_points_from_self_to_other() {
        let a = Vector::new(1.0, 1.0);
        let b = Vector::new(4.0, 5.0);
        assert_eq!(a.difference(b), Vector::new(3.0, 4.0));
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn average_of_nothing_is_origin() {
        assert_eq!(Vector::average(std::iter::empty::<Vector>()), Vector::ZERO);
        let mid = Vector::average([Vector::new(0.0, 0.0), Vector::new(2.0, 4.0)]);
        assert_eq!(mid, Vector::new(1.0, 2.0));
    }

    #[test]
    fn negate_flips_both_axes() {
        assert_eq!(-Vector::new(1.5, -2.0), Vector::new(-1.5, 2.0));
    }
}
