use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A three-dimensional vector.
///
/// Used for both positions and directions. Every operation returns a new
/// value; nothing mutates in place.
///
/// Equality is exact and component-wise. Use `approx_eq` where floating point
/// error has to be tolerated.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    pub fn zero() -> Vector3 {
        Vector3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Scales a vector to unit length.
    ///
    /// The vector must have a nonzero magnitude. Normalizing the zero vector
    /// divides by zero and yields NaN components, which then propagate through
    /// any arithmetic that uses them.
    pub fn normalize(&self) -> Vector3 {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Moves a point by `translation`. Equivalent to `self + translation`.
    pub fn translate(&self, translation: &Vector3) -> Vector3 {
        *self + *translation
    }

    /// Uniformly scales a vector. Equivalent to `self * factor`.
    pub fn scale(&self, factor: f64) -> Vector3 {
        *self * factor
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Vector3) -> Vector3 {
        *self - (*normal * 2.0 * self.dot(normal))
    }

    /// Compares two vectors component-wise, tolerating floating point error.
    pub fn approx_eq(&self, other: &Vector3) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

/// Conversion from a vector of floats to a `Vector3`.
///
/// Missing trailing components default to zero; extra elements are ignored.
impl From<&Vec<f64>> for Vector3 {
    fn from(v: &Vec<f64>) -> Vector3 {
        match v.len() {
            0 => Default::default(),
            1 => Vector3 { x: v[0], ..Default::default() },
            2 => Vector3 { x: v[0], y: v[1], ..Default::default() },
            _ => Vector3 { x: v[0], y: v[1], z: v[2] }
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Vector3 {
        Vector3 { x: v[0], y: v[1], z: v[2] }
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> [f64; 3] {
        [v.x, v.y, v.z]
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use ellipsoid_tracer::vector::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(v * 2.0, Vector3::new(2.0, 4.0, 6.0));
/// ```
impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
///
/// ```
/// use ellipsoid_tracer::vector::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(2.0 * v, Vector3::new(2.0, 4.0, 6.0));
/// ```
impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

/* Tests */

#[test]
fn add_vectors() {
    let a1 = Vector3::new(3.0, -2.0, 5.0);
    let a2 = Vector3::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Vector3::new(1.0, 1.0, 6.0));
    assert_eq!(a1.translate(&a2), a1 + a2);
}

#[test]
fn sub_vectors() {
    let p1 = Vector3::new(3.0, 2.0, 1.0);
    let p2 = Vector3::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector3::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vector3::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_scalar() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(a * 3.5, Vector3::new(3.5, -7.0, 10.5));
    assert_eq!(3.5 * a, a * 3.5);
    assert_eq!(a.scale(3.5), a * 3.5);
}

#[test]
fn div_scalar() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(a / 2.0, Vector3::new(0.5, -1.0, 1.5));
}

#[test]
fn equality_is_exact() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(1.0, 2.0, 3.00001);

    assert_ne!(a, b);
    assert!(a.approx_eq(&b));
}

#[test]
fn magnitude_neg() {
    let v = Vector3::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_clean() {
    let v = Vector3::new(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    let e = Vector3::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert!(v.normalize().approx_eq(&e));
}

#[test]
fn normalized_vectors_have_unit_length() {
    let vs = [
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-0.001, 0.0, 0.002),
        Vector3::new(1e6, -3e5, 42.0),
        Vector3::new(0.0, -7.0, 0.0),
    ];

    for v in vs.iter() {
        assert!(crate::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_is_nan() {
    let n = Vector3::zero().normalize();

    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
}

#[test]
fn dot_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
    assert_eq!(a.dot(&b), b.dot(&a));
}

#[test]
fn cross_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Vector3::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vector3::new(1.0, -2.0, 1.0));
    assert_eq!(a.cross(&b), -b.cross(&a));
}

#[test]
fn reflect_45() {
    let v = Vector3::new(1.0, -1.0, 0.0);
    let n = Vector3::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Vector3::new(1.0, 1.0, 0.0));
}

#[test]
fn array_conversions() {
    let v: Vector3 = [1.0, 2.0, 3.0].into();
    let a: [f64; 3] = v.into();

    assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(a, [1.0, 2.0, 3.0]);
}
