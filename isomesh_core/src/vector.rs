//! Three-component vector used for lattice points, interpolated vertices and normals.
//!
//! `Vector3` is `Copy` and supports both styles of arithmetic:
//!
//! - operator traits (`a + b`, `v * 2.0`, `-v`) that return new values
//! - in-place methods taking `&mut self` and returning `&mut Self`, so calls chain
//!   without allocating: `v.set(1.0, 2.0, 3.0).scale(2.0).normalize();`

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with named components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// A position in world space. Same representation as [`Vector3`].
pub type Point3 = Vector3;

impl Vector3 {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    // ---------------------------------------------------------------------
    // In-place, chainable operations
    // ---------------------------------------------------------------------

    /// Overwrite all three components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copy the components of `other` into this vector.
    #[inline]
    pub fn copy_from(&mut self, other: &Self) -> &mut Self {
        *self = *other;
        self
    }

    /// Add `other` component-wise.
    #[inline]
    pub fn add_vec(&mut self, other: &Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self
    }

    /// Subtract `other` component-wise.
    #[inline]
    pub fn sub_vec(&mut self, other: &Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self
    }

    /// Multiply every component by `c`.
    #[inline]
    pub fn scale(&mut self, c: f32) -> &mut Self {
        self.x *= c;
        self.y *= c;
        self.z *= c;
        self
    }

    /// Divide every component by `c`.
    ///
    /// Dividing by zero yields the zero vector rather than infinities.
    #[inline]
    pub fn div_scalar(&mut self, c: f32) -> &mut Self {
        if c == 0.0 {
            self.set(0.0, 0.0, 0.0)
        } else {
            self.x /= c;
            self.y /= c;
            self.z /= c;
            self
        }
    }

    /// Flip the sign of every component.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.set(-self.x, -self.y, -self.z)
    }

    /// Scale to unit length. A zero-length vector stays zero.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        self.div_scalar(len)
    }

    /// Replace this vector with `self × other`.
    #[inline]
    pub fn cross_with(&mut self, other: &Self) -> &mut Self {
        *self = self.cross(*other);
        self
    }

    /// Round every component to a multiple of `step` using `round`.
    ///
    /// Each component becomes `round(c / step) * step`.
    #[inline]
    pub fn round_to<F>(&mut self, step: f32, round: F) -> &mut Self
    where
        F: Fn(f32) -> f32,
    {
        self.x = round(self.x / step) * step;
        self.y = round(self.y / step) * step;
        self.z = round(self.z / step) * step;
        self
    }

    /// Round every component to the nearest multiple of `step`.
    ///
    /// Halfway cases round up, towards positive infinity, so `-0.5` steps
    /// becomes `0`.
    #[inline]
    pub fn round_to_nearest(&mut self, step: f32) -> &mut Self {
        self.round_to(step, round_half_up)
    }

    /// Transform as a homogeneous point by a column-major 4x4 matrix.
    ///
    /// The result is divided by the homogeneous `w`. If `w` is zero the
    /// components are non-finite; avoiding that is the caller's job.
    #[inline]
    pub fn transform(&mut self, m: &[f32; 16]) -> &mut Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let tx = m[0] * x + m[4] * y + m[8] * z + m[12];
        let ty = m[1] * x + m[5] * y + m[9] * z + m[13];
        let tz = m[2] * x + m[6] * y + m[10] * z + m[14];
        let w = m[3] * x + m[7] * y + m[11] * z + m[15];
        self.set(tx / w, ty / w, tz / w)
    }

    /// Turn this vector into one perpendicular to its current value.
    ///
    /// The smallest-magnitude component is zeroed, the other two are swapped and
    /// the first of them negated. The result is non-zero and perpendicular for
    /// any non-zero input; for the zero vector it stays zero.
    #[inline]
    pub fn perpendicular(&mut self) -> &mut Self {
        let (ax, ay, az) = (libm::fabsf(self.x), libm::fabsf(self.y), libm::fabsf(self.z));
        if ax <= ay && ax <= az {
            self.set(0.0, -self.z, self.y)
        } else if ay <= az {
            self.set(-self.z, 0.0, self.x)
        } else {
            self.set(-self.y, self.x, 0.0)
        }
    }

    /// Component-wise truncated remainder (`%`) by `n`.
    #[inline]
    pub fn wrap(&mut self, n: f32) -> &mut Self {
        self.x %= n;
        self.y %= n;
        self.z %= n;
        self
    }

    // ---------------------------------------------------------------------
    // Queries and value-returning operations
    // ---------------------------------------------------------------------

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        libm::sqrtf(self.distance_squared(other))
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Unit-length copy of this vector, or zero if the length is zero.
    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Linear interpolation towards `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
        }
    }

    /// Components as `[x, y, z]`.
    #[inline]
    pub const fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// True if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Nearest integer, halves towards positive infinity.
#[inline]
fn round_half_up(x: f32) -> f32 {
    let floor = libm::floorf(x);
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.add_vec(&other);
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.sub_vec(&other);
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    #[inline]
    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl MulAssign<f32> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.scale(scalar);
    }
}

/// Plain IEEE division. Use [`Vector3::div_scalar`] for the zero-safe form.
impl Div<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl DivAssign<f32> for Vector3 {
    #[inline]
    fn div_assign(&mut self, scalar: f32) {
        *self = *self / scalar;
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
