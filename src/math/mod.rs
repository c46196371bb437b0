use serde::{Deserialize, Serialize};
use std::ops;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct V3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct V2 {
    pub x: f64,
    pub y: f64,
}

/// A half-line with a unit-length direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub x: V3,
    pub d: V3,
}

impl Ray {
    /// Builds a ray, normalizing `d`.
    pub fn new(x: V3, d: V3) -> Ray {
        Ray { x, d: normalize(&d) }
    }

    pub fn at(&self, t: f64) -> V3 {
        self.x + t * self.d
    }
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

pub fn abs2(x: &V3) -> f64 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

/// Euclidean length.
pub fn abs(x: &V3) -> f64 {
    abs2(x).sqrt()
}

pub fn v(x: f64, y: f64, z: f64) -> V3 {
    V3 { x, y, z }
}

pub fn v2(x: f64, y: f64) -> V2 {
    V2 { x, y }
}

pub fn mul(scalar: f64, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

pub fn dist(x: &V3, y: &V3) -> f64 {
    abs(&sub(x, y))
}

pub fn normalize(x: &V3) -> V3 {
    mul(1. / abs(x), x)
}

pub fn dot(x: &V3, y: &V3) -> f64 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

pub fn cross(v1: &V3, v2: &V3) -> V3 {
    v(
        v1.y * v2.z - v1.z * v2.y,
        v1.z * v2.x - v1.x * v2.z,
        v1.x * v2.y - v1.y * v2.x,
    )
}

/// Mirrors incident direction `i` about the plane with normal `n`.
pub fn reflect(i: &V3, n: &V3) -> V3 {
    sub(i, &mul(2. * dot(n, i), n))
}

/// Component-wise absolute value.
pub fn vabs(x: &V3) -> V3 {
    v(x.x.abs(), x.y.abs(), x.z.abs())
}

/// Component-wise maximum against a scalar.
pub fn vmax(x: &V3, s: f64) -> V3 {
    v(x.x.max(s), x.y.max(s), x.z.max(s))
}

pub fn splat(s: f64) -> V3 {
    v(s, s, s)
}

/// Fractional part as `x - floor(x)`, always in `[0, 1)` for finite input.
///
/// Differs from [`f64::fract`], which keeps the sign of `x`.
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Linear blend: `x` at `a = 0`, `y` at `a = 1`.
pub fn mix(x: f64, y: f64, a: f64) -> f64 {
    x * (1. - a) + y * a
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        return add(&self, &rhs)
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        return sub(&self, &rhs)
    }
}

impl ops::Neg for V3 {
    type Output = V3;

    fn neg(self) -> V3 {
        return mul(-1., &self)
    }
}

impl ops::Mul<V3> for f64 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        return mul(self, &rhs)
    }
}

impl ops::Mul<f64> for V3 {
    type Output = V3;

    fn mul(self, rhs: f64) -> Self::Output {
        return mul(rhs, &self)
    }
}

pub const B1: V3 = V3 {
    x: 1.,
    y: 0.,
    z: 0.,
};

pub const B2: V3 = V3 {
    x: 0.,
    y: 1.,
    z: 0.,
};

pub const B3: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 1.,
};

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};
