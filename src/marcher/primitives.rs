//! Closed-form distance functions and the operators that warp or combine them.

use crate::error::{Error, Result};
use crate::marcher::Renderable;
use crate::math::{abs, mix, sub, v, vabs, vmax, V3};

pub fn sphere_distance(p: &V3, radius: f64) -> f64 {
    abs(p) - radius
}

/// Distance to a box of `half_extents` inflated by `corner_radius`.
pub fn rounded_box_distance(p: &V3, half_extents: &V3, corner_radius: f64) -> f64 {
    let q = sub(&vabs(p), half_extents);
    abs(&vmax(&q, 0.)) + q.x.max(q.y.max(q.z)).min(0.) - corner_radius
}

/// Removes the region of `d1` from `d2`, blending the cut over radius `k`.
///
/// `k` must be positive; the guard lives in [`SmoothSubtraction::new`].
pub fn smooth_subtraction(d1: f64, d2: f64, k: f64) -> f64 {
    let h = (0.5 - 0.5 * (d2 + d1) / k).clamp(0., 1.);
    mix(d2, -d1, h) + k * h * (1. - h)
}

/// Rotates `(x, y)` by an angle proportional to `x`.
pub fn bend(p: &V3, k: f64) -> V3 {
    let (s, c) = (k * p.x).sin_cos();
    v(c * p.x + s * p.y, -s * p.x + c * p.y, p.z)
}

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub radius: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct RoundedBox {
    pub half_extents: V3,
    pub corner_radius: f64,
}

/// Moves `inner` so that its origin sits at `offset`.
#[derive(Clone, Copy, Debug)]
pub struct Translate<R> {
    pub inner: R,
    pub offset: V3,
}

/// Domain warp bending `inner` in the XY plane along its local x axis.
#[derive(Clone, Copy, Debug)]
pub struct Bend<R> {
    pub inner: R,
    pub k: f64,
}

/// `minuend` with `subtrahend` carved out of it.
#[derive(Clone, Copy, Debug)]
pub struct SmoothSubtraction<A, B> {
    subtrahend: A,
    minuend: B,
    k: f64,
}

impl<A, B> SmoothSubtraction<A, B> {
    pub fn new(subtrahend: A, minuend: B, k: f64) -> Result<Self> {
        if !(k.is_finite() && k > 0.) {
            return Err(Error::InvalidSmoothing(k));
        }
        Ok(SmoothSubtraction {
            subtrahend,
            minuend,
            k,
        })
    }
}

impl Renderable for Sphere {
    fn sdf(&self, x: &V3) -> f64 {
        sphere_distance(x, self.radius)
    }
}

impl Renderable for RoundedBox {
    fn sdf(&self, x: &V3) -> f64 {
        rounded_box_distance(x, &self.half_extents, self.corner_radius)
    }
}

impl<R: Renderable> Renderable for Translate<R> {
    fn sdf(&self, x: &V3) -> f64 {
        self.inner.sdf(&sub(x, &self.offset))
    }
}

impl<R: Renderable> Renderable for Bend<R> {
    fn sdf(&self, x: &V3) -> f64 {
        self.inner.sdf(&bend(x, self.k))
    }
}

impl<A: Renderable, B: Renderable> Renderable for SmoothSubtraction<A, B> {
    fn sdf(&self, x: &V3) -> f64 {
        smooth_subtraction(self.subtrahend.sdf(x), self.minuend.sdf(x), self.k)
    }
}
