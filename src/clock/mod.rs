//! Animation clock.
//!
//! Every moving part of the scene is driven by one scalar phase derived from
//! elapsed time. The phase is computed once per frame and handed around as a
//! [`Frame`]; nothing reads it from shared state.

use crate::math::fract;

/// Length of one animation cycle, in elapsed-time units.
pub const PERIOD: f64 = 10.;

/// Upper bound (exclusive) of the phase sweep.
pub const PHASE_SPAN: f64 = 5.;

/// Sawtooth phase in `[0, 5)` repeating every [`PERIOD`] time units.
pub fn phase(elapsed_time: f64) -> f64 {
    // fract is floor-based, so abs never changes the value
    (fract(elapsed_time / PERIOD) * PHASE_SPAN).abs()
}

/// Curvature of the bent shell: an exponentially decaying oscillation.
pub fn bend_coefficient(phase: f64) -> f64 {
    (-phase).exp() * (6. * phase + 1.5).cos() / 3.
}

/// Vertical offset of the bouncing sphere.
///
/// Rectifies a decaying oscillation so the motion is mostly upward with
/// sharp bounces at the bottom.
pub fn bob_offset(phase: f64) -> f64 {
    let f1 = -((-phase).exp() * (6. * phase - 1.7).cos());
    let f2 = f1.abs();
    let f3 = f1 + f2;
    -(f1 - f3 / 5.)
}

/// Per-frame animation state shared read-only by every pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub elapsed_time: f64,
    pub phase: f64,
}

impl Frame {
    pub fn at(elapsed_time: f64) -> Frame {
        Frame {
            elapsed_time,
            phase: phase(elapsed_time),
        }
    }

    pub fn bend_coefficient(&self) -> f64 {
        bend_coefficient(self.phase)
    }

    pub fn bob_offset(&self) -> f64 {
        bob_offset(self.phase)
    }
}
