use crate::marcher::Sample;
use crate::math::V3;

pub mod clock;
pub mod config;
pub mod error;
pub mod marcher;
pub mod math;
pub mod render;
pub mod scene;
pub mod shading;

pub use error::{Error, Result};

/// A distance field whose surfaces carry materials.
pub trait Scene {
    fn sample(&self, x: &V3) -> Sample;
}
