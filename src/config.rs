//! Renderer settings, loadable from a JSON file.
//!
//! Every field defaults to the built-in scene constants, so a settings file
//! only needs to name what it overrides:
//!
//! ```json
//! { "march": { "epsilon": 0.005 }, "lighting": { "light_position": { "x": 0, "y": 40, "z": -10 } } }
//! ```

use crate::error::{Error, Result};
use crate::marcher::MarchSettings;
use crate::math::abs;
use crate::render::Camera;
use crate::shading::Lighting;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub march: MarchSettings,
    pub lighting: Lighting,
    pub camera: Camera,
}

impl Settings {
    pub fn from_json_str(s: &str) -> Result<Settings> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        debug!("loading settings from {}", path.display());
        Settings::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.march;
        if m.max_steps == 0 {
            return Err(Error::InvalidSetting("march.max_steps must be at least 1".into()));
        }
        if !(m.max_distance.is_finite() && m.max_distance > 0.) {
            return Err(Error::InvalidSetting(format!(
                "march.max_distance must be positive, got {}",
                m.max_distance
            )));
        }
        if !(m.epsilon.is_finite() && m.epsilon > 0.) {
            return Err(Error::InvalidSetting(format!(
                "march.epsilon must be positive, got {}",
                m.epsilon
            )));
        }
        if !(self.camera.fov.is_finite() && self.camera.fov > 0.) {
            return Err(Error::InvalidSetting(format!(
                "camera.fov must be positive, got {}",
                self.camera.fov
            )));
        }
        if self.camera.antialias == 0 {
            return Err(Error::InvalidSetting("camera.antialias must be at least 1".into()));
        }
        self.validate_lighting()
    }

    fn validate_lighting(&self) -> Result<()> {
        let l = &self.lighting;
        let p = &l.light_position;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) || abs(p) == 0. {
            return Err(Error::InvalidSetting(format!(
                "lighting.light_position must be finite and non-zero, got {:?}",
                p
            )));
        }
        // a negative power of a clamped zero base is infinite
        if l.shininess < 0 || l.rim_power < 0 {
            return Err(Error::InvalidSetting(format!(
                "lighting exponents must be non-negative, got shininess {} and rim_power {}",
                l.shininess, l.rim_power
            )));
        }
        for (name, value) in [
            ("ambient", l.ambient),
            ("specular", l.specular),
            ("rim", l.rim),
            ("shadow_bias", l.shadow_bias),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidSetting(format!(
                    "lighting.{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
