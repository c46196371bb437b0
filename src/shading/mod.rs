use crate::marcher::{march, normal, MarchSettings};
use crate::math::{abs, add, dot, mul, normalize, reflect, splat, sub, v, Ray, V3};
use crate::Scene;
use serde::{Deserialize, Serialize};

/// A single point light with Phong highlights and a faint rim.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub light_position: V3,
    pub ambient: f64,
    pub specular: f64,
    pub shininess: i32,
    pub rim: f64,
    pub rim_power: i32,
    /// Offset along the normal before shadow probing, to clear the surface.
    pub shadow_bias: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            light_position: v(10., 55., -20.),
            ambient: 0.05,
            specular: 0.5,
            shininess: 10,
            rim: 0.05,
            rim_power: 3,
            shadow_bias: 0.02,
        }
    }
}

/// Individual lighting contributions at a surface point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeTerms {
    pub diffuse: V3,
    pub specular: V3,
    pub ambient: V3,
    pub rim: V3,
    pub in_shadow: bool,
}

impl ShadeTerms {
    /// Final color; a shadowed point keeps only ambient and rim light.
    pub fn total(&self) -> V3 {
        if self.in_shadow {
            self.ambient + self.rim
        } else {
            self.diffuse + self.ambient + self.specular + self.rim
        }
    }
}

fn modulate(color: &V3, scale: f64) -> V3 {
    mul(scale, color)
}

pub fn shade_terms(
    s: &impl Scene,
    p: &V3,
    rd: &V3,
    color: &V3,
    lighting: &Lighting,
    settings: &MarchSettings,
) -> ShadeTerms {
    let to_light = sub(&lighting.light_position, p);
    let l = normalize(&to_light);
    let n = normal(s, p, settings.epsilon);
    let view = -*rd;
    let r = reflect(&-l, &n);

    let specular = splat(lighting.specular * dot(&r, &view).clamp(0., 1.).powi(lighting.shininess));
    let diffuse = modulate(color, dot(&l, &n).clamp(0., 1.));
    let ambient = modulate(color, lighting.ambient);
    let rim = modulate(color, lighting.rim * (1. + dot(rd, &n)).powi(lighting.rim_power));

    // the probe heads along the light's position vector, not from p
    let probe = Ray::new(
        add(p, &mul(lighting.shadow_bias, &n)),
        lighting.light_position,
    );
    let occluder = march(s, &probe, settings).distance;

    ShadeTerms {
        diffuse,
        specular,
        ambient,
        rim,
        in_shadow: occluder < abs(&to_light),
    }
}

/// Color at surface point `p` seen along `rd`. Not clamped.
pub fn shade(
    s: &impl Scene,
    p: &V3,
    rd: &V3,
    color: &V3,
    lighting: &Lighting,
    settings: &MarchSettings,
) -> V3 {
    shade_terms(s, p, rd, color, lighting, settings).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marcher::{Material, Sphere, Tagged, Translate};
    use crate::math::{B2, O};

    fn ball(center: V3) -> Tagged<Translate<Sphere>> {
        Tagged {
            shape: Translate {
                inner: Sphere { radius: 1. },
                offset: center,
            },
            material: Material::Sphere,
        }
    }

    #[test]
    fn lit_top_of_sphere() {
        let lighting = Lighting {
            light_position: v(0., 50., 0.),
            ..Lighting::default()
        };
        let s = ball(O);
        let rd = normalize(&v(0., -1., 0.));
        let terms = shade_terms(&s, &B2, &rd, &splat(1.), &lighting, &MarchSettings::default());
        assert!(!terms.in_shadow);
        assert!(terms.diffuse.x > 0.99);
        // looking straight down the normal: full highlight, no rim
        assert!((terms.specular.x - 0.5).abs() < 0.01);
        assert!(terms.rim.x.abs() < 1e-6);
        assert!((terms.ambient.x - 0.05).abs() < 1e-12);
    }

    #[test]
    fn occluded_point_keeps_ambient_and_rim() {
        let lighting = Lighting {
            light_position: v(0., 50., 0.),
            ..Lighting::default()
        };
        // a second ball hangs between the lower ball and the light
        let s = crate::marcher::Cup {
            first: ball(O),
            second: ball(v(0., 4., 0.)),
        };
        let rd = normalize(&v(0., -1., 0.));
        let terms = shade_terms(&s, &B2, &rd, &splat(1.), &lighting, &MarchSettings::default());
        assert!(terms.in_shadow);
        assert_eq!(terms.total(), terms.ambient + terms.rim);
    }

    #[test]
    fn facing_away_from_light_has_no_diffuse() {
        let lighting = Lighting {
            light_position: v(0., 50., 0.),
            ..Lighting::default()
        };
        let s = ball(O);
        let p = v(0., -1., 0.);
        let rd = normalize(&v(0., 1., 0.));
        let terms = shade_terms(&s, &p, &rd, &splat(1.), &lighting, &MarchSettings::default());
        assert_eq!(terms.diffuse, O);
        assert!(terms.in_shadow);
    }
}
