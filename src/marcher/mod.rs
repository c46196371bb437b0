use crate::math::{abs, mul, normalize, sub, v, Ray, B1, B2, B3, V3};
use crate::Scene;
use serde::{Deserialize, Serialize};

pub mod primitives;

pub use primitives::{Bend, RoundedBox, SmoothSubtraction, Sphere, Translate};

/// Anything that can report a signed distance at a point.
///
/// Negative inside, zero on the surface, positive outside. `|sdf(x)|` must not
/// exceed the true distance to the surface by more than the marcher's epsilon
/// tolerates.
pub trait Renderable {
    fn sdf(&self, x: &V3) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Sphere,
    Shell,
}

impl Material {
    /// Numeric id: 1 for the sphere body, 2 for the slotted shell.
    pub fn id(&self) -> f64 {
        match self {
            Material::Sphere => 1.,
            Material::Shell => 2.,
        }
    }
}

/// A signed distance together with the material that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub distance: f64,
    pub material: Material,
}

/// Attaches a material to a bare shape.
#[derive(Clone, Copy, Debug)]
pub struct Tagged<R> {
    pub shape: R,
    pub material: Material,
}

/// Union of two scenes. On a tie the first one wins.
#[derive(Clone, Copy, Debug)]
pub struct Cup<A, B> {
    pub first: A,
    pub second: B,
}

impl<R: Renderable> Scene for Tagged<R> {
    fn sample(&self, x: &V3) -> Sample {
        Sample {
            distance: self.shape.sdf(x),
            material: self.material,
        }
    }
}

impl<A: Scene, B: Scene> Scene for Cup<A, B> {
    fn sample(&self, x: &V3) -> Sample {
        let a = self.first.sample(x);
        let b = self.second.sample(x);
        if b.distance < a.distance {
            b
        } else {
            a
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchSettings {
    pub max_steps: u32,
    pub max_distance: f64,
    pub epsilon: f64,
}

pub const MAX_STEPS: u32 = 256;
pub const MAX_DISTANCE: f64 = 500.;
pub const EPS: f64 = 0.01;

impl Default for MarchSettings {
    fn default() -> Self {
        MarchSettings {
            max_steps: MAX_STEPS,
            max_distance: MAX_DISTANCE,
            epsilon: EPS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchResult {
    /// Distance accumulated along the ray.
    pub distance: f64,
    /// Material of the last sample; `None` only if no step was taken.
    pub material: Option<Material>,
    pub steps: u32,
}

impl MarchResult {
    pub fn is_hit(&self, max_distance: f64) -> bool {
        self.distance < max_distance
    }

    /// The material, but only if the march landed within `max_distance`.
    pub fn hit_material(&self, max_distance: f64) -> Option<Material> {
        if self.is_hit(max_distance) {
            self.material
        } else {
            None
        }
    }
}

/// Sphere-traces `ray` through `s`.
///
/// Stops once the travelled distance passes `max_distance` or a sample lands
/// within `epsilon` of a surface. Running out of steps leaves whatever distance
/// was accumulated; callers decide hit or miss with [`MarchResult::is_hit`].
pub fn march(s: &impl Scene, ray: &Ray, settings: &MarchSettings) -> MarchResult {
    let mut t = 0.;
    let mut material = None;
    let mut steps = 0;
    while steps < settings.max_steps {
        let hit = s.sample(&ray.at(t));
        t += hit.distance;
        material = Some(hit.material);
        steps += 1;
        if t > settings.max_distance || hit.distance.abs() < settings.epsilon {
            break;
        }
    }
    MarchResult {
        distance: t,
        material,
        steps,
    }
}

fn gradient(s: &impl Scene, x: &V3, eps: f64) -> V3 {
    let d = s.sample(x).distance;
    let dx = s.sample(&sub(x, &mul(eps, &B1))).distance;
    let dy = s.sample(&sub(x, &mul(eps, &B2))).distance;
    let dz = s.sample(&sub(x, &mul(eps, &B3))).distance;
    v(d - dx, d - dy, d - dz)
}

/// Surface orientation at `x` from one-sided differences of the field.
pub fn normal(s: &impl Scene, x: &V3, eps: f64) -> V3 {
    normalize(&gradient(s, x, eps))
}

/// Length of the gradient estimate; near 1 for an exact field, zero where
/// the normal is undefined.
pub fn gradient_magnitude(s: &impl Scene, x: &V3, eps: f64) -> f64 {
    abs(&gradient(s, x, eps)) / eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{dot, O};

    fn ball(radius: f64, center: V3, material: Material) -> Tagged<Translate<Sphere>> {
        Tagged {
            shape: Translate {
                inner: Sphere { radius },
                offset: center,
            },
            material,
        }
    }

    #[test]
    fn union_keeps_nearest_material() {
        let s = Cup {
            first: ball(1., v(-3., 0., 0.), Material::Sphere),
            second: ball(1., v(3., 0., 0.), Material::Shell),
        };
        assert_eq!(s.sample(&v(2.5, 0., 0.)).material, Material::Shell);
        assert_eq!(s.sample(&v(-2.5, 0., 0.)).material, Material::Sphere);
    }

    #[test]
    fn material_ids() {
        assert_eq!(Material::Sphere.id(), 1.);
        assert_eq!(Material::Shell.id(), 2.);
    }

    #[test]
    fn union_tie_goes_to_first() {
        let s = Cup {
            first: ball(1., v(-3., 0., 0.), Material::Sphere),
            second: ball(1., v(3., 0., 0.), Material::Shell),
        };
        assert_eq!(s.sample(&O).material, Material::Sphere);
    }

    #[test]
    fn march_hits_sphere_in_front() {
        let s = ball(1., v(0., 0., 5.), Material::Sphere);
        let settings = MarchSettings::default();
        let r = march(&s, &Ray::new(O, B3), &settings);
        assert!(r.is_hit(settings.max_distance));
        assert!((r.distance - 4.).abs() < settings.epsilon);
        assert_eq!(r.hit_material(settings.max_distance), Some(Material::Sphere));
    }

    #[test]
    fn march_misses_when_pointing_away() {
        let s = ball(1., v(0., 0., 5.), Material::Sphere);
        let settings = MarchSettings::default();
        let r = march(&s, &Ray::new(O, -B3), &settings);
        assert!(!r.is_hit(settings.max_distance));
        assert!(r.distance > settings.max_distance);
        assert_eq!(r.hit_material(settings.max_distance), None);
    }

    #[test]
    fn march_stops_at_step_budget() {
        // neither converges nor escapes
        struct Slab;
        impl Scene for Slab {
            fn sample(&self, _: &V3) -> Sample {
                Sample {
                    distance: 0.5,
                    material: Material::Shell,
                }
            }
        }
        let settings = MarchSettings::default();
        let r = march(&Slab, &Ray::new(O, B1), &settings);
        assert_eq!(r.steps, MAX_STEPS);
        assert!((r.distance - 128.).abs() < 1e-9);
        assert!(r.is_hit(settings.max_distance));
    }

    #[test]
    fn march_with_no_steps_reports_nothing() {
        let s = ball(1., v(0., 0., 5.), Material::Sphere);
        let settings = MarchSettings {
            max_steps: 0,
            ..MarchSettings::default()
        };
        let r = march(&s, &Ray::new(O, B3), &settings);
        assert_eq!(r.steps, 0);
        assert_eq!(r.distance, 0.);
        assert_eq!(r.material, None);
    }

    #[test]
    fn normal_points_outward() {
        let s = ball(1., O, Material::Sphere);
        let n = normal(&s, &v(0., 1., 0.), EPS);
        assert!((abs(&n) - 1.).abs() < 1e-12);
        assert!(dot(&n, &B2) > 0.99);
    }

    #[test]
    fn gradient_of_exact_field_is_about_one() {
        let s = ball(1., O, Material::Sphere);
        let g = gradient_magnitude(&s, &v(0., 0., 1.), EPS);
        assert!((g - 1.).abs() < 0.02);
    }
}
