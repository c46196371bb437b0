//! The fixed scene: a bouncing sphere dropping into a whipping, slotted plank.

use crate::clock::Frame;
use crate::error::Result;
use crate::marcher::{
    Bend, Cup, Material, RoundedBox, Renderable, Sample, SmoothSubtraction, Sphere, Tagged,
    Translate,
};
use crate::math::{v, V3};
use crate::Scene;

pub const SPHERE_RADIUS: f64 = 0.5;
/// Radius of the cutter sphere that carves the slot, just wider than the ball.
pub const CUTTER_RADIUS: f64 = 0.51;
pub const SPHERE_REST_HEIGHT: f64 = -0.6;
pub const DEPTH: f64 = 0.5;

pub const PLANK_CENTER: V3 = V3 {
    x: 0.,
    y: -1.,
    z: DEPTH,
};
pub const PLANK_HALF_EXTENTS: V3 = V3 {
    x: 1.,
    y: 0.05,
    z: 0.5,
};
pub const PLANK_CORNER_RADIUS: f64 = 0.176;
pub const SLOT_SMOOTHING: f64 = 0.3;

type Ball = Translate<Sphere>;
type Plank = Translate<Bend<RoundedBox>>;

/// Scene field for one frame.
///
/// Built from an explicit [`Frame`] so that every sample of that frame sees the
/// same phase.
#[derive(Clone, Copy, Debug)]
pub struct BounceScene {
    frame: Frame,
    field: Cup<Tagged<Ball>, Tagged<SmoothSubtraction<Ball, Plank>>>,
}

impl BounceScene {
    pub fn new(frame: Frame) -> Result<BounceScene> {
        let center = sphere_center(&frame);
        let ball = Translate {
            inner: Sphere {
                radius: SPHERE_RADIUS,
            },
            offset: center,
        };
        let cutter = Translate {
            inner: Sphere {
                radius: CUTTER_RADIUS,
            },
            offset: center,
        };
        let plank = Translate {
            inner: Bend {
                inner: RoundedBox {
                    half_extents: PLANK_HALF_EXTENTS,
                    corner_radius: PLANK_CORNER_RADIUS,
                },
                k: frame.bend_coefficient(),
            },
            offset: PLANK_CENTER,
        };
        let slotted = SmoothSubtraction::new(cutter, plank, SLOT_SMOOTHING)?;
        Ok(BounceScene {
            frame,
            field: Cup {
                first: Tagged {
                    shape: ball,
                    material: Material::Sphere,
                },
                second: Tagged {
                    shape: slotted,
                    material: Material::Shell,
                },
            },
        })
    }

    pub fn at_time(elapsed_time: f64) -> Result<BounceScene> {
        BounceScene::new(Frame::at(elapsed_time))
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Current center of the bouncing sphere.
    pub fn sphere_center(&self) -> V3 {
        self.field.first.shape.offset
    }

    /// Distance to the slotted plank alone.
    pub fn plank_distance(&self, x: &V3) -> f64 {
        self.field.second.shape.sdf(x)
    }
}

impl Scene for BounceScene {
    fn sample(&self, x: &V3) -> Sample {
        self.field.sample(x)
    }
}

fn sphere_center(frame: &Frame) -> V3 {
    v(0., frame.bob_offset() + SPHERE_REST_HEIGHT, DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::bob_offset;
    use crate::math::add;

    #[test]
    fn sphere_follows_bob() {
        let s = BounceScene::at_time(0.).unwrap();
        let c = s.sphere_center();
        assert!((c.y - (bob_offset(0.) - 0.6)).abs() < 1e-12);
        assert_eq!(c.x, 0.);
        assert_eq!(c.z, 0.5);
    }

    #[test]
    fn sphere_center_is_inside_sphere_material() {
        let s = BounceScene::at_time(1.3).unwrap();
        let sample = s.sample(&s.sphere_center());
        assert_eq!(sample.material, Material::Sphere);
        assert!((sample.distance + SPHERE_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn plank_end_reports_shell() {
        // far end of the plank, away from the slot
        let s = BounceScene::at_time(0.).unwrap();
        let p = add(&PLANK_CENTER, &v(0.9, 0., 0.));
        let sample = s.sample(&p);
        assert_eq!(sample.material, Material::Shell);
        assert!(sample.distance < 0.);
    }

    #[test]
    fn cutter_carves_slot_in_plank() {
        // at t = 0 the ball sits low enough to cut through the plank's top face
        let s = BounceScene::at_time(0.).unwrap();
        let c = s.sphere_center();
        let top = v(0., PLANK_CENTER.y + PLANK_HALF_EXTENTS.y, DEPTH);
        assert!(c.y - CUTTER_RADIUS < top.y);
        let plain = RoundedBox {
            half_extents: PLANK_HALF_EXTENTS,
            corner_radius: PLANK_CORNER_RADIUS,
        };
        let bent = Bend {
            inner: plain,
            k: s.frame().bend_coefficient(),
        };
        assert!(bent.sdf(&(top - PLANK_CENTER)) < 0.);
        assert!(s.plank_distance(&top) > 0.);
    }

    #[test]
    fn same_time_same_field() {
        let a = BounceScene::at_time(3.7).unwrap();
        let b = BounceScene::at_time(3.7).unwrap();
        let p = v(0.3, -0.8, 0.2);
        assert_eq!(a.sample(&p), b.sample(&p));
    }
}
