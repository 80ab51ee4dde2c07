//! The replicating double helix scene.
//!
//! A vertical stack of base-pair rungs is split by a replication fork that
//! climbs the helix over the run. Above the fork the original double helix
//! turns intact; below it, two counter-rotating daughter helices diverge,
//! growing new rungs a little behind the fork. Enzyme markers (a rotating
//! ring at the fork, two trailing polymerase capsules) are drawn unbatched.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};

use crate::foundation::core::{LinearRgb, Timeline};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::foundation::math::{clamp01, lerp, smoothstep};
use crate::render::backend::{MaterialDesc, MaterialHandle, MeshHandle, Primitive, RenderBackend};
use crate::render::batch::InstanceBatcher;
use crate::scene::camera::CameraPath;
use crate::scene::{GroupId, Instance, Scene, scripted_timeline};

const BACKGROUND: LinearRgb = LinearRgb::new(0.03, 0.04, 0.06);

/// Vertical spacing between consecutive rungs.
const PAIR_SPACING: f32 = 0.12;
/// Strand circle radius.
const HELIX_RADIUS: f32 = 0.45;
/// Helix twist in radians per rung.
const TWIST: f32 = 0.55;
/// Rung cylinder thickness (x/z scale).
const RUNG_THICKNESS: f32 = 0.020;
/// Backbone bead sphere scale.
const BEAD_SCALE: f32 = 0.055;
/// Full lateral separation between the daughter helices.
const DAUGHTER_SEPARATION: f32 = 0.95;
/// Half-height of the vertical blend window around the fork.
const FORK_TRANSITION: f32 = 0.55;
/// Keeps the fork's travel inside the helix ends.
const FORK_MARGIN: f32 = 0.6;

/// Base-pair types, color-coding the rungs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasePair {
    /// Adenine-thymine.
    At,
    /// Cytosine-guanine.
    Cg,
    /// Guanine-cytosine.
    Gc,
    /// Thymine-adenine.
    Ta,
}

impl BasePair {
    /// The fixed repeating sequence assigned to rung `i`: AT, CG, GC, TA.
    /// Deterministic and independent of time; not biological sequence data.
    pub fn for_rung(i: usize) -> Self {
        match i % 4 {
            0 => Self::At,
            1 => Self::Cg,
            2 => Self::Gc,
            _ => Self::Ta,
        }
    }

    fn base_color(self) -> LinearRgb {
        match self {
            Self::At => LinearRgb::new(0.98, 0.78, 0.25),
            Self::Cg => LinearRgb::new(0.35, 1.00, 0.55),
            Self::Gc => LinearRgb::new(1.00, 0.35, 0.35),
            Self::Ta => LinearRgb::new(0.30, 0.70, 1.00),
        }
    }
}

/// Configuration for [`ReplicationScene`].
#[derive(Clone, Copy, Debug)]
pub struct ReplicationConfig {
    /// Run description.
    pub timeline: Timeline,
    /// Number of base-pair rungs along the helix; must be at least 2.
    pub pairs: usize,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            timeline: scripted_timeline(),
            pairs: 90,
        }
    }
}

struct Resources {
    sphere: MeshHandle,
    capsule: MeshHandle,
    enzyme: MaterialHandle,
    backbone_a: GroupId,
    backbone_b: GroupId,
    rungs: [GroupId; 4],
}

/// Double helix splitting at a climbing replication fork.
pub struct ReplicationScene {
    cfg: ReplicationConfig,
    camera: CameraPath,
    res: Option<Resources>,
}

impl ReplicationScene {
    /// Fix the camera trajectory for the run.
    pub fn new(cfg: ReplicationConfig) -> Self {
        Self {
            cfg,
            camera: CameraPath {
                pitch_deg: 12.0,
                orbit_deg: (-18.0, 28.0),
                dist: (4.2, 5.2),
                y_offset: 0.25,
                target: Vec3::ZERO,
                fov_deg: 35.0,
                near: 0.03,
                far: 250.0,
            },
            res: None,
        }
    }
}

/// Bottom and top of the rung stack for a helix of `pairs` rungs.
pub fn helix_span(pairs: usize) -> (f32, f32) {
    let half = pairs as f32 * PAIR_SPACING * 0.5;
    (-half, half)
}

/// Fork height at normalized time `t`: climbs monotonically from just above
/// the bottom of the helix to just below the top.
pub fn fork_y(pairs: usize, t: f32) -> f32 {
    let (y_min, y_max) = helix_span(pairs);
    lerp(y_min + FORK_MARGIN, y_max - FORK_MARGIN, t)
}

/// Structural blend at height `yy` relative to the fork: 0 in the separated
/// daughter region below, 1 in the intact original helix above, smoothed over
/// a fixed window centered on the fork. Exactly 0.5 at the fork itself.
pub fn region_blend(fork: f32, yy: f32) -> f32 {
    smoothstep(fork - FORK_TRANSITION, fork + FORK_TRANSITION, yy)
}

/// Rung instance connecting two strand points: a thin cylinder at their
/// midpoint, rotated from +Y onto the strand axis, spanning the full gap.
pub fn rung_between(s1: Vec3, s2: Vec3) -> Instance {
    let dir = s2 - s1;
    let len = dir.length();
    let rot = Quat::from_rotation_arc(Vec3::Y, dir / len);
    Instance::from_trs(
        (s1 + s2) * 0.5,
        rot,
        Vec3::new(RUNG_THICKNESS, len * 0.5, RUNG_THICKNESS),
    )
}

impl ReplicationScene {
    fn sample_enzymes(
        &self,
        res: &Resources,
        t: f32,
        fork: f32,
        spin: Quat,
        backend: &mut dyn RenderBackend,
    ) -> MicrocosmResult<()> {
        // Helicase: a ring of six spheres turning around the fork.
        let ring_radius = 0.28;
        for k in 0..6 {
            let a = k as f32 * (TAU / 6.0) + 6.0 * t;
            let p = spin * Vec3::new(a.cos() * ring_radius, fork, a.sin() * ring_radius);
            backend.draw_single(
                res.sphere,
                res.enzyme,
                Instance::from_translation_uniform_scale(p, 0.10).transform,
            )?;
        }

        // Polymerases: two capsules trailing below the fork, one per daughter,
        // with a small opposed lateral wobble.
        let behind = fork - 0.35;
        let wobble = 0.05 * (10.0 * t).sin();
        let tilt = 20f32.to_radians();
        let left = spin * Vec3::new(-DAUGHTER_SEPARATION * 0.45, behind, wobble);
        let right = spin * Vec3::new(DAUGHTER_SEPARATION * 0.45, behind, -wobble);
        backend.draw_single(
            res.capsule,
            res.enzyme,
            Instance::from_trs(
                left,
                Quat::from_euler(EulerRot::YXZ, 0.0, 90f32.to_radians(), tilt),
                Vec3::splat(0.20),
            )
            .transform,
        )?;
        backend.draw_single(
            res.capsule,
            res.enzyme,
            Instance::from_trs(
                right,
                Quat::from_euler(EulerRot::YXZ, 0.0, 90f32.to_radians(), -tilt),
                Vec3::splat(0.20),
            )
            .transform,
        )?;
        Ok(())
    }
}

impl Scene for ReplicationScene {
    fn name(&self) -> &'static str {
        "replication"
    }

    fn timeline(&self) -> Timeline {
        self.cfg.timeline
    }

    fn background(&self) -> LinearRgb {
        BACKGROUND
    }

    fn camera(&self) -> CameraPath {
        self.camera
    }

    fn prepare(
        &mut self,
        backend: &mut dyn RenderBackend,
        batcher: &mut InstanceBatcher,
    ) -> MicrocosmResult<()> {
        if self.cfg.pairs < 2 {
            return Err(MicrocosmError::validation(
                "replication scene needs at least 2 base pairs",
            ));
        }

        let sphere = backend.create_mesh(Primitive::Sphere)?;
        let capsule = backend.create_mesh(Primitive::Capsule)?;
        let cylinder = backend.create_mesh(Primitive::Cylinder)?;

        // Emissions are kept subtle so frames don't blow out.
        let backbone_a = backend.create_material(
            MaterialDesc::new(LinearRgb::new(0.20, 0.80, 0.85))
                .with_emission(LinearRgb::new(0.02, 0.08, 0.10))
                .with_surface(0.0, 0.70),
        )?;
        let backbone_b = backend.create_material(
            MaterialDesc::new(LinearRgb::new(0.85, 0.30, 0.75))
                .with_emission(LinearRgb::new(0.08, 0.02, 0.07))
                .with_surface(0.0, 0.70),
        )?;
        let enzyme = backend.create_material(
            MaterialDesc::new(LinearRgb::new(0.78, 0.82, 0.90))
                .with_emission(LinearRgb::new(0.03, 0.04, 0.06))
                .with_surface(0.0, 0.85),
        )?;

        let mut rungs = [GroupId(0); 4];
        for pair in [BasePair::At, BasePair::Cg, BasePair::Gc, BasePair::Ta] {
            let material = backend.create_material(
                MaterialDesc::new(pair.base_color()).with_surface(0.0, 0.65),
            )?;
            rungs[pair as usize] = batcher.register(cylinder, material);
        }

        self.res = Some(Resources {
            sphere,
            capsule,
            enzyme,
            backbone_a: batcher.register(sphere, backbone_a),
            backbone_b: batcher.register(sphere, backbone_b),
            rungs,
        });
        Ok(())
    }

    fn sample(
        &self,
        t: f32,
        batcher: &mut InstanceBatcher,
        backend: &mut dyn RenderBackend,
    ) -> MicrocosmResult<()> {
        let res = self
            .res
            .as_ref()
            .ok_or_else(|| MicrocosmError::render("replication scene sampled before prepare"))?;

        let pairs = self.cfg.pairs;
        let (y_min, y_max) = helix_span(pairs);
        let fork = fork_y(pairs, t);
        // Whole-scene rotation, independent of the fork animation.
        let spin = Quat::from_rotation_y((120.0 * t).to_radians());

        self.sample_enzymes(res, t, fork, spin, backend)?;

        for i in 0..pairs {
            let yy = lerp(y_min, y_max, i as f32 / (pairs - 1) as f32);
            let blend = region_blend(fork, yy);
            let ang = i as f32 * TWIST + 2.2 * t;
            let rung_group = res.rungs[BasePair::for_rung(i) as usize];

            // Hard structural switch on top of the soft blend; the visible
            // seam at blend = 0.5 is intentional.
            if blend > 0.5 {
                let s1 = spin * strand_point(0.0, ang, yy);
                let s2 = spin * strand_point(0.0, ang + PI, yy);
                batcher.add(
                    backend,
                    res.backbone_a,
                    Instance::from_translation_uniform_scale(s1, BEAD_SCALE),
                )?;
                batcher.add(
                    backend,
                    res.backbone_b,
                    Instance::from_translation_uniform_scale(s2, BEAD_SCALE),
                )?;
                batcher.add(backend, rung_group, rung_between(s1, s2))?;
            } else {
                // The daughters spread apart as the blend falls off, each a
                // full helix of its own; the phase offsets make them
                // counter-rotate.
                let sep = (1.0 - blend) * DAUGHTER_SEPARATION;
                let center_l = lerp(-sep * 0.5, 0.0, blend);
                let center_r = lerp(sep * 0.5, 0.0, blend);
                let ang_l = ang + 0.4;
                let ang_r = -ang + 0.8;

                let s1l = spin * strand_point(center_l, ang_l, yy);
                let s2l = spin * strand_point(center_l, ang_l + PI, yy);
                let s1r = spin * strand_point(center_r, ang_r, yy);
                let s2r = spin * strand_point(center_r, ang_r + PI, yy);

                for (group, p) in [
                    (res.backbone_a, s1l),
                    (res.backbone_b, s2l),
                    (res.backbone_a, s1r),
                    (res.backbone_b, s2r),
                ] {
                    batcher.add(
                        backend,
                        group,
                        Instance::from_translation_uniform_scale(p, BEAD_SCALE),
                    )?;
                }

                // New base pairs appear only a little behind the polymerase.
                let build = clamp01((fork - yy) / 0.9);
                if build > 0.08 {
                    batcher.add(backend, rung_group, rung_between(s1l, s2l))?;
                    batcher.add(backend, rung_group, rung_between(s1r, s2r))?;
                }
            }
        }

        Ok(())
    }
}

/// A point on a strand circle of the helix centered at `center_x`.
fn strand_point(center_x: f32, ang: f32, yy: f32) -> Vec3 {
    Vec3::new(
        center_x + ang.cos() * HELIX_RADIUS,
        yy,
        ang.sin() * HELIX_RADIUS,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/replication.rs"]
mod tests;
