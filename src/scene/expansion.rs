//! The particle expansion scene: a twinkling star shell, a burst of particles
//! riding a decelerating power-law radius, and a bright flash that decays
//! over the first third of the run.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::foundation::core::{LinearRgb, Timeline};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::foundation::math::{clamp01, lerp};
use crate::render::backend::{MaterialDesc, MaterialHandle, MeshHandle, Primitive, RenderBackend};
use crate::render::batch::InstanceBatcher;
use crate::scene::camera::CameraPath;
use crate::scene::field::{ParticleSeed, StarSeed, particle_field, star_field};
use crate::scene::{GroupId, Instance, Scene, scripted_timeline};

const BACKGROUND: LinearRgb = LinearRgb::new(0.01, 0.01, 0.02);

const HOT_BASE: LinearRgb = LinearRgb::new(1.0, 0.75, 0.25);
const HOT_EMISSION: LinearRgb = LinearRgb::new(4.0, 1.8, 0.4);
const COOL_BASE: LinearRgb = LinearRgb::new(0.3, 0.7, 1.0);
const COOL_EMISSION: LinearRgb = LinearRgb::new(0.5, 1.5, 3.5);
const FLASH_EMISSION: LinearRgb = LinearRgb::new(10.0, 6.0, 2.0);

/// Configuration for [`ExpansionScene`].
#[derive(Clone, Copy, Debug)]
pub struct ExpansionConfig {
    /// Run description.
    pub timeline: Timeline,
    /// Number of backdrop stars.
    pub stars: usize,
    /// Number of expanding particles.
    pub particles: usize,
    /// Seed for the attribute fields; equal seeds give bit-identical runs.
    pub seed: u64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            timeline: scripted_timeline(),
            stars: 1200,
            particles: 2500,
            seed: 0x6e25_c1b7,
        }
    }
}

struct Resources {
    sphere: MeshHandle,
    hot: MaterialHandle,
    star_group: GroupId,
    particle_group: GroupId,
}

/// Star shell + expanding particle burst + initial flash.
pub struct ExpansionScene {
    cfg: ExpansionConfig,
    camera: CameraPath,
    stars: Vec<StarSeed>,
    particles: Vec<ParticleSeed>,
    res: Option<Resources>,
}

impl ExpansionScene {
    /// Generate the seed fields and fix the camera trajectory.
    pub fn new(cfg: ExpansionConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let stars = star_field(&mut rng, cfg.stars);
        let particles = particle_field(&mut rng, cfg.particles);
        Self {
            cfg,
            camera: CameraPath {
                pitch_deg: 10.0,
                orbit_deg: (-15.0, 35.0),
                dist: (6.0, 10.0),
                y_offset: 0.2,
                target: Vec3::ZERO,
                fov_deg: 45.0,
                near: 0.01,
                far: 200.0,
            },
            stars,
            particles,
            res: None,
        }
    }
}

/// Star brightness factor at normalized time `t`.
pub fn twinkle(phase: f32, t: f32) -> f32 {
    0.6 + 0.4 * (phase + 12.0 * t).sin()
}

/// Shared expansion radius: a power-law ease so the initial burst is fast and
/// growth decelerates. Monotonically non-decreasing on `[0, 1]`.
pub fn expansion_radius(t: f32) -> f32 {
    lerp(0.02, 12.0, t.powf(0.45))
}

/// Position of particle `index` at normalized time `t`: the seed direction
/// swirled around the vertical axis, scaled by its share of the expansion
/// radius.
pub fn particle_position(p: &ParticleSeed, index: usize, t: f32) -> Vec3 {
    let r = expansion_radius(t) * (0.15 + 0.85 * p.seed);
    let ang = lerp(0.0, 8.0, t) * (0.5 + p.seed) + index as f32 * 0.002;
    Quat::from_rotation_y(ang) * (p.direction * r)
}

/// Particle scale at normalized time `t`; particles shrink as they spread.
pub fn particle_size(p: &ParticleSeed, t: f32) -> f32 {
    lerp(0.22, 0.05, t) * (0.7 + 0.6 * p.seed)
}

/// Flash intensity: 1 at `t = 0`, linearly gone by `t = 1/3.5`.
pub fn flash_intensity(t: f32) -> f32 {
    clamp01(1.0 - 3.5 * t)
}

impl Scene for ExpansionScene {
    fn name(&self) -> &'static str {
        "expansion"
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
        let sphere = backend.create_mesh(Primitive::Sphere)?;
        let cool =
            backend.create_material(MaterialDesc::new(COOL_BASE).with_emission(COOL_EMISSION))?;
        let hot =
            backend.create_material(MaterialDesc::new(HOT_BASE).with_emission(HOT_EMISSION))?;
        self.res = Some(Resources {
            sphere,
            hot,
            star_group: batcher.register(sphere, cool),
            particle_group: batcher.register(sphere, hot),
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
            .ok_or_else(|| MicrocosmError::render("expansion scene sampled before prepare"))?;

        for star in &self.stars {
            let scale = star.scale * twinkle(star.phase, t);
            batcher.add(
                backend,
                res.star_group,
                Instance::from_translation_uniform_scale(star.position, scale),
            )?;
        }

        for (i, particle) in self.particles.iter().enumerate() {
            batcher.add(
                backend,
                res.particle_group,
                Instance::from_translation_uniform_scale(
                    particle_position(particle, i, t),
                    particle_size(particle, t),
                ),
            )?;
        }

        // The initial burst: one oversized unbatched sphere at the origin with
        // the hot material's emission boosted for this draw only. The baseline
        // emission is restored before anything else reuses the material.
        let flash = flash_intensity(t);
        if flash > 0.0 {
            backend.set_emission(res.hot, FLASH_EMISSION.scaled(flash))?;
            backend.draw_single(
                res.sphere,
                res.hot,
                Instance::from_translation_uniform_scale(Vec3::ZERO, 0.6 + 2.5 * flash).transform,
            )?;
            backend.set_emission(res.hot, HOT_EMISSION)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/expansion.rs"]
mod tests;
