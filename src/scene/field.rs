//! Seeded generation of per-instance static attributes.
//!
//! Records are produced once before the frame loop from an explicitly seeded
//! RNG and are immutable for the run: index `i` always maps to the same
//! record for a fixed seed, so samplers can address instances by index.

use glam::Vec3;
use rand::Rng;

/// Static attributes of one backdrop star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSeed {
    /// Fixed position on the backdrop shell.
    pub position: Vec3,
    /// Base scale before the twinkle factor.
    pub scale: f32,
    /// Twinkle phase offset.
    pub phase: f32,
}

/// Static attributes of one expansion particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    /// Unit direction of travel from the origin.
    pub direction: Vec3,
    /// Scalar in `[0.2, 1.0]` offsetting radius, swirl, and size.
    pub seed: f32,
}

/// Generate `count` stars uniformly distributed on a spherical shell with
/// radius in `[40, 120]`.
pub fn star_field(rng: &mut impl Rng, count: usize) -> Vec<StarSeed> {
    (0..count)
        .map(|_| {
            let u: f32 = rng.random();
            let v: f32 = rng.random();
            let theta = std::f32::consts::TAU * u;
            let phi = (2.0 * v - 1.0).acos();
            let r = rng.random_range(40.0..120.0);
            StarSeed {
                position: Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.cos(),
                    r * phi.sin() * theta.sin(),
                ),
                scale: rng.random_range(0.02..0.06),
                phase: rng.random_range(0.0..10.0),
            }
        })
        .collect()
}

/// Generate `count` particle directions, near-uniform but squashed toward a
/// disc (the vertical component is damped before normalization).
pub fn particle_field(rng: &mut impl Rng, count: usize) -> Vec<ParticleSeed> {
    (0..count)
        .map(|_| {
            let u: f32 = rng.random();
            let v: f32 = rng.random();
            let theta = std::f32::consts::TAU * u;
            let z = 2.0 * v - 1.0;
            let w = (1.0 - z * z).max(0.0).sqrt();
            ParticleSeed {
                direction: Vec3::new(w * theta.cos(), 0.35 * z, w * theta.sin()).normalize(),
                seed: rng.random_range(0.2..1.0),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/field.rs"]
mod tests;
