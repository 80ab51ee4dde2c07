use glam::{EulerRot, Quat, Vec3};

use crate::foundation::math::lerp;
use crate::render::backend::CameraFrame;

/// Orbit-and-dolly camera trajectory: a linear yaw sweep combined with a
/// linear pull on the eye distance, always looking at a fixed target.
///
/// Both scenes share this shape and differ only in the parameter ranges.
#[derive(Clone, Copy, Debug)]
pub struct CameraPath {
    /// Fixed downward pitch in degrees.
    pub pitch_deg: f32,
    /// Orbit yaw sweep in degrees, `(start, end)`.
    pub orbit_deg: (f32, f32),
    /// Eye distance from the target, `(start, end)`.
    pub dist: (f32, f32),
    /// Vertical eye offset before the orbit rotation is applied.
    pub y_offset: f32,
    /// Look-at target.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl CameraPath {
    /// Pose at normalized time `t`.
    ///
    /// The eye starts at `(0, y_offset, -dist)` and is swung by the orbit yaw
    /// and the fixed pitch. Must be evaluated before any geometry for the
    /// frame: nothing downstream culls against it.
    pub fn frame(&self, t: f32) -> CameraFrame {
        let orbit = lerp(self.orbit_deg.0, self.orbit_deg.1, t);
        let dist = lerp(self.dist.0, self.dist.1, t);
        let rot = Quat::from_euler(
            EulerRot::YXZ,
            orbit.to_radians(),
            self.pitch_deg.to_radians(),
            0.0,
        );
        CameraFrame {
            eye: rot * Vec3::new(0.0, self.y_offset, -dist),
            target: self.target,
            fov_deg: self.fov_deg,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
