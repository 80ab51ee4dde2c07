//! Scene-side types: per-frame instances, batch groups, the camera path, the
//! seeded attribute fields, and the two scripted scenes.

pub mod camera;
pub mod expansion;
pub mod field;
pub mod replication;

use glam::{Mat4, Quat, Vec3};

use crate::foundation::core::{Canvas, Fps, LinearRgb, Timeline};
use crate::foundation::error::MicrocosmResult;
use crate::render::backend::RenderBackend;
use crate::render::batch::InstanceBatcher;
use crate::scene::camera::CameraPath;

/// One drawable occurrence of a mesh: a TRS transform destined for a batch
/// group. Instances are recomputed every frame and never outlive it.
#[derive(Clone, Copy, Debug)]
pub struct Instance {
    /// World transform (translation, rotation, possibly anisotropic scale).
    pub transform: Mat4,
}

impl Instance {
    /// Build an instance from translation, rotation, and scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            transform: Mat4::from_scale_rotation_translation(scale, rotation, translation),
        }
    }

    /// Build an unrotated instance with uniform scale.
    pub fn from_translation_uniform_scale(translation: Vec3, scale: f32) -> Self {
        Self::from_trs(translation, Quat::IDENTITY, Vec3::splat(scale))
    }
}

/// Identifies a (mesh, material) batch group registered with the
/// [`InstanceBatcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

/// A scripted scene the frame exporter can drive.
///
/// `prepare` runs once before the frame loop (mesh/material creation, group
/// registration); `sample` runs once per frame and must emit every instance
/// and unbatched draw for that frame; there is no culling, everything is
/// always submitted.
pub trait Scene {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The run description (resolution, fps, frame count).
    fn timeline(&self) -> Timeline;

    /// Frame clear color.
    fn background(&self) -> LinearRgb;

    /// Camera trajectory for the run.
    fn camera(&self) -> CameraPath;

    /// Create backend resources and register batch groups.
    fn prepare(
        &mut self,
        backend: &mut dyn RenderBackend,
        batcher: &mut InstanceBatcher,
    ) -> MicrocosmResult<()>;

    /// Emit all geometry for normalized time `t`.
    fn sample(
        &self,
        t: f32,
        batcher: &mut InstanceBatcher,
        backend: &mut dyn RenderBackend,
    ) -> MicrocosmResult<()>;
}

/// The production run description both scenes ship with: portrait 720x1280 at
/// 30 fps for 4 seconds.
pub fn scripted_timeline() -> Timeline {
    Timeline {
        canvas: Canvas {
            width: 720,
            height: 1280,
        },
        fps: Fps { num: 30, den: 1 },
        frames: 120,
    }
}
