use glam::{Mat4, Vec3};

use crate::foundation::core::{Canvas, LinearRgb};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};

/// Maximum number of instances a single instanced draw may carry.
///
/// Matches the draw-call limit of the target renderer; the batcher flushes a
/// group's buffer before it would exceed this.
pub const MAX_INSTANCES_PER_DRAW: usize = 1023;

/// The primitive meshes a backend must be able to provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Unit sphere, diameter 1 at scale 1.
    Sphere,
    /// Capsule spanning `y in [-1, 1]` at scale 1, radius 0.5.
    Capsule,
    /// Cylinder spanning `y in [-1, 1]` at scale 1, radius 0.5.
    Cylinder,
}

/// Opaque handle to a backend-owned mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) u32);

/// Opaque handle to a backend-owned material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub(crate) u32);

/// Static description of a material at creation time.
#[derive(Clone, Copy, Debug)]
pub struct MaterialDesc {
    /// Diffuse base color.
    pub base_color: LinearRgb,
    /// Optional emissive color; components may exceed 1.0.
    pub emission: Option<LinearRgb>,
    /// Metallic factor in `[0, 1]`.
    pub metallic: f32,
    /// Smoothness factor in `[0, 1]`.
    pub smoothness: f32,
}

impl MaterialDesc {
    /// A non-emissive material with default surface response.
    pub fn new(base_color: LinearRgb) -> Self {
        Self {
            base_color,
            emission: None,
            metallic: 0.0,
            smoothness: 0.75,
        }
    }

    /// Set the emissive color.
    pub fn with_emission(mut self, emission: LinearRgb) -> Self {
        self.emission = Some(emission);
        self
    }

    /// Set metallic and smoothness factors.
    pub fn with_surface(mut self, metallic: f32, smoothness: f32) -> Self {
        self.metallic = metallic;
        self.smoothness = smoothness;
        self
    }
}

/// Per-frame camera state handed to the backend before any geometry.
#[derive(Clone, Copy, Debug)]
pub struct CameraFrame {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl CameraFrame {
    /// Combined view-projection matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.proj(aspect) * self.view()
    }

    /// View matrix (right-handed, +Y up).
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Projection matrix ([0, 1] depth range).
    pub fn proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, self.near, self.far)
    }
}

/// A rendered frame as tightly-packed, row-major RGB8 bytes.
#[derive(Clone, Debug)]
pub struct FrameRgb {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

/// The rasterizer boundary the frame exporter drives.
///
/// Call order within a frame is strict: `begin_frame`, any number of draws,
/// `end_frame`. Meshes and materials are created once up front and live for
/// the run.
pub trait RenderBackend {
    /// Obtain a handle to one of the primitive meshes.
    fn create_mesh(&mut self, prim: Primitive) -> MicrocosmResult<MeshHandle>;

    /// Create a material from a static description.
    fn create_material(&mut self, desc: MaterialDesc) -> MicrocosmResult<MaterialHandle>;

    /// Replace a material's emissive color.
    ///
    /// Draws submitted after this call observe the new emission; draws already
    /// submitted this frame are unaffected.
    fn set_emission(
        &mut self,
        material: MaterialHandle,
        emission: LinearRgb,
    ) -> MicrocosmResult<()>;

    /// Start a frame: position the camera and clear the target to `clear`.
    fn begin_frame(&mut self, camera: &CameraFrame, clear: LinearRgb) -> MicrocosmResult<()>;

    /// Submit one instanced draw of up to [`MAX_INSTANCES_PER_DRAW`]
    /// transforms. Longer slices are a validation error.
    fn draw_instanced(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transforms: &[Mat4],
    ) -> MicrocosmResult<()>;

    /// Submit a single unbatched draw.
    fn draw_single(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transform: Mat4,
    ) -> MicrocosmResult<()>;

    /// Execute the accumulated draws and read the frame back.
    fn end_frame(&mut self) -> MicrocosmResult<FrameRgb>;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    /// Software splat rasterizer.
    Cpu,
}

/// Create a rendering backend for `canvas`.
///
/// Backend construction is the one fatal setup point: a kind that cannot
/// provide a usable shading path fails here, before any frame is produced.
pub fn create_backend(
    kind: BackendKind,
    canvas: Canvas,
) -> MicrocosmResult<Box<dyn RenderBackend>> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(MicrocosmError::setup("backend canvas must be non-empty"));
    }
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(canvas))),
    }
}
