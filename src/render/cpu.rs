//! Always-available software backend.
//!
//! Geometry is rendered as z-buffered splats: spheres become shaded disc
//! impostors, capsules and cylinders become chains of discs along their local
//! Y axis. Good enough to see every instance the samplers emit; not a
//! substitute for a real rasterizer.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::foundation::core::{Canvas, LinearRgb};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::render::backend::{
    CameraFrame, FrameRgb, MAX_INSTANCES_PER_DRAW, MaterialDesc, MaterialHandle, MeshHandle,
    Primitive, RenderBackend,
};

const AMBIENT: f32 = 0.25;
const KEY_INTENSITY: f32 = 0.9;
const EMISSION_SCALE: f32 = 0.15;
const MAX_SEGMENT_SAMPLES: usize = 256;

#[derive(Clone, Copy)]
struct MaterialState {
    base: LinearRgb,
    emission: LinearRgb,
}

/// A draw with its material state captured at submission time, so emission
/// changes made later in the frame do not retroactively recolor it.
struct DrawCmd {
    prim: Primitive,
    material: MaterialState,
    transform: Mat4,
}

struct ActiveFrame {
    camera: CameraFrame,
    clear: LinearRgb,
    commands: Vec<DrawCmd>,
}

/// Per-execution raster state shared by every splat of a frame.
#[derive(Clone, Copy)]
struct RasterCtx {
    view_proj: Mat4,
    cam_right: Vec3,
    light_view: Vec3,
    w: usize,
    h: usize,
}

/// Software splat rasterizer behind the [`RenderBackend`] boundary.
pub struct CpuBackend {
    canvas: Canvas,
    meshes: Vec<Primitive>,
    materials: Vec<MaterialState>,
    frame: Option<ActiveFrame>,
    color: Vec<u8>,
    depth: Vec<f32>,
    light_dir: Vec3,
}

impl CpuBackend {
    /// Create a backend rendering at `canvas` resolution.
    pub fn new(canvas: Canvas) -> Self {
        let pixels = canvas.width as usize * canvas.height as usize;
        // Fixed key light pitched down at the scene, matching the rigs the
        // scripted scenes were tuned against.
        let light_dir = (Quat::from_euler(
            EulerRot::YXZ,
            25f32.to_radians(),
            50f32.to_radians(),
            0.0,
        ) * Vec3::Z)
            .normalize();
        Self {
            canvas,
            meshes: Vec::new(),
            materials: Vec::new(),
            frame: None,
            color: vec![0; pixels * 3],
            depth: vec![1.0; pixels],
            light_dir,
        }
    }

    fn material_mut(&mut self, handle: MaterialHandle) -> MicrocosmResult<&mut MaterialState> {
        self.materials
            .get_mut(handle.0 as usize)
            .ok_or_else(|| MicrocosmError::render("unknown material handle"))
    }

    fn snapshot(
        &self,
        mesh: MeshHandle,
        material: MaterialHandle,
    ) -> MicrocosmResult<(Primitive, MaterialState)> {
        let prim = *self
            .meshes
            .get(mesh.0 as usize)
            .ok_or_else(|| MicrocosmError::render("unknown mesh handle"))?;
        let mat = *self
            .materials
            .get(material.0 as usize)
            .ok_or_else(|| MicrocosmError::render("unknown material handle"))?;
        Ok((prim, mat))
    }

    fn active_frame(&mut self) -> MicrocosmResult<&mut ActiveFrame> {
        self.frame
            .as_mut()
            .ok_or_else(|| MicrocosmError::render("draw submitted outside begin_frame/end_frame"))
    }

    fn execute(&mut self, frame: ActiveFrame) -> FrameRgb {
        let (w, h) = (self.canvas.width as usize, self.canvas.height as usize);
        let clear = frame.clear.to_rgb8();
        for px in self.color.chunks_exact_mut(3) {
            px.copy_from_slice(&clear);
        }
        self.depth.fill(1.0);

        let view = frame.camera.view();
        let ctx = RasterCtx {
            view_proj: frame.camera.proj(self.canvas.aspect()) * view,
            cam_right: {
                let forward = (frame.camera.target - frame.camera.eye).normalize();
                let right = forward.cross(Vec3::Y);
                if right.length_squared() < 1e-8 {
                    Vec3::X
                } else {
                    right.normalize()
                }
            },
            // Per-pixel impostor normals live in view space, so move the
            // light there once.
            light_view: view.transform_vector3(-self.light_dir).normalize(),
            w,
            h,
        };

        for cmd in &frame.commands {
            self.raster_command(cmd, &ctx);
        }

        FrameRgb {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.color.clone(),
        }
    }

    fn raster_command(&mut self, cmd: &DrawCmd, ctx: &RasterCtx) {
        let t = &cmd.transform;
        let scale_x = t.x_axis.truncate().length();
        let scale_y = t.y_axis.truncate().length();
        let scale_z = t.z_axis.truncate().length();
        let center = t.w_axis.truncate();

        match cmd.prim {
            Primitive::Sphere => {
                let radius = 0.5 * scale_x.max(scale_y).max(scale_z);
                self.splat(center, radius, &cmd.material, ctx);
            }
            Primitive::Capsule | Primitive::Cylinder => {
                let radius = 0.5 * (scale_x + scale_z) * 0.5;
                // Primitives span y in [-1, 1]; keep the capsule's sample span
                // inside its hemispherical caps.
                let half = match cmd.prim {
                    Primitive::Capsule => (scale_y - radius).max(0.0),
                    _ => scale_y,
                };
                let axis = t.y_axis.truncate() / scale_y.max(1e-8);
                let p0 = center - axis * half;
                let p1 = center + axis * half;
                let samples = segment_samples(p0, p1, radius, ctx);
                for i in 0..samples {
                    let u = if samples <= 1 {
                        0.5
                    } else {
                        i as f32 / (samples - 1) as f32
                    };
                    self.splat(p0.lerp(p1, u), radius, &cmd.material, ctx);
                }
            }
        }
    }

    fn splat(&mut self, center: Vec3, radius: f32, material: &MaterialState, ctx: &RasterCtx) {
        let Some((cx, cy, depth)) = project(ctx, center) else {
            return;
        };
        if !(0.0..=1.0).contains(&depth) {
            return;
        }
        let r_px = projected_radius(ctx, center, radius).max(0.5);

        let x0 = ((cx - r_px).floor().max(0.0)) as usize;
        let x1 = ((cx + r_px).ceil().min(ctx.w as f32 - 1.0)) as usize;
        let y0 = ((cy - r_px).floor().max(0.0)) as usize;
        let y1 = ((cy + r_px).ceil().min(ctx.h as f32 - 1.0)) as usize;
        if x0 > x1 || y0 > y1 {
            return;
        }

        let r2 = r_px * r_px;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 > r2 {
                    continue;
                }
                let idx = py * ctx.w + px;
                if depth >= self.depth[idx] {
                    continue;
                }
                // Fake sphere normal in view space from the pixel's offset
                // inside the disc.
                let nz = (1.0 - d2 / r2).sqrt();
                let normal = Vec3::new(dx / r_px, -dy / r_px, nz);
                let ndl = normal.dot(ctx.light_view).max(0.0);
                let lit = AMBIENT + KEY_INTENSITY * ndl;
                let out = LinearRgb::new(
                    material.base.r * lit + material.emission.r * EMISSION_SCALE,
                    material.base.g * lit + material.emission.g * EMISSION_SCALE,
                    material.base.b * lit + material.emission.b * EMISSION_SCALE,
                )
                .to_rgb8();
                self.depth[idx] = depth;
                self.color[idx * 3..idx * 3 + 3].copy_from_slice(&out);
            }
        }
    }
}

/// Project a world point to pixel coordinates and [0, 1] depth. `None` when
/// the point is behind the camera.
fn project(ctx: &RasterCtx, p: Vec3) -> Option<(f32, f32, f32)> {
    let clip = ctx.view_proj * p.extend(1.0);
    if clip.w <= 1e-6 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let x = (ndc.x * 0.5 + 0.5) * ctx.w as f32;
    let y = (1.0 - (ndc.y * 0.5 + 0.5)) * ctx.h as f32;
    Some((x, y, ndc.z))
}

/// Apparent pixel radius of a world-space sphere at `center`.
fn projected_radius(ctx: &RasterCtx, center: Vec3, radius: f32) -> f32 {
    let (Some(c), Some(e)) = (
        project(ctx, center),
        project(ctx, center + ctx.cam_right * radius),
    ) else {
        return 0.0;
    };
    ((e.0 - c.0).powi(2) + (e.1 - c.1).powi(2)).sqrt()
}

/// How many discs it takes to cover the projected segment without gaps.
fn segment_samples(p0: Vec3, p1: Vec3, radius: f32, ctx: &RasterCtx) -> usize {
    let (Some(a), Some(b)) = (project(ctx, p0), project(ctx, p1)) else {
        return 2;
    };
    let mid = (p0 + p1) * 0.5;
    let r_px = projected_radius(ctx, mid, radius).max(0.5);
    let dist = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
    ((dist / r_px).ceil() as usize + 1).clamp(2, MAX_SEGMENT_SAMPLES)
}

impl RenderBackend for CpuBackend {
    fn create_mesh(&mut self, prim: Primitive) -> MicrocosmResult<MeshHandle> {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(prim);
        Ok(handle)
    }

    fn create_material(&mut self, desc: MaterialDesc) -> MicrocosmResult<MaterialHandle> {
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(MaterialState {
            base: desc.base_color,
            emission: desc.emission.unwrap_or(LinearRgb::BLACK),
        });
        Ok(handle)
    }

    fn set_emission(
        &mut self,
        material: MaterialHandle,
        emission: LinearRgb,
    ) -> MicrocosmResult<()> {
        self.material_mut(material)?.emission = emission;
        Ok(())
    }

    fn begin_frame(&mut self, camera: &CameraFrame, clear: LinearRgb) -> MicrocosmResult<()> {
        if self.frame.is_some() {
            return Err(MicrocosmError::render(
                "begin_frame called with a frame already in progress",
            ));
        }
        self.frame = Some(ActiveFrame {
            camera: *camera,
            clear,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw_instanced(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transforms: &[Mat4],
    ) -> MicrocosmResult<()> {
        if transforms.len() > MAX_INSTANCES_PER_DRAW {
            return Err(MicrocosmError::validation(format!(
                "instanced draw of {} exceeds the {} instance limit",
                transforms.len(),
                MAX_INSTANCES_PER_DRAW
            )));
        }
        let (prim, mat) = self.snapshot(mesh, material)?;
        let frame = self.active_frame()?;
        frame.commands.extend(transforms.iter().map(|t| DrawCmd {
            prim,
            material: mat,
            transform: *t,
        }));
        Ok(())
    }

    fn draw_single(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transform: Mat4,
    ) -> MicrocosmResult<()> {
        let (prim, mat) = self.snapshot(mesh, material)?;
        let frame = self.active_frame()?;
        frame.commands.push(DrawCmd {
            prim,
            material: mat,
            transform,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> MicrocosmResult<FrameRgb> {
        let frame = self
            .frame
            .take()
            .ok_or_else(|| MicrocosmError::render("end_frame called without begin_frame"))?;
        Ok(self.execute(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
