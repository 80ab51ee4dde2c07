//! Microcosm generates two deterministic, scripted 3-D animations (a
//! particle expansion and a replicating double helix) and exports each as a
//! numbered sequence of PNG frames suitable for assembly into video.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: per-instance static attributes are generated once from a
//!    seeded RNG ([`star_field`], [`particle_field`])
//! 2. **Sample**: each frame, a [`Scene`] turns normalized time into instance
//!    transforms, streamed through the [`InstanceBatcher`]
//! 3. **Render**: bounded batches are submitted to a [`RenderBackend`], which
//!    executes the frame and reads back pixels
//! 4. **Export**: frames are delivered in strict order to a [`FrameSink`]
//!    (numbered PNGs on disk, or memory for tests)
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: equal seeds give bit-identical instance
//!   streams; frames are produced strictly sequentially.
//! - **Everything is submitted**: there is no culling or visibility model;
//!   batches never silently drop an instance.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod export;
mod foundation;
mod render;
mod scene;

pub use export::exporter::{
    DEFAULT_OUTPUT_DIR, ExportStats, export_scene, render_expansion_scene,
    render_expansion_scene_into, render_replication_scene, render_replication_scene_into,
};
pub use export::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex, LinearRgb, Timeline};
pub use foundation::error::{MicrocosmError, MicrocosmResult};
pub use foundation::math::{clamp01, inverse_lerp, lerp, smoothstep};
pub use render::backend::{
    BackendKind, CameraFrame, FrameRgb, MAX_INSTANCES_PER_DRAW, MaterialDesc, MaterialHandle,
    MeshHandle, Primitive, RenderBackend, create_backend,
};
pub use render::batch::InstanceBatcher;
pub use render::cpu::CpuBackend;
pub use scene::camera::CameraPath;
pub use scene::expansion::{ExpansionConfig, ExpansionScene};
pub use scene::field::{ParticleSeed, StarSeed, particle_field, star_field};
pub use scene::replication::{BasePair, ReplicationConfig, ReplicationScene};
pub use scene::{GroupId, Instance, Scene, scripted_timeline};
