use std::path::Path;

use crate::export::sink::{FrameSink, PngDirSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::MicrocosmResult;
use crate::render::backend::{BackendKind, RenderBackend, create_backend};
use crate::render::batch::InstanceBatcher;
use crate::scene::Scene;
use crate::scene::expansion::{ExpansionConfig, ExpansionScene};
use crate::scene::replication::{ReplicationConfig, ReplicationScene};

/// Where the parameterless entry points write their frames.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs/frames";

/// Counters for a completed export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames rendered and delivered, equal to the timeline's frame count.
    pub frames: u64,
}

/// Drive `scene` through its timeline, delivering every frame to `sink` in
/// strictly increasing order.
///
/// Per frame, in strict order: normalized time, camera pose, clear, sampler
/// through the batcher, flush of partial batches, draw execution, pixel
/// readback, sink delivery. Any failure aborts the run: a frame is either
/// fully produced and delivered or the sequence ends at it.
#[tracing::instrument(skip_all, fields(scene = scene.name()))]
pub fn export_scene(
    scene: &mut dyn Scene,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> MicrocosmResult<ExportStats> {
    let timeline = scene.timeline();
    timeline.validate()?;

    let mut batcher = InstanceBatcher::new();
    scene.prepare(backend, &mut batcher)?;
    sink.begin(SinkConfig {
        canvas: timeline.canvas,
        fps: timeline.fps,
    })?;

    let camera = scene.camera();
    for f in 0..timeline.frames {
        let idx = FrameIndex(f);
        let t = timeline.normalized(idx);
        let pose = camera.frame(t);
        backend.begin_frame(&pose, scene.background())?;
        scene.sample(t, &mut batcher, backend)?;
        batcher.flush_all(backend)?;
        let frame = backend.end_frame()?;
        sink.push_frame(idx, &frame)?;
        tracing::trace!(frame = f, "frame delivered");
    }

    sink.end()?;
    tracing::debug!(frames = timeline.frames, "export complete");
    Ok(ExportStats {
        frames: timeline.frames,
    })
}

fn export_to_dir(scene: &mut dyn Scene, dir: &Path) -> MicrocosmResult<ExportStats> {
    let mut backend = create_backend(BackendKind::Cpu, scene.timeline().canvas)?;
    let mut sink = PngDirSink::new(dir);
    export_scene(scene, backend.as_mut(), &mut sink)
}

/// Render the particle expansion scene to `dir` with the default
/// configuration.
pub fn render_expansion_scene_into(dir: impl AsRef<Path>) -> MicrocosmResult<ExportStats> {
    let mut scene = ExpansionScene::new(ExpansionConfig::default());
    export_to_dir(&mut scene, dir.as_ref())
}

/// Render the particle expansion scene to [`DEFAULT_OUTPUT_DIR`].
pub fn render_expansion_scene() -> MicrocosmResult<ExportStats> {
    render_expansion_scene_into(DEFAULT_OUTPUT_DIR)
}

/// Render the replicating double helix scene to `dir` with the default
/// configuration.
pub fn render_replication_scene_into(dir: impl AsRef<Path>) -> MicrocosmResult<ExportStats> {
    let mut scene = ReplicationScene::new(ReplicationConfig::default());
    export_to_dir(&mut scene, dir.as_ref())
}

/// Render the replicating double helix scene to [`DEFAULT_OUTPUT_DIR`].
pub fn render_replication_scene() -> MicrocosmResult<ExportStats> {
    render_replication_scene_into(DEFAULT_OUTPUT_DIR)
}
