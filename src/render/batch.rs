use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::render::backend::{MAX_INSTANCES_PER_DRAW, MaterialHandle, MeshHandle, RenderBackend};
use crate::scene::{GroupId, Instance};

struct GroupBuffer {
    mesh: MeshHandle,
    material: MaterialHandle,
    transforms: Vec<glam::Mat4>,
    submitted: u64,
}

/// Accumulates instance transforms per (mesh, material) group and flushes a
/// bounded batch to the backend whenever a buffer fills.
///
/// Guarantees: every added instance is submitted exactly once per frame,
/// submission order within a group is insertion order, and no batch exceeds
/// [`MAX_INSTANCES_PER_DRAW`].
#[derive(Default)]
pub struct InstanceBatcher {
    groups: Vec<GroupBuffer>,
}

impl InstanceBatcher {
    /// Create an empty batcher with no registered groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a (mesh, material) group and get its id.
    ///
    /// Groups are registered once at scene preparation; ids are stable for
    /// the run.
    pub fn register(&mut self, mesh: MeshHandle, material: MaterialHandle) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(GroupBuffer {
            mesh,
            material,
            transforms: Vec::with_capacity(MAX_INSTANCES_PER_DRAW),
            submitted: 0,
        });
        id
    }

    /// Append one instance to `group`, flushing the group's buffer through
    /// `backend` if it reaches capacity.
    pub fn add(
        &mut self,
        backend: &mut dyn RenderBackend,
        group: GroupId,
        instance: Instance,
    ) -> MicrocosmResult<()> {
        let buf = self
            .groups
            .get_mut(group.0)
            .ok_or_else(|| MicrocosmError::validation("instance added to unregistered group"))?;
        buf.transforms.push(instance.transform);
        if buf.transforms.len() >= MAX_INSTANCES_PER_DRAW {
            Self::flush_buffer(buf, backend)?;
        }
        Ok(())
    }

    /// Submit every non-empty buffer. Called at end of frame.
    pub fn flush_all(&mut self, backend: &mut dyn RenderBackend) -> MicrocosmResult<()> {
        for buf in &mut self.groups {
            if !buf.transforms.is_empty() {
                Self::flush_buffer(buf, backend)?;
            }
        }
        Ok(())
    }

    /// Instances currently buffered (not yet submitted) for `group`.
    pub fn pending(&self, group: GroupId) -> usize {
        self.groups.get(group.0).map_or(0, |b| b.transforms.len())
    }

    /// Total instances submitted for `group` over the batcher's lifetime.
    pub fn submitted(&self, group: GroupId) -> u64 {
        self.groups.get(group.0).map_or(0, |b| b.submitted)
    }

    fn flush_buffer(buf: &mut GroupBuffer, backend: &mut dyn RenderBackend) -> MicrocosmResult<()> {
        backend.draw_instanced(buf.mesh, buf.material, &buf.transforms)?;
        buf.submitted += buf.transforms.len() as u64;
        buf.transforms.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
