use super::*;
use glam::{Mat4, Vec3};

use crate::foundation::core::LinearRgb;
use crate::render::backend::{
    CameraFrame, FrameRgb, MaterialDesc, Primitive,
};

/// Backend that records the size of every submitted batch.
#[derive(Default)]
struct RecordingBackend {
    meshes: u32,
    materials: u32,
    batches: Vec<(MeshHandle, MaterialHandle, usize)>,
    singles: usize,
}

impl RenderBackend for RecordingBackend {
    fn create_mesh(&mut self, _prim: Primitive) -> MicrocosmResult<MeshHandle> {
        self.meshes += 1;
        Ok(MeshHandle(self.meshes - 1))
    }

    fn create_material(&mut self, _desc: MaterialDesc) -> MicrocosmResult<MaterialHandle> {
        self.materials += 1;
        Ok(MaterialHandle(self.materials - 1))
    }

    fn set_emission(
        &mut self,
        _material: MaterialHandle,
        _emission: LinearRgb,
    ) -> MicrocosmResult<()> {
        Ok(())
    }

    fn begin_frame(&mut self, _camera: &CameraFrame, _clear: LinearRgb) -> MicrocosmResult<()> {
        Ok(())
    }

    fn draw_instanced(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        transforms: &[Mat4],
    ) -> MicrocosmResult<()> {
        assert!(transforms.len() <= MAX_INSTANCES_PER_DRAW);
        self.batches.push((mesh, material, transforms.len()));
        Ok(())
    }

    fn draw_single(
        &mut self,
        _mesh: MeshHandle,
        _material: MaterialHandle,
        _transform: Mat4,
    ) -> MicrocosmResult<()> {
        self.singles += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> MicrocosmResult<FrameRgb> {
        Ok(FrameRgb {
            width: 0,
            height: 0,
            data: Vec::new(),
        })
    }
}

fn instance_at(x: f32) -> Instance {
    Instance::from_translation_uniform_scale(Vec3::new(x, 0.0, 0.0), 1.0)
}

#[test]
fn every_add_is_submitted_exactly_once() {
    let mut backend = RecordingBackend::default();
    let mesh = backend.create_mesh(Primitive::Sphere).unwrap();
    let material = backend
        .create_material(MaterialDesc::new(LinearRgb::BLACK))
        .unwrap();

    let mut batcher = InstanceBatcher::new();
    let group = batcher.register(mesh, material);

    let total = 2500usize;
    for i in 0..total {
        batcher.add(&mut backend, group, instance_at(i as f32)).unwrap();
    }
    batcher.flush_all(&mut backend).unwrap();

    let submitted: usize = backend.batches.iter().map(|(_, _, n)| n).sum();
    assert_eq!(submitted, total);
    assert_eq!(batcher.submitted(group), total as u64);
    assert_eq!(batcher.pending(group), 0);
}

#[test]
fn full_buffers_flush_before_the_add_completes() {
    let mut backend = RecordingBackend::default();
    let mesh = backend.create_mesh(Primitive::Sphere).unwrap();
    let material = backend
        .create_material(MaterialDesc::new(LinearRgb::BLACK))
        .unwrap();

    let mut batcher = InstanceBatcher::new();
    let group = batcher.register(mesh, material);

    for i in 0..MAX_INSTANCES_PER_DRAW {
        batcher.add(&mut backend, group, instance_at(i as f32)).unwrap();
    }
    // Capacity reached: the batch went out without waiting for flush_all.
    assert_eq!(backend.batches.len(), 1);
    assert_eq!(backend.batches[0].2, MAX_INSTANCES_PER_DRAW);
    assert_eq!(batcher.pending(group), 0);
}

#[test]
fn batch_sizes_never_exceed_the_draw_limit() {
    let mut backend = RecordingBackend::default();
    let mesh = backend.create_mesh(Primitive::Sphere).unwrap();
    let material = backend
        .create_material(MaterialDesc::new(LinearRgb::BLACK))
        .unwrap();

    let mut batcher = InstanceBatcher::new();
    let group = batcher.register(mesh, material);
    for i in 0..3000 {
        batcher.add(&mut backend, group, instance_at(i as f32)).unwrap();
    }
    batcher.flush_all(&mut backend).unwrap();

    assert_eq!(backend.batches.len(), 3);
    assert!(backend.batches.iter().all(|(_, _, n)| *n <= MAX_INSTANCES_PER_DRAW));
    assert_eq!(backend.batches[2].2, 3000 - 2 * MAX_INSTANCES_PER_DRAW);
}

#[test]
fn groups_route_to_their_own_handles() {
    let mut backend = RecordingBackend::default();
    let sphere = backend.create_mesh(Primitive::Sphere).unwrap();
    let cylinder = backend.create_mesh(Primitive::Cylinder).unwrap();
    let a = backend
        .create_material(MaterialDesc::new(LinearRgb::BLACK))
        .unwrap();
    let b = backend
        .create_material(MaterialDesc::new(LinearRgb::BLACK))
        .unwrap();

    let mut batcher = InstanceBatcher::new();
    let ga = batcher.register(sphere, a);
    let gb = batcher.register(cylinder, b);
    batcher.add(&mut backend, ga, instance_at(0.0)).unwrap();
    batcher.add(&mut backend, gb, instance_at(1.0)).unwrap();
    batcher.add(&mut backend, gb, instance_at(2.0)).unwrap();
    batcher.flush_all(&mut backend).unwrap();

    assert_eq!(backend.batches.len(), 2);
    assert_eq!(backend.batches[0], (sphere, a, 1));
    assert_eq!(backend.batches[1], (cylinder, b, 2));
}

#[test]
fn unregistered_group_is_a_validation_error() {
    let mut backend = RecordingBackend::default();
    let mut batcher = InstanceBatcher::new();
    let err = batcher
        .add(&mut backend, GroupId(3), instance_at(0.0))
        .unwrap_err();
    assert!(matches!(err, MicrocosmError::Validation(_)));
}
