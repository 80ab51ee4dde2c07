use super::*;
use glam::Vec3;

fn path() -> CameraPath {
    CameraPath {
        pitch_deg: 10.0,
        orbit_deg: (-15.0, 35.0),
        dist: (6.0, 10.0),
        y_offset: 0.2,
        target: Vec3::ZERO,
        fov_deg: 45.0,
        near: 0.01,
        far: 200.0,
    }
}

#[test]
fn pose_keeps_the_target_fixed() {
    let p = path();
    for i in 0..=10 {
        let frame = p.frame(i as f32 / 10.0);
        assert_eq!(frame.target, Vec3::ZERO);
    }
}

#[test]
fn dolly_pulls_back_linearly() {
    let p = path();
    // The orbit rotation preserves the eye's distance from the origin.
    let expected_start = Vec3::new(0.0, 0.2, -6.0).length();
    let expected_end = Vec3::new(0.0, 0.2, -10.0).length();
    assert!((p.frame(0.0).eye.length() - expected_start).abs() < 1e-4);
    assert!((p.frame(1.0).eye.length() - expected_end).abs() < 1e-4);
}

#[test]
fn zero_angles_place_the_eye_on_the_axis() {
    let p = CameraPath {
        pitch_deg: 0.0,
        orbit_deg: (0.0, 0.0),
        ..path()
    };
    let eye = p.frame(0.0).eye;
    assert!((eye - Vec3::new(0.0, 0.2, -6.0)).length() < 1e-5);
}

#[test]
fn orbit_sweeps_the_eye_around_the_axis() {
    let p = path();
    let a = p.frame(0.0).eye;
    let b = p.frame(1.0).eye;
    // Yaw changes over the run, so the horizontal direction must move.
    let dir_a = Vec3::new(a.x, 0.0, a.z).normalize();
    let dir_b = Vec3::new(b.x, 0.0, b.z).normalize();
    assert!(dir_a.dot(dir_b) < 0.9999);
}

#[test]
fn projection_constants_reach_the_camera_frame() {
    let frame = path().frame(0.5);
    assert_eq!(frame.fov_deg, 45.0);
    assert_eq!(frame.near, 0.01);
    assert_eq!(frame.far, 200.0);
}
