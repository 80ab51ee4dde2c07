use super::*;

#[test]
fn base_pair_sequence_cycles_every_four() {
    assert_eq!(BasePair::for_rung(0), BasePair::At);
    assert_eq!(BasePair::for_rung(1), BasePair::Cg);
    assert_eq!(BasePair::for_rung(2), BasePair::Gc);
    assert_eq!(BasePair::for_rung(3), BasePair::Ta);
    for i in 0..64 {
        assert_eq!(BasePair::for_rung(i), BasePair::for_rung(i + 4));
    }
}

#[test]
fn blend_is_half_exactly_at_the_fork() {
    for pairs in [10, 90, 200] {
        for i in 0..=10 {
            let fork = fork_y(pairs, i as f32 / 10.0);
            assert!((region_blend(fork, fork) - 0.5).abs() < 1e-5);
        }
    }
}

#[test]
fn blend_saturates_outside_the_transition_window() {
    let fork = 1.3;
    assert_eq!(region_blend(fork, fork + 0.55), 1.0);
    assert_eq!(region_blend(fork, fork + 5.0), 1.0);
    assert_eq!(region_blend(fork, fork - 0.55), 0.0);
    assert_eq!(region_blend(fork, fork - 5.0), 0.0);
}

#[test]
fn fork_climbs_monotonically_inside_the_helix() {
    let pairs = 90;
    let (y_min, y_max) = helix_span(pairs);
    let mut prev = f32::NEG_INFINITY;
    for i in 0..=100 {
        let fork = fork_y(pairs, i as f32 / 100.0);
        assert!(fork > prev);
        assert!(fork > y_min && fork < y_max);
        prev = fork;
    }
}

#[test]
fn helix_span_is_symmetric() {
    let (y_min, y_max) = helix_span(90);
    assert_eq!(y_min, -y_max);
    assert!((y_max - 90.0 * 0.12 * 0.5).abs() < 1e-6);
}

#[test]
fn rung_spans_exactly_between_its_strand_points() {
    use glam::Vec3;

    let s1 = Vec3::new(-0.45, 1.2, 0.1);
    let s2 = Vec3::new(0.45, 1.2, -0.1);
    let rung = rung_between(s1, s2);
    // The cylinder primitive spans y in [-1, 1], so its transformed ends must
    // land on the strand points.
    let top = rung.transform.transform_point3(Vec3::Y);
    let bottom = rung.transform.transform_point3(-Vec3::Y);
    assert!((top - s2).length() < 1e-5);
    assert!((bottom - s1).length() < 1e-5);
}
