use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn star_field_is_deterministic_for_a_seed() {
    let a = star_field(&mut StdRng::seed_from_u64(7), 64);
    let b = star_field(&mut StdRng::seed_from_u64(7), 64);
    assert_eq!(a, b);

    let c = star_field(&mut StdRng::seed_from_u64(8), 64);
    assert_ne!(a, c);
}

#[test]
fn star_records_stay_in_their_ranges() {
    let stars = star_field(&mut StdRng::seed_from_u64(1), 500);
    assert_eq!(stars.len(), 500);
    for s in &stars {
        let r = s.position.length();
        assert!((40.0..=120.0).contains(&r), "shell radius out of range: {r}");
        assert!((0.02..=0.06).contains(&s.scale));
        assert!((0.0..=10.0).contains(&s.phase));
    }
}

#[test]
fn particle_field_is_deterministic_for_a_seed() {
    let a = particle_field(&mut StdRng::seed_from_u64(7), 64);
    let b = particle_field(&mut StdRng::seed_from_u64(7), 64);
    assert_eq!(a, b);
}

#[test]
fn particle_directions_are_unit_and_disc_clustered() {
    let particles = particle_field(&mut StdRng::seed_from_u64(2), 500);
    for p in &particles {
        assert!((p.direction.length() - 1.0).abs() < 1e-5);
        assert!((0.2..=1.0).contains(&p.seed));
    }
    // The vertical component is damped before normalization, so on average
    // directions hug the horizontal plane.
    let mean_abs_y: f32 =
        particles.iter().map(|p| p.direction.y.abs()).sum::<f32>() / particles.len() as f32;
    assert!(mean_abs_y < 0.5, "directions should cluster toward a disc");
}
