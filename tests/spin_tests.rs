use std::f32::consts::TAU;

use globe_viewer::core::Spin;

#[test]
fn test_angle_is_rate_times_frames() {
    let mut spin = Spin::new(0.002);
    for _ in 0..100 {
        spin.advance();
    }
    assert!((spin.angle() - 0.2).abs() < 1e-6);
}

#[test]
fn test_rotation_is_strictly_additive() {
    let rate = 0.0028;
    let mut spin = Spin::new(rate);
    let mut previous = spin.total_angle();

    for _ in 0..1000 {
        spin.advance();
        let total = spin.total_angle();
        assert!((total - previous - rate as f64).abs() < 1e-9);
        previous = total;
    }
}

#[test]
fn test_same_frame_count_same_angle() {
    let mut stepped = Spin::new(0.002);
    for _ in 0..12_345 {
        stepped.advance();
    }

    let mut jumped = Spin::new(0.002);
    jumped.advance_by(12_345);

    assert_eq!(stepped.angle(), jumped.angle());
    assert_eq!(stepped.angle(), Spin::angle_at(0.002, 12_345));
}

#[test]
fn test_angle_wraps_into_one_turn() {
    let mut spin = Spin::new(0.5);
    spin.advance_by(1_000_000);
    let angle = spin.angle();
    assert!((0.0..TAU).contains(&angle), "angle {} not wrapped", angle);
    assert!(spin.total_angle() > 1000.0);
}

#[test]
fn test_negative_rate_still_wraps_positive() {
    let mut spin = Spin::new(-0.01);
    spin.advance_by(10);
    let expected = TAU - 0.1;
    assert!((spin.angle() - expected).abs() < 1e-5);
}

#[test]
fn test_angle_just_below_full_turn_wraps_to_zero() {
    // 0.002 * 19_782_608 lands within f32 rounding of 2π
    let angle = Spin::angle_at(0.002, 19_782_608);
    assert!(angle >= 0.0 && angle < TAU, "angle {} escaped [0, 2π)", angle);
}

#[test]
fn test_angle_stays_in_one_turn_over_long_runs() {
    for frames in (19_700_000..19_900_000u64).step_by(7) {
        let angle = Spin::angle_at(0.002, frames);
        assert!(angle >= 0.0 && angle < TAU, "frames {} angle {}", frames, angle);
    }
}
