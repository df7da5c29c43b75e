use globe_viewer::core::{GateState, LoadingGate, Presentation};

#[test]
fn test_fade_endpoints() {
    let mut gate = LoadingGate::new(1.0);
    assert_eq!(gate.presentation(), Presentation::HIDDEN);

    gate.begin_fade();
    assert_eq!(gate.presentation(), Presentation::HIDDEN);

    assert!(gate.tick(1.0));
    assert_eq!(gate.presentation(), Presentation::REVEALED);
    assert!(gate.is_revealed());
}

#[test]
fn test_cross_fade_is_complementary() {
    let mut gate = LoadingGate::new(2.0);
    gate.begin_fade();

    for _ in 0..7 {
        gate.tick(0.25);
        let p = gate.presentation();
        assert!((p.loading_screen_opacity + p.canvas_opacity - 1.0).abs() < 1e-6);
    }
    assert_eq!(gate.state(), GateState::Fading { elapsed: 1.75 });
    assert!((gate.presentation().canvas_opacity - 0.875).abs() < 1e-6);
}

#[test]
fn test_completion_reported_once() {
    let mut gate = LoadingGate::new(0.5);
    gate.begin_fade();
    let completions = (0..10).filter(|_| gate.tick(0.1)).count();
    assert_eq!(completions, 1);
}

#[test]
fn test_zero_duration_reveals_immediately() {
    let mut gate = LoadingGate::new(0.0);
    gate.begin_fade();
    assert!(gate.is_revealed());
    assert_eq!(gate.progress(), 1.0);
}

#[test]
fn test_second_begin_does_not_restart() {
    let mut gate = LoadingGate::new(1.0);
    gate.begin_fade();
    gate.tick(0.5);
    gate.begin_fade();
    assert!((gate.progress() - 0.5).abs() < 1e-6);
}

#[test]
fn test_open_gate_ignores_fade() {
    let mut gate = LoadingGate::open();
    gate.begin_fade();
    assert!(!gate.tick(1.0));
    assert!(gate.presentation().canvas_visible());
}
