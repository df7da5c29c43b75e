use globe_viewer::core::{ResizePolicy, Viewport, WindowDimensions};

#[test]
fn test_track_follows_window() {
    let mut viewport = Viewport::new(WindowDimensions::new(1280, 720), ResizePolicy::Track);
    let next = viewport.on_resize(WindowDimensions::new(800, 600));

    assert_eq!(next, Some(WindowDimensions::new(800, 600)));
    assert_eq!(viewport.dimensions(), WindowDimensions::new(800, 600));
    assert!((viewport.aspect() - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn test_unchanged_size_needs_no_reconfigure() {
    let mut viewport = Viewport::new(WindowDimensions::new(640, 480), ResizePolicy::Track);
    assert_eq!(viewport.on_resize(WindowDimensions::new(640, 480)), None);
}

#[test]
fn test_minimised_window_is_ignored() {
    let mut viewport = Viewport::new(WindowDimensions::new(640, 480), ResizePolicy::Track);
    assert_eq!(viewport.on_resize(WindowDimensions::new(0, 0)), None);
    assert_eq!(viewport.on_resize(WindowDimensions::new(640, 0)), None);
    assert_eq!(viewport.dimensions(), WindowDimensions::new(640, 480));
}

#[test]
fn test_frozen_resizes_surface_but_keeps_aspect() {
    let start = WindowDimensions::new(1280, 720);
    let mut viewport = Viewport::new(start, ResizePolicy::Frozen);

    assert_eq!(
        viewport.on_resize(WindowDimensions::new(300, 300)),
        Some(WindowDimensions::new(300, 300))
    );
    assert_eq!(viewport.dimensions(), WindowDimensions::new(300, 300));
    assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-6);

    assert_eq!(viewport.on_resize(WindowDimensions::new(300, 300)), None);
}

#[test]
fn test_frozen_and_track_share_surface_size() {
    let start = WindowDimensions::new(800, 600);
    let mut frozen = Viewport::new(start, ResizePolicy::Frozen);
    let mut track = Viewport::new(start, ResizePolicy::Track);
    let next = WindowDimensions::new(1600, 600);

    assert_eq!(frozen.on_resize(next), track.on_resize(next));
    assert!((track.aspect() - 1600.0 / 600.0).abs() < 1e-6);
    assert!((frozen.aspect() - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn test_default_policy_tracks() {
    assert_eq!(ResizePolicy::default(), ResizePolicy::Track);
}
