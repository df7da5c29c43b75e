use glam::{Mat4, Vec3};
use globe_viewer::config::GlobeConfig;
use globe_viewer::material::{Material, TextureSlot};
use globe_viewer::scene::{LayerKind, Scene};

fn small_config() -> GlobeConfig {
    let mut config = GlobeConfig::default();
    config.globe.detail = 2;
    config.stars.count = 50;
    config.stars.seed = Some(11);
    config
}

#[test]
fn test_four_layers_share_one_geometry() {
    let scene = Scene::from_config(&small_config());
    let kinds: Vec<_> = scene.earth.layers.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![LayerKind::Surface, LayerKind::Lights, LayerKind::Clouds, LayerKind::Glow]
    );
    assert_eq!(scene.geometry.triangle_count(), 20 * 9);
    assert_eq!(scene.stars.len(), 50);
}

#[test]
fn test_layer_scales_and_materials() {
    let scene = Scene::from_config(&small_config());
    let scale = |kind| scene.earth.layer(kind).map(|l| l.scale);

    assert_eq!(scale(LayerKind::Surface), Some(1.0));
    assert_eq!(scale(LayerKind::Lights), Some(1.0));
    assert_eq!(scale(LayerKind::Clouds), Some(1.003));
    assert_eq!(scale(LayerKind::Glow), Some(1.01));

    let surface = scene.earth.layer(LayerKind::Surface).unwrap();
    assert!(matches!(
        surface.material,
        Material::Phong {
            map: TextureSlot::Day,
            bump_map: TextureSlot::Bump,
            ..
        }
    ));
    assert!(matches!(
        scene.earth.layer(LayerKind::Glow).unwrap().material,
        Material::Fresnel(_)
    ));
}

#[test]
fn test_group_tilts_about_z() {
    let scene = Scene::from_config(&small_config());
    assert!((scene.earth.tilt + 23.4f32.to_radians()).abs() < 1e-6);

    // The rotation axis of every layer is the tilted Y axis
    let axis = scene.earth.transform().transform_vector3(Vec3::Y);
    assert!(axis.x > 0.0);
    assert!((axis.angle_between(Vec3::Y) - 23.4f32.to_radians()).abs() < 1e-5);
}

#[test]
fn test_advance_rotates_each_layer_at_its_rate() {
    let mut scene = Scene::from_config(&small_config());
    for _ in 0..500 {
        scene.advance();
    }
    assert_eq!(scene.frames(), 500);

    let angle = |kind| scene.earth.layer(kind).unwrap().spin.angle();
    assert!((angle(LayerKind::Surface) - 1.0).abs() < 1e-5);
    assert!((angle(LayerKind::Clouds) - 1.4).abs() < 1e-5);
    assert_eq!(angle(LayerKind::Lights), angle(LayerKind::Glow));
}

#[test]
fn test_model_matrix_keeps_points_on_scaled_shell() {
    let mut scene = Scene::from_config(&small_config());
    scene.advance();

    for (layer, model) in scene.earth.layers.iter().zip(scene.earth.layer_matrices()) {
        let p = model.transform_point3(Vec3::X);
        assert!((p.length() - layer.scale).abs() < 1e-5);
    }
}

#[test]
fn test_spin_axis_is_fixed_by_rotation() {
    let mut scene = Scene::from_config(&small_config());
    let before = scene.earth.layer_matrices().next().unwrap_or(Mat4::IDENTITY);
    for _ in 0..100 {
        scene.advance();
    }
    let after = scene.earth.layer_matrices().next().unwrap_or(Mat4::IDENTITY);

    let pole = scene.earth.transform().transform_vector3(Vec3::Y);
    assert!((before.transform_vector3(Vec3::Y) - pole).length() < 1e-5);
    assert!((after.transform_vector3(Vec3::Y) - pole).length() < 1e-5);
    assert!(!before.abs_diff_eq(after, 1e-4));
}

#[test]
fn test_sun_comes_from_config() {
    let scene = Scene::from_config(&small_config());
    assert_eq!(scene.sun.position, Vec3::new(2.0, 0.5, 1.5));
    assert_eq!(scene.sun.intensity, 1.0);
}
