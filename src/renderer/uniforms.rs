use crate::camera::PerspectiveCamera;
use crate::geometry::StarField;
use crate::scene::DirectionalLight;
use crate::types::{GlobalsUniform, StarInstance};

/// Per-frame values shared by every pipeline
pub fn globals_uniform(
    camera: &PerspectiveCamera,
    sun: &DirectionalLight,
    star_size: f32,
    canvas_opacity: f32,
) -> GlobalsUniform {
    let direction = sun.direction();

    GlobalsUniform {
        view: camera.view().to_cols_array_2d(),
        proj: camera.projection().to_cols_array_2d(),
        camera_position: camera.position.extend(1.0).to_array(),
        sun_direction: direction.extend(sun.intensity).to_array(),
        sun_color: sun.color.to_vec4(1.0),
        params: [star_size, canvas_opacity.clamp(0.0, 1.0), 0.0, 0.0],
    }
}

pub fn star_instances(stars: &StarField) -> Vec<StarInstance> {
    stars
        .stars
        .iter()
        .map(|star| StarInstance {
            position: star.position.to_array(),
            _pad: 0.0,
            color: star.color.to_array(),
            _pad2: 0.0,
        })
        .collect()
}
