use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::config::{CameraConfig, ControlsConfig};

/// Keeps the polar angle off the poles so `look_at` never degenerates
const POLAR_EPSILON: f32 = 1e-6;
/// Distance factor per wheel notch
const ZOOM_BASE: f32 = 0.95;
/// Pending motion below this is treated as settled
const SETTLED: f32 = 1e-6;

pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Camera on the +Z axis looking at the origin
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.distance),
            target: Vec3::ZERO,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Right-handed projection with wgpu's 0..1 depth range
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }
}

/// Spherical coordinates around the orbit target.
/// `theta` is measured from +Z towards +X, `phi` from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Pointer-driven orbiting around a target with optional inertia
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queue a rotation for a pointer drag of (dx, dy) pixels.
    /// A drag across the full viewport height turns the globe once.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_azimuth += TAU * dx / height * self.rotate_speed;
        self.pending_polar += TAU * dy / height * self.rotate_speed;
    }

    /// Queue a zoom; positive steps move the camera closer
    pub fn zoom(&mut self, wheel_steps: f32) {
        self.pending_scale *= ZOOM_BASE.powf(wheel_steps * self.zoom_speed);
    }

    /// Remaining queued rotation as (azimuth, polar)
    pub fn pending(&self) -> (f32, f32) {
        (self.pending_azimuth, self.pending_polar)
    }

    pub fn is_settled(&self) -> bool {
        self.pending_azimuth.abs() < SETTLED
            && self.pending_polar.abs() < SETTLED
            && (self.pending_scale - 1.0).abs() < SETTLED
    }

    /// Move the camera by this frame's share of the queued motion
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        // Dragging right moves the camera left around the target
        spherical.theta -= self.pending_azimuth * share;
        spherical.phi -= self.pending_polar * share;
        spherical.phi = spherical.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        spherical.radius =
            (spherical.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            self.pending_azimuth *= 1.0 - self.damping_factor;
            self.pending_polar *= 1.0 - self.damping_factor;
        } else {
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
        }
        self.pending_scale = 1.0;
    }
}
