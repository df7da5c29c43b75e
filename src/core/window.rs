use serde::{Deserialize, Serialize};

/// Window dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for WindowDimensions {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// How a resize changes the camera's aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Aspect follows the window's current size
    #[default]
    Track,
    /// Aspect stays at the start-up size; the image stretches with the window
    Frozen,
}

/// Surface size plus the aspect ratio the camera projects with.
///
/// The surface always follows the window so presentation never stalls on
/// a size mismatch; only the projection honours the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    initial: WindowDimensions,
    current: WindowDimensions,
    policy: ResizePolicy,
}

impl Viewport {
    pub fn new(initial: WindowDimensions, policy: ResizePolicy) -> Self {
        Self {
            initial,
            current: initial,
            policy,
        }
    }

    /// Size the surface is configured with
    pub fn dimensions(&self) -> WindowDimensions {
        self.current
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Aspect ratio for the camera projection
    pub fn aspect(&self) -> f32 {
        match self.policy {
            ResizePolicy::Track => self.current.aspect(),
            ResizePolicy::Frozen => self.initial.aspect(),
        }
    }

    /// Apply a window resize. Returns the size to configure the surface
    /// with, or `None` when nothing needs reconfiguring.
    pub fn on_resize(&mut self, window: WindowDimensions) -> Option<WindowDimensions> {
        if window.is_empty() {
            // Minimised; keep the last usable size
            return None;
        }
        if window == self.current {
            return None;
        }
        self.current = window;
        Some(window)
    }
}
