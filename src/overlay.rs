//! egui overlay: the loading screen and the FPS label.

use egui::{Color32, RichText};
use winit::window::Window;

use crate::core::Presentation;

/// What the overlay shows this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStatus {
    pub presentation: Presentation,
    pub percent: f32,
    pub fps: Option<f32>,
}

pub fn loading_label(percent: f32) -> String {
    format!("Loading {:.0}%", percent.clamp(0.0, 100.0).floor())
}

fn alpha_byte(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    show_fps: bool,
}

impl Overlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        show_fps: bool,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            state,
            renderer,
            show_fps,
        }
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    fn build_ui(ctx: &egui::Context, status: &OverlayStatus, show_fps: bool) {
        let screen_opacity = status.presentation.loading_screen_opacity;
        if screen_opacity > 0.0 {
            let alpha = alpha_byte(screen_opacity);
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE.fill(Color32::from_black_alpha(alpha)))
                .show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(loading_label(status.percent))
                                .size(28.0)
                                .color(Color32::from_white_alpha(alpha)),
                        );
                    });
                });
        }

        if let (true, Some(fps)) = (show_fps, status.fps) {
            egui::Area::new(egui::Id::new("fps"))
                .fixed_pos(egui::pos2(10.0, 10.0))
                .show(ctx, |ui| {
                    ui.label(
                        RichText::new(format!("{:.0} FPS", fps))
                            .monospace()
                            .color(Color32::from_rgb(74, 158, 255)),
                    );
                });
        }
    }

    /// Draw the overlay on top of `view`. Returns command buffers egui
    /// needs submitted before `encoder`.
    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        status: &OverlayStatus,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);
        let show_fps = self.show_fps;
        let full_output = self
            .ctx
            .run(raw_input, |ctx| Self::build_ui(ctx, status, show_fps));

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        let user_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        user_buffers
    }
}
