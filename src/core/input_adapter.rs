use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pixels of trackpad scroll treated as one wheel notch
const PIXELS_PER_LINE: f32 = 50.0;

/// Adapter that turns winit pointer events into orbit input
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    dragging: bool,
    /// Current cursor position (relative to window)
    position: Option<(f32, f32)>,
    /// Drag movement since last reset
    drag_delta: (f32, f32),
    /// Wheel notches since last reset, positive = towards the user
    scroll: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit event; returns true if it was pointer input
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.set_dragging(*state == ElementState::Pressed);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
                self.dragging = false;
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.scroll_by(notches);
                true
            }
            _ => false,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cursor moved to (x, y); only movement while dragging accumulates
    pub fn move_to(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.position {
            if self.dragging {
                self.drag_delta.0 += x - old_x;
                self.drag_delta.1 += y - old_y;
            }
        }
        self.position = Some((x, y));
    }

    pub fn scroll_by(&mut self, notches: f32) {
        self.scroll += notches;
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }

    /// Take accumulated drag and scroll, resetting both
    pub fn take(&mut self) -> ((f32, f32), f32) {
        let out = (self.drag_delta, self.scroll);
        self.drag_delta = (0.0, 0.0);
        self.scroll = 0.0;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 10.0);
        pointer.move_to(30.0, 20.0);
        assert_eq!(pointer.take(), ((0.0, 0.0), 0.0));
        assert_eq!(pointer.position(), Some((30.0, 20.0)));
    }

    #[test]
    fn test_drag_accumulates_until_taken() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 10.0);
        pointer.set_dragging(true);
        pointer.move_to(15.0, 12.0);
        pointer.move_to(20.0, 8.0);
        pointer.scroll_by(-1.0);

        assert_eq!(pointer.take(), ((10.0, -2.0), -1.0));
        assert_eq!(pointer.take(), ((0.0, 0.0), 0.0));
    }

    #[test]
    fn test_release_stops_drag() {
        let mut pointer = PointerState::new();
        pointer.move_to(0.0, 0.0);
        pointer.set_dragging(true);
        pointer.move_to(5.0, 0.0);
        pointer.set_dragging(false);
        pointer.move_to(50.0, 0.0);
        assert_eq!(pointer.take().0, (5.0, 0.0));
    }
}
