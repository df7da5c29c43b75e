/// Opacities for the loading screen and the globe canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub loading_screen_opacity: f32,
    pub canvas_opacity: f32,
}

impl Presentation {
    pub const REVEALED: Presentation = Presentation {
        loading_screen_opacity: 0.0,
        canvas_opacity: 1.0,
    };

    pub const HIDDEN: Presentation = Presentation {
        loading_screen_opacity: 1.0,
        canvas_opacity: 0.0,
    };

    /// Whether the scene needs drawing at all
    pub fn canvas_visible(&self) -> bool {
        self.canvas_opacity > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateState {
    /// Textures still loading, canvas hidden
    Waiting,
    Fading { elapsed: f32 },
    Revealed,
}

/// Cross-fade from the loading screen to the globe once loading completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingGate {
    state: GateState,
    duration: f32,
}

impl LoadingGate {
    /// Gate that waits for `begin_fade`, then fades over `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            state: GateState::Waiting,
            duration: duration.max(0.0),
        }
    }

    /// No loading screen: the canvas shows immediately
    pub fn open() -> Self {
        Self {
            state: GateState::Revealed,
            duration: 0.0,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == GateState::Revealed
    }

    /// Start the cross-fade; ignored unless still waiting
    pub fn begin_fade(&mut self) {
        if self.state != GateState::Waiting {
            return;
        }
        self.state = if self.duration == 0.0 {
            GateState::Revealed
        } else {
            GateState::Fading { elapsed: 0.0 }
        };
    }

    /// Advance the fade; returns true on the tick that completes it
    pub fn tick(&mut self, delta: f32) -> bool {
        if let GateState::Fading { elapsed } = self.state {
            let elapsed = elapsed + delta.max(0.0);
            if elapsed >= self.duration {
                self.state = GateState::Revealed;
                return true;
            }
            self.state = GateState::Fading { elapsed };
        }
        false
    }

    /// Fade progress in [0, 1]
    pub fn progress(&self) -> f32 {
        match self.state {
            GateState::Waiting => 0.0,
            GateState::Fading { elapsed } => (elapsed / self.duration).min(1.0),
            GateState::Revealed => 1.0,
        }
    }

    pub fn presentation(&self) -> Presentation {
        let t = self.progress();
        Presentation {
            loading_screen_opacity: 1.0 - t,
            canvas_opacity: t,
        }
    }
}
