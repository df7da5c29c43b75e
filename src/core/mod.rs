pub mod fade;
pub mod frame;
pub mod gpu_context;
pub mod input_adapter;
pub mod loading;
pub mod spin;
pub mod texture_loader;
pub mod window;

pub use fade::{GateState, LoadingGate, Presentation};
pub use frame::{FpsMeter, FrameClock, FrameInfo, RunLimit};
pub use gpu_context::GpuContext;
pub use input_adapter::PointerState;
pub use loading::{LoadEvent, LoadingManager};
pub use spin::Spin;
pub use texture_loader::{decode_texture, DecodedTexture, TextureEvent, TextureLoader, TextureRequest};
pub use window::{ResizePolicy, Viewport, WindowDimensions};
