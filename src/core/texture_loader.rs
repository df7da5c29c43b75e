//! Background texture decoding.
//!
//! Each requested image is decoded on its own worker thread; results come
//! back over a channel and are drained from the render loop without
//! blocking it.

use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{FutureExt, StreamExt};
use image::imageops::FilterType;

use crate::core::loading::{LoadEvent, LoadingManager};
use crate::error::{GlobeError, Result};
use crate::material::TextureSlot;

#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    pub slot: TextureSlot,
    pub path: PathBuf,
}

impl TextureRequest {
    pub fn new(slot: TextureSlot, path: impl Into<PathBuf>) -> Self {
        Self {
            slot,
            path: path.into(),
        }
    }
}

/// RGBA8 pixels ready for upload
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub slot: TextureSlot,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum TextureEvent {
    Ready(DecodedTexture),
    Load(LoadEvent),
}

struct WorkerResult {
    path: PathBuf,
    texture: Result<DecodedTexture>,
}

/// Decode an image file into RGBA8, shrinking it to fit `max_dimension`
pub fn decode_texture(slot: TextureSlot, path: &Path, max_dimension: u32) -> Result<DecodedTexture> {
    let image = image::open(path).map_err(|source| GlobeError::TextureDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let image = if image.width() > max_dimension || image.height() > max_dimension {
        log::info!(
            "downscaling {} from {}x{} to fit {}",
            path.display(),
            image.width(),
            image.height(),
            max_dimension
        );
        image.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        image
    };

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedTexture {
        slot,
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

pub struct TextureLoader {
    receiver: UnboundedReceiver<(TextureSlot, WorkerResult)>,
    manager: LoadingManager,
}

impl TextureLoader {
    /// Start decoding every request in the background
    pub fn spawn(requests: Vec<TextureRequest>, max_dimension: u32) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        let manager = LoadingManager::new(requests.len());

        for request in requests {
            Self::spawn_worker(request, max_dimension, sender.clone());
        }

        Self { receiver, manager }
    }

    fn spawn_worker(
        request: TextureRequest,
        max_dimension: u32,
        sender: UnboundedSender<(TextureSlot, WorkerResult)>,
    ) {
        let name = format!("texture-{}", request.slot.label().replace(' ', "-"));
        let (slot, path) = (request.slot, request.path.clone());
        let fallback_sender = sender.clone();

        let spawned = thread::Builder::new().name(name).spawn(move || {
            let texture = decode_texture(request.slot, &request.path, max_dimension);
            let result = WorkerResult {
                path: request.path,
                texture,
            };
            // The receiver is gone only if the viewer already shut down
            let _ = sender.unbounded_send((request.slot, result));
        });

        // Resolve the item as failed so the batch can still complete
        if let Err(e) = spawned {
            log::error!("failed to spawn texture worker for {}: {}", path.display(), e);
            let texture = Err(GlobeError::TextureDecode {
                path: path.clone(),
                source: image::ImageError::IoError(e),
            });
            let _ = fallback_sender.unbounded_send((slot, WorkerResult { path, texture }));
        }
    }

    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }

    pub fn percent(&self) -> f32 {
        self.manager.percent()
    }

    pub fn is_complete(&self) -> bool {
        self.manager.is_complete()
    }

    /// Drain finished decodes without blocking
    pub fn poll(&mut self) -> Vec<TextureEvent> {
        let mut events = Vec::new();

        loop {
            let next = self.receiver.next().now_or_never();
            match next {
                Some(Some((slot, result))) => events.extend(self.resolve(slot, result)),
                _ => break,
            }
        }

        if let Some(done) = self.manager.take_completion() {
            events.push(TextureEvent::Load(done));
        }
        events
    }

    /// Wait for at least one decode (or for every worker to exit)
    pub fn poll_blocking(&mut self) -> Vec<TextureEvent> {
        let mut events = Vec::new();

        if !self.manager.is_complete() {
            let next = futures::executor::block_on(self.receiver.next());
            if let Some((slot, result)) = next {
                events.extend(self.resolve(slot, result));
            }
        }

        events.extend(self.poll());
        events
    }

    fn resolve(&mut self, slot: TextureSlot, result: WorkerResult) -> Vec<TextureEvent> {
        let url = format!("{} [{}]", result.path.display(), slot.label());
        let mut events = Vec::new();

        let ok = match result.texture {
            Ok(texture) => {
                log::info!(
                    "loaded {} ({}x{}) from {}",
                    slot.label(),
                    texture.width,
                    texture.height,
                    url
                );
                events.push(TextureEvent::Ready(texture));
                true
            }
            Err(e) => {
                log::warn!("{}; keeping fallback {}", e, slot.label());
                false
            }
        };

        events.extend(
            self.manager
                .item_end(&url, ok)
                .into_iter()
                .map(TextureEvent::Load),
        );
        events
    }
}
