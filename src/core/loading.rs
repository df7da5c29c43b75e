use std::collections::HashSet;

/// Notifications emitted while a batch of assets resolves
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Progress {
        url: String,
        loaded: usize,
        total: usize,
    },
    Error {
        url: String,
    },
    /// Every requested item has resolved, successfully or not
    Completed,
}

/// Tracks a fixed batch of requested assets.
///
/// Failures count as resolved so the batch always completes, and
/// `Completed` is emitted exactly once.
#[derive(Debug, Clone)]
pub struct LoadingManager {
    total: usize,
    resolved: HashSet<String>,
    failed: usize,
    completed: bool,
}

impl LoadingManager {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            resolved: HashSet::new(),
            failed: 0,
            completed: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.resolved.len()
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.loaded() >= self.total
    }

    /// Percentage of resolved items, 100 for an empty batch
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.loaded().min(self.total) as f32 / self.total as f32) * 100.0
    }

    /// Record that `url` finished. Repeats and items past the total are ignored.
    pub fn item_end(&mut self, url: &str, ok: bool) -> Vec<LoadEvent> {
        let mut events = Vec::new();

        if self.loaded() >= self.total || !self.resolved.insert(url.to_string()) {
            log::debug!("ignoring duplicate or surplus load notification for {}", url);
            return events;
        }

        if !ok {
            self.failed += 1;
            events.push(LoadEvent::Error {
                url: url.to_string(),
            });
        }

        events.push(LoadEvent::Progress {
            url: url.to_string(),
            loaded: self.loaded(),
            total: self.total,
        });

        events.extend(self.take_completion());
        events
    }

    /// `Completed` the first time the batch is found complete
    pub fn take_completion(&mut self) -> Option<LoadEvent> {
        if self.completed || !self.is_complete() {
            return None;
        }
        self.completed = true;
        Some(LoadEvent::Completed)
    }
}
