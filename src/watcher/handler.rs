//! Event handler for file system events

use indexmap::IndexMap;
use notify::Event;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Maximum number of entries in the debounce map before forcing a cleanup
const MAX_DEBOUNCE_ENTRIES: usize = 10_000;

/// Debounces file system events so an asset is preprocessed once per burst
pub struct EventHandler {
    /// Recent events by path (IndexMap preserves insertion order for fair cleanup)
    recent: IndexMap<PathBuf, Instant>,

    debounce: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given debounce duration
    pub fn new(debounce_seconds: u64) -> Self {
        Self {
            recent: IndexMap::new(),
            debounce: Duration::from_secs(debounce_seconds),
        }
    }

    /// Paths of `event` that were not seen within the debounce window
    pub fn should_process(&mut self, event: &Event) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut paths_to_process = Vec::new();

        for path in &event.paths {
            let should_process = self
                .recent
                .get(path)
                .map(|&last| now.duration_since(last) > self.debounce)
                .unwrap_or(true);

            if should_process {
                self.recent.insert(path.clone(), now);
                paths_to_process.push(path.clone());
            }
        }

        if self.recent.len() > MAX_DEBOUNCE_ENTRIES {
            self.cleanup();
        }

        paths_to_process
    }

    /// Drop entries older than ten debounce periods
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        let threshold = self.debounce * 10;

        self.recent
            .retain(|_, &mut last| now.duration_since(last) < threshold);
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}
