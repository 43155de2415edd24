//! File system watcher

mod handler;

pub use handler::EventHandler;

use anyhow::Result;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::backend::{ImportBackend, Preprocessor, ProcessOutcome};

/// Watches asset folders and preprocesses files as they appear
pub struct Watcher<B> {
    watcher: RecommendedWatcher,
    preprocessor: Preprocessor<B>,
    rx: mpsc::Receiver<Result<notify::Event, notify::Error>>,
    event_handler: EventHandler,
    files_processed: u64,
}

impl<B: ImportBackend> Watcher<B> {
    /// Create a new watcher with the given polling interval and debounce duration
    pub fn new(
        preprocessor: Preprocessor<B>,
        polling_interval_secs: u64,
        debounce_seconds: u64,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let watcher = RecommendedWatcher::new(
            move |res| {
                if let Err(e) = tx.send(res) {
                    error!("Failed to send watch event: {}", e);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(polling_interval_secs)),
        )?;

        Ok(Self {
            watcher,
            preprocessor,
            rx,
            event_handler: EventHandler::new(debounce_seconds),
            files_processed: 0,
        })
    }

    /// Start watching a directory
    pub fn watch(&mut self, path: &Path, recursive: bool) -> Result<()> {
        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        self.watcher.watch(path, mode)?;
        info!("Watching: {} (recursive: {})", path.display(), recursive);
        Ok(())
    }

    /// Drain pending events (non-blocking)
    pub fn poll(&self) -> Vec<notify::Event> {
        let mut events = Vec::new();

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(event) => events.push(event),
                Err(e) => error!("Watch error: {}", e),
            }
        }

        events
    }

    /// Preprocess the files created by `events` (with debouncing)
    pub fn process_polled_events(&mut self, events: Vec<notify::Event>) -> usize {
        let mut processed = 0;

        for event in events {
            // Assets created in, or moved into, a watched folder
            if !is_arrival(&event.kind) {
                debug!("Ignoring event kind: {:?}", event.kind);
                continue;
            }

            for path in self.event_handler.should_process(&event) {
                if !path.is_file() {
                    continue;
                }
                match self.preprocessor.process(&path) {
                    Ok(ProcessOutcome::Resolved { applied: true, .. }) => processed += 1,
                    Ok(_) => {}
                    Err(e) => error!("Preprocessing failed for {}: {:#}", path.display(), e),
                }
            }
        }

        self.event_handler.cleanup();
        self.files_processed += processed as u64;
        processed
    }

    /// Poll and process in one step
    pub fn process_events(&mut self) -> usize {
        let events = self.poll();
        self.process_polled_events(events)
    }

    /// Total number of assets that received settings
    pub fn files_processed(&self) -> u64 {
        self.files_processed
    }
}

fn is_arrival(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Both))
    )
}

/// Collect the files under `path`, descending into subdirectories when
/// `recursive` is set. Results are sorted for stable output.
pub fn collect_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    walk(path, recursive, &mut result)?;
    result.sort();
    Ok(result)
}

fn walk(path: &Path, recursive: bool, result: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let ft = entry.file_type()?;
        if ft.is_symlink() {
            // Skip symlinks to avoid potential loops
            continue;
        }
        if ft.is_dir() {
            if recursive {
                walk(&entry.path(), recursive, result)?;
            }
        } else {
            result.push(entry.path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SidecarBackend;
    use crate::rules::{Rule, RuleSet};
    use crate::settings::{ImportSettings, Override, TextureSettings};

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("UI")).unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("UI").join("a.png"), b"").unwrap();

        let flat = collect_files(dir.path(), false).unwrap();
        assert_eq!(flat, vec![dir.path().join("b.png")]);

        let all = collect_files(dir.path(), true).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&dir.path().join("UI").join("a.png")));
    }

    #[test]
    fn test_process_create_events_only() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("icon.png");
        std::fs::write(&asset, b"").unwrap();

        let settings = ImportSettings {
            texture: Override::enabled(TextureSettings::default()),
            ..Default::default()
        };
        let rules = RuleSet::new(vec![Rule::new("Everything", Vec::new(), settings)]);
        let preprocessor = Preprocessor::new(rules, SidecarBackend::new());
        let mut watcher = Watcher::new(preprocessor, 1, 1).unwrap();

        let modify = notify::Event {
            kind: EventKind::Modify(ModifyKind::Any),
            paths: vec![asset.clone()],
            attrs: Default::default(),
        };
        assert_eq!(watcher.process_polled_events(vec![modify]), 0);

        let create = notify::Event {
            kind: EventKind::Create(notify::event::CreateKind::File),
            paths: vec![asset.clone()],
            attrs: Default::default(),
        };
        assert_eq!(watcher.process_polled_events(vec![create]), 1);
        assert_eq!(watcher.files_processed(), 1);
        assert!(SidecarBackend::sidecar_path(&asset).exists());
    }

    #[test]
    fn test_process_assets_moved_in() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("icon.png");
        std::fs::write(&asset, b"").unwrap();

        let settings = ImportSettings {
            texture: Override::enabled(TextureSettings::default()),
            ..Default::default()
        };
        let rules = RuleSet::new(vec![Rule::new("Everything", Vec::new(), settings)]);
        let preprocessor = Preprocessor::new(rules, SidecarBackend::new());
        let mut watcher = Watcher::new(preprocessor, 1, 1).unwrap();

        let rename_from = notify::Event {
            kind: EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            paths: vec![asset.clone()],
            attrs: Default::default(),
        };
        assert_eq!(watcher.process_polled_events(vec![rename_from]), 0);

        let moved_in = notify::Event {
            kind: EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            paths: vec![asset.clone()],
            attrs: Default::default(),
        };
        assert_eq!(watcher.process_polled_events(vec![moved_in]), 1);
        assert!(SidecarBackend::sidecar_path(&asset).exists());
    }

    #[test]
    fn test_arrival_kinds() {
        assert!(is_arrival(&EventKind::Create(notify::event::CreateKind::File)));
        assert!(is_arrival(&EventKind::Modify(ModifyKind::Name(
            RenameMode::Both
        ))));
        assert!(!is_arrival(&EventKind::Modify(ModifyKind::Name(
            RenameMode::From
        ))));
        assert!(!is_arrival(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_arrival(&EventKind::Remove(notify::event::RemoveKind::File)));
    }
}
