use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Cannot watch {0}: it has no parent directory")]
    NoParent(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Reports modifications of a single file.
///
/// Watches the parent directory so editors that save by replacing the
/// file are still seen.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: UnboundedReceiver<Event>,
    file: PathBuf,
}

impl FileWatcher {
    pub fn new(file: &Path) -> WatcherResult<Self> {
        let (tx, rx) = unbounded_channel();
        let parent = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.exists() {
            return Err(WatcherError::NoParent(file.to_path_buf()));
        }

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            Config::default(),
        )?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file: file.to_path_buf(),
        })
    }

    /// Wait for the next change touching the watched file.
    /// Returns `None` once the watcher is gone.
    pub async fn changed(&mut self) -> Option<()> {
        loop {
            let event = self.receiver.recv().await?;
            if touches(&event, &self.file) {
                return Some(());
            }
        }
    }
}

fn touches(event: &Event, file: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_)
    );
    relevant && event.paths.iter().any(|p| p.file_name() == file.file_name())
}
