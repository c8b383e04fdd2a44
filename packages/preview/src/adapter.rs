use crate::PreviewFrame;
use pagecraft_blocks::RenderMode;
use pagecraft_compiler::{CompileError, Composer, ComposedPage};
use pagecraft_model::Project;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreviewError {
    #[error("Preview task has stopped")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Quiet period after the last change before a render starts
    pub debounce: Duration,
    /// Page shown first
    pub page_id: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
            page_id: "home".to_string(),
        }
    }
}

#[derive(Debug)]
enum PreviewMsg {
    Changed(Arc<Project>),
    ShowPage(String),
    Shutdown,
}

/// Control side of a running preview.
#[derive(Debug)]
pub struct PreviewHandle {
    tx: mpsc::UnboundedSender<PreviewMsg>,
    task: JoinHandle<()>,
}

impl PreviewHandle {
    /// Hand the preview a new snapshot. Restarts the debounce timer.
    pub fn document_changed(&self, project: Arc<Project>) -> Result<(), PreviewError> {
        self.send(PreviewMsg::Changed(project))
    }

    /// Switch the previewed page. Renders after the debounce period.
    pub fn show_page(&self, page_id: impl Into<String>) -> Result<(), PreviewError> {
        self.send(PreviewMsg::ShowPage(page_id.into()))
    }

    /// Stop the preview task and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.tx.send(PreviewMsg::Shutdown);
        if let Err(err) = self.task.await {
            warn!(error = %err, "Preview task ended abnormally");
        }
    }

    fn send(&self, msg: PreviewMsg) -> Result<(), PreviewError> {
        self.tx.send(msg).map_err(|_| PreviewError::Closed)
    }
}

pub struct PreviewAdapter;

impl PreviewAdapter {
    /// Start the preview task on the current runtime.
    ///
    /// Frames are published on the returned watch channel; it holds `None`
    /// until the first render completes.
    pub fn spawn(composer: Composer, config: PreviewConfig) -> (PreviewHandle, watch::Receiver<Option<PreviewFrame>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = watch::channel(None);

        let task = tokio::spawn(run(composer, config, rx, frames_tx));
        (PreviewHandle { tx, task }, frames_rx)
    }
}

/// A composition running on the blocking pool.
struct InFlight {
    generation: u64,
    task: JoinHandle<Result<ComposedPage, CompileError>>,
}

async fn run(
    composer: Composer,
    config: PreviewConfig,
    mut rx: mpsc::UnboundedReceiver<PreviewMsg>,
    frames: watch::Sender<Option<PreviewFrame>>,
) {
    let mut project: Option<Arc<Project>> = None;
    let mut page_id = config.page_id;
    let mut generation: u64 = 0;
    let mut deadline: Option<Instant> = None;
    let mut in_flight: Option<InFlight> = None;

    info!(debounce_ms = config.debounce.as_millis() as u64, "Preview started");

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Some(PreviewMsg::Changed(next)) => project = Some(next),
                    Some(PreviewMsg::ShowPage(next)) => page_id = next,
                    Some(PreviewMsg::Shutdown) | None => break,
                }

                // Every change supersedes whatever is pending or running.
                generation += 1;
                deadline = Some(Instant::now() + config.debounce);
                if let Some(stale) = in_flight.take() {
                    debug!(generation = stale.generation, "Superseded in-flight render");
                    stale.task.abort();
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                let Some(snapshot) = project.clone() else {
                    continue;
                };

                let composer = composer.clone();
                let page = page_id.clone();
                debug!(generation, page = %page, "Rendering preview");
                let task = tokio::task::spawn_blocking(move || {
                    composer.compose_page(&snapshot, &page, RenderMode::Preview)
                });
                in_flight = Some(InFlight { generation, task });
            }

            result = join_in_flight(&mut in_flight), if in_flight.is_some() => {
                let finished = in_flight.take().map(|f| f.generation).unwrap_or_default();
                publish(&frames, finished, generation, result);
            }
        }
    }

    if let Some(stale) = in_flight.take() {
        stale.task.abort();
    }
    info!("Preview stopped");
}

async fn join_in_flight(
    in_flight: &mut Option<InFlight>,
) -> Result<Result<ComposedPage, CompileError>, JoinError> {
    match in_flight.as_mut() {
        Some(flight) => (&mut flight.task).await,
        None => std::future::pending().await,
    }
}

fn publish(
    frames: &watch::Sender<Option<PreviewFrame>>,
    finished: u64,
    latest: u64,
    result: Result<Result<ComposedPage, CompileError>, JoinError>,
) {
    if finished != latest {
        debug!(finished, latest, "Dropped stale preview render");
        return;
    }

    match result {
        Ok(Ok(page)) => {
            debug!(generation = finished, page = %page.page_id, diagnostics = page.diagnostics.len(), "Published preview frame");
            frames.send_replace(Some(PreviewFrame::from_page(finished, page)));
        }
        Ok(Err(err)) => warn!(error = %err, "Preview render failed"),
        Err(err) if err.is_cancelled() => {}
        Err(err) => warn!(error = %err, "Preview render task failed"),
    }
}
