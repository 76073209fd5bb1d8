use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use indexwatch_logging::{dash_debug, dash_info};
use tokio_util::sync::CancellationToken;

use crate::report::save_report;
use crate::{ApiError, ClientEvent, DashboardApi, UploadResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    ListUrls,
    FetchStatus,
    TriggerCheck,
    UploadCsv { path: PathBuf },
    DownloadReport { dest_dir: PathBuf, unix_ms: i64 },
}

/// Runs API calls on a background tokio runtime.
///
/// Commands are accepted from the UI thread; completions are polled back with
/// [`ClientHandle::try_recv`]. Dropping the handle cancels everything still in
/// flight and their results are never delivered.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
    cancel: CancellationToken,
}

impl ClientHandle {
    pub fn new(api: Arc<dyn DashboardApi>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("indexwatch-client")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                let cancel = worker_cancel.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            dash_debug!("dropping in-flight {:?}", command);
                        }
                        event = handle_command(api.as_ref(), command.clone()) => {
                            if !cancel.is_cancelled() {
                                let _ = event_tx.send(event);
                            }
                        }
                    }
                });
            }
            dash_info!("client command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            cancel,
        })
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Abandons all in-flight requests. Later commands are dropped too.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(api: &dyn DashboardApi, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::ListUrls => ClientEvent::UrlsListed(api.list_urls().await),
        ClientCommand::FetchStatus => ClientEvent::StatusFetched(api.fetch_status().await),
        ClientCommand::TriggerCheck => ClientEvent::CheckCompleted(api.trigger_check().await),
        ClientCommand::UploadCsv { path } => ClientEvent::UploadCompleted(upload(api, &path).await),
        ClientCommand::DownloadReport { dest_dir, unix_ms } => {
            ClientEvent::ReportSaved(download(api, &dest_dir, unix_ms).await)
        }
    }
}

async fn upload(api: &dyn DashboardApi, path: &Path) -> Result<UploadResponse, ApiError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|err| ApiError::Io(format!("{}: {err}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    api.upload_csv(&file_name, content).await
}

async fn download(
    api: &dyn DashboardApi,
    dest_dir: &Path,
    unix_ms: i64,
) -> Result<PathBuf, ApiError> {
    let payload = api.download_report().await?;
    let saved = save_report(dest_dir, unix_ms, &payload)
        .map_err(|err| ApiError::Io(err.to_string()))?;
    dash_info!("report saved to {:?}", saved);
    Ok(saved)
}
