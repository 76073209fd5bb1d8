use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use indexwatch_client::{ApiError, ClientCommand, ClientEvent, ClientHandle, DashboardApi};
use indexwatch_core::{
    CheckOutcome, Effect, Msg, RequestFailure, StatsSummary, UploadCandidate, UploadOutcome,
    UrlRecord,
};
use indexwatch_logging::{dash_debug, dash_info, dash_warn};

/// Executes core effects and turns client completions back into messages.
pub struct EffectRunner {
    client: ClientHandle,
    download_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        download_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> std::io::Result<Self> {
        Ok(Self {
            client: ClientHandle::new(api)?,
            download_dir,
            msg_tx,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchUrls => self.client.send(ClientCommand::ListUrls),
                Effect::FetchStats => self.client.send(ClientCommand::FetchStatus),
                Effect::RunCheck => {
                    dash_info!("manual check requested");
                    self.client.send(ClientCommand::TriggerCheck);
                }
                Effect::InspectUploadFile { path } => {
                    let _ = self.msg_tx.send(inspect_upload(&path));
                }
                Effect::UploadCsv { path } => {
                    dash_info!("uploading {:?}", path);
                    self.client.send(ClientCommand::UploadCsv { path });
                }
                Effect::DownloadReport => self.client.send(ClientCommand::DownloadReport {
                    dest_dir: self.download_dir.clone(),
                    unix_ms: Utc::now().timestamp_millis(),
                }),
                Effect::ScheduleMessageClear { message_id, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        // The UI may be gone by now.
                        let _ = msg_tx.send(Msg::MessageExpired { message_id });
                    });
                }
            }
        }
    }

    /// Collects every completion that arrived since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.client.try_recv())
            .map(map_event)
            .collect()
    }

    pub fn shutdown(&self) {
        self.client.shutdown();
    }
}

fn inspect_upload(path: &Path) -> Msg {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Msg::UploadChosen(UploadCandidate {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: meta.len(),
        }),
        Ok(_) => Msg::UploadFileUnreadable {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        },
        Err(err) => Msg::UploadFileUnreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::UrlsListed(result) => Msg::UrlsFetched(
            result
                .map(|urls| urls.into_iter().map(map_record).collect())
                .map_err(|err| failure("list_urls", err)),
        ),
        ClientEvent::StatusFetched(result) => Msg::StatsFetched(
            result.map(map_stats).map_err(|err| {
                dash_warn!("stats unavailable, panel stays hidden: {}", err);
                failure("fetch_status", err)
            }),
        ),
        ClientEvent::CheckCompleted(result) => Msg::CheckFinished(
            result
                .map(|response| CheckOutcome {
                    urls: response.data.into_iter().map(map_record).collect(),
                    timestamp: response.timestamp,
                })
                .map_err(|err| failure("trigger_check", err)),
        ),
        ClientEvent::UploadCompleted(result) => Msg::UploadFinished(
            result
                .map(|response| UploadOutcome {
                    urls: response.data.into_iter().map(map_record).collect(),
                    message: response.message,
                })
                .map_err(|err| failure("upload_csv", err)),
        ),
        ClientEvent::ReportSaved(result) => {
            Msg::DownloadFinished(result.map_err(|err| failure("download_report", err)))
        }
    }
}

fn failure(operation: &str, err: ApiError) -> RequestFailure {
    dash_debug!("{} failed: {:?}", operation, err);
    let base = RequestFailure::new(err.to_string());
    match err.server_message() {
        Some(message) => base.with_server_message(message),
        None => base,
    }
}

fn map_record(record: indexwatch_client::UrlRecord) -> UrlRecord {
    UrlRecord {
        url: record.url,
        status: record.status,
        last_checked: record.last_checked,
        notes: record.notes,
    }
}

fn map_stats(stats: indexwatch_client::StatsSummary) -> StatsSummary {
    StatsSummary {
        total: stats.total,
        indexed: stats.indexed,
        not_indexed: stats.not_indexed,
        invalid: stats.invalid,
        pending: stats.pending,
        last_check: stats.last_check,
    }
}
