use std::path::Path;

use crate::upload::{has_csv_extension, validate_upload, UploadRejection};
use crate::{AppState, Effect, MessageKind, Msg};

/// User-facing texts, kept together so the shell and tests agree on them.
pub mod messages {
    pub const FETCH_URLS_FAILED: &str = "Error fetching URLs";
    pub const CHECK_STARTED: &str = "Check started... This may take a few moments.";
    pub const CHECK_FAILED: &str = "Error during check. Please try again.";
    pub const UPLOAD_FAILED: &str = "Error uploading file";
    pub const UPLOAD_DONE: &str = "File uploaded successfully";
    pub const DOWNLOAD_STARTED: &str = "Downloading report...";
    pub const DOWNLOAD_DONE: &str = "Report downloaded successfully";
    pub const DOWNLOAD_FAILED: &str = "Error downloading report";

    pub fn check_completed(timestamp: &str) -> String {
        format!("Check completed at {timestamp}")
    }
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            state.set_loading(true);
            vec![Effect::FetchUrls, Effect::FetchStats]
        }
        Msg::UrlsFetched(result) => {
            state.set_loading(false);
            match result {
                Ok(urls) => {
                    state.replace_urls(urls);
                    Vec::new()
                }
                Err(_) => vec![state.show_message(messages::FETCH_URLS_FAILED, MessageKind::Error)],
            }
        }
        Msg::StatsFetched(result) => {
            // A failed stats fetch leaves the panel as it was.
            if let Ok(stats) = result {
                state.set_stats(stats);
            }
            Vec::new()
        }
        Msg::CheckClicked => {
            if !state.can_check() {
                return (state, Vec::new());
            }
            state.set_checking(true);
            vec![
                state.show_message(messages::CHECK_STARTED, MessageKind::Info),
                Effect::RunCheck,
            ]
        }
        Msg::CheckFinished(result) => {
            state.set_checking(false);
            match result {
                Ok(outcome) => {
                    state.replace_urls(outcome.urls);
                    vec![
                        state.show_message(
                            messages::check_completed(&outcome.timestamp),
                            MessageKind::Success,
                        ),
                        Effect::FetchStats,
                    ]
                }
                Err(_) => vec![state.show_message(messages::CHECK_FAILED, MessageKind::Error)],
            }
        }
        Msg::UploadPromptOpened => {
            if state.can_upload() {
                state.open_upload_prompt();
            }
            Vec::new()
        }
        Msg::UploadInputChanged(text) => {
            state.set_upload_input(text);
            Vec::new()
        }
        Msg::UploadPromptCancelled => {
            state.take_upload_input();
            Vec::new()
        }
        Msg::UploadSubmitted => {
            let Some(raw) = state.take_upload_input() else {
                return (state, Vec::new());
            };
            let path = raw.trim();
            if path.is_empty() || !state.can_upload() {
                return (state, Vec::new());
            }
            let file_name = Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !has_csv_extension(&file_name) {
                vec![state.show_message(UploadRejection::NotCsv.message(), MessageKind::Error)]
            } else {
                vec![Effect::InspectUploadFile { path: path.into() }]
            }
        }
        Msg::UploadChosen(candidate) => {
            if !state.can_upload() {
                return (state, Vec::new());
            }
            match validate_upload(&candidate.file_name, candidate.size_bytes) {
                Err(rejection) => vec![state.show_message(rejection.message(), MessageKind::Error)],
                Ok(()) => {
                    state.set_uploading(true);
                    vec![Effect::UploadCsv {
                        path: candidate.path,
                    }]
                }
            }
        }
        Msg::UploadFileUnreadable { path, reason } => {
            vec![state.show_message(
                format!("Could not read {}: {reason}", path.display()),
                MessageKind::Error,
            )]
        }
        Msg::UploadFinished(result) => {
            state.set_uploading(false);
            match result {
                Ok(outcome) => {
                    state.replace_urls(outcome.urls);
                    let text = if outcome.message.trim().is_empty() {
                        messages::UPLOAD_DONE.to_string()
                    } else {
                        outcome.message
                    };
                    vec![
                        state.show_message(text, MessageKind::Success),
                        Effect::FetchStats,
                    ]
                }
                Err(failure) => {
                    let text = failure
                        .server_message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| messages::UPLOAD_FAILED.to_string());
                    vec![state.show_message(text, MessageKind::Error)]
                }
            }
        }
        Msg::DownloadClicked => vec![
            state.show_message(messages::DOWNLOAD_STARTED, MessageKind::Info),
            Effect::DownloadReport,
        ],
        Msg::DownloadFinished(result) => match result {
            Ok(_) => vec![state.show_message(messages::DOWNLOAD_DONE, MessageKind::Success)],
            Err(_) => vec![state.show_message(messages::DOWNLOAD_FAILED, MessageKind::Error)],
        },
        Msg::MessageExpired { message_id } => {
            state.expire_message(message_id);
            Vec::new()
        }
    };

    (state, effects)
}
