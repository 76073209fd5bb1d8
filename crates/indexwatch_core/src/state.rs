use std::path::PathBuf;

use crate::effect::{Effect, MESSAGE_LIFETIME};
use crate::view_model::AppViewModel;

pub type MessageId = u64;

/// One row of the URL list as reported by the indexation service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlRecord {
    pub url: String,
    pub status: String,
    pub last_checked: String,
    pub notes: Option<String>,
}

/// Aggregate counters computed by the service. Treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSummary {
    pub total: u64,
    pub indexed: u64,
    pub not_indexed: u64,
    pub invalid: u64,
    pub pending: u64,
    /// Display string, `"Never"` before the first check.
    pub last_check: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub id: MessageId,
    pub text: String,
    pub kind: MessageKind,
}

/// A failed round trip, reduced to what the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    /// Text from the server's `message` field, if it sent one.
    pub server_message: Option<String>,
    /// Transport-level description, for logs only.
    pub detail: String,
}

impl RequestFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn with_server_message(mut self, message: impl Into<String>) -> Self {
        self.server_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub urls: Vec<UrlRecord>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub urls: Vec<UrlRecord>,
    pub message: String,
}

/// A local file the user picked for upload, described before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    urls: Vec<UrlRecord>,
    stats: Option<StatsSummary>,
    loading: bool,
    checking: bool,
    uploading: bool,
    message: Option<TransientMessage>,
    next_message_id: MessageId,
    upload_input: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn urls(&self) -> &[UrlRecord] {
        &self.urls
    }

    pub fn stats(&self) -> Option<&StatsSummary> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    pub fn upload_input(&self) -> Option<&str> {
        self.upload_input.as_deref()
    }

    /// A check needs a non-empty list and no other mutation in flight.
    pub fn can_check(&self) -> bool {
        !self.checking && !self.uploading && !self.urls.is_empty()
    }

    /// Uploads wait for the initial list so a late list response cannot
    /// overwrite the uploaded one.
    pub fn can_upload(&self) -> bool {
        !self.loading && !self.uploading && !self.checking
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.dirty = true;
    }

    pub(crate) fn set_checking(&mut self, checking: bool) {
        self.checking = checking;
        self.dirty = true;
    }

    pub(crate) fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
        self.dirty = true;
    }

    pub(crate) fn replace_urls(&mut self, urls: Vec<UrlRecord>) {
        self.urls = urls;
        self.dirty = true;
    }

    pub(crate) fn set_stats(&mut self, stats: StatsSummary) {
        self.stats = Some(stats);
        self.dirty = true;
    }

    /// Replaces any visible message and returns the timer that will clear it.
    pub(crate) fn show_message(&mut self, text: impl Into<String>, kind: MessageKind) -> Effect {
        self.next_message_id += 1;
        let id = self.next_message_id;
        self.message = Some(TransientMessage {
            id,
            text: text.into(),
            kind,
        });
        self.dirty = true;
        Effect::ScheduleMessageClear {
            message_id: id,
            after: MESSAGE_LIFETIME,
        }
    }

    /// Clears the message only if `id` is still the one on screen.
    pub(crate) fn expire_message(&mut self, id: MessageId) {
        if self.message.as_ref().is_some_and(|m| m.id == id) {
            self.message = None;
            self.dirty = true;
        }
    }

    pub(crate) fn open_upload_prompt(&mut self) {
        if self.upload_input.is_none() {
            self.upload_input = Some(String::new());
            self.dirty = true;
        }
    }

    pub(crate) fn set_upload_input(&mut self, text: String) {
        if let Some(input) = self.upload_input.as_mut() {
            if *input != text {
                *input = text;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn take_upload_input(&mut self) -> Option<String> {
        let taken = self.upload_input.take();
        if taken.is_some() {
            self.dirty = true;
        }
        taken
    }
}
