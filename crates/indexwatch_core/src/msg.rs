use std::path::PathBuf;

use crate::{
    CheckOutcome, MessageId, RequestFailure, StatsSummary, UploadCandidate, UploadOutcome,
    UrlRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard became visible; load the list and stats.
    Mounted,
    /// Completion of the URL list fetch.
    UrlsFetched(Result<Vec<UrlRecord>, RequestFailure>),
    /// Completion of the stats fetch.
    StatsFetched(Result<StatsSummary, RequestFailure>),
    /// User pressed "Run Check Now".
    CheckClicked,
    /// Completion of a manual check.
    CheckFinished(Result<CheckOutcome, RequestFailure>),
    /// User opened the upload path prompt.
    UploadPromptOpened,
    /// User edited the upload path prompt.
    UploadInputChanged(String),
    /// User dismissed the upload path prompt.
    UploadPromptCancelled,
    /// User confirmed the path typed into the upload prompt.
    UploadSubmitted,
    /// File metadata for a path the user picked.
    UploadChosen(UploadCandidate),
    /// The picked path could not be inspected.
    UploadFileUnreadable { path: PathBuf, reason: String },
    /// Completion of a CSV upload.
    UploadFinished(Result<UploadOutcome, RequestFailure>),
    /// User pressed "Download Report".
    DownloadClicked,
    /// Completion of a report download; carries the saved path.
    DownloadFinished(Result<PathBuf, RequestFailure>),
    /// The lifetime timer of a transient message fired.
    MessageExpired { message_id: MessageId },
}
