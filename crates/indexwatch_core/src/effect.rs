use std::path::PathBuf;
use std::time::Duration;

use crate::MessageId;

/// How long a transient message stays visible before it is cleared.
pub const MESSAGE_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET /urls.
    FetchUrls,
    /// GET /urls/status.
    FetchStats,
    /// POST /urls/check.
    RunCheck,
    /// Stat a user-supplied path so it can be validated before upload.
    InspectUploadFile { path: PathBuf },
    /// POST /urls/upload with the file at `path` as the `csvFile` part.
    UploadCsv { path: PathBuf },
    /// GET /urls/download and save the payload locally.
    DownloadReport,
    /// Post `Msg::MessageExpired { message_id }` once `after` has elapsed.
    ScheduleMessageClear { message_id: MessageId, after: Duration },
}
