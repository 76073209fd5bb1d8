//! Indexwatch core: pure dashboard state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod table;
mod update;
mod upload;
mod view_model;

pub use effect::{Effect, MESSAGE_LIFETIME};
pub use msg::Msg;
pub use state::{
    AppState, CheckOutcome, MessageId, MessageKind, RequestFailure, StatsSummary,
    TransientMessage, UploadCandidate, UploadOutcome, UrlRecord,
};
pub use table::{table_view, BadgeStyle, IndexStatus, TableView, UrlRowView, NOTES_PLACEHOLDER};
pub use update::{messages, update};
pub use upload::{has_csv_extension, validate_upload, UploadRejection, MAX_UPLOAD_BYTES};
pub use view_model::{AppViewModel, StatsView};
