//! Indexwatch client: REST access to the indexation service and effect execution.
mod api;
mod handle;
mod report;
mod types;

pub use api::{ClientSettings, DashboardApi, ReqwestApi, DEFAULT_BASE_URL};
pub use handle::{ClientCommand, ClientHandle};
pub use report::{report_filename, save_report, ReportError, ReportStore, REPORT_PREFIX};
pub use types::{
    ApiError, CheckResponse, ClientEvent, StatsSummary, StatusResponse, UploadResponse,
    UrlListResponse, UrlRecord,
};
