use crate::table::{table_view, TableView};
use crate::{AppState, TransientMessage};

const NEVER_CHECKED: &str = "Never";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total: u64,
    pub indexed: u64,
    pub not_indexed: u64,
    pub invalid: u64,
    pub pending: u64,
    /// `None` until the service has completed a check.
    pub last_check: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub table: TableView,
    pub stats: Option<StatsView>,
    pub message: Option<TransientMessage>,
    pub loading: bool,
    pub checking: bool,
    pub uploading: bool,
    pub check_enabled: bool,
    pub upload_enabled: bool,
    pub check_label: &'static str,
    pub upload_prompt: Option<String>,
    pub footer: String,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let stats = state.stats().map(|s| StatsView {
            total: s.total,
            indexed: s.indexed,
            not_indexed: s.not_indexed,
            invalid: s.invalid,
            pending: s.pending,
            last_check: (s.last_check != NEVER_CHECKED && !s.last_check.is_empty())
                .then(|| s.last_check.clone()),
        });

        Self {
            table: table_view(state.urls(), state.is_loading()),
            stats,
            message: state.message().cloned(),
            loading: state.is_loading(),
            checking: state.is_checking(),
            uploading: state.is_uploading(),
            check_enabled: state.can_check(),
            upload_enabled: state.can_upload(),
            check_label: if state.is_checking() {
                "Checking..."
            } else {
                "Run Check Now"
            },
            upload_prompt: state.upload_input().map(ToOwned::to_owned),
            footer: format!("Monitoring {} URLs", state.urls().len()),
        }
    }
}
