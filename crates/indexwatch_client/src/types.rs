use std::path::PathBuf;

use serde::Deserialize;

/// One row returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_checked: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub indexed: u64,
    #[serde(default)]
    pub not_indexed: u64,
    #[serde(default)]
    pub invalid: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default = "never")]
    pub last_check: String,
}

fn never() -> String {
    "Never".to_string()
}

/// Body of `GET /urls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlListResponse {
    pub data: Vec<UrlRecord>,
}

/// Body of `POST /urls/check`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckResponse {
    pub data: Vec<UrlRecord>,
    #[serde(default)]
    pub timestamp: String,
}

/// Body of `POST /urls/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub data: Vec<UrlRecord>,
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /urls/status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub stats: StatsSummary,
}

/// Error body the service sends alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    UrlsListed(Result<Vec<UrlRecord>, ApiError>),
    StatusFetched(Result<StatsSummary, ApiError>),
    CheckCompleted(Result<CheckResponse, ApiError>),
    UploadCompleted(Result<UploadResponse, ApiError>),
    ReportSaved(Result<PathBuf, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("http status {status}")]
    HttpStatus { status: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ApiError {
    /// Text the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
