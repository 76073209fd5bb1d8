use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use indexwatch_logging::{dash_debug, dash_info, dash_warn, operation_label};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::ErrorBody;
use crate::{
    ApiError, CheckResponse, StatsSummary, StatusResponse, UploadResponse, UrlListResponse,
    UrlRecord,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Multipart field the service reads the CSV from.
const UPLOAD_FIELD: &str = "csvFile";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` leaves the transport default; a check may run for minutes.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// The remote operations the dashboard consumes. One round trip each, no retry.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_urls(&self) -> Result<Vec<UrlRecord>, ApiError>;

    async fn upload_csv(&self, file_name: &str, content: Vec<u8>)
        -> Result<UploadResponse, ApiError>;

    async fn trigger_check(&self) -> Result<CheckResponse, ApiError>;

    async fn fetch_status(&self) -> Result<StatsSummary, ApiError>;

    async fn download_report(&self) -> Result<Bytes, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = parse_base(&settings.base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::InvalidBaseUrl(err.to_string()))
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let label = operation_label(operation);
        dash_info!("{} request", label);
        let response = request.send().await.map_err(|err| {
            dash_warn!("{} failed: {}", label, err);
            map_reqwest_error(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = parse_error_message(&body);
        dash_warn!(
            "{} http status {} message={:?}",
            label,
            status.as_u16(),
            message
        );
        Err(ApiError::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(operation, request).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| {
            dash_warn!("{} malformed body: {}", operation_label(operation), err);
            ApiError::Decode(err.to_string())
        })
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestApi {
    async fn list_urls(&self) -> Result<Vec<UrlRecord>, ApiError> {
        let url = self.endpoint("urls")?;
        let body: UrlListResponse = self.send_json("list_urls", self.client.get(url)).await?;
        Ok(body.data)
    }

    async fn upload_csv(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint("urls/upload")?;
        dash_debug!("uploading {} ({} bytes)", file_name, content.len());
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        self.send_json("upload_csv", self.client.post(url).multipart(form))
            .await
    }

    async fn trigger_check(&self) -> Result<CheckResponse, ApiError> {
        let url = self.endpoint("urls/check")?;
        self.send_json("trigger_check", self.client.post(url)).await
    }

    async fn fetch_status(&self) -> Result<StatsSummary, ApiError> {
        let url = self.endpoint("urls/status")?;
        let body: StatusResponse = self.send_json("fetch_status", self.client.get(url)).await?;
        Ok(body.stats)
    }

    async fn download_report(&self) -> Result<Bytes, ApiError> {
        let url = self.endpoint("urls/download")?;
        let response = self.send("download_report", self.client.get(url)).await?;

        let mut payload = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            payload.extend_from_slice(&chunk);
        }
        dash_debug!("report payload {} bytes", payload.len());
        Ok(Bytes::from(payload))
    }
}

/// Accepts `http://host/api` and `http://host/api/` alike.
fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let parsed =
        Url::parse(&with_slash).map_err(|err| ApiError::InvalidBaseUrl(format!("{raw}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: unsupported scheme {}",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}

fn parse_error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
