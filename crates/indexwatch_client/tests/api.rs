use std::time::Duration;

use indexwatch_client::{ApiError, ClientSettings, DashboardApi, ReqwestApi, UrlRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(&ClientSettings::with_base_url(format!("{}/api", server.uri())))
        .expect("client")
}

fn sample_rows() -> serde_json::Value {
    json!([
        {
            "url": "https://a.example.com",
            "status": "Indexed",
            "lastChecked": "1/2/2025, 9:00:00 AM",
            "notes": ""
        },
        {
            "url": "https://b.example.com",
            "status": "Pending",
            "lastChecked": "Never"
        }
    ])
}

#[tokio::test]
async fn list_urls_decodes_camel_case_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": sample_rows() })))
        .expect(1)
        .mount(&server)
        .await;

    let urls = api_for(&server).list_urls().await.expect("list ok");
    assert_eq!(
        urls,
        vec![
            UrlRecord {
                url: "https://a.example.com".to_string(),
                status: "Indexed".to_string(),
                last_checked: "1/2/2025, 9:00:00 AM".to_string(),
                notes: Some(String::new()),
            },
            UrlRecord {
                url: "https://b.example.com".to_string(),
                status: "Pending".to_string(),
                last_checked: "Never".to_string(),
                notes: None,
            },
        ]
    );
}

#[tokio::test]
async fn trigger_check_posts_and_returns_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/urls/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": sample_rows(),
            "timestamp": "2025-01-02T09:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server).trigger_check().await.expect("check ok");
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.timestamp, "2025-01-02T09:00:00.000Z");
}

#[tokio::test]
async fn fetch_status_unwraps_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": {
                "total": 5,
                "indexed": 2,
                "notIndexed": 1,
                "invalid": 1,
                "pending": 1,
                "lastCheck": "Never"
            }
        })))
        .mount(&server)
        .await;

    let stats = api_for(&server).fetch_status().await.expect("status ok");
    assert_eq!(stats.total, 5);
    assert_eq!(stats.not_indexed, 1);
    assert_eq!(stats.last_check, "Never");
}

#[tokio::test]
async fn upload_sends_csv_file_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/urls/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"csvFile\""))
        .and(body_string_contains("filename=\"urls.csv\""))
        .and(body_string_contains("https://a.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": sample_rows(),
            "message": "Successfully uploaded 2 URLs"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .upload_csv("urls.csv", b"url\nhttps://a.example.com\n".to_vec())
        .await
        .expect("upload ok");
    assert_eq!(response.message, "Successfully uploaded 2 URLs");
    assert_eq!(response.data.len(), 2);
}

#[tokio::test]
async fn upload_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/urls/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Maximum 30 URLs allowed. Found 31 URLs."
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .upload_csv("urls.csv", b"url\n".to_vec())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 400,
            message: Some("Maximum 30 URLs allowed. Found 31 URLs.".to_string()),
        }
    );
    assert_eq!(
        err.server_message(),
        Some("Maximum 30 URLs allowed. Found 31 URLs.")
    );
}

#[tokio::test]
async fn server_error_without_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server).list_urls().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 502,
            message: None,
        }
    );
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_urls().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn download_returns_raw_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("url,status\nhttps://a.example.com,Indexed\n", "text/csv"),
        )
        .mount(&server)
        .await;

    let payload = api_for(&server).download_report().await.expect("download ok");
    assert_eq!(
        payload.as_ref(),
        b"url,status\nhttps://a.example.com,Indexed\n"
    );
}

#[tokio::test]
async fn slow_response_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/urls/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "stats": {} })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::with_base_url(format!("{}/api", server.uri()))
    };
    let api = ReqwestApi::new(&settings).expect("client");

    let err = api.fetch_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "{err:?}");
}
