use std::time::Duration;

use growth_core::JobStatus;
use growth_engine::{
    AnalysisApi, ClientSettings, FailureKind, ReqwestAnalysisClient, GENERIC_START_ERROR,
    GENERIC_STATUS_ERROR,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestAnalysisClient {
    let settings = ClientSettings {
        base_url: format!("{}/api/v1", server.uri()),
        request_timeout: None,
    };
    ReqwestAnalysisClient::new(&settings).expect("client")
}

fn job_body(status: &str) -> serde_json::Value {
    json!({
        "job_id": "abc",
        "product_url": "https://example.com/p/123",
        "status": status,
        "analysis_result": null,
        "error_message": null,
        "created_at": "2026-01-01T00:00:00"
    })
}

#[tokio::test]
async fn start_analysis_posts_url_and_returns_job() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"product_url": "https://example.com/p/123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    let job = client_for(&server)
        .start_analysis("https://example.com/p/123")
        .await
        .expect("job");
    assert_eq!(job.job_id, "abc");
    assert_eq!(job.status, JobStatus::Pending);
}

#[tokio::test]
async fn start_analysis_surfaces_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis/analyze"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid URL"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .start_analysis("nope")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "Invalid URL");
    assert_eq!(err.to_string(), "Invalid URL");
}

#[tokio::test]
async fn start_analysis_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.start_analysis("https://example.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, GENERIC_START_ERROR);
}

#[tokio::test]
async fn non_string_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis/analyze"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "product_url"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .start_analysis("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.message, GENERIC_START_ERROR);
}

#[tokio::test]
async fn malformed_success_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analysis/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .start_analysis("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn get_job_status_reads_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("researching")))
        .mount(&server)
        .await;

    let job = client_for(&server).get_job_status("abc").await.expect("job");
    assert_eq!(job.status, JobStatus::Researching);
}

#[tokio::test]
async fn repeated_status_reads_are_equal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("analyzed")))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let first = client.get_job_status("abc").await.expect("first");
    for _ in 0..3 {
        assert_eq!(client.get_job_status("abc").await.expect("again"), first);
    }
}

#[tokio::test]
async fn get_job_status_failure_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Job not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_job_status("missing")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, GENERIC_STATUS_ERROR);
}

#[tokio::test]
async fn job_id_is_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).get_job_status("a/b").await.expect("job");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("pending")))
        .expect(1)
        .mount(&server)
        .await;
    let settings = ClientSettings {
        base_url: format!("{}/api/v1/", server.uri()),
        request_timeout: None,
    };

    ReqwestAnalysisClient::new(&settings)
        .expect("client")
        .get_job_status("abc")
        .await
        .expect("job");
}

#[tokio::test]
async fn request_timeout_applies_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/status/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(job_body("pending")),
        )
        .mount(&server)
        .await;
    let settings = ClientSettings {
        base_url: format!("{}/api/v1", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
    };

    let err = ReqwestAnalysisClient::new(&settings)
        .expect("client")
        .get_job_status("abc")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ClientSettings {
        base_url: "not a url".to_string(),
        request_timeout: None,
    };
    let err = ReqwestAnalysisClient::new(&settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidBaseUrl);
}
