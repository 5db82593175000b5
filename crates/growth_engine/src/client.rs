use growth_core::Job;
use growth_logging::{growth_debug, growth_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ClientSettings, FailureKind, RequestError, GENERIC_START_ERROR, GENERIC_STATUS_ERROR};

/// The two calls the growth backend exposes to clients.
///
/// Implementations perform exactly one request per call: no retry, no caching.
#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Creates a job for `product_url`.
    async fn start_analysis(&self, product_url: &str) -> Result<Job, RequestError>;

    /// Reads the current state of `job_id`.
    async fn get_job_status(&self, job_id: &str) -> Result<Job, RequestError>;
}

#[derive(Serialize)]
struct StartAnalysisRequest<'a> {
    product_url: &'a str,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, RequestError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| RequestError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::new(
                FailureKind::InvalidBaseUrl,
                format!("{} cannot be used as an API base", settings.base_url),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RequestError::new(FailureKind::InvalidBaseUrl, "base url has no path segments")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl AnalysisApi for ReqwestAnalysisClient {
    async fn start_analysis(&self, product_url: &str) -> Result<Job, RequestError> {
        let url = self.endpoint(&["analysis", "analyze"])?;
        let body = serde_json::to_vec(&StartAnalysisRequest { product_url })
            .map_err(|err| RequestError::new(FailureKind::MalformedResponse, err.to_string()))?;
        growth_debug!("POST {} product_url={}", url, product_url);

        let response = self
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, GENERIC_START_ERROR))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, GENERIC_START_ERROR))?;

        if !status.is_success() {
            let message =
                detail_message(&bytes).unwrap_or_else(|| GENERIC_START_ERROR.to_string());
            growth_warn!("Start analysis rejected with {}: {}", status, message);
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        parse_job(&bytes, GENERIC_START_ERROR)
    }

    async fn get_job_status(&self, job_id: &str) -> Result<Job, RequestError> {
        let url = self.endpoint(&["analysis", "status", job_id])?;
        growth_debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, GENERIC_STATUS_ERROR))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, GENERIC_STATUS_ERROR))?;
        parse_job(&bytes, GENERIC_STATUS_ERROR)
    }
}

/// The backend's `detail` field, when it is a non-empty string.
fn detail_message(body: &[u8]) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_slice(body).ok()?;
    match payload.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

fn parse_job(body: &[u8], message: &str) -> Result<Job, RequestError> {
    serde_json::from_slice(body).map_err(|err| {
        growth_warn!("Unexpected job payload: {}", err);
        RequestError::new(FailureKind::MalformedResponse, message)
    })
}

fn status_error(status: StatusCode) -> RequestError {
    RequestError::new(FailureKind::HttpStatus(status.as_u16()), GENERIC_STATUS_ERROR)
}

fn map_reqwest_error(err: reqwest::Error, message: &str) -> RequestError {
    growth_warn!("Request failed: {}", err);
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, message);
    }
    RequestError::new(FailureKind::Network, message)
}
