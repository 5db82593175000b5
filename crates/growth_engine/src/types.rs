use std::fmt;

use growth_core::{Job, JobId, RequestId};

/// Message used when the backend gives no usable `detail` for a failed submission.
pub const GENERIC_START_ERROR: &str = "Failed to start analysis";
/// Message used for every failed status fetch.
pub const GENERIC_STATUS_ERROR: &str = "Failed to fetch job status";

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Creation request resolved.
    SubmissionCompleted { result: Result<Job, RequestError> },
    /// Status request `request` for `job_id` resolved.
    StatusFetched {
        job_id: JobId,
        request: RequestId,
        result: Result<Job, RequestError>,
    },
    /// The poll timer fired; `tick` counts from 1 per timer.
    PollTick { tick: u64 },
}

/// Failure of one request against the analysis API.
///
/// `message` is what the view shows; `kind` is what logs and callers match on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The engine worker exited; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine worker stopped")]
pub struct EngineStopped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
