use crate::{JobId, RequestId};

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the creation request for a product URL.
    StartAnalysis { product_url: String },
    /// Arm the fixed-period poll timer for a job.
    StartPolling { job_id: JobId },
    /// Issue one status request; the response must echo `request`.
    FetchStatus { job_id: JobId, request: RequestId },
    /// Cancel the poll timer. Idempotent.
    StopPolling,
}
