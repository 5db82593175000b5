use crate::{Job, JobId, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the product URL input.
    InputChanged(String),
    /// User submitted the current input for analysis.
    SubmitClicked,
    /// User asked to follow an already existing job.
    AttachJob { job_id: JobId },
    /// Creation request returned a job.
    SubmissionSucceeded(Job),
    /// Creation request failed; `message` is user-facing.
    SubmissionFailed { message: String },
    /// Poll timer fired.
    PollTick,
    /// Status request `request` for `job_id` returned a job.
    StatusReceived {
        job_id: JobId,
        request: RequestId,
        job: Job,
    },
    /// Status request `request` failed.
    StatusFailed {
        job_id: JobId,
        request: RequestId,
        message: String,
    },
    /// The consuming view went away.
    ViewTornDown,
}
