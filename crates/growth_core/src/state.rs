use crate::view_model::{AppViewModel, JobView};
use crate::{Job, JobId, RequestId};

/// Where the controller is in the submit/poll lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    /// No job yet, or the last submission failed.
    #[default]
    Idle,
    /// Creation request in flight.
    Submitting,
    /// Job known and non-terminal; the poll timer is armed.
    Polling,
    /// Job reached `completed` or `failed`.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: ControllerPhase,
    input: String,
    /// Id being followed; known before the first Job arrives when attaching.
    job_id: Option<JobId>,
    job: Option<Job>,
    submission_error: Option<String>,
    last_poll_error: Option<String>,
    in_flight: Option<RequestId>,
    next_request: RequestId,
    torn_down: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Submissions are blocked while one is in flight or a job is still running.
    pub fn can_submit(&self) -> bool {
        !self.torn_down
            && matches!(
                self.phase,
                ControllerPhase::Idle | ControllerPhase::Terminal
            )
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            input: self.input.clone(),
            job: match (&self.job, &self.job_id) {
                (Some(job), _) => Some(JobView::from_job(job)),
                (None, Some(job_id)) => Some(JobView::awaiting(job_id)),
                (None, None) => None,
            },
            submission_error: self.submission_error.clone(),
            last_poll_error: self.last_poll_error.clone(),
            can_submit: self.can_submit(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submission(&mut self) {
        self.phase = ControllerPhase::Submitting;
        self.discard_job();
        self.submission_error = None;
        self.dirty = true;
    }

    pub(crate) fn begin_attach(&mut self, job_id: JobId) {
        self.phase = ControllerPhase::Polling;
        self.discard_job();
        self.submission_error = None;
        self.job_id = Some(job_id);
        self.dirty = true;
    }

    pub(crate) fn submission_failed(&mut self, message: String) {
        self.phase = ControllerPhase::Idle;
        self.discard_job();
        self.submission_error = Some(message);
        self.dirty = true;
    }

    /// Stores a fresh job and moves to `Polling` or `Terminal` depending on its status.
    pub(crate) fn accept_job(&mut self, job: Job) {
        self.phase = if job.is_terminal() {
            ControllerPhase::Terminal
        } else {
            ControllerPhase::Polling
        };
        self.job_id = Some(job.job_id.clone());
        self.job = Some(job);
        self.dirty = true;
    }

    /// Allocates a request number unless one is already outstanding.
    pub(crate) fn issue_request(&mut self) -> Option<(JobId, RequestId)> {
        if self.in_flight.is_some() {
            return None;
        }
        let job_id = self.job_id.clone()?;
        self.next_request += 1;
        self.in_flight = Some(self.next_request);
        Some((job_id, self.next_request))
    }

    /// True when a response matches the outstanding request for the followed job.
    pub(crate) fn is_current_response(&self, job_id: &str, request: RequestId) -> bool {
        self.in_flight == Some(request) && self.job_id.as_deref() == Some(job_id)
    }

    pub(crate) fn complete_request(&mut self) {
        self.in_flight = None;
    }

    pub(crate) fn record_poll_success(&mut self) {
        if self.last_poll_error.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn record_poll_failure(&mut self, message: String) {
        self.last_poll_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
        self.discard_job();
        self.dirty = true;
    }

    fn discard_job(&mut self) {
        self.job_id = None;
        self.job = None;
        self.in_flight = None;
        self.last_poll_error = None;
    }
}
