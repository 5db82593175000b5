use crate::{AppState, ControllerPhase, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // A torn-down view accepts nothing; late responses and ticks are dropped.
    if state.is_torn_down() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let product_url = state.input().trim().to_owned();
            if product_url.is_empty() || !state.can_submit() {
                return (state, Vec::new());
            }
            let stop_previous = state.phase() == ControllerPhase::Terminal;
            state.begin_submission();
            let mut effects = Vec::with_capacity(2);
            if stop_previous {
                effects.push(Effect::StopPolling);
            }
            effects.push(Effect::StartAnalysis { product_url });
            effects
        }
        Msg::AttachJob { job_id } => {
            let job_id = job_id.trim().to_owned();
            if job_id.is_empty() || !state.can_submit() {
                return (state, Vec::new());
            }
            state.begin_attach(job_id.clone());
            vec![Effect::StartPolling { job_id }]
        }
        Msg::SubmissionSucceeded(job) => {
            if state.phase() != ControllerPhase::Submitting {
                return (state, Vec::new());
            }
            let job_id = job.job_id.clone();
            state.accept_job(job);
            match state.phase() {
                ControllerPhase::Polling => vec![Effect::StartPolling { job_id }],
                _ => Vec::new(),
            }
        }
        Msg::SubmissionFailed { message } => {
            if state.phase() == ControllerPhase::Submitting {
                state.submission_failed(message);
            }
            Vec::new()
        }
        Msg::PollTick => {
            if state.phase() != ControllerPhase::Polling {
                return (state, Vec::new());
            }
            // At most one status request per job at a time.
            match state.issue_request() {
                Some((job_id, request)) => vec![Effect::FetchStatus { job_id, request }],
                None => Vec::new(),
            }
        }
        Msg::StatusReceived {
            job_id,
            request,
            job,
        } => {
            if state.phase() != ControllerPhase::Polling
                || !state.is_current_response(&job_id, request)
            {
                return (state, Vec::new());
            }
            state.complete_request();
            // Ids are compared case-insensitively; the backend may canonicalize UUIDs.
            if !job.job_id.eq_ignore_ascii_case(&job_id) {
                state.record_poll_failure(format!(
                    "status for job {} answered with job {}",
                    job_id, job.job_id
                ));
                return (state, Vec::new());
            }
            state.record_poll_success();
            state.accept_job(job);
            match state.phase() {
                ControllerPhase::Terminal => vec![Effect::StopPolling],
                _ => Vec::new(),
            }
        }
        Msg::StatusFailed {
            job_id,
            request,
            message,
        } => {
            if state.phase() == ControllerPhase::Polling
                && state.is_current_response(&job_id, request)
            {
                state.complete_request();
                state.record_poll_failure(message);
            }
            Vec::new()
        }
        Msg::ViewTornDown => {
            state.tear_down();
            vec![Effect::StopPolling]
        }
    };

    (state, effects)
}
