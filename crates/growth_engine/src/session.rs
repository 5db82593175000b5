use std::time::Duration;

use growth_core::{update, AppState, AppViewModel, Effect, Msg};
use growth_logging::{growth_info, growth_warn};

use crate::{EngineEvent, EngineHandle, EngineStopped};

/// One consuming view: the controller state plus the engine executing its effects.
///
/// Dropping the session tears the view down.
pub struct Session {
    state: AppState,
    engine: EngineHandle,
}

impl Session {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            engine,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `msg`, runs its effects and returns the view when something changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.run_effects(effects);
        let view = state.view();
        let changed = state.consume_dirty();
        self.state = state;
        changed.then_some(view)
    }

    /// Waits up to `timeout` for one engine event and dispatches it.
    pub fn pump(&mut self, timeout: Duration) -> Result<Option<AppViewModel>, EngineStopped> {
        Ok(self
            .engine
            .recv_timeout(timeout)?
            .and_then(|event| self.dispatch(event_to_msg(event))))
    }

    /// Dispatches one engine event if one is ready, without blocking.
    pub fn try_pump(&mut self) -> Option<AppViewModel> {
        let event = self.engine.try_recv()?;
        self.dispatch(event_to_msg(event))
    }

    pub fn tear_down(&mut self) {
        self.dispatch(Msg::ViewTornDown);
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartAnalysis { product_url } => {
                    growth_info!("StartAnalysis product_url={}", product_url);
                    self.engine.start_analysis(product_url);
                }
                Effect::StartPolling { job_id } => self.engine.start_polling(job_id),
                Effect::FetchStatus { job_id, request } => {
                    self.engine.fetch_status(job_id, request);
                }
                Effect::StopPolling => self.engine.stop_polling(),
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.state.is_torn_down() {
            self.tear_down();
        }
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionCompleted { result } => match result {
            Ok(job) => {
                growth_info!("Job {} created with status {}", job.job_id, job.status);
                Msg::SubmissionSucceeded(job)
            }
            Err(err) => {
                growth_warn!("Submission failed ({}): {}", err.kind, err.message);
                Msg::SubmissionFailed {
                    message: err.message,
                }
            }
        },
        EngineEvent::StatusFetched {
            job_id,
            request,
            result,
        } => match result {
            Ok(job) => Msg::StatusReceived {
                job_id,
                request,
                job,
            },
            Err(err) => {
                growth_warn!(
                    "Status poll {} for job {} failed ({}): {}",
                    request,
                    job_id,
                    err.kind,
                    err.message
                );
                Msg::StatusFailed {
                    job_id,
                    request,
                    message: err.message,
                }
            }
        },
        EngineEvent::PollTick { .. } => Msg::PollTick,
    }
}
