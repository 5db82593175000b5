use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use growth_core::{JobId, RequestId};
use growth_logging::{growth_debug, growth_error, growth_info};

use crate::client::{AnalysisApi, ReqwestAnalysisClient};
use crate::timer::{ChannelEventSink, EventSink, PollTimer};
use crate::{ClientSettings, EngineEvent, EngineStopped, PollSettings, RequestError};

enum EngineCommand {
    StartAnalysis { product_url: String },
    FetchStatus { job_id: JobId, request: RequestId },
    StartPolling { job_id: JobId },
    StopPolling,
}

/// Executes requests and owns the poll timer on a background runtime.
///
/// Dropping the handle disconnects the command channel; the worker then
/// cancels any running timer and shuts its runtime down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn AnalysisApi>, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    growth_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut timer: Option<PollTimer> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartAnalysis { product_url } => {
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = api.start_analysis(&product_url).await;
                            sink.emit(EngineEvent::SubmissionCompleted { result });
                        });
                    }
                    EngineCommand::FetchStatus { job_id, request } => {
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = api.get_job_status(&job_id).await;
                            sink.emit(EngineEvent::StatusFetched {
                                job_id,
                                request,
                                result,
                            });
                        });
                    }
                    EngineCommand::StartPolling { job_id } => {
                        growth_info!("Polling job {} every {:?}", job_id, poll.period);
                        if let Some(previous) = timer.take() {
                            previous.cancel();
                        }
                        timer = Some(PollTimer::start_on(
                            runtime.handle(),
                            poll.period,
                            sink.clone(),
                        ));
                    }
                    EngineCommand::StopPolling => {
                        if let Some(active) = timer.take() {
                            growth_debug!("Poll timer cancelled");
                            active.cancel();
                        }
                    }
                }
            }

            if let Some(active) = timer.take() {
                runtime.block_on(active.stop());
            }
            runtime.shutdown_background();
        });

        Self { cmd_tx, event_rx }
    }

    /// Engine backed by the reqwest client for `settings`.
    pub fn with_client(
        settings: &ClientSettings,
        poll: PollSettings,
    ) -> Result<Self, RequestError> {
        let client = ReqwestAnalysisClient::new(settings)?;
        Ok(Self::new(Arc::new(client), poll))
    }

    pub fn start_analysis(&self, product_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartAnalysis {
            product_url: product_url.into(),
        });
    }

    pub fn fetch_status(&self, job_id: impl Into<JobId>, request: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::FetchStatus {
            job_id: job_id.into(),
            request,
        });
    }

    /// Arms the poll timer, replacing any timer already running.
    pub fn start_polling(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            job_id: job_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for an event; fails once the worker is gone.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineStopped),
        }
    }
}
