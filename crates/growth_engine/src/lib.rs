//! Growth engine: HTTP job client, poll timer and effect execution.
mod client;
mod engine;
mod session;
mod settings;
mod timer;
mod types;

pub use client::{AnalysisApi, ReqwestAnalysisClient};
pub use engine::EngineHandle;
pub use session::Session;
pub use settings::{ClientSettings, PollSettings, API_URL_ENV, DEFAULT_API_URL};
pub use timer::{ChannelEventSink, EventSink, PollTimer};
pub use types::{
    EngineEvent, EngineStopped, FailureKind, RequestError, GENERIC_START_ERROR,
    GENERIC_STATUS_ERROR,
};
