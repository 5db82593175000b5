//! Growth core: job model, pure polling state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{AgentAnalysis, AnalysisResult, Job, JobId, JobStatus, RequestId};
pub use msg::Msg;
pub use state::{AppState, ControllerPhase};
pub use update::update;
pub use view_model::{
    AgentCardView, AgentKind, AgentStatus, AppViewModel, JobView, PipelineStep, ReportView,
    StepView,
};
