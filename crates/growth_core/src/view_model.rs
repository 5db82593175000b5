use crate::{ControllerPhase, Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: ControllerPhase,
    pub input: String,
    pub job: Option<JobView>,
    pub submission_error: Option<String>,
    pub last_poll_error: Option<String>,
    pub can_submit: bool,
    pub dirty: bool,
}

/// Presentation steps shown on the dashboard, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Researching,
    Analyzed,
    Optimized,
    Completed,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 4] = [
        PipelineStep::Researching,
        PipelineStep::Analyzed,
        PipelineStep::Optimized,
        PipelineStep::Completed,
    ];

    /// Step matching a status; `pending`, `started` and `failed` have none.
    pub fn for_status(status: JobStatus) -> Option<Self> {
        match status {
            JobStatus::Researching => Some(PipelineStep::Researching),
            JobStatus::Analyzed => Some(PipelineStep::Analyzed),
            JobStatus::Optimized => Some(PipelineStep::Optimized),
            JobStatus::Completed => Some(PipelineStep::Completed),
            JobStatus::Pending | JobStatus::Started | JobStatus::Failed => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStep::Researching => "researching",
            PipelineStep::Analyzed => "analyzed",
            PipelineStep::Optimized => "optimized",
            PipelineStep::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
    pub step: PipelineStep,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Planner,
    Researcher,
    Analyst,
    Optimizer,
    Critic,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Planner,
        AgentKind::Researcher,
        AgentKind::Analyst,
        AgentKind::Optimizer,
        AgentKind::Critic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Planner => "Planner",
            AgentKind::Researcher => "Researcher",
            AgentKind::Analyst => "Analyst",
            AgentKind::Optimizer => "Optimizer",
            AgentKind::Critic => "Critic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Waiting,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentCardView {
    pub agent: AgentKind,
    pub status: AgentStatus,
}

/// Analysis fields of a completed job; every field may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportView {
    pub plan: Option<String>,
    pub research: Vec<String>,
    pub metrics: Option<serde_json::Value>,
    pub growth_strategy: Option<String>,
    pub critic_review: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub job_id: String,
    pub product_url: Option<String>,
    /// `None` until the first status response arrives for an attached job.
    pub status: Option<JobStatus>,
    pub created_at: Option<String>,
    pub steps: Vec<StepView>,
    pub agents: Vec<AgentCardView>,
    pub failed: bool,
    pub error_message: Option<String>,
    pub report: Option<ReportView>,
}

impl JobView {
    pub(crate) fn from_job(job: &Job) -> Self {
        let current = PipelineStep::for_status(job.status);
        let failed = job.status == JobStatus::Failed;
        Self {
            job_id: job.job_id.clone(),
            product_url: Some(job.product_url.clone()),
            status: Some(job.status),
            created_at: Some(job.created_at.clone()),
            steps: steps_for(current),
            agents: agents_for(Some(job.status)),
            failed,
            error_message: if failed {
                job.error_message.clone()
            } else {
                None
            },
            report: (job.status == JobStatus::Completed).then(|| report_for(job)),
        }
    }

    pub(crate) fn awaiting(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_owned(),
            product_url: None,
            status: None,
            created_at: None,
            steps: steps_for(None),
            agents: agents_for(None),
            failed: false,
            error_message: None,
            report: None,
        }
    }

    pub fn highlighted_step(&self) -> Option<PipelineStep> {
        self.steps
            .iter()
            .find(|step| step.highlighted)
            .map(|step| step.step)
    }
}

fn steps_for(current: Option<PipelineStep>) -> Vec<StepView> {
    PipelineStep::ALL
        .iter()
        .map(|&step| StepView {
            step,
            highlighted: Some(step) == current,
        })
        .collect()
}

fn agents_for(status: Option<JobStatus>) -> Vec<AgentCardView> {
    // (agents finished, agent currently running). The backend reports no status
    // while the analyst works: `researching` is followed by `analyzed`, so the
    // analyst card goes from waiting to completed without a running phase.
    let (done, running) = match status {
        None | Some(JobStatus::Pending) => (0, None),
        Some(JobStatus::Started) => (0, Some(AgentKind::Planner)),
        Some(JobStatus::Researching) => (1, Some(AgentKind::Researcher)),
        Some(JobStatus::Analyzed) => (3, Some(AgentKind::Optimizer)),
        Some(JobStatus::Optimized) => (4, Some(AgentKind::Critic)),
        Some(JobStatus::Completed) => (AgentKind::ALL.len(), None),
        Some(JobStatus::Failed) => {
            return AgentKind::ALL
                .iter()
                .map(|&agent| AgentCardView {
                    agent,
                    status: AgentStatus::Failed,
                })
                .collect();
        }
    };

    AgentKind::ALL
        .iter()
        .enumerate()
        .map(|(index, &agent)| AgentCardView {
            agent,
            status: if index < done {
                AgentStatus::Completed
            } else if Some(agent) == running {
                AgentStatus::Running
            } else {
                AgentStatus::Waiting
            },
        })
        .collect()
}

fn report_for(job: &Job) -> ReportView {
    let Some(result) = job.completed_result() else {
        return ReportView::default();
    };
    let analysis = result.agent_analysis.as_ref();
    ReportView {
        plan: result.plan.clone(),
        research: result.raw_research.clone().unwrap_or_default(),
        metrics: analysis
            .and_then(|a| a.metrics.clone())
            .filter(|metrics| !metrics.is_null()),
        growth_strategy: analysis.and_then(|a| a.growth_strategy.clone()),
        critic_review: analysis.and_then(|a| a.critic_review.clone()),
    }
}
