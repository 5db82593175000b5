use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque job identifier assigned by the backend.
pub type JobId = String;

/// Sequence number of a status request issued by the controller.
pub type RequestId = u64;

/// Lifecycle of a backend analysis job, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Started,
    Researching,
    Analyzed,
    Optimized,
    Completed,
    Failed,
}

impl JobStatus {
    /// `completed` and `failed` admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Started => "started",
            JobStatus::Researching => "researching",
            JobStatus::Analyzed => "analyzed",
            JobStatus::Optimized => "optimized",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local, read-only copy of a backend job as returned by the status API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: JobId,
    pub product_url: String,
    pub status: JobStatus,
    #[serde(default)]
    pub analysis_result: Option<AnalysisResult>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub raw_research: Option<Vec<String>>,
    #[serde(default)]
    pub agent_analysis: Option<AgentAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentAnalysis {
    /// Free-form metrics object produced by the analytics agent.
    #[serde(default)]
    pub metrics: Option<serde_json::Value>,
    #[serde(default)]
    pub growth_strategy: Option<String>,
    #[serde(default)]
    pub critic_review: Option<String>,
}

impl Job {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Analysis payload, only when the job has completed.
    pub fn completed_result(&self) -> Option<&AnalysisResult> {
        match self.status {
            JobStatus::Completed => self.analysis_result.as_ref(),
            _ => None,
        }
    }
}
