use growth_core::{
    AgentStatus, AppViewModel, ControllerPhase, JobView, ReportView, StepView,
};

const MISSING: &str = "(not provided)";

/// Turns a view model into terminal lines; the caller decides when to print.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    match view.phase {
        ControllerPhase::Idle => {
            if let Some(error) = &view.submission_error {
                lines.push(format!("Submission failed: {error}"));
            }
        }
        ControllerPhase::Submitting => {
            lines.push(format!("Submitting {} ...", view.input.trim()));
        }
        ControllerPhase::Polling | ControllerPhase::Terminal => {}
    }

    if let Some(job) = &view.job {
        render_job(job, &mut lines);
    }

    if let Some(error) = &view.last_poll_error {
        lines.push(format!("  (last poll failed: {error}; retrying)"));
    }

    lines
}

fn render_job(job: &JobView, lines: &mut Vec<String>) {
    let status = job.status.map_or("waiting for first status", |s| s.as_str());
    match &job.product_url {
        Some(url) => lines.push(format!("Job {} | {} | status: {}", job.job_id, url, status)),
        None => lines.push(format!("Job {} | status: {}", job.job_id, status)),
    }

    lines.push(format!("  Steps:  {}", render_steps(&job.steps)));
    let agents = job
        .agents
        .iter()
        .map(|card| format!("{} {}", agent_marker(card.status), card.agent.label()))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("  Agents: {agents}"));

    if job.failed {
        lines.push(format!(
            "  FAILED: {}",
            job.error_message.as_deref().unwrap_or("no error message from backend")
        ));
    }

    if let Some(report) = &job.report {
        render_report(report, lines);
    }
}

fn render_steps(steps: &[StepView]) -> String {
    steps
        .iter()
        .map(|step| {
            if step.highlighted {
                format!("[{}]", step.step.label())
            } else {
                step.step.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn agent_marker(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Waiting => "[ ]",
        AgentStatus::Running => "[>]",
        AgentStatus::Completed => "[x]",
        AgentStatus::Failed => "[!]",
    }
}

fn render_report(report: &ReportView, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("== Analysis ==".to_string());

    push_section(lines, "Plan", report.plan.as_deref());

    lines.push("Research:".to_string());
    if report.research.is_empty() {
        lines.push(format!("  {MISSING}"));
    }
    for snippet in &report.research {
        lines.push(format!("  - {snippet}"));
    }

    lines.push("Metrics:".to_string());
    match &report.metrics {
        Some(metrics) => {
            let pretty = serde_json::to_string_pretty(metrics).unwrap_or_else(|_| metrics.to_string());
            lines.extend(pretty.lines().map(|line| format!("  {line}")));
        }
        None => lines.push(format!("  {MISSING}")),
    }

    push_section(lines, "Growth strategy", report.growth_strategy.as_deref());
    push_section(lines, "Critic review", report.critic_review.as_deref());
}

fn push_section(lines: &mut Vec<String>, title: &str, body: Option<&str>) {
    lines.push(format!("{title}:"));
    match body {
        Some(text) => lines.extend(text.lines().map(|line| format!("  {line}"))),
        None => lines.push(format!("  {MISSING}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::{
        update, AgentAnalysis, AnalysisResult, AppState, Job, JobStatus, Msg,
    };
    use pretty_assertions::assert_eq;

    fn view_after(job: Job) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::InputChanged(job.product_url.clone()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(state, Msg::SubmissionSucceeded(job));
        state.view()
    }

    fn job(status: JobStatus) -> Job {
        Job {
            job_id: "abc".to_string(),
            product_url: "https://example.com/p/123".to_string(),
            status,
            analysis_result: None,
            error_message: None,
            created_at: "2026-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn highlights_current_step() {
        let lines = render(&view_after(job(JobStatus::Researching)));
        assert_eq!(
            lines[1],
            "  Steps:  [researching] > analyzed > optimized > completed"
        );
    }

    #[test]
    fn completed_report_lists_strategy_and_placeholders() {
        let mut done = job(JobStatus::Completed);
        done.analysis_result = Some(AnalysisResult {
            agent_analysis: Some(AgentAnalysis {
                growth_strategy: Some("Lower price 5%".to_string()),
                ..AgentAnalysis::default()
            }),
            ..AnalysisResult::default()
        });
        let lines = render(&view_after(done));

        let strategy = lines
            .iter()
            .position(|line| line == "Growth strategy:")
            .expect("strategy section");
        assert_eq!(lines[strategy + 1], "  Lower price 5%");
        assert!(lines.contains(&"Plan:".to_string()));
        assert!(lines.contains(&format!("  {MISSING}")));
    }

    #[test]
    fn submission_error_is_shown_verbatim() {
        let (state, _) = update(AppState::new(), Msg::InputChanged("bad".to_string()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::SubmissionFailed {
                message: "Invalid URL".to_string(),
            },
        );
        assert_eq!(render(&state.view()), vec!["Submission failed: Invalid URL"]);
    }
}
