use growth_core::{Job, JobStatus};
use serde_json::json;

#[test]
fn parses_job_with_nested_nulls() {
    let body = json!({
        "job_id": "abc",
        "product_url": "https://example.com/p/123",
        "status": "completed",
        "analysis_result": {
            "plan": null,
            "raw_research": ["snippet one", "snippet two"],
            "agent_analysis": {
                "metrics": {"price_index": 0.93},
                "growth_strategy": "Lower price 5%",
                "critic_review": null
            }
        },
        "error_message": null,
        "created_at": "2026-01-01T00:00:00"
    });

    let job: Job = serde_json::from_value(body).expect("job parses");
    assert_eq!(job.status, JobStatus::Completed);
    let result = job.completed_result().expect("result");
    assert_eq!(result.plan, None);
    assert_eq!(result.raw_research.as_ref().map(Vec::len), Some(2));
    let analysis = result.agent_analysis.as_ref().expect("analysis");
    assert_eq!(analysis.metrics, Some(json!({"price_index": 0.93})));
    assert_eq!(analysis.critic_review, None);
}

#[test]
fn optional_fields_may_be_absent() {
    let body = json!({
        "job_id": "abc",
        "product_url": "https://example.com/p/123",
        "status": "pending",
        "created_at": "2026-01-01T00:00:00"
    });

    let job: Job = serde_json::from_value(body).expect("job parses");
    assert!(!job.is_terminal());
    assert!(job.analysis_result.is_none());
    assert!(job.completed_result().is_none());
}

#[test]
fn unknown_status_is_rejected() {
    let body = json!({
        "job_id": "abc",
        "product_url": "https://example.com/p/123",
        "status": "paused",
        "created_at": "2026-01-01T00:00:00"
    });

    assert!(serde_json::from_value::<Job>(body).is_err());
}

#[test]
fn terminal_statuses() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(!JobStatus::Optimized.is_terminal());
    assert_eq!(JobStatus::Analyzed.to_string(), "analyzed");
}
