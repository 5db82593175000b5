use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use growth_core::{AppViewModel, ControllerPhase, JobStatus, Msg};
use growth_engine::{EngineHandle, Session};
use growth_logging::{growth_info, growth_warn};

use super::ui;
use crate::cli::{Args, Command};

/// How long one pump waits for engine events before re-checking the phase.
const PUMP_INTERVAL: Duration = Duration::from_millis(200);

pub fn run_app(args: &Args) -> anyhow::Result<ExitCode> {
    let settings = args.client_settings();
    let engine = EngineHandle::with_client(&settings, args.poll_settings())
        .with_context(|| format!("cannot use API base URL {:?}", settings.base_url))?;
    growth_info!("Using API at {}", settings.base_url);

    let mut session = Session::new(engine);
    let mut screen = Screen::default();

    let initial = match &args.command {
        Command::Analyze { product_url } => {
            session.dispatch(Msg::InputChanged(product_url.clone()));
            session.dispatch(Msg::SubmitClicked)
        }
        Command::Watch { job_id } => session.dispatch(Msg::AttachJob {
            job_id: job_id.clone(),
        }),
    };
    if let Some(view) = initial {
        screen.show(&view);
    }

    while matches!(
        session.state().phase(),
        ControllerPhase::Submitting | ControllerPhase::Polling
    ) {
        if let Some(view) = session.pump(PUMP_INTERVAL)? {
            screen.show(&view);
        }
    }

    let view = session.state().view();
    let final_job = session.state().job().cloned();
    session.tear_down();

    if args.json {
        if let Some(job) = &final_job {
            println!("{}", serde_json::to_string_pretty(job)?);
        }
    }

    Ok(exit_code(&view, final_job.map(|job| job.status)))
}

fn exit_code(view: &AppViewModel, status: Option<JobStatus>) -> ExitCode {
    match status {
        Some(JobStatus::Completed) => ExitCode::SUCCESS,
        Some(status) => {
            growth_warn!("Job ended with status {}", status);
            ExitCode::FAILURE
        }
        None => {
            match &view.submission_error {
                Some(error) => growth_warn!("Submission rejected: {}", error),
                None => eprintln!("Nothing to submit."),
            }
            ExitCode::from(2)
        }
    }
}

/// Prints a view only when its rendering differs from the last one printed.
#[derive(Default)]
struct Screen {
    last: Vec<String>,
}

impl Screen {
    fn show(&mut self, view: &AppViewModel) {
        let lines = ui::render::render(view);
        if lines.is_empty() || lines == self.last {
            return;
        }
        for line in &lines {
            println!("{line}");
        }
        println!();
        self.last = lines;
    }
}
