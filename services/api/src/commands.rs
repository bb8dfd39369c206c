use crate::infra::{build_context, read_correspondence};
use clap::Args;
use leave_intel::config::AppConfig;
use leave_intel::error::AppError;
use leave_intel::intelligence::{
    LeaveIntelligence, LeaveRequestDraft, OutcomeAssessment, ScoreComponent,
};
use leave_intel::telemetry;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ExtractArgs {
    /// Sender address used to identify the employee
    #[arg(long)]
    pub(crate) sender: String,
    /// Read the correspondence from a file
    #[arg(long, conflicts_with = "text")]
    pub(crate) file: Option<PathBuf>,
    /// Correspondence passed inline (stdin is read when neither flag is given)
    #[arg(long)]
    pub(crate) text: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding a leave request draft
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Also print the rule-by-rule breakdown of the local scoring table
    #[arg(long)]
    pub(crate) explain: bool,
}

/// Assessment paired with the local rule breakdown for the same draft.
#[derive(Debug, Serialize)]
pub(crate) struct ExplainedAssessment<'a> {
    pub(crate) assessment: &'a OutcomeAssessment,
    pub(crate) breakdown: Vec<ScoreComponent>,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Free-form question about the leave process
    pub(crate) query: String,
    /// Employee name used to address the reply
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Remaining leave balance in days
    #[arg(long)]
    pub(crate) balance: Option<u32>,
    /// Number of pending leave requests
    #[arg(long)]
    pub(crate) pending: Option<u32>,
}

pub(crate) async fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let engine = engine_from_env()?;
    let text = read_correspondence(args.text, args.file.as_deref())?;

    let draft = engine.extract(&text, &args.sender).await;
    print_json(&draft)
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read(&args.file).map_err(|err| {
        AppError::Input(format!("cannot read draft from {}: {err}", args.file.display()))
    })?;
    let draft: LeaveRequestDraft = serde_json::from_slice(&raw)?;
    draft.validate().map_err(AppError::Input)?;

    let engine = engine_from_env()?;
    let assessment = engine.assess(&draft).await;
    if args.explain {
        print_json(&explain_assessment(&engine, &draft, &assessment))
    } else {
        print_json(&assessment)
    }
}

pub(crate) fn explain_assessment<'a>(
    engine: &LeaveIntelligence,
    draft: &LeaveRequestDraft,
    assessment: &'a OutcomeAssessment,
) -> ExplainedAssessment<'a> {
    ExplainedAssessment {
        assessment,
        breakdown: engine.scorer().explain(draft),
    }
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let engine = engine_from_env()?;
    let context = build_context(args.name, args.balance, args.pending);

    let reply = engine.respond(&args.query, context.as_ref()).await;
    print_json(&reply)
}

fn engine_from_env() -> Result<LeaveIntelligence, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(LeaveIntelligence::from_config(&config.inference)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leave_intel::intelligence::HeuristicExtractor;

    fn long_sick_draft() -> LeaveRequestDraft {
        HeuristicExtractor::new().extract(
            "sick leave from 01/07/2024 to 20/07/2024. Reason: surgery",
            "paula@rrhh.gob.ar",
        )
    }

    #[tokio::test]
    async fn explained_assessment_lists_each_applied_rule() {
        let engine = LeaveIntelligence::local_only();
        let draft = long_sick_draft();
        let assessment = engine.assess(&draft).await;

        let report = serde_json::to_value(explain_assessment(&engine, &draft, &assessment))
            .expect("serialize report");

        assert_eq!(report["assessment"]["approval_probability"], 75.0);
        let rules: Vec<&str> = report["breakdown"]
            .as_array()
            .expect("breakdown is an array")
            .iter()
            .filter_map(|component| component["rule"].as_str())
            .collect();
        assert_eq!(rules, vec!["long_duration", "stated_motive"]);
        assert!(report["breakdown"][0]["notes"]
            .as_str()
            .is_some_and(|notes| notes.contains("20 days")));
    }

    #[tokio::test]
    async fn missing_draft_file_is_an_input_error() {
        let error = run_assess(AssessArgs {
            file: PathBuf::from("/nonexistent/draft.json"),
            explain: false,
        })
        .await
        .expect_err("file does not exist");

        assert!(matches!(error, AppError::Input(_)));
    }
}
