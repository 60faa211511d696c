use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use kira_assessment_results::input::load_snapshot;
use kira_assessment_results::logging::init_logging;
use kira_assessment_results::report::text::render_report_text;
use kira_assessment_results::store::FileResultStore;
use kira_assessment_results::{
    RecomputeOutcome, RecomputeService, RecomputeTrigger, ResultStore, ScoringThresholds,
};

#[derive(Debug, Parser)]
#[command(name = "kira-assessment", version, about = "Multi-rater assessment results engine")]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute results for an assessment snapshot and store them.
    Compute {
        /// Snapshot JSON: template, responses, invitations, optional prior.
        #[arg(long)]
        input: PathBuf,
        /// Directory holding one result file per assessment.
        #[arg(long)]
        store: PathBuf,
        #[arg(long, value_enum, default_value_t = TriggerArg::Response)]
        trigger: TriggerArg,
        /// Threshold overrides as JSON; missing keys keep their defaults.
        #[arg(long)]
        thresholds: Option<PathBuf>,
        /// Also write the plain-text report here.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the text report of a stored result.
    Show {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        assessment: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TriggerArg {
    Response,
    Recompute,
}

impl From<TriggerArg> for RecomputeTrigger {
    fn from(value: TriggerArg) -> Self {
        match value {
            TriggerArg::Response => RecomputeTrigger::ResponseSubmitted,
            TriggerArg::Recompute => RecomputeTrigger::ExplicitRequest,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Compute {
            input,
            store,
            trigger,
            thresholds,
            report,
        } => compute(&input, &store, trigger.into(), thresholds.as_deref(), report.as_deref()),
        Command::Show { store, assessment } => show(&store, &assessment),
    }
}

fn compute(
    input: &Path,
    store: &Path,
    trigger: RecomputeTrigger,
    thresholds: Option<&Path>,
    report: Option<&Path>,
) -> Result<(), String> {
    let thresholds = match thresholds {
        Some(path) => ScoringThresholds::load(path).map_err(|e| e.to_string())?,
        None => ScoringThresholds::default_v1(),
    };
    let snapshot = load_snapshot(input).map_err(|e| e.to_string())?;
    let store = FileResultStore::open(store).map_err(|e| e.to_string())?;
    let service = RecomputeService::new(store, thresholds);

    match service
        .recompute(trigger, &snapshot)
        .map_err(|e| e.to_string())?
    {
        RecomputeOutcome::Written(results) => {
            if let Some(path) = report {
                let text = render_report_text(&snapshot.assessment_id, &results);
                std::fs::write(path, text)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            }
            println!(
                "{}: overall {:.2}, {} competencies, {} gap entries",
                snapshot.assessment_id,
                results.overall_score,
                results.competency_scores.len(),
                results.gap_analysis.len()
            );
        }
        RecomputeOutcome::Superseded { stored_at } => {
            println!(
                "{}: newer result from {} already stored",
                snapshot.assessment_id,
                stored_at.to_rfc3339()
            );
        }
    }
    Ok(())
}

fn show(store: &Path, assessment: &str) -> Result<(), String> {
    let store = FileResultStore::open(store).map_err(|e| e.to_string())?;
    let results = store
        .load(assessment)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("results unavailable for {assessment}"))?;
    print!("{}", render_report_text(assessment, &results));
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
