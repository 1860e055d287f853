//! Human-facing narration on two channels, plus Markdown and JSON report rendering.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::candidate::ConstructionFailure;
use super::evaluator::{DefectReport, DefectResult, EvaluationReport, ReferenceOutcome};
use super::summary::{DefectOutcome, ExecutionSummary};

/// Output channel for narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Narrative and success messages.
    Normal,
    /// Anomalies: reference failures, escaped or missing defects.
    Attention,
}

/// Receives evaluation progress.
///
/// Implementors only need [`Reporter::emit`]; every hook has a default rendering that
/// routes lines to the appropriate channel.
pub trait Reporter {
    /// Write one line to `channel`.
    fn emit(&mut self, channel: Channel, line: &str);

    /// Write to the normal channel.
    fn normal(&mut self, line: &str) {
        self.emit(Channel::Normal, line);
    }

    /// Write to the attention channel.
    fn attention(&mut self, line: &str) {
        self.emit(Channel::Attention, line);
    }

    /// Some slots failed to construct; the run is degraded.
    fn degraded(&mut self, failures: &[ConstructionFailure]) {
        self.attention(&format!(
            "Degraded run: {} candidate(s) could not be constructed and will not be evaluated:",
            failures.len()
        ));
        for failure in failures {
            self.attention(&format!(
                " - slot {} ({}): {}",
                failure.index, failure.name, failure.reason
            ));
        }
    }

    /// Phase A is starting.
    fn reference_started(&mut self, name: &str, trials: usize) {
        self.normal(&format!("~~~~~~~~~~ Testing {name} ({trials} trial(s)): ~~~~~~~~~~"));
    }

    /// The reference slot was never constructed.
    fn reference_unavailable(&mut self, name: &str, reason: &str) {
        self.attention(&format!(
            "{name} could not be constructed ({reason}); reference validation fails."
        ));
    }

    /// A reference trial had failing test cases.
    fn reference_trial_failed(&mut self, name: &str, trial: usize, summary: &ExecutionSummary) {
        self.attention(&format!(
            "Uh oh. You caught {name} in trial {trial}, but it is the good mutant!"
        ));
        failed_cases(self, Channel::Attention, summary);
    }

    /// Phase A finished.
    fn reference_finished(&mut self, outcome: &ReferenceOutcome) {
        if outcome.passed() {
            self.normal(&format!(
                "{} passed all the tests in {} trial(s)!",
                outcome.name, outcome.trials_run
            ));
        } else if outcome.unavailable.is_none() {
            self.attention(&format!(
                "{} failed {} of {} trial(s).",
                outcome.name,
                outcome.failing_trials.len(),
                outcome.trials_run
            ));
        }
    }

    /// Phase B is starting.
    fn defects_started(&mut self, count: usize) {
        self.normal("");
        self.normal(&format!("~~~~~~~~~~ Testing the Mutants ({count}) ~~~~~~~~~~"));
    }

    /// A defect candidate is about to be executed.
    fn defect_started(&mut self, index: usize, name: &str) {
        self.normal("");
        self.normal(&format!("Testing Mutant {index}: {name}"));
    }

    /// A defect candidate was classified.
    fn defect_finished(&mut self, result: &DefectResult) {
        match &result.outcome {
            DefectOutcome::Caught { summary } => {
                self.normal(&format!(
                    "Mutant {} caught with the following test cases:",
                    result.index
                ));
                failed_cases(self, Channel::Normal, summary);
            }
            DefectOutcome::Escaped { .. } => {
                self.attention(&format!(
                    "Mutant {} ({}) made it out alive!",
                    result.index, result.name
                ));
            }
            DefectOutcome::NotConstructed { reason } => {
                self.attention(&format!(
                    "Mutant {} ({}) was not constructed and was skipped: {reason}",
                    result.index, result.name
                ));
            }
        }
    }

    /// Phase B finished.
    fn defects_finished(&mut self, report: &DefectReport) {
        self.normal(&format!(
            "Successfully caught {} out of {}",
            report.caught(),
            report.total()
        ));
    }

    /// Final verdict, followed by the decoration file if one is configured.
    fn verdict(&mut self, passed: bool, art: Option<&Path>) {
        self.normal("");
        if passed {
            self.normal("~~~~~~~ Good testing! YOU CAUGHT ALL THE BAD MUTANTS! ~~~~~~~");
        } else {
            self.normal("~~~~~~~ Oh no! The Sentinel caught the mutants before you did! ~~~~~~~");
        }
        self.normal("");

        if let Some(path) = art {
            match std::fs::read_to_string(path) {
                Ok(contents) => {
                    for line in contents.lines() {
                        self.normal(line);
                    }
                }
                Err(err) => {
                    self.attention(&format!(
                        "Couldn't read art file {}: {err}",
                        path.display()
                    ));
                }
            }
        }
    }
}

fn failed_cases<R>(reporter: &mut R, channel: Channel, summary: &ExecutionSummary)
where
    R: Reporter + ?Sized,
{
    reporter.emit(
        channel,
        &format!("Test cases failed ({}):", summary.failed_count()),
    );
    for failure in summary.failures() {
        reporter.emit(
            channel,
            &format!(" - {}: {}", failure.name, failure.message),
        );
    }
}

/// Normal channel to stdout, attention channel to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn emit(&mut self, channel: Channel, line: &str) {
        // A closed pipe must not abort the evaluation.
        let _ = match channel {
            Channel::Normal => writeln!(std::io::stdout(), "{line}"),
            Channel::Attention => writeln!(std::io::stderr(), "{line}"),
        };
    }
}

/// Keeps every emitted line in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    lines: Vec<(Channel, String)>,
}

impl RecordingReporter {
    /// All lines in emission order.
    pub fn lines(&self) -> &[(Channel, String)] {
        &self.lines
    }

    /// Lines sent to the normal channel.
    pub fn normal_lines(&self) -> Vec<&str> {
        self.channel_lines(Channel::Normal)
    }

    /// Lines sent to the attention channel.
    pub fn attention_lines(&self) -> Vec<&str> {
        self.channel_lines(Channel::Attention)
    }

    fn channel_lines(&self, channel: Channel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn emit(&mut self, channel: Channel, line: &str) {
        self.lines.push((channel, line.to_string()));
    }
}

/// Supported output formats for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown summary.
    Markdown,
    /// JSON with every phase result inline.
    Json,
}

/// Report rendering errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Aggregated evaluation counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    /// Registry size.
    pub candidates: usize,
    /// Final verdict.
    pub passed: bool,
    /// Reference verdict.
    pub reference_passed: bool,
    /// Reference trials executed.
    pub trials_run: usize,
    /// Reference trials configured.
    pub trials_requested: usize,
    /// Defect slots.
    pub defects: usize,
    /// Caught defects.
    pub caught: usize,
    /// Escaped defects.
    pub escaped: usize,
    /// Unconstructed defect slots.
    pub not_constructed: usize,
    /// Caught / defect slots, percentage.
    pub detection_score: f64,
}

impl EvaluationSummary {
    /// Build summary from a report.
    pub fn from_report(report: &EvaluationReport) -> Self {
        let defects = report.defects.total();
        let caught = report.defects.caught();
        let detection_score = if defects > 0 {
            (caught as f64) * 100.0 / (defects as f64)
        } else {
            100.0
        };

        Self {
            candidates: report.candidates,
            passed: report.passed(),
            reference_passed: report.reference.passed(),
            trials_run: report.reference.trials_run,
            trials_requested: report.reference.trials_requested,
            defects,
            caught,
            escaped: report.defects.escaped(),
            not_constructed: report.defects.not_constructed(),
            detection_score,
        }
    }
}

/// Render an evaluation report in the requested format.
pub fn render_report(
    report: &EvaluationReport,
    format: ReportFormat,
) -> Result<String, ReportError> {
    let summary = EvaluationSummary::from_report(report);

    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "suite": report.suite,
            "passed": summary.passed,
            "degraded": report.is_degraded(),
            "summary": summary,
            "reference": report.reference,
            "defects": report.defects.results,
            "construction_failures": report.construction_failures,
        }))?),
        ReportFormat::Markdown => {
            let mut out = format!("# Mutant Evaluation: {}\n\n", report.suite);
            out.push_str(&format!(
                "- verdict: {}\n- candidates: {}\n- degraded: {}\n\n",
                if summary.passed { "success" } else { "failure" },
                summary.candidates,
                report.is_degraded()
            ));

            out.push_str("## Reference Validation\n\n");
            out.push_str(&format!(
                "- candidate: {}\n- trials: {}/{}\n- passed: {}\n",
                report.reference.name,
                summary.trials_run,
                summary.trials_requested,
                summary.reference_passed
            ));
            if let Some(reason) = &report.reference.unavailable {
                out.push_str(&format!("- unavailable: {reason}\n"));
            }
            for failing in &report.reference.failing_trials {
                out.push_str(&format!(
                    "\n### Trial {} failed ({} of {})\n\n",
                    failing.trial,
                    failing.summary.failed_count(),
                    failing.summary.tests_run()
                ));
                for failure in failing.summary.failures() {
                    out.push_str(&format!("- `{}`: {}\n", failure.name, failure.message));
                }
            }

            out.push_str("\n## Defect Detection\n\n");
            out.push_str(&format!(
                "- caught: {}\n- escaped: {}\n- not constructed: {}\n- detection score: {:.2}%\n\n",
                summary.caught, summary.escaped, summary.not_constructed, summary.detection_score
            ));
            out.push_str("| Index | Mutant | Status | Failed cases |\n");
            out.push_str("|-------|--------|--------|--------------|\n");
            for result in &report.defects.results {
                let failed = result
                    .outcome
                    .summary()
                    .map(|s| s.failed_names().join(", "))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    result.index,
                    result.name,
                    result.outcome.label(),
                    failed
                ));
            }
            Ok(out)
        }
    }
}
