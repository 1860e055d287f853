//! Two-phase evaluation: reference validation, then defect detection.

use serde::Serialize;
use thiserror::Error;

use super::candidate::ConstructionFailure;
use super::config::EvaluatorConfig;
use super::registry::{MutantRegistry, REFERENCE_INDEX, RegistryError};
use super::report::Reporter;
use super::suite::{SuiteExecutor, SuiteRunner, TestSuite};
use super::summary::{DefectOutcome, ExecutionSummary};

/// Fatal evaluation errors. Everything else is folded into the report.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Registry access failed (most commonly: never initialized).
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// A reference trial that produced at least one failing test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingTrial {
    /// 1-based trial number.
    pub trial: usize,
    /// Summary of that trial.
    pub summary: ExecutionSummary,
}

/// Phase A result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceOutcome {
    /// Reference candidate name.
    pub name: String,
    /// Trials configured.
    pub trials_requested: usize,
    /// Trials actually executed.
    pub trials_run: usize,
    /// Failing trials in execution order; at most one when failing fast.
    pub failing_trials: Vec<FailingTrial>,
    /// Why the reference could not be evaluated at all.
    pub unavailable: Option<String>,
}

impl ReferenceOutcome {
    /// True when the reference ran and never failed.
    pub fn passed(&self) -> bool {
        self.unavailable.is_none() && self.failing_trials.is_empty()
    }

    /// First failing trial, if any.
    pub fn first_failure(&self) -> Option<&FailingTrial> {
        self.failing_trials.first()
    }
}

/// Phase B result for one defect slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefectResult {
    /// Registry slot.
    pub index: usize,
    /// Candidate name.
    pub name: String,
    /// Classification.
    #[serde(flatten)]
    pub outcome: DefectOutcome,
}

/// Phase B result for every defect slot, in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DefectReport {
    /// Per-defect results.
    pub results: Vec<DefectResult>,
}

impl DefectReport {
    /// Number of defect slots (`N - 1`).
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Defects with at least one failing case.
    pub fn caught(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_caught()).count()
    }

    /// Defects that passed every case.
    pub fn escaped(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_escaped()).count()
    }

    /// Defect slots that were never constructed.
    pub fn not_constructed(&self) -> usize {
        self.total() - self.caught() - self.escaped()
    }

    /// Slot indices of escaped defects.
    pub fn escaped_indices(&self) -> Vec<usize> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_escaped())
            .map(|r| r.index)
            .collect()
    }

    /// True when every defect slot was caught.
    pub fn passed(&self) -> bool {
        self.caught() == self.total()
    }
}

/// Complete result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    /// Suite name.
    pub suite: String,
    /// Registry size, including unpopulated slots.
    pub candidates: usize,
    /// Phase A.
    pub reference: ReferenceOutcome,
    /// Phase B.
    pub defects: DefectReport,
    /// Slots that failed to construct.
    pub construction_failures: Vec<ConstructionFailure>,
}

impl EvaluationReport {
    /// Final verdict: reference clean in every trial and every defect caught.
    pub fn passed(&self) -> bool {
        self.reference.passed() && self.defects.passed()
    }

    /// True when at least one slot failed to construct.
    pub fn is_degraded(&self) -> bool {
        !self.construction_failures.is_empty()
    }
}

/// Drives the registry cursor and the suite executor through both phases.
///
/// The evaluator keeps no state between evaluations; it places the cursor explicitly
/// before every suite execution.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Evaluator with the given configuration.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate with the in-process [`SuiteRunner`].
    pub fn run<T: ?Sized>(
        &self,
        registry: &mut MutantRegistry<T>,
        suite: &TestSuite<T>,
        reporter: &mut dyn Reporter,
    ) -> Result<EvaluationReport, EvaluationError> {
        self.evaluate(registry, suite, &SuiteRunner, reporter)
    }

    /// Run Phase A then Phase B and announce the verdict.
    pub fn evaluate<T: ?Sized>(
        &self,
        registry: &mut MutantRegistry<T>,
        suite: &TestSuite<T>,
        executor: &dyn SuiteExecutor<T>,
        reporter: &mut dyn Reporter,
    ) -> Result<EvaluationReport, EvaluationError> {
        if registry.is_empty() {
            return Err(RegistryError::EmptyRegistry.into());
        }

        let construction_failures = registry.construction_failures().to_vec();
        if !construction_failures.is_empty() {
            reporter.degraded(&construction_failures);
        }

        let reference = self.validate_reference(registry, suite, executor, reporter)?;
        let defects = self.detect_defects(registry, suite, executor, reporter)?;

        let report = EvaluationReport {
            suite: suite.name().to_string(),
            candidates: registry.size(),
            reference,
            defects,
            construction_failures,
        };
        let passed = report.passed();
        tracing::info!(
            passed,
            caught = report.defects.caught(),
            escaped = report.defects.escaped(),
            "evaluation finished"
        );
        reporter.verdict(passed, self.config.art_path(passed).as_deref());
        Ok(report)
    }

    /// Phase A: run the suite against the reference candidate `trials` times.
    pub fn validate_reference<T: ?Sized>(
        &self,
        registry: &mut MutantRegistry<T>,
        suite: &TestSuite<T>,
        executor: &dyn SuiteExecutor<T>,
        reporter: &mut dyn Reporter,
    ) -> Result<ReferenceOutcome, EvaluationError> {
        if registry.is_empty() {
            return Err(RegistryError::EmptyRegistry.into());
        }

        let trials = self.config.trials.max(1);
        let name = registry
            .name(REFERENCE_INDEX)
            .unwrap_or("reference")
            .to_string();
        let _span = tracing::info_span!("reference_validation", trials).entered();
        reporter.reference_started(&name, trials);

        let mut outcome = ReferenceOutcome {
            name,
            trials_requested: trials,
            trials_run: 0,
            failing_trials: Vec::new(),
            unavailable: None,
        };

        if !registry.is_populated(REFERENCE_INDEX) {
            let reason = slot_failure_reason(registry, REFERENCE_INDEX);
            reporter.reference_unavailable(&outcome.name, &reason);
            outcome.unavailable = Some(reason);
            return Ok(outcome);
        }

        for trial in 1..=trials {
            registry.reset_cursor(REFERENCE_INDEX)?;
            let summary = executor.run(suite, registry)?;
            outcome.trials_run += 1;
            tracing::debug!(trial, failed = summary.failed_count(), "reference trial");

            if summary.failed_count() > 0 {
                reporter.reference_trial_failed(&outcome.name, trial, &summary);
                outcome.failing_trials.push(FailingTrial { trial, summary });
                if self.config.fail_fast_reference {
                    break;
                }
            }
        }

        reporter.reference_finished(&outcome);
        Ok(outcome)
    }

    /// Phase B: run the suite once against every defect candidate, in index order.
    pub fn detect_defects<T: ?Sized>(
        &self,
        registry: &mut MutantRegistry<T>,
        suite: &TestSuite<T>,
        executor: &dyn SuiteExecutor<T>,
        reporter: &mut dyn Reporter,
    ) -> Result<DefectReport, EvaluationError> {
        if registry.is_empty() {
            return Err(RegistryError::EmptyRegistry.into());
        }

        let defect_indices = registry.defect_indices();
        let _span =
            tracing::info_span!("defect_detection", defects = defect_indices.len()).entered();
        reporter.defects_started(defect_indices.len());

        let mut report = DefectReport::default();
        for index in defect_indices {
            let name = registry
                .name(index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("candidate-{index}"));
            reporter.defect_started(index, &name);

            let outcome = if registry.is_populated(index) {
                registry.reset_cursor(index)?;
                DefectOutcome::classify(executor.run(suite, registry)?)
            } else {
                DefectOutcome::NotConstructed {
                    reason: slot_failure_reason(registry, index),
                }
            };
            tracing::debug!(index, outcome = outcome.label(), "defect classified");

            let result = DefectResult {
                index,
                name,
                outcome,
            };
            reporter.defect_finished(&result);
            report.results.push(result);
        }

        reporter.defects_finished(&report);
        Ok(report)
    }
}

fn slot_failure_reason<T: ?Sized>(registry: &MutantRegistry<T>, index: usize) -> String {
    registry
        .construction_failures()
        .iter()
        .find(|failure| failure.index == index)
        .map(|failure| failure.reason.clone())
        .unwrap_or_else(|| "candidate was not constructed".to_string())
}
