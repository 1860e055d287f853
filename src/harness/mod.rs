//! Mutant evaluation harness: registry, suite runner, two-phase evaluator, reporting.

pub mod candidate;
pub mod config;
pub mod evaluator;
pub mod registry;
pub mod report;
pub mod suite;
pub mod summary;

pub use candidate::{CandidateProvider, ConstructionFailure, Constructor, StaticProvider};
pub use config::{DEFAULT_TRIALS, EvaluatorConfig};
pub use evaluator::{
    DefectReport, DefectResult, EvaluationError, EvaluationReport, Evaluator, FailingTrial,
    ReferenceOutcome,
};
pub use registry::{MutantRegistry, REFERENCE_INDEX, RegistryError};
pub use report::{
    Channel, ConsoleReporter, EvaluationSummary, RecordingReporter, ReportError, ReportFormat,
    Reporter, render_report,
};
pub use suite::{
    CaseResult, SuiteExecutor, SuiteRunner, TestCase, TestSuite, expect_eq, expect_err,
    expect_none, expect_one_of, expect_that,
};
pub use summary::{DefectOutcome, ExecutionSummary, FailedCase};
