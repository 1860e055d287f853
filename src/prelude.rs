//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use revealing_mutants::prelude::*;
//!
//! let (mut registry, _) = MutantRegistry::from_provider(&third_shortest::provider());
//! let report = Evaluator::new(EvaluatorConfig::default().with_trials(3))
//!     .run(&mut registry, &full_revealer_suite(), &mut RecordingReporter::default())
//!     .expect("registry is populated");
//! assert!(report.passed());
//! ```

pub use proptest::prelude::*;

pub use crate::generators::words::{maybe_word_list, short_word, word_list};
pub use crate::harness::{
    CandidateProvider, CaseResult, Channel, ConsoleReporter, Constructor, DefectOutcome,
    EvaluationReport, EvaluationSummary, Evaluator, EvaluatorConfig, ExecutionSummary,
    MutantRegistry, RecordingReporter, ReportFormat, Reporter, StaticProvider, SuiteExecutor,
    SuiteRunner, TestSuite, expect_eq, expect_err, expect_none, expect_one_of, expect_that,
    render_report,
};
pub use crate::third_shortest::{
    self, InvalidInput, ThirdShortest, Wolverine, full_revealer_suite, revealer_suite,
};
