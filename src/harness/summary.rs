//! Execution summaries and per-candidate classification outcomes.

use serde::{Deserialize, Serialize};

/// One failing test case and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCase {
    /// Test case name.
    pub name: String,
    /// Assertion message or caught panic payload.
    pub message: String,
}

/// Result of one full pass of a test suite against one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSummary")]
pub struct ExecutionSummary {
    tests_run: usize,
    failures: Vec<FailedCase>,
}

#[derive(Deserialize)]
struct RawSummary {
    tests_run: usize,
    failures: Vec<FailedCase>,
}

impl From<RawSummary> for ExecutionSummary {
    fn from(raw: RawSummary) -> Self {
        Self::new(raw.tests_run, raw.failures)
    }
}

impl ExecutionSummary {
    /// Build a summary. `tests_run` is raised to the failure count if it is smaller,
    /// so the failed count never exceeds the executed count.
    pub fn new(tests_run: usize, failures: Vec<FailedCase>) -> Self {
        Self {
            tests_run: tests_run.max(failures.len()),
            failures,
        }
    }

    /// Summary of a run in which every case passed.
    pub fn passing(tests_run: usize) -> Self {
        Self::new(tests_run, Vec::new())
    }

    /// Number of test cases executed.
    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    /// Number of failed test cases.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of passed test cases.
    pub fn passed_count(&self) -> usize {
        self.tests_run.saturating_sub(self.failures.len())
    }

    /// Failed test cases in suite order.
    pub fn failures(&self) -> &[FailedCase] {
        &self.failures
    }

    /// Names of failed test cases in suite order.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }

    /// True when no test case failed.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Phase B classification of one defect candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DefectOutcome {
    /// At least one test case failed.
    Caught {
        /// Summary of the single execution.
        summary: ExecutionSummary,
    },
    /// Every test case passed.
    Escaped {
        /// Summary of the single execution.
        summary: ExecutionSummary,
    },
    /// The slot never held a candidate; it was not executed.
    NotConstructed {
        /// Construction failure detail.
        reason: String,
    },
}

impl DefectOutcome {
    /// Classify an execution summary.
    pub fn classify(summary: ExecutionSummary) -> Self {
        if summary.failed_count() > 0 {
            Self::Caught { summary }
        } else {
            Self::Escaped { summary }
        }
    }

    /// True for [`DefectOutcome::Caught`].
    pub fn is_caught(&self) -> bool {
        matches!(self, Self::Caught { .. })
    }

    /// True for [`DefectOutcome::Escaped`].
    pub fn is_escaped(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }

    /// Execution summary, when the candidate was executed.
    pub fn summary(&self) -> Option<&ExecutionSummary> {
        match self {
            Self::Caught { summary } | Self::Escaped { summary } => Some(summary),
            Self::NotConstructed { .. } => None,
        }
    }

    /// Stable lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Caught { .. } => "caught",
            Self::Escaped { .. } => "escaped",
            Self::NotConstructed { .. } => "not_constructed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(name: &str) -> FailedCase {
        FailedCase {
            name: name.to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn failed_count_never_exceeds_tests_run() {
        let summary = ExecutionSummary::new(1, vec![failure("a"), failure("b")]);
        assert_eq!(summary.tests_run(), 2);
        assert_eq!(summary.failed_count(), 2);
        assert_eq!(summary.passed_count(), 0);
    }

    #[test]
    fn deserialized_summary_keeps_failed_within_tests_run() {
        let summary: ExecutionSummary = serde_json::from_str(
            r#"{"tests_run":0,"failures":[{"name":"a","message":"m"}]}"#,
        )
        .expect("summary should deserialize");
        assert_eq!(summary.tests_run(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.passed_count(), 0);
    }

    #[test]
    fn classify_uses_failed_count() {
        let caught = DefectOutcome::classify(ExecutionSummary::new(3, vec![failure("x")]));
        assert!(caught.is_caught());
        assert_eq!(caught.label(), "caught");
        assert_eq!(
            caught.summary().map(ExecutionSummary::failed_names),
            Some(vec!["x"])
        );

        let escaped = DefectOutcome::classify(ExecutionSummary::passing(3));
        assert!(escaped.is_escaped());
        assert_eq!(escaped.label(), "escaped");

        let missing = DefectOutcome::NotConstructed {
            reason: "nope".to_string(),
        };
        assert!(missing.summary().is_none());
        assert!(!missing.is_caught() && !missing.is_escaped());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(DefectOutcome::classify(ExecutionSummary::passing(2)))
            .expect("outcome should serialize");
        assert_eq!(json["status"], "escaped");
        assert_eq!(json["summary"]["tests_run"], 2);
    }
}
