//! Evaluation configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Reference-validation repetitions used when none are configured.
pub const DEFAULT_TRIALS: usize = 25;
/// Decoration file shown after a successful verdict.
pub const DEFAULT_SUCCESS_ART: &str = "xmen.txt";
/// Decoration file shown after a failed verdict.
pub const DEFAULT_FAILURE_ART: &str = "sentinel.txt";

/// Configuration for an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Number of reference-validation trials (at least 1).
    pub trials: usize,
    /// Stop reference validation at the first failing trial.
    pub fail_fast_reference: bool,
    /// Directory decoration files are resolved against. `None` disables decorations.
    pub art_dir: Option<PathBuf>,
    /// Decoration file shown after a successful verdict.
    pub success_art: PathBuf,
    /// Decoration file shown after a failed verdict.
    pub failure_art: PathBuf,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            fail_fast_reference: true,
            art_dir: None,
            success_art: PathBuf::from(DEFAULT_SUCCESS_ART),
            failure_art: PathBuf::from(DEFAULT_FAILURE_ART),
        }
    }
}

impl EvaluatorConfig {
    /// Set trial count; zero is raised to one.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials.max(1);
        self
    }

    /// Run every reference trial even after a failure.
    pub fn with_fail_fast_reference(mut self, fail_fast: bool) -> Self {
        self.fail_fast_reference = fail_fast;
        self
    }

    /// Set decoration directory.
    pub fn with_art_dir(mut self, art_dir: impl Into<PathBuf>) -> Self {
        self.art_dir = Some(art_dir.into());
        self
    }

    /// Set success decoration file name.
    pub fn with_success_art(mut self, path: impl Into<PathBuf>) -> Self {
        self.success_art = path.into();
        self
    }

    /// Set failure decoration file name.
    pub fn with_failure_art(mut self, path: impl Into<PathBuf>) -> Self {
        self.failure_art = path.into();
        self
    }

    /// Resolved decoration path for a verdict, if decorations are enabled.
    pub fn art_path(&self, success: bool) -> Option<PathBuf> {
        let file = if success {
            &self.success_art
        } else {
            &self.failure_art
        };
        self.art_dir.as_ref().map(|dir| dir.join(file))
    }
}
