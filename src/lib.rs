//! # revealing-mutants
//!
//! `revealing-mutants` scores a test suite by running it against one correct
//! implementation and a catalog of deliberately broken ones:
//! - `harness`: candidate registry, suite runner, two-phase evaluator, reporting
//! - `third_shortest`: the bundled target contract, its reference, mutants, and suites
//! - `generators`: proptest strategies for word-list inputs
//!
//! A suite passes when the reference survives every trial and every mutant fails at
//! least one test case.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod generators;
pub mod harness;
pub mod prelude;
pub mod third_shortest;

/// Re-export `proptest` for convenience.
pub use proptest;
