//! Revealer suites for [`ThirdShortest`].
//!
//! [`revealer_suite`] is the two-case starter battery and lets most defects escape.
//! [`full_revealer_suite`] extends it until every catalogued defect is caught while
//! still tolerating the reference's random choice among tied words.

use super::{InvalidInput, ThirdShortest};
use crate::harness::{CaseResult, TestSuite, expect_eq, expect_err, expect_none, expect_one_of};

fn answer(word: &str) -> Result<Option<String>, InvalidInput> {
    Ok(Some(word.to_string()))
}

fn no_answer(result: Result<Option<String>, InvalidInput>) -> CaseResult {
    result
        .map_err(|err| format!("unexpected error: {err}"))
        .and_then(expect_none)
}

/// Starter suite: one happy path and one rejected input.
pub fn revealer_suite() -> TestSuite<dyn ThirdShortest> {
    TestSuite::<dyn ThirdShortest>::new("third_shortest_starter")
        .with_case("third_tier_of_three_words", |c| {
            expect_eq(c.third_shortest(Some(&["a", "ab", "abc"])), answer("abc"))
        })
        .with_case("rejects_single_word", |c| {
            expect_err(c.third_shortest(Some(&["a"])))
        })
}

/// Starter cases plus the edge cases needed to reveal every catalogued defect.
pub fn full_revealer_suite() -> TestSuite<dyn ThirdShortest> {
    TestSuite::<dyn ThirdShortest>::new("third_shortest_full")
        .with_case("third_tier_of_three_words", |c| {
            expect_eq(c.third_shortest(Some(&["a", "ab", "abc"])), answer("abc"))
        })
        .with_case("rejects_single_word", |c| {
            expect_err(c.third_shortest(Some(&["a"])))
        })
        .with_case("rejects_missing_input", |c| {
            expect_eq(c.third_shortest(None), Err(InvalidInput::Missing))
        })
        .with_case("rejects_two_words", |c| {
            expect_err(c.third_shortest(Some(&["a", "ab"])))
        })
        .with_case("tied_third_tier_allows_any_member", |c| {
            expect_one_of(
                c.third_shortest(Some(&["a", "b", "bc", "ab", "bye", "and"])),
                &[answer("bye"), answer("and")],
            )
        })
        .with_case("duplicates_do_not_add_tiers", |c| {
            no_answer(c.third_shortest(Some(&["a", "a", "a"])))?;
            no_answer(c.third_shortest(Some(&["a", "a", "ab"])))
        })
        .with_case("no_third_tier_returns_none", |c| {
            no_answer(c.third_shortest(Some(&["a", "ab", "ab"])))
        })
        .with_case("counts_characters_not_bytes", |c| {
            expect_eq(
                c.third_shortest(Some(&["é", "ab", "abc", "abcd"])),
                answer("abc"),
            )
        })
        .with_case("whitespace_counts_toward_length", |c| {
            expect_eq(c.third_shortest(Some(&["a", "bb", " c "])), answer(" c "))
        })
        .with_case("empty_string_is_a_tier", |c| {
            expect_eq(c.third_shortest(Some(&["", "a", "ab"])), answer("ab"))
        })
        .with_case("long_input_scanned_entirely", |c| {
            expect_eq(
                c.third_shortest(Some(&["a", "a", "a", "a", "a", "ab", "abc"])),
                answer("abc"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{
        DEFAULT_TRIALS, EvaluatorConfig, Evaluator, MutantRegistry, RecordingReporter,
    };
    use crate::third_shortest::{mutants, provider};

    fn evaluate(suite: &TestSuite<dyn ThirdShortest>) -> crate::harness::EvaluationReport {
        let (mut registry, failures) = MutantRegistry::from_provider(&provider());
        assert!(failures.is_empty(), "catalog constructors never fail");
        Evaluator::new(EvaluatorConfig::default())
            .run(&mut registry, suite, &mut RecordingReporter::default())
            .expect("populated registry should evaluate")
    }

    fn slot(name: &str) -> usize {
        provider().index_of(name).expect("catalogued mutant")
    }

    #[test]
    fn full_suite_catches_every_defect_and_spares_the_reference() {
        let report = evaluate(&full_revealer_suite());
        assert!(report.reference.passed());
        assert_eq!(report.reference.trials_run, DEFAULT_TRIALS);
        assert_eq!(report.defects.total(), mutants::CATALOG.len());
        assert_eq!(report.defects.escaped_indices(), Vec::<usize>::new());
        assert!(report.passed());
    }

    #[test]
    fn starter_suite_lets_defects_escape() {
        let report = evaluate(&revealer_suite());
        assert!(report.reference.passed());
        assert!(!report.passed());

        let escaped = report.defects.escaped_indices();
        for name in ["accepts_two_words", "panics_on_missing", "byte_length"] {
            assert!(escaped.contains(&slot(name)), "{name} should escape the starter suite");
        }
        for name in ["returns_shortest", "third_longest", "rejects_three_words"] {
            assert!(!escaped.contains(&slot(name)), "{name} should be caught");
        }
    }

    #[test]
    fn full_suite_extends_the_starter_suite() {
        let starter = revealer_suite();
        let full = full_revealer_suite();
        assert_eq!(full.case_names()[..starter.len()], starter.case_names()[..]);
    }

    #[test]
    fn panicking_mutant_is_caught_by_name() {
        let (mut registry, _) = MutantRegistry::from_provider(&provider());
        let report = Evaluator::new(EvaluatorConfig::default().with_trials(1))
            .run(&mut registry, &full_revealer_suite(), &mut RecordingReporter::default())
            .expect("populated registry should evaluate");
        let result = &report.defects.results[slot("panics_on_missing") - 1];
        let summary = result.outcome.summary().expect("constructed mutants have summaries");
        assert_eq!(summary.failed_names(), vec!["rejects_missing_input"]);
        assert!(summary.failures()[0].message.starts_with("panicked:"));
    }
}
