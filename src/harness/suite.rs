//! Named test suites and the runner that executes them against the current candidate.

use std::any::Any;
use std::cell::Cell;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use super::registry::{MutantRegistry, RegistryError};
use super::summary::{ExecutionSummary, FailedCase};

/// Outcome of a single test case: `Err` carries the assertion message.
pub type CaseResult = Result<(), String>;

type CaseBody<T> = Box<dyn Fn(&T) -> CaseResult>;

/// One named assertion against a candidate.
pub struct TestCase<T: ?Sized> {
    name: String,
    body: CaseBody<T>,
}

impl<T: ?Sized> TestCase<T> {
    /// Create a test case.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&T) -> CaseResult + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    /// Test case name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute against `candidate`, turning panics into failures.
    ///
    /// The panic hook stays silent for this thread while the case runs; the payload
    /// is kept in the returned message instead.
    pub fn execute(&self, candidate: &T) -> CaseResult {
        let _quiet = QuietPanics::enter();
        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)(candidate))) {
            Ok(result) => result,
            Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
        }
    }
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Suppresses the process panic hook on the current thread until dropped.
struct QuietPanics {
    previous: bool,
}

impl QuietPanics {
    fn enter() -> Self {
        QUIET_HOOK.call_once(|| {
            let hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !QUIET_PANICS.with(Cell::get) {
                    hook(info);
                }
            }));
        });
        Self {
            previous: QUIET_PANICS.replace(true),
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        QUIET_PANICS.set(self.previous);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Fixed, ordered battery of test cases.
pub struct TestSuite<T: ?Sized> {
    name: String,
    cases: Vec<TestCase<T>>,
}

impl<T: ?Sized> TestSuite<T> {
    /// Empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a test case.
    pub fn with_case<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&T) -> CaseResult + 'static,
    {
        self.cases.push(TestCase::new(name, body));
        self
    }

    /// Suite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Test cases in execution order.
    pub fn cases(&self) -> &[TestCase<T>] {
        &self.cases
    }

    /// Test case names in execution order.
    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    /// Number of test cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when the suite has no test cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<T: ?Sized> Debug for TestSuite<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("cases", &self.case_names())
            .finish()
    }
}

/// Executes a suite against whichever candidate the registry currently selects.
pub trait SuiteExecutor<T: ?Sized> {
    /// Run every case of `suite` against `registry.current()`.
    fn run(
        &self,
        suite: &TestSuite<T>,
        registry: &MutantRegistry<T>,
    ) -> Result<ExecutionSummary, RegistryError>;
}

/// Stateless in-process runner.
///
/// Case failures and panics are folded into the summary; the runner always finishes
/// the suite. A candidate that never returns hangs the runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuiteRunner;

impl<T: ?Sized> SuiteExecutor<T> for SuiteRunner {
    fn run(
        &self,
        suite: &TestSuite<T>,
        registry: &MutantRegistry<T>,
    ) -> Result<ExecutionSummary, RegistryError> {
        let candidate = registry.current()?;
        let mut failures = Vec::new();

        for case in suite.cases() {
            if let Err(message) = case.execute(candidate) {
                tracing::debug!(
                    cursor = registry.cursor(),
                    case = case.name(),
                    %message,
                    "test case failed"
                );
                failures.push(FailedCase {
                    name: case.name().to_string(),
                    message,
                });
            }
        }

        Ok(ExecutionSummary::new(suite.len(), failures))
    }
}

/// Fail unless `actual == expected`.
pub fn expect_eq<V>(actual: V, expected: V) -> CaseResult
where
    V: PartialEq + Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}

/// Fail unless `actual` equals one of `allowed`.
pub fn expect_one_of<V>(actual: V, allowed: &[V]) -> CaseResult
where
    V: PartialEq + Debug,
{
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(format!("expected one of {allowed:?}, got {actual:?}"))
    }
}

/// Fail unless `result` is an error.
pub fn expect_err<V, E>(result: Result<V, E>) -> CaseResult
where
    V: Debug,
{
    match result {
        Ok(value) => Err(format!("expected an error, got Ok({value:?})")),
        Err(_) => Ok(()),
    }
}

/// Fail unless `actual` is `None`.
pub fn expect_none<V>(actual: Option<V>) -> CaseResult
where
    V: Debug,
{
    match actual {
        None => Ok(()),
        Some(value) => Err(format!("expected None, got Some({value:?})")),
    }
}

/// Fail unless `condition` holds.
pub fn expect_that(condition: bool, message: impl Into<String>) -> CaseResult {
    if condition { Ok(()) } else { Err(message.into()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::candidate::StaticProvider;

    trait Counter {
        fn count(&self, input: &str) -> usize;
    }

    struct Chars;
    struct Bytes;
    struct Exploding;

    impl Counter for Chars {
        fn count(&self, input: &str) -> usize {
            input.chars().count()
        }
    }

    impl Counter for Bytes {
        fn count(&self, input: &str) -> usize {
            input.len()
        }
    }

    impl Counter for Exploding {
        fn count(&self, _input: &str) -> usize {
            panic!("exploded while counting")
        }
    }

    fn chars() -> Result<Box<dyn Counter>, String> {
        Ok(Box::new(Chars))
    }

    fn bytes() -> Result<Box<dyn Counter>, String> {
        Ok(Box::new(Bytes))
    }

    fn exploding() -> Result<Box<dyn Counter>, String> {
        Ok(Box::new(Exploding))
    }

    fn registry() -> MutantRegistry<dyn Counter> {
        let provider = StaticProvider::new("chars", chars)
            .with_defect("bytes", bytes)
            .with_defect("exploding", exploding);
        MutantRegistry::from_provider(&provider).0
    }

    fn suite() -> TestSuite<dyn Counter> {
        TestSuite::<dyn Counter>::new("counter")
            .with_case("ascii", |c| expect_eq(c.count("abc"), 3))
            .with_case("accented", |c| expect_eq(c.count("é"), 1))
            .with_case("empty", |c| expect_eq(c.count(""), 0))
    }

    #[test]
    fn reference_passes_every_case() {
        let registry = registry();
        let summary = SuiteRunner
            .run(&suite(), &registry)
            .expect("reference should run");
        assert_eq!(summary.tests_run(), 3);
        assert!(summary.all_passed());
    }

    #[test]
    fn assertion_failures_are_collected_not_propagated() {
        let mut registry = registry();
        registry.reset_cursor(1).expect("slot 1 exists");
        let summary = SuiteRunner
            .run(&suite(), &registry)
            .expect("defect should run");
        assert_eq!(summary.tests_run(), 3);
        assert_eq!(summary.failed_names(), vec!["accented"]);
        assert!(summary.failures()[0].message.contains("expected 1, got 2"));
    }

    #[test]
    fn panics_are_failures_and_the_suite_continues() {
        let mut registry = registry();
        registry.reset_cursor(2).expect("slot 2 exists");
        let summary = SuiteRunner
            .run(&suite(), &registry)
            .expect("panicking defect should still produce a summary");
        assert_eq!(summary.failed_count(), 3);
        assert!(summary.failures()[0].message.contains("exploded while counting"));
    }

    #[test]
    fn panic_hook_is_quiet_only_while_a_case_runs() {
        let suite = TestSuite::<dyn Counter>::new("quiet")
            .with_case("quiet_inside", |_| {
                expect_that(QUIET_PANICS.with(Cell::get), "hook should be silenced")
            })
            .with_case("panics", |c| expect_eq(c.count("x"), 1));

        let mut registry = registry();
        registry.reset_cursor(2).expect("slot 2 exists");
        let summary = SuiteRunner.run(&suite, &registry).expect("suite should run");

        assert_eq!(summary.failed_names(), vec!["panics"]);
        assert!(!QUIET_PANICS.with(Cell::get));
    }

    #[test]
    fn empty_registry_is_an_error() {
        let registry: MutantRegistry<dyn Counter> = MutantRegistry::new();
        assert_eq!(
            SuiteRunner.run(&suite(), &registry),
            Err(RegistryError::EmptyRegistry)
        );
    }

    #[test]
    fn rerunning_a_deterministic_candidate_is_idempotent() {
        let mut registry = registry();
        registry.reset_cursor(1).expect("slot 1 exists");
        let first = SuiteRunner.run(&suite(), &registry).expect("first run");
        registry.reset_cursor(1).expect("slot 1 exists");
        let second = SuiteRunner.run(&suite(), &registry).expect("second run");
        assert_eq!(first.failed_count(), second.failed_count());
        assert_eq!(first, second);
    }

    #[test]
    fn cases_run_in_suite_order() {
        let order = std::rc::Rc::new(Cell::new(0u32));
        let first = order.clone();
        let second = order.clone();
        let suite = TestSuite::<dyn Counter>::new("ordered")
            .with_case("first", move |_| expect_eq(first.replace(1), 0))
            .with_case("second", move |_| expect_eq(second.replace(2), 1));

        let summary = SuiteRunner.run(&suite, &registry()).expect("suite should run");
        assert!(summary.all_passed());
        assert_eq!(order.get(), 2);
        assert_eq!(suite.case_names(), vec!["first", "second"]);
    }

    #[test]
    fn helper_messages_name_both_sides() {
        assert_eq!(expect_eq(1, 1), Ok(()));
        assert_eq!(expect_one_of("b", &["a", "b"]), Ok(()));
        assert!(expect_one_of("c", &["a", "b"])
            .expect_err("c is not allowed")
            .contains("expected one of"));
        assert_eq!(expect_err::<u8, &str>(Err("bad")), Ok(()));
        assert_eq!(
            expect_err::<u8, &str>(Ok(4)),
            Err("expected an error, got Ok(4)".to_string())
        );
        assert_eq!(expect_that(false, "nope"), Err("nope".to_string()));
        assert_eq!(expect_none::<u8>(None), Ok(()));
        assert_eq!(
            expect_none(Some("abc")),
            Err("expected None, got Some(\"abc\")".to_string())
        );
    }
}
