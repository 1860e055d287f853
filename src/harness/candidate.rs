//! Candidate provider abstraction and a statically registered provider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A candidate slot that could not be instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("candidate {index} ({name}) could not be constructed: {reason}")]
pub struct ConstructionFailure {
    /// Registry slot of the failed candidate.
    pub index: usize,
    /// Symbolic name of the failed candidate.
    pub name: String,
    /// Human-readable failure detail.
    pub reason: String,
}

/// Source of candidate implementations for a registry.
///
/// Index 0 is the reference candidate; every other index is a defect candidate.
pub trait CandidateProvider<T: ?Sized> {
    /// Number of candidates this provider knows about.
    fn len(&self) -> usize;

    /// True when the provider has no candidates.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbolic name for the candidate at `index`.
    fn name(&self, index: usize) -> String;

    /// Build the candidate at `index`.
    fn construct(&self, index: usize) -> Result<Box<T>, ConstructionFailure>;
}

/// Constructor function stored by [`StaticProvider`].
pub type Constructor<T> = fn() -> Result<Box<T>, String>;

/// Provider backed by an explicit list of `(name, constructor)` pairs.
pub struct StaticProvider<T: ?Sized> {
    entries: Vec<(String, Constructor<T>)>,
}

impl<T: ?Sized> StaticProvider<T> {
    /// Start a provider whose reference candidate is `reference`.
    pub fn new(name: impl Into<String>, reference: Constructor<T>) -> Self {
        Self {
            entries: vec![(name.into(), reference)],
        }
    }

    /// Append a defect candidate.
    pub fn with_defect(mut self, name: impl Into<String>, constructor: Constructor<T>) -> Self {
        self.entries.push((name.into(), constructor));
        self
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up the slot index registered under `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }
}

impl<T: ?Sized> CandidateProvider<T> for StaticProvider<T> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn name(&self, index: usize) -> String {
        self.entries
            .get(index)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| format!("candidate-{index}"))
    }

    fn construct(&self, index: usize) -> Result<Box<T>, ConstructionFailure> {
        let (name, constructor) = self.entries.get(index).ok_or_else(|| ConstructionFailure {
            index,
            name: format!("candidate-{index}"),
            reason: "no constructor registered for this slot".to_string(),
        })?;
        constructor().map_err(|reason| ConstructionFailure {
            index,
            name: name.clone(),
            reason,
        })
    }
}

impl<T: ?Sized> std::fmt::Debug for StaticProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticProvider")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {
        fn greet(&self) -> &'static str;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    fn hello() -> Result<Box<dyn Greeter>, String> {
        Ok(Box::new(Hello))
    }

    fn broken() -> Result<Box<dyn Greeter>, String> {
        Err("missing dependency".to_string())
    }

    fn provider() -> StaticProvider<dyn Greeter> {
        StaticProvider::new("hello", hello).with_defect("broken", broken)
    }

    #[test]
    fn constructs_registered_candidates_by_index() {
        let provider = provider();
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.names(), vec!["hello", "broken"]);
        assert_eq!(provider.index_of("broken"), Some(1));

        let greeter = provider.construct(0).expect("reference should construct");
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn constructor_errors_become_construction_failures() {
        let failure = match provider().construct(1) {
            Err(failure) => failure,
            Ok(_) => panic!("broken slot should fail to construct"),
        };
        assert_eq!(failure.index, 1);
        assert_eq!(failure.name, "broken");
        assert_eq!(failure.reason, "missing dependency");
        assert!(failure.to_string().contains("broken"));
    }

    #[test]
    fn out_of_range_slot_is_a_construction_failure() {
        let provider = provider();
        assert_eq!(provider.name(7), "candidate-7");
        assert!(provider.construct(7).is_err());
    }
}
