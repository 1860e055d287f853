//! Fixed-size registry of candidate implementations with a movable cursor.

use thiserror::Error;

use super::candidate::{CandidateProvider, ConstructionFailure};

/// Slot index of the reference candidate.
pub const REFERENCE_INDEX: usize = 0;

/// Registry access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry has not been initialized (or its provider was empty).
    #[error("mutant registry is empty; initialize it before evaluating")]
    EmptyRegistry,
    /// The slot under the cursor failed to construct.
    #[error("candidate slot {index} is unpopulated")]
    UnpopulatedSlot {
        /// Slot index.
        index: usize,
    },
    /// Cursor placement outside `[0, size)`.
    #[error("cursor index {index} out of range for registry of size {size}")]
    CursorOutOfRange {
        /// Requested index.
        index: usize,
        /// Registry size.
        size: usize,
    },
}

struct CandidateSlot<T: ?Sized> {
    name: String,
    candidate: Option<Box<T>>,
}

/// Ordered candidate slots plus the cursor the runner reads from.
///
/// Slot 0 holds the reference candidate, slots `1..size()` hold defect candidates.
/// The slot count never changes after [`MutantRegistry::initialize`].
pub struct MutantRegistry<T: ?Sized> {
    slots: Vec<CandidateSlot<T>>,
    cursor: usize,
    failures: Vec<ConstructionFailure>,
}

impl<T: ?Sized> Default for MutantRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> MutantRegistry<T> {
    /// Uninitialized registry. Every access fails with [`RegistryError::EmptyRegistry`].
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: REFERENCE_INDEX,
            failures: Vec::new(),
        }
    }

    /// Build and initialize a registry in one step.
    pub fn from_provider<P>(provider: &P) -> (Self, Vec<ConstructionFailure>)
    where
        P: CandidateProvider<T> + ?Sized,
    {
        let mut registry = Self::new();
        let failures = registry.initialize(provider);
        (registry, failures)
    }

    /// Construct every candidate the provider knows about.
    ///
    /// A failing constructor leaves its slot unpopulated and is returned to the caller;
    /// the remaining slots are still registered. Re-initializing replaces all slots and
    /// puts the cursor back on the reference candidate.
    pub fn initialize<P>(&mut self, provider: &P) -> Vec<ConstructionFailure>
    where
        P: CandidateProvider<T> + ?Sized,
    {
        let mut slots = Vec::with_capacity(provider.len());
        let mut failures = Vec::new();

        for index in 0..provider.len() {
            let name = provider.name(index);
            match provider.construct(index) {
                Ok(candidate) => slots.push(CandidateSlot {
                    name,
                    candidate: Some(candidate),
                }),
                Err(failure) => {
                    tracing::warn!(
                        index,
                        name = %name,
                        reason = %failure.reason,
                        "candidate construction failed"
                    );
                    failures.push(failure);
                    slots.push(CandidateSlot {
                        name,
                        candidate: None,
                    });
                }
            }
        }

        tracing::debug!(
            size = slots.len(),
            failed = failures.len(),
            "mutant registry initialized"
        );
        self.slots = slots;
        self.cursor = REFERENCE_INDEX;
        self.failures = failures.clone();
        failures
    }

    /// Candidate under the cursor.
    pub fn current(&self) -> Result<&T, RegistryError> {
        let slot = self
            .slots
            .get(self.cursor)
            .ok_or(RegistryError::EmptyRegistry)?;
        slot.candidate
            .as_deref()
            .ok_or(RegistryError::UnpopulatedSlot { index: self.cursor })
    }

    /// Move the cursor forward by one, wrapping at the end.
    pub fn advance_cursor(&mut self) {
        if !self.slots.is_empty() {
            self.cursor = (self.cursor + 1) % self.slots.len();
        }
    }

    /// Place the cursor on an explicit slot.
    pub fn reset_cursor(&mut self, index: usize) -> Result<(), RegistryError> {
        if self.slots.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }
        if index >= self.slots.len() {
            return Err(RegistryError::CursorOutOfRange {
                index,
                size: self.slots.len(),
            });
        }
        tracing::trace!(from = self.cursor, to = index, "cursor reset");
        self.cursor = index;
        Ok(())
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots, populated or not.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// True before initialization.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Symbolic name of a slot.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|slot| slot.name.as_str())
    }

    /// Whether a slot holds a constructed candidate.
    pub fn is_populated(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.candidate.is_some())
    }

    /// Construction failures recorded by the last initialization.
    pub fn construction_failures(&self) -> &[ConstructionFailure] {
        &self.failures
    }

    /// Defect slot indices in ascending order.
    pub fn defect_indices(&self) -> std::ops::Range<usize> {
        (REFERENCE_INDEX + 1)..self.slots.len().max(REFERENCE_INDEX + 1)
    }
}

impl<T: ?Sized> std::fmt::Debug for MutantRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots: Vec<(&str, bool)> = self
            .slots
            .iter()
            .map(|slot| (slot.name.as_str(), slot.candidate.is_some()))
            .collect();
        f.debug_struct("MutantRegistry")
            .field("slots", &slots)
            .field("cursor", &self.cursor)
            .finish()
    }
}
