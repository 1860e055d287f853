//! The "third shortest word" contract, its reference implementation, a catalog of
//! defective mutants, and the revealer suites that try to tell them apart.
//!
//! Contract for [`ThirdShortest::third_shortest`]:
//! - absent input or fewer than three words is [`InvalidInput`];
//! - words are grouped into tiers by character count; duplicated lengths do not add
//!   tiers;
//! - the answer is any word of the third tier, or `None` when there is no third tier.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::harness::StaticProvider;

pub mod mutants;
pub mod reference;
pub mod suite;

pub use reference::Wolverine;
pub use suite::{full_revealer_suite, revealer_suite};

/// Minimum number of words accepted by the contract.
pub const MIN_WORDS: usize = 3;

/// Precondition violations of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// No word list was supplied.
    #[error("word list is missing")]
    Missing,
    /// Fewer than [`MIN_WORDS`] words were supplied.
    #[error("expected at least {MIN_WORDS} words, got {len}")]
    TooFewWords {
        /// Number of words supplied.
        len: usize,
    },
}

/// Candidate interface under evaluation.
pub trait ThirdShortest {
    /// Return a word of the third-shortest length tier.
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput>;
}

/// Contract preconditions shared by well-behaved implementations.
pub fn check_input<'a>(words: Option<&'a [&'a str]>) -> Result<&'a [&'a str], InvalidInput> {
    let words = words.ok_or(InvalidInput::Missing)?;
    if words.len() < MIN_WORDS {
        return Err(InvalidInput::TooFewWords { len: words.len() });
    }
    Ok(words)
}

/// Group words by character count, shortest tier first, keeping input order in a tier.
pub fn length_tiers<'a>(words: &[&'a str]) -> BTreeMap<usize, Vec<&'a str>> {
    let mut tiers: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
    for &word in words {
        tiers.entry(word.chars().count()).or_default().push(word);
    }
    tiers
}

/// Every acceptable answer for `words`: the members of the third tier.
pub fn acceptable_answers<'a>(words: &[&'a str]) -> Vec<&'a str> {
    length_tiers(words)
        .into_values()
        .nth(2)
        .unwrap_or_default()
}

/// Registry provider: [`Wolverine`] at slot 0 followed by every catalogued mutant.
pub fn provider() -> StaticProvider<dyn ThirdShortest> {
    mutants::CATALOG.iter().fold(
        StaticProvider::<dyn ThirdShortest>::new(reference::NAME, reference::construct),
        |provider, (name, constructor)| provider.with_defect(*name, *constructor),
    )
}
