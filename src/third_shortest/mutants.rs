//! Defective implementations of [`ThirdShortest`], each carrying one plausible bug.

use std::collections::BTreeMap;

use super::{InvalidInput, MIN_WORDS, ThirdShortest, check_input, length_tiers};
use crate::harness::Constructor;

/// Defect candidates in registry order (slot 1 onwards).
pub const CATALOG: &[(&str, Constructor<dyn ThirdShortest>)] = &[
    ("returns_shortest", boxed::<ReturnsShortest>),
    ("returns_second_shortest", boxed::<ReturnsSecondShortest>),
    ("counts_duplicate_lengths", boxed::<CountsDuplicateLengths>),
    ("accepts_two_words", boxed::<AcceptsTwoWords>),
    ("rejects_three_words", boxed::<RejectsThreeWords>),
    ("empty_instead_of_none", boxed::<EmptyInsteadOfNone>),
    ("panics_on_missing", boxed::<PanicsOnMissing>),
    ("byte_length", boxed::<ByteLength>),
    ("third_longest", boxed::<ThirdLongest>),
    ("first_word_when_no_tier", boxed::<FirstWordWhenNoTier>),
    ("returns_fourth_shortest", boxed::<ReturnsFourthShortest>),
    ("truncates_long_input", boxed::<TruncatesLongInput>),
    ("trims_whitespace", boxed::<TrimsWhitespace>),
    ("none_when_tier_tied", boxed::<NoneWhenTierTied>),
    ("skips_empty_strings", boxed::<SkipsEmptyStrings>),
];

fn boxed<M>() -> Result<Box<dyn ThirdShortest>, String>
where
    M: ThirdShortest + Default + 'static,
{
    Ok(Box::new(M::default()))
}

fn first_of(tier: Option<Vec<&str>>) -> Option<String> {
    tier.and_then(|tier| tier.first().map(|word| (*word).to_string()))
}

fn tiers_by<'a>(
    words: &[&'a str],
    measure: impl Fn(&str) -> usize,
) -> BTreeMap<usize, Vec<&'a str>> {
    let mut tiers: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
    for &word in words {
        tiers.entry(measure(word)).or_default().push(word);
    }
    tiers
}

/// Answers from the first tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturnsShortest;

impl ThirdShortest for ReturnsShortest {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        Ok(first_of(length_tiers(words).into_values().next()))
    }
}

/// Answers from the second tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturnsSecondShortest;

impl ThirdShortest for ReturnsSecondShortest {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        Ok(first_of(length_tiers(words).into_values().nth(1)))
    }
}

/// Sorts by length and takes the third word, so repeated lengths count as tiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountsDuplicateLengths;

impl ThirdShortest for CountsDuplicateLengths {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let mut sorted = check_input(words)?.to_vec();
        sorted.sort_by_key(|word| word.chars().count());
        Ok(sorted.get(2).map(|word| (*word).to_string()))
    }
}

/// Off-by-one precondition: two words are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptsTwoWords;

impl ThirdShortest for AcceptsTwoWords {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = words.ok_or(InvalidInput::Missing)?;
        if words.len() < MIN_WORDS - 1 {
            return Err(InvalidInput::TooFewWords { len: words.len() });
        }
        Ok(first_of(length_tiers(words).into_values().nth(2)))
    }
}

/// Off-by-one precondition: exactly three words are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectsThreeWords;

impl ThirdShortest for RejectsThreeWords {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = words.ok_or(InvalidInput::Missing)?;
        if words.len() <= MIN_WORDS {
            return Err(InvalidInput::TooFewWords { len: words.len() });
        }
        Ok(first_of(length_tiers(words).into_values().nth(2)))
    }
}

/// Returns an empty word where it should return nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyInsteadOfNone;

impl ThirdShortest for EmptyInsteadOfNone {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let answer = first_of(length_tiers(words).into_values().nth(2));
        Ok(Some(answer.unwrap_or_default()))
    }
}

/// Panics instead of reporting a missing list.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicsOnMissing;

impl ThirdShortest for PanicsOnMissing {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let Some(words) = words else {
            panic!("word list must be present");
        };
        let words = check_input(Some(words))?;
        Ok(first_of(length_tiers(words).into_values().nth(2)))
    }
}

/// Measures UTF-8 bytes instead of characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteLength;

impl ThirdShortest for ByteLength {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        Ok(first_of(tiers_by(words, str::len).into_values().nth(2)))
    }
}

/// Ranks from the longest end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThirdLongest;

impl ThirdShortest for ThirdLongest {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        Ok(first_of(length_tiers(words).into_values().rev().nth(2)))
    }
}

/// Falls back to the first word when there is no third tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstWordWhenNoTier;

impl ThirdShortest for FirstWordWhenNoTier {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let answer = first_of(length_tiers(words).into_values().nth(2));
        Ok(answer.or_else(|| words.first().map(|word| (*word).to_string())))
    }
}

/// Answers from the fourth tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturnsFourthShortest;

impl ThirdShortest for ReturnsFourthShortest {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        Ok(first_of(length_tiers(words).into_values().nth(3)))
    }
}

/// Only looks at the first five words.
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncatesLongInput;

impl ThirdShortest for TruncatesLongInput {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let window = &words[..words.len().min(5)];
        Ok(first_of(length_tiers(window).into_values().nth(2)))
    }
}

/// Ignores leading and trailing whitespace when measuring.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrimsWhitespace;

impl ThirdShortest for TrimsWhitespace {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let tiers = tiers_by(words, |word| word.trim().chars().count());
        Ok(first_of(tiers.into_values().nth(2)))
    }
}

/// Gives up when the third tier holds more than one word.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneWhenTierTied;

impl ThirdShortest for NoneWhenTierTied {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let tier = length_tiers(words)
            .into_values()
            .nth(2)
            .filter(|tier| tier.len() == 1);
        Ok(first_of(tier))
    }
}

/// Drops empty words before ranking.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipsEmptyStrings;

impl ThirdShortest for SkipsEmptyStrings {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let non_empty: Vec<&str> = words.iter().copied().filter(|w| !w.is_empty()).collect();
        Ok(first_of(length_tiers(&non_empty).into_values().nth(2)))
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use proptest::prelude::*;

    use super::*;
    use crate::generators::words::maybe_word_list;
    use crate::third_shortest::{Wolverine, acceptable_answers};

    /// True when `candidate` honours the contract for `words` (a panic never does).
    fn conforms(candidate: &dyn ThirdShortest, words: Option<&[&str]>) -> bool {
        let result = panic::catch_unwind(AssertUnwindSafe(|| candidate.third_shortest(words)));
        match (words, result) {
            (_, Err(_)) => false,
            (None, Ok(answer)) => answer == Err(InvalidInput::Missing),
            (Some(words), Ok(answer)) if words.len() < MIN_WORDS => answer.is_err(),
            (Some(words), Ok(Ok(Some(word)))) => acceptable_answers(words).contains(&word.as_str()),
            (Some(words), Ok(Ok(None))) => acceptable_answers(words).is_empty(),
            (Some(_), Ok(Err(_))) => false,
        }
    }

    /// One input per catalog entry on which that mutant breaks the contract.
    fn witness(name: &str) -> Option<&'static [&'static str]> {
        let words: &'static [&'static str] = match name {
            "returns_shortest" | "returns_second_shortest" | "third_longest" => &["a", "ab", "abc"],
            "counts_duplicate_lengths" => &["a", "a", "ab", "abc"],
            "accepts_two_words" => &["a", "ab"],
            "rejects_three_words" => &["a", "ab", "abc"],
            "empty_instead_of_none" | "first_word_when_no_tier" => &["a", "ab", "ab"],
            "panics_on_missing" => return None,
            "byte_length" => &["é", "ab", "abc", "abcd"],
            "returns_fourth_shortest" => &["a", "ab", "abc"],
            "truncates_long_input" => &["a", "a", "a", "a", "a", "ab", "abc"],
            "trims_whitespace" => &["a", "bb", " c "],
            "none_when_tier_tied" => &["a", "b", "bc", "ab", "bye", "and"],
            "skips_empty_strings" => &["", "a", "ab"],
            other => panic!("no witness for mutant {other}"),
        };
        Some(words)
    }

    #[test]
    fn every_mutant_breaks_the_contract_somewhere() {
        for (name, constructor) in CATALOG {
            let mutant = constructor().expect("catalog constructors never fail");
            let words = witness(name);
            assert!(
                !conforms(mutant.as_ref(), words),
                "mutant {name} conforms on its witness {words:?}"
            );
            assert!(
                conforms(&Wolverine, words),
                "reference must conform on witness {words:?}"
            );
        }
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    proptest! {
        #[test]
        fn reference_conforms_on_arbitrary_input(words in maybe_word_list(0..10)) {
            let refs: Option<Vec<&str>> =
                words.as_ref().map(|words| words.iter().map(String::as_str).collect());
            prop_assert!(conforms(&Wolverine, refs.as_deref()));
        }
    }
}
