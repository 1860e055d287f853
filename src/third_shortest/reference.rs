//! Reference implementation: correct, but free to pick any member of a tied tier.

use rand::seq::SliceRandom;

use super::{InvalidInput, ThirdShortest, check_input, length_tiers};

/// Registry name of the reference candidate.
pub const NAME: &str = "wolverine";

/// The good mutant. Picks uniformly among equally valid answers, so a suite that
/// insists on one particular tied word will eventually fail it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wolverine;

impl ThirdShortest for Wolverine {
    fn third_shortest(&self, words: Option<&[&str]>) -> Result<Option<String>, InvalidInput> {
        let words = check_input(words)?;
        let tier = length_tiers(words).into_values().nth(2);
        Ok(tier.and_then(|tier| {
            tier.choose(&mut rand::thread_rng())
                .map(|word| (*word).to_string())
        }))
    }
}

/// Registry constructor.
pub fn construct() -> Result<Box<dyn ThirdShortest>, String> {
    Ok(Box::new(Wolverine))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::generators::words::{short_word, word_list};
    use crate::third_shortest::acceptable_answers;

    #[test]
    fn documented_examples_hold() {
        let wolverine = Wolverine;
        assert_eq!(
            wolverine.third_shortest(Some(&["a", "ab", "abc"])),
            Ok(Some("abc".to_string()))
        );
        assert_eq!(
            wolverine.third_shortest(Some(&["a"])),
            Err(InvalidInput::TooFewWords { len: 1 })
        );
        assert_eq!(wolverine.third_shortest(None), Err(InvalidInput::Missing));
        assert_eq!(wolverine.third_shortest(Some(&["a", "a", "a"])), Ok(None));
    }

    #[test]
    fn ties_are_broken_both_ways_eventually() {
        let words = ["a", "b", "bc", "ab", "bye", "and"];
        let seen: BTreeSet<String> = (0..200)
            .filter_map(|_| Wolverine.third_shortest(Some(&words[..])).ok().flatten())
            .collect();
        let expected: BTreeSet<String> = ["and", "bye"].iter().map(|w| w.to_string()).collect();
        assert_eq!(seen, expected);
    }

    proptest! {
        #[test]
        fn answer_is_always_an_acceptable_answer(words in word_list(3..12)) {
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let acceptable = acceptable_answers(&refs);
            let answer = Wolverine
                .third_shortest(Some(refs.as_slice()))
                .expect("three or more words are valid");
            match answer {
                Some(word) => prop_assert!(acceptable.contains(&word.as_str())),
                None => prop_assert!(acceptable.is_empty()),
            }
        }

        #[test]
        fn short_lists_are_rejected(words in prop::collection::vec(short_word(), 0..3)) {
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            prop_assert_eq!(
                Wolverine.third_shortest(Some(refs.as_slice())),
                Err(InvalidInput::TooFewWords { len: refs.len() })
            );
        }
    }
}
