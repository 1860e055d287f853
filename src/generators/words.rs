//! Word and word-list strategies for exercising string-ranking contracts.

use proptest::collection::SizeRange;
use proptest::prelude::*;

/// Characters words are drawn from: ASCII, one multi-byte letter, and a space.
const ALPHABET: &[char] = &['a', 'b', 'c', 'x', 'y', 'z', 'é', ' '];

/// Generate a word of 0 to 5 characters, including the empty word.
pub fn short_word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..=5)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generate a list of short words with configurable length range.
pub fn word_list(len: impl Into<SizeRange>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(short_word(), len)
}

/// Like [`word_list`], but sometimes absent.
pub fn maybe_word_list(len: impl Into<SizeRange>) -> impl Strategy<Value = Option<Vec<String>>> {
    prop_oneof![
        1 => Just(Option::<Vec<String>>::None),
        4 => word_list(len).prop_map(Some),
    ]
}
