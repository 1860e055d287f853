//! Strategy generators.

pub mod words;
