//! Word-theme and clue-card providers.
//!
//! Both draw without repetition until their pool is exhausted and shuffle
//! with a uniform Fisher–Yates pass.

pub mod clue_deck;
mod lists;
pub mod word_bank;

pub use clue_deck::ClueDeck;
pub use word_bank::WordBank;
