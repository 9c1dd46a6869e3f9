//! The interface to the game being played.

use thiserror::Error;

/// What the game reports for a submitted word.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    /// Semantic closeness to the hidden word, in `[0, 1]`.
    pub similarity: f64,

    /// The game's own rank label, such as `"1000위 이상"` or `"정답!"`.
    pub rank: String,
}

impl Feedback {
    pub fn new(similarity: f64, rank: impl Into<String>) -> Self {
        Feedback {
            similarity,
            rank: rank.into(),
        }
    }
}

/// The game could not produce a score for a submitted word.
///
/// This is an expected outcome (an unknown word, a page that did not update
/// in time), not a fatal one. The [`Solver`](crate::Solver) drops the word
/// for the rest of the game and moves on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("could not read a score for \"{word}\": {reason}")]
pub struct ParseFailure {
    pub word: String,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(word: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseFailure {
            word: word.into(),
            reason: reason.into(),
        }
    }
}

/// A game that scores one word at a time.
///
/// Implementations wrap whatever actually talks to the game, such as a
/// browser session or a recorded replay. Submissions are strictly
/// sequential, and each call blocks until the score is known or the
/// implementation gives up.
pub trait Game {
    /// Submits `word` and returns the game's feedback for it.
    fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure>;
}

impl<G: Game + ?Sized> Game for &mut G {
    fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure> {
        (**self).submit(word)
    }
}

impl<G: Game + ?Sized> Game for Box<G> {
    fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure> {
        (**self).submit(word)
    }
}
