#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

use thiserror::Error;

pub mod session;
pub use session::{GameSession, GuessResult};

pub mod knowledge;
pub use knowledge::KnowledgeStore;

pub mod lexicon;
pub use lexicon::Lexicon;

pub mod catalog;

pub mod strategy;
pub use strategy::Phase;

pub mod score;

pub mod game;
pub use game::{Feedback, Game, ParseFailure};

pub mod repository;
pub use repository::Repository;

pub mod solver;
pub use solver::Solver;

pub mod summary;
pub use summary::{AbortReason, GameSummary, Outcome};

pub mod stats;
pub use stats::LearningStats;

#[cfg(test)]
mod mock;

/// A specialized [`Result`](std::result::Result) for `kkomantle_rs`.
pub type Result<T> = std::result::Result<T, SolverError>;

/// The errors that `kkomantle_rs` can produce.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("session encountered error")]
    Session {
        #[from]
        kind: SessionError,
    },

    #[error("knowledge store could not be loaded or saved")]
    Store {
        #[from]
        kind: StoreError,
    },

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("could not read vocabulary file")]
    VocabularyIo(#[source] std::io::Error),

    #[error("the vocabulary contains no words")]
    EmptyVocabulary,
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// A guess was recorded for an empty or whitespace-only word.
    #[error("a guessed word cannot be empty")]
    EmptyWord,

    /// The word contains the character that separates word-pair keys.
    #[error("the word \"{0}\" contains the reserved character '|'")]
    ReservedCharacter(String),

    /// The game reported a similarity that is NaN or outside `[0, 1]`.
    #[error("similarity {0} is not within [0, 1]")]
    InvalidSimilarity(f64),

    /// The word was already guessed or rejected in this session.
    #[error("the word \"{0}\" was already tried this session")]
    AlreadyTried(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read or write knowledge file")]
    Io(#[from] std::io::Error),

    #[error("trouble serializing or deserializing knowledge")]
    Serde(#[from] serde_json::Error),

    /// A stored word-pair key is not two distinct words joined by `|`.
    #[error("the word-pair key \"{0}\" is malformed")]
    MalformedPairKey(String),
}
