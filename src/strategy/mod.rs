//! Choosing the next guess.
//!
//! A game moves through four search [`Phase`]s. The phase is a pure function
//! of the best similarity so far and of whether progress has stalled (see
//! [`Stagnation`]). Each phase is bound to one candidate generator, and
//! every generator has the same contract: given a [`Context`], return words
//! best first, all of them in the vocabulary and none of them already tried
//! this game. A generator may return nothing, in which case the caller has
//! to fall back on something else.

use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    knowledge::KnowledgeStore,
    lexicon::Lexicon,
    session::{GameSession, GuessResult},
};

mod expand;
mod focused;
mod gradient;
mod precision;
mod wide;

pub use expand::{morphological_variants, root_of};

/// The four search phases, from broadest to narrowest.
///
/// The derived ordering follows breadth: `WideExploration` is the smallest
/// value and `PrecisionSearch` the largest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Spread guesses over unrelated categories to find an anchor.
    WideExploration,

    /// Expand around the best few guesses.
    GradientSearch,

    /// Look for a field shared by the top guesses and follow associations
    /// two hops out from the best one.
    FocusedSearch,

    /// Try morphological variants of the best guess and words that have
    /// historically scored almost identically to a guessed word.
    PrecisionSearch,
}

impl Phase {
    /// All phases, broadest first.
    pub const ALL: [Phase; 4] = [
        Phase::WideExploration,
        Phase::GradientSearch,
        Phase::FocusedSearch,
        Phase::PrecisionSearch,
    ];

    /// Picks the phase for the next guess.
    ///
    /// The first matching rule wins:
    ///
    /// 1. `best_similarity < 0.1`: [`WideExploration`](Phase::WideExploration)
    /// 2. `best_similarity < 0.25` or stuck: [`GradientSearch`](Phase::GradientSearch)
    /// 3. `best_similarity < 0.5`: [`FocusedSearch`](Phase::FocusedSearch)
    /// 4. otherwise: [`PrecisionSearch`](Phase::PrecisionSearch)
    ///
    /// Being stuck can only ever widen the search.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use kkomantle_rs::Phase;
    /// assert_eq!(Phase::select(0.05, true), Phase::WideExploration);
    /// assert_eq!(Phase::select(0.3, false), Phase::FocusedSearch);
    /// assert_eq!(Phase::select(0.8, true), Phase::GradientSearch);
    /// ```
    pub fn select(best_similarity: f64, is_stuck: bool) -> Phase {
        if best_similarity < 0.1 {
            Phase::WideExploration
        } else if best_similarity < 0.25 || is_stuck {
            Phase::GradientSearch
        } else if best_similarity < 0.5 {
            Phase::FocusedSearch
        } else {
            Phase::PrecisionSearch
        }
    }

    /// Runs this phase's candidate generator.
    pub fn candidates<R: Rng + ?Sized>(self, ctx: &Context<'_>, rng: &mut R) -> Vec<String> {
        match self {
            Phase::WideExploration => wide::candidates(ctx, rng),
            Phase::GradientSearch => gradient::candidates(ctx),
            Phase::FocusedSearch => focused::candidates(ctx),
            Phase::PrecisionSearch => precision::candidates(ctx),
        }
    }

    /// A short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::WideExploration => "wide exploration",
            Phase::GradientSearch => "gradient search",
            Phase::FocusedSearch => "focused search",
            Phase::PrecisionSearch => "precision search",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Plateau detection settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stagnation {
    /// How many of the latest guesses are inspected.
    pub window: usize,

    /// How far the window has to beat the best similarity to count as
    /// progress.
    pub threshold: f64,
}

impl Default for Stagnation {
    fn default() -> Self {
        Stagnation {
            window: 3,
            threshold: 0.01,
        }
    }
}

impl Stagnation {
    /// Returns true if no guess among the last `window` of `history` beat
    /// `best_similarity` by more than `threshold`.
    ///
    /// Always false while `history` is shorter than the window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use kkomantle_rs::{strategy::Stagnation, GuessResult};
    /// let history = [("가", 0.2), ("나", 0.05), ("다", 0.05), ("라", 0.05)]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, (w, s))| GuessResult::new(*w, *s, "", i + 1))
    ///     .collect::<Result<Vec<_>, _>>()?;
    ///
    /// assert!(Stagnation::default().detect(&history, 0.2));
    /// assert!(!Stagnation::default().detect(&[], 0.2));
    /// #
    /// # Ok::<_, kkomantle_rs::SessionError>(())
    /// ```
    pub fn detect(&self, history: &[GuessResult], best_similarity: f64) -> bool {
        if history.len() < self.window || self.window == 0 {
            return false;
        }

        let recent_max = history[history.len() - self.window..]
            .iter()
            .map(GuessResult::similarity)
            .fold(f64::NEG_INFINITY, f64::max);

        recent_max <= best_similarity + self.threshold
    }
}

/// What a candidate generator gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    pub session: &'a GameSession,
    pub lexicon: &'a Lexicon,
    pub knowledge: &'a KnowledgeStore,
}

impl<'a> Context<'a> {
    pub fn new(
        session: &'a GameSession,
        lexicon: &'a Lexicon,
        knowledge: &'a KnowledgeStore,
    ) -> Self {
        Context {
            session,
            lexicon,
            knowledge,
        }
    }

    /// Returns true if `word` may be offered: it is in the vocabulary and was
    /// not tried this game.
    pub fn is_candidate(&self, word: &str) -> bool {
        self.lexicon.contains(word) && !self.session.is_tried(word)
    }
}
