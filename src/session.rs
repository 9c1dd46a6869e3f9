//! Per-game state: the guesses made so far and the words already used up.

use std::{collections::HashSet, fmt::Display};

use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    knowledge::PAIR_SEPARATOR,
    strategy::{Phase, Stagnation},
    SessionError,
};

/// One scored guess.
///
/// A [`GuessResult`] is immutable once created. The `attempt` field is the
/// 1-based position of the guess among the scored guesses of its game, so
/// submissions the game could not score do not consume an attempt number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessResult {
    word: String,
    similarity: f64,
    rank: String,
    attempt: usize,
}

impl GuessResult {
    /// Creates a new guess result, validating the word and the similarity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use kkomantle_rs::GuessResult;
    /// let guess = GuessResult::new("사랑", 0.31, "152", 1)?;
    /// assert_eq!(guess.word(), "사랑");
    ///
    /// assert!(GuessResult::new("사랑", 1.5, "", 1).is_err());
    /// assert!(GuessResult::new("  ", 0.5, "", 1).is_err());
    /// assert!(GuessResult::new("사|랑", 0.5, "", 1).is_err());
    /// #
    /// # Ok::<_, kkomantle_rs::SessionError>(())
    /// ```
    pub fn new(
        word: impl Into<String>,
        similarity: f64,
        rank: impl Into<String>,
        attempt: usize,
    ) -> Result<Self, SessionError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(SessionError::EmptyWord);
        }
        if word.contains(PAIR_SEPARATOR) {
            return Err(SessionError::ReservedCharacter(word));
        }
        if !(0.0..=1.0).contains(&similarity) {
            return Err(SessionError::InvalidSimilarity(similarity));
        }

        Ok(GuessResult {
            word,
            similarity,
            rank: rank.into(),
            attempt,
        })
    }

    /// The guessed word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The similarity the game reported, in `[0, 1]`.
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    /// The rank label the game reported. Informational only.
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// The 1-based attempt number of this guess.
    pub fn attempt(&self) -> usize {
        self.attempt
    }
}

impl Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.4}", self.word, self.similarity)?;
        if !self.rank.is_empty() {
            write!(f, " ({})", self.rank)?;
        }
        Ok(())
    }
}

/// The mutable state of a single game.
///
/// A session is created when a game starts and dropped when it ends. It owns
/// the set of words that may not be submitted again during this game, which
/// is deliberately separate from the cross-game
/// [`KnowledgeStore`](crate::KnowledgeStore).
#[derive(Clone, Debug)]
pub struct GameSession {
    guesses: Vec<GuessResult>,
    tried: HashSet<String>,
    rejected: Vec<String>,
    best_similarity: f64,
    phase: Option<Phase>,
    phase_streak: usize,
    phase_history: Vec<Phase>,
    started_at: DateTime<Utc>,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            guesses: Vec::new(),
            tried: HashSet::new(),
            rejected: Vec::new(),
            best_similarity: 0.0,
            phase: None,
            phase_streak: 0,
            phase_history: Vec::new(),
            started_at: Utc::now(),
        }
    }
}

impl GameSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scored guess and returns it.
    ///
    /// The attempt number is assigned here. Returns an error if the word was
    /// already tried this session or if the similarity is out of range.
    pub fn record(
        &mut self,
        word: &str,
        similarity: f64,
        rank: impl Into<String>,
    ) -> Result<&GuessResult, SessionError> {
        if self.tried.contains(word) {
            return Err(SessionError::AlreadyTried(word.to_string()));
        }

        let guess = GuessResult::new(word, similarity, rank, self.guesses.len() + 1)?;
        self.tried.insert(guess.word.clone());
        self.best_similarity = self.best_similarity.max(similarity);
        self.guesses.push(guess);

        Ok(&self.guesses[self.guesses.len() - 1])
    }

    /// Removes a word from this session's pool without scoring it.
    ///
    /// Used when the game could not score a submission. The word will not be
    /// offered again for the rest of the game.
    pub fn reject(&mut self, word: &str) {
        if self.tried.insert(word.to_string()) {
            self.rejected.push(word.to_string());
        }
    }

    /// All scored guesses, in attempt order.
    pub fn guesses(&self) -> &[GuessResult] {
        &self.guesses
    }

    /// Returns true if `word` was guessed or rejected this session.
    pub fn is_tried(&self, word: &str) -> bool {
        self.tried.contains(word)
    }

    /// Words the game could not score, in the order they were rejected.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of scored attempts so far.
    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    /// The best similarity so far, or 0 before the first guess.
    pub fn best_similarity(&self) -> f64 {
        self.best_similarity
    }

    /// The guess with the highest similarity. Earlier guesses win ties.
    pub fn best_guess(&self) -> Option<&GuessResult> {
        self.top_guesses(1).into_iter().next()
    }

    /// The `n` guesses with the highest similarity, best first.
    pub fn top_guesses(&self, n: usize) -> Vec<&GuessResult> {
        self.guesses
            .iter()
            .sorted_by(|a, b| b.similarity.total_cmp(&a.similarity))
            .take(n)
            .collect()
    }

    /// The last `n` guesses (fewer if the session is shorter), in attempt
    /// order.
    pub fn recent(&self, n: usize) -> &[GuessResult] {
        &self.guesses[self.guesses.len().saturating_sub(n)..]
    }

    /// Returns true if the most recent guesses failed to improve on the best
    /// similarity seen before them.
    pub fn is_stagnant(&self, stagnation: &Stagnation) -> bool {
        let split = self.guesses.len().saturating_sub(stagnation.window);
        let baseline = self.guesses[..split]
            .iter()
            .map(GuessResult::similarity)
            .fold(0.0, f64::max);

        stagnation.detect(&self.guesses, baseline)
    }

    /// Notes that the latest scored guess was chosen under `phase`.
    ///
    /// Submissions the game could not score are not counted.
    pub fn enter_phase(&mut self, phase: Phase) {
        if self.phase == Some(phase) {
            self.phase_streak += 1;
        } else {
            self.phase = Some(phase);
            self.phase_streak = 1;
            self.phase_history.push(phase);
        }
    }

    /// The phase used for the most recent selection.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// How many consecutive selections used the current phase.
    pub fn phase_streak(&self) -> usize {
        self.phase_streak
    }

    /// Phases in the order they were entered, consecutive repeats collapsed.
    pub fn phase_history(&self) -> &[Phase] {
        &self.phase_history
    }

    /// Time elapsed since the session was created.
    pub fn elapsed(&self) -> Duration {
        Utc::now() - self.started_at
    }
}
