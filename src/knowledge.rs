//! Knowledge learned across games.
//!
//! The [`KnowledgeStore`] is pure data plus accessors. It is loaded once per
//! run, handed to the [`Solver`](crate::Solver), updated after every scored
//! guess, and saved through a [`Repository`](crate::Repository) when a game
//! ends.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{session::GuessResult, stats::LearningStats, strategy::Phase, StoreError};

/// Separator between the two words of a word-pair key.
pub const PAIR_SEPARATOR: char = '|';

const DIFF_CAPACITY: usize = 100;
const DIFF_RETAIN: usize = 50;
const PATTERN_CAPACITY: usize = 100;
const PATTERN_RETAIN: usize = 50;

/// Returns the canonical key of an unordered pair of distinct words.
///
/// The lexicographically smaller word comes first, so both orders map to the
/// same key. Returns [`None`] if the words are equal or if either contains
/// [`PAIR_SEPARATOR`], since such a key could not be split again.
///
/// # Examples
///
/// ```rust
/// # use kkomantle_rs::knowledge::pair_key;
/// assert_eq!(pair_key("시간", "공간").as_deref(), Some("공간|시간"));
/// assert_eq!(pair_key("공간", "시간"), pair_key("시간", "공간"));
/// assert_eq!(pair_key("시간", "시간"), None);
/// assert_eq!(pair_key("시|간", "공간"), None);
/// ```
pub fn pair_key(a: &str, b: &str) -> Option<String> {
    if a.contains(PAIR_SEPARATOR) || b.contains(PAIR_SEPARATOR) {
        return None;
    }
    match a.cmp(b) {
        std::cmp::Ordering::Less => Some(format!("{}{}{}", a, PAIR_SEPARATOR, b)),
        std::cmp::Ordering::Greater => Some(format!("{}{}{}", b, PAIR_SEPARATOR, a)),
        std::cmp::Ordering::Equal => None,
    }
}

/// Splits a word-pair key back into its two words.
pub fn split_pair_key(key: &str) -> Result<(&str, &str), StoreError> {
    match key.split_once(PAIR_SEPARATOR) {
        Some((a, b)) if !a.is_empty() && a < b && !b.contains(PAIR_SEPARATOR) => Ok((a, b)),
        _ => Err(StoreError::MalformedPairKey(key.to_string())),
    }
}

/// Observed similarity differences for one unordered pair of words.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordPairData {
    similarity_diffs: Vec<f64>,
    co_occurrence_count: u64,
}

impl WordPairData {
    /// Records one `|similarity(a) - similarity(b)|` observation.
    ///
    /// Once more than 100 diffs are held, only the most recent 50 are kept.
    /// The co-occurrence count is never trimmed.
    pub fn add_diff(&mut self, diff: f64) {
        self.similarity_diffs.push(diff);
        self.co_occurrence_count += 1;

        if self.similarity_diffs.len() > DIFF_CAPACITY {
            let excess = self.similarity_diffs.len() - DIFF_RETAIN;
            self.similarity_diffs.drain(..excess);
        }
    }

    /// The retained diffs, oldest first.
    pub fn similarity_diffs(&self) -> &[f64] {
        &self.similarity_diffs
    }

    /// How many diffs were ever recorded for this pair.
    pub fn co_occurrence_count(&self) -> u64 {
        self.co_occurrence_count
    }

    /// The mean of the retained diffs, or [`None`] if there are none.
    pub fn average_diff(&self) -> Option<f64> {
        if self.similarity_diffs.is_empty() {
            None
        } else {
            Some(self.similarity_diffs.iter().sum::<f64>() / self.similarity_diffs.len() as f64)
        }
    }
}

/// How a single word has scored across every game it was guessed in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordFrequencyData {
    count: u64,
    avg_similarity: f64,
    best_similarity: f64,
}

impl WordFrequencyData {
    /// Folds one more observation into the running statistics.
    pub fn observe(&mut self, similarity: f64) {
        self.count += 1;
        self.avg_similarity += (similarity - self.avg_similarity) / self.count as f64;
        self.best_similarity = if self.count == 1 {
            similarity
        } else {
            self.best_similarity.max(similarity)
        };
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn avg_similarity(&self) -> f64 {
        self.avg_similarity
    }

    pub fn best_similarity(&self) -> f64 {
        self.best_similarity
    }

    /// The learned ranking value of this word.
    ///
    /// `avg_similarity * count + best_similarity * 0.5`: sustained mild
    /// signal compounds with every observation, and a standout peak earns a
    /// bounded bonus.
    pub fn effectiveness(&self) -> f64 {
        self.avg_similarity * self.count as f64 + self.best_similarity * 0.5
    }
}

/// The record of a solved game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessPattern {
    pub answer: String,
    pub attempts: usize,
    /// The highest-similarity guesses of the game, best first.
    pub key_words: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Phases used during the game, consecutive repeats collapsed.
    #[serde(default)]
    pub strategy_sequence: Vec<Phase>,
    /// Similarities of `key_words`, index for index.
    #[serde(default)]
    pub final_similarity_scores: Vec<f64>,
}

/// How many attempts the games that used a phase took.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseUsage {
    pub usage_count: u64,
    pub total_attempts: u64,
    pub avg_attempts: f64,
}

/// Everything learned across games.
///
/// The serialized shape is:
///
/// ```json
/// {
///   "games_played": 3,
///   "successful_patterns": [{"answer": "...", "attempts": 41, "key_words": ["..."], "timestamp": "..."}],
///   "word_frequency": {"사랑": {"count": 2, "avg_similarity": 0.2, "best_similarity": 0.3}},
///   "word_pairs": {"사랑|시간": {"similarity_diffs": [0.1], "co_occurrence_count": 1}}
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStore {
    #[serde(default)]
    games_played: u64,
    #[serde(default)]
    successful_patterns: Vec<SuccessPattern>,
    #[serde(default)]
    word_frequency: BTreeMap<String, WordFrequencyData>,
    #[serde(default)]
    word_pairs: BTreeMap<String, WordPairData>,
    #[serde(default)]
    strategy_effectiveness: BTreeMap<Phase, PhaseUsage>,
}

impl KnowledgeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns from a freshly scored guess.
    ///
    /// The guess is diffed against every earlier guess of the same game, and
    /// its word's frequency statistics are updated.
    pub fn learn(&mut self, guess: &GuessResult, earlier: &[GuessResult]) {
        for other in earlier {
            let diff = (guess.similarity() - other.similarity()).abs();
            self.record_pair(guess.word(), other.word(), diff);
        }
        self.record_word(guess.word(), guess.similarity());
    }

    /// Adds one diff observation for the pair `(a, b)`. Ignored if `a == b`.
    pub fn record_pair(&mut self, a: &str, b: &str, diff: f64) {
        if let Some(key) = pair_key(a, b) {
            self.word_pairs.entry(key).or_default().add_diff(diff);
        }
    }

    /// Adds one similarity observation for `word`.
    pub fn record_word(&mut self, word: &str, similarity: f64) {
        self.word_frequency
            .entry(word.to_string())
            .or_default()
            .observe(similarity);
    }

    /// Appends a success pattern, keeping only the most recent 50 once more
    /// than 100 are held.
    pub fn record_success(&mut self, pattern: SuccessPattern) {
        self.successful_patterns.push(pattern);
        if self.successful_patterns.len() > PATTERN_CAPACITY {
            let excess = self.successful_patterns.len() - PATTERN_RETAIN;
            self.successful_patterns.drain(..excess);
        }
    }

    /// Closes out a finished game: counts it and credits every phase it used
    /// with its attempt count.
    pub fn finish_game(&mut self, phases: &[Phase], attempts: usize) {
        self.games_played += 1;
        for phase in phases.iter().unique() {
            let usage = self.strategy_effectiveness.entry(*phase).or_default();
            usage.usage_count += 1;
            usage.total_attempts += attempts as u64;
            usage.avg_attempts = usage.total_attempts as f64 / usage.usage_count as f64;
        }
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn successful_patterns(&self) -> &[SuccessPattern] {
        &self.successful_patterns
    }

    pub fn word_frequency(&self, word: &str) -> Option<&WordFrequencyData> {
        self.word_frequency.get(word)
    }

    /// Every word with frequency statistics, in word order.
    pub fn word_frequencies(&self) -> impl Iterator<Item = (&str, &WordFrequencyData)> {
        self.word_frequency.iter().map(|(w, d)| (w.as_str(), d))
    }

    pub fn word_pair(&self, a: &str, b: &str) -> Option<&WordPairData> {
        pair_key(a, b).and_then(|key| self.word_pairs.get(&key))
    }

    /// Every word pair, keyed by canonical pair key, in key order.
    pub fn word_pairs(&self) -> impl Iterator<Item = (&str, &WordPairData)> {
        self.word_pairs.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn phase_usage(&self, phase: Phase) -> Option<&PhaseUsage> {
        self.strategy_effectiveness.get(&phase)
    }

    /// Words whose scores historically track `word` closely.
    ///
    /// Returns every partner of `word` whose average diff is strictly below
    /// `max_avg_diff`, closest first. Pairs whose key cannot be split are
    /// skipped.
    pub fn related_words(&self, word: &str, max_avg_diff: f64) -> Vec<(&str, f64)> {
        self.word_pairs
            .iter()
            .filter_map(|(key, data)| {
                let (a, b) = split_pair_key(key).ok()?;
                let other = if a == word {
                    b
                } else if b == word {
                    a
                } else {
                    return None;
                };
                let avg = data.average_diff()?;
                (avg < max_avg_diff).then(|| (other, avg))
            })
            .sorted_by(|x, y| x.1.total_cmp(&y.1))
            .collect()
    }

    /// Key words of past successes whose recorded similarity lies in
    /// `[min, max]`, most frequent first.
    pub fn successful_words_in_range(&self, min: f64, max: f64) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for pattern in &self.successful_patterns {
            for (word, score) in pattern
                .key_words
                .iter()
                .zip(pattern.final_similarity_scores.iter())
            {
                if (min..=max).contains(score) {
                    *counts.entry(word.as_str()).or_default() += 1;
                }
            }
        }

        counts
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .map(|(word, _)| word)
            .collect()
    }

    /// The mean attempt count of successful games, per phase they used.
    pub fn phase_attempt_averages(&self) -> BTreeMap<Phase, f64> {
        let mut totals: BTreeMap<Phase, (usize, usize)> = BTreeMap::new();
        for pattern in &self.successful_patterns {
            for phase in pattern.strategy_sequence.iter().unique() {
                let entry = totals.entry(*phase).or_default();
                entry.0 += pattern.attempts;
                entry.1 += 1;
            }
        }

        totals
            .into_iter()
            .map(|(phase, (attempts, games))| (phase, attempts as f64 / games as f64))
            .collect()
    }

    /// Summarizes what has been learned so far.
    pub fn stats(&self) -> LearningStats {
        LearningStats::new(self)
    }

    /// Checks that every stored word-pair key is well formed.
    pub fn validate(&self) -> Result<(), StoreError> {
        self.word_pairs
            .keys()
            .try_for_each(|key| split_pair_key(key).map(|_| ()))
    }
}
