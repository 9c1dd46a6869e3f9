//! Ranking candidates by what previous games taught us about them.

use itertools::Itertools;

use crate::knowledge::KnowledgeStore;

/// The learned effectiveness of `word`.
///
/// Zero for a word never observed, so unseen words sort below every word
/// with a positive record. See
/// [`WordFrequencyData::effectiveness()`](crate::knowledge::WordFrequencyData::effectiveness()).
pub fn effectiveness(knowledge: &KnowledgeStore, word: &str) -> f64 {
    knowledge
        .word_frequency(word)
        .map_or(0.0, |data| data.effectiveness())
}

/// Removes duplicates and sorts candidates by descending effectiveness.
///
/// The sort is stable: candidates with equal scores keep the order they were
/// generated in, and only the first occurrence of a duplicate is kept.
pub fn rank<I>(candidates: I, knowledge: &KnowledgeStore) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .unique()
        .map(|word| (effectiveness(knowledge, &word), word))
        .sorted_by(|a, b| b.0.total_cmp(&a.0))
        .map(|(_, word)| word)
        .collect()
}
