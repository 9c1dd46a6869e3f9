//! Precision search: morphological variants of the best guess plus words
//! that have historically scored almost exactly like a guessed word.

use std::collections::HashSet;

use crate::{knowledge::split_pair_key, score};

use super::{expand, Context};

/// Average diff below which two words count as near neighbours.
pub(super) const NEAR_NEIGHBOUR_DIFF: f64 = 0.03;

pub(super) fn candidates(ctx: &Context<'_>) -> Vec<String> {
    let variants = match ctx.session.best_guess() {
        Some(best) => expand::morphological_relations(best.word(), ctx),
        None => Vec::new(),
    };

    score::rank(
        variants.into_iter().chain(near_neighbours(ctx)),
        ctx.knowledge,
    )
}

/// Untried partners of any guessed word whose average diff is below
/// [`NEAR_NEIGHBOUR_DIFF`], closest first.
fn near_neighbours(ctx: &Context<'_>) -> Vec<String> {
    let guessed: HashSet<&str> = ctx.session.guesses().iter().map(|g| g.word()).collect();

    let mut found: Vec<(&str, f64)> = ctx
        .knowledge
        .word_pairs()
        .filter_map(|(key, data)| {
            let (a, b) = split_pair_key(key).ok()?;
            let other = match (guessed.contains(a), guessed.contains(b)) {
                (true, false) => b,
                (false, true) => a,
                _ => return None,
            };
            if !ctx.is_candidate(other) {
                return None;
            }
            let avg = data.average_diff()?;
            (avg < NEAR_NEIGHBOUR_DIFF).then(|| (other, avg))
        })
        .collect();
    found.sort_by(|x, y| x.1.total_cmp(&y.1));

    found.into_iter().map(|(word, _)| word.to_string()).collect()
}
