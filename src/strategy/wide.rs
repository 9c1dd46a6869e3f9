//! Wide exploration: find a first anchor by covering unrelated categories.

use std::collections::HashSet;

use rand::{
    seq::{IteratorRandom, SliceRandom},
    Rng,
};

use crate::{
    catalog::{self, CATEGORIES, OPENING_WORDS},
    score,
};

use super::{expand, Context};

pub(super) fn candidates<R: Rng + ?Sized>(ctx: &Context<'_>, rng: &mut R) -> Vec<String> {
    let guesses = ctx.session.guesses();

    if guesses.is_empty() {
        let mut openers: Vec<String> = OPENING_WORDS
            .iter()
            .filter(|w| ctx.is_candidate(w))
            .map(|w| w.to_string())
            .collect();
        if !openers.is_empty() {
            openers.shuffle(rng);
            return openers;
        }
    }

    let represented: HashSet<usize> = guesses
        .iter()
        .flat_map(|g| catalog::categories_of(g.word()).iter().copied())
        .collect();

    let mut unrepresented: Vec<_> = CATEGORIES
        .iter()
        .enumerate()
        .filter(|(i, _)| !represented.contains(i))
        .map(|(_, group)| group)
        .collect();
    unrepresented.shuffle(rng);

    // One seed per category keeps consecutive picks spread out.
    let seeds: Vec<String> = unrepresented
        .iter()
        .filter_map(|(_, words)| words.iter().filter(|w| ctx.is_candidate(w)).choose(rng))
        .map(|w| w.to_string())
        .collect();
    if !seeds.is_empty() {
        return seeds;
    }

    match ctx.session.best_guess() {
        Some(best) => score::rank(expand::expansions(best.word(), ctx), ctx.knowledge),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{knowledge::KnowledgeStore, lexicon::Lexicon, strategy::test::session_with};

    #[test]
    fn first_guess_is_an_opening_word() {
        let lexicon = Lexicon::builtin();
        let session = session_with(&[]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx, &mut StdRng::seed_from_u64(7));
        assert_eq!(words.len(), OPENING_WORDS.len());
        assert!(words.iter().all(|w| OPENING_WORDS.contains(&w.as_str())));
    }

    #[test]
    fn prefers_unrepresented_categories() {
        let lexicon = Lexicon::builtin();
        // 감정 covers "abstract", 시간 covers "time".
        let session = session_with(&[("감정", 0.02), ("시간", 0.03)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        for seed in 0..20 {
            let words = candidates(&ctx, &mut StdRng::seed_from_u64(seed));
            assert_eq!(words.len(), 6);
            for word in &words {
                let categories = catalog::categories_of(word);
                assert!(!categories.contains(&0));
                assert!(!categories.contains(&5));
            }
        }
    }

    #[test]
    fn falls_back_to_expansions_when_all_covered() {
        let lexicon = Lexicon::builtin();
        let all: Vec<(&str, f64)> = CATEGORIES
            .iter()
            .map(|(_, words)| (words[0], 0.05))
            .chain(std::iter::once(("문제", 0.08)))
            .collect();
        let session = session_with(&all);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx, &mut StdRng::seed_from_u64(1));
        assert!(!words.is_empty());
        assert!(words.contains(&"과제".to_string()));
    }
}
