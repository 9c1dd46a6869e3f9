//! Focused search: stay inside the field the top guesses share, and follow
//! associations two hops out from the best guess.

use crate::{catalog, score};

use super::{expand, Context};

/// How many of the best guesses must share a field.
pub(super) const TOP_GUESSES: usize = 2;

pub(super) fn candidates(ctx: &Context<'_>) -> Vec<String> {
    let top: Vec<&str> = ctx
        .session
        .top_guesses(TOP_GUESSES)
        .into_iter()
        .map(|g| g.word())
        .collect();

    let field = if top.len() >= TOP_GUESSES {
        catalog::common_field(&top)
    } else {
        None
    };
    let field_words = field
        .into_iter()
        .flat_map(|(_, members)| members.iter())
        .filter(|w| !top.contains(w) && ctx.is_candidate(w))
        .map(|w| w.to_string());

    let hops = match ctx.session.best_guess() {
        Some(best) => two_hops(best.word(), ctx),
        None => Vec::new(),
    };

    score::rank(field_words.chain(hops), ctx.knowledge)
}

/// Expansions of `word`, followed by the expansions of each of those.
fn two_hops(word: &str, ctx: &Context<'_>) -> Vec<String> {
    let first = expand::expansions(word, ctx);
    let second: Vec<String> = first
        .iter()
        .flat_map(|w| expand::expansions(w, ctx))
        .collect();

    first.into_iter().chain(second).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{knowledge::KnowledgeStore, lexicon::Lexicon, strategy::test::session_with};

    #[test]
    fn shared_field_comes_first() {
        let lexicon = Lexicon::builtin();
        let session = session_with(&[("교육", 0.35), ("연구", 0.3), ("시간", 0.05)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx);
        // The field lists 학습 right after 교육.
        assert_eq!(words.first().map(String::as_str), Some("학습"));
        assert!(words.contains(&"경험".to_string()));
    }

    #[test]
    fn reaches_two_hops() {
        let lexicon = Lexicon::builtin();
        // 행동 shares a root with 행복, and 활동 is in 행동's group only.
        let session = session_with(&[("행복", 0.4), ("시간", 0.05)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx);
        assert!(words.contains(&"사랑".to_string()));
        assert!(words.contains(&"행동".to_string()));
        assert!(words.contains(&"활동".to_string()));
    }

    #[test]
    fn no_field_without_agreement() {
        let lexicon = Lexicon::builtin();
        let session = session_with(&[("교육", 0.35), ("사랑", 0.3)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx);
        // Without a field the root-sharing expansion of 교육 leads.
        assert_eq!(words.first().map(String::as_str), Some("교류"));
    }
}
