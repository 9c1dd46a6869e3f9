//! Gradient search: expand around the best few guesses.

use crate::score;

use super::{expand, Context};

/// How many of the best guesses are expanded.
pub(super) const TOP_GUESSES: usize = 3;

pub(super) fn candidates(ctx: &Context<'_>) -> Vec<String> {
    let pool = ctx
        .session
        .top_guesses(TOP_GUESSES)
        .into_iter()
        .flat_map(|guess| expand::expansions(guess.word(), ctx));

    score::rank(pool, ctx.knowledge)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{knowledge::KnowledgeStore, lexicon::Lexicon, strategy::test::session_with};

    #[test]
    fn expands_top_guesses_only() -> crate::Result<()> {
        let lexicon = Lexicon::builtin();
        let session = session_with(&[
            ("문제", 0.2),
            ("행복", 0.01),
            ("사회", 0.15),
            ("장소", 0.12),
        ]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = candidates(&ctx);
        assert!(words.contains(&"과제".to_string()));
        assert!(words.contains(&"복지".to_string()));
        assert!(words.contains(&"영토".to_string()));
        // 행복 is fourth best, so its group is not expanded.
        assert!(!words.contains(&"즐거움".to_string()));
        Ok(())
    }

    #[test]
    fn learned_words_come_first() {
        let lexicon = Lexicon::builtin();
        let session = session_with(&[("문제", 0.2)]);
        let mut knowledge = KnowledgeStore::new();
        knowledge.record_word("난제", 0.3);
        let ctx = Context::new(&session, &lexicon, &knowledge);

        assert_eq!(candidates(&ctx).first().map(String::as_str), Some("난제"));
    }
}
