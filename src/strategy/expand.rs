//! Word-to-word expansions shared by several generators.

use crate::catalog::{self, SUFFIXES};

use super::Context;

/// Root-sharing expansions kept per source word.
const MAX_ROOT_EXPANSIONS: usize = 10;

/// Derived words may be at most this many characters longer than their
/// source.
const MAX_EXTRA_CHARS: usize = 2;

/// The morphological root used to find words of the same family.
///
/// Words longer than two characters keep their first two; two-character
/// words keep their first. Single characters have no usable root.
///
/// # Examples
///
/// ```rust
/// # use kkomantle_rs::strategy::root_of;
/// assert_eq!(root_of("교육자").as_deref(), Some("교육"));
/// assert_eq!(root_of("교육").as_deref(), Some("교"));
/// assert_eq!(root_of("때"), None);
/// ```
pub fn root_of(word: &str) -> Option<String> {
    let len = word.chars().count();
    let take = match len {
        0 | 1 => return None,
        2 => 1,
        _ => 2,
    };
    Some(word.chars().take(take).collect())
}

/// Swaps the last character of `word` for each of the [`SUFFIXES`].
///
/// Words of two characters or fewer produce nothing, since stripping them
/// would leave a root too short to mean anything. The results are not
/// checked against any vocabulary.
///
/// # Examples
///
/// ```rust
/// # use kkomantle_rs::strategy::morphological_variants;
/// let variants = morphological_variants("교육자");
/// assert!(variants.contains(&"교육적".to_string()));
/// assert!(variants.contains(&"교육하다".to_string()));
/// assert!(morphological_variants("교육").is_empty());
/// ```
pub fn morphological_variants(word: &str) -> Vec<String> {
    let mut chars = word.chars();
    if chars.clone().count() <= 2 {
        return Vec::new();
    }
    chars.next_back();
    let stem = chars.as_str();

    SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", stem, suffix))
        .filter(|variant| variant != word)
        .collect()
}

/// Vocabulary words sharing `word`'s root.
pub(super) fn root_expansions(word: &str, ctx: &Context<'_>) -> Vec<String> {
    let root = match root_of(word) {
        Some(root) => root,
        None => return Vec::new(),
    };
    let max_len = word.chars().count() + MAX_EXTRA_CHARS;

    ctx.lexicon
        .iter()
        .filter(|w| w.starts_with(root.as_str()) && *w != word)
        .filter(|w| w.chars().count() <= max_len)
        .filter(|w| ctx.is_candidate(w))
        .take(MAX_ROOT_EXPANSIONS)
        .map(str::to_string)
        .collect()
}

/// Vocabulary words sharing a hand-authored group with `word`.
pub(super) fn category_mates(word: &str, ctx: &Context<'_>) -> Vec<String> {
    catalog::related_words(word)
        .into_iter()
        .filter(|w| ctx.is_candidate(w))
        .map(str::to_string)
        .collect()
}

/// Vocabulary words that are morphological variants of `word`.
pub(super) fn morphological_relations(word: &str, ctx: &Context<'_>) -> Vec<String> {
    morphological_variants(word)
        .into_iter()
        .filter(|w| ctx.is_candidate(w))
        .collect()
}

/// Every expansion of one word: root-sharing words, then category mates,
/// then morphological relations, without duplicates.
pub(super) fn expansions(word: &str, ctx: &Context<'_>) -> Vec<String> {
    let mut all = root_expansions(word, ctx);
    for w in category_mates(word, ctx)
        .into_iter()
        .chain(morphological_relations(word, ctx))
    {
        if !all.contains(&w) {
            all.push(w);
        }
    }
    all
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{knowledge::KnowledgeStore, lexicon::Lexicon, strategy::test::session_with};

    #[test]
    fn root_expansions_share_prefix() -> crate::Result<()> {
        let lexicon = Lexicon::from_words(["교육", "교육자", "교육적", "교통", "교육학개론서", "학교"])?;
        let session = session_with(&[("교육자", 0.3)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        assert_eq!(root_expansions("교육자", &ctx), vec!["교육", "교육적"]);
        Ok(())
    }

    #[test]
    fn expansions_are_unique_and_untried() -> crate::Result<()> {
        let lexicon = Lexicon::from_words(["교육", "교육하다", "교육적", "공부", "연구", "복지"])?;
        let session = session_with(&[("교육적", 0.3), ("연구", 0.1)]);
        let knowledge = KnowledgeStore::new();
        let ctx = Context::new(&session, &lexicon, &knowledge);

        let words = expansions("교육자", &ctx);
        assert_eq!(words, vec!["교육", "교육하다"]);

        let words = expansions("교육", &ctx);
        assert!(words.contains(&"공부".to_string()));
        assert!(words.contains(&"복지".to_string()));
        assert!(!words.contains(&"연구".to_string()));
        Ok(())
    }
}
