//! The vocabulary the solver is allowed to guess from.

use std::{fs, path::Path};

use itertools::Itertools;
use log::warn;

use crate::{catalog, knowledge::PAIR_SEPARATOR, Result, SolverError};

/// Words used when no vocabulary file is available.
const FALLBACK_WORDS: [&str; 14] = [
    "사랑", "시간", "사람", "생각", "마음", "세상", "문제", "사회", "자연", "음식", "기술", "감정",
    "장소", "행동",
];

/// A sorted, duplicate-free list of guessable words.
///
/// Every candidate the solver produces is a member of its lexicon.
///
/// # Examples
///
/// ```rust
/// # use kkomantle_rs::Lexicon;
/// let lexicon = Lexicon::parse("[명사]\n시간\n사람\n\n시간\n")?;
/// assert_eq!(lexicon.len(), 2);
/// assert!(lexicon.contains("사람"));
/// assert!(!lexicon.contains("[명사]"));
/// #
/// # Ok::<_, kkomantle_rs::SolverError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexicon {
    words: Vec<String>,
}

impl Lexicon {
    /// Builds a lexicon from any list of words.
    ///
    /// Words are trimmed, and empty ones are dropped, as are words containing
    /// [`PAIR_SEPARATOR`]. Returns an error if no word is left.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .filter(|w| {
                let reserved = w.contains(PAIR_SEPARATOR);
                if reserved {
                    warn!("dropping \"{}\" from the vocabulary: it contains '{}'", w, PAIR_SEPARATOR);
                }
                !reserved
            })
            .sorted()
            .dedup()
            .collect();

        if words.is_empty() {
            Err(SolverError::EmptyVocabulary)
        } else {
            Ok(Lexicon { words })
        }
    }

    /// Parses the vocabulary text format: one word per line, with blank lines
    /// and `[section]` header lines ignored.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('[')),
        )
    }

    /// Reads and parses a vocabulary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(SolverError::VocabularyIo)?;
        Self::parse(&text)
    }

    /// A small vocabulary made of common words and every word in the
    /// [`catalog`] tables.
    pub fn builtin() -> Self {
        let words = FALLBACK_WORDS
            .iter()
            .copied()
            .chain(catalog::all_words())
            .sorted()
            .dedup()
            .map(str::to_string)
            .collect();
        Lexicon { words }
    }

    /// Returns true if `word` is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    /// All words, sorted.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterates over the words, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_skips_headers_and_blanks() -> Result<()> {
        let lexicon = Lexicon::parse("[감정]\n  사랑 \n\n기쁨\n사랑\n[시간]\n때\n")?;
        assert_eq!(lexicon.words(), &["기쁨", "때", "사랑"]);
        Ok(())
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        assert!(matches!(
            Lexicon::parse("[only headers]\n\n"),
            Err(SolverError::EmptyVocabulary)
        ));
    }

    #[test]
    fn drops_words_with_pair_separator() -> Result<()> {
        let lexicon = Lexicon::from_words(["b|a", "c", "정답"])?;
        assert_eq!(lexicon.words(), &["c", "정답"]);
        assert!(matches!(
            Lexicon::parse("|\na|b\n"),
            Err(SolverError::EmptyVocabulary)
        ));
        Ok(())
    }

    #[test]
    fn builtin_covers_catalog() {
        let lexicon = Lexicon::builtin();
        assert!(catalog::all_words().all(|w| lexicon.contains(w)));
        assert!(lexicon.contains("세상"));
        assert!(lexicon.words().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn load_reads_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new().map_err(SolverError::VocabularyIo)?;
        writeln!(file, "시간\n공간").map_err(SolverError::VocabularyIo)?;

        let lexicon = Lexicon::load(file.path())?;
        assert!(lexicon.contains("공간"));
        assert!(matches!(
            Lexicon::load(file.path().with_extension("missing")),
            Err(SolverError::VocabularyIo(_))
        ));
        Ok(())
    }
}
