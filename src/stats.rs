//! Reporting on what the knowledge store has learned.

use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;

use crate::{knowledge::KnowledgeStore, strategy::Phase};

/// How many of the most effective words a report lists.
const TOP_WORDS: usize = 5;

/// A snapshot of a [`KnowledgeStore`], produced by
/// [`KnowledgeStore::stats()`].
#[derive(Clone, Debug, PartialEq)]
pub struct LearningStats {
    games_played: u64,
    word_pairs: usize,
    unique_words: usize,
    successful_patterns: usize,
    phase_attempt_averages: BTreeMap<Phase, f64>,
    top_words: Vec<(String, f64)>,
}

impl LearningStats {
    pub(crate) fn new(knowledge: &KnowledgeStore) -> Self {
        let top_words = knowledge
            .word_frequencies()
            .map(|(word, data)| (word.to_string(), data.effectiveness()))
            .sorted_by(|a, b| b.1.total_cmp(&a.1))
            .take(TOP_WORDS)
            .collect();

        LearningStats {
            games_played: knowledge.games_played(),
            word_pairs: knowledge.word_pairs().count(),
            unique_words: knowledge.word_frequencies().count(),
            successful_patterns: knowledge.successful_patterns().len(),
            phase_attempt_averages: knowledge.phase_attempt_averages(),
            top_words,
        }
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Number of word pairs with diff statistics.
    pub fn word_pairs(&self) -> usize {
        self.word_pairs
    }

    /// Number of distinct words ever scored.
    pub fn unique_words(&self) -> usize {
        self.unique_words
    }

    pub fn successful_patterns(&self) -> usize {
        self.successful_patterns
    }

    /// Mean attempts of the solved games each phase took part in.
    pub fn phase_attempt_averages(&self) -> &BTreeMap<Phase, f64> {
        &self.phase_attempt_averages
    }

    /// The most effective words with their scores, best first.
    pub fn top_words(&self) -> &[(String, f64)] {
        &self.top_words
    }

    /// Prints the statistics as a table.
    #[cfg(feature = "fancy")]
    pub fn print_table(&self) {
        use comfy_table::{Cell, CellAlignment, Table};

        let mut table = Table::new();
        if table.is_tty() {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        table.set_header(vec!["", "value"]);

        table.add_row(vec![
            Cell::new("games played"),
            Cell::new(self.games_played).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("word pairs"),
            Cell::new(self.word_pairs).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("unique words"),
            Cell::new(self.unique_words).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("success patterns"),
            Cell::new(self.successful_patterns).set_alignment(CellAlignment::Right),
        ]);
        for (phase, avg) in &self.phase_attempt_averages {
            table.add_row(vec![
                Cell::new(format!("avg. attempts, {}", phase)),
                Cell::new(format!("{:.1}", avg)).set_alignment(CellAlignment::Right),
            ]);
        }
        for (i, (word, score)) in self.top_words.iter().enumerate() {
            table.add_row(vec![
                Cell::new(format!("effective word #{}", i + 1)),
                Cell::new(format!("{} ({:.3})", word, score)),
            ]);
        }

        println!("{}", table);
    }
}

impl Display for LearningStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", " learning ")?;
        writeln!(f, "Played {} games", self.games_played)?;
        writeln!(
            f,
            "Know {} words and {} word pairs, with {} success patterns",
            self.unique_words, self.word_pairs, self.successful_patterns
        )?;

        for (phase, avg) in &self.phase_attempt_averages {
            writeln!(f, "Solved games using {} took {:.1} attempts", phase, avg)?;
        }

        if !self.top_words.is_empty() {
            writeln!(
                f,
                "Most effective words: {}",
                self.top_words
                    .iter()
                    .map(|(word, score)| format!("{} ({:.3})", word, score))
                    .join(", ")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::knowledge::SuccessPattern;

    #[test]
    fn summarizes_store() {
        let mut knowledge = KnowledgeStore::new();
        for (word, sim) in [
            ("가", 0.1),
            ("나", 0.5),
            ("다", 0.2),
            ("라", 0.3),
            ("마", 0.4),
            ("바", 0.05),
            ("나", 0.5),
        ] {
            knowledge.record_word(word, sim);
        }
        knowledge.record_pair("가", "나", 0.4);
        knowledge.record_success(SuccessPattern {
            answer: "정답".to_string(),
            attempts: 12,
            key_words: vec!["나".to_string()],
            timestamp: Utc::now(),
            strategy_sequence: vec![Phase::WideExploration, Phase::PrecisionSearch],
            final_similarity_scores: vec![0.5],
        });
        knowledge.finish_game(&[Phase::WideExploration, Phase::PrecisionSearch], 12);

        let stats = knowledge.stats();
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.unique_words(), 6);
        assert_eq!(stats.word_pairs(), 1);
        assert_eq!(stats.successful_patterns(), 1);
        assert_eq!(
            stats.phase_attempt_averages().get(&Phase::PrecisionSearch),
            Some(&12.0)
        );

        let top: Vec<_> = stats.top_words().iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(top, vec!["나", "마", "라", "다", "가"]);

        let text = stats.to_string();
        assert!(text.contains("Played 1 games"));
        assert!(text.contains("precision search took 12.0 attempts"));
    }

    #[test]
    fn empty_store() {
        let stats = KnowledgeStore::new().stats();
        assert_eq!(stats.unique_words(), 0);
        assert!(stats.top_words().is_empty());
        assert!(stats.phase_attempt_averages().is_empty());
    }
}
