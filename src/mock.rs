use std::collections::{HashMap, HashSet};

use crate::game::{Feedback, Game, ParseFailure};

/// A game with a fixed answer and fixed scores.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedGame {
    answer: &'static str,
    scores: HashMap<&'static str, f64>,
    failing: HashSet<&'static str>,
    /// Similarity for words with no script; `None` makes them fail.
    unscripted: Option<f64>,
    submitted: Vec<String>,
}

impl ScriptedGame {
    pub(crate) fn new(answer: &'static str) -> Self {
        Self {
            answer,
            scores: HashMap::new(),
            failing: HashSet::new(),
            unscripted: Some(0.0),
            submitted: Vec::new(),
        }
    }

    pub(crate) fn score(mut self, word: &'static str, similarity: f64) -> Self {
        self.scores.insert(word, similarity);
        self
    }

    pub(crate) fn fail(mut self, word: &'static str) -> Self {
        self.failing.insert(word);
        self
    }

    pub(crate) fn strict(self) -> Self {
        Self {
            unscripted: None,
            ..self
        }
    }

    pub(crate) fn submitted(&self) -> &[String] {
        &self.submitted
    }
}

impl Game for ScriptedGame {
    fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure> {
        self.submitted.push(word.to_string());

        if word == self.answer {
            return Ok(Feedback::new(1.0, "정답!"));
        }
        if self.failing.contains(word) {
            return Err(ParseFailure::new(word, "no score shown"));
        }

        match self.scores.get(word).copied().or(self.unscripted) {
            Some(similarity) => Ok(Feedback::new(similarity, "1000위 이상")),
            None => Err(ParseFailure::new(word, "unknown word")),
        }
    }
}
