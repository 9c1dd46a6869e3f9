//! Playing against a recorded game instead of the live site.

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use kkomantle_rs::{Feedback, Game, ParseFailure};
use serde::Deserialize;

/// Words ranked below this are shown without a number, as the site does.
const RANKED: usize = 1000;

/// The replay file format.
#[derive(Debug, Deserialize)]
struct Recording {
    answer: String,
    scores: HashMap<String, f64>,
}

/// A game whose scores come from a recording.
///
/// The recording is a JSON object with the hidden `answer` and a `scores`
/// table from word to similarity. Words missing from the table cannot be
/// scored, like words the site does not know.
#[derive(Debug, Clone)]
pub struct ReplayGame {
    answer: String,
    scores: HashMap<String, f64>,
    /// Recorded words, most similar first.
    ranking: Vec<String>,
}

impl ReplayGame {
    pub fn new(answer: impl Into<String>, scores: HashMap<String, f64>) -> Self {
        let mut ranking: Vec<String> = scores.keys().cloned().collect();
        ranking.sort_by(|a, b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(b)));

        ReplayGame {
            answer: answer.into(),
            scores,
            ranking,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let recording: Recording = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(Self::new(recording.answer, recording.scores))
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    fn rank_label(&self, word: &str) -> String {
        match self.ranking.iter().position(|w| w == word) {
            Some(i) if i < RANKED => format!("{}위", i + 1),
            _ => format!("{}위 이상", RANKED),
        }
    }
}

impl Game for ReplayGame {
    fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure> {
        if word == self.answer {
            return Ok(Feedback::new(1.0, "정답!"));
        }

        match self.scores.get(word) {
            Some(&similarity) => Ok(Feedback::new(similarity, self.rank_label(word))),
            None => Err(ParseFailure::new(word, "not in the recording")),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn scores_from_recording() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"answer": "정답", "scores": {{"사랑": 0.42, "시간": 0.1, "사람": 0.3}}}}"#
        )?;

        let mut game = ReplayGame::load(file.path())?;
        assert_eq!(game.answer(), "정답");
        assert_eq!(game.submit("사랑")?, Feedback::new(0.42, "1위"));
        assert_eq!(game.submit("시간")?, Feedback::new(0.1, "3위"));
        assert_eq!(game.submit("정답")?.similarity, 1.0);
        assert!(game.submit("없는말").is_err());
        Ok(())
    }
}
