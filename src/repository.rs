//! Loading and saving the [`KnowledgeStore`].

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{knowledge::KnowledgeStore, StoreError};

/// Somewhere a [`KnowledgeStore`] can be kept between runs.
pub trait Repository {
    /// Loads the stored knowledge, or an empty store if nothing was saved yet.
    fn load(&mut self) -> Result<KnowledgeStore, StoreError>;

    /// Replaces the stored knowledge with `knowledge`.
    fn save(&mut self, knowledge: &KnowledgeStore) -> Result<(), StoreError>;
}

impl<R: Repository + ?Sized> Repository for &mut R {
    fn load(&mut self) -> Result<KnowledgeStore, StoreError> {
        (**self).load()
    }

    fn save(&mut self, knowledge: &KnowledgeStore) -> Result<(), StoreError> {
        (**self).save(knowledge)
    }
}

/// A single pretty-printed JSON file.
///
/// A missing file loads as an empty store. Saving writes to a sibling
/// temporary file first and then renames it over the target, so a crash
/// mid-write leaves the previous contents intact.
///
/// If the last load failed on a file that exists, the next save first moves
/// that file to [`backup_path()`](JsonFile::backup_path()).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
    unreadable: bool,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFile {
            path: path.into(),
            unreadable: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a file that could not be loaded is kept once it is replaced.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    fn read(&self) -> Result<KnowledgeStore, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(KnowledgeStore::default()),
            Err(e) => return Err(e.into()),
        };

        let knowledge: KnowledgeStore = serde_json::from_reader(BufReader::new(file))?;
        knowledge.validate()?;
        Ok(knowledge)
    }
}

impl Repository for JsonFile {
    fn load(&mut self) -> Result<KnowledgeStore, StoreError> {
        let result = self.read();
        self.unreadable = result.is_err();
        result
    }

    fn save(&mut self, knowledge: &KnowledgeStore) -> Result<(), StoreError> {
        if self.unreadable {
            match fs::rename(&self.path, self.backup_path()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            self.unreadable = false;
        }

        let staging = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&staging)?);
            serde_json::to_writer_pretty(&mut writer, knowledge)?;
            writer.flush()?;
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// Keeps the last saved store in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    stored: Option<KnowledgeStore>,
    saves: usize,
}

impl InMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `knowledge`, as if it had been saved before.
    pub fn with(knowledge: KnowledgeStore) -> Self {
        InMemory {
            stored: Some(knowledge),
            saves: 0,
        }
    }

    /// The most recently saved store.
    pub fn stored(&self) -> Option<&KnowledgeStore> {
        self.stored.as_ref()
    }

    /// How many times [`save()`](Repository::save()) was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Repository for InMemory {
    fn load(&mut self) -> Result<KnowledgeStore, StoreError> {
        Ok(self.stored.clone().unwrap_or_default())
    }

    fn save(&mut self, knowledge: &KnowledgeStore) -> Result<(), StoreError> {
        self.stored = Some(knowledge.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::{
        knowledge::SuccessPattern,
        session::GuessResult,
        strategy::Phase,
    };

    fn sample() -> KnowledgeStore {
        let mut knowledge = KnowledgeStore::new();
        let history = vec![
            GuessResult::new("사랑", 0.12, "", 1).unwrap(),
            GuessResult::new("행복", 0.34, "", 2).unwrap(),
        ];
        knowledge.learn(&history[0], &[]);
        knowledge.learn(&history[1], &history[..1]);
        for _ in 0..120 {
            knowledge.record_pair("기쁨", "사랑", 0.015);
        }
        knowledge.record_success(SuccessPattern {
            answer: "정답".to_string(),
            attempts: 2,
            key_words: vec!["행복".to_string(), "사랑".to_string()],
            timestamp: Utc::now(),
            strategy_sequence: vec![Phase::WideExploration, Phase::FocusedSearch],
            final_similarity_scores: vec![0.34, 0.12],
        });
        knowledge.finish_game(&[Phase::WideExploration, Phase::FocusedSearch], 2);
        knowledge
    }

    #[test]
    fn json_round_trip() -> Result<(), StoreError> {
        let dir = tempfile::tempdir()?;
        let mut repo = JsonFile::new(dir.path().join("knowledge.json"));

        assert_eq!(repo.load()?, KnowledgeStore::default());

        let knowledge = sample();
        repo.save(&knowledge)?;
        let loaded = repo.load()?;
        assert_eq!(loaded, knowledge);

        // Saving what was loaded changes nothing.
        repo.save(&loaded)?;
        assert_eq!(fs::read_to_string(repo.path())?, serde_json::to_string_pretty(&knowledge)?);
        Ok(())
    }

    #[test]
    fn json_uses_documented_shape() -> Result<(), StoreError> {
        let value = serde_json::to_value(sample())?;
        assert_eq!(value["games_played"], 1);
        assert_eq!(value["word_pairs"]["사랑|행복"]["co_occurrence_count"], 1);
        assert_eq!(
            value["word_pairs"]["기쁨|사랑"]["similarity_diffs"]
                .as_array()
                .map(Vec::len),
            Some(69)
        );
        assert_eq!(value["word_frequency"]["행복"]["count"], 1);
        assert_eq!(value["successful_patterns"][0]["answer"], "정답");
        assert_eq!(
            value["successful_patterns"][0]["strategy_sequence"][1],
            "FOCUSED_SEARCH"
        );
        Ok(())
    }

    #[test]
    fn loads_minimal_documents() -> Result<(), StoreError> {
        let knowledge: KnowledgeStore = serde_json::from_str(
            r#"{
                "games_played": 4,
                "successful_patterns": [
                    {"answer": "정답", "attempts": 12, "key_words": ["사랑"], "timestamp": "2024-01-01T00:00:00Z"}
                ],
                "word_frequency": {"사랑": {"count": 2, "avg_similarity": 0.2, "best_similarity": 0.3}},
                "word_pairs": {"사랑|시간": {"similarity_diffs": [0.1], "co_occurrence_count": 3}}
            }"#,
        )?;

        assert_eq!(knowledge.games_played(), 4);
        assert!(knowledge.successful_patterns()[0].strategy_sequence.is_empty());
        assert_eq!(knowledge.word_pair("시간", "사랑").map(|p| p.co_occurrence_count()), Some(3));
        Ok(())
    }

    #[test]
    fn rejects_malformed_keys() -> Result<(), StoreError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("knowledge.json");
        fs::write(
            &path,
            r#"{"word_pairs": {"시간|사랑": {"similarity_diffs": [], "co_occurrence_count": 0}}}"#,
        )?;

        assert!(matches!(
            JsonFile::new(&path).load(),
            Err(StoreError::MalformedPairKey(_))
        ));
        Ok(())
    }

    #[test]
    fn unreadable_file_is_backed_up_before_overwrite() -> Result<(), StoreError> {
        let dir = tempfile::tempdir()?;
        let mut repo = JsonFile::new(dir.path().join("knowledge.json"));
        fs::write(repo.path(), "not json")?;

        assert!(matches!(repo.load(), Err(StoreError::Serde(_))));
        let knowledge = sample();
        repo.save(&knowledge)?;

        assert_eq!(fs::read_to_string(repo.backup_path())?, "not json");
        assert_eq!(repo.load()?, knowledge);

        // Only the unreadable file is kept; later saves leave the backup alone.
        repo.save(&KnowledgeStore::default())?;
        assert_eq!(fs::read_to_string(repo.backup_path())?, "not json");
        Ok(())
    }

    #[test]
    fn readable_file_is_not_backed_up() -> Result<(), StoreError> {
        let dir = tempfile::tempdir()?;
        let mut repo = JsonFile::new(dir.path().join("knowledge.json"));
        repo.save(&sample())?;
        repo.load()?;
        repo.save(&KnowledgeStore::default())?;
        assert!(!repo.backup_path().exists());
        Ok(())
    }

    #[test]
    fn in_memory_counts_saves() -> Result<(), StoreError> {
        let mut repo = InMemory::new();
        assert_eq!(repo.load()?, KnowledgeStore::default());
        repo.save(&sample())?;
        repo.save(&sample())?;
        assert_eq!(repo.saves(), 2);
        assert_eq!(repo.load()?.games_played(), 1);
        Ok(())
    }
}
