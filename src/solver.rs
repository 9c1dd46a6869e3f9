//! Playing whole games.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::Utc;
use itertools::Itertools;
use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

use crate::{
    game::{Game, ParseFailure},
    knowledge::{KnowledgeStore, SuccessPattern},
    lexicon::Lexicon,
    repository::Repository,
    session::GameSession,
    strategy::{Context, Phase, Stagnation},
    summary::{AbortReason, GameSummary, Outcome},
    StoreError,
};

/// How many of the best guesses a progress report lists.
const PROGRESS_TOP: usize = 5;

/// Plays games, learning from each one.
///
/// A solver owns the vocabulary, the [`KnowledgeStore`] and the
/// [`Repository`] the store is persisted to. The store is loaded once, when
/// the solver is created, and saved at the end of every game.
///
/// Create a solver with [`new()`](Solver::new()) and configure it with the
/// builder methods. Note that these configuration methods consume the
/// existing [`Solver`] and return a new one.
///
/// # Examples
///
/// ```rust
/// # use kkomantle_rs::{repository::InMemory, Feedback, Game, Lexicon, ParseFailure, Solver};
/// struct OneWord;
///
/// impl Game for OneWord {
///     fn submit(&mut self, word: &str) -> Result<Feedback, ParseFailure> {
///         let similarity = if word == "사랑" { 1.0 } else { 0.05 };
///         Ok(Feedback::new(similarity, ""))
///     }
/// }
///
/// let lexicon = Lexicon::from_words(["사랑", "시간", "사람"])?;
/// let mut solver = Solver::new(lexicon, InMemory::new()).seed(7);
///
/// let summary = solver.play(OneWord);
/// assert!(summary.is_solved());
/// assert_eq!(solver.knowledge().games_played(), 1);
/// #
/// # Ok::<_, kkomantle_rs::SolverError>(())
/// ```
#[derive(Debug)]
pub struct Solver<R: Repository> {
    lexicon: Lexicon,
    knowledge: KnowledgeStore,
    repository: R,
    load_error: Option<StoreError>,
    max_attempts: usize,
    max_consecutive_failures: usize,
    solve_threshold: f64,
    key_word_count: usize,
    stagnation: Stagnation,
    progress_interval: usize,
    rng: StdRng,
    stop: Option<Arc<AtomicBool>>,
}

impl<R: Repository> Solver<R> {
    /// Creates a solver, loading previous knowledge from `repository`.
    ///
    /// If loading fails, the solver starts from an empty store and the error
    /// is kept in [`load_error()`](Solver::load_error()).
    ///
    /// Defaults:
    /// 1. at most 500 scored attempts per game
    /// 2. aborts after 5 unscored submissions in a row
    /// 3. solved at a similarity of 0.9999
    /// 4. keeps the top 5 guesses of a solved game as its key words
    /// 5. stagnation over a window of 3 guesses and a threshold of 0.01
    /// 6. reports progress every 10 attempts
    /// 7. an entropy-seeded random number generator
    pub fn new(lexicon: Lexicon, mut repository: R) -> Self {
        let (knowledge, load_error) = match repository.load() {
            Ok(knowledge) => {
                info!(
                    "loaded knowledge from {} games, {} words and {} word pairs",
                    knowledge.games_played(),
                    knowledge.word_frequencies().count(),
                    knowledge.word_pairs().count()
                );
                (knowledge, None)
            }
            Err(e) => {
                warn!("could not load knowledge, starting fresh: {}", e);
                (KnowledgeStore::default(), Some(e))
            }
        };

        Solver {
            lexicon,
            knowledge,
            repository,
            load_error,
            max_attempts: 500,
            max_consecutive_failures: 5,
            solve_threshold: 0.9999,
            key_word_count: 5,
            stagnation: Stagnation::default(),
            progress_interval: 10,
            rng: StdRng::from_entropy(),
            stop: None,
        }
    }

    /// Sets the number of scored attempts after which a game is exhausted.
    pub fn max_attempts(self, max_attempts: usize) -> Self {
        Solver {
            max_attempts,
            ..self
        }
    }

    /// Sets how many unscored submissions in a row abort a game.
    pub fn max_consecutive_failures(self, max_consecutive_failures: usize) -> Self {
        Solver {
            max_consecutive_failures: max_consecutive_failures.max(1),
            ..self
        }
    }

    /// Sets the similarity at which a guess counts as the answer.
    pub fn solve_threshold(self, solve_threshold: f64) -> Self {
        Solver {
            solve_threshold,
            ..self
        }
    }

    /// Sets how many of the best guesses are stored with a solved game.
    pub fn key_word_count(self, key_word_count: usize) -> Self {
        Solver {
            key_word_count,
            ..self
        }
    }

    pub fn stagnation(self, stagnation: Stagnation) -> Self {
        Solver { stagnation, ..self }
    }

    /// Sets how often, in scored attempts, progress is logged. Zero turns
    /// progress reports off.
    pub fn progress_interval(self, progress_interval: usize) -> Self {
        Solver {
            progress_interval,
            ..self
        }
    }

    /// Seeds the random number generator, making games reproducible.
    pub fn seed(self, seed: u64) -> Self {
        Solver {
            rng: StdRng::seed_from_u64(seed),
            ..self
        }
    }

    /// Lets another thread stop the game in progress.
    ///
    /// The flag is checked before every submission. Once it is set, the game
    /// ends as [`Aborted`](Outcome::Aborted) and the knowledge is still saved.
    pub fn stop_signal(self, stop: Arc<AtomicBool>) -> Self {
        Solver {
            stop: Some(stop),
            ..self
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Why the stored knowledge could not be loaded, if it could not.
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Plays one game to the end and returns its summary.
    ///
    /// Every scored guess is folded into the knowledge store as soon as it
    /// arrives. However the game ends, the store is then saved; a failed save
    /// is logged and attached to the summary.
    pub fn play<G: Game>(&mut self, mut game: G) -> GameSummary {
        let mut session = GameSession::new();
        let mut consecutive_failures = 0;
        let mut parse_failures = 0;

        info!(
            "starting game {} with {} words",
            self.knowledge.games_played() + 1,
            self.lexicon.len()
        );

        let outcome = loop {
            if self.is_stopped() {
                info!("stopped after {} attempts", session.attempts());
                break Outcome::Aborted(AbortReason::Cancelled);
            }
            if session.attempts() >= self.max_attempts {
                info!("no answer after {} attempts", session.attempts());
                break Outcome::Exhausted;
            }

            let phase = self.select_phase(&session);
            let word = match self.next_word(&session, phase) {
                Some(word) => word,
                None => {
                    info!("every word in the vocabulary has been tried");
                    break Outcome::Exhausted;
                }
            };
            debug!("attempt {} ({}): {}", session.attempts() + 1, phase, word);

            let scored = game.submit(&word).and_then(|feedback| {
                session
                    .record(&word, feedback.similarity, feedback.rank)
                    .map(|_| ())
                    .map_err(|e| ParseFailure::new(word.as_str(), e.to_string()))
            });
            if let Err(failure) = scored {
                warn!("{}", failure);
                session.reject(&word);
                parse_failures += 1;
                consecutive_failures += 1;
                if consecutive_failures >= self.max_consecutive_failures {
                    warn!("{} submissions in a row were not scored", consecutive_failures);
                    break Outcome::Aborted(AbortReason::TooManyFailures);
                }
                continue;
            }
            consecutive_failures = 0;

            if session.phase() != Some(phase) {
                info!("attempt {}: switching to {}", session.attempts(), phase);
            }
            session.enter_phase(phase);

            let (latest, earlier) = match session.guesses().split_last() {
                Some(split) => split,
                None => continue,
            };
            self.knowledge.learn(latest, earlier);
            debug!("{}", latest);

            if self.progress_interval > 0 && session.attempts() % self.progress_interval == 0 {
                info!(
                    "attempt {}: best {:.4}, top guesses {}",
                    session.attempts(),
                    session.best_similarity(),
                    session.top_guesses(PROGRESS_TOP).iter().join(", ")
                );
            }

            if latest.similarity() >= self.solve_threshold {
                let answer = latest.word().to_string();
                info!("solved \"{}\" in {} attempts", answer, session.attempts());
                let pattern = self.success_pattern(&session, &answer);
                self.knowledge.record_success(pattern);
                break Outcome::Solved { answer };
            }
        };

        self.knowledge
            .finish_game(session.phase_history(), session.attempts());
        let save_error = match self.repository.save(&self.knowledge) {
            Ok(()) => None,
            Err(e) => {
                warn!("could not save knowledge: {}", e);
                Some(e)
            }
        };

        GameSummary::new(outcome, session, parse_failures, save_error)
    }

    /// Returns up to `n` words the solver would try next in `session`, best
    /// first, without submitting anything.
    pub fn recommend(&mut self, session: &GameSession, n: usize) -> Vec<String> {
        let phase = self.select_phase(session);
        let ctx = Context::new(session, &self.lexicon, &self.knowledge);
        phase
            .candidates(&ctx, &mut self.rng)
            .into_iter()
            .take(n)
            .collect()
    }

    fn select_phase(&self, session: &GameSession) -> Phase {
        Phase::select(
            session.best_similarity(),
            session.is_stagnant(&self.stagnation),
        )
    }

    /// The top candidate of `phase`, or a random untried word if the phase
    /// has nothing to offer.
    fn next_word(&mut self, session: &GameSession, phase: Phase) -> Option<String> {
        let ctx = Context::new(session, &self.lexicon, &self.knowledge);
        if let Some(word) = phase.candidates(&ctx, &mut self.rng).into_iter().next() {
            return Some(word);
        }

        debug!("{} has no candidates, picking at random", phase);
        self.lexicon
            .iter()
            .filter(|w| !session.is_tried(w))
            .choose(&mut self.rng)
            .map(str::to_string)
    }

    fn success_pattern(&self, session: &GameSession, answer: &str) -> SuccessPattern {
        let (key_words, final_similarity_scores): (Vec<String>, Vec<f64>) = session
            .top_guesses(self.key_word_count)
            .into_iter()
            .map(|g| (g.word().to_string(), g.similarity()))
            .unzip();

        SuccessPattern {
            answer: answer.to_string(),
            attempts: session.attempts(),
            key_words,
            timestamp: Utc::now(),
            strategy_sequence: session.phase_history().to_vec(),
            final_similarity_scores,
        }
    }

    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .map_or(false, |stop| stop.load(Ordering::Relaxed))
    }
}
