//! What a finished game looked like.

use std::fmt::Display;

use crate::{session::GameSession, strategy::Phase, GuessResult, StoreError};

/// Why a game was stopped before it was solved or ran out of attempts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// The game failed to score too many submissions in a row.
    TooManyFailures,

    /// The stop signal was raised.
    Cancelled,
}

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A guess reached the solve threshold.
    Solved { answer: String },

    /// The attempt budget or the vocabulary ran out first.
    Exhausted,

    /// The game was stopped early.
    Aborted(AbortReason),
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Solved { answer } => write!(f, "solved \"{}\"", answer),
            Outcome::Exhausted => write!(f, "exhausted"),
            Outcome::Aborted(AbortReason::TooManyFailures) => {
                write!(f, "aborted after too many unscored submissions")
            }
            Outcome::Aborted(AbortReason::Cancelled) => write!(f, "cancelled"),
        }
    }
}

/// The result of [`Solver::play()`](crate::Solver::play()).
///
/// A summary is returned for every game, however it ended. Partial state
/// (the guesses made before an abort, for example) is always kept.
#[derive(Debug)]
pub struct GameSummary {
    outcome: Outcome,
    guesses: Vec<GuessResult>,
    best_similarity: f64,
    phase_history: Vec<Phase>,
    rejected: Vec<String>,
    parse_failures: usize,
    save_error: Option<StoreError>,
}

impl GameSummary {
    pub(crate) fn new(
        outcome: Outcome,
        session: GameSession,
        parse_failures: usize,
        save_error: Option<StoreError>,
    ) -> Self {
        GameSummary {
            outcome,
            best_similarity: session.best_similarity(),
            phase_history: session.phase_history().to_vec(),
            rejected: session.rejected().to_vec(),
            guesses: session.guesses().to_vec(),
            parse_failures,
            save_error,
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Number of scored attempts.
    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    /// Similarity of the last scored guess, or 0 if there was none.
    pub fn final_similarity(&self) -> f64 {
        self.guesses.last().map_or(0.0, GuessResult::similarity)
    }

    pub fn best_similarity(&self) -> f64 {
        self.best_similarity
    }

    /// Every scored guess, in attempt order.
    pub fn guesses(&self) -> &[GuessResult] {
        &self.guesses
    }

    /// Phases used, consecutive repeats collapsed.
    pub fn phase_history(&self) -> &[Phase] {
        &self.phase_history
    }

    /// Words the game could not score.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Total number of submissions the game could not score.
    pub fn parse_failures(&self) -> usize {
        self.parse_failures
    }

    /// The error from saving the knowledge store at the end of the game, if
    /// saving failed.
    pub fn save_error(&self) -> Option<&StoreError> {
        self.save_error.as_ref()
    }

    /// Prints the summary to stdout, with the outcome coloured when the
    /// terminal supports it.
    #[cfg(feature = "fancy")]
    pub fn print(&self) -> std::io::Result<()> {
        use std::io::Write;

        use owo_colors::{AnsiColors, OwoColorize, Stream};

        let mut stdout = std::io::stdout();
        let colour = match self.outcome {
            Outcome::Solved { .. } => AnsiColors::Green,
            Outcome::Exhausted => AnsiColors::Yellow,
            Outcome::Aborted(_) => AnsiColors::Red,
        };

        writeln!(stdout, "{:-^80}", " game ")?;
        writeln!(
            stdout,
            "{} after {} attempts",
            self.outcome
                .if_supports_color(Stream::Stdout, |text| text.color(colour)),
            self.attempts()
        )?;
        write!(stdout, "{}", Details(self))?;
        if let Some(e) = &self.save_error {
            writeln!(
                stdout,
                "{} {}",
                "knowledge was not saved:".if_supports_color(Stream::Stdout, |text| text.red()),
                e
            )?;
        }

        Ok(())
    }
}

/// The lines shared by [`GameSummary::print()`] and the [`Display`] impl.
struct Details<'a>(&'a GameSummary);

impl<'a> Display for Details<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary = self.0;
        writeln!(
            f,
            "Best similarity {:.4}, final similarity {:.4}",
            summary.best_similarity,
            summary.final_similarity()
        )?;

        if !summary.phase_history.is_empty() {
            let phases: Vec<_> = summary.phase_history.iter().map(Phase::name).collect();
            writeln!(f, "Phases: {}", phases.join(" -> "))?;
        }

        if summary.parse_failures > 0 {
            writeln!(
                f,
                "{} submissions could not be scored ({} words dropped)",
                summary.parse_failures,
                summary.rejected.len()
            )?;
        }

        Ok(())
    }
}

impl Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", " game ")?;
        writeln!(f, "{} after {} attempts", self.outcome, self.attempts())?;
        write!(f, "{}", Details(self))?;
        if let Some(e) = &self.save_error {
            writeln!(f, "knowledge was not saved: {}", e)?;
        }

        Ok(())
    }
}
