use std::{error::Error, path::PathBuf};

use clap::Parser;
use kkomantle_rs::{repository::JsonFile, Lexicon, Solver};

mod replay;

use replay::ReplayGame;

/// Plays a recorded Kkomantle game and learns from it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Recording to play: {"answer": ..., "scores": {word: similarity}}
    replay: PathBuf,

    /// Vocabulary file, one word per line. Uses a small built-in vocabulary
    /// if not given.
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// Where knowledge is kept between runs.
    #[arg(short, long, default_value = "knowledge.json")]
    knowledge: PathBuf,

    /// Scored attempts before giving up.
    #[arg(short, long, default_value_t = 500)]
    max_attempts: usize,

    /// Seed for reproducible games.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print what has been learned after the game.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let lexicon = match &args.vocabulary {
        Some(path) => Lexicon::load(path)?,
        None => Lexicon::builtin(),
    };
    let game = ReplayGame::load(&args.replay)?;
    if !lexicon.contains(game.answer()) {
        log::warn!("the answer is not in the vocabulary, so this game cannot be solved");
    }

    let mut solver =
        Solver::new(lexicon, JsonFile::new(&args.knowledge)).max_attempts(args.max_attempts);
    if let Some(seed) = args.seed {
        solver = solver.seed(seed);
    }
    if solver.load_error().is_some() {
        log::warn!(
            "{} will be kept as {} when the game is saved",
            args.knowledge.display(),
            solver.repository().backup_path().display()
        );
    }

    let summary = solver.play(game);
    summary.print()?;

    if args.stats {
        solver.knowledge().stats().print_table();
    }

    Ok(())
}
