use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use toothpath_core::{AgeBracket, Board, GameConfig, Session};

mod play;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BoardChoice {
    Under5,
    FivePlus,
}

impl From<BoardChoice> for AgeBracket {
    fn from(choice: BoardChoice) -> Self {
        match choice {
            BoardChoice::Under5 => AgeBracket::Under5,
            BoardChoice::FivePlus => AgeBracket::FivePlus,
        }
    }
}

/// Plays one kiosk session against the engine and reports every step.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Built-in board for the player's age bracket
    #[arg(short, long, value_enum, default_value_t = BoardChoice::FivePlus)]
    board: BoardChoice,

    /// Load the board from a JSON file instead of a built-in one
    #[arg(long, conflicts_with = "board")]
    board_file: Option<PathBuf>,

    /// Game config as JSON; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Chance of answering each quiz question correctly
    #[arg(long, default_value_t = 0.7)]
    accuracy: f64,

    /// Questions asked per quiz
    #[arg(long, default_value_t = 3)]
    questions: u32,

    /// Give up after this many interactions
    #[arg(long, default_value_t = 200)]
    max_turns: usize,

    /// Print the final snapshot as JSON instead of the play-by-play
    #[arg(long)]
    json: bool,
}

fn load_board(args: &Args) -> Result<Board> {
    match &args.board_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading board {}", path.display()))?;
            Board::from_json(&json).with_context(|| format!("loading board {}", path.display()))
        }
        None => Board::builtin(args.board.into())
            .with_context(|| format!("loading built-in {:?} board", args.board)),
    }
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    if !(0.0..=1.0).contains(&args.accuracy) {
        bail!("accuracy must be between 0 and 1, got {}", args.accuracy);
    }

    let board = load_board(&args)?;
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {seed}");
    log::debug!("config: {config:?}");

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = Session::new(board, config);
    let player = play::Player {
        accuracy: args.accuracy,
        questions: args.questions,
    };

    let finished = play::run(&mut session, &player, args.max_turns, &mut rng, !args.json)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        play::print_summary(&session);
    }

    if !finished {
        bail!("session did not reach the goal within {} steps", args.max_turns);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn board_choice_names() {
        let args = Args::try_parse_from(["toothpath", "--board", "under5", "--seed", "4"]).unwrap();

        assert_eq!(args.board, BoardChoice::Under5);
        assert_eq!(args.seed, Some(4));
        assert!(Args::try_parse_from(["toothpath", "-b", "five-plus"]).is_ok());
    }

    #[test]
    fn board_file_conflicts_with_explicit_board() {
        let result =
            Args::try_parse_from(["toothpath", "--board", "under5", "--board-file", "x.json"]);

        assert!(result.is_err());
    }
}
