use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use drop_connect::ai::{analyze, Agent, MinimaxAgent, RandomAgent};
use drop_connect::config::{EngineConfig, Preset, TerminalRule};
use drop_connect::game::{
    Board, GameOutcome, GameState, Player, DEFAULT_MATCHES_NEEDED, STANDARD_COLS, STANDARD_ROWS,
};

/// Minimax move selection for gravity-drop connection games.
#[derive(Parser)]
#[command(name = "drop-connect", about = "Pick moves for gravity-drop connection games")]
struct Cli {
    /// Increase log detail (-v debug, -vv trace). RUST_LOG also applies.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Choose a move for a position read from a file or stdin
    Choose {
        /// Board file, rows top to bottom; `-` reads stdin
        #[arg(long, default_value = "-")]
        board: PathBuf,

        /// Player to move: first or second. Inferred from piece counts if omitted.
        #[arg(long)]
        turn: Option<Player>,

        /// Pieces in a row needed to win
        #[arg(long, default_value_t = DEFAULT_MATCHES_NEEDED)]
        matches: usize,

        /// Weight preset: easy, medium or hard
        #[arg(long)]
        preset: Option<Preset>,

        /// Path to TOML engine configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the search depth limit
        #[arg(long)]
        depth: Option<usize>,

        /// Search stop rule: nonzero or gameover
        #[arg(long)]
        rule: Option<TerminalRule>,

        /// Disable alpha-beta pruning
        #[arg(long)]
        no_prune: bool,

        /// Print the full search report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a full game between the engine and an opponent
    Play {
        #[arg(long, default_value_t = STANDARD_COLS)]
        width: usize,

        #[arg(long, default_value_t = STANDARD_ROWS)]
        height: usize,

        /// Pieces in a row needed to win
        #[arg(long, default_value_t = DEFAULT_MATCHES_NEEDED)]
        matches: usize,

        /// Weight preset for the engine moving first
        #[arg(long, default_value = "medium")]
        preset: Preset,

        /// Second player: engine or random
        #[arg(long, default_value = "random")]
        opponent: String,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Choose {
            board,
            turn,
            matches,
            preset,
            config,
            depth,
            rule,
            no_prune,
            json,
        } => {
            let engine = engine_config(config.as_deref(), preset, depth, rule, no_prune)?;

            let board = read_board(&board)?;
            let to_move = turn.unwrap_or_else(|| infer_turn(&board));
            let state = GameState::new(board, None, to_move, matches)
                .context("building game state")?;
            if let Some(outcome) = state.outcome() {
                bail!("game is already over: {}", describe(outcome));
            }

            let report = analyze(&state, &engine.evaluation, &engine.search)
                .context("searching for a move")?;
            if json {
                let out = serde_json::to_string_pretty(&report).context("serializing report")?;
                println!("{out}");
            } else {
                println!(
                    "{} plays column {} (row {}), score {}, {} nodes",
                    to_move.name(),
                    report.chosen.col,
                    report.chosen.row,
                    report.score,
                    report.nodes
                );
            }
            Ok(())
        }
        Command::Play {
            width,
            height,
            matches,
            preset,
            opponent,
            seed,
        } => {
            let board = Board::new(width, height).context("building board")?;
            let mut state = GameState::new(board, None, Player::First, matches)
                .context("building game state")?;

            let mut first = MinimaxAgent::from_preset(preset);
            let mut second: Box<dyn Agent> = match opponent.as_str() {
                "engine" => Box::new(MinimaxAgent::from_preset(preset)),
                "random" => Box::new(match seed {
                    Some(seed) => RandomAgent::with_seed(seed),
                    None => RandomAgent::new(),
                }),
                other => bail!("unknown opponent '{}' (expected 'engine' or 'random')", other),
            };

            println!(
                "{} ({}) vs {}, {}x{}, connect {}",
                first.name(),
                preset.name(),
                second.name(),
                width,
                height,
                matches
            );

            while !state.is_terminal() {
                let mover = state.to_move();
                let mv = match mover {
                    Player::First => first.select_move(&state),
                    Player::Second => second.select_move(&state),
                }
                .with_context(|| format!("selecting a move for {}", mover.name()))?;
                println!("{}: column {}", mover.name(), mv.col);
                state = state.apply(mv);
            }

            println!("{}", state.board());
            if let Some(outcome) = state.outcome() {
                println!("{}", describe(outcome));
            }
            Ok(())
        }
    }
}

/// Start from the config file or the preset, then apply command-line overrides.
fn engine_config(
    config: Option<&Path>,
    preset: Option<Preset>,
    depth: Option<usize>,
    rule: Option<TerminalRule>,
    no_prune: bool,
) -> Result<EngineConfig> {
    let mut engine = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::from_preset(preset.unwrap_or_default()),
    };
    // An explicit preset wins over the weights in the config file.
    if let (Some(preset), Some(_)) = (preset, config) {
        engine.evaluation = *preset.config();
    }
    if let Some(depth) = depth {
        engine.search.depth_limit = depth;
    }
    if let Some(rule) = rule {
        engine.search.terminal_rule = rule;
    }
    // Pruning is on unless a config file or --no-prune says otherwise.
    if no_prune {
        engine.search.alpha_beta = false;
    } else if config.is_none() {
        engine.search.alpha_beta = true;
    }
    engine.validate().context("invalid engine configuration")?;
    Ok(engine)
}

fn read_board(path: &Path) -> Result<Board> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading board from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading board from {}", path.display()))?
    };
    text.parse::<Board>().context("parsing board")
}

/// The first mover has moved once more than the second when it is the
/// second mover's turn.
fn infer_turn(board: &Board) -> Player {
    let first = board.pieces(Player::First).count();
    let second = board.pieces(Player::Second).count();
    if first > second {
        Player::Second
    } else {
        Player::First
    }
}

fn describe(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Winner(player) => format!("{} wins", player.name()),
        GameOutcome::Draw => "draw".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("drop-connect-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn pruning_defaults_on_without_a_config_file() {
        let engine = engine_config(None, None, None, None, false).unwrap();
        assert!(engine.search.alpha_beta);
        let engine = engine_config(None, None, None, None, true).unwrap();
        assert!(!engine.search.alpha_beta);
    }

    #[test]
    fn config_file_pruning_setting_is_kept() {
        let path = write_config("no-pruning", "[search]\nalpha_beta = false\ndepth_limit = 2\n");
        let engine = engine_config(Some(&path), None, None, None, false).unwrap();
        assert!(!engine.search.alpha_beta);
        assert_eq!(engine.search.depth_limit, 2);

        let path = write_config("pruning", "[search]\nalpha_beta = true\n");
        let engine = engine_config(Some(&path), None, None, None, false).unwrap();
        assert!(engine.search.alpha_beta);
        let engine = engine_config(Some(&path), None, None, None, true).unwrap();
        assert!(!engine.search.alpha_beta);
    }

    #[test]
    fn command_line_overrides_apply_over_the_file() {
        let path = write_config("overrides", "[search]\ndepth_limit = 2\n");
        let engine = engine_config(
            Some(&path),
            Some(Preset::Hard),
            Some(4),
            Some(TerminalRule::NonZeroScore),
            false,
        )
        .unwrap();
        assert_eq!(engine.evaluation, *Preset::Hard.config());
        assert_eq!(engine.search.depth_limit, 4);
        assert_eq!(engine.search.terminal_rule, TerminalRule::NonZeroScore);
    }
}
