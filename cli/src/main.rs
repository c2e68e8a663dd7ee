mod config;
mod render;

use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tictactoe_engine::config::Validate;
use tictactoe_engine::{
    GameController, GameMode, GameSession, MoveOutcome, SessionRng, log, logger,
};

use config::{CONFIG_FILE, get_config_manager};
use render::render_board;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against a friend or the computer")]
struct Args {
    /// YAML config file; missing file means defaults
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    #[arg(long)]
    mode: Option<GameMode>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    delay_ms: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

enum Command {
    Move(usize, usize),
    Reset,
    Mode(GameMode),
    Score,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["reset"] => Ok(Command::Reset),
        ["score"] => Ok(Command::Score),
        ["help"] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        ["mode", mode] => mode.parse().map(Command::Mode),
        [row, col] => {
            let row = row.parse().map_err(|_| format!("Invalid row: {}", row))?;
            let col = col.parse().map_err(|_| format!("Invalid column: {}", col))?;
            Ok(Command::Move(row, col))
        }
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}

const HELP: &str = "Commands: <row> <col> | reset | mode human|computer | score | help | quit";

async fn print_game(session: &GameSession) {
    let status = session.status().await;
    let board = session.board().await;
    print!("{}", render_board(&board, &status));
    println!("{}", status);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(&args.config).get_config()?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay_ms) = args.delay_ms {
        config.thinking_delay_ms = delay_ms;
    }
    config.validate()?;

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting {} game (seed {})", config.mode, rng.seed());

    let controller = GameController::new(config.mode, rng);
    let mut session = GameSession::new(controller, Duration::from_millis(config.thinking_delay_ms));

    println!("{}", HELP);
    print_game(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Move(row, col)) => {
                match session.make_move(row, col).await {
                    MoveOutcome::Accepted => {
                        if session.status().await.opponent_thinking {
                            print_game(&session).await;
                            session.wait_for_opponent().await;
                        }
                    }
                    MoveOutcome::Rejected(reason) => println!("Move rejected: {}", reason),
                }
                print_game(&session).await;
            }
            Ok(Command::Reset) => {
                session.reset_game().await;
                print_game(&session).await;
            }
            Ok(Command::Mode(mode)) => {
                session.set_mode(mode).await;
                println!("Mode: {}", mode);
                print_game(&session).await;
            }
            Ok(Command::Score) => {
                let tally = session.score_tally().await;
                println!("X: {}  O: {}", tally.x, tally.o);
            }
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    log!("Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert!(matches!(parse_command("1 2"), Ok(Command::Move(1, 2))));
        assert!(matches!(parse_command("  0   0 "), Ok(Command::Move(0, 0))));
    }

    #[test]
    fn test_parse_keywords() {
        assert!(matches!(parse_command("reset"), Ok(Command::Reset)));
        assert!(matches!(parse_command("mode human"), Ok(Command::Mode(GameMode::Human))));
        assert!(matches!(parse_command("quit"), Ok(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("a b").is_err());
        assert!(parse_command("mode robot").is_err());
        assert!(parse_command("1 2 3").is_err());
    }
}
