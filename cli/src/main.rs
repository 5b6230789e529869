use std::cell::RefCell;

use clap::{Parser, Subcommand};
use game::{Controller, Difficulty, GameApi, GameType, Session};
use tracing::info;

mod play;
mod transport;

use transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Sync(#[from] game::SyncError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "memory-trainer", about = "Play and inspect memory trainer games from the terminal")]
struct Cli {
    #[arg(long, env = "MEMORY_TRAINER_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a game and play it interactively.
    Play {
        #[arg(long = "type", default_value = "sequence")]
        game_type: GameType,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// Print the server's snapshot of a game.
    Show { game_id: String },
    /// Delete a game on the server.
    Abandon { game_id: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("ignoring .env: {error}");
        }
    }
    init_tracing();

    let cli = Cli::parse();
    let transport = ReqwestTransport::new(&cli.base_url)?;

    match cli.command {
        Command::Play { game_type, difficulty } => {
            let controller = Controller::new(RefCell::new(Session::default()), transport);
            play::run(&controller, game_type, difficulty).await
        }
        Command::Show { game_id } => {
            let snapshot = GameApi::new(transport).fetch_game(&game_id).await?;
            println!("{}", play::describe_snapshot(&snapshot));
            Ok(())
        }
        Command::Abandon { game_id } => {
            GameApi::new(transport).delete_game(&game_id).await?;
            info!(%game_id, "game deleted");
            println!("deleted {game_id}");
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();
}
