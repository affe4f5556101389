mod config;
mod input;
mod runner;
mod terminal;

use clap::Parser;
use neon_snake_common::best_score::YamlBestScoreStore;
use neon_snake_common::games::SessionRng;
use neon_snake_common::games::snake::GameSession;
use neon_snake_common::log;
use neon_snake_common::logger::{self, LogSink};
use tokio::sync::mpsc;

use config::get_config_manager;
use input::spawn_input_reader;
use runner::run_session;
use terminal::{TerminalGuard, TerminalPresenter};

const DEFAULT_LOG_FILE: &str = "neon_snake.log";

#[derive(Parser)]
#[command(name = "neon_snake")]
struct Args {
    /// YAML config file; defaults to neon_snake_config.yaml next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Fixed seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    log_file: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = get_config_manager(args.config.as_deref()).get_config()?;

    let log_file = args
        .log_file
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogSink::file(&log_file)?);

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Neon Snake starting with seed {}", rng.seed());

    let best_score_store = YamlBestScoreStore::from_file(&config.best_score_file);
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    let guard = TerminalGuard::enter()?;
    let input_task = spawn_input_reader(command_tx);

    let mut session = GameSession::new(
        config.game.clone(),
        rng,
        best_score_store,
        TerminalPresenter::new(std::io::stdout()),
    );
    run_session(
        &mut session,
        &mut command_rx,
        config.frames_per_second,
        config.max_frame_delta(),
    )
    .await;

    command_rx.close();
    drop(command_rx);
    if let Err(e) = input_task.await {
        log!("Input reader ended abnormally: {}", e);
    }
    drop(guard);

    log!("Neon Snake closed, best score {}", session.best_score());
    Ok(())
}
