use std::net::TcpListener;
use std::path::PathBuf;

use clap::Parser;
use judge::{check_recording_directory, serve, Config};
use rectangles::{DEFAULT_PORT, WIN_THRESHOLD};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// The score at which a player wins
    #[arg(short, long, default_value_t = WIN_THRESHOLD)]
    win_threshold: u32,

    /// Record the games' messages as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    if let Some(dir_path) = &args.record_games_to_directory {
        check_recording_directory(dir_path)?;
    }

    let config = Config {
        win_threshold: args.win_threshold,
        record_games_to_directory: args.record_games_to_directory,
    };

    let listener = TcpListener::bind((args.host.as_str(), args.port))?;
    info!(address = %listener.local_addr()?, "Waiting for players");
    serve(listener, config)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
