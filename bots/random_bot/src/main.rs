use clap::Parser;
use rectangles::{legal_moves, Board, Color, CornerTracker, DiceRoll, Move, DEFAULT_PORT};
use rectangles_bot_utils::{connect, Bot};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// How often to roll the dice in search of a roll that can be used.
const MAX_ROLLS: usize = 20;

#[derive(Parser)]
struct Args {
    /// Address of the judge
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port of the judge
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How many games to play before disconnecting
    #[arg(short, long, default_value_t = 1)]
    games: usize,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    let (reader, writer) = connect(&args.host, args.port)?;
    RandomBot { rng }.run(reader, writer, args.games)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _color: Color) {}

    fn play_turn(&mut self, board: &Board, tracker: &CornerTracker, color: Color) -> Option<Move> {
        for _ in 0..MAX_ROLLS {
            let dices = DiceRoll::roll(&mut self.rng);
            let moves = legal_moves(board, tracker, color, dices.sum());
            if let Some(&(from, to)) = moves.choose(&mut self.rng) {
                return Some(Move {
                    from,
                    to,
                    color,
                    dices,
                });
            }
            debug!(sum = dices.sum(), "No legal move for this roll");
        }
        None
    }
}
