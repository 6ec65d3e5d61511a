use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use volley_core::{step, Config, Controller, Difficulty, MatchState, Side};

const FRAME: f32 = 1.0 / 60.0;

/// Headless volleyball match runner
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for the match RNG and AI controllers
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// TOML config file; defaults to $VOLLEY_CONFIG or config/volley.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Points needed to win, overriding the config
    #[arg(long)]
    win_score: Option<u8>,
    #[arg(long, value_enum, default_value = "config")]
    left: Opponent,
    #[arg(long, value_enum, default_value = "hard")]
    right: Opponent,
    /// Give up after this much simulated time
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,
    /// Print a JSON snapshot after each point and at the end
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    /// Human side that never sends input
    HumanIdle,
    /// AI tuned by the config file's [ai] section
    Config,
    Easy,
    Normal,
    Hard,
}

impl Opponent {
    fn controller(self, config: &Config) -> Controller {
        match self {
            Opponent::HumanIdle => Controller::Human,
            Opponent::Config => Controller::Ai(config.ai),
            Opponent::Easy => Controller::Ai(Difficulty::Easy.config()),
            Opponent::Normal => Controller::Ai(Difficulty::Normal.config()),
            Opponent::Hard => Controller::Ai(Difficulty::Hard.config()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if let Some(win_score) = cli.win_score {
        config.win_score = win_score;
    }

    let left = cli.left.controller(&config);
    let right = cli.right.controller(&config);
    let mut state = MatchState::new(config, left, right, cli.seed)?;

    while state.time.now < cli.max_seconds {
        step(&mut state, FRAME)?;

        if let Some(scorer) = state.events().scorer() {
            tracing::info!(
                ?scorer,
                left = state.score.left,
                right = state.score.right,
                time = state.time.now,
                "Point"
            );
            if cli.json {
                println!("{}", serde_json::to_string(&state.snapshot()?)?);
            }
        }

        if state.phase.is_over() {
            break;
        }
    }

    let snapshot = state.snapshot()?;
    if cli.json {
        println!("{}", serde_json::to_string(&snapshot)?);
    }

    match snapshot.score.winner() {
        Some(winner) => {
            let name = match winner {
                Side::Left => "left",
                Side::Right => "right",
            };
            tracing::info!(
                winner = name,
                points = snapshot.score.get(winner),
                conceded = snapshot.score.get(winner.opponent()),
                seconds = snapshot.time,
                "Match finished"
            );
        }
        None => tracing::warn!(
            left = snapshot.score.left,
            right = snapshot.score.right,
            "No winner after {} simulated seconds",
            cli.max_seconds
        ),
    }

    Ok(())
}
