use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

use memorama::core::{decode_history, GameRng};
use memorama::interaction::{RecordingAnimator, RecordingPresenter};
use memorama::{
    CardId, ClickOutcome, GameConfig, Memorama, MemoramaBuilder, PerspectivePicker, Viewport,
};

#[derive(Parser)]
#[command(name = "memorama", about = "Headless driver for the memorama card game core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Click random face-down cards
    Random,
    /// Remember every revealed card and pair them up
    Memory,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the deal and the models a frontend would load
    Deal {
        /// RNG seed for the deal
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Play a session with an automated player
    Play {
        /// RNG seed for the deal and the player
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(long, value_enum, default_value = "memory")]
        strategy: Strategy,
        /// Give up after this many clicks
        #[arg(long, default_value = "500")]
        max_clicks: usize,
        /// Write the click history here
        #[arg(long)]
        save_history: Option<PathBuf>,
    },
    /// Replay a saved click history
    Replay {
        /// Seed the history was recorded with
        #[arg(short, long)]
        seed: u64,
        #[arg(long)]
        history: PathBuf,
    },
}

const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

type Session = Memorama<RecordingAnimator, RecordingPresenter>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Deal { seed } => {
            let game = new_session(&config, seed)?;
            println!("seed={seed} pairs={} grid={}x{}", config.total_pairs, game.grid().columns(), game.grid().rows());
            for request in game.load_requests() {
                println!(
                    "{:>10} {:<24} {:<24} ({:>6.2}, {:>6.2}, {:>4.2})",
                    request.identity.to_string(),
                    request.model.path(),
                    request.material.path(),
                    request.position.x,
                    request.position.y,
                    request.position.z,
                );
            }
            let background = game.background_request();
            println!(
                "{:>10} {:<24} {:<24} ({:>6.2}, {:>6.2}, {:>4.2})",
                "table",
                background.model.path(),
                background.material.path(),
                background.position.x,
                background.position.y,
                background.position.z,
            );
        }
        Commands::Play {
            seed,
            strategy,
            max_clicks,
            save_history,
        } => {
            let mut game = new_session(&config, seed)?;
            game.place_all();
            let clicks = autoplay(&mut game, seed, strategy, max_clicks);
            report(&game, clicks);

            if let Some(path) = save_history {
                let bytes = game.encode_history()?;
                std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), records = game.history().len(), "history saved");
            }
        }
        Commands::Replay { seed, history } => {
            let bytes = std::fs::read(&history).with_context(|| format!("reading {}", history.display()))?;
            let records = decode_history(&bytes)?;

            let mut game = new_session(&config, seed)?;
            game.place_all();
            game.replay(&records);
            game.settle();
            report(&game, records.len());
        }
    }

    Ok(())
}

fn new_session(config: &GameConfig, seed: u64) -> anyhow::Result<Session> {
    let game = MemoramaBuilder::new()
        .config(config.clone())
        .build_with(seed, RecordingAnimator::new(), RecordingPresenter::new())?;
    Ok(game)
}

/// Play until won or out of clicks. Returns the number of clicks made.
fn autoplay(game: &mut Session, seed: u64, strategy: Strategy, max_clicks: usize) -> usize {
    let picker = PerspectivePicker::from_config(game.config());
    let mut rng = GameRng::new(seed).for_context("autoplay");
    // pair index -> cards of that pair seen face-up so far
    let mut seen: FxHashMap<u32, Vec<CardId>> = FxHashMap::default();
    let mut clicks = 0;

    while !game.is_won() && clicks < max_clicks {
        let Some(target) = next_target(game, strategy, &seen, &mut rng) else {
            break;
        };
        let Some(position) = game.state().card(target).map(|c| c.position) else {
            break;
        };
        let Some(point) = picker.project(position, VIEWPORT) else {
            break;
        };

        let outcome = game.click_at(point, VIEWPORT);
        clicks += 1;

        if let Some(card) = outcome.flipped() {
            let entry = seen.entry(card.pair_index()).or_default();
            if !entry.contains(&card) {
                entry.push(card);
            }
        }
        if let ClickOutcome::SecondFlipped(_) = outcome {
            game.settle();
        }
        for event in game.drain_events() {
            info!(event = event.name(), ?event);
        }
    }
    clicks
}

fn next_target(game: &Session, strategy: Strategy, seen: &FxHashMap<u32, Vec<CardId>>, rng: &mut GameRng) -> Option<CardId> {
    let state = game.state();
    let face_down: Vec<CardId> = state.face_down().map(|c| c.id).collect();

    if let Strategy::Memory = strategy {
        // Complete an open round with the partner of the face-up card.
        if let [first] = *state.pending() {
            let partner = first.partner();
            if face_down.contains(&partner) && seen.get(&partner.pair_index()).is_some_and(|s| s.contains(&partner)) {
                return Some(partner);
            }
        } else {
            // Start a round with a pair already fully seen.
            for cards in seen.values() {
                if cards.len() == 2 && cards.iter().all(|c| face_down.contains(c)) {
                    return Some(cards[0]);
                }
            }
        }
        // Otherwise reveal something new.
        let unseen: Vec<CardId> = face_down
            .iter()
            .copied()
            .filter(|c| !seen.get(&c.pair_index()).is_some_and(|s| s.contains(c)))
            .collect();
        if let Some(&card) = rng.choose(&unseen) {
            return Some(card);
        }
    }

    rng.choose(&face_down).copied()
}

fn report(game: &Session, clicks: usize) {
    let state = game.state();
    info!(
        seed = game.seed(),
        clicks,
        pairs_found = state.pairs_found(),
        total_pairs = state.total_pairs(),
        flips = game.animator().commands.len(),
        elapsed_ms = game.now_ms(),
        "session finished"
    );
    if game.presenter().wins.is_empty() {
        println!("Not finished: {}/{} pairs after {clicks} clicks", state.pairs_found(), state.total_pairs());
    } else {
        println!("You won! {} pairs in {clicks} clicks", state.pairs_found());
    }
}
