//! Star Raiders headless runner
//!
//! Plays one session with a simple autopilot at a fixed frame rate, stores
//! the final score and prints the leaderboard.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use star_raiders::audio::LogAudio;
use star_raiders::persistence::JsonScoreStore;
use star_raiders::renderer::NullRenderer;
use star_raiders::sim::{Bounded, GameEvent, GamePhase, GameState, TickInput};
use star_raiders::{Session, Settings};

#[derive(Parser, Debug)]
#[command(name = "star-raiders")]
#[command(about = "Run a headless Star Raiders session driven by an autopilot")]
struct Cli {
    /// Settings JSON (missing fields and unreadable files fall back to defaults)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = 36_000)]
    frames: u32,
    /// Simulated frame duration in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// High score file
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
    /// Name stored with the final score
    #[arg(long, default_value = "AUTOPILOT")]
    name: String,
}

fn main() -> star_raiders::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = cli
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let store = JsonScoreStore::open(&cli.scores)?;

    log::info!("Star Raiders (headless) starting with seed {seed}");
    let mut session = Session::new(settings, seed, Box::new(LogAudio), Box::new(store));
    let mut renderer = NullRenderer;
    let mut prompted = false;

    for frame in 0..cli.frames {
        let input = autopilot(session.state());
        let events = session.frame(frame as f64 * cli.frame_ms, &input, &mut renderer);

        for event in &events {
            match event {
                GameEvent::LevelUp { level } => println!("Level {level} at frame {frame}"),
                GameEvent::HighScorePrompt { .. } => {
                    prompted = true;
                    if let Err(e) = session.submit_high_score(&cli.name) {
                        eprintln!("High score not saved: {e}");
                    }
                }
                _ => {}
            }
        }

        if prompted && session.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Final score {} at level {} ({:?})",
        session.score(),
        session.level(),
        session.phase()
    );
    println!("\nHigh scores:");
    for (rank, entry) in session.high_scores()?.iter().enumerate() {
        println!("{:>3}. {:<16} {}", rank + 1, entry.name, entry.score);
    }
    Ok(())
}

/// Hold fire and line up under the lowest enemy
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    let target = state
        .enemies
        .iter()
        .filter(|e| !e.exploded)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    if let Some(enemy) = target {
        let dx = enemy.center().x - state.player.center().x;
        input.left = dx < -4.0;
        input.right = dx > 4.0;
    }
    input
}
