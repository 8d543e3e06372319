//! Ghost Crossing entry point
//!
//! The browser build is driven from JavaScript through `ghost_crossing::web`.
//! Natively this runs a headless attract-mode session: the autopilot plays
//! until the round ends or the tick limit is hit.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use ghost_crossing::consts::TICKS_PER_SECOND;
    use ghost_crossing::sim::{Autopilot, GameEvent, Layout};
    use ghost_crossing::{BestScore, Command, Session, Settings};

    #[derive(Parser)]
    #[command(name = "ghost-crossing")]
    #[command(about = "Run a headless Ghost Crossing round with the autopilot")]
    struct Args {
        /// Autopilot seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many ticks even if the round is still going
        #[arg(long, default_value_t = TICKS_PER_SECOND as u64 * 60 * 5)]
        ticks: u64,
        /// Layout JSON file (defaults to the haunted house)
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Best score JSON file, read at start and updated at the end
        #[arg(long)]
        best_score: Option<PathBuf>,
        /// Print the final snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        let layout = match &args.layout {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading layout {}", path.display()))?;
                Layout::from_json(&json)
                    .map_err(|e| anyhow::anyhow!(e))
                    .with_context(|| format!("parsing layout {}", path.display()))?
            }
            None => Layout::default(),
        };

        let settings = match &args.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading settings {}", path.display()))?;
                Settings::from_json(&json)
                    .with_context(|| format!("parsing settings {}", path.display()))?
            }
            None => Settings::load(),
        };

        let best = args
            .best_score
            .as_deref()
            .map(BestScore::load_from)
            .unwrap_or_default();
        let starting_best = best.score;

        let mut session = Session::new(layout, settings, best);
        let mut pilot = Autopilot::new(args.seed);
        log::info!("Autopilot seed {}, tick limit {}", args.seed, args.ticks);

        let mut goals = 0;
        let mut deaths = 0;
        for _ in 0..args.ticks {
            if let Some(direction) = pilot.next_move(session.state()) {
                session.push(Command::Move(direction));
            }
            for event in session.tick() {
                match event {
                    GameEvent::GoalReached { col } => {
                        goals += 1;
                        log::info!("Goal at column {}", col);
                    }
                    GameEvent::LifeLost { lives_left } => {
                        deaths += 1;
                        log::info!("Life lost, {} left", lives_left);
                    }
                    GameEvent::Won => log::info!("Won!"),
                    GameEvent::GameOver => log::info!("Game over"),
                    _ => {}
                }
            }
            if session.state().phase.is_terminal() {
                break;
            }
        }

        if let Some(path) = &args.best_score {
            let best = session.best_score();
            if best.score > starting_best {
                best.save_to(path)
                    .with_context(|| format!("writing best score {}", path.display()))?;
                log::info!("New best score {} saved", best.score);
            }
        }

        let snapshot = session.snapshot();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("Phase:      {:?}", snapshot.phase);
            println!("Ticks:      {}", snapshot.tick);
            println!("Score:      {}", snapshot.score);
            println!("Best:       {}", snapshot.best_score);
            println!("Lives:      {}", snapshot.lives);
            println!("Goals:      {}/{}", goals, snapshot.goals.len());
            println!("Deaths:     {}", deaths);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    runner::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ghost_crossing::web::WebSession, this is just to satisfy the compiler
}
