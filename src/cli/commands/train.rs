//! Train command - Q-learning over the Hanoi environment

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    env::HanoiEnv,
    observer::{EpisodeLogObserver, JsonlObserver, ProgressObserver},
    persistence::{DEFAULT_SAVE_PATH, SavedQTable},
    render::AsciiRenderer,
    trainer::{Trainer, TrainerConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on the Tower of Hanoi")]
pub struct TrainArgs {
    /// Number of disks
    #[arg(long, short = 'd', default_value_t = HanoiEnv::DEFAULT_DISKS)]
    pub disks: usize,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Initial exploration rate
    #[arg(long, default_value_t = 0.9)]
    pub epsilon: f64,

    /// Minimum exploration rate
    #[arg(long, default_value_t = 0.1)]
    pub epsilon_min: f64,

    /// Multiplicative exploration decay per episode
    #[arg(long, default_value_t = 0.009)]
    pub epsilon_decay: f64,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.99)]
    pub gamma: f64,

    /// Per-episode step cap (episodes are unbounded when omitted)
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw the puzzle after each step
    #[arg(long, default_value_t = false)]
    pub render: bool,

    /// Output file for the trained Q-table
    #[arg(long, short = 'O', default_value = DEFAULT_SAVE_PATH)]
    pub output: PathBuf,

    /// Optional JSONL file for per-episode metrics
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Print a line per episode instead of the progress bar
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut env = HanoiEnv::new(args.disks)?;

    let config = TrainerConfig {
        episodes: args.episodes,
        epsilon: args.epsilon,
        epsilon_min: args.epsilon_min,
        epsilon_decay: args.epsilon_decay,
        alpha: args.alpha,
        gamma: args.gamma,
        max_steps: args.max_steps,
        seed: args.seed,
    };
    let mut trainer = Trainer::new(config)?;

    if args.verbose {
        trainer = trainer.with_observer(Box::new(EpisodeLogObserver::new()));
    } else if args.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(metrics_path) = &args.metrics {
        trainer = trainer.with_observer(Box::new(JsonlObserver::new(metrics_path)?));
    }
    if args.render {
        trainer = trainer.with_renderer(AsciiRenderer::new());
    }

    let (q_table, summary) = trainer.train(&mut env)?;

    print_section("Learning is completed");
    print_kv("Episodes", &summary.episodes.to_string());
    print_kv("Total steps", &summary.total_steps.to_string());
    print_kv("Average reward", &format!("{:.4}", summary.avg_reward));
    print_kv("Average steps", &format!("{:.2}", summary.avg_steps));
    match summary.min_steps {
        Some(steps) => print_kv("Minimum steps", &steps.to_string()),
        None => print_kv("Minimum steps", "n/a (no episode reached the goal)"),
    }
    if summary.truncated_episodes > 0 {
        print_kv(
            "Truncated episodes",
            &summary.truncated_episodes.to_string(),
        );
    }

    // The summary above is already on screen, so a failing write cannot
    // silently swallow the training results.
    let saved = SavedQTable::from_table(&q_table);
    saved.save_to_file(&args.output)?;
    println!("\nQ-table saved to {}", args.output.display());

    Ok(())
}
