//! Observer pattern for training runs
//!
//! Observers allow composable reporting during training without coupling
//! the trainer to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    trainer::{EpisodeStats, TrainingSummary},
};

/// Observer trait - notified at episode and run boundaries
pub trait TrainingObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _stats: &EpisodeStats) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(stats.episode as u64 + 1);
            pb.set_message(format!("steps:{} ε:{:.3}", stats.steps, stats.epsilon));
        }
        Ok(())
    }

    fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("avg steps:{:.1}", summary.avg_steps));
        }
        Ok(())
    }
}

/// Episode log observer - prints one line per episode
pub struct EpisodeLogObserver;

impl EpisodeLogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EpisodeLogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for EpisodeLogObserver {
    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        println!(
            "Episode {}: steps={} reward={:.3} explored={} exploited={} epsilon={:.3}{}",
            stats.episode + 1,
            stats.steps,
            stats.reward,
            stats.explored,
            stats.exploited,
            stats.epsilon,
            if stats.truncated { " (truncated)" } else { "" },
        );
        Ok(())
    }
}

/// JSONL observer - streams per-episode statistics to a file
///
/// One JSON object per line, consumable by external plotting tools.
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl TrainingObserver for JsonlObserver {
    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        serde_json::to_writer(&mut self.writer, stats)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
