//! Q-learning trainer for the Hanoi environment
//!
//! Drives episodes against [`HanoiEnv`], owns the Q-table and the
//! exploration schedule, and reports per-episode statistics through
//! [`TrainingObserver`]s.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    env::{ACTION_COUNT, ACTIONS, HanoiEnv},
    error::{Error, Result},
    index::state_to_index,
    observer::TrainingObserver,
    q_table::QTable,
    render::AsciiRenderer,
};

/// Hyperparameters for a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Initial exploration rate
    pub epsilon: f64,

    /// Exploration rate floor
    pub epsilon_min: f64,

    /// Multiplicative epsilon decay applied after each episode
    pub epsilon_decay: f64,

    /// Learning rate α
    pub alpha: f64,

    /// Discount factor γ
    pub gamma: f64,

    /// Optional per-episode step cap; `None` leaves episodes unbounded
    pub max_steps: Option<u32>,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            epsilon: 0.9,
            epsilon_min: 0.1,
            epsilon_decay: 0.009,
            alpha: 0.1,
            gamma: 0.99,
            max_steps: None,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Reject out-of-range hyperparameters before any training starts
    pub fn validate(&self) -> Result<()> {
        fn check_unit(name: &str, value: f64) -> Result<()> {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                });
            }
            Ok(())
        }

        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episode count must be positive".to_string(),
            });
        }
        check_unit("epsilon", self.epsilon)?;
        check_unit("epsilon_min", self.epsilon_min)?;
        check_unit("epsilon_decay", self.epsilon_decay)?;
        check_unit("alpha", self.alpha)?;
        check_unit("gamma", self.gamma)?;
        if self.epsilon_min > self.epsilon {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon_min ({}) must not exceed epsilon ({})",
                    self.epsilon_min, self.epsilon
                ),
            });
        }
        Ok(())
    }
}

/// Statistics for one completed episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Zero-based episode number
    pub episode: usize,
    /// Steps taken this episode
    pub steps: usize,
    /// Reward accumulated this episode
    pub reward: f64,
    /// Actions chosen by exploration
    pub explored: usize,
    /// Actions chosen by exploitation
    pub exploited: usize,
    /// Exploration rate in effect during this episode
    pub epsilon: f64,
    /// True when the episode hit the step cap instead of the goal
    pub truncated: bool,
}

/// Aggregate statistics for a whole training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_steps: usize,
    pub total_reward: f64,
    pub avg_reward: f64,
    pub avg_steps: f64,
    /// Fewest steps of any episode that reached the goal
    pub min_steps: Option<usize>,
    pub truncated_episodes: usize,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning trainer
///
/// The exploration rate is explicit trainer state: it decays after each
/// episode and carries over to the next one.
pub struct Trainer {
    config: TrainerConfig,
    epsilon: f64,
    rng: StdRng,
    observers: Vec<Box<dyn TrainingObserver>>,
    renderer: Option<AsciiRenderer>,
}

impl Trainer {
    /// Create a trainer, failing fast on invalid hyperparameters
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let epsilon = config.epsilon;
        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            epsilon,
            rng,
            observers: Vec::new(),
            renderer: None,
        })
    }

    /// Add an observer notified of episode and run boundaries
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Draw the puzzle after every step
    pub fn with_renderer(mut self, renderer: AsciiRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Run the full episode budget and return the learned table
    pub fn train(&mut self, env: &mut HanoiEnv) -> Result<(QTable, TrainingSummary)> {
        let mut q_table = QTable::zeros(env.num_disks());
        let mut total_reward = 0.0;
        let mut total_steps = 0usize;
        let mut min_steps: Option<usize> = None;
        let mut truncated_episodes = 0usize;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let epsilon = self.epsilon;
            let mut state_index = state_to_index(&env.reset());
            let mut episode_reward = 0.0;
            let mut episode_steps = 0usize;
            let mut explored = 0usize;
            let mut exploited = 0usize;
            let mut truncated = false;

            loop {
                let action = if self.rng.random::<f64>() < epsilon {
                    explored += 1;
                    self.rng.random_range(0..ACTION_COUNT)
                } else {
                    exploited += 1;
                    q_table.greedy_action(state_index)
                };

                let step = env.step(ACTIONS[action]);
                self.render(&step.state);

                let next_index = state_to_index(&step.state);
                episode_reward += step.reward;
                episode_steps += 1;

                q_table.update(
                    state_index,
                    action,
                    step.reward,
                    next_index,
                    self.config.alpha,
                    self.config.gamma,
                );
                state_index = next_index;

                if step.done {
                    // Extra reinforcement of the terminal transition: the
                    // post-transition row is updated under the action slot
                    // that produced it, with no bootstrap term.
                    q_table.terminal_update(next_index, action, step.reward, self.config.alpha);
                    break;
                }

                if let Some(cap) = self.config.max_steps {
                    if episode_steps >= cap as usize {
                        truncated = true;
                        truncated_episodes += 1;
                        break;
                    }
                }
            }

            self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);

            total_reward += episode_reward;
            total_steps += episode_steps;
            if !truncated {
                min_steps = Some(min_steps.map_or(episode_steps, |m| m.min(episode_steps)));
            }

            let stats = EpisodeStats {
                episode,
                steps: episode_steps,
                reward: episode_reward,
                explored,
                exploited,
                epsilon,
                truncated,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&stats)?;
            }
        }

        env.close();

        let episodes = self.config.episodes;
        let summary = TrainingSummary {
            episodes,
            total_steps,
            total_reward,
            avg_reward: total_reward / episodes as f64,
            avg_steps: total_steps as f64 / episodes as f64,
            min_steps,
            truncated_episodes,
        };
        for observer in &mut self.observers {
            observer.on_training_end(&summary)?;
        }

        Ok((q_table, summary))
    }

    /// Rendering is best-effort: the first failure disables the renderer
    /// and training continues.
    fn render(&mut self, state: &crate::env::PuzzleState) {
        let failed = match self.renderer.as_mut() {
            Some(renderer) => match renderer.draw(state) {
                Ok(()) => false,
                Err(err) => {
                    eprintln!("Warning: rendering disabled after failure: {err}");
                    true
                }
            },
            None => false,
        };
        if failed {
            self.renderer = None;
        }
    }
}

/// Result of following the greedy policy from the initial state
#[derive(Debug, Clone)]
pub struct Rollout {
    /// Action indices in the order they were taken
    pub actions: Vec<usize>,
    pub reward: f64,
    pub solved: bool,
}

/// Follow the greedy policy from the initial state for at most `max_steps`
///
/// A step cap is mandatory here: an untrained table can send the greedy
/// policy into a cycle that never reaches the goal.
pub fn greedy_rollout(env: &mut HanoiEnv, q_table: &QTable, max_steps: usize) -> Rollout {
    let mut state_index = state_to_index(&env.reset());
    let mut actions = Vec::new();
    let mut reward = 0.0;
    let mut solved = false;

    while actions.len() < max_steps {
        let action = q_table.greedy_action(state_index);
        let step = env.step(ACTIONS[action]);
        actions.push(action);
        reward += step.reward;
        state_index = state_to_index(&step.state);
        if step.done {
            solved = true;
            break;
        }
    }

    Rollout {
        actions,
        reward,
        solved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_episodes_rejected() {
        let config = TrainerConfig {
            episodes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_alpha_rejected() {
        let config = TrainerConfig {
            alpha: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_epsilon_floor_above_start_rejected() {
        let config = TrainerConfig {
            epsilon: 0.2,
            epsilon_min: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_epsilon_decays_across_episodes() {
        let config = TrainerConfig {
            episodes: 3,
            epsilon: 0.9,
            epsilon_min: 0.1,
            epsilon_decay: 0.5,
            seed: Some(1),
            ..Default::default()
        };
        let mut trainer = Trainer::new(config).unwrap();
        let mut env = HanoiEnv::new(2).unwrap();
        trainer.train(&mut env).unwrap();
        // 0.9 -> 0.45 -> 0.225 -> 0.1125
        assert!((trainer.epsilon() - 0.1125).abs() < 1e-12);
    }

    #[test]
    fn test_epsilon_clamped_at_floor() {
        let config = TrainerConfig {
            episodes: 5,
            epsilon: 0.9,
            epsilon_min: 0.1,
            epsilon_decay: 0.009,
            seed: Some(1),
            ..Default::default()
        };
        let mut trainer = Trainer::new(config).unwrap();
        let mut env = HanoiEnv::new(2).unwrap();
        trainer.train(&mut env).unwrap();
        assert_eq!(trainer.epsilon(), 0.1);
    }

    #[test]
    fn test_step_cap_truncates_episodes() {
        // Three disks cannot be solved in fewer than 7 steps, so a cap of
        // 5 truncates every episode.
        let config = TrainerConfig {
            episodes: 10,
            max_steps: Some(5),
            seed: Some(42),
            ..Default::default()
        };
        let mut trainer = Trainer::new(config).unwrap();
        let mut env = HanoiEnv::new(3).unwrap();
        let (_, summary) = trainer.train(&mut env).unwrap();
        assert_eq!(summary.truncated_episodes, 10);
        assert_eq!(summary.min_steps, None);
        assert_eq!(summary.total_steps, 50);
    }
}
