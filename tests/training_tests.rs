//! End-to-end training behavior

use hanoi_rl::{HanoiEnv, Trainer, TrainerConfig, greedy_rollout};

fn train(num_disks: usize, episodes: usize, seed: u64) -> (hanoi_rl::QTable, hanoi_rl::TrainingSummary) {
    let config = TrainerConfig {
        episodes,
        seed: Some(seed),
        ..Default::default()
    };
    let mut trainer = Trainer::new(config).unwrap();
    let mut env = HanoiEnv::new(num_disks).unwrap();
    trainer.train(&mut env).unwrap()
}

/// Three disks converge to the known 7-step optimal solution
#[test]
fn test_three_disk_greedy_policy_is_optimal() {
    let (q_table, summary) = train(3, 3000, 7);
    assert_eq!(summary.episodes, 3000);
    assert_eq!(summary.min_steps, Some(7));

    let mut env = HanoiEnv::new(3).unwrap();
    let rollout = greedy_rollout(&mut env, &q_table, 50);
    assert!(rollout.solved);
    assert_eq!(rollout.actions.len(), 7);
    // The 7-step solution is unique: (0,2) (0,1) (2,1) (0,2) (1,0) (1,2) (0,2).
    assert_eq!(rollout.actions, vec![1, 0, 5, 1, 2, 3, 1]);
    // Six intermediate moves at -0.001 each, then the goal reward.
    assert!((rollout.reward - 0.994).abs() < 1e-9);
}

/// Two disks converge with a much smaller episode budget
#[test]
fn test_two_disk_greedy_policy_is_optimal() {
    let (q_table, _) = train(2, 500, 3);

    let mut env = HanoiEnv::new(2).unwrap();
    let rollout = greedy_rollout(&mut env, &q_table, 50);
    assert!(rollout.solved);
    assert_eq!(rollout.actions.len(), 3);
    assert_eq!(rollout.actions, vec![0, 1, 3]);
}

/// Q-values stay finite and bounded by the reward scale
#[test]
fn test_q_values_remain_bounded() {
    let (q_table, _) = train(3, 1000, 11);

    // Rewards lie in [-0.1, 1.0] and gamma is 0.99, so |Q| is capped by
    // max|r| / (1 - gamma) = 100.
    for &value in q_table.values() {
        assert!(value.is_finite());
        assert!(value.abs() <= 100.0);
    }
}

/// Seeded runs are reproducible
#[test]
fn test_seeded_training_is_deterministic() {
    let (first, _) = train(2, 200, 9);
    let (second, _) = train(2, 200, 9);
    assert_eq!(first, second);
}

/// Statistics add up across episodes
#[test]
fn test_summary_accounting() {
    let (_, summary) = train(2, 100, 21);
    assert_eq!(summary.episodes, 100);
    assert!(summary.total_steps >= 100 * 3);
    assert!((summary.avg_steps - summary.total_steps as f64 / 100.0).abs() < 1e-9);
    assert!((summary.avg_reward - summary.total_reward / 100.0).abs() < 1e-9);
    assert_eq!(summary.min_steps, Some(3));
    assert_eq!(summary.truncated_episodes, 0);
}
