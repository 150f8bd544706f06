//! Q-table save/load round-trips through the filesystem

use hanoi_rl::{HanoiEnv, SavedQTable, Trainer, TrainerConfig, greedy_rollout};
use tempfile::TempDir;

#[test]
fn test_trained_table_round_trips_through_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("q_table.mpk");

    let config = TrainerConfig {
        episodes: 300,
        seed: Some(5),
        ..Default::default()
    };
    let mut trainer = Trainer::new(config).unwrap();
    let mut env = HanoiEnv::new(2).unwrap();
    let (q_table, _) = trainer.train(&mut env).unwrap();

    SavedQTable::from_table(&q_table)
        .save_to_file(&file_path)
        .unwrap();

    let loaded = SavedQTable::load_from_file(&file_path).unwrap();
    assert_eq!(loaded.version, SavedQTable::VERSION);
    assert_eq!(loaded.num_disks, 2);
    assert_eq!(loaded.rows, 9);
    assert_eq!(loaded.actions, 6);

    let restored = loaded.into_table().unwrap();
    assert_eq!(restored, q_table);

    // The restored table carries a working policy.
    let rollout = greedy_rollout(&mut env, &restored, 50);
    assert!(rollout.solved);
    assert_eq!(rollout.actions.len(), 3);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("does_not_exist.mpk");
    assert!(SavedQTable::load_from_file(&missing).is_err());
}

#[test]
fn test_zero_table_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("zeros.mpk");

    let table = hanoi_rl::QTable::zeros(4);
    SavedQTable::from_table(&table)
        .save_to_file(&file_path)
        .unwrap();

    let restored = SavedQTable::load_from_file(&file_path)
        .unwrap()
        .into_table()
        .unwrap();
    assert_eq!(restored.rows(), 81);
    assert!(restored.values().iter().all(|&v| v == 0.0));
}
