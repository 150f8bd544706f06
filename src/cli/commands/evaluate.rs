//! Evaluate command - run the greedy policy from a saved Q-table

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    env::{ACTIONS, HanoiEnv},
    persistence::{DEFAULT_SAVE_PATH, SavedQTable},
    render::AsciiRenderer,
    trainer::greedy_rollout,
};

#[derive(Parser, Debug)]
#[command(about = "Run the greedy policy derived from a saved Q-table")]
pub struct EvaluateArgs {
    /// Path to a saved Q-table
    #[arg(long, short = 'i', default_value = DEFAULT_SAVE_PATH)]
    pub input: PathBuf,

    /// Step cap for the rollout
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// Draw the puzzle after each move
    #[arg(long, default_value_t = false)]
    pub render: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let saved = SavedQTable::load_from_file(&args.input)?;
    let q_table = saved.into_table()?;
    let mut env = HanoiEnv::new(q_table.num_disks())?;

    let rollout = greedy_rollout(&mut env, &q_table, args.max_steps);

    if args.render {
        // Replay the rollout; rendering is best-effort and a failure
        // only stops the drawing, not the report.
        let mut renderer = AsciiRenderer::new();
        env.reset();
        if renderer.draw(env.state()).is_ok() {
            for &action in &rollout.actions {
                let step = env.step(ACTIONS[action]);
                if renderer.draw(&step.state).is_err() {
                    break;
                }
            }
        }
    }

    print_section("Greedy policy evaluation");
    print_kv("Q-table", &args.input.display().to_string());
    print_kv("Disks", &q_table.num_disks().to_string());
    print_kv("Steps", &rollout.actions.len().to_string());
    print_kv("Reward", &format!("{:.4}", rollout.reward));
    print_kv("Solved", if rollout.solved { "yes" } else { "no" });

    let moves: Vec<String> = rollout
        .actions
        .iter()
        .map(|&action| ACTIONS[action].to_string())
        .collect();
    print_kv("Moves", &moves.join(" "));

    if !rollout.solved {
        println!(
            "\nWarning: the greedy policy did not reach the goal within {} steps.",
            args.max_steps
        );
    }

    Ok(())
}
