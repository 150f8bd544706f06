//! Tower of Hanoi environment
//!
//! Models the puzzle dynamics: disk positions, move legality, the
//! state transition for each of the six peg-to-peg actions, and the
//! reward signal. The environment is stateful within an episode and
//! reset between episodes; it knows nothing about the learner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of pegs in the puzzle
pub const PEG_COUNT: usize = 3;

/// Number of distinct (source, destination) actions
pub const ACTION_COUNT: usize = 6;

/// Reward for a legal move that does not reach the goal
pub const REWARD_MOVE: f64 = -0.001;

/// Reward for an illegal move (state unchanged)
pub const REWARD_ILLEGAL: f64 = -0.1;

/// Reward for reaching the goal state
pub const REWARD_GOAL: f64 = 1.0;

/// A move of the top disk from one peg to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub source: u8,
    pub destination: u8,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.source, self.destination)
    }
}

/// Fixed action table, order-significant external contract:
/// index → (source, destination)
pub const ACTIONS: [Action; ACTION_COUNT] = [
    Action {
        source: 0,
        destination: 1,
    },
    Action {
        source: 0,
        destination: 2,
    },
    Action {
        source: 1,
        destination: 0,
    },
    Action {
        source: 1,
        destination: 2,
    },
    Action {
        source: 2,
        destination: 0,
    },
    Action {
        source: 2,
        destination: 1,
    },
];

/// Peg assignment of every disk
///
/// Element `i` is the peg (0, 1, or 2) holding disk `i`; disk 0 is the
/// smallest. Stacking legality is not encoded here; it is enforced by
/// [`HanoiEnv::step`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleState(Vec<u8>);

impl PuzzleState {
    /// All disks on peg 0
    pub fn initial(num_disks: usize) -> Self {
        Self(vec![0; num_disks])
    }

    /// All disks on peg 2
    pub fn goal(num_disks: usize) -> Self {
        Self(vec![2; num_disks])
    }

    pub(crate) fn from_pegs(pegs: Vec<u8>) -> Self {
        Self(pegs)
    }

    pub fn num_disks(&self) -> usize {
        self.0.len()
    }

    /// Peg currently holding the given disk
    pub fn peg_of(&self, disk: usize) -> u8 {
        self.0[disk]
    }

    /// Per-disk peg assignments, smallest disk first
    pub fn pegs(&self) -> &[u8] {
        &self.0
    }

    pub fn is_goal(&self) -> bool {
        self.0.iter().all(|&peg| peg == 2)
    }

    fn move_disk(&mut self, disk: usize, destination: u8) {
        self.0[disk] = destination;
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, peg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{peg}")?;
        }
        write!(f, ")")
    }
}

/// Outcome of a single environment step
#[derive(Debug, Clone)]
pub struct Step {
    /// State after the step (unchanged for illegal moves)
    pub state: PuzzleState,
    /// Reward of this one transition, not a running total
    pub reward: f64,
    pub done: bool,
    pub info: &'static str,
}

/// Gym-style Tower of Hanoi environment
#[derive(Debug, Clone)]
pub struct HanoiEnv {
    num_disks: usize,
    state: PuzzleState,
    done: bool,
}

impl HanoiEnv {
    pub const DEFAULT_DISKS: usize = 3;

    /// Create an environment for the given number of disks
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `num_disks` is zero.
    pub fn new(num_disks: usize) -> Result<Self> {
        if num_disks == 0 {
            return Err(Error::InvalidConfiguration {
                message: "number of disks must be positive".to_string(),
            });
        }
        debug_assert!(ACTIONS.iter().all(|a| a.source != a.destination));
        Ok(Self {
            num_disks,
            state: PuzzleState::initial(num_disks),
            done: false,
        })
    }

    pub fn num_disks(&self) -> usize {
        self.num_disks
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Reset to the initial configuration and return it
    pub fn reset(&mut self) -> PuzzleState {
        self.state = PuzzleState::initial(self.num_disks);
        self.done = false;
        self.state.clone()
    }

    /// Disks currently on the given peg, smallest first
    pub fn disks_on_peg(&self, peg: u8) -> Vec<usize> {
        (0..self.num_disks)
            .filter(|&disk| self.state.peg_of(disk) == peg)
            .collect()
    }

    /// Smallest (topmost) disk on the given peg, if any
    fn top_disk(&self, peg: u8) -> Option<usize> {
        (0..self.num_disks).find(|&disk| self.state.peg_of(disk) == peg)
    }

    /// A disk may rest on an empty peg or on a strictly larger disk
    fn placement_allowed(&self, disk: usize, destination: u8) -> bool {
        match self.top_disk(destination) {
            None => true,
            Some(resting) => resting > disk,
        }
    }

    /// Whether the action would move a disk according to the stacking rules
    ///
    /// An action whose source peg is empty is always illegal.
    pub fn is_move_legal(&self, action: Action) -> bool {
        self.top_disk(action.source)
            .is_some_and(|disk| self.placement_allowed(disk, action.destination))
    }

    /// Apply an action and return the resulting transition
    ///
    /// Legal moves relocate the top disk of the source peg and earn
    /// [`REWARD_MOVE`]; illegal moves leave the state unchanged and earn
    /// [`REWARD_ILLEGAL`]. Reaching the goal overrides the reward with
    /// [`REWARD_GOAL`] and sets `done`. The returned reward is the scalar
    /// reward of this single transition.
    pub fn step(&mut self, action: Action) -> Step {
        let mut reward = REWARD_ILLEGAL;
        let mut info = "invalid action";

        if let Some(disk) = self.top_disk(action.source) {
            if self.placement_allowed(disk, action.destination) {
                self.state.move_disk(disk, action.destination);
                reward = REWARD_MOVE;
                info = "move ok, not goal";
            }
        }

        if self.state.is_goal() {
            reward = REWARD_GOAL;
            self.done = true;
            info = "goal reached";
        }

        Step {
            state: self.state.clone(),
            reward,
            done: self.done,
            info,
        }
    }

    /// Release display resources
    ///
    /// The terminal renderer in [`crate::render`] holds no persistent
    /// resources, so this is a no-op retained for the Gym-style surface.
    pub fn close(&mut self) {}
}
