//! Bijective encoding between puzzle states and Q-table rows
//!
//! A state is read as a base-3 number with disk 0 as the most significant
//! digit, mapping the `3^num_disks` states onto `0..3^num_disks`.

use crate::env::PuzzleState;

/// Total number of states for the given puzzle size
pub fn state_count(num_disks: usize) -> usize {
    3usize.pow(num_disks as u32)
}

/// Encode a state as its Q-table row index
pub fn state_to_index(state: &PuzzleState) -> usize {
    state
        .pegs()
        .iter()
        .fold(0, |index, &peg| index * 3 + peg as usize)
}

/// Decode a Q-table row index back into a state
pub fn index_to_state(index: usize, num_disks: usize) -> PuzzleState {
    let mut pegs = vec![0u8; num_disks];
    let mut rest = index;
    for slot in pegs.iter_mut().rev() {
        *slot = (rest % 3) as u8;
        rest /= 3;
    }
    PuzzleState::from_pegs(pegs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_index_zero() {
        for n in 1..=5 {
            assert_eq!(state_to_index(&PuzzleState::initial(n)), 0);
        }
    }

    #[test]
    fn test_goal_state_is_last_index() {
        for n in 1..=5 {
            assert_eq!(state_to_index(&PuzzleState::goal(n)), state_count(n) - 1);
        }
    }

    #[test]
    fn test_round_trip_is_bijective() {
        for n in 1..=4 {
            for index in 0..state_count(n) {
                let state = index_to_state(index, n);
                assert_eq!(state_to_index(&state), index);
            }
        }
    }

    #[test]
    fn test_disk_zero_is_most_significant() {
        // (1,0,0): disk 0 on peg 1 contributes 1 * 3^2.
        let state = index_to_state(9, 3);
        assert_eq!(state.pegs(), &[1, 0, 0]);
    }
}
