//! Terminal rendering of puzzle states
//!
//! Draws the three pegs and their disk stacks as ASCII art. Rendering is
//! a cosmetic collaborator: callers must keep training correct even when
//! drawing fails.

use std::io::{self, Write};

use crate::{
    env::{PEG_COUNT, PuzzleState},
    error::Result,
};

/// ASCII renderer for the three-peg puzzle
#[derive(Debug, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the state to stdout
    pub fn draw(&mut self, state: &PuzzleState) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.draw_to(&mut out, state)
    }

    fn draw_to<W: Write>(&self, out: &mut W, state: &PuzzleState) -> Result<()> {
        let num_disks = state.num_disks();
        // Bottom-first disk stacks per peg; larger disks sort below
        // smaller ones by construction.
        let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); PEG_COUNT];
        for disk in (0..num_disks).rev() {
            stacks[state.peg_of(disk) as usize].push(disk);
        }

        // Disk `d` is 2d+3 characters wide; the widest disk fixes the
        // column width.
        let column = 2 * num_disks + 1;
        for level in (0..num_disks).rev() {
            for stack in &stacks {
                match stack.get(level) {
                    Some(&disk) => {
                        let width = 2 * disk + 3;
                        let pad = (column - width) / 2;
                        write!(out, " {}{}{}", " ".repeat(pad), "=".repeat(width), " ".repeat(pad))?;
                    }
                    None => {
                        let pad = (column - 1) / 2;
                        write!(out, " {}|{}", " ".repeat(pad), " ".repeat(pad))?;
                    }
                }
            }
            writeln!(out)?;
        }
        writeln!(out, "{}", "-".repeat((column + 1) * PEG_COUNT))?;
        writeln!(out, "{state}")?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_to_string(state: &PuzzleState) -> String {
        let renderer = AsciiRenderer::new();
        let mut buffer = Vec::new();
        renderer.draw_to(&mut buffer, state).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_initial_state_stacks_everything_on_peg_zero() {
        let output = draw_to_string(&PuzzleState::initial(2));
        let lines: Vec<_> = output.lines().collect();
        // Top row: disk 0 on peg 0, pegs 1 and 2 bare.
        assert!(lines[0].contains("==="));
        assert_eq!(lines[0].matches('|').count(), 2);
        // Bottom row: disk 1 is wider.
        assert!(lines[1].contains("====="));
        assert!(output.contains("(0,0)"));
    }

    #[test]
    fn test_goal_state_stacks_everything_on_peg_two() {
        let output = draw_to_string(&PuzzleState::goal(3));
        let lines: Vec<_> = output.lines().collect();
        // Pegs 0 and 1 are bare on every disk row.
        for line in &lines[..3] {
            assert_eq!(line.matches('|').count(), 2);
            assert!(line.contains('='));
        }
        assert!(output.contains("(2,2,2)"));
    }
}
