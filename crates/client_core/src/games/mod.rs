//! Mini-game state machines and their fixed reward tables.

pub mod algebra;
pub mod motion;

pub use algebra::{AlgebraPuzzle, AnswerOutcome, Equation};
pub use motion::{ForceOutcome, Law, MotionSimulation, Push, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Completed,
}

/// Score and xp earned during one play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub score: u32,
    pub xp: u32,
}

impl Tally {
    pub fn award(&mut self, score: u32, xp: u32) {
        self.score += score;
        self.xp += xp;
    }
}
