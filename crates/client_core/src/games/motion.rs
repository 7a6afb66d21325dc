use super::{GamePhase, Tally};

const START: Vec2 = Vec2 { x: 200.0, y: 150.0 };
const X_BOUNDS: (f64, f64) = (15.0, 385.0);
const Y_BOUNDS: (f64, f64) = (15.0, 285.0);
const PRESET_PUSH: f64 = 50.0;
const CLICK_FORCE_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Newton's law the sandbox currently demonstrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Law {
    #[default]
    Inertia,
    Acceleration,
    Reaction,
}

impl Law {
    pub fn number(self) -> u8 {
        match self {
            Law::Inertia => 1,
            Law::Acceleration => 2,
            Law::Reaction => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Law::Inertia),
            2 => Some(Law::Acceleration),
            3 => Some(Law::Reaction),
            _ => None,
        }
    }

    /// (score, xp) per rewarded force.
    pub fn reward(self) -> (u32, u32) {
        match self {
            Law::Inertia => (10, 5),
            Law::Acceleration => (15, 8),
            Law::Reaction => (20, 10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceOutcome {
    Applied { score: u32, xp: u32 },
    NoEffect,
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    Right,
    Left,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct MotionSimulation {
    phase: GamePhase,
    tally: Tally,
    law: Law,
    position: Vec2,
    velocity: Vec2,
    force: Vec2,
}

impl Default for MotionSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSimulation {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            tally: Tally::default(),
            law: Law::default(),
            position: START,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
        }
    }

    pub fn start(&mut self) {
        self.restart(GamePhase::Running);
        tracing::debug!("motion simulation started");
    }

    pub fn reset(&mut self) {
        self.restart(GamePhase::Idle);
        tracing::debug!("motion simulation reset");
    }

    fn restart(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.tally = Tally::default();
        self.position = START;
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
    }

    pub fn select_law(&mut self, law: Law) {
        self.law = law;
    }

    pub fn apply_force(&mut self, fx: f64, fy: f64) -> ForceOutcome {
        if self.phase != GamePhase::Running {
            return ForceOutcome::NotRunning;
        }

        let force = Vec2::new(fx, fy);
        self.force = force;

        let rewarded = match self.law {
            Law::Inertia => {
                if force.is_zero() {
                    false
                } else {
                    self.velocity = force.scaled(0.1);
                    true
                }
            }
            Law::Acceleration => {
                let acceleration = force.scaled(0.05);
                self.velocity = Vec2::new(
                    self.velocity.x + acceleration.x,
                    self.velocity.y + acceleration.y,
                );
                true
            }
            Law::Reaction => {
                self.velocity = force.scaled(-0.08);
                true
            }
        };

        self.position = Vec2::new(
            (self.position.x + self.velocity.x).clamp(X_BOUNDS.0, X_BOUNDS.1),
            (self.position.y + self.velocity.y).clamp(Y_BOUNDS.0, Y_BOUNDS.1),
        );

        if !rewarded {
            return ForceOutcome::NoEffect;
        }

        let (score, xp) = self.law.reward();
        self.tally.award(score, xp);
        tracing::debug!(law = self.law.number(), fx, fy, score = self.tally.score, "force applied");
        ForceOutcome::Applied { score, xp }
    }

    pub fn push(&mut self, direction: Push) -> ForceOutcome {
        match direction {
            Push::Right => self.apply_force(PRESET_PUSH, 0.0),
            Push::Left => self.apply_force(-PRESET_PUSH, 0.0),
            Push::Up => self.apply_force(0.0, -PRESET_PUSH),
            Push::Down => self.apply_force(0.0, PRESET_PUSH),
        }
    }

    /// Force proportional to the offset from the object to the clicked point.
    pub fn click_at(&mut self, x: f64, y: f64) -> ForceOutcome {
        let dx = x - self.position.x;
        let dy = y - self.position.y;
        self.apply_force(dx * CLICK_FORCE_SCALE, dy * CLICK_FORCE_SCALE)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn law(&self) -> Law {
        self.law
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn xp(&self) -> u32 {
        self.tally.xp
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }
}
