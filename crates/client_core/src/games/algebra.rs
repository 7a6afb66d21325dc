use super::{GamePhase, Tally};

const HIDDEN_WORD: &str = "ALGEBRA";
const SCORE_PER_SOLVE: u32 = 20;
const XP_PER_SOLVE: u32 = 15;
const COMPLETION_BONUS_XP: u32 = 50;

const EQUATIONS: [(&str, &str, i64); 6] = [
    ("eq1", "2x + 5 = 13", 4),
    ("eq2", "3x - 7 = 8", 5),
    ("eq3", "4x + 2 = 18", 4),
    ("eq4", "x + 9 = 15", 6),
    ("eq5", "2x - 3 = 7", 5),
    ("eq6", "5x + 1 = 21", 4),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub id: &'static str,
    pub text: &'static str,
    answer: i64,
    pub solved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { revealed: usize },
    Completed,
    Incorrect,
    NotANumber,
    UnknownEquation,
    AlreadySolved,
    NotRunning,
}

/// Solve linear equations to reveal a hidden word letter by letter.
#[derive(Debug, Clone)]
pub struct AlgebraPuzzle {
    phase: GamePhase,
    tally: Tally,
    hidden_word: &'static str,
    revealed: usize,
    hint_visible: bool,
    equations: Vec<Equation>,
}

impl Default for AlgebraPuzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgebraPuzzle {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            tally: Tally::default(),
            hidden_word: "",
            revealed: 0,
            hint_visible: false,
            equations: fresh_equations(),
        }
    }

    pub fn start(&mut self) {
        *self = Self {
            phase: GamePhase::Running,
            hidden_word: HIDDEN_WORD,
            ..Self::new()
        };
        tracing::debug!("algebra puzzle started");
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("algebra puzzle reset");
    }

    pub fn submit_answer(&mut self, equation_id: &str, answer: &str) -> AnswerOutcome {
        let Ok(value) = answer.trim().parse::<i64>() else {
            return AnswerOutcome::NotANumber;
        };
        if self.phase != GamePhase::Running {
            return AnswerOutcome::NotRunning;
        }
        let Some(equation) = self.equations.iter_mut().find(|eq| eq.id == equation_id) else {
            return AnswerOutcome::UnknownEquation;
        };
        if equation.solved {
            return AnswerOutcome::AlreadySolved;
        }

        if value != equation.answer {
            self.hint_visible = true;
            tracing::debug!(equation = equation_id, value, "wrong answer");
            return AnswerOutcome::Incorrect;
        }

        equation.solved = true;
        self.hint_visible = false;
        self.tally.award(SCORE_PER_SOLVE, XP_PER_SOLVE);

        let solved = self.solved_count();
        self.revealed = solved.min(self.hidden_word.len());

        if solved == self.equations.len() {
            self.phase = GamePhase::Completed;
            self.tally.award(0, COMPLETION_BONUS_XP);
            self.revealed = self.hidden_word.len();
            tracing::debug!(score = self.tally.score, xp = self.tally.xp, "algebra puzzle completed");
            AnswerOutcome::Completed
        } else {
            AnswerOutcome::Correct {
                revealed: self.revealed,
            }
        }
    }

    pub fn dismiss_hint(&mut self) {
        self.hint_visible = false;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn xp(&self) -> u32 {
        self.tally.xp
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn hidden_word(&self) -> &str {
        self.hidden_word
    }

    pub fn revealed_word(&self) -> &str {
        &self.hidden_word[..self.revealed]
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn solved_count(&self) -> usize {
        self.equations.iter().filter(|eq| eq.solved).count()
    }

    /// Letters separated by spaces, unrevealed ones shown as `_`.
    pub fn display_word(&self) -> String {
        self.hidden_word
            .chars()
            .enumerate()
            .map(|(index, letter)| if index < self.revealed { letter } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn fresh_equations() -> Vec<Equation> {
    EQUATIONS
        .iter()
        .map(|&(id, text, answer)| Equation {
            id,
            text,
            answer,
            solved: false,
        })
        .collect()
}
