use serde::{Deserialize, Serialize};

use crate::domain::{GameKind, Grade, SubjectRef};

/// Named screen the navigation state points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Login,
    GradeSelection,
    Subjects,
    Lessons,
    #[serde(rename = "motion-simulation")]
    MotionGame,
    #[serde(rename = "algebra-puzzle")]
    AlgebraGame,
    Progress,
    Leaderboard,
    TeacherDashboard,
    Mailbox,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Login,
        View::GradeSelection,
        View::Subjects,
        View::Lessons,
        View::MotionGame,
        View::AlgebraGame,
        View::Progress,
        View::Leaderboard,
        View::TeacherDashboard,
        View::Mailbox,
    ];

    pub fn for_game(kind: GameKind) -> Self {
        match kind {
            GameKind::MotionSimulation => View::MotionGame,
            GameKind::AlgebraPuzzle => View::AlgebraGame,
        }
    }
}

/// Screen handed to a renderer. Context-dependent screens carry their data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Screen {
    Login,
    GradeSelection,
    Subjects { grade: Grade },
    Lessons { grade: Grade, subject: SubjectRef },
    MotionGame,
    AlgebraGame,
    Progress,
    Leaderboard,
    TeacherDashboard,
    Mailbox,
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Login => View::Login,
            Screen::GradeSelection => View::GradeSelection,
            Screen::Subjects { .. } => View::Subjects,
            Screen::Lessons { .. } => View::Lessons,
            Screen::MotionGame => View::MotionGame,
            Screen::AlgebraGame => View::AlgebraGame,
            Screen::Progress => View::Progress,
            Screen::Leaderboard => View::Leaderboard,
            Screen::TeacherDashboard => View::TeacherDashboard,
            Screen::Mailbox => View::Mailbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum NavEvent {
    SessionAuthenticated,
    SessionEnded,
    SelectGrade(Grade),
    SelectSubject(SubjectRef),
    PlayGame(GameKind),
    GoToProgress,
    GoToLeaderboard,
    GoToMailbox,
    GoToTeacherDashboard,
    Back,
    Home,
}

impl NavEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::SessionAuthenticated => "session_authenticated",
            NavEvent::SessionEnded => "session_ended",
            NavEvent::SelectGrade(_) => "select_grade",
            NavEvent::SelectSubject(_) => "select_subject",
            NavEvent::PlayGame(_) => "play_game",
            NavEvent::GoToProgress => "go_to_progress",
            NavEvent::GoToLeaderboard => "go_to_leaderboard",
            NavEvent::GoToMailbox => "go_to_mailbox",
            NavEvent::GoToTeacherDashboard => "go_to_teacher_dashboard",
            NavEvent::Back => "back",
            NavEvent::Home => "home",
        }
    }
}
