//! View navigation: pure transitions over [`NavigationState`] plus a small owner
//! that applies them and logs each step.

use shared::{
    domain::{Grade, Role, SubjectRef},
    navigation::{NavEvent, Screen, View},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Uninitialized,
    Active {
        view: View,
        grade: Option<Grade>,
        subject: Option<SubjectRef>,
    },
}

impl NavigationState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, NavigationState::Active { .. })
    }

    /// Stored view, `None` while uninitialized.
    pub fn view(&self) -> Option<View> {
        match self {
            NavigationState::Uninitialized => None,
            NavigationState::Active { view, .. } => Some(*view),
        }
    }

    pub fn selected_grade(&self) -> Option<Grade> {
        match self {
            NavigationState::Uninitialized => None,
            NavigationState::Active { grade, .. } => *grade,
        }
    }

    pub fn selected_subject(&self) -> Option<&SubjectRef> {
        match self {
            NavigationState::Uninitialized => None,
            NavigationState::Active { subject, .. } => subject.as_ref(),
        }
    }

    /// Screen to present. Subjects and Lessons fall back to grade selection when
    /// their context is missing.
    pub fn screen(&self) -> Screen {
        let NavigationState::Active {
            view,
            grade,
            subject,
        } = self
        else {
            return Screen::Login;
        };

        match (view, grade, subject) {
            (View::Login, _, _) => Screen::Login,
            (View::GradeSelection, _, _) => Screen::GradeSelection,
            (View::Subjects, Some(grade), _) => Screen::Subjects { grade: *grade },
            (View::Subjects, None, _) => Screen::GradeSelection,
            (View::Lessons, Some(grade), Some(subject)) => Screen::Lessons {
                grade: *grade,
                subject: subject.clone(),
            },
            (View::Lessons, _, _) => Screen::GradeSelection,
            (View::MotionGame, _, _) => Screen::MotionGame,
            (View::AlgebraGame, _, _) => Screen::AlgebraGame,
            (View::Progress, _, _) => Screen::Progress,
            (View::Leaderboard, _, _) => Screen::Leaderboard,
            (View::TeacherDashboard, _, _) => Screen::TeacherDashboard,
            (View::Mailbox, _, _) => Screen::Mailbox,
        }
    }
}

/// First view after sign-in.
pub fn landing_view(role: Role) -> View {
    if role == Role::Teacher {
        View::TeacherDashboard
    } else {
        View::GradeSelection
    }
}

/// Target of `home` and of `back` from views without a dedicated parent.
pub fn home_view(role: Role) -> View {
    if role == Role::Student {
        View::GradeSelection
    } else {
        View::TeacherDashboard
    }
}

fn back_target(view: View, role: Role) -> View {
    match view {
        View::Subjects => View::GradeSelection,
        View::Lessons => View::Subjects,
        View::MotionGame | View::AlgebraGame => View::Lessons,
        View::Progress | View::Leaderboard => {
            if role == Role::Student {
                View::Subjects
            } else {
                View::TeacherDashboard
            }
        }
        View::Mailbox => View::TeacherDashboard,
        _ => home_view(role),
    }
}

pub fn transition(state: &NavigationState, role: Role, event: &NavEvent) -> NavigationState {
    let NavigationState::Active {
        view,
        grade,
        subject,
    } = state
    else {
        return match event {
            NavEvent::SessionAuthenticated => NavigationState::Active {
                view: landing_view(role),
                grade: None,
                subject: None,
            },
            _ => NavigationState::Uninitialized,
        };
    };

    let with_view = |next: View| NavigationState::Active {
        view: next,
        grade: *grade,
        subject: subject.clone(),
    };

    match event {
        NavEvent::SessionAuthenticated => state.clone(),
        NavEvent::SessionEnded => NavigationState::Uninitialized,
        NavEvent::SelectGrade(selected) => NavigationState::Active {
            view: View::Subjects,
            grade: Some(*selected),
            subject: subject.clone(),
        },
        NavEvent::SelectSubject(selected) => NavigationState::Active {
            view: View::Lessons,
            grade: *grade,
            subject: Some(selected.clone()),
        },
        NavEvent::PlayGame(kind) => with_view(View::for_game(*kind)),
        NavEvent::GoToProgress => with_view(View::Progress),
        NavEvent::GoToLeaderboard => with_view(View::Leaderboard),
        NavEvent::GoToMailbox => with_view(View::Mailbox),
        NavEvent::GoToTeacherDashboard => with_view(View::TeacherDashboard),
        NavEvent::Back => with_view(back_target(*view, role)),
        NavEvent::Home => NavigationState::Active {
            view: home_view(role),
            grade: None,
            subject: None,
        },
    }
}

#[derive(Debug, Default)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn apply(&mut self, role: Role, event: NavEvent) -> Screen {
        let next = transition(&self.state, role, &event);
        tracing::debug!(
            event = event.name(),
            role = role.as_str(),
            from = ?self.state.view(),
            to = ?next.view(),
            "navigation transition"
        );
        self.state = next;
        self.state.screen()
    }

    pub fn reset(&mut self) {
        self.state = NavigationState::Uninitialized;
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
