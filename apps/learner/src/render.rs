//! Plain-text rendering of the resolved screen.

use client_core::{
    catalog::{self, MailQuery},
    games::GamePhase,
    LearningClient, Translator,
};
use shared::{
    domain::{Grade, Role, SubjectRef, User},
    navigation::Screen,
};

pub fn render(client: &LearningClient, user: Option<&User>, mail_query: &MailQuery) -> String {
    let t = client.translator();
    let mut lines = Vec::new();

    if let Some(user) = user {
        lines.push(header(t, user));
    }

    match client.screen() {
        Screen::Login => {
            lines.push(format!("== {} ==", t.t("auth.login")));
            lines.push(format!(
                "login <email> <password> [student|teacher|developer]  or  offline ({})",
                t.t("auth.offline_access")
            ));
        }
        Screen::GradeSelection => {
            lines.push(format!("== {} ==", t.t("general.grade")));
            let grades: Vec<String> = Grade::all().map(|grade| grade.to_string()).collect();
            lines.push(format!("grade <{}>", grades.join("|")));
        }
        Screen::Subjects { grade } => {
            lines.push(format!("== {} {grade} ==", t.t("general.grade")));
            for subject in catalog::subjects_for_grade(grade, t) {
                lines.push(subject_line(&subject, grade));
            }
        }
        Screen::Lessons { grade, subject } => render_lessons(&mut lines, t, grade, &subject),
        Screen::AlgebraGame => render_algebra(&mut lines, t, client),
        Screen::MotionGame => render_motion(&mut lines, t, client),
        Screen::Progress => render_progress(&mut lines, t),
        Screen::Leaderboard => {
            lines.push(format!("== {} ==", t.t("general.leaderboard")));
            for entry in catalog::leaderboard(user) {
                let marker = if entry.is_current_user { "*" } else { " " };
                lines.push(format!(
                    "{marker}{:>3}. {:<20} {:>6} {}  ({} {})",
                    entry.rank,
                    entry.name,
                    entry.xp,
                    t.t("general.xp"),
                    t.t("general.grade"),
                    entry.grade
                ));
            }
        }
        Screen::TeacherDashboard => render_dashboard(&mut lines, t),
        Screen::Mailbox => render_mailbox(&mut lines, t, client, mail_query),
    }

    lines.join("\n")
}

fn header(t: &Translator, user: &User) -> String {
    let mut header = format!("[{} · {}", user.name, role_label(t, user.role));
    if let Some(grade) = user.grade {
        header.push_str(&format!(" · {} {grade}", t.t("general.grade")));
    }
    if let Some(xp) = user.xp {
        header.push_str(&format!(" · {xp} {}", t.t("general.xp")));
    }
    header.push(']');
    header
}

fn role_label<'a>(t: &'a Translator, role: Role) -> &'a str {
    match role {
        Role::Student => t.t("auth.student"),
        Role::Teacher => t.t("auth.teacher"),
        Role::Developer => t.t("auth.developer"),
    }
}

fn subject_line(subject: &SubjectRef, grade: Grade) -> String {
    match catalog::game_for(grade, &subject.id) {
        Some(game) => format!("  {:<16} {}  [game: {game}]", subject.id, subject.name),
        None => format!("  {:<16} {}", subject.id, subject.name),
    }
}

fn render_lessons(lines: &mut Vec<String>, t: &Translator, grade: Grade, subject: &SubjectRef) {
    lines.push(format!(
        "== {} · {} {grade} · {} ==",
        subject.name,
        t.t("general.grade"),
        t.t("general.lessons")
    ));
    for lesson in catalog::lessons_for(grade, subject) {
        let done = if lesson.completed { "x" } else { " " };
        lines.push(format!(
            "[{done}] {} ({} min, +{} {})",
            lesson.title,
            lesson.minutes,
            lesson.xp_reward,
            t.t("general.xp")
        ));
        lines.push(format!("    {}", lesson.summary));
        if let Some(game) = lesson.game {
            lines.push(format!("    {}: play {game}", t.t("action.learn_game")));
        }
    }
    if catalog::game_for(grade, &subject.id).is_none() {
        lines.push(t.t("msg.game_not_available").to_string());
    }
}

fn render_algebra(lines: &mut Vec<String>, t: &Translator, client: &LearningClient) {
    let game = client.algebra();
    lines.push(format!("== {} ==", t.t("game.algebra_puzzle")));
    lines.push(format!(
        "{}: {}  {}: {}",
        t.t("game.score"),
        game.score(),
        t.t("general.xp"),
        game.xp()
    ));
    match game.phase() {
        GamePhase::Idle => lines.push(format!("{}: start", t.t("action.start"))),
        GamePhase::Running | GamePhase::Completed => {
            lines.push(format!("word: {}", game.display_word()));
            for equation in game.equations() {
                let mark = if equation.solved { "x" } else { " " };
                lines.push(format!("[{mark}] {}: {}", equation.id, equation.text));
            }
            if game.hint_visible() {
                lines.push("hint: move constants to the right side, then divide.".to_string());
            }
            if game.phase() == GamePhase::Completed {
                lines.push(format!("{} {}", t.t("teacher.completed"), game.hidden_word()));
            }
        }
    }
}

fn render_motion(lines: &mut Vec<String>, t: &Translator, client: &LearningClient) {
    let game = client.motion();
    lines.push(format!("== {} ==", t.t("game.motion_simulation")));
    lines.push(format!(
        "law {} · {}: {}  {}: {}",
        game.law().number(),
        t.t("game.score"),
        game.score(),
        t.t("general.xp"),
        game.xp()
    ));
    match game.phase() {
        GamePhase::Idle => lines.push(format!("{}: start", t.t("action.start"))),
        GamePhase::Running | GamePhase::Completed => {
            let (position, velocity, force) = (game.position(), game.velocity(), game.force());
            lines.push(format!("position ({:.1}, {:.1})", position.x, position.y));
            lines.push(format!("velocity ({:.2}, {:.2})", velocity.x, velocity.y));
            lines.push(format!("force    ({:.1}, {:.1})", force.x, force.y));
        }
    }
}

fn render_progress(lines: &mut Vec<String>, t: &Translator) {
    let progress = catalog::student_progress();
    let (total_xp, mean) = catalog::progress_summary(&progress);
    lines.push(format!("== {} ==", t.t("general.progress")));
    lines.push(format!("{total_xp} {} · {mean}%", t.t("general.xp")));
    for entry in &progress {
        lines.push(format!(
            "  {:<24} {:>3}%  {}/{} {}",
            t.t(&format!("subject.{}", entry.subject_id)),
            entry.percent,
            entry.lessons_completed,
            entry.total_lessons,
            t.t("general.lessons")
        ));
    }
}

fn render_dashboard(lines: &mut Vec<String>, t: &Translator) {
    lines.push(format!("== {} ==", t.t("teacher.dashboard")));
    lines.push(format!("-- {}", t.t("teacher.class_progress")));
    for class in catalog::class_progress() {
        lines.push(format!(
            "  {} {:<3} {}/{} {} · {}% · {} {}",
            t.t("general.grade"),
            class.grade,
            class.active_students,
            class.total_students,
            t.t("teacher.active_students"),
            class.avg_progress,
            class.total_xp,
            t.t("general.xp")
        ));
    }
    lines.push(format!("-- {}", t.t("teacher.student_reports")));
    for report in catalog::student_reports(None) {
        lines.push(format!(
            "  {:<18} {} {:<3} {:>5} {}  {:<8} {}",
            report.name,
            t.t("general.grade"),
            report.grade,
            report.xp,
            t.t("general.xp"),
            t.t(report.status.label_key()),
            report.last_active
        ));
    }
}

fn render_mailbox(
    lines: &mut Vec<String>,
    t: &Translator,
    client: &LearningClient,
    query: &MailQuery,
) {
    let mailbox = client.mailbox();
    lines.push(format!(
        "== {} ({} unread) ==",
        t.t("mail.inbox"),
        mailbox.unread_count()
    ));
    let matches = mailbox.query(query);
    if matches.is_empty() {
        lines.push("no mail matches the current filter".to_string());
    }
    for mail in matches {
        let unread = if mail.unread { "●" } else { " " };
        let star = if mail.starred { "★" } else { " " };
        lines.push(format!(
            "{unread}{star} {:<8} {:<34} {:<22} {} · due {}",
            mail.id, mail.subject, mail.company, mail.amount, mail.deadline
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use client_core::AuthService;
    use shared::domain::{Locale, SubjectRef};
    use shared::navigation::NavEvent;
    use storage::MemorySessionStore;

    use super::*;

    fn client() -> LearningClient {
        let auth = AuthService::new(Arc::new(MemorySessionStore::new()));
        LearningClient::new(auth, Translator::builtin(Locale::En).expect("table"))
    }

    #[tokio::test]
    async fn login_screen_before_session() {
        let client = client();
        let text = render(&client, None, &MailQuery::default());
        assert!(text.contains("offline"));
    }

    #[tokio::test]
    async fn lessons_screen_offers_the_grade_nine_game() {
        let mut client = client();
        client.offline_access().await.expect("offline");
        let grade = Grade::new(9).expect("grade");
        client.navigate(NavEvent::SelectGrade(grade)).await;
        client
            .navigate(NavEvent::SelectSubject(SubjectRef::new("math", "Mathematics")))
            .await;

        let user = client.user().await;
        let text = render(&client, user.as_ref(), &MailQuery::default());
        assert!(text.contains("Solving Linear Equations"));
        assert!(text.contains("play algebra-puzzle"));
    }

    #[tokio::test]
    async fn leaderboard_marks_current_user() {
        let mut client = client();
        client.offline_access().await.expect("offline");
        client.navigate(NavEvent::GoToLeaderboard).await;

        let user = client.user().await;
        let text = render(&client, user.as_ref(), &MailQuery::default());
        assert!(text
            .lines()
            .any(|line| line.starts_with('*') && line.contains("Offline Student")));
    }
}
