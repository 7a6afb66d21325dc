//! Built-in mock content: subjects, lessons, leaderboard, class reports and the
//! scholarship mailbox.

use chrono::NaiveDate;
use shared::domain::{GameKind, Grade, SubjectRef, User};

use crate::i18n::Translator;

const BASE_SUBJECTS: [&str; 4] = ["math", "science", "english", "social_science"];
const SENIOR_SUBJECTS: [&str; 6] = [
    "math",
    "physics",
    "chemistry",
    "biology",
    "english",
    "social_studies",
];
const GAME_GRADE: u8 = 9;
const DEFAULT_STUDENT_XP: u32 = 1250;

pub fn subject_ids_for_grade(grade: Grade) -> Vec<&'static str> {
    match grade.value() {
        6..=8 => {
            let mut ids = BASE_SUBJECTS.to_vec();
            ids.push("local_language");
            ids
        }
        9..=10 => {
            let mut ids = BASE_SUBJECTS.to_vec();
            ids.extend(["hindi", "odia"]);
            ids
        }
        _ => SENIOR_SUBJECTS.to_vec(),
    }
}

pub fn subjects_for_grade(grade: Grade, translator: &Translator) -> Vec<SubjectRef> {
    subject_ids_for_grade(grade)
        .into_iter()
        .map(|id| subject_ref(id, translator))
        .collect()
}

pub fn subject_ref(id: &str, translator: &Translator) -> SubjectRef {
    let key = format!("subject.{id}");
    let name = translator.t(&key);
    let name = if name == key { id } else { name };
    SubjectRef::new(id, name)
}

/// Game attached to a subject's lessons, if the grade has one.
pub fn game_for(grade: Grade, subject_id: &str) -> Option<GameKind> {
    if grade.value() != GAME_GRADE {
        return None;
    }
    match subject_id {
        "science" => Some(GameKind::MotionSimulation),
        "math" => Some(GameKind::AlgebraPuzzle),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: &'static str,
    pub title: String,
    pub summary: String,
    pub game: Option<GameKind>,
    pub xp_reward: u32,
    pub minutes: u32,
    pub completed: bool,
}

pub fn lessons_for(grade: Grade, subject: &SubjectRef) -> Vec<Lesson> {
    let game = game_for(grade, &subject.id);
    let is_science_game = game == Some(GameKind::MotionSimulation);
    let is_math_game = game == Some(GameKind::AlgebraPuzzle);

    let (first_title, first_summary) = if is_science_game {
        (
            "Newton's Laws of Motion".to_string(),
            "Three laws relating the forces on a body to its motion, starting with inertia."
                .to_string(),
        )
    } else {
        (
            format!("Introduction to {}", subject.name),
            format!("Fundamental concepts and key terms in {}.", subject.name),
        )
    };

    let (second_title, second_summary) = if is_math_game {
        (
            "Solving Linear Equations".to_string(),
            "Equations where the variable appears only to the first power, and how to isolate it."
                .to_string(),
        )
    } else {
        (
            format!("Advanced {}", subject.name),
            format!("More complex topics in {} with worked examples.", subject.name),
        )
    };

    vec![
        Lesson {
            id: "lesson-1",
            title: first_title,
            summary: first_summary,
            game,
            xp_reward: 50,
            minutes: 15,
            completed: false,
        },
        Lesson {
            id: "lesson-2",
            title: second_title,
            summary: second_summary,
            game: game.filter(|_| is_math_game),
            xp_reward: 75,
            minutes: 20,
            completed: false,
        },
        Lesson {
            id: "lesson-3",
            title: "Practical Applications".to_string(),
            summary: format!("Case studies applying {} to real situations.", subject.name),
            game: None,
            xp_reward: 60,
            minutes: 18,
            completed: true,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectProgress {
    pub subject_id: &'static str,
    pub percent: u8,
    pub xp: u32,
    pub lessons_completed: u32,
    pub total_lessons: u32,
    pub achievements: &'static [&'static str],
}

pub fn student_progress() -> Vec<SubjectProgress> {
    vec![
        SubjectProgress {
            subject_id: "math",
            percent: 75,
            xp: 450,
            lessons_completed: 12,
            total_lessons: 16,
            achievements: &["First Equation", "Algebra Master"],
        },
        SubjectProgress {
            subject_id: "science",
            percent: 85,
            xp: 520,
            lessons_completed: 17,
            total_lessons: 20,
            achievements: &["Newton's Student", "Motion Expert", "Lab Star"],
        },
        SubjectProgress {
            subject_id: "english",
            percent: 60,
            xp: 320,
            lessons_completed: 9,
            total_lessons: 15,
            achievements: &["Grammar Master"],
        },
        SubjectProgress {
            subject_id: "social_science",
            percent: 45,
            xp: 280,
            lessons_completed: 7,
            total_lessons: 18,
            achievements: &["History Buff"],
        },
    ]
}

/// Total xp and floored mean completion across subjects.
pub fn progress_summary(progress: &[SubjectProgress]) -> (u32, u8) {
    if progress.is_empty() {
        return (0, 0);
    }
    let total_xp = progress.iter().map(|entry| entry.xp).sum();
    let percent_sum: u32 = progress.iter().map(|entry| u32::from(entry.percent)).sum();
    let mean = percent_sum / progress.len() as u32;
    (total_xp, mean.min(100) as u8)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub xp: u32,
    pub rank: u32,
    pub grade: u8,
    pub completed_lessons: u32,
    pub achievements: u32,
    pub is_current_user: bool,
}

const PEERS: [(&str, &str, u32, u32, u32); 9] = [
    ("1", "Priya Sharma", 2450, 48, 12),
    ("2", "Arjun Patel", 2180, 42, 9),
    ("3", "Kavya Singh", 1950, 39, 8),
    ("4", "Rahul Kumar", 1850, 37, 7),
    ("5", "Sneha Reddy", 1720, 35, 6),
    ("6", "Vikram Joshi", 1680, 33, 6),
    ("8", "Anaya Gupta", 1150, 22, 4),
    ("9", "Rohan Das", 1020, 20, 4),
    ("10", "Meera Shah", 980, 19, 3),
];

/// Peers plus the signed-in user, highest xp first, ranks assigned by position.
pub fn leaderboard(current: Option<&User>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = PEERS
        .iter()
        .map(
            |&(id, name, xp, completed_lessons, achievements)| LeaderboardEntry {
                id: id.to_string(),
                name: name.to_string(),
                xp,
                rank: 0,
                grade: GAME_GRADE,
                completed_lessons,
                achievements,
                is_current_user: false,
            },
        )
        .collect();

    entries.push(LeaderboardEntry {
        id: current.map_or_else(|| "current".to_string(), |user| user.id.clone()),
        name: current.map_or_else(|| "You".to_string(), |user| user.name.clone()),
        xp: current
            .and_then(|user| user.xp)
            .filter(|xp| *xp > 0)
            .unwrap_or(DEFAULT_STUDENT_XP),
        rank: 0,
        grade: current
            .and_then(|user| user.grade)
            .map_or(GAME_GRADE, Grade::value),
        completed_lessons: 24,
        achievements: 5,
        is_current_user: true,
    });

    entries.sort_by(|a, b| b.xp.cmp(&a.xp));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProgress {
    pub grade: u8,
    pub total_students: u32,
    pub active_students: u32,
    pub avg_progress: u8,
    pub total_xp: u32,
}

pub fn class_progress() -> Vec<ClassProgress> {
    [
        (6, 28, 24, 65, 8450),
        (7, 32, 29, 72, 9320),
        (8, 30, 27, 68, 8890),
        (9, 25, 23, 78, 12450),
        (10, 22, 20, 82, 15680),
        (11, 18, 16, 75, 14220),
        (12, 15, 14, 88, 18750),
    ]
    .into_iter()
    .map(
        |(grade, total_students, active_students, avg_progress, total_xp)| ClassProgress {
            grade,
            total_students,
            active_students,
            avg_progress,
            total_xp,
        },
    )
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Away,
    Offline,
}

impl PresenceStatus {
    pub fn label_key(self) -> &'static str {
        match self {
            PresenceStatus::Online => "teacher.online",
            PresenceStatus::Away => "teacher.away",
            PresenceStatus::Offline => "teacher.offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentReport {
    pub id: &'static str,
    pub name: &'static str,
    pub grade: u8,
    pub xp: u32,
    pub lessons_completed: u32,
    pub last_active: &'static str,
    pub status: PresenceStatus,
}

pub fn student_reports(grade: Option<Grade>) -> Vec<StudentReport> {
    let reports = [
        ("1", "Priya Sharma", 2450, 48, "5 min ago", PresenceStatus::Online),
        ("2", "Arjun Patel", 2180, 42, "1 hour ago", PresenceStatus::Away),
        ("3", "Kavya Singh", 1950, 39, "2 hours ago", PresenceStatus::Offline),
        ("4", "Rahul Kumar", 1850, 37, "30 min ago", PresenceStatus::Online),
        ("5", "Sneha Reddy", 1720, 35, "3 hours ago", PresenceStatus::Offline),
    ];

    reports
        .into_iter()
        .map(
            |(id, name, xp, lessons_completed, last_active, status)| StudentReport {
                id,
                name,
                grade: GAME_GRADE,
                xp,
                lessons_completed,
                last_active,
                status,
            },
        )
        .filter(|report| grade.map_or(true, |grade| grade.value() == report.grade))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailCategory {
    Scholarship,
    Internship,
    Partnership,
    Donation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailStatus {
    Open,
    Applied,
    Closed,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MailPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarshipMail {
    pub id: &'static str,
    pub from: &'static str,
    pub company: &'static str,
    pub subject: &'static str,
    pub criteria: &'static [&'static str],
    pub deadline: &'static str,
    pub amount: &'static str,
    pub unread: bool,
    pub starred: bool,
    pub received_hours_ago: u32,
    pub category: MailCategory,
    pub priority: MailPriority,
    pub status: MailStatus,
    pub applications_submitted: u32,
    pub max_applications: Option<u32>,
}

impl ScholarshipMail {
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.deadline, "%B %d, %Y").ok()
    }

    /// Digits of the amount read as one number; zero when there are none.
    pub fn amount_value(&self) -> u64 {
        self.amount
            .chars()
            .filter(char::is_ascii_digit)
            .fold(0u64, |acc, digit| {
                acc.saturating_mul(10)
                    .saturating_add(u64::from(digit as u8 - b'0'))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailSort {
    #[default]
    Newest,
    Oldest,
    Deadline,
    Amount,
}

#[derive(Debug, Clone, Default)]
pub struct MailQuery {
    pub search: String,
    pub category: Option<MailCategory>,
    pub status: Option<MailStatus>,
    pub sort: MailSort,
}

#[derive(Debug, Clone)]
pub struct Mailbox {
    mails: Vec<ScholarshipMail>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::with_sample_mail()
    }
}

impl Mailbox {
    pub fn new(mails: Vec<ScholarshipMail>) -> Self {
        Self { mails }
    }

    pub fn with_sample_mail() -> Self {
        Self::new(sample_mail())
    }

    pub fn unread_count(&self) -> usize {
        self.mails.iter().filter(|mail| mail.unread).count()
    }

    pub fn get(&self, id: &str) -> Option<&ScholarshipMail> {
        self.mails.iter().find(|mail| mail.id == id)
    }

    /// Opens a mail, marking it read.
    pub fn open(&mut self, id: &str) -> Option<&ScholarshipMail> {
        let mail = self.mails.iter_mut().find(|mail| mail.id == id)?;
        mail.unread = false;
        Some(mail)
    }

    pub fn toggle_star(&mut self, id: &str) -> Option<bool> {
        let mail = self.mails.iter_mut().find(|mail| mail.id == id)?;
        mail.starred = !mail.starred;
        Some(mail.starred)
    }

    pub fn query(&self, query: &MailQuery) -> Vec<&ScholarshipMail> {
        let needle = query.search.trim().to_lowercase();
        let mut matches: Vec<&ScholarshipMail> = self
            .mails
            .iter()
            .filter(|mail| {
                needle.is_empty()
                    || mail.subject.to_lowercase().contains(&needle)
                    || mail.company.to_lowercase().contains(&needle)
            })
            .filter(|mail| query.category.map_or(true, |category| mail.category == category))
            .filter(|mail| query.status.map_or(true, |status| mail.status == status))
            .collect();

        match query.sort {
            MailSort::Newest => matches.sort_by_key(|mail| mail.received_hours_ago),
            MailSort::Oldest => {
                matches.sort_by_key(|mail| std::cmp::Reverse(mail.received_hours_ago))
            }
            // Undated mail sorts last.
            MailSort::Deadline => matches.sort_by_key(|mail| {
                let date = mail.deadline_date();
                (date.is_none(), date)
            }),
            MailSort::Amount => {
                matches.sort_by_key(|mail| std::cmp::Reverse(mail.amount_value()))
            }
        }
        matches
    }
}

fn sample_mail() -> Vec<ScholarshipMail> {
    vec![
        ScholarshipMail {
            id: "1",
            from: "scholarship@tata.com",
            company: "Tata Trust",
            subject: "Rural Education Scholarship Program 2024",
            criteria: &[
                "Grade 9-12 students",
                "Rural school background",
                "Minimum 85% marks",
                "Family income < ₹3 lakhs",
            ],
            deadline: "March 15, 2024",
            amount: "₹50,000 per year",
            unread: true,
            starred: false,
            received_hours_ago: 2,
            category: MailCategory::Scholarship,
            priority: MailPriority::High,
            status: MailStatus::Open,
            applications_submitted: 3,
            max_applications: Some(50),
        },
        ScholarshipMail {
            id: "2",
            from: "education@infosys.org",
            company: "Infosys Foundation",
            subject: "STEM Excellence Scholarship",
            criteria: &[
                "Grades 10-12",
                "STEM subjects excellence",
                "Leadership qualities",
                "Innovation projects",
            ],
            deadline: "April 10, 2024",
            amount: "₹75,000 per year",
            unread: true,
            starred: true,
            received_hours_ago: 24,
            category: MailCategory::Scholarship,
            priority: MailPriority::High,
            status: MailStatus::Open,
            applications_submitted: 5,
            max_applications: Some(30),
        },
        ScholarshipMail {
            id: "3",
            from: "scholars@azimpremiifoundation.org",
            company: "Azim Premji Foundation",
            subject: "Merit Scholarship for Underprivileged Students",
            criteria: &[
                "Financial need",
                "Academic excellence",
                "Community involvement",
                "Leadership potential",
            ],
            deadline: "February 28, 2024",
            amount: "₹40,000 per year",
            unread: false,
            starred: false,
            received_hours_ago: 72,
            category: MailCategory::Scholarship,
            priority: MailPriority::Medium,
            status: MailStatus::Applied,
            applications_submitted: 2,
            max_applications: Some(25),
        },
        ScholarshipMail {
            id: "4",
            from: "education@reliance.com",
            company: "Reliance Foundation",
            subject: "Digital Learning Scholarship",
            criteria: &[
                "Rural background",
                "Digital literacy interest",
                "Grades 8-12",
                "Teacher recommendation",
            ],
            deadline: "March 30, 2024",
            amount: "₹60,000 + Tech Kit",
            unread: false,
            starred: true,
            received_hours_ago: 120,
            category: MailCategory::Scholarship,
            priority: MailPriority::Medium,
            status: MailStatus::Open,
            applications_submitted: 1,
            max_applications: Some(20),
        },
        ScholarshipMail {
            id: "5",
            from: "partnerships@educateall.org",
            company: "EducateAll NGO",
            subject: "Teacher Training Partnership Program",
            criteria: &[
                "Rural schools",
                "5+ teachers",
                "Basic computer access",
                "Commitment to 6-month program",
            ],
            deadline: "January 31, 2025",
            amount: "Free Training + Certification",
            unread: true,
            starred: false,
            received_hours_ago: 6,
            category: MailCategory::Partnership,
            priority: MailPriority::High,
            status: MailStatus::Open,
            applications_submitted: 0,
            max_applications: Some(10),
        },
        ScholarshipMail {
            id: "6",
            from: "internships@techfuture.org",
            company: "Tech Future Foundation",
            subject: "Summer Internship Program 2025",
            criteria: &[
                "Grades 11-12",
                "Basic programming knowledge",
                "English proficiency",
                "Commitment to 8 weeks",
            ],
            deadline: "February 15, 2025",
            amount: "₹15,000 stipend",
            unread: false,
            starred: true,
            received_hours_ago: 48,
            category: MailCategory::Internship,
            priority: MailPriority::Medium,
            status: MailStatus::Open,
            applications_submitted: 0,
            max_applications: Some(50),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{Locale, Role};

    fn grade(value: u8) -> Grade {
        Grade::new(value).expect("grade")
    }

    #[test]
    fn subject_lists_depend_on_grade_band() {
        assert!(subject_ids_for_grade(grade(7)).contains(&"local_language"));
        assert_eq!(subject_ids_for_grade(grade(10)).len(), 6);
        assert!(subject_ids_for_grade(grade(10)).contains(&"odia"));
        assert_eq!(subject_ids_for_grade(grade(12)), SENIOR_SUBJECTS.to_vec());
    }

    #[test]
    fn subject_names_are_localized() {
        let translator = Translator::builtin(Locale::En).expect("table");
        let subjects = subjects_for_grade(grade(11), &translator);
        assert_eq!(subjects[1], SubjectRef::new("physics", "Physics"));
        assert_eq!(subject_ref("astronomy", &translator).name, "astronomy");
    }

    #[test]
    fn games_exist_only_for_grade_nine_math_and_science() {
        assert_eq!(game_for(grade(9), "math"), Some(GameKind::AlgebraPuzzle));
        assert_eq!(
            game_for(grade(9), "science"),
            Some(GameKind::MotionSimulation)
        );
        assert_eq!(game_for(grade(10), "math"), None);
        assert_eq!(game_for(grade(9), "english"), None);

        let math_lessons = lessons_for(grade(9), &SubjectRef::new("math", "Mathematics"));
        assert_eq!(math_lessons[1].title, "Solving Linear Equations");
        assert_eq!(math_lessons[1].game, Some(GameKind::AlgebraPuzzle));
        let science_lessons = lessons_for(grade(9), &SubjectRef::new("science", "Science"));
        assert_eq!(science_lessons[0].title, "Newton's Laws of Motion");
        assert_eq!(science_lessons[1].game, None);
    }

    #[test]
    fn leaderboard_places_current_user_by_xp() {
        let user = User {
            id: "me".to_string(),
            email: "me@school.edu".to_string(),
            name: "me".to_string(),
            role: Role::Student,
            grade: Some(grade(9)),
            xp: Some(1250),
        };
        let board = leaderboard(Some(&user));
        assert_eq!(board.len(), 10);
        let me = board
            .iter()
            .find(|entry| entry.is_current_user)
            .expect("current user");
        assert_eq!(me.rank, 7);
        assert!(board.windows(2).all(|pair| pair[0].xp >= pair[1].xp));
    }

    #[test]
    fn progress_summary_floors_mean() {
        assert_eq!(progress_summary(&student_progress()), (1570, 66));
        assert_eq!(progress_summary(&[]), (0, 0));
    }

    #[test]
    fn mailbox_filters_and_sorts() {
        let mailbox = Mailbox::with_sample_mail();

        let query = MailQuery {
            search: "SCHOLARSHIP".to_string(),
            status: Some(MailStatus::Open),
            sort: MailSort::Amount,
            ..MailQuery::default()
        };
        let ids: Vec<_> = mailbox.query(&query).iter().map(|mail| mail.id).collect();
        assert_eq!(ids, vec!["2", "4", "1"]);

        let by_deadline = MailQuery {
            sort: MailSort::Deadline,
            ..MailQuery::default()
        };
        assert_eq!(mailbox.query(&by_deadline)[0].id, "3");

        let internships = MailQuery {
            category: Some(MailCategory::Internship),
            ..MailQuery::default()
        };
        assert_eq!(mailbox.query(&internships).len(), 1);
    }

    #[test]
    fn opening_mail_marks_it_read() {
        let mut mailbox = Mailbox::with_sample_mail();
        assert_eq!(mailbox.unread_count(), 3);
        mailbox.open("1").expect("mail");
        assert_eq!(mailbox.unread_count(), 2);
        assert_eq!(mailbox.toggle_star("1"), Some(true));
        assert_eq!(mailbox.open("missing"), None);
    }

    #[test]
    fn reports_filter_by_grade() {
        assert_eq!(student_reports(Some(grade(9))).len(), 5);
        assert!(student_reports(Some(grade(6))).is_empty());
        assert_eq!(class_progress().len(), 7);
    }
}
