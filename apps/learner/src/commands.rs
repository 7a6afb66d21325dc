//! Typed commands for the terminal loop.

use client_core::{
    catalog::{MailCategory, MailSort, MailStatus},
    games::{Law, Push},
};
use shared::{
    domain::{GameKind, Grade, Locale, Role},
    navigation::View,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login {
        identifier: String,
        secret: String,
        role: Role,
    },
    Offline,
    Logout,
    Grade(Grade),
    Subject(String),
    Play(GameKind),
    Back,
    Home,
    Progress,
    Leaderboard,
    Mailbox,
    Dashboard,
    Start,
    Reset,
    Answer {
        equation: String,
        value: String,
    },
    Hint,
    Law(Law),
    Push(Push),
    Force {
        fx: f64,
        fy: f64,
    },
    Click {
        x: f64,
        y: f64,
    },
    Open(String),
    Star(String),
    Search(String),
    Sort(MailSort),
    /// `None` clears the filter.
    FilterCategory(Option<MailCategory>),
    FilterStatus(Option<MailStatus>),
    Locale(Locale),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  login <email> <password> [student|teacher|developer]
  offline | logout | quit | help
  grade <6-12> | subject <id> | play <algebra|motion>
  back | home | progress | leaderboard | mailbox | dashboard
  start | reset | answer <eq-id> <value> | hint (dismiss the hint)
  law <1-3> | push <right|left|up|down> | force <fx> <fy> | click <x> <y>
  open <mail-id> | star <mail-id> | search <text> | sort <newest|oldest|deadline|amount>
  filter category <scholarship|internship|partnership|donation|all>
  filter status <open|applied|closed|expired|all>
  locale <en|hi|od>";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let args: Vec<&str> = parts.collect();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("login", [identifier, secret]) => Command::Login {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            role: Role::Student,
        },
        ("login", [identifier, secret, role]) => Command::Login {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
            role: role.parse().map_err(|err| format!("{err}"))?,
        },
        ("offline", []) => Command::Offline,
        ("logout", []) => Command::Logout,
        ("grade", [grade]) => Command::Grade(grade.parse().map_err(|err| format!("{err}"))?),
        ("subject", [id]) => Command::Subject(id.to_ascii_lowercase()),
        ("play", [game]) => Command::Play(game.parse().map_err(|err| format!("{err}"))?),
        ("back", []) => Command::Back,
        ("home", []) => Command::Home,
        ("progress", []) => Command::Progress,
        ("leaderboard", []) => Command::Leaderboard,
        ("mailbox" | "mail", []) => Command::Mailbox,
        ("dashboard", []) => Command::Dashboard,
        ("start", []) => Command::Start,
        ("reset", []) => Command::Reset,
        ("answer", [equation, value]) => Command::Answer {
            equation: equation.to_string(),
            value: value.to_string(),
        },
        ("hint", []) => Command::Hint,
        ("law", [number]) => number
            .parse::<u8>()
            .ok()
            .and_then(Law::from_number)
            .map(Command::Law)
            .ok_or_else(|| format!("law must be 1, 2 or 3, got '{number}'"))?,
        ("push", [direction]) => Command::Push(parse_push(direction)?),
        ("force", [fx, fy]) => Command::Force {
            fx: parse_number(fx)?,
            fy: parse_number(fy)?,
        },
        ("click", [x, y]) => Command::Click {
            x: parse_number(x)?,
            y: parse_number(y)?,
        },
        ("open", [id]) => Command::Open(id.to_string()),
        ("star", [id]) => Command::Star(id.to_string()),
        ("search", words) => Command::Search(words.join(" ")),
        ("sort", [order]) => Command::Sort(parse_sort(order)?),
        ("filter", ["category", value]) => Command::FilterCategory(parse_category(value)?),
        ("filter", ["status", value]) => Command::FilterStatus(parse_status(value)?),
        ("locale", [code]) => Command::Locale(code.parse().map_err(|err| format!("{err}"))?),
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(format!("unrecognized command '{other}'; type 'help'")),
    };
    Ok(command)
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

fn parse_push(raw: &str) -> Result<Push, String> {
    match raw.to_ascii_lowercase().as_str() {
        "right" => Ok(Push::Right),
        "left" => Ok(Push::Left),
        "up" => Ok(Push::Up),
        "down" => Ok(Push::Down),
        other => Err(format!("unknown direction '{other}'")),
    }
}

fn parse_sort(raw: &str) -> Result<MailSort, String> {
    match raw.to_ascii_lowercase().as_str() {
        "newest" => Ok(MailSort::Newest),
        "oldest" => Ok(MailSort::Oldest),
        "deadline" => Ok(MailSort::Deadline),
        "amount" => Ok(MailSort::Amount),
        other => Err(format!("unknown sort order '{other}'")),
    }
}

fn parse_category(raw: &str) -> Result<Option<MailCategory>, String> {
    match raw.to_ascii_lowercase().as_str() {
        "all" => Ok(None),
        "scholarship" => Ok(Some(MailCategory::Scholarship)),
        "internship" => Ok(Some(MailCategory::Internship)),
        "partnership" => Ok(Some(MailCategory::Partnership)),
        "donation" => Ok(Some(MailCategory::Donation)),
        other => Err(format!("unknown category '{other}'")),
    }
}

fn parse_status(raw: &str) -> Result<Option<MailStatus>, String> {
    match raw.to_ascii_lowercase().as_str() {
        "all" => Ok(None),
        "open" => Ok(Some(MailStatus::Open)),
        "applied" => Ok(Some(MailStatus::Applied)),
        "closed" => Ok(Some(MailStatus::Closed)),
        "expired" => Ok(Some(MailStatus::Expired)),
        other => Err(format!("unknown status '{other}'")),
    }
}

/// View a command acts on; it is rejected anywhere else.
pub fn required_view(command: &Command) -> Option<View> {
    match command {
        Command::Answer { .. } | Command::Hint => Some(View::AlgebraGame),
        Command::Law(_) | Command::Push(_) | Command::Force { .. } | Command::Click { .. } => {
            Some(View::MotionGame)
        }
        Command::Open(_)
        | Command::Star(_)
        | Command::Search(_)
        | Command::Sort(_)
        | Command::FilterCategory(_)
        | Command::FilterStatus(_) => Some(View::Mailbox),
        _ => None,
    }
}

/// Mailbox and dashboard are only offered to staff accounts.
pub fn is_staff_only(command: &Command) -> bool {
    matches!(command, Command::Mailbox | Command::Dashboard)
}

pub fn classify_login_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("required") {
        "Enter both an email and a password, then retry sign-in.".to_string()
    } else if lower.contains("superseded") {
        "Sign-in was cancelled by a newer session change.".to_string()
    } else if lower.contains("storage") || lower.contains("database") {
        "Local session storage failed; check the database path and retry.".to_string()
    } else {
        format!("Login error: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_defaults_to_student() {
        assert_eq!(
            parse_command("login asha@school.edu pw").expect("parse"),
            Command::Login {
                identifier: "asha@school.edu".into(),
                secret: "pw".into(),
                role: Role::Student,
            }
        );
        assert!(matches!(
            parse_command("login r@s.edu pw teacher"),
            Ok(Command::Login {
                role: Role::Teacher,
                ..
            })
        ));
    }

    #[test]
    fn parses_navigation_and_game_commands() {
        assert_eq!(
            parse_command("grade 9").expect("grade"),
            Command::Grade(Grade::new(9).expect("valid"))
        );
        assert_eq!(
            parse_command("PLAY algebra").expect("play"),
            Command::Play(GameKind::AlgebraPuzzle)
        );
        assert_eq!(parse_command("law 3").expect("law"), Command::Law(Law::Reaction));
        assert_eq!(
            parse_command("force 12 -4.5").expect("force"),
            Command::Force { fx: 12.0, fy: -4.5 }
        );
        assert_eq!(
            parse_command("search merit award").expect("search"),
            Command::Search("merit award".into())
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("").is_err());
        assert!(parse_command("grade 4").is_err());
        assert!(parse_command("law 7").is_err());
        assert!(parse_command("force x 1").is_err());
        assert!(parse_command("login only-one").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn parses_mail_filters() {
        assert_eq!(
            parse_command("filter category internship").expect("category"),
            Command::FilterCategory(Some(MailCategory::Internship))
        );
        assert_eq!(
            parse_command("filter status all").expect("status"),
            Command::FilterStatus(None)
        );
        assert!(parse_command("filter colour red").is_err());
        assert!(parse_command("filter status pending").is_err());
    }

    #[test]
    fn mailbox_commands_need_the_mailbox_screen() {
        for line in ["star 1", "search merit", "sort amount", "open 2", "filter status open"] {
            let command = parse_command(line).expect("parse");
            assert_eq!(required_view(&command), Some(View::Mailbox), "{line}");
        }
        assert_eq!(
            required_view(&parse_command("answer eq1 4").expect("parse")),
            Some(View::AlgebraGame)
        );
        assert_eq!(
            required_view(&parse_command("push left").expect("parse")),
            Some(View::MotionGame)
        );
        assert_eq!(required_view(&Command::Leaderboard), None);
    }

    #[test]
    fn staff_only_commands() {
        assert!(is_staff_only(&Command::Mailbox));
        assert!(is_staff_only(&Command::Dashboard));
        assert!(!is_staff_only(&Command::Leaderboard));
    }

    #[test]
    fn classifies_login_failures() {
        assert!(classify_login_failure("identifier and secret are both required")
            .starts_with("Enter both"));
        assert!(classify_login_failure("session storage failure: disk full")
            .contains("storage failed"));
        assert_eq!(classify_login_failure("boom"), "Login error: boom");
    }
}
