use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    catalog::{self, MailQuery},
    games::{AnswerOutcome, ForceOutcome},
    AuthService, LearningClient, Translator,
};
use shared::{
    domain::{Locale, Role},
    navigation::{NavEvent, Screen, View},
};
use storage::SqliteSessionStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{
    classify_login_failure, is_staff_only, parse_command, required_view, Command, HELP,
};

#[derive(Parser, Debug)]
#[command(name = "learner", about = "Terminal client for the rural learning platform")]
struct Args {
    /// Settings file; missing is fine.
    #[arg(long, default_value = "learner.toml")]
    config: PathBuf,
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    locale: Option<Locale>,
    #[arg(long)]
    login_delay_ms: Option<u64>,
    #[arg(long)]
    log_level: Option<String>,
    /// Extra translation table merged over the built-in one.
    #[arg(long)]
    translations: Option<PathBuf>,
}

impl Args {
    fn apply(self, settings: &mut config::Settings) {
        if let Some(v) = self.database_url {
            settings.database_url = v;
        }
        if let Some(v) = self.locale {
            settings.locale = v;
        }
        if let Some(v) = self.login_delay_ms {
            settings.login_delay_ms = v;
        }
        if let Some(v) = self.log_level {
            settings.log_level = v;
        }
        if let Some(v) = self.translations {
            settings.translations_path = Some(v);
        }
    }
}

struct Terminal {
    client: LearningClient,
    mail_query: MailQuery,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config)?;
    args.apply(&mut settings);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let database_url = config::prepare_database_url(&settings.database_url);
    let store = SqliteSessionStore::new(&database_url)
        .await
        .with_context(|| format!("failed to open session store at '{database_url}'"))?;

    let mut translator = Translator::builtin(settings.locale)?;
    if let Some(path) = &settings.translations_path {
        let merged = translator
            .merge_file(path)
            .with_context(|| format!("failed to load translations from '{}'", path.display()))?;
        tracing::info!(merged, path = %path.display(), "merged translation overrides");
    }

    let auth = AuthService::with_login_delay(
        Arc::new(store),
        Duration::from_millis(settings.login_delay_ms),
    );
    let mut terminal = Terminal {
        client: LearningClient::new(auth, translator),
        mail_query: MailQuery::default(),
    };

    if let Err(err) = terminal.client.restore_session().await {
        tracing::warn!(error = %err, "could not restore previous session");
    }
    terminal.print_screen().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        terminal.handle(command).await;
    }

    Ok(())
}

impl Terminal {
    async fn print_screen(&self) {
        let user = self.client.user().await;
        println!(
            "\n{}",
            render::render(&self.client, user.as_ref(), &self.mail_query)
        );
    }

    async fn handle(&mut self, command: Command) {
        tracing::debug!(command = ?command, "handling command");
        let role = self.client.session().await.role();

        if is_staff_only(&command) && !matches!(role, Some(Role::Teacher | Role::Developer)) {
            println!("That page is only available to teachers.");
            return;
        }
        if let Some(view) = required_view(&command) {
            if self.client.screen().view() != view {
                println!("that command only works on the {} screen", view_label(view));
                return;
            }
        }

        match command {
            Command::Login {
                identifier,
                secret,
                role,
            } => {
                println!("signing in...");
                if let Err(err) = self.client.login(&identifier, &secret, role).await {
                    println!("{}", classify_login_failure(&err.to_string()));
                    return;
                }
            }
            Command::Offline => {
                if let Err(err) = self.client.offline_access().await {
                    println!("{}", classify_login_failure(&err.to_string()));
                    return;
                }
            }
            Command::Logout => {
                self.mail_query = MailQuery::default();
                if let Err(err) = self.client.logout().await {
                    println!("signed out, but the stored session could not be cleared: {err}");
                }
            }
            Command::Grade(grade) => {
                self.client.navigate(NavEvent::SelectGrade(grade)).await;
            }
            Command::Subject(id) => {
                let Some(grade) = self.client.navigation().selected_grade() else {
                    println!("choose a grade first");
                    return;
                };
                let known = catalog::subject_ids_for_grade(grade);
                if !known.contains(&id.as_str()) {
                    println!("no subject '{id}' in grade {grade}; try: {}", known.join(", "));
                    return;
                }
                let subject = catalog::subject_ref(&id, self.client.translator());
                self.client.navigate(NavEvent::SelectSubject(subject)).await;
            }
            Command::Play(kind) => {
                self.client.navigate(NavEvent::PlayGame(kind)).await;
            }
            Command::Back => {
                self.client.navigate(NavEvent::Back).await;
            }
            Command::Home => {
                self.client.navigate(NavEvent::Home).await;
            }
            Command::Progress => {
                self.client.navigate(NavEvent::GoToProgress).await;
            }
            Command::Leaderboard => {
                self.client.navigate(NavEvent::GoToLeaderboard).await;
            }
            Command::Mailbox => {
                self.client.navigate(NavEvent::GoToMailbox).await;
            }
            Command::Dashboard => {
                self.client.navigate(NavEvent::GoToTeacherDashboard).await;
            }
            Command::Start | Command::Reset | Command::Hint => self.game_control(command),
            Command::Answer { equation, value } => {
                let outcome = self.client.algebra_mut().submit_answer(&equation, &value);
                println!("{}", describe_answer(outcome));
            }
            Command::Law(law) => {
                self.client.motion_mut().select_law(law);
            }
            Command::Push(_) | Command::Force { .. } | Command::Click { .. } => {
                let motion = self.client.motion_mut();
                let outcome = match command {
                    Command::Push(direction) => motion.push(direction),
                    Command::Force { fx, fy } => motion.apply_force(fx, fy),
                    Command::Click { x, y } => motion.click_at(x, y),
                    _ => return,
                };
                println!("{}", describe_force(outcome));
            }
            Command::Open(id) => {
                match self.client.mailbox_mut().open(&id) {
                    Some(mail) => {
                        println!("{}\nfrom {} <{}>", mail.subject, mail.company, mail.from);
                        println!("amount {} · deadline {}", mail.amount, mail.deadline);
                        for criterion in mail.criteria {
                            println!("  - {criterion}");
                        }
                    }
                    None => println!("no mail '{id}'"),
                }
                return;
            }
            Command::Star(id) => match self.client.mailbox_mut().toggle_star(&id) {
                Some(true) => println!("starred {id}"),
                Some(false) => println!("unstarred {id}"),
                None => println!("no mail '{id}'"),
            },
            Command::Search(text) => self.mail_query.search = text,
            Command::Sort(order) => self.mail_query.sort = order,
            Command::FilterCategory(category) => self.mail_query.category = category,
            Command::FilterStatus(status) => self.mail_query.status = status,
            Command::Locale(locale) => self.client.translator_mut().set_locale(locale),
            Command::Help => {
                println!("{HELP}");
                return;
            }
            Command::Quit => return,
        }

        self.print_screen().await;
    }

    fn game_control(&mut self, command: Command) {
        match (self.client.screen(), command) {
            (Screen::AlgebraGame, Command::Start) => self.client.algebra_mut().start(),
            (Screen::AlgebraGame, Command::Reset) => self.client.algebra_mut().reset(),
            (Screen::AlgebraGame, Command::Hint) => self.client.algebra_mut().dismiss_hint(),
            (Screen::MotionGame, Command::Start) => self.client.motion_mut().start(),
            (Screen::MotionGame, Command::Reset) => self.client.motion_mut().reset(),
            _ => println!("nothing to control on this screen"),
        }
    }
}

fn view_label(view: View) -> &'static str {
    match view {
        View::AlgebraGame => "algebra puzzle",
        View::MotionGame => "motion simulation",
        View::Mailbox => "mailbox",
        _ => "matching",
    }
}

fn describe_answer(outcome: AnswerOutcome) -> String {
    match outcome {
        AnswerOutcome::Correct { revealed } => format!("correct! {revealed} letters revealed"),
        AnswerOutcome::Completed => "puzzle complete!".to_string(),
        AnswerOutcome::Incorrect => "not quite, try again".to_string(),
        AnswerOutcome::NotANumber => "answers are whole numbers".to_string(),
        AnswerOutcome::UnknownEquation => "no such equation".to_string(),
        AnswerOutcome::AlreadySolved => "already solved".to_string(),
        AnswerOutcome::NotRunning => "type 'start' first".to_string(),
    }
}

fn describe_force(outcome: ForceOutcome) -> String {
    match outcome {
        ForceOutcome::Applied { score, xp } => format!("+{score} score, +{xp} xp"),
        ForceOutcome::NoEffect => "no effect under this law".to_string(),
        ForceOutcome::NotRunning => "type 'start' first".to_string(),
    }
}
