use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Developer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Developer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Developer => "developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "developer" => Ok(Role::Developer),
            other => Err(AppError::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// School grade offered by the platform, always within `6..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 12;

    pub fn new(value: u8) -> Result<Self, AppError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::validation(format!(
                "grade {value} outside {}..={}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN..=Self::MAX).map(Grade)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Grade {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(value: Grade) -> Self {
        value.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Grade {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| AppError::validation(format!("grade '{}' is not a number", s.trim())))?;
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: String,
    pub name: String,
}

impl SubjectRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "motion-simulation")]
    MotionSimulation,
    #[serde(rename = "algebra-puzzle")]
    AlgebraPuzzle,
}

impl GameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::MotionSimulation => "motion-simulation",
            GameKind::AlgebraPuzzle => "algebra-puzzle",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "motion-simulation" | "motion" => Ok(GameKind::MotionSimulation),
            "algebra-puzzle" | "algebra" => Ok(GameKind::AlgebraPuzzle),
            other => Err(AppError::validation(format!("unknown game '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Hi,
    Od,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Od => "od",
        }
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "hi" => Ok(Locale::Hi),
            "od" => Ok(Locale::Od),
            other => Err(AppError::validation(format!("unsupported locale '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_rejects_values_outside_catalog() {
        assert!(Grade::new(5).expect_err("too low").is_validation());
        assert!(Grade::new(13).is_err());
        assert_eq!(Grade::new(9).expect("grade").value(), 9);
        assert_eq!(Grade::all().count(), 7);
    }

    #[test]
    fn user_record_round_trips_with_optional_fields() {
        let raw = r#"{"id":"t1","email":"t@school.edu","name":"t","role":"teacher"}"#;
        let user: User = serde_json::from_str(raw).expect("user json");
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.grade, None);

        let encoded = serde_json::to_string(&user).expect("encode");
        assert!(!encoded.contains("grade"));
    }

    #[test]
    fn serialized_grade_outside_range_is_rejected() {
        let raw = r#"{"id":"s","email":"s@x","name":"s","role":"student","grade":4}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }

    #[test]
    fn game_kind_parses_view_identifiers() {
        assert_eq!(
            "algebra-puzzle".parse::<GameKind>().expect("kind"),
            GameKind::AlgebraPuzzle
        );
        assert_eq!(
            serde_json::to_string(&GameKind::MotionSimulation).expect("json"),
            "\"motion-simulation\""
        );
        assert!("chess".parse::<GameKind>().is_err());
    }
}
