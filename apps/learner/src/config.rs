use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::Locale;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub locale: Locale,
    pub login_delay_ms: u64,
    pub log_level: String,
    pub translations_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/session.db".into(),
            locale: Locale::En,
            login_delay_ms: 1000,
            log_level: "info".into(),
            translations_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    database_url: Option<String>,
    locale: Option<String>,
    login_delay_ms: Option<u64>,
    log_level: Option<String>,
    translations_path: Option<PathBuf>,
}

/// Defaults, then the optional settings file, then `APP__*` environment
/// overrides. A missing file is not an error.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.database_url {
        settings.database_url = v;
    }
    if let Some(v) = file_cfg.locale {
        settings.locale = v.parse()?;
    }
    if let Some(v) = file_cfg.login_delay_ms {
        settings.login_delay_ms = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    if let Some(v) = file_cfg.translations_path {
        settings.translations_path = Some(v);
    }
    Ok(())
}

pub fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = lookup("APP__LOCALE") {
        settings.locale = v.parse().context("APP__LOCALE")?;
    }

    if let Some(v) = lookup("APP__LOGIN_DELAY_MS") {
        settings.login_delay_ms = v
            .trim()
            .parse()
            .with_context(|| format!("APP__LOGIN_DELAY_MS is not a number: '{v}'"))?;
    }

    if let Some(v) = lookup("APP__LOG_LEVEL") {
        settings.log_level = v;
    }

    if let Some(v) = lookup("APP__TRANSLATIONS_PATH") {
        settings.translations_path = Some(PathBuf::from(v));
    }
    Ok(())
}

/// Accepts bare file paths and `sqlite:` shorthands, producing a `sqlite://`
/// url. The store creates the parent directory when it opens the file.
pub fn prepare_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn normalizes_plain_file_path_to_sqlite_url() {
        assert_eq!(
            prepare_database_url("./data/test.db"),
            "sqlite://./data/test.db"
        );
        assert_eq!(prepare_database_url("sqlite:data\\s.db"), "sqlite://data/s.db");
        assert_eq!(prepare_database_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(prepare_database_url("  "), "sqlite://./data/session.db");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(
            &mut settings,
            "locale = \"hi\"\nlogin_delay_ms = 250\ntranslations_path = \"extra.toml\"\n",
        )
        .expect("file");

        assert_eq!(settings.locale, Locale::Hi);
        assert_eq!(settings.login_delay_ms, 250);
        assert_eq!(settings.translations_path, Some(PathBuf::from("extra.toml")));
        assert_eq!(settings.database_url, Settings::default().database_url);
    }

    #[test]
    fn rejects_unknown_file_keys_and_locales() {
        let mut settings = Settings::default();
        assert!(apply_file_overrides(&mut settings, "bind_addr = \"x\"").is_err());
        assert!(apply_file_overrides(&mut settings, "locale = \"fr\"").is_err());
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_database_url() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite://plain.db"),
            ("APP__DATABASE_URL", "sqlite://app.db"),
            ("APP__LOCALE", "od"),
            ("APP__LOG_LEVEL", "debug"),
        ]);
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()))
            .expect("env");

        assert_eq!(settings.database_url, "sqlite://app.db");
        assert_eq!(settings.locale, Locale::Od);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn bad_login_delay_is_reported() {
        let mut settings = Settings::default();
        let err = apply_env_overrides(&mut settings, |key| {
            (key == "APP__LOGIN_DELAY_MS").then(|| "soon".to_string())
        })
        .expect_err("not a number");
        assert!(err.to_string().contains("APP__LOGIN_DELAY_MS"));
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(settings.login_delay_ms, Settings::default().login_delay_ms);
    }
}
