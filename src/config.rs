// src/config.rs

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

use dotenvy::dotenv;

/// Number of questions drawn for a single test.
pub const DEFAULT_QUESTIONS_PER_TEST: usize = 50;

/// Inactivity timeout after which a quiz session is forgotten.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 40;

/// Longest accepted session timeout (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Shown in results in place of the user's picks when a question was skipped.
pub const NO_ANSWER_MARKER: &str = "Нет ответа";

#[derive(Debug, Clone)]
pub struct Config {
    pub bank_path: String,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    pub questions_per_test: usize,
    pub session_ttl_minutes: i64,
    pub session_cookie: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_path: "output.json".to_string(),
            bind_addr: "0.0.0.0:5000".to_string(),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            questions_per_test: DEFAULT_QUESTIONS_PER_TEST,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            session_cookie: "quiz_session".to_string(),
        }
    }
}

impl Config {
    /// Reads the environment (and `.env`, if present).
    ///
    /// Rejected values fall back to their defaults. The returned messages
    /// describe each fallback so the caller can log them once logging is up.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenv().ok();

        let defaults = Self::default();
        let mut warnings = Vec::new();

        let bank_path = env::var("BANK_PATH").unwrap_or(defaults.bank_path);

        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let session_cookie = env::var("SESSION_COOKIE").unwrap_or(defaults.session_cookie);

        let questions_per_test = parse_in_range(
            "QUESTIONS_PER_TEST",
            env::var("QUESTIONS_PER_TEST").ok(),
            defaults.questions_per_test,
            1..=usize::MAX,
            &mut warnings,
        );

        let session_ttl_minutes = parse_in_range(
            "SESSION_TTL_MINUTES",
            env::var("SESSION_TTL_MINUTES").ok(),
            defaults.session_ttl_minutes,
            1..=MAX_SESSION_TTL_MINUTES,
            &mut warnings,
        );

        let config = Self {
            bank_path,
            bind_addr,
            rust_log,
            log_dir,
            questions_per_test,
            session_ttl_minutes,
            session_cookie,
        };

        (config, warnings)
    }
}

/// Parses a numeric setting, keeping the default when it is absent,
/// malformed or outside `range`.
fn parse_in_range<T>(
    key: &str,
    raw: Option<String>,
    default: T,
    range: RangeInclusive<T>,
    warnings: &mut Vec<String>,
) -> T
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if range.contains(&value) => value,
        _ => {
            warnings.push(format!(
                "Ignoring invalid {}={:?} (expected {}..={}), using {}",
                key,
                raw,
                range.start(),
                range.end(),
                default
            ));
            default
        }
    }
}
