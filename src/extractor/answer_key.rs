// src/extractor/answer_key.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// "№12 1,3", "N 4 2", "7. 1" ... the question number, then the raw answer.
static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:N|№)?[\s°]*(\d+)[\s°.:)\-]*(.*)$").expect("valid answer line pattern")
});

static NOT_DIGIT_OR_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9,]").expect("valid cleanup pattern"));

/// Why an answer string produced no option indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Nothing but whitespace.
    Empty,
    /// No digits left after dropping everything but digits and commas.
    NoDigits,
    /// A token that is not a valid 1-based option number.
    InvalidToken(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Empty => write!(f, "answer is empty"),
            ParseFailure::NoDigits => write!(f, "answer has no option numbers"),
            ParseFailure::InvalidToken(token) => write!(f, "invalid option number {:?}", token),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Parses the answer-key text into question number -> raw answer string.
///
/// Blank lines and lines without a leading question number are skipped.
/// When a number repeats, the last line wins.
pub fn parse_answer_key(text: &str) -> BTreeMap<i64, String> {
    let mut answers = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(caps) = ANSWER_LINE.captures(line) else {
            continue;
        };

        let number = match caps[1].parse::<i64>() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("Failed to parse answer line {:?}: {}", line, e);
                continue;
            }
        };
        let answer = caps[2].trim().to_string();

        if answers.insert(number, answer).is_some() {
            tracing::warn!("Answer for question {} listed more than once, keeping the last", number);
        }
    }

    answers
}

/// Parses "1,3" into 0-based option indices `[0, 2]`.
///
/// Everything except digits and commas is discarded first. A single bad
/// token fails the whole string.
pub fn parse_answer_string(raw: &str) -> Result<Vec<usize>, ParseFailure> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let cleaned = NOT_DIGIT_OR_COMMA.replace_all(raw, "");
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(ParseFailure::NoDigits);
    }

    cleaned
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(ParseFailure::InvalidToken(token.to_string())),
        })
        .collect()
}

/// Lenient form of [`parse_answer_string`]: any failure means "no answer".
pub fn answer_indices(raw: &str) -> Vec<usize> {
    parse_answer_string(raw).unwrap_or_default()
}
