// src/extractor/segment.rs

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// "Задание 12", "ВОПРОС №3:", "задание 4 -" ...
static QUESTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Задание|Вопрос)[\s№:]*(\d+)[\s.:\-]*").expect("valid marker pattern")
});

/// A line break plus the trailing spaces before it and the indentation after it.
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]*\n\s*").expect("valid line break pattern"));

static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]{2,}").expect("valid spaces pattern"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[).]\s*\S+").expect("valid option pattern"));

static OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[).]\s*").expect("valid option prefix pattern"));

/// A question cut out of the document, before it is joined with its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedQuestion {
    pub number: i64,
    pub question_text: String,
    pub options: Vec<String>,
}

/// Splits the document text into questions, ordered by first appearance.
///
/// Each span runs from one question marker to the next (or the end of the
/// text). A span whose number does not parse is logged and skipped. When a
/// number repeats, the later span wins but keeps the earlier position.
pub fn segment_questions(full_text: &str) -> Vec<SegmentedQuestion> {
    let markers: Vec<_> = QUESTION_MARKER.captures_iter(full_text).collect();
    let mut questions: Vec<SegmentedQuestion> = Vec::with_capacity(markers.len());
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for (i, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(full_text.len(), |m| m.start());
        let span = &full_text[whole.end()..end];

        let number = match number.as_str().parse::<i64>() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("Skipping question with bad number {:?}: {}", number.as_str(), e);
                continue;
            }
        };

        let (question_text, options) = split_prompt_and_options(&normalize_span(span));
        let question = SegmentedQuestion {
            number,
            question_text,
            options,
        };

        match positions.get(&number) {
            Some(&pos) => {
                tracing::warn!("Question {} appears more than once, keeping the last", number);
                questions[pos] = question;
            }
            None => {
                positions.insert(number, questions.len());
                questions.push(question);
            }
        }
    }

    questions
}

/// Collapses indentation-induced line breaks and repeated spaces.
pub fn normalize_span(span: &str) -> String {
    let text = LINE_BREAK.replace_all(span.trim(), "\n");
    REPEATED_SPACES.replace_all(&text, " ").trim().to_string()
}

/// Separates the prompt from the numbered option lines.
///
/// Lines before the first option form the prompt. Once options start, any
/// line that is not an option is dropped.
pub fn split_prompt_and_options(text: &str) -> (String, Vec<String>) {
    let mut prompt_lines = Vec::new();
    let mut options = Vec::new();

    for line in text.lines() {
        if OPTION_LINE.is_match(line) {
            options.push(OPTION_PREFIX.replace(line, "").trim().to_string());
        } else if options.is_empty() {
            prompt_lines.push(line);
        }
    }

    (prompt_lines.join("\n").trim().to_string(), options)
}
