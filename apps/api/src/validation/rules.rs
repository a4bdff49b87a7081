//! Field-level rules. Each rule is a pure check over an already-coerced value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::emoji::contains_emoji;
use crate::validation::errors::{Violation, ViolationKind};

pub const SUMMARY_MIN_WORDS: usize = 80;
pub const SUMMARY_MAX_WORDS: usize = 120;
pub const MIN_RESPONSIBILITIES: usize = 3;

const EMOJI_MESSAGE: &str = "Content cannot contain emojis, icons, or graphics";
const SKILLS_EMOJI_MESSAGE: &str = "Skills cannot contain emojis, icons, or graphics";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("valid phone regex"));
static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3} [0-9]{4}$").expect("valid date regex"));

/// Literal accepted by end-date-capable fields in place of a month-year.
pub const PRESENT: &str = "Present";

/// A rule attached to a string field (or to each element of a string list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Email,
    Phone,
    /// `MMM YYYY`, optionally also the literal `Present`.
    MonthYear { allow_present: bool },
    WordCount { min: usize, max: usize },
    NoEmoji,
    /// Raw value must contain at least one comma.
    CommaSeparated,
    /// Every trimmed, non-empty comma-separated token must be emoji-free.
    NoEmojiTokens,
}

impl Rule {
    pub fn check(&self, value: &str) -> Result<(), Violation> {
        match *self {
            Rule::MinLength(min) => {
                if value.chars().count() < min {
                    let unit = if min == 1 { "character" } else { "characters" };
                    return Err(Violation::new(
                        ViolationKind::LengthViolation,
                        format!("String should have at least {min} {unit}"),
                    ));
                }
                Ok(())
            }
            Rule::MaxLength(max) => {
                if value.chars().count() > max {
                    return Err(Violation::new(
                        ViolationKind::LengthViolation,
                        format!("String should have at most {max} characters"),
                    ));
                }
                Ok(())
            }
            Rule::Email => {
                if !EMAIL_RE.is_match(value) {
                    return Err(Violation::new(
                        ViolationKind::PatternViolation,
                        "Email must match the local@domain.tld format",
                    ));
                }
                Ok(())
            }
            Rule::Phone => {
                if !PHONE_RE.is_match(value) {
                    return Err(Violation::new(
                        ViolationKind::PatternViolation,
                        "Phone may only contain digits, spaces, '+', '-', and parentheses",
                    ));
                }
                Ok(())
            }
            Rule::MonthYear { allow_present } => check_month_year(value, allow_present),
            Rule::WordCount { min, max } => {
                let count = word_count(value);
                if !(min..=max).contains(&count) {
                    return Err(Violation::new(
                        ViolationKind::WordCountViolation,
                        format!("Summary must be {min}-{max} words, got {count}"),
                    ));
                }
                Ok(())
            }
            Rule::NoEmoji => {
                if contains_emoji(value) {
                    return Err(Violation::new(ViolationKind::EmojiViolation, EMOJI_MESSAGE));
                }
                Ok(())
            }
            Rule::CommaSeparated => {
                if !value.contains(',') {
                    return Err(Violation::new(
                        ViolationKind::CommaFormatViolation,
                        "Skills must be in comma-separated format",
                    ));
                }
                Ok(())
            }
            Rule::NoEmojiTokens => {
                if skill_tokens(value).any(contains_emoji) {
                    return Err(Violation::new(
                        ViolationKind::EmojiViolation,
                        SKILLS_EMOJI_MESSAGE,
                    ));
                }
                Ok(())
            }
        }
    }
}

/// A rule attached to a list of strings as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRule {
    MinItems { min: usize, noun: &'static str },
    NoBlankItems { noun: &'static str },
}

impl ListRule {
    pub fn check(&self, items: &[&str]) -> Result<(), Violation> {
        match *self {
            ListRule::MinItems { min, noun } => {
                if items.len() < min {
                    return Err(Violation::new(
                        ViolationKind::MinCountViolation,
                        format!("Minimum {min} {noun} required, got {}", items.len()),
                    ));
                }
                Ok(())
            }
            ListRule::NoBlankItems { noun } => {
                if items.iter().any(|item| item.trim().is_empty()) {
                    return Err(Violation::new(
                        ViolationKind::EmptyElementViolation,
                        format!("{} cannot be empty", capitalize(noun)),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Whitespace-delimited token count. Leading, trailing and repeated
/// whitespace never produce tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trimmed, non-empty comma-separated tokens of a skills string.
pub fn skill_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|token| !token.is_empty())
}

fn check_month_year(value: &str, allow_present: bool) -> Result<(), Violation> {
    if MONTH_YEAR_RE.is_match(value) || (allow_present && value == PRESENT) {
        return Ok(());
    }
    let message = if allow_present {
        "Date must be in MMM YYYY format or 'Present'"
    } else {
        "Date must be in MMM YYYY format"
    };
    Err(Violation::new(ViolationKind::PatternViolation, message))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
