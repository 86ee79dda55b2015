//! Format pattern compilation for `values_match_format` expectations.
//!
//! Patterns are templates, not raw regexes: the tokens `YYYY`, `MM`, `DD`,
//! `HH` and `SS` stand for fixed-width digit groups and every other character
//! matches itself literally. `"YYYY-MM-DD"` therefore compiles to the
//! anchored shape `^\d{4}-\d{2}-\d{2}$`.
//!
//! A pattern may additionally require calendar validity: `"2024-02-31"`
//! matches the date shape but is not a real date. Calendar checking is only
//! offered for full-date patterns (all of `YYYY`, `MM`, `DD`, no time
//! tokens); requesting it for anything else is a configuration error.

use crate::error::{AssayError, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Template tokens, longest first so `YYYY` wins over `MM`-style prefixes.
const TOKENS: &[(&str, &str, &str)] = &[
    ("YYYY", r"\d{4}", "%Y"),
    ("MM", r"\d{2}", "%m"),
    ("DD", r"\d{2}", "%d"),
    ("HH", r"\d{2}", "%H"),
    ("SS", r"\d{2}", "%S"),
];

/// A compiled format pattern, ready for per-cell matching.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    pattern: String,
    regex: Regex,
    /// strftime string for calendar validation, present only when requested
    calendar: Option<String>,
}

impl CompiledFormat {
    /// Compiles a template into an anchored matcher.
    ///
    /// Fails with [`AssayError::InvalidExpectationConfig`] on an empty
    /// pattern, or when `calendar` is requested for a pattern that is not a
    /// full date.
    pub fn compile(pattern: &str, calendar: bool) -> Result<Self> {
        if pattern.is_empty() {
            return Err(AssayError::invalid_config("format pattern must not be empty"));
        }

        let mut shape = String::from("^");
        let mut strftime = String::new();
        let mut seen = [false; 5];
        let mut rest = pattern;
        'outer: while !rest.is_empty() {
            for (i, (token, digits, fmt)) in TOKENS.iter().enumerate() {
                if rest.starts_with(token) {
                    shape.push_str(digits);
                    strftime.push_str(fmt);
                    seen[i] = true;
                    rest = &rest[token.len()..];
                    continue 'outer;
                }
            }
            let ch = rest.chars().next().expect("non-empty remainder");
            shape.push_str(&regex::escape(&ch.to_string()));
            strftime.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        shape.push('$');

        let regex = Regex::new(&shape)
            .map_err(|e| AssayError::invalid_config(format!("format pattern '{pattern}': {e}")))?;

        let calendar = if calendar {
            let full_date = seen[0] && seen[1] && seen[2];
            let has_time = seen[3] || seen[4];
            if !full_date || has_time {
                return Err(AssayError::invalid_config(format!(
                    "calendar validation requires a full date pattern, got '{pattern}'"
                )));
            }
            Some(strftime)
        } else {
            None
        };

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            calendar,
        })
    }

    /// Returns the original template this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Tests a cell's text against the pattern (and, if enabled, against the
    /// calendar).
    pub fn matches(&self, text: &str) -> bool {
        if !self.regex.is_match(text) {
            return false;
        }
        match &self.calendar {
            Some(fmt) => NaiveDate::parse_from_str(text, fmt).is_ok(),
            None => true,
        }
    }
}
