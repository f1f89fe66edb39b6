//! Academic quarters and quarter-range enumeration
//!
//! Quarter codes use the `YYYYQ` encoding: a four-digit year followed by a
//! single term digit. Which term digits exist in a year is decided by a
//! [`TermCalendar`], so the same enumeration works for semester or trimester
//! schools.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Regex for the `YYYYQ` encoding
static QUARTER_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d)$").unwrap());

/// Errors produced while parsing a quarter code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuarterError {
    #[error("quarter code must be five digits (YYYYQ), got '{0}'")]
    Malformed(String),
    #[error("term digit {digit} in '{code}' is outside 1..={terms}")]
    UnknownTerm { code: String, digit: u32, terms: u32 },
}

/// Term letters of one academic year, in calendar order
///
/// The term digit of a term is its 1-based position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCalendar {
    letters: Vec<char>,
}

impl Default for TermCalendar {
    fn default() -> Self {
        Self::ucsb()
    }
}

impl TermCalendar {
    pub fn new(letters: &[char]) -> Self {
        Self {
            letters: letters.to_vec(),
        }
    }

    /// Winter, Spring, Summer, Fall
    pub fn ucsb() -> Self {
        Self::new(&['W', 'S', 'M', 'F'])
    }

    pub fn terms_per_year(&self) -> u32 {
        self.letters.len() as u32
    }

    /// Letter for a 1-based term digit
    pub fn letter(&self, term: u32) -> Option<char> {
        let index = term.checked_sub(1)? as usize;
        self.letters.get(index).copied()
    }
}

/// A parsed `YYYYQ` code
///
/// Ordering is chronological: year first, then term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterCode {
    year: u32,
    term: u32,
}

impl QuarterCode {
    pub fn parse(code: &str, calendar: &TermCalendar) -> Result<Self, QuarterError> {
        let caps = QUARTER_CODE_REGEX
            .captures(code)
            .ok_or_else(|| QuarterError::Malformed(code.to_string()))?;

        let year: u32 = caps[1]
            .parse()
            .map_err(|_| QuarterError::Malformed(code.to_string()))?;
        let term: u32 = caps[2]
            .parse()
            .map_err(|_| QuarterError::Malformed(code.to_string()))?;

        if term == 0 || term > calendar.terms_per_year() {
            return Err(QuarterError::UnknownTerm {
                code: code.to_string(),
                digit: term,
                terms: calendar.terms_per_year(),
            });
        }

        Ok(Self { year, term })
    }

    /// The quarter immediately after this one
    pub fn next(&self, calendar: &TermCalendar) -> QuarterCode {
        if self.term < calendar.terms_per_year() {
            QuarterCode {
                year: self.year,
                term: self.term + 1,
            }
        } else {
            QuarterCode {
                year: self.year + 1,
                term: 1,
            }
        }
    }

    /// Short label such as `W22`
    pub fn label(&self, calendar: &TermCalendar) -> String {
        let letter = calendar.letter(self.term).unwrap_or('?');
        format!("{}{:02}", letter, self.year % 100)
    }
}

impl fmt::Display for QuarterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{}", self.year, self.term)
    }
}

/// A quarter as shown in selection controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    /// `YYYYQ` code, e.g. `20221`
    pub code: String,
    /// Human-readable abbreviation, e.g. `W22`
    pub label: String,
}

impl Quarter {
    pub fn from_code(code: QuarterCode, calendar: &TermCalendar) -> Self {
        Self {
            code: code.to_string(),
            label: code.label(calendar),
        }
    }
}

/// Convert `20242` into `S24` using the default calendar
pub fn yyyyq_to_qyy(code: &str) -> Option<String> {
    let calendar = TermCalendar::ucsb();
    QuarterCode::parse(code, &calendar)
        .ok()
        .map(|c| c.label(&calendar))
}

/// Every quarter from `start` to `end`, inclusive
///
/// Returns an empty list when `start` comes after `end` or when either code
/// does not parse under `calendar`.
pub fn enumerate(start: &str, end: &str, calendar: &TermCalendar) -> Vec<Quarter> {
    let (Ok(start), Ok(end)) = (
        QuarterCode::parse(start, calendar),
        QuarterCode::parse(end, calendar),
    ) else {
        return Vec::new();
    };

    if start > end {
        return Vec::new();
    }

    let mut quarters = Vec::new();
    let mut current = start;
    loop {
        quarters.push(Quarter::from_code(current, calendar));
        if current == end {
            break;
        }
        current = current.next(calendar);
    }
    quarters
}

/// Add `code` to an enumerated list, keeping it in chronological order
///
/// Codes are fixed width, so string order is chronological order.
pub fn insert_quarter(quarters: &mut Vec<Quarter>, code: QuarterCode, calendar: &TermCalendar) {
    let quarter = Quarter::from_code(code, calendar);
    if let Err(at) = quarters.binary_search_by(|q| q.code.cmp(&quarter.code)) {
        quarters.insert(at, quarter);
    }
}
