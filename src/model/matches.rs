//! Match record, identifiers, and input validation.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for extra time, in minutes.
pub const EXTRA_TIME_CAP: i32 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct MatchId(pub i32);

impl From<i32> for MatchId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<MatchId> for i32 {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse::<i32>().map(Self).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                InputError::IdOutOfRange(raw.to_string())
            }
            _ => InputError::InvalidId(raw.to_string()),
        })
    }
}

/// A football match and its running statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub match_date: NaiveDate,
    pub goals: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub extra_time: i32,
}

impl Match {
    /// A freshly created match: all counters at zero.
    pub fn new(id: MatchId, fields: NewMatch) -> Self {
        Self {
            id,
            home_team: fields.home_team,
            away_team: fields.away_team,
            match_date: fields.match_date,
            goals: 0,
            yellow_cards: 0,
            red_cards: 0,
            extra_time: 0,
        }
    }

    /// Replace teams and date, leaving every counter untouched.
    pub fn apply(&mut self, fields: NewMatch) {
        self.home_team = fields.home_team;
        self.away_team = fields.away_team;
        self.match_date = fields.match_date;
    }

    pub fn counter_mut(&mut self, counter: Counter) -> &mut i32 {
        match counter {
            Counter::Goals => &mut self.goals,
            Counter::YellowCards => &mut self.yellow_cards,
            Counter::RedCards => &mut self.red_cards,
        }
    }
}

/// The unit-step counters of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Goals,
    YellowCards,
    RedCards,
}

impl Counter {
    pub const ALL: [Counter; 3] = [Counter::Goals, Counter::YellowCards, Counter::RedCards];

    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::Goals => "goals",
            Counter::YellowCards => "yellow_cards",
            Counter::RedCards => "red_cards",
        }
    }

    /// Confirmation returned after a successful increment.
    pub fn confirmation(&self) -> &'static str {
        match self {
            Counter::Goals => "Goal registered",
            Counter::YellowCards => "Yellow card registered",
            Counter::RedCards => "Red card registered",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message reported after an extra-time increment.
pub fn extra_time_message(minutes: i32) -> String {
    if minutes >= EXTRA_TIME_CAP {
        format!("Extra time reached the maximum of {EXTRA_TIME_CAP} minutes")
    } else {
        format!("Extra time increased to {minutes} minutes")
    }
}

/// Errors produced while validating client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("id must be a number, got '{0}'")]
    InvalidId(String),

    /// Numeric, but outside the range any stored id can take.
    #[error("id '{0}' is out of range")]
    IdOutOfRange(String),

    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("invalid matchDate '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_match_date(raw: &str) -> Result<NaiveDate, InputError> {
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(InputError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| InputError::InvalidDate(raw.to_string()))
}

/// Raw create/update body. Every field is optional here so that a missing
/// field is reported by name rather than as a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPayload {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub match_date: Option<String>,
}

impl MatchPayload {
    pub fn validate(self) -> Result<NewMatch, InputError> {
        let home_team = required(self.home_team, "homeTeam")?;
        let away_team = required(self.away_team, "awayTeam")?;
        let raw_date = required(self.match_date, "matchDate")?;
        let match_date = parse_match_date(&raw_date)?;

        Ok(NewMatch {
            home_team,
            away_team,
            match_date,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, InputError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(InputError::MissingField(field)),
    }
}

/// Validated fields for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub home_team: String,
    pub away_team: String,
    pub match_date: NaiveDate,
}
