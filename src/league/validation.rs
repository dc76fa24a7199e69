use chrono::{DateTime, Months, NaiveDate};
use thiserror::Error;

use crate::models::game::{GameSubmission, ValidatedGame};

/// How far back a submitted game may be dated
pub const MAX_GAME_AGE_MONTHS: u32 = 2;

/// Which side of the fixture a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Reasons a submitted game is rejected. All of these are correctable by
/// the submitter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Game date '{0}' is not a valid date")]
    InvalidDate(String),

    #[error("Game date {date} cannot be in the future (today is {today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    #[error("Game date {date} cannot be more than two months old (earliest allowed is {earliest})")]
    TooOld { date: NaiveDate, earliest: NaiveDate },

    #[error("The {side} score '{value}' must be a whole number of zero or more")]
    InvalidScore { side: Side, value: String },

    #[error("The {0} team name cannot be empty")]
    InvalidTeamName(Side),

    #[error("{0} cannot play against itself")]
    SameTeam(String),
}

/// Admission check for games submitted through the admin form
#[derive(Debug, Clone)]
pub struct GameValidator {
    max_age: Months,
}

impl GameValidator {
    pub fn new() -> Self {
        Self {
            max_age: Months::new(MAX_GAME_AGE_MONTHS),
        }
    }

    /// Validate a raw submission against the supplied `today`.
    ///
    /// Text fields are sanitized first and must name two different teams,
    /// then the date window and scores are checked. The first failing check wins.
    pub fn validate(
        &self,
        submission: &GameSubmission,
        today: NaiveDate,
    ) -> Result<ValidatedGame, ValidationError> {
        let home_team_name = self.validate_team_name(&submission.home_team_name, Side::Home)?;
        let away_team_name = self.validate_team_name(&submission.away_team_name, Side::Away)?;
        if home_team_name == away_team_name {
            return Err(ValidationError::SameTeam(home_team_name));
        }

        let date = self.parse_date(&submission.date)?;
        self.validate_date_window(date, today)?;

        let home_score = self.parse_score(&submission.home_score, Side::Home)?;
        let away_score = self.parse_score(&submission.away_score, Side::Away)?;

        Ok(ValidatedGame {
            date,
            home_team_name,
            away_team_name,
            home_score,
            away_score,
        })
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
    pub fn parse_date(&self, raw: &str) -> Result<NaiveDate, ValidationError> {
        let cleaned = sanitize_input(raw);

        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&cleaned) {
            return Ok(timestamp.date_naive());
        }

        Err(ValidationError::InvalidDate(cleaned))
    }

    pub fn validate_date_window(&self, date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
        if date > today {
            return Err(ValidationError::FutureDate { date, today });
        }

        // checked_sub_months clamps to the last day of shorter months
        let earliest = today.checked_sub_months(self.max_age).unwrap_or(NaiveDate::MIN);
        if date < earliest {
            return Err(ValidationError::TooOld { date, earliest });
        }

        Ok(())
    }

    pub fn parse_score(&self, raw: &str, side: Side) -> Result<i32, ValidationError> {
        let cleaned = sanitize_input(raw);
        match cleaned.parse::<i32>() {
            Ok(score) if score >= 0 => Ok(score),
            _ => Err(ValidationError::InvalidScore { side, value: cleaned }),
        }
    }

    pub fn validate_team_name(&self, raw: &str, side: Side) -> Result<String, ValidationError> {
        let sanitized = escape_html(&sanitize_input(raw));
        if sanitized.is_empty() {
            return Err(ValidationError::InvalidTeamName(side));
        }
        Ok(sanitized)
    }
}

impl Default for GameValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim surrounding whitespace and drop NUL bytes
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|&c| c != '\0')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Escape characters that carry meaning in HTML so stored text can never
/// be interpreted as markup.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
