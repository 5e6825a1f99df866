use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-issued identifier of a stored quiz.
/// The backend currently issues integers, but the identifier is treated as
/// opaque and only ever echoed back in `GET /quiz/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum QuizId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for QuizId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for QuizId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for QuizId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct QuizQuestion {
    pub question: String,
    /// Answer choices. The order is significant: labels (A, B, C, ...) are
    /// assigned by position.
    pub options: Vec<String>,
    /// The text of the correct option.
    pub answer: Option<String>,
    /// Free-form difficulty label, usually `easy`, `medium` or `hard`.
    pub difficulty: Option<String>,
    pub explanation: Option<String>,
}

impl QuizQuestion {
    /// Index of the correct option. `None` unless the answer matches
    /// exactly one of the options.
    #[must_use]
    pub fn correct_option_index(&self) -> Option<usize> {
        let answer = self.answer.as_deref()?;
        let mut matches = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.as_str() == answer)
            .map(|(index, _)| index);

        match (matches.next(), matches.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }
}

/// Key entities mentioned in the article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct QuizEntities {
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
}

impl QuizEntities {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// A generated quiz, as returned by `POST /generate_quiz` and
/// `GET /quiz/{id}`.
/// Only `title` is required. Use [`crate::normalize`] to build one from a
/// backend payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Quiz {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<QuizId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub key_entities: Option<QuizEntities>,
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_generated: Option<String>,
}

impl Quiz {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A row of `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct QuizHistoryItem {
    pub id: QuizId,
    pub title: String,
    pub url: String,
    /// ISO-8601 timestamp as sent by the backend.
    pub date_generated: String,
}

impl QuizHistoryItem {
    /// Parse `date_generated`. Accepts RFC 3339 timestamps and naive
    /// ISO-8601 date-times (the backend omits the offset). Timestamps with
    /// an offset keep their own wall-clock time.
    #[must_use]
    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date_generated)
    }

    /// Format `date_generated` as e.g. `Jan 5, 2024, 03:04 PM`, falling back to
    /// the raw value when it cannot be parsed.
    #[must_use]
    pub fn format_generated_at(&self) -> String {
        self.generated_at().map_or_else(
            || self.date_generated.clone(),
            |timestamp| timestamp.format("%b %-d, %Y, %I:%M %p").to_string(),
        )
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
