use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{SearchKind, SessionId, YearRange};

/// A movie search as the user asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    Title { text: String },
    GenreYear { genre: String, years: YearRange },
}

impl MovieQuery {
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        match self {
            Self::Title { .. } => SearchKind::Title,
            Self::GenreYear { .. } => SearchKind::GenreYear,
        }
    }

    /// Normalized form used to group identical searches.
    #[must_use]
    pub fn signature(&self) -> String {
        match self {
            Self::Title { text } => format!("title:{}", normalize_text(text)),
            Self::GenreYear { genre, years } => format!(
                "genre_year:{}:{}-{}",
                normalize_text(genre),
                years.from(),
                years.to()
            ),
        }
    }

    #[must_use]
    pub fn params(&self) -> SearchParams {
        match self {
            Self::Title { text } => SearchParams {
                keyword: Some(text.clone()),
                ..SearchParams::default()
            },
            Self::GenreYear { genre, years } => SearchParams {
                genre: Some(genre.clone()),
                year_from: Some(years.from()),
                year_to: Some(years.to()),
                ..SearchParams::default()
            },
        }
    }
}

impl fmt::Display for MovieQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title { text } => write!(f, "title \"{text}\""),
            Self::GenreYear { genre, years } => write!(f, "genre {genre}, {years}"),
        }
    }
}

/// Raw search parameters as stored in a log document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
}

impl SearchParams {
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(keyword) = &self.keyword {
            parts.push(format!("keyword={keyword}"));
        }
        if let Some(genre) = &self.genre {
            parts.push(format!("genre={genre}"));
        }
        match (self.year_from, self.year_to) {
            (Some(from), Some(to)) if from == to => parts.push(format!("year={from}")),
            (Some(from), Some(to)) => parts.push(format!("years={from}-{to}")),
            (Some(year), None) | (None, Some(year)) => parts.push(format!("year={year}")),
            (None, None) => {}
        }
        parts.join(", ")
    }
}

/// One executed search, before it is written to the log store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: MovieQuery,
    pub executed_at: DateTime<Utc>,
    pub session: SessionId,
}

impl SearchQuery {
    #[must_use]
    pub fn new(query: MovieQuery, session: SessionId) -> Self {
        Self {
            query,
            executed_at: Utc::now(),
            session,
        }
    }
}

/// A search as persisted by the query logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchLogEntry {
    pub id: String,
    pub kind: SearchKind,
    pub params: SearchParams,
    pub signature: String,
    pub results_count: u64,
    pub session: Option<SessionId>,
    pub executed_at: DateTime<Utc>,
}

impl SearchLogEntry {
    #[must_use]
    pub fn from_query(id: String, search: &SearchQuery, results_count: u64) -> Self {
        Self {
            id,
            kind: search.query.kind(),
            params: search.query.params(),
            signature: search.query.signature(),
            results_count,
            session: Some(search.session),
            executed_at: search.executed_at,
        }
    }
}

/// How often a search signature was logged, and when it was last seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFrequency {
    pub signature: String,
    pub count: u64,
    pub last_seen: DateTime<Utc>,
}

/// Trims, lowercases and collapses inner whitespace.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
