//! Data models for schemeurl
//!
//! Defines the saved scheme URL record, the incoming link event, and the
//! application log entry.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::query::parse_query;

/// Decoded query parameters in first-seen order
pub type QueryParams = IndexMap<String, String>;

/// A named scheme URL saved by the user
///
/// Records are immutable once created; there is no edit operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedUrl {
    /// Unique identifier, the only lookup key
    pub id: String,
    /// Display label
    pub name: String,
    /// The scheme URL, stored as entered
    pub url: String,
}

impl SavedUrl {
    /// Create a record with a fresh identifier
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Rejections for a new entry before it reaches the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Scheme URL must not be empty")]
    EmptyUrl,
}

/// Check the user-supplied fields of a new entry
///
/// Whitespace-only values count as empty.
pub fn validate_new_entry(name: &str, url: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if url.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    Ok(())
}

/// One received deep link
///
/// Produced per ingestion event and never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IncomingLink {
    /// The URL exactly as received
    pub raw_url: String,
    /// `None` when the URL has no query string at all
    pub query_params: Option<QueryParams>,
}

impl IncomingLink {
    /// Parse a raw URL into a link event
    pub fn from_raw(raw_url: impl Into<String>) -> Self {
        let raw_url = raw_url.into();
        let query_params = parse_query(&raw_url);
        Self {
            raw_url,
            query_params,
        }
    }

    /// Whether the URL carried a `?`, even an empty one
    pub fn has_query(&self) -> bool {
        self.query_params.is_some()
    }
}

/// Severity of an application log entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A persisted application log line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(default)]
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message: message.into(),
            level,
        }
    }
}
