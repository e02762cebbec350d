//! Cache record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key: category, page and time range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    pub category: String,
    pub page: u32,
    pub time_range: String,
}

impl CacheKey {
    pub fn new(category: impl Into<String>, page: u32, time_range: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            page,
            time_range: time_range.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.page, self.time_range)
    }
}

/// A cached payload with its validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: CacheKey,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry is expired strictly after `expires_at`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Deserializes the payload into a typed value.
    ///
    /// # Errors
    /// Returns an error if the payload does not match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}
