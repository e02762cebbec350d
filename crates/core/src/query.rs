use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request for a page of news.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    /// Provider category (e.g., "general", "forex", "crypto")
    pub category: String,
    pub page: u32,
    /// Maximum items returned after sorting
    pub limit: usize,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            page: 1,
            limit: 50,
        }
    }
}

impl NewsQuery {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Request for calendar events in an inclusive date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Keep only US events / USD releases
    pub us_only: bool,
}

impl CalendarQuery {
    /// Creates a query; `from` and `to` are swapped if given in reverse.
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        Self {
            from,
            to,
            us_only: false,
        }
    }

    #[must_use]
    pub fn us_only(mut self, us_only: bool) -> Self {
        self.us_only = us_only;
        self
    }

    /// Returns true if `date` is inside `[from, to]`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Time-range component of the cache key.
    #[must_use]
    pub fn range_key(&self) -> String {
        format!("{}..{}", self.from.format("%Y-%m-%d"), self.to.format("%Y-%m-%d"))
    }
}
