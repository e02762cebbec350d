use serde::{Deserialize, Serialize};

/// Exchange trading session a timestamp falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionBucket {
    PreMarket,
    RegularHours,
    AfterHours,
    MarketClosed,
}

impl SessionBucket {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionBucket::PreMarket => "pre-market",
            SessionBucket::RegularHours => "regular-hours",
            SessionBucket::AfterHours => "after-hours",
            SessionBucket::MarketClosed => "market-closed",
        }
    }

    /// Returns true for pre-market, regular and after-hours sessions.
    #[must_use]
    pub fn is_trading(&self) -> bool {
        !matches!(self, SessionBucket::MarketClosed)
    }
}

impl std::fmt::Display for SessionBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
