use serde::{Deserialize, Serialize};

/// Kind of a declared holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Stock,
    Etf,
    Crypto,
    Other,
}

/// A user-declared holding. Read-only input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortfolioAsset {
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
}

impl PortfolioAsset {
    pub fn new(symbol: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            asset_type,
        }
    }

    /// Creates a stock holding.
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetType::Stock)
    }

    /// Creates a crypto holding.
    pub fn crypto(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetType::Crypto)
    }

    /// Parses a comma-separated symbol list ("AAPL, spy,BTC") into stock holdings.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::stock)
            .collect()
    }
}
