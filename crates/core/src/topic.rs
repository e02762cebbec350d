//! Market topic taxonomy.
//!
//! The closed set of topics every classifier path emits against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the ten market topics an item can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTopic {
    /// Rates and central banks
    Rates,
    /// Inflation and macro data
    Inflation,
    /// Regulation and policy
    Regulation,
    /// Earnings and financials
    Earnings,
    /// M&A and corporate actions
    Mergers,
    /// Tech and product launches
    Tech,
    /// Hacks, breaches, outages
    Security,
    /// ETFs and fund flows
    EtfFlows,
    /// Legal and enforcement actions
    Legal,
    /// Geopolitics and crisis
    Geopolitics,
}

impl MarketTopic {
    /// All topics in taxonomy order.
    pub const ALL: [MarketTopic; 10] = [
        MarketTopic::Rates,
        MarketTopic::Inflation,
        MarketTopic::Regulation,
        MarketTopic::Earnings,
        MarketTopic::Mergers,
        MarketTopic::Tech,
        MarketTopic::Security,
        MarketTopic::EtfFlows,
        MarketTopic::Legal,
        MarketTopic::Geopolitics,
    ];

    /// Returns the wire id.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTopic::Rates => "rates",
            MarketTopic::Inflation => "inflation",
            MarketTopic::Regulation => "regulation",
            MarketTopic::Earnings => "earnings",
            MarketTopic::Mergers => "mergers",
            MarketTopic::Tech => "tech",
            MarketTopic::Security => "security",
            MarketTopic::EtfFlows => "etf_flows",
            MarketTopic::Legal => "legal",
            MarketTopic::Geopolitics => "geopolitics",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MarketTopic::Rates => "Rates & Central Banks",
            MarketTopic::Inflation => "Inflation & Macro",
            MarketTopic::Regulation => "Regulation & Policy",
            MarketTopic::Earnings => "Earnings & Financials",
            MarketTopic::Mergers => "M&A & Corporate Actions",
            MarketTopic::Tech => "Tech & Product",
            MarketTopic::Security => "Security Incident",
            MarketTopic::EtfFlows => "ETFs & Flows",
            MarketTopic::Legal => "Legal & Enforcement",
            MarketTopic::Geopolitics => "Geopolitics & Crisis",
        }
    }
}

impl fmt::Display for MarketTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketTopic {
    type Err = String;

    /// Accepts wire ids plus the loose spellings LLMs tend to produce.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        match normalized.as_str() {
            "rates" | "rates_central_banks" | "central_banks" | "monetary_policy" => {
                Ok(MarketTopic::Rates)
            }
            "inflation" | "inflation_macro" | "macro" => Ok(MarketTopic::Inflation),
            "regulation" | "regulation_policy" | "policy" => Ok(MarketTopic::Regulation),
            "earnings" | "earnings_financials" | "financials" => Ok(MarketTopic::Earnings),
            "mergers" | "m_a" | "mna" | "m_a_corporate_actions" | "corporate_actions" => {
                Ok(MarketTopic::Mergers)
            }
            "tech" | "tech_product" | "technology" => Ok(MarketTopic::Tech),
            "security" | "security_incident" | "hack" => Ok(MarketTopic::Security),
            "etf_flows" | "etfs_flows" | "etf" | "etfs" | "flows" => Ok(MarketTopic::EtfFlows),
            "legal" | "legal_enforcement" | "enforcement" => Ok(MarketTopic::Legal),
            "geopolitics" | "geopolitics_crisis" | "crisis" => Ok(MarketTopic::Geopolitics),
            other => Err(format!("unknown market topic: {other}")),
        }
    }
}
