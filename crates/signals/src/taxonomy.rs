//! Keyword tables driving classification and scoring.
//!
//! Everything here is data: ordered `(terms, weight/metadata)` rows. Evaluation
//! lives in the classifier, scorer and matcher so tables can be extended and
//! tested on their own. Terms are lower-case; a trailing `*` marks a stem.

use edge_feed_core::MarketTopic;

/// Points per topic keyword hit.
pub const TOPIC_HIT_WEIGHT: u32 = 10;
/// Points per generic market-vocabulary hit.
pub const MARKET_VOCAB_WEIGHT: u32 = 15;
/// Points per `$TICKER` token.
pub const CASHTAG_WEIGHT: u32 = 10;
/// Points per named large-cap company.
pub const LARGE_CAP_WEIGHT: u32 = 20;
/// Minimum score that makes text relevant on its own.
pub const RELEVANCE_THRESHOLD: u32 = 10;

/// Keyword list for one topic.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub topic: MarketTopic,
    pub terms: &'static [&'static str],
}

pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: MarketTopic::Rates,
        terms: &[
            "fed",
            "federal reserve",
            "fomc",
            "powell",
            "interest rate*",
            "rate hike*",
            "rate cut*",
            "central bank*",
            "ecb",
            "bank of england",
            "boj",
            "treasury yield*",
            "bond yield*",
            "basis point*",
        ],
    },
    TopicRule {
        topic: MarketTopic::Inflation,
        terms: &[
            "inflation",
            "cpi",
            "consumer price*",
            "pce",
            "ppi",
            "producer price*",
            "deflation",
            "disinflation",
            "price index",
            "cost of living",
        ],
    },
    TopicRule {
        topic: MarketTopic::Regulation,
        terms: &[
            "regulat*",
            "sec",
            "cftc",
            "compliance",
            "legislation",
            "congress",
            "senate",
            "rulemaking",
            "oversight",
            "approval",
        ],
    },
    TopicRule {
        topic: MarketTopic::Earnings,
        terms: &[
            "earnings",
            "revenue",
            "eps",
            "quarterly",
            "profit*",
            "guidance",
            "estimates",
            "net income",
            "dividend*",
        ],
    },
    TopicRule {
        topic: MarketTopic::Mergers,
        terms: &[
            "merger*",
            "acquisition*",
            "acquire*",
            "takeover*",
            "buyout*",
            "ipo",
            "spin-off",
            "stake in",
        ],
    },
    TopicRule {
        topic: MarketTopic::Tech,
        terms: &[
            "ai",
            "artificial intelligence",
            "semiconductor*",
            "chip*",
            "cloud",
            "software",
            "data center*",
            "blockchain",
        ],
    },
    TopicRule {
        topic: MarketTopic::Security,
        terms: &[
            "hack*",
            "exploit*",
            "breach*",
            "vulnerabilit*",
            "ransomware",
            "cyberattack*",
            "stolen funds",
            "phishing",
        ],
    },
    TopicRule {
        topic: MarketTopic::EtfFlows,
        terms: &[
            "etf",
            "etfs",
            "inflow*",
            "outflow*",
            "fund flow*",
            "spot bitcoin etf*",
            "assets under management",
        ],
    },
    TopicRule {
        topic: MarketTopic::Legal,
        terms: &[
            "lawsuit*",
            "court",
            "judge",
            "indict*",
            "settlement*",
            "sued",
            "sues",
            "litigation",
            "ruling",
        ],
    },
    TopicRule {
        topic: MarketTopic::Geopolitics,
        terms: &[
            "war",
            "tariff*",
            "sanction*",
            "china",
            "russia",
            "ukraine",
            "middle east",
            "opec",
            "election*",
            "geopolitic*",
        ],
    },
];

/// Entertainment and lifestyle noise.
pub const NOISE_TERMS: &[&str] = &[
    "celebrity",
    "kardashian*",
    "red carpet",
    "oscar*",
    "grammy*",
    "horoscope*",
    "recipe*",
    "dating",
    "wedding*",
    "taylor swift",
    "box office",
    "reality tv",
    "fashion week",
    "nfl",
    "nba",
];

/// Noise that mentions any of these is kept.
pub const MARKET_CONTEXT_TERMS: &[&str] = &[
    "stock*",
    "market*",
    "shares",
    "investor*",
    "trading",
    "earnings",
    "economy",
    "fed",
    "revenue",
    "ipo",
    "crypto*",
    "bitcoin",
    "deal",
];

/// Generic market-asset vocabulary.
pub const MARKET_VOCAB: &[&str] = &[
    "stock",
    "stocks",
    "market",
    "markets",
    "trading",
    "shares",
    "equities",
    "bonds",
    "nasdaq",
    "s&p 500",
    "dow jones",
    "wall street",
    "investors",
    "bitcoin",
    "crypto",
];

/// Named large-cap companies.
pub const LARGE_CAPS: &[&str] = &[
    "apple",
    "microsoft",
    "nvidia",
    "amazon",
    "alphabet",
    "google",
    "meta",
    "tesla",
    "berkshire hathaway",
    "jpmorgan",
    "broadcom",
    "exxon",
];

/// One row of the source-authority table.
#[derive(Debug, Clone, Copy)]
pub struct SourceTier {
    pub weight: u8,
    pub label: &'static str,
    /// Substrings of the source name or URL host
    pub patterns: &'static [&'static str],
}

/// Ordered strongest first; the first matching tier wins.
pub const SOURCE_TIERS: &[SourceTier] = &[
    SourceTier {
        weight: 30,
        label: "Government / central bank",
        patterns: &[
            "federalreserve.gov",
            "sec.gov",
            "treasury.gov",
            "bls.gov",
            "bea.gov",
            "ecb.europa.eu",
            "bankofengland.co.uk",
            "whitehouse.gov",
            "imf.org",
        ],
    },
    SourceTier {
        weight: 25,
        label: "Top-tier financial press",
        patterns: &["bloomberg", "reuters", "wsj", "ft.com", "financial times", "apnews"],
    },
    SourceTier {
        weight: 18,
        label: "Quality financial press",
        patterns: &[
            "cnbc",
            "marketwatch",
            "barrons",
            "economist",
            "finance.yahoo",
            "yahoo finance",
            "seekingalpha",
            "investing.com",
            "coindesk",
            "theblock",
        ],
    },
    SourceTier {
        weight: 12,
        label: "General press",
        patterns: &[
            "cnn",
            "bbc",
            "nytimes",
            "washingtonpost",
            "theguardian",
            "forbes",
            "businessinsider",
            "axios",
        ],
    },
];

/// `source_quality` bands for sources outside the tier table: `(min, points)`.
pub const SOURCE_QUALITY_BANDS: &[(u8, u8)] = &[(95, 28), (85, 20), (70, 12)];
/// Points for an unmatched source with no (or low) quality hint.
pub const SOURCE_QUALITY_FLOOR: u8 = 5;

pub const STRONG_SURPRISE_TERMS: &[&str] = &[
    "unexpected*",
    "surprise*",
    "shock*",
    "stun*",
    "unprecedented",
    "emergency",
    "record high",
    "record low",
    "plunge*",
    "soar*",
    "crash*",
    "collapse*",
];

pub const MILD_SURPRISE_TERMS: &[&str] = &[
    "beats expectations",
    "misses expectations",
    "better than expected",
    "worse than expected",
    "higher than expected",
    "lower than expected",
    "above forecast",
    "below forecast",
    "beat estimates",
    "missed estimates",
];

pub const STRONG_SURPRISE_POINTS: u8 = 25;
pub const MILD_SURPRISE_POINTS: u8 = 15;
pub const DIRECTIONAL_SENTIMENT_POINTS: u8 = 10;
pub const SURPRISE_FLOOR: u8 = 5;

/// Macro pattern with the asset classes it tends to move.
#[derive(Debug, Clone, Copy)]
pub struct CrossAssetPattern {
    pub name: &'static str,
    pub terms: &'static [&'static str],
    pub weight: u8,
    pub assets: &'static [&'static str],
    pub note: &'static str,
}

pub const CROSS_ASSET_PATTERNS: &[CrossAssetPattern] = &[
    CrossAssetPattern {
        name: "fed",
        terms: &["fed", "federal reserve", "fomc", "powell"],
        weight: 25,
        assets: &["Equities", "Bonds", "USD", "Gold", "Crypto"],
        note: "Fed surprises have moved the S&P 500 1-2% on the day and reprice the whole curve.",
    },
    CrossAssetPattern {
        name: "war",
        terms: &["war", "invasion", "military strike*", "missile*"],
        weight: 25,
        assets: &["Oil", "Gold", "Defense", "Equities"],
        note: "Conflict escalations typically lift oil and gold while equities sell off.",
    },
    CrossAssetPattern {
        name: "oil",
        terms: &["oil", "crude", "opec", "brent", "wti"],
        weight: 25,
        assets: &["Energy", "Inflation expectations", "Airlines", "CAD"],
        note: "A 10% oil move feeds through to headline inflation within a quarter.",
    },
    CrossAssetPattern {
        name: "rate",
        terms: &["rate", "rates", "yield*", "rate hike*", "rate cut*"],
        weight: 18,
        assets: &["Bonds", "Banks", "Real estate", "Growth stocks"],
        note: "Rate repricing hits long-duration growth names hardest.",
    },
    CrossAssetPattern {
        name: "inflation",
        terms: &["inflation", "cpi", "pce", "ppi"],
        weight: 18,
        assets: &["Bonds", "USD", "Gold", "Equities"],
        note: "Hot CPI prints have driven 2-4% single-day Nasdaq drawdowns.",
    },
    CrossAssetPattern {
        name: "china",
        terms: &["china", "chinese", "beijing", "yuan"],
        weight: 18,
        assets: &["Commodities", "Emerging markets", "Semiconductors"],
        note: "China demand headlines move copper, iron ore and chip supply chains.",
    },
    CrossAssetPattern {
        name: "crypto",
        terms: &["crypto*", "bitcoin", "ethereum", "stablecoin*"],
        weight: 18,
        assets: &["Crypto", "Crypto equities"],
        note: "Bitcoin headlines spill into miners and exchange stocks the same session.",
    },
    CrossAssetPattern {
        name: "earnings",
        terms: &["earnings", "guidance", "quarterly results"],
        weight: 12,
        assets: &["Single stocks", "Sector peers"],
        note: "Large-cap earnings surprises often move sector peers 1-3%.",
    },
    CrossAssetPattern {
        name: "tariff",
        terms: &["tariff*", "trade war", "import dut*"],
        weight: 12,
        assets: &["Industrials", "Retail", "FX"],
        note: "Tariff announcements hit import-heavy retailers and trade-exposed currencies.",
    },
];

pub const CROSS_ASSET_FLOOR: u8 = 5;

/// Sector keyword expanded to representative tickers.
#[derive(Debug, Clone, Copy)]
pub struct SectorTickers {
    pub sector: &'static str,
    pub terms: &'static [&'static str],
    pub tickers: &'static [&'static str],
}

pub const SECTOR_TICKERS: &[SectorTickers] = &[
    SectorTickers {
        sector: "tech",
        terms: &["tech", "technology", "semiconductor*", "chipmaker*", "big tech"],
        tickers: &["AAPL", "MSFT", "NVDA", "GOOGL", "META", "AMZN", "QQQ", "XLK", "SMH"],
    },
    SectorTickers {
        sector: "finance",
        terms: &["banks", "banking", "lender*", "financials"],
        tickers: &["JPM", "BAC", "GS", "MS", "WFC", "C", "XLF"],
    },
    SectorTickers {
        sector: "energy",
        terms: &["energy", "oil", "crude", "natural gas"],
        tickers: &["XOM", "CVX", "COP", "OXY", "XLE", "USO"],
    },
    SectorTickers {
        sector: "crypto",
        terms: &["crypto*", "bitcoin", "ethereum", "solana"],
        tickers: &["BTC", "ETH", "SOL", "COIN", "MSTR", "IBIT"],
    },
];

pub const PORTFOLIO_MANY_POINTS: u8 = 20;
pub const PORTFOLIO_SOME_POINTS: u8 = 12;
pub const PORTFOLIO_NONE_POINTS: u8 = 3;
pub const PORTFOLIO_UNKNOWN_POINTS: u8 = 5;
/// Overlapping tickers needed for the top band.
pub const PORTFOLIO_MANY_THRESHOLD: usize = 3;

/// Ticker to company-name variants.
#[derive(Debug, Clone, Copy)]
pub struct CompanyAlias {
    pub ticker: &'static str,
    pub names: &'static [&'static str],
}

pub const COMPANY_ALIASES: &[CompanyAlias] = &[
    CompanyAlias { ticker: "AAPL", names: &["apple", "iphone"] },
    CompanyAlias { ticker: "MSFT", names: &["microsoft", "azure"] },
    CompanyAlias { ticker: "NVDA", names: &["nvidia"] },
    CompanyAlias { ticker: "GOOGL", names: &["alphabet", "google"] },
    CompanyAlias { ticker: "GOOG", names: &["alphabet", "google"] },
    CompanyAlias { ticker: "AMZN", names: &["amazon", "aws"] },
    CompanyAlias { ticker: "META", names: &["meta platforms", "facebook", "instagram"] },
    CompanyAlias { ticker: "TSLA", names: &["tesla"] },
    CompanyAlias { ticker: "BRK", names: &["berkshire hathaway", "berkshire"] },
    CompanyAlias { ticker: "JPM", names: &["jpmorgan", "jp morgan"] },
    CompanyAlias { ticker: "XOM", names: &["exxon", "exxonmobil"] },
    CompanyAlias { ticker: "COIN", names: &["coinbase"] },
    CompanyAlias { ticker: "MSTR", names: &["microstrategy", "strategy inc"] },
    CompanyAlias { ticker: "BTC", names: &["bitcoin"] },
    CompanyAlias { ticker: "ETH", names: &["ethereum", "ether"] },
    CompanyAlias { ticker: "SOL", names: &["solana"] },
    CompanyAlias { ticker: "SPY", names: &["s&p 500"] },
    CompanyAlias { ticker: "QQQ", names: &["nasdaq 100", "nasdaq-100"] },
];

/// Fed and named central-bank terms used as a sort boost.
pub const CENTRAL_BANK_TERMS: &[&str] = &[
    "fed",
    "federal reserve",
    "fomc",
    "powell",
    "central bank*",
    "ecb",
    "bank of england",
    "boe",
    "boj",
    "bank of japan",
];

/// Terms that mark a story as US-focused.
pub const US_TERMS: &[&str] = &[
    "u.s",
    "united states",
    "american",
    "fed",
    "federal reserve",
    "wall street",
    "s&p 500",
    "nasdaq",
    "dow jones",
    "treasury",
    "white house",
    "washington",
];

pub const BULLISH_TERMS: &[&str] = &[
    "surge*",
    "soar*",
    "rally",
    "rallies",
    "rallied",
    "gain*",
    "jump*",
    "record high",
    "beat*",
    "upgrade*",
    "approv*",
    "rate cut*",
    "bullish",
    "inflow*",
];

pub const BEARISH_TERMS: &[&str] = &[
    "plunge*",
    "crash*",
    "tumble*",
    "slump*",
    "fall*",
    "drop*",
    "miss*",
    "downgrade*",
    "lawsuit*",
    "hack*",
    "rate hike*",
    "bearish",
    "outflow*",
    "recession",
    "layoff*",
];

/// Calendar titles or currencies that make an event crypto-typed.
pub const CRYPTO_TERMS: &[&str] = &[
    "bitcoin",
    "btc",
    "ethereum",
    "eth",
    "crypto*",
    "token unlock*",
    "halving",
    "mainnet",
    "airdrop*",
];
