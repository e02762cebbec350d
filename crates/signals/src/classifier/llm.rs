//! LLM classifier over an OpenAI-compatible chat-completions endpoint.
//!
//! Every failure (transport, status, rate limit, unparseable reply) is
//! returned as an error so the caller can fall back to the rules.

use async_trait::async_trait;
use edge_feed_core::{Classification, Classifier, FeedError, LlmConfig, MarketTopic, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const SOURCE_NAME: &str = "llm";

const SYSTEM_PROMPT: &str = "You classify financial news for traders. Reply with JSON only: \
{\"isRelevant\": bool, \"topics\": [string], \"score\": 0-100, \"reasons\": [string], \
\"tradingSignal\": string|null}. Allowed topics: rates, inflation, regulation, earnings, \
mergers, tech, security, etf_flows, legal, geopolitics. Celebrity, sports and lifestyle \
stories without market impact are not relevant and must get score 0 and no topics.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Verdict as the model writes it; looser than [`Classification`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmVerdict {
    is_relevant: bool,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    trading_signal: Option<String>,
}

impl LlmVerdict {
    fn into_classification(self) -> Classification {
        let topics = self
            .topics
            .iter()
            .filter_map(|t| t.parse::<MarketTopic>().ok())
            .collect();
        let trading_signal = self
            .trading_signal
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("null"));

        Classification {
            is_relevant: self.is_relevant,
            topics,
            score: self.score.clamp(0.0, 100.0).round() as u8,
            reasons: self.reasons,
            trading_signal,
        }
        .normalized()
    }
}

/// Chat-completions classifier with a per-minute request cap.
pub struct LlmClassifier {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_ms: u64,
    rate_limiter: Arc<DirectLimiter>,
}

impl LlmClassifier {
    /// # Errors
    /// Returns `FeedError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| FeedError::Configuration(format!("failed to build LLM client: {e}")))?;
        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(nonzero!(60u32));

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_ms: config.timeout_ms,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn complete(&self, text: &str) -> Result<String> {
        if self.rate_limiter.check().is_err() {
            return Err(FeedError::ClassificationFailure(
                "LLM rate limit saturated".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 0.0,
        };
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::ClassificationFailure(format!(
                "LLM API error {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| FeedError::ClassificationFailure(format!("unreadable LLM response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| FeedError::ClassificationFailure("empty LLM reply".to_string()))
    }

    fn transport_error(&self, err: &reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::timeout(SOURCE_NAME, self.timeout_ms)
        } else {
            FeedError::ClassificationFailure(format!("LLM request failed: {err}"))
        }
    }
}

/// Parses a model reply, tolerating Markdown code fences around the JSON.
///
/// # Errors
/// Returns `FeedError::ClassificationFailure` if the reply is not a verdict.
pub fn parse_reply(content: &str) -> Result<Classification> {
    let json = strip_code_fence(content);
    let verdict: LlmVerdict = serde_json::from_str(json)
        .map_err(|e| FeedError::ClassificationFailure(format!("unparseable LLM verdict: {e}")))?;
    Ok(verdict.into_classification())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let content = self.complete(text).await?;
        parse_reply(&content)
    }

    fn name(&self) -> &str {
        "llm"
    }
}
