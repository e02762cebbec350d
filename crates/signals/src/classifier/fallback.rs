//! Two-stage classification: a timeout-bounded primary, then the rules.

use super::cache::ClassificationCache;
use super::llm::LlmClassifier;
use super::rules::RuleClassifier;
use async_trait::async_trait;
use edge_feed_core::{Classification, Classifier, ClassifierConfig, FeedError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a primary classifier call.
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(4);

/// Classifier chain that never fails.
///
/// The primary (usually [`LlmClassifier`]) is attempted first under a timeout.
/// Any error, timeout or unparseable reply falls through to [`RuleClassifier`].
pub struct FallbackClassifier {
    primary: Option<Arc<dyn Classifier>>,
    rules: RuleClassifier,
    timeout: Duration,
    cache: Option<Arc<ClassificationCache>>,
}

impl FallbackClassifier {
    /// A chain with only the rules stage.
    #[must_use]
    pub fn new(rules: RuleClassifier) -> Self {
        Self {
            primary: None,
            rules,
            timeout: DEFAULT_PRIMARY_TIMEOUT,
            cache: None,
        }
    }

    /// Builds the chain from configuration: rules always, LLM when configured.
    ///
    /// # Errors
    /// Returns `FeedError::Configuration` if a classifier cannot be constructed.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let mut chain = Self::new(RuleClassifier::new()?);
        if let Some(llm) = config.llm.as_ref().filter(|l| !l.api_key.is_empty()) {
            let primary = LlmClassifier::new(llm)?;
            tracing::info!("LLM classifier enabled (model: {})", llm.model);
            chain = chain
                .with_primary(Arc::new(primary), Duration::from_millis(llm.timeout_ms))
                .with_cache(Arc::new(ClassificationCache::new(
                    Duration::from_secs(config.cache_ttl_secs),
                    config.cache_capacity,
                )));
        }
        Ok(chain)
    }

    #[must_use]
    pub fn with_primary(mut self, primary: Arc<dyn Classifier>, timeout: Duration) -> Self {
        self.primary = Some(primary);
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ClassificationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleClassifier {
        &self.rules
    }

    async fn try_primary(&self, primary: &dyn Classifier, text: &str) -> Result<Classification> {
        tokio::time::timeout(self.timeout, primary.classify(text))
            .await
            .map_err(|_| FeedError::timeout(primary.name(), self.timeout.as_millis() as u64))?
            .map(Classification::normalized)
    }

    /// Classifies `text`, falling back to the rules on any primary failure.
    pub async fn classify_text(&self, text: &str) -> Classification {
        if let Some(primary) = &self.primary {
            if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(text)) {
                return hit;
            }
            match self.try_primary(primary.as_ref(), text).await {
                Ok(classification) => {
                    if let Some(cache) = &self.cache {
                        cache.insert(text, classification.clone());
                    }
                    return classification;
                }
                Err(e) => {
                    tracing::warn!("{} classifier failed, using rules: {}", primary.name(), e);
                }
            }
        }
        self.rules.evaluate(text)
    }
}

#[async_trait]
impl Classifier for FallbackClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        Ok(self.classify_text(text).await)
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_feed_core::{LlmConfig, MarketTopic};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClassifier {
        reply: Result<Classification>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn ok(c: Classification) -> Self {
            Self {
                reply: Ok(c),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(FeedError::ClassificationFailure("bad json".to_string())),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(c: Classification, delay: Duration) -> Self {
            Self {
                reply: Ok(c),
                delay,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn llm_verdict() -> Classification {
        Classification {
            is_relevant: true,
            topics: vec![MarketTopic::Geopolitics],
            score: 88,
            reasons: vec!["llm".to_string()],
            trading_signal: Some("long oil".to_string()),
        }
    }

    fn rules() -> RuleClassifier {
        RuleClassifier::new().unwrap()
    }

    const TEXT: &str = "Fed signals unexpected rate hike";

    #[tokio::test]
    async fn rules_only_chain() {
        let chain = FallbackClassifier::new(rules());
        assert!(!chain.has_primary());
        assert_eq!(chain.classify_text(TEXT).await, rules().evaluate(TEXT));
    }

    #[tokio::test]
    async fn primary_result_is_used() {
        let chain = FallbackClassifier::new(rules())
            .with_primary(Arc::new(FixedClassifier::ok(llm_verdict())), Duration::from_secs(1));
        assert_eq!(chain.classify_text(TEXT).await, llm_verdict());
    }

    #[tokio::test]
    async fn primary_error_falls_back_to_rules() {
        let chain = FallbackClassifier::new(rules())
            .with_primary(Arc::new(FixedClassifier::failing()), Duration::from_secs(1));
        let c = chain.classify(TEXT).await.unwrap();
        assert_eq!(c, rules().evaluate(TEXT));
    }

    #[tokio::test(start_paused = true)]
    async fn primary_timeout_falls_back_to_rules() {
        let slow = FixedClassifier::slow(llm_verdict(), Duration::from_secs(30));
        let chain = FallbackClassifier::new(rules())
            .with_primary(Arc::new(slow), Duration::from_millis(100));
        let c = chain.classify_text(TEXT).await;
        assert_eq!(c.primary_topic(), Some(MarketTopic::Rates));
    }

    #[tokio::test]
    async fn primary_output_is_normalized() {
        let inconsistent = Classification {
            is_relevant: false,
            topics: vec![MarketTopic::Tech],
            score: 50,
            reasons: vec![],
            trading_signal: None,
        };
        let chain = FallbackClassifier::new(rules())
            .with_primary(Arc::new(FixedClassifier::ok(inconsistent)), Duration::from_secs(1));
        let c = chain.classify_text("anything").await;
        assert_eq!(c.score, 0);
        assert!(c.topics.is_empty());
    }

    #[tokio::test]
    async fn cache_skips_repeat_primary_calls() {
        let primary = Arc::new(FixedClassifier::ok(llm_verdict()));
        let cache = Arc::new(ClassificationCache::new(Duration::from_secs(60), 16));
        let chain = FallbackClassifier::new(rules())
            .with_primary(primary.clone(), Duration::from_secs(1))
            .with_cache(cache.clone());

        chain.classify_text(TEXT).await;
        chain.classify_text(TEXT).await;

        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn from_config_without_key_is_rules_only() {
        let config = ClassifierConfig {
            llm: Some(LlmConfig::default()),
            ..ClassifierConfig::default()
        };
        assert!(!FallbackClassifier::from_config(&config).unwrap().has_primary());

        let config = ClassifierConfig {
            llm: Some(LlmConfig {
                api_key: "k".to_string(),
                ..LlmConfig::default()
            }),
            ..ClassifierConfig::default()
        };
        assert!(FallbackClassifier::from_config(&config).unwrap().has_primary());
    }
}
