//! Posting analyzers
//!
//! [`RuleBasedAnalyzer`] answers from keyword rules alone. [`LlmAnalyzer`]
//! consults a language model for the postings the rules cannot settle.

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::{parse_classification, parse_sponsorship};
use crate::prompt::{PromptBuilder, CLASSIFICATION_SCHEMA, SPONSORSHIP_SCHEMA};
use crate::rules::{entry_level_signals, quick_classify, SponsorshipPatterns};
use jobscout_domain::traits::{LlmProvider, PostingAnalyzer};
use jobscout_domain::{Category, Classification, ClassificationRequest, TextualSignal};
use std::sync::Arc;
use tracing::{debug, warn};

/// Analyzer that never leaves the process
#[derive(Debug, Clone)]
pub struct RuleBasedAnalyzer {
    config: AnalyzerConfig,
    patterns: SponsorshipPatterns,
}

impl RuleBasedAnalyzer {
    /// Create an analyzer, compiling the configured patterns
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;
        let patterns = SponsorshipPatterns::new(&config.positive_sponsorship_patterns)?;
        Ok(Self { config, patterns })
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn rules_classification(&self, request: &ClassificationRequest) -> Classification {
        let entry_level = entry_level_signals(&request.title, &request.description);
        Classification {
            category: quick_classify(&request.title),
            reasoning: entry_level.describe(),
            entry_level,
        }
    }

    fn explicit_sponsorship(&self, request: &ClassificationRequest) -> bool {
        self.patterns.matches(&request.description)
    }
}

impl PostingAnalyzer for RuleBasedAnalyzer {
    type Error = AnalyzerError;

    fn classify(&self, request: &ClassificationRequest) -> Result<Classification, Self::Error> {
        Ok(self.rules_classification(request))
    }

    fn sponsorship_signal(&self, request: &ClassificationRequest) -> Result<TextualSignal, Self::Error> {
        if self.explicit_sponsorship(request) {
            Ok(TextualSignal::Strong)
        } else {
            Ok(TextualSignal::None)
        }
    }
}

/// Analyzer backed by an LLM for the cases rules leave open
///
/// Classification goes to the model when the title matches no tracked
/// category or the description is empty. Sponsorship goes to the model when
/// no positive pattern matched and `llm_sponsorship` is enabled.
pub struct LlmAnalyzer<L: LlmProvider> {
    rules: RuleBasedAnalyzer,
    llm: Arc<L>,
}

impl<L> LlmAnalyzer<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create an analyzer over `llm`
    pub fn new(llm: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Ok(Self {
            rules: RuleBasedAnalyzer::new(config)?,
            llm: Arc::new(llm),
        })
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm
    }

    fn call(&self, prompt: &str, schema: &str) -> Result<String, AnalyzerError> {
        debug!("Prompt length: {} chars", prompt.len());
        let response = self
            .llm
            .generate_structured(prompt, schema)
            .map_err(|e| AnalyzerError::Llm(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());
        Ok(response)
    }
}

impl<L> PostingAnalyzer for LlmAnalyzer<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Error = AnalyzerError;

    fn classify(&self, request: &ClassificationRequest) -> Result<Classification, Self::Error> {
        let mut classification = self.rules.rules_classification(request);
        let needs_llm = classification.category == Category::Other || request.description.trim().is_empty();
        if !needs_llm {
            return Ok(classification);
        }

        let prompt = PromptBuilder::new(request, self.rules.config.max_description_chars).classification();
        let answer = match self.call(&prompt, CLASSIFICATION_SCHEMA).and_then(|r| parse_classification(&r)) {
            Ok(answer) => answer,
            Err(e) if classification.category != Category::Other => {
                warn!("LLM classification failed for '{}', keeping rule result: {}", request.title, e);
                return Ok(classification);
            }
            Err(e) => return Err(e),
        };

        if classification.category == Category::Other {
            classification.category = answer.category;
        }
        classification.entry_level.assessed = answer.is_entry_level;
        if !answer.reasoning.is_empty() {
            classification.reasoning = format!("{}; {}", classification.reasoning, answer.reasoning);
        }
        Ok(classification)
    }

    fn sponsorship_signal(&self, request: &ClassificationRequest) -> Result<TextualSignal, Self::Error> {
        if self.rules.explicit_sponsorship(request) {
            return Ok(TextualSignal::Strong);
        }
        if !self.rules.config.llm_sponsorship {
            return Ok(TextualSignal::None);
        }

        let prompt = PromptBuilder::new(request, self.rules.config.max_description_chars).sponsorship();
        let answer = parse_sponsorship(&self.call(&prompt, SPONSORSHIP_SCHEMA)?)?;
        debug!("Sponsorship signal for '{}': {:?} ({})", request.company, answer.signal, answer.reasoning);
        Ok(answer.signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_llm::MockProvider;

    fn request(title: &str, description: &str) -> ClassificationRequest {
        ClassificationRequest {
            title: title.to_string(),
            company: "Acme".to_string(),
            description: description.to_string(),
        }
    }

    fn llm_analyzer(provider: MockProvider) -> LlmAnalyzer<MockProvider> {
        LlmAnalyzer::new(provider, AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_rule_based_classification() {
        let analyzer = RuleBasedAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let result = analyzer
            .classify(&request("Junior Data Analyst", "0-2 years of experience with SQL"))
            .unwrap();
        assert_eq!(result.category, Category::DataAnalyst);
        assert!(result.entry_level.is_entry_level(2));
        assert_eq!(result.reasoning, "Title indicates entry-level; Requires 2 years experience");
    }

    #[test]
    fn test_rule_based_sponsorship() {
        let analyzer = RuleBasedAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let explicit = request("Data Analyst", "Visa sponsorship available for this role.");
        assert_eq!(analyzer.sponsorship_signal(&explicit).unwrap(), TextualSignal::Strong);
        let silent = request("Data Analyst", "Great team.");
        assert_eq!(analyzer.sponsorship_signal(&silent).unwrap(), TextualSignal::None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyzerConfig::default();
        config.max_description_chars = 0;
        assert!(matches!(RuleBasedAnalyzer::new(config), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_llm_skipped_when_rules_decide() {
        let provider = MockProvider::new("unused");
        let analyzer = llm_analyzer(provider);
        let result = analyzer
            .classify(&request("Data Engineer I", "Build pipelines"))
            .unwrap();
        assert_eq!(result.category, Category::DataEngineer);
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[test]
    fn test_llm_classifies_unmatched_title() {
        let mut provider = MockProvider::new("");
        provider.add_response(
            "Job Title: Research Associate",
            r#"{"category": "Quantitative Finance", "is_entry_level": true, "reasoning": "Quant research role"}"#,
        );
        let analyzer = llm_analyzer(provider);
        let result = analyzer
            .classify(&request("Research Associate", "Model interest-rate risk"))
            .unwrap();
        assert_eq!(result.category, Category::QuantitativeFinance);
        assert_eq!(result.entry_level.assessed, Some(true));
        assert!(result.reasoning.ends_with("; Quant research role"));
        assert_eq!(analyzer.provider().call_count(), 1);
    }

    #[test]
    fn test_llm_failure_without_rule_answer_is_error() {
        let mut provider = MockProvider::new("");
        provider.add_error("Job Title:");
        let analyzer = llm_analyzer(provider);
        let result = analyzer.classify(&request("Research Associate", "Something"));
        assert!(matches!(result, Err(AnalyzerError::Llm(_))));
    }

    #[test]
    fn test_llm_failure_keeps_rule_answer() {
        let mut provider = MockProvider::new("");
        provider.add_error("Job Title:");
        let analyzer = llm_analyzer(provider);
        let result = analyzer.classify(&request("Data Scientist", "")).unwrap();
        assert_eq!(result.category, Category::DataScientist);
        assert_eq!(result.entry_level.assessed, None);
    }

    #[test]
    fn test_llm_entry_level_verdict_applies() {
        let provider = MockProvider::new(r#"{"category": "Data Scientist", "is_entry_level": false}"#);
        let analyzer = llm_analyzer(provider);
        let result = analyzer.classify(&request("Data Scientist", "")).unwrap();
        assert!(!result.entry_level.is_entry_level(2));
    }

    #[test]
    fn test_sponsorship_pattern_skips_llm() {
        let provider = MockProvider::new(r#"{"signal": "LOW"}"#);
        let analyzer = llm_analyzer(provider);
        let signal = analyzer
            .sponsorship_signal(&request("Data Analyst", "We will sponsor H-1B visas."))
            .unwrap();
        assert_eq!(signal, TextualSignal::Strong);
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[test]
    fn test_sponsorship_from_llm() {
        let provider = MockProvider::new(r#"{"signal": "MEDIUM", "reasoning": "Large firm"}"#);
        let analyzer = llm_analyzer(provider);
        let signal = analyzer.sponsorship_signal(&request("Data Analyst", "Great team.")).unwrap();
        assert_eq!(signal, TextualSignal::Partial);
    }

    #[test]
    fn test_sponsorship_llm_disabled() {
        let provider = MockProvider::new(r#"{"signal": "HIGH"}"#);
        let analyzer = LlmAnalyzer::new(provider, AnalyzerConfig::aggressive()).unwrap();
        let signal = analyzer.sponsorship_signal(&request("Data Analyst", "Great team.")).unwrap();
        assert_eq!(signal, TextualSignal::None);
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[test]
    fn test_unparseable_sponsorship_is_error() {
        let provider = MockProvider::new("I cannot say");
        let analyzer = llm_analyzer(provider);
        assert!(analyzer.sponsorship_signal(&request("Data Analyst", "Great team.")).is_err());
    }
}
