use serde::{Deserialize, Serialize};

use super::bands::Tier;
use crate::error::ConfigError;

/// Main scoring configuration.
///
/// Every field is optional; missing fields fall back to the built-in defaults
/// when the engine is built. Weights are kept here only as the configured
/// starting point: the engine never reads them, they are resolved once and
/// passed into each scoring call.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     job_title_weight: 0.4
///     tech_fit_weight: 0.3
///     intent_weight: 0.3
///   target_stack: ["Salesforce", "HubSpot", "Marketo", "Outreach"]
///   other_score: 20
///   titles:
///     - { tier: decision_maker, keywords: ["ceo", "vp", "head of"], score: 95 }
///     - { tier: influencer, keywords: ["manager"], score: 80 }
///   intent: { high: 10, medium: 5, low: 1 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Relative importance of the three sub-scores
    #[serde(default)]
    pub weights: Option<ScoringWeights>,

    /// Ideal technology set that lead stacks are compared against
    #[serde(default)]
    pub target_stack: Option<Vec<String>>,

    /// Ordered keyword rules for job title relevance
    #[serde(default)]
    pub titles: Option<Vec<TitleRule>>,

    /// Score for titles that match no rule (0-39)
    #[serde(default)]
    pub other_score: Option<u8>,

    /// Engagement count thresholds for buying intent
    #[serde(default)]
    pub intent: Option<IntentThresholds>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(ScoringWeights::default()),
            target_stack: Some(default_target_stack()),
            titles: Some(default_title_rules()),
            other_score: Some(DEFAULT_OTHER_SCORE),
            intent: Some(IntentThresholds::default()),
        }
    }
}

pub const DEFAULT_OTHER_SCORE: u8 = 20;

/// Weights for job title, tech fit and intent. Each lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    pub job_title_weight: f64,
    pub tech_fit_weight: f64,
    pub intent_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            job_title_weight: 0.4,
            tech_fit_weight: 0.3,
            intent_weight: 0.3,
        }
    }
}

impl ScoringWeights {
    pub fn new(job_title_weight: f64, tech_fit_weight: f64, intent_weight: f64) -> Self {
        Self {
            job_title_weight,
            tech_fit_weight,
            intent_weight,
        }
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("job_title_weight", self.job_title_weight),
            ("tech_fit_weight", self.tech_fit_weight),
            ("intent_weight", self.intent_weight),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.job_title_weight + self.tech_fit_weight + self.intent_weight
    }

    /// Check each weight, returning every problem found.
    pub fn check(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (name, value) in self.named() {
            if !value.is_finite() {
                errors.push(ConfigError::NonFiniteWeight { name });
            } else if value < 0.0 {
                errors.push(ConfigError::NegativeWeight { name, value });
            } else if value > 1.0 {
                errors.push(ConfigError::WeightOutOfRange { name, value });
            }
        }
        if errors.is_empty() && self.sum() <= 0.0 {
            errors.push(ConfigError::ZeroWeightSum);
        }
        errors
    }

    /// Scale the weights so they sum to 1.0.
    pub fn normalized(&self) -> Result<Self, ConfigError> {
        if let Some(err) = self.check().into_iter().next() {
            return Err(err);
        }
        let total = self.sum();
        Ok(Self {
            job_title_weight: self.job_title_weight / total,
            tech_fit_weight: self.tech_fit_weight / total,
            intent_weight: self.intent_weight / total,
        })
    }

    /// Replace individual weights, keeping the rest
    pub fn with_overrides(
        mut self,
        job_title: Option<f64>,
        tech_fit: Option<f64>,
        intent: Option<f64>,
    ) -> Self {
        if let Some(w) = job_title {
            self.job_title_weight = w;
        }
        if let Some(w) = tech_fit {
            self.tech_fit_weight = w;
        }
        if let Some(w) = intent {
            self.intent_weight = w;
        }
        self
    }
}

/// One job title rule: any keyword hit places the title in `tier` with `score`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TitleRule {
    pub tier: Tier,
    pub keywords: Vec<String>,
    pub score: u8,
}

impl TitleRule {
    fn new(tier: Tier, keywords: &[&str], score: u8) -> Self {
        Self {
            tier,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            score,
        }
    }
}

/// Engagement counts at which intent moves into the low, medium and high bands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IntentThresholds {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for IntentThresholds {
    fn default() -> Self {
        Self {
            high: 10,
            medium: 5,
            low: 1,
        }
    }
}

pub fn default_title_rules() -> Vec<TitleRule> {
    vec![
        TitleRule::new(
            Tier::DecisionMaker,
            &[
                "ceo",
                "cto",
                "cfo",
                "coo",
                "cmo",
                "cio",
                "chief",
                "founder",
                "cofounder",
                "president",
                "owner",
                "vp",
                "svp",
                "evp",
                "avp",
                "vice president",
                "director",
                "head of",
                "partner",
            ],
            95,
        ),
        TitleRule::new(
            Tier::Influencer,
            &["manager", "mgr", "lead", "principal", "architect", "supervisor"],
            80,
        ),
        TitleRule::new(
            Tier::User,
            &[
                "analyst",
                "engineer",
                "specialist",
                "developer",
                "associate",
                "coordinator",
                "consultant",
                "administrator",
                "designer",
                "scientist",
            ],
            55,
        ),
    ]
}

pub fn default_target_stack() -> Vec<String> {
    [
        "react",
        "node.js",
        "python",
        "kubernetes",
        "docker",
        "aws",
        "azure",
        "microservices",
        "api",
        "cloud",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.weights, Some(ScoringWeights::new(0.4, 0.3, 0.3)));
        assert_eq!(config.target_stack.as_ref().map(Vec::len), Some(10));
        assert_eq!(config.titles.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.other_score, Some(20));
        assert_eq!(config.intent, Some(IntentThresholds::default()));
    }

    #[test]
    fn test_default_rules_score_within_band() {
        for rule in default_title_rules() {
            let (lo, hi) = rule.tier.band();
            assert!(rule.score >= lo && rule.score <= hi);
        }
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
weights:
  job_title_weight: 0.5
  tech_fit_weight: 0.5
  intent_weight: 0.0
target_stack: ["Salesforce", "HubSpot"]
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.weights, Some(ScoringWeights::new(0.5, 0.5, 0.0)));
        assert_eq!(config.target_stack.unwrap().len(), 2);
        assert!(config.titles.is_none());
        assert!(config.intent.is_none());
    }

    #[test]
    fn test_title_rules_parse() {
        let yaml = r#"
titles:
  - tier: decision_maker
    keywords: ["ceo", "head of"]
    score: 92
  - tier: user
    keywords: ["analyst"]
    score: 45
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let titles = config.titles.unwrap();
        assert_eq!(titles[0].tier, Tier::DecisionMaker);
        assert_eq!(titles[0].keywords, vec!["ceo", "head of"]);
        assert_eq!(titles[1].tier, Tier::User);
        assert_eq!(titles[1].score, 45);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.weights.is_none());
        assert!(config.target_stack.is_none());
        assert!(config.titles.is_none());
        assert!(config.other_score.is_none());
        assert!(config.intent.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("base_score: 100");
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_weights() {
        let weights = ScoringWeights::new(0.5, 0.5, 0.5).normalized().unwrap();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!((weights.job_title_weight - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_already_unit_sum() {
        let weights = ScoringWeights::default().normalized().unwrap();
        assert!((weights.job_title_weight - 0.4).abs() < 1e-9);
        assert!((weights.tech_fit_weight - 0.3).abs() < 1e-9);
        assert!((weights.intent_weight - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sum_is_config_error() {
        let result = ScoringWeights::new(0.0, 0.0, 0.0).normalized();
        assert_eq!(result, Err(ConfigError::ZeroWeightSum));
    }

    #[test]
    fn test_negative_weight_is_config_error() {
        let result = ScoringWeights::new(0.5, -0.1, 0.5).normalized();
        assert!(matches!(
            result,
            Err(ConfigError::NegativeWeight { name: "tech_fit_weight", .. })
        ));
    }

    #[test]
    fn test_weight_above_one_is_config_error() {
        let result = ScoringWeights::new(1.5, 0.0, 0.0).normalized();
        assert!(matches!(
            result,
            Err(ConfigError::WeightOutOfRange { name: "job_title_weight", .. })
        ));
    }

    #[test]
    fn test_nan_weight_is_config_error() {
        let errors = ScoringWeights::new(f64::NAN, 0.5, 0.5).check();
        assert_eq!(
            errors,
            vec![ConfigError::NonFiniteWeight { name: "job_title_weight" }]
        );
    }

    #[test]
    fn test_check_reports_every_bad_weight() {
        let errors = ScoringWeights::new(-1.0, 2.0, 0.5).check();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_with_overrides() {
        let weights = ScoringWeights::default().with_overrides(Some(1.0), None, Some(0.0));
        assert_eq!(weights, ScoringWeights::new(1.0, 0.3, 0.0));
    }
}
