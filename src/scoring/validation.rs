use super::bands::Tier;
use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Weights: range, finiteness and non-zero sum
    if let Some(ref weights) = config.weights {
        for error in weights.check() {
            errors.push(format!("scoring.weights: {}", error));
        }
    }

    // Title rules
    if let Some(ref titles) = config.titles {
        for (i, rule) in titles.iter().enumerate() {
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                errors.push(format!("scoring.titles[{}].keywords: must not be empty", i));
            }
            let (lo, hi) = rule.tier.band();
            if rule.score < lo || rule.score > hi {
                errors.push(format!(
                    "scoring.titles[{}].score: {} is outside the {} band ({}-{})",
                    i, rule.score, rule.tier, lo, hi
                ));
            }
        }
    }

    if let Some(other) = config.other_score {
        let (lo, hi) = Tier::Other.band();
        if other > hi {
            errors.push(format!(
                "scoring.other_score: {} is outside the Other band ({}-{})",
                other, lo, hi
            ));
        }
    }

    // Intent thresholds must rise strictly: low < medium < high
    if let Some(ref intent) = config.intent {
        if intent.low >= intent.medium || intent.medium >= intent.high {
            errors.push(format!(
                "scoring.intent: thresholds must satisfy low < medium < high (got {}/{}/{})",
                intent.low, intent.medium, intent.high
            ));
        }
    }

    if let Some(ref stack) = config.target_stack {
        for (i, tech) in stack.iter().enumerate() {
            if tech.trim().is_empty() {
                errors.push(format!("scoring.target_stack[{}]: must not be blank", i));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{IntentThresholds, ScoringWeights, TitleRule};

    fn empty_config() -> ScoringConfig {
        ScoringConfig {
            weights: None,
            target_stack: None,
            titles: None,
            other_score: None,
            intent: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&empty_config()).is_ok());
    }

    #[test]
    fn test_zero_weight_sum() {
        let config = ScoringConfig {
            weights: Some(ScoringWeights::new(0.0, 0.0, 0.0)),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights"));
        assert!(errors[0].contains("sum to zero"));
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            weights: Some(ScoringWeights::new(0.5, -0.2, 0.5)),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("tech_fit_weight must be non-negative"));
    }

    #[test]
    fn test_rule_score_outside_band() {
        let config = ScoringConfig {
            titles: Some(vec![TitleRule {
                tier: Tier::Influencer,
                keywords: vec!["manager".to_string()],
                score: 95,
            }]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.titles[0].score"));
        assert!(errors[0].contains("Influencer"));
    }

    #[test]
    fn test_rule_without_keywords() {
        let config = ScoringConfig {
            titles: Some(vec![TitleRule {
                tier: Tier::User,
                keywords: vec!["  ".to_string()],
                score: 50,
            }]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.titles[0].keywords"));
    }

    #[test]
    fn test_other_score_outside_band() {
        let config = ScoringConfig {
            other_score: Some(50),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.other_score"));
    }

    #[test]
    fn test_intent_thresholds_out_of_order() {
        let config = ScoringConfig {
            intent: Some(IntentThresholds {
                high: 5,
                medium: 5,
                low: 1,
            }),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.intent"));
    }

    #[test]
    fn test_blank_target_stack_entry() {
        let config = ScoringConfig {
            target_stack: Some(vec!["React".to_string(), " ".to_string()]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors, vec!["scoring.target_stack[1]: must not be blank"]);
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            weights: Some(ScoringWeights::new(-1.0, 0.5, 0.5)), // Error 1
            other_score: Some(90),                               // Error 2
            intent: Some(IntentThresholds {
                high: 1,
                medium: 2,
                low: 3,
            }), // Error 3
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
