use serde::Serialize;
use std::collections::BTreeSet;

use super::bands::{interpolate, IntentLevel, IntentSignal, TechFit, Tier};
use super::config::{
    default_target_stack, default_title_rules, IntentThresholds, ScoringConfig, ScoringWeights,
    TitleRule, DEFAULT_OTHER_SCORE,
};
use crate::error::ScoringError;
use crate::leads::Lead;

/// Sub-scores, composite and band labels for one lead. Never mutated;
/// rescoring produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub job_title_score: u8,
    pub tech_fit_score: u8,
    pub intent_score: u8,
    pub composite_score: u8,
    pub tier: Tier,
    pub tech_fit: TechFit,
    pub intent: IntentLevel,
}

impl ScoreResult {
    /// Human-readable summary of the three signals
    pub fn explain(&self) -> String {
        let title = match self.tier {
            Tier::DecisionMaker => "High-value decision maker",
            Tier::Influencer => "Influential manager or lead",
            Tier::User => "Hands-on practitioner",
            Tier::Other => "Lower relevance role",
        };
        let tech = match self.tech_fit {
            TechFit::PerfectMatch => "excellent tech fit",
            TechFit::GoodFit => "good tech alignment",
            TechFit::PotentialFit => "partial tech overlap",
            TechFit::PoorFit => "limited tech relevance",
        };
        let intent = match self.intent {
            IntentLevel::High => "strong buying signals",
            IntentLevel::Medium => "moderate buying intent",
            IntentLevel::Low => "weak buying signals",
            IntentLevel::None => "no buying signals",
        };
        format!(
            "{}, {}, {} (Score: {})",
            title, tech, intent, self.composite_score
        )
    }
}

/// Keyword rule with its keywords pre-split into lowercase words
#[derive(Debug, Clone)]
struct CompiledRule {
    tier: Tier,
    score: u8,
    keywords: Vec<Vec<String>>,
}

/// Deterministic lead scorer.
///
/// Holds the classification policy (title rules, target stack, intent
/// thresholds). Weights are not part of the engine: every call to
/// [`ScoreEngine::score`] takes them explicitly.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    rules: Vec<CompiledRule>,
    other_score: u8,
    target_stack: BTreeSet<String>,
    intent: IntentThresholds,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(
            &default_title_rules(),
            DEFAULT_OTHER_SCORE,
            &default_target_stack(),
            IntentThresholds::default(),
        )
    }
}

impl ScoreEngine {
    pub fn new(
        titles: &[TitleRule],
        other_score: u8,
        target_stack: &[String],
        intent: IntentThresholds,
    ) -> Self {
        let mut rules: Vec<CompiledRule> = titles
            .iter()
            .map(|rule| CompiledRule {
                tier: rule.tier,
                score: clamp_to_band(rule.score, rule.tier.band()),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| words(k))
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        // Highest band first; stable sort keeps configured order within a tier
        rules.sort_by(|a, b| b.tier.cmp(&a.tier));

        Self {
            rules,
            other_score: clamp_to_band(other_score, Tier::Other.band()),
            target_stack: normalize_stack(target_stack.iter()),
            intent,
        }
    }

    /// Build an engine from config, filling unset fields with defaults
    pub fn from_config(config: &ScoringConfig) -> Self {
        let titles = config.titles.clone().unwrap_or_else(default_title_rules);
        let target_stack = config
            .target_stack
            .clone()
            .unwrap_or_else(default_target_stack);
        Self::new(
            &titles,
            config.other_score.unwrap_or(DEFAULT_OTHER_SCORE),
            &target_stack,
            config.intent.unwrap_or_default(),
        )
    }

    /// Replace the ideal technology set
    pub fn with_target_stack(mut self, target_stack: &[String]) -> Self {
        self.target_stack = normalize_stack(target_stack.iter());
        self
    }

    pub fn target_stack(&self) -> &BTreeSet<String> {
        &self.target_stack
    }

    /// Score a lead. Fails on an invalid lead or an invalid weight set.
    pub fn score(&self, lead: &Lead, weights: &ScoringWeights) -> Result<ScoreResult, ScoringError> {
        lead.validate()?;
        let weights = weights.normalized()?;
        Ok(self.score_normalized(lead, &weights))
    }

    /// Score a lead that has already been validated, with weights that are
    /// already normalized.
    pub(crate) fn score_normalized(&self, lead: &Lead, weights: &ScoringWeights) -> ScoreResult {
        let (tier, job_title_score) = self.job_title_score(lead.job_title.as_deref());
        let (tech_fit, tech_fit_score) = self.tech_fit_score(&lead.tech_stack);
        let (intent, intent_score) = self.intent_score(lead.intent_signal);

        ScoreResult {
            job_title_score,
            tech_fit_score,
            intent_score,
            composite_score: composite(job_title_score, tech_fit_score, intent_score, weights),
            tier,
            tech_fit,
            intent,
        }
    }

    /// Classify a job title. Rules are checked top-down, first match wins.
    pub fn job_title_score(&self, job_title: Option<&str>) -> (Tier, u8) {
        let title_words = match job_title {
            Some(title) => words(title),
            None => return (Tier::Other, self.other_score),
        };

        for rule in &self.rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| contains_phrase(&title_words, keyword))
            {
                return (rule.tier, rule.score);
            }
        }
        (Tier::Other, self.other_score)
    }

    /// Overlap of the lead's stack with the target stack, mapped to a band
    pub fn tech_fit_score(&self, tech_stack: &BTreeSet<String>) -> (TechFit, u8) {
        let lead_stack = normalize_stack(tech_stack.iter());
        if lead_stack.is_empty() || self.target_stack.is_empty() {
            return (TechFit::PoorFit, 0);
        }

        let overlap = lead_stack.intersection(&self.target_stack).count();
        let ratio = overlap as f64 / self.target_stack.len() as f64;
        let (fit, lo, hi) = TechFit::classify(ratio);
        let (score_lo, score_hi) = fit.band();
        (fit, interpolate(ratio, lo, hi, score_lo, score_hi))
    }

    /// Map an intent signal through the thresholds. Missing means no intent.
    pub fn intent_score(&self, signal: Option<IntentSignal>) -> (IntentLevel, u8) {
        match signal {
            None => (IntentLevel::None, 0),
            Some(IntentSignal::Level(level)) => (level, level.representative_score()),
            Some(IntentSignal::Count(count)) => {
                let t = &self.intent;
                let c = f64::from(count);
                if count >= t.high {
                    let bonus = count.saturating_sub(t.high).min(20) as u8;
                    (IntentLevel::High, 80 + bonus)
                } else if count >= t.medium {
                    let score = interpolate(c, t.medium.into(), t.high.into(), 50, 79);
                    (IntentLevel::Medium, score.min(79))
                } else if count >= t.low {
                    let score = interpolate(c, t.low.into(), t.medium.into(), 20, 49);
                    (IntentLevel::Low, score.min(49))
                } else {
                    let score = interpolate(c, 0.0, t.low.into(), 0, 19);
                    (IntentLevel::None, score.min(19))
                }
            }
        }
    }
}

/// Weighted sum of the sub-scores, rounded and clamped to 0-100.
/// `weights` must already be normalized.
pub fn composite(job_title: u8, tech_fit: u8, intent: u8, weights: &ScoringWeights) -> u8 {
    let raw = f64::from(job_title) * weights.job_title_weight
        + f64::from(tech_fit) * weights.tech_fit_weight
        + f64::from(intent) * weights.intent_weight;
    raw.round().clamp(0.0, 100.0) as u8
}

fn clamp_to_band(score: u8, (lo, hi): (u8, u8)) -> u8 {
    score.clamp(lo, hi)
}

/// Lowercase words, split on anything that is not alphanumeric
fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && haystack.windows(phrase.len()).any(|w| w == phrase)
}

fn normalize_stack<'a>(stack: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    stack
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
