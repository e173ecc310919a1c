use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision-making power, derived from the job title band.
///
/// Variants are declared lowest first so that `Ord` ranks Decision Maker highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Other,
    User,
    Influencer,
    DecisionMaker,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::DecisionMaker, Tier::Influencer, Tier::User, Tier::Other];

    /// Inclusive score range for the band
    pub fn band(&self) -> (u8, u8) {
        match self {
            Tier::DecisionMaker => (90, 100),
            Tier::Influencer => (70, 89),
            Tier::User => (40, 69),
            Tier::Other => (0, 39),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::DecisionMaker => "Decision Maker",
            Tier::Influencer => "Influencer",
            Tier::User => "User",
            Tier::Other => "Other",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechFit {
    PoorFit,
    PotentialFit,
    GoodFit,
    PerfectMatch,
}

impl TechFit {
    pub const ALL: [TechFit; 4] = [
        TechFit::PerfectMatch,
        TechFit::GoodFit,
        TechFit::PotentialFit,
        TechFit::PoorFit,
    ];

    /// Classify an overlap ratio and return the band plus its ratio bounds
    pub fn classify(ratio: f64) -> (Self, f64, f64) {
        if ratio >= 0.75 {
            (TechFit::PerfectMatch, 0.75, 1.0)
        } else if ratio >= 0.5 {
            (TechFit::GoodFit, 0.5, 0.75)
        } else if ratio >= 0.25 {
            (TechFit::PotentialFit, 0.25, 0.5)
        } else {
            (TechFit::PoorFit, 0.0, 0.25)
        }
    }

    pub fn band(&self) -> (u8, u8) {
        match self {
            TechFit::PerfectMatch => (90, 100),
            TechFit::GoodFit => (70, 89),
            TechFit::PotentialFit => (40, 69),
            TechFit::PoorFit => (0, 39),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TechFit::PerfectMatch => "Perfect Match",
            TechFit::GoodFit => "Good Fit",
            TechFit::PotentialFit => "Potential Fit",
            TechFit::PoorFit => "Poor Fit",
        }
    }
}

impl fmt::Display for TechFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLevel {
    None,
    Low,
    Medium,
    High,
}

impl IntentLevel {
    pub fn band(&self) -> (u8, u8) {
        match self {
            IntentLevel::High => (80, 100),
            IntentLevel::Medium => (50, 79),
            IntentLevel::Low => (20, 49),
            IntentLevel::None => (0, 19),
        }
    }

    /// Score used when the signal is categorical rather than a count
    pub fn representative_score(&self) -> u8 {
        match self {
            IntentLevel::High => 90,
            IntentLevel::Medium => 65,
            IntentLevel::Low => 35,
            IntentLevel::None => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntentLevel::High => "High Intent",
            IntentLevel::Medium => "Medium Intent",
            IntentLevel::Low => "Low Intent",
            IntentLevel::None => "No Intent",
        }
    }
}

impl fmt::Display for IntentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buying-intent proxy attached to a lead: a category or an engagement count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IntentSignal {
    Count(u32),
    Level(IntentLevel),
}

impl IntentSignal {
    /// Parse "high", "Medium", "none", or a plain engagement count like "12"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Intent signal is empty");
        }
        if let Ok(count) = s.parse::<u32>() {
            return Ok(IntentSignal::Count(count));
        }
        let level = match s.to_ascii_lowercase().as_str() {
            "high" => IntentLevel::High,
            "medium" | "med" => IntentLevel::Medium,
            "low" => IntentLevel::Low,
            "none" | "no" => IntentLevel::None,
            _ => bail!("Intent signal must be high, medium, low, none or a count: {}", s),
        };
        Ok(IntentSignal::Level(level))
    }
}

impl fmt::Display for IntentSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentSignal::Count(n) => write!(f, "{}", n),
            IntentSignal::Level(level) => f.write_str(match level {
                IntentLevel::High => "high",
                IntentLevel::Medium => "medium",
                IntentLevel::Low => "low",
                IntentLevel::None => "none",
            }),
        }
    }
}

/// Map `value` in `[lo, hi]` linearly onto `[score_lo, score_hi]`.
/// Values outside the range clamp to the nearest end.
pub fn interpolate(value: f64, lo: f64, hi: f64, score_lo: u8, score_hi: u8) -> u8 {
    if hi <= lo {
        return score_lo;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    let span = f64::from(score_hi) - f64::from(score_lo);
    (f64::from(score_lo) + t * span).round() as u8
}
