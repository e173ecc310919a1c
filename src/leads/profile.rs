use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    MidLevel,
    Senior,
    Executive,
}

const EXECUTIVE_WORDS: &[&str] = &[
    "ceo", "cto", "cfo", "coo", "vp", "svp", "evp", "head", "director", "chief", "founder",
    "cofounder", "president",
];
const SENIOR_WORDS: &[&str] = &["senior", "sr", "lead", "principal", "staff", "manager"];
const JUNIOR_WORDS: &[&str] = &["junior", "jr", "associate", "intern"];

impl Seniority {
    /// Infer seniority from title words. `None` when the title gives no hint.
    pub fn from_title(title: &str) -> Option<Self> {
        let words: Vec<String> = title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let has_any = |list: &[&str]| words.iter().any(|w| list.contains(&w.as_str()));

        if has_any(EXECUTIVE_WORDS) {
            Some(Seniority::Executive)
        } else if has_any(SENIOR_WORDS) {
            Some(Seniority::Senior)
        } else if has_any(JUNIOR_WORDS) {
            Some(Seniority::Junior)
        } else {
            None
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Ok(match normalized.as_str() {
            "junior" => Seniority::Junior,
            "mid-level" | "mid" | "midlevel" => Seniority::MidLevel,
            "senior" => Seniority::Senior,
            "executive" => Seniority::Executive,
            _ => bail!("Seniority must be junior, mid-level, senior or executive: {}", s.trim()),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::MidLevel => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Executive => "Executive",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

/// Domains that always count as Enterprise
const ENTERPRISE_DOMAINS: &[&str] = &["google", "microsoft", "apple", "amazon", "facebook", "netflix"];

impl CompanySize {
    pub const ALL: [CompanySize; 5] = [
        CompanySize::Startup,
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
    ];

    /// Enterprise for well-known large company domains, otherwise unknown
    pub fn from_domain(domain: &str) -> Option<Self> {
        let domain = domain.to_lowercase();
        ENTERPRISE_DOMAINS
            .iter()
            .any(|d| domain.contains(d))
            .then_some(CompanySize::Enterprise)
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "startup" => CompanySize::Startup,
            "small" => CompanySize::Small,
            "medium" => CompanySize::Medium,
            "large" => CompanySize::Large,
            "enterprise" => CompanySize::Enterprise,
            _ => bail!(
                "Company size must be startup, small, medium, large or enterprise: {}",
                s.trim()
            ),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::Startup => "Startup",
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
            CompanySize::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
