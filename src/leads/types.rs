use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::profile::{CompanySize, Seniority};
use crate::error::ValidationError;
use crate::scoring::IntentSignal;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// One CSV row as read, before validation. Every cell is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_domain: Option<String>,
    pub job_title: Option<String>,
    pub tech_stack: Option<String>,
    pub intent_signal: Option<String>,
    pub linkedin_url: Option<String>,
    pub seniority_level: Option<String>,
    pub company_size: Option<String>,
    pub phone: Option<String>,
}

/// A validated lead. Required fields are non-empty; enrichment fields may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub company_domain: String,
    pub job_title: Option<String>,
    pub tech_stack: BTreeSet<String>,
    pub intent_signal: Option<IntentSignal>,
    pub linkedin_url: Option<String>,
    pub seniority_level: Option<Seniority>,
    pub company_size: Option<CompanySize>,
    pub phone: Option<String>,
}

impl Lead {
    /// Minimal lead with only the required fields
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company_domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company_domain: clean_company_domain(&company_domain.into()),
            job_title: None,
            tech_stack: BTreeSet::new(),
            intent_signal: None,
            linkedin_url: None,
            seniority_level: None,
            company_size: None,
            phone: None,
        }
    }

    /// Check the required-field invariant. Scoring refuses leads that fail this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.company_domain.trim().is_empty() {
            return Err(ValidationError::MissingField("company_domain"));
        }
        Ok(())
    }

    /// Tech stack joined for display and export
    pub fn tech_stack_display(&self) -> String {
        self.tech_stack.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl TryFrom<LeadRecord> for Lead {
    type Error = ValidationError;

    fn try_from(record: LeadRecord) -> Result<Self, Self::Error> {
        let name = non_empty(record.name).ok_or(ValidationError::MissingField("name"))?;
        let email = non_empty(record.email).ok_or(ValidationError::MissingField("email"))?;
        let company_domain = non_empty(record.company_domain)
            .map(|d| clean_company_domain(&d))
            .filter(|d| !d.is_empty())
            .ok_or(ValidationError::MissingField("company_domain"))?;

        let intent_signal = parse_optional(record.intent_signal, &email, IntentSignal::parse);
        let seniority_level = parse_optional(record.seniority_level, &email, Seniority::parse);
        let company_size = parse_optional(record.company_size, &email, CompanySize::parse);

        let lead = Lead {
            name,
            email,
            company_domain,
            job_title: non_empty(record.job_title),
            tech_stack: record
                .tech_stack
                .as_deref()
                .map(split_tech_stack)
                .unwrap_or_default(),
            intent_signal,
            linkedin_url: non_empty(record.linkedin_url),
            seniority_level,
            company_size,
            phone: non_empty(record.phone),
        };
        lead.validate()?;
        Ok(lead)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional cell. Unparsable values count as absent.
fn parse_optional<T>(
    value: Option<String>,
    email: &str,
    parse: impl Fn(&str) -> anyhow::Result<T>,
) -> Option<T> {
    let raw = non_empty(value)?;
    match parse(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("Ignoring value for {}: {}", email, e);
            None
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Split a cell like "React, Node.js; Docker" into a set of names
pub fn split_tech_stack(cell: &str) -> BTreeSet<String> {
    cell.split([',', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase a domain or website and strip scheme, `www.` and any path
pub fn clean_company_domain(domain: &str) -> String {
    let mut domain = domain.trim().to_lowercase();
    for prefix in ["http://", "https://", "www."] {
        if let Some(rest) = domain.strip_prefix(prefix) {
            domain = rest.to_string();
        }
    }
    domain.split('/').next().unwrap_or_default().to_string()
}
