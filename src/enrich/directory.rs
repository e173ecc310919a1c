use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Enrichment, EnrichmentProvider};
use crate::leads::{clean_company_domain, CompanySize, Lead};
use crate::scoring::IntentSignal;

/// Enrichment settings.
///
/// Example YAML:
/// ```yaml
/// enrichment:
///   placeholder: true
///   companies:
///     acme.com:
///       job_title: "VP of Sales"
///       tech_stack: ["Salesforce", "HubSpot"]
///       intent: "high"
///       company_size: "medium"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentConfig {
    /// Fill remaining gaps with generated placeholder data (default: true)
    #[serde(default)]
    pub placeholder: Option<bool>,

    /// Known company profiles keyed by domain
    #[serde(default)]
    pub companies: Option<BTreeMap<String, CompanyProfile>>,
}

impl EnrichmentConfig {
    pub fn placeholder_enabled(&self) -> bool {
        self.placeholder.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompanyProfile {
    #[serde(default)]
    pub job_title: Option<String>,

    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,

    /// "high", "medium", "low", "none" or an engagement count like "12"
    #[serde(default)]
    pub intent: Option<String>,

    /// "startup", "small", "medium", "large" or "enterprise"
    #[serde(default)]
    pub company_size: Option<String>,
}

/// Validate enrichment configuration. Returns all errors at once.
pub fn validate_enrichment(config: &EnrichmentConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref companies) = config.companies {
        for (domain, profile) in companies {
            if clean_company_domain(domain).is_empty() {
                errors.push(format!("enrichment.companies: blank domain '{}'", domain));
            }
            if let Some(ref intent) = profile.intent {
                if let Err(e) = IntentSignal::parse(intent) {
                    errors.push(format!(
                        "enrichment.companies.{}.intent: invalid '{}' - {}",
                        domain, intent, e
                    ));
                }
            }
            if let Some(ref size) = profile.company_size {
                if let Err(e) = CompanySize::parse(size) {
                    errors.push(format!(
                        "enrichment.companies.{}.company_size: invalid '{}' - {}",
                        domain, size, e
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Lookup table of known companies, matched on the lead's cleaned domain.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEnricher {
    companies: BTreeMap<String, Enrichment>,
}

impl DirectoryEnricher {
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        let companies = config
            .companies
            .iter()
            .flatten()
            .map(|(domain, profile)| {
                let enrichment = Enrichment {
                    job_title: profile.job_title.clone(),
                    tech_stack: profile
                        .tech_stack
                        .as_ref()
                        .map(|stack| {
                            stack
                                .iter()
                                .map(|t| t.trim())
                                .filter(|t| !t.is_empty())
                                .map(str::to_string)
                                .collect()
                        }),
                    intent_signal: profile
                        .intent
                        .as_deref()
                        .and_then(|s| IntentSignal::parse(s).ok()),
                    company_size: profile
                        .company_size
                        .as_deref()
                        .and_then(|s| CompanySize::parse(s).ok()),
                    ..Default::default()
                };
                (clean_company_domain(domain), enrichment)
            })
            .collect();
        Self { companies }
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl EnrichmentProvider for DirectoryEnricher {
    fn lookup(&self, lead: &Lead) -> Enrichment {
        self.companies
            .get(&lead.company_domain)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::IntentLevel;

    fn config() -> EnrichmentConfig {
        let yaml = r#"
placeholder: false
companies:
  "https://www.Acme.com":
    job_title: "VP of Sales"
    tech_stack: ["Salesforce", " HubSpot ", "  "]
    intent: "high"
    company_size: "Large"
  globex.io:
    intent: "7"
"#;
        serde_saphyr::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_config() {
        let config = config();
        assert!(!config.placeholder_enabled());
        assert_eq!(config.companies.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_placeholder_defaults_on() {
        assert!(EnrichmentConfig::default().placeholder_enabled());
    }

    #[test]
    fn test_lookup_by_cleaned_domain() {
        let directory = DirectoryEnricher::from_config(&config());
        let lead = Lead::new("Dana", "dana@acme.com", "acme.com");
        let found = directory.lookup(&lead);
        assert_eq!(found.job_title.as_deref(), Some("VP of Sales"));
        let stack = found.tech_stack.unwrap();
        // Trimmed, with the blank entry dropped
        assert_eq!(stack.len(), 2);
        assert!(stack.contains("HubSpot"));
        assert!(!stack.contains(""));
        assert_eq!(
            found.intent_signal,
            Some(IntentSignal::Level(IntentLevel::High))
        );
        assert_eq!(found.company_size, Some(CompanySize::Large));
    }

    #[test]
    fn test_lookup_partial_profile() {
        let directory = DirectoryEnricher::from_config(&config());
        let lead = Lead::new("Hank", "hank@globex.io", "globex.io");
        let found = directory.lookup(&lead);
        assert!(found.job_title.is_none());
        assert_eq!(found.intent_signal, Some(IntentSignal::Count(7)));
    }

    #[test]
    fn test_lookup_unknown_domain() {
        let directory = DirectoryEnricher::from_config(&config());
        let lead = Lead::new("Nobody", "n@unknown.org", "unknown.org");
        assert_eq!(directory.lookup(&lead), Enrichment::default());
    }

    #[test]
    fn test_validate_bad_intent() {
        let mut config = config();
        config
            .companies
            .as_mut()
            .unwrap()
            .get_mut("globex.io")
            .unwrap()
            .intent = Some("eager".to_string());
        let errors = validate_enrichment(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("enrichment.companies.globex.io.intent"));
    }

    #[test]
    fn test_validate_bad_company_size() {
        let mut config = config();
        config
            .companies
            .as_mut()
            .unwrap()
            .get_mut("globex.io")
            .unwrap()
            .company_size = Some("huge".to_string());
        let errors = validate_enrichment(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("enrichment.companies.globex.io.company_size"));
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_enrichment(&config()).is_ok());
    }
}
