pub mod directory;
pub mod placeholder;

pub use directory::{validate_enrichment, CompanyProfile, DirectoryEnricher, EnrichmentConfig};
pub use placeholder::{linkedin_url, PlaceholderEnricher};

use std::collections::BTreeSet;

use crate::leads::{CompanySize, Lead, Seniority};
use crate::scoring::IntentSignal;

/// Values an enrichment source knows about a lead. `None` means "unknown".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub job_title: Option<String>,
    pub tech_stack: Option<BTreeSet<String>>,
    pub intent_signal: Option<IntentSignal>,
    pub linkedin_url: Option<String>,
    pub seniority_level: Option<Seniority>,
    pub company_size: Option<CompanySize>,
    pub phone: Option<String>,
}

impl Enrichment {
    /// Everything the lead already carries
    fn known(lead: &Lead) -> Self {
        Self {
            job_title: lead.job_title.clone(),
            tech_stack: Some(lead.tech_stack.clone()).filter(|s| !s.is_empty()),
            intent_signal: lead.intent_signal,
            linkedin_url: lead.linkedin_url.clone(),
            seniority_level: lead.seniority_level,
            company_size: lead.company_size,
            phone: lead.phone.clone(),
        }
    }
}

/// Source of company and contact metadata.
pub trait EnrichmentProvider {
    fn lookup(&self, lead: &Lead) -> Enrichment;
}

/// Queries providers in order; the first one to know a field wins.
///
/// Each provider sees the lead with the gaps earlier providers filled, so a
/// later provider can derive values from an earlier one's answers.
#[derive(Default)]
pub struct ChainedEnricher {
    providers: Vec<Box<dyn EnrichmentProvider>>,
}

impl ChainedEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl EnrichmentProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Directory first, then placeholder data when enabled
    pub fn from_config(config: &EnrichmentConfig, placeholder: bool) -> Self {
        let directory = DirectoryEnricher::from_config(config);
        tracing::debug!("Enrichment directory has {} companies", directory.len());
        let chain = Self::new().with(directory);
        if placeholder {
            chain.with(PlaceholderEnricher)
        } else {
            chain
        }
    }
}

impl EnrichmentProvider for ChainedEnricher {
    fn lookup(&self, lead: &Lead) -> Enrichment {
        let mut current = lead.clone();
        for provider in &self.providers {
            let found = provider.lookup(&current);
            fill_missing(&mut current, found);
        }
        Enrichment::known(&current)
    }
}

fn is_complete(lead: &Lead) -> bool {
    lead.job_title.is_some()
        && !lead.tech_stack.is_empty()
        && lead.intent_signal.is_some()
        && lead.linkedin_url.is_some()
        && lead.seniority_level.is_some()
        && lead.company_size.is_some()
        && lead.phone.is_some()
}

fn fill_missing(lead: &mut Lead, found: Enrichment) {
    if lead.job_title.is_none() {
        lead.job_title = found.job_title;
    }
    if lead.tech_stack.is_empty() {
        lead.tech_stack = found.tech_stack.unwrap_or_default();
    }
    if lead.intent_signal.is_none() {
        lead.intent_signal = found.intent_signal;
    }
    if lead.linkedin_url.is_none() {
        lead.linkedin_url = found.linkedin_url;
    }
    if lead.seniority_level.is_none() {
        lead.seniority_level = found.seniority_level;
    }
    if lead.company_size.is_none() {
        lead.company_size = found.company_size;
    }
    if lead.phone.is_none() {
        lead.phone = found.phone;
    }
}

/// Fill the fields a lead lacks. Values already on the lead are never replaced.
pub fn enrich_lead(mut lead: Lead, provider: &dyn EnrichmentProvider) -> Lead {
    if is_complete(&lead) {
        return lead;
    }
    let found = provider.lookup(&lead);
    fill_missing(&mut lead, found);
    lead
}
