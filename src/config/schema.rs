use serde::{Deserialize, Serialize};

use crate::enrich::EnrichmentConfig;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hide leads whose composite score is below this value
    #[serde(default)]
    pub min_score: Option<u8>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub enrichment: Option<EnrichmentConfig>,
}

impl Config {
    /// Validate every section, collecting all problems
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_score {
            if min > 100 {
                errors.push(format!("min_score: must be between 0 and 100 (got {})", min));
            }
        }
        if let Some(ref scoring) = self.scoring {
            if let Err(e) = crate::scoring::validate_scoring(scoring) {
                errors.extend(e);
            }
        }
        if let Some(ref enrichment) = self.enrichment {
            if let Err(e) = crate::enrich::validate_enrichment(enrichment) {
                errors.extend(e);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
