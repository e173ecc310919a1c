use std::cmp::Ordering;

use crate::enrich::{enrich_lead, EnrichmentProvider};
use crate::error::{ConfigError, ValidationError};
use crate::leads::{Lead, LeadRecord};
use crate::scoring::{ScoreEngine, ScoreResult, ScoringWeights};

/// A lead with its score and its 1-based position in the input file
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLead {
    pub row: usize,
    pub lead: Lead,
    pub result: ScoreResult,
}

/// A row that failed validation and was left out of the scored output
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub row: usize,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredBatch {
    /// Scored leads, in input order until [`rank`] is applied
    pub scored: Vec<ScoredLead>,
    pub rejected: Vec<RowError>,
}

/// Validate, enrich and score every row.
///
/// Weights are checked once up front: an invalid weight set stops the whole
/// batch before any row is touched. Invalid rows are collected in `rejected`
/// and the remaining rows are still scored. Output keeps input order.
pub fn score_leads(
    records: Vec<LeadRecord>,
    provider: &dyn EnrichmentProvider,
    engine: &ScoreEngine,
    weights: &ScoringWeights,
) -> Result<ScoredBatch, ConfigError> {
    let weights = weights.normalized()?;
    tracing::debug!(
        "Normalized weights: job_title={:.3} tech_fit={:.3} intent={:.3}",
        weights.job_title_weight,
        weights.tech_fit_weight,
        weights.intent_weight
    );

    let mut batch = ScoredBatch::default();
    for (i, record) in records.into_iter().enumerate() {
        let row = i + 1;
        let lead = match Lead::try_from(record) {
            Ok(lead) => lead,
            Err(error) => {
                tracing::debug!("Skipping row {}: {}", row, error);
                batch.rejected.push(RowError { row, error });
                continue;
            }
        };

        let lead = enrich_lead(lead, provider);
        let result = engine.score_normalized(&lead, &weights);
        batch.scored.push(ScoredLead { row, lead, result });
    }

    tracing::info!(
        "Scored {} leads, rejected {} rows",
        batch.scored.len(),
        batch.rejected.len()
    );
    Ok(batch)
}

/// Sort by composite score descending. Ties go to the stronger job title,
/// then to whichever lead appeared first in the input.
pub fn rank(leads: &mut [ScoredLead]) {
    leads.sort_by(|a, b| {
        let score_cmp = b.result.composite_score.cmp(&a.result.composite_score);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        let title_cmp = b.result.job_title_score.cmp(&a.result.job_title_score);
        if title_cmp != Ordering::Equal {
            return title_cmp;
        }
        a.row.cmp(&b.row)
    });
}

/// Keep only leads whose composite score reaches `min_score`
pub fn filter_min_score(leads: Vec<ScoredLead>, min_score: u8) -> Vec<ScoredLead> {
    leads
        .into_iter()
        .filter(|l| l.result.composite_score >= min_score)
        .collect()
}
