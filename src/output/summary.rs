use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;

use super::formatter::Quality;
use crate::pipeline::{ScoredBatch, ScoredLead};
use crate::scoring::{TechFit, Tier};

/// Aggregate lead quality figures for a scored batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub total_leads: usize,
    pub high_quality: usize,
    pub medium_quality: usize,
    pub low_quality: usize,
    /// Mean composite score, one decimal
    pub average_score: f64,
    /// Percentage of leads in the high bucket, one decimal
    pub quality_rate: f64,
    pub tiers: Vec<(Tier, usize)>,
    pub tech_fit: Vec<(TechFit, usize)>,
    /// Mean sub-scores, one decimal
    pub average_job_title_score: f64,
    pub average_tech_fit_score: f64,
    pub average_intent_score: f64,
    /// Composite counts in 10-point buckets keyed by lower bound. 100 lands in 90.
    pub score_distribution: Vec<(u8, usize)>,
    /// Most common job titles, most frequent first
    pub top_job_titles: Vec<(String, usize)>,
    pub rejected_rows: usize,
}

const TOP_TITLES: usize = 10;

fn mean(scored: &[ScoredLead], score: impl Fn(&ScoredLead) -> u8) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }
    let sum: u64 = scored.iter().map(|s| u64::from(score(s))).sum();
    round1(sum as f64 / scored.len() as f64)
}

fn score_distribution(scored: &[ScoredLead]) -> Vec<(u8, usize)> {
    let mut buckets = [0usize; 10];
    for s in scored {
        buckets[usize::from(s.result.composite_score / 10).min(9)] += 1;
    }
    (0u8..10).map(|i| i * 10).zip(buckets).collect()
}

/// Ties break alphabetically. Leads without a title are not counted.
fn top_job_titles(scored: &[ScoredLead]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for title in scored.iter().filter_map(|s| s.lead.job_title.as_deref()) {
        *counts.entry(title).or_default() += 1;
    }
    let mut titles: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(title, n)| (title.to_string(), n))
        .collect();
    // Stable sort keeps the BTreeMap's alphabetical order within equal counts
    titles.sort_by(|a, b| b.1.cmp(&a.1));
    titles.truncate(TOP_TITLES);
    titles
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn calculate_metrics(batch: &ScoredBatch) -> QualityMetrics {
    let scored = &batch.scored;
    let total_leads = scored.len();
    let count = |q: Quality| {
        scored
            .iter()
            .filter(|s| Quality::of(s.result.composite_score) == q)
            .count()
    };
    let high_quality = count(Quality::High);

    let quality_rate = if total_leads == 0 {
        0.0
    } else {
        round1(high_quality as f64 / total_leads as f64 * 100.0)
    };

    QualityMetrics {
        total_leads,
        high_quality,
        medium_quality: count(Quality::Medium),
        low_quality: count(Quality::Low),
        average_score: mean(scored, |s| s.result.composite_score),
        quality_rate,
        tiers: Tier::ALL
            .iter()
            .map(|t| (*t, scored.iter().filter(|s| s.result.tier == *t).count()))
            .collect(),
        tech_fit: TechFit::ALL
            .iter()
            .map(|f| (*f, scored.iter().filter(|s| s.result.tech_fit == *f).count()))
            .collect(),
        average_job_title_score: mean(scored, |s| s.result.job_title_score),
        average_tech_fit_score: mean(scored, |s| s.result.tech_fit_score),
        average_intent_score: mean(scored, |s| s.result.intent_score),
        score_distribution: score_distribution(scored),
        top_job_titles: top_job_titles(scored),
        rejected_rows: batch.rejected.len(),
    }
}

/// Render metrics as an aligned text report with simple bar charts
pub fn format_summary(metrics: &QualityMetrics, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let heading = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    lines.push(heading("Lead quality"));
    lines.push(format!("  Total leads:     {}", metrics.total_leads));
    lines.push(format!("  High (>=80):     {}", metrics.high_quality));
    lines.push(format!("  Medium (60-79):  {}", metrics.medium_quality));
    lines.push(format!("  Low (<60):       {}", metrics.low_quality));
    lines.push(format!("  Average score:   {:.1}", metrics.average_score));
    lines.push(format!("  Quality rate:    {:.1}%", metrics.quality_rate));
    lines.push(format!(
        "  Sub-score means: job title {:.1}, tech fit {:.1}, intent {:.1}",
        metrics.average_job_title_score,
        metrics.average_tech_fit_score,
        metrics.average_intent_score
    ));
    if metrics.rejected_rows > 0 {
        lines.push(format!("  Rejected rows:   {}", metrics.rejected_rows));
    }

    let max = metrics
        .tiers
        .iter()
        .map(|(_, n)| *n)
        .chain(metrics.tech_fit.iter().map(|(_, n)| *n))
        .max()
        .unwrap_or(0);

    lines.push(String::new());
    lines.push(heading("Tiers"));
    for (tier, n) in &metrics.tiers {
        lines.push(format!("  {:<14} {:>4}  {}", tier.label(), n, bar(*n, max)));
    }

    lines.push(String::new());
    lines.push(heading("Tech fit"));
    for (fit, n) in &metrics.tech_fit {
        lines.push(format!("  {:<14} {:>4}  {}", fit.label(), n, bar(*n, max)));
    }

    let max = metrics
        .score_distribution
        .iter()
        .map(|(_, n)| *n)
        .max()
        .unwrap_or(0);
    lines.push(String::new());
    lines.push(heading("Score distribution"));
    for (low, n) in &metrics.score_distribution {
        let high = if *low == 90 { 100 } else { low + 9 };
        let range = format!("{}-{}", low, high);
        lines.push(format!("  {:<14} {:>4}  {}", range, n, bar(*n, max)));
    }

    if !metrics.top_job_titles.is_empty() {
        let width = metrics
            .top_job_titles
            .iter()
            .map(|(title, _)| title.chars().count())
            .max()
            .unwrap_or(0)
            .max(14);
        lines.push(String::new());
        lines.push(heading("Top job titles"));
        for (title, n) in &metrics.top_job_titles {
            lines.push(format!("  {:<width$} {:>4}", title, n, width = width));
        }
    }

    lines.join("\n")
}

const BAR_WIDTH: usize = 30;

fn bar(n: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((n * BAR_WIDTH).div_ceil(max))
}
