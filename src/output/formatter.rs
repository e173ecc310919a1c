use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::pipeline::{RowError, ScoredLead};
use crate::scoring::{ScoreResult, Tier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Score quality bucket used for coloring and summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Medium,
    Low,
}

impl Quality {
    pub fn of(score: u8) -> Self {
        if score >= 80 {
            Quality::High
        } else if score >= 60 {
            Quality::Medium
        } else {
            Quality::Low
        }
    }
}

/// Right-align a score to `width` and color it by quality
fn format_score(score: u8, width: usize, use_colors: bool) -> String {
    let padded = format!("{:>width$}", score, width = width);
    if !use_colors {
        return padded;
    }
    match Quality::of(score) {
        Quality::High => padded.green().bold().to_string(),
        Quality::Medium => padded.yellow().to_string(),
        Quality::Low => padded.red().to_string(),
    }
}

fn format_tier(tier: Tier, use_colors: bool) -> String {
    let padded = format!("{:<14}", tier.label());
    if !use_colors {
        return padded;
    }
    match tier {
        Tier::DecisionMaker => padded.magenta().bold().to_string(),
        Tier::Influencer => padded.cyan().to_string(),
        Tier::User => padded.to_string(),
        Tier::Other => padded.dimmed().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked leads as a table: Index, Score, Tier, Name, Company.
/// No headers. Name is truncated to fit the terminal.
pub fn format_scored_table(leads: &[ScoredLead], use_colors: bool) -> String {
    format_table_with_width(leads, use_colors, get_terminal_width())
}

fn format_table_with_width(
    leads: &[ScoredLead],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    // Index: 3 + 1, score: 3, tier: 14, three separators of 2
    let separator = "  ";
    let fixed_width = 4 + 3 + 14 + separator.len() * 3;

    leads
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format_score(scored.result.composite_score, 3, use_colors);
            let tier_str = format_tier(scored.result.tier, use_colors);
            let company = &scored.lead.company_domain;

            let company_width = company.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + company_width + 10 => {
                    truncate(&scored.lead.name, width - fixed_width - company_width)
                }
                _ => scored.lead.name.clone(),
            };
            let company_str = if use_colors {
                company.underline().to_string()
            } else {
                company.clone()
            };

            format!(
                "{} {}{}{}{}{}{}{}",
                index_str,
                score_str,
                separator,
                tier_str,
                separator,
                name,
                separator,
                company_str
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single lead with its sub-scores (verbose mode)
pub fn format_lead_detail(scored: &ScoredLead, use_colors: bool) -> String {
    let lead = &scored.lead;
    let r = &scored.result;
    let title = lead.job_title.as_deref().unwrap_or("(unknown)");
    let stack = if lead.tech_stack.is_empty() {
        "(unknown)".to_string()
    } else {
        lead.tech_stack_display()
    };
    let intent = lead
        .intent_signal
        .map(|s| s.to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    let profile: Vec<String> = [
        lead.seniority_level.map(|s| format!("Seniority: {}", s)),
        lead.company_size.map(|s| format!("Size: {}", s)),
        lead.phone.as_ref().map(|p| format!("Phone: {}", p)),
    ]
    .into_iter()
    .flatten()
    .collect();
    let company = if profile.is_empty() {
        lead.company_domain.clone()
    } else {
        format!("{}\n  {}", lead.company_domain, profile.join("  "))
    };
    let header = if use_colors {
        format!("{} <{}>", lead.name.bold(), lead.email.cyan())
    } else {
        format!("{} <{}>", lead.name, lead.email)
    };

    format!(
        "{}\n  Company: {}\n  Title: {}\n  Stack: {}\n  Intent: {}\n  \
         Job title: {:>3} ({})\n  Tech fit:  {:>3} ({})\n  Intent:    {:>3} ({})\n  \
         Composite: {}\n  {}",
        header,
        company,
        title,
        stack,
        intent,
        r.job_title_score,
        r.tier,
        r.tech_fit_score,
        r.tech_fit,
        r.intent_score,
        r.intent,
        format_score(r.composite_score, 3, use_colors),
        r.explain()
    )
}

/// Tab-separated rows for piping: composite, tier, name, email, company
pub fn format_tsv(leads: &[ScoredLead]) -> String {
    leads
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                s.result.composite_score,
                s.result.tier,
                s.lead.name,
                s.lead.email,
                s.lead.company_domain
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonLead<'a> {
    rank: usize,
    row: usize,
    #[serde(flatten)]
    lead: &'a crate::leads::Lead,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

/// Pretty JSON array of ranked leads with their scores
pub fn format_json(leads: &[ScoredLead]) -> Result<String> {
    let rows: Vec<JsonLead> = leads
        .iter()
        .enumerate()
        .map(|(i, s)| JsonLead {
            rank: i + 1,
            row: s.row,
            lead: &s.lead,
            result: &s.result,
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("Failed to serialize leads as JSON")
}

/// One line per rejected row: "row 2: missing required field 'email'"
pub fn format_row_errors(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(|e| format!("row {}: {}", e.row, e.error))
        .collect::<Vec<_>>()
        .join("\n")
}
