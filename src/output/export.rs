use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::ScoredLead;

const HEADER: [&str; 15] = [
    "name",
    "email",
    "company_domain",
    "job_title",
    "tech_stack",
    "intent_signal",
    "linkedin_url",
    "seniority_level",
    "company_size",
    "phone",
    "job_title_score",
    "tech_fit_score",
    "intent_score",
    "composite_score",
    "tier",
];

/// Default export file name, e.g. `scored_leads_20240105_093000.csv`
pub fn default_export_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("scored_leads_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

/// Write the enriched table with score columns appended
pub fn write_csv<W: Write>(writer: W, leads: &[ScoredLead]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).context("Failed to write CSV header")?;

    for scored in leads {
        let lead = &scored.lead;
        let r = &scored.result;
        csv.write_record([
            lead.name.clone(),
            lead.email.clone(),
            lead.company_domain.clone(),
            lead.job_title.clone().unwrap_or_default(),
            lead.tech_stack_display(),
            lead.intent_signal.map(|s| s.to_string()).unwrap_or_default(),
            lead.linkedin_url.clone().unwrap_or_default(),
            lead.seniority_level.map(|s| s.to_string()).unwrap_or_default(),
            lead.company_size.map(|s| s.to_string()).unwrap_or_default(),
            lead.phone.clone().unwrap_or_default(),
            r.job_title_score.to_string(),
            r.tech_fit_score.to_string(),
            r.intent_score.to_string(),
            r.composite_score.to_string(),
            r.tier.to_string(),
        ])
        .with_context(|| format!("Failed to write CSV row for {}", lead.email))?;
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Export to a file atomically, so a failed write never leaves a partial file
pub fn export_csv(path: &Path, leads: &[ScoredLead]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_csv(&mut file, leads)?;

    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;
    tracing::info!("Exported {} leads to {}", leads.len(), path.display());
    Ok(())
}
