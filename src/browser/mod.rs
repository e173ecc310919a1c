use anyhow::{Context, Result};

use crate::pipeline::ScoredLead;

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

/// Open a ranked lead's profile page
pub fn open_profile(scored: &ScoredLead) -> Result<()> {
    let url = scored
        .lead
        .linkedin_url
        .as_deref()
        .with_context(|| format!("No profile URL for {}", scored.lead.name))?;
    tracing::debug!("Opening {} for {}", url, scored.lead.email);
    open_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::Lead;
    use crate::scoring::{ScoreEngine, ScoringWeights};

    #[test]
    fn test_open_profile_without_url_fails_before_browser() {
        let lead = Lead::new("Sam Park", "sam@initech.io", "initech.io");
        let result = ScoreEngine::default()
            .score(&lead, &ScoringWeights::default())
            .unwrap();
        let scored = ScoredLead {
            row: 1,
            lead,
            result,
        };
        let err = open_profile(&scored).unwrap_err();
        assert!(err.to_string().contains("No profile URL for Sam Park"));
    }
}
