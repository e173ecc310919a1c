use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::enrich::EnrichmentConfig;
use crate::scoring::{default_target_stack, ScoringConfig, ScoringWeights};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Keep asking until `parse` accepts the answer.
fn prompt_until<T>(
    message: &str,
    default: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let input = prompt_with_default(message, default)?;
        match parse(&input) {
            Ok(v) => return Ok(v),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

fn parse_weight(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if !v.is_finite() => Err("must be a finite number".to_string()),
        Ok(v) if !(0.0..=1.0).contains(&v) => Err("must be between 0 and 1".to_string()),
        Ok(v) => Ok(v),
        Err(_) => Err("must be a number between 0 and 1".to_string()),
    }
}

fn parse_min_score(s: &str) -> Result<u8, String> {
    match s.parse::<u8>() {
        Ok(v) if v <= 100 => Ok(v),
        _ => Err("must be a whole number between 0 and 100".to_string()),
    }
}

/// Comma-separated technology list; blank entries are dropped.
fn parse_stack(s: &str) -> Result<Vec<String>, String> {
    let stack: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if stack.is_empty() {
        Err("at least one technology is required".to_string())
    } else {
        Ok(stack)
    }
}

fn format_weight(w: f64) -> String {
    format!("{}", w)
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Leadrank Configuration Wizard");
    println!("=============================");
    println!();

    let defaults = ScoringConfig::default();
    let default_weights = ScoringWeights::default();

    // 1. Weights
    typewriter("Every lead gets three sub-scores from 0 to 100: job title, tech fit and intent.");
    typewriter("The composite is their weighted average. Weights are rescaled to sum to 1.");
    let configure_weights = prompt_yes_no("Configure weights? (n accepts 0.4 / 0.3 / 0.3)", true)?;

    let weights = if configure_weights {
        loop {
            let weights = ScoringWeights::new(
                prompt_until(
                    "Job title weight",
                    &format_weight(default_weights.job_title_weight),
                    parse_weight,
                )?,
                prompt_until(
                    "Tech fit weight",
                    &format_weight(default_weights.tech_fit_weight),
                    parse_weight,
                )?,
                prompt_until(
                    "Intent weight",
                    &format_weight(default_weights.intent_weight),
                    parse_weight,
                )?,
            );
            match weights.check().into_iter().next() {
                None => break weights,
                Some(e) => println!("  Invalid: {}. Try again.", e),
            }
        }
    } else {
        default_weights
    };

    // 2. Target stack
    println!();
    typewriter("The target stack is the set of technologies your product fits best with.");
    typewriter("Leads whose stack overlaps it more get a higher tech fit score.");
    let target_stack = prompt_until(
        "Target stack (comma-separated)",
        &default_target_stack().join(", "),
        parse_stack,
    )?;

    // 3. Minimum score
    println!();
    typewriter("Leads with a composite score below the minimum are hidden from lists and exports.");
    let min_score = prompt_until("Minimum score", "0", parse_min_score)?;

    // 4. Enrichment
    println!();
    typewriter("Missing job titles, stacks and intent can be filled with deterministic placeholder data.");
    typewriter("Turn this off once your CSVs carry real enrichment.");
    let placeholder = prompt_yes_no("Use placeholder enrichment?", true)?;

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        min_score: Some(min_score),
        scoring: Some(ScoringConfig {
            weights: Some(weights),
            target_stack: Some(target_stack),
            ..defaults
        }),
        enrichment: Some(EnrichmentConfig {
            placeholder: Some(placeholder),
            companies: None,
        }),
    };

    if let Err(errors) = config.validate() {
        anyhow::bail!("Generated config is invalid:\n  {}", errors.join("\n  "));
    }

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    typewriter("Title rules, intent thresholds and per-company enrichment can be edited directly in the file.");
    println!("Run `leadrank sample > leads.csv && leadrank list leads.csv` to try it out.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("0.5"), Ok(0.5));
        assert_eq!(parse_weight("0"), Ok(0.0));
        assert_eq!(parse_weight("1"), Ok(1.0));
        assert!(parse_weight("1.5").is_err());
        assert!(parse_weight("-0.1").is_err());
        assert!(parse_weight("NaN").is_err());
        assert!(parse_weight("heavy").is_err());
    }

    #[test]
    fn test_parse_min_score() {
        assert_eq!(parse_min_score("60"), Ok(60));
        assert_eq!(parse_min_score("100"), Ok(100));
        assert!(parse_min_score("101").is_err());
        assert!(parse_min_score("-1").is_err());
    }

    #[test]
    fn test_parse_stack() {
        assert_eq!(
            parse_stack("Salesforce, HubSpot,, "),
            Ok(vec!["Salesforce".to_string(), "HubSpot".to_string()])
        );
        assert!(parse_stack(" , ").is_err());
    }

    #[test]
    fn test_default_stack_answer_parses_back() {
        let default = default_target_stack().join(", ");
        assert_eq!(parse_stack(&default), Ok(default_target_stack()));
    }

    #[test]
    fn test_wizard_config_roundtrips() {
        let config = Config {
            min_score: Some(40),
            scoring: Some(ScoringConfig {
                weights: Some(ScoringWeights::new(0.5, 0.25, 0.25)),
                ..ScoringConfig::default()
            }),
            enrichment: Some(EnrichmentConfig {
                placeholder: Some(false),
                companies: None,
            }),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.validate().is_ok());
    }
}
