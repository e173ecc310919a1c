use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use leadrank::config::Config;
use leadrank::enrich::ChainedEnricher;
use leadrank::pipeline::{self, ScoredBatch};
use leadrank::scoring::{ScoreEngine, ScoringWeights};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_BROWSER: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List leads ranked by composite score
    List {
        /// Lead CSV file ("-" reads stdin)
        csv: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show lead quality metrics for a CSV
    Summary {
        /// Lead CSV file ("-" reads stdin)
        csv: PathBuf,

        /// Print metrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the enriched, scored leads to a CSV file
    Export {
        /// Lead CSV file ("-" reads stdin)
        csv: PathBuf,

        /// Output path ("-" for stdout, defaults to scored_leads_<timestamp>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Open a lead's profile in the browser by its index number
    Open {
        /// Lead CSV file ("-" reads stdin)
        csv: PathBuf,

        /// Index number of the lead to open (1-based, as shown in list)
        index: usize,
    },
    /// Print a sample lead CSV
    Sample,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "leadrank")]
#[command(about = "Lead enrichment and scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/leadrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the job title weight (0-1)
    #[arg(long, global = true)]
    job_title_weight: Option<f64>,

    /// Override the tech fit weight (0-1)
    #[arg(long, global = true)]
    tech_fit_weight: Option<f64>,

    /// Override the intent weight (0-1)
    #[arg(long, global = true)]
    intent_weight: Option<f64>,

    /// Override the target technology stack (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    target_stack: Option<Vec<String>>,

    /// Hide leads scoring below this value
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Do not fill missing fields with placeholder enrichment
    #[arg(long, global = true)]
    no_placeholder: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "leadrank=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config_or_exit(cli: &Cli) -> Config {
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let config = match leadrank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    config
}

/// Read, enrich and score a lead file, exiting on input or config errors.
fn score_file_or_exit(cli: &Cli, config: &Config, csv: &Path) -> ScoredBatch {
    let start_time = Instant::now();

    let scoring = config.scoring.clone().unwrap_or_default();
    let mut engine = ScoreEngine::from_config(&scoring);
    if let Some(stack) = &cli.target_stack {
        engine = engine.with_target_stack(stack);
    }
    let weights = scoring.weights.unwrap_or_default().with_overrides(
        cli.job_title_weight,
        cli.tech_fit_weight,
        cli.intent_weight,
    );

    let enrichment = config.enrichment.clone().unwrap_or_default();
    let placeholder = enrichment.placeholder_enabled() && !cli.no_placeholder;
    let enricher = ChainedEnricher::from_config(&enrichment, placeholder);

    let records = if csv.as_os_str() == "-" {
        leadrank::leads::read_records(std::io::stdin().lock())
    } else {
        leadrank::leads::load_leads_csv(csv)
    };
    let records = match records {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        eprintln!("Loaded {} rows from {}", records.len(), csv.display());
        print_weights(&weights);
    }

    let batch = match pipeline::score_leads(records, &enricher, &engine, &weights) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if !batch.rejected.is_empty() {
        eprintln!("{}", leadrank::output::format_row_errors(&batch.rejected));
    }
    if cli.verbose {
        eprintln!(
            "Scored {} leads ({} rejected) in {:?}",
            batch.scored.len(),
            batch.rejected.len(),
            start_time.elapsed()
        );
    }
    batch
}

fn print_weights(weights: &ScoringWeights) {
    eprintln!(
        "Weights: job_title={} tech_fit={} intent={}",
        weights.job_title_weight, weights.tech_fit_weight, weights.intent_weight
    );
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Sample => match leadrank::leads::sample_csv() {
            Ok(csv) => print!("{}", csv),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Commands::Init => {
            let path = cli.config.as_ref().map(PathBuf::from);
            if let Err(e) = leadrank::config::init::run_init_wizard(path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Summary { csv, json } => {
            let config = load_config_or_exit(&cli);
            let batch = score_file_or_exit(&cli, &config, csv);
            let metrics = leadrank::output::calculate_metrics(&batch);

            if *json {
                match serde_json::to_string_pretty(&metrics) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize summary: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                let use_colors = leadrank::output::should_use_colors();
                println!("{}", leadrank::output::format_summary(&metrics, use_colors));
            }
        }
        Commands::List { csv, format } => {
            let config = load_config_or_exit(&cli);
            let leads = ranked_leads(&cli, &config, csv);

            match format {
                Format::Table => {
                    let use_colors = leadrank::output::should_use_colors();
                    if cli.verbose && !leads.is_empty() {
                        for scored in &leads {
                            println!(
                                "{}",
                                leadrank::output::format_lead_detail(scored, use_colors)
                            );
                            println!();
                        }
                    } else {
                        println!(
                            "{}",
                            leadrank::output::format_scored_table(&leads, use_colors)
                        );
                    }
                }
                Format::Tsv => {
                    if !leads.is_empty() {
                        println!("{}", leadrank::output::format_tsv(&leads));
                    }
                }
                Format::Json => match leadrank::output::format_json(&leads) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            }
        }
        Commands::Export { csv, output } => {
            let config = load_config_or_exit(&cli);
            let leads = ranked_leads(&cli, &config, csv);

            let result = match output.as_deref() {
                Some("-") => {
                    leadrank::output::write_csv(std::io::stdout().lock(), &leads)
                }
                other => {
                    let path = other.map(PathBuf::from).unwrap_or_else(|| {
                        leadrank::output::default_export_path(chrono::Local::now())
                    });
                    leadrank::output::export_csv(&path, &leads).map(|_| {
                        eprintln!("Exported {} leads to {}", leads.len(), path.display());
                    })
                }
            };
            if let Err(e) = result {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Open { csv, index } => {
            let config = load_config_or_exit(&cli);
            let leads = ranked_leads(&cli, &config, csv);

            if *index < 1 || *index > leads.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    leads.len()
                );
                std::process::exit(EXIT_INPUT);
            }

            let scored = &leads[index - 1];
            if let Err(e) = leadrank::browser::open_profile(scored) {
                eprintln!("Failed to open browser: {:#}", e);
                std::process::exit(EXIT_BROWSER);
            }

            if let Some(url) = &scored.lead.linkedin_url {
                println!("Opening profile for {} in browser: {}", scored.lead.name, url);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Score, rank and apply the minimum score filter
fn ranked_leads(cli: &Cli, config: &Config, csv: &Path) -> Vec<pipeline::ScoredLead> {
    let mut batch = score_file_or_exit(cli, config, csv);
    pipeline::rank(&mut batch.scored);

    let min_score = cli.min_score.or(config.min_score).unwrap_or(0);
    let total = batch.scored.len();
    let leads = pipeline::filter_min_score(batch.scored, min_score);
    if cli.verbose && leads.len() < total {
        eprintln!(
            "Hid {} leads below minimum score {}",
            total - leads.len(),
            min_score
        );
    }
    leads
}
