pub mod export;
pub mod formatter;
pub mod summary;

pub use export::{default_export_path, export_csv, write_csv};
pub use formatter::{
    format_json, format_lead_detail, format_row_errors, format_scored_table, format_tsv,
    should_use_colors, Quality,
};
pub use summary::{calculate_metrics, format_summary, QualityMetrics};
