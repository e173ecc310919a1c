pub mod bands;
pub mod config;
pub mod engine;
pub mod validation;

pub use bands::{IntentLevel, IntentSignal, TechFit, Tier};
pub use config::*;
pub use engine::{composite, ScoreEngine, ScoreResult};
pub use validation::validate_scoring;
