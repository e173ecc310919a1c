pub mod browser;
pub mod config;
pub mod enrich;
pub mod error;
pub mod leads;
pub mod output;
pub mod pipeline;
pub mod scoring;
