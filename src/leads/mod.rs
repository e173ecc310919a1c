pub mod profile;
pub mod reader;
pub mod sample;
pub mod types;

pub use profile::{CompanySize, Seniority};
pub use reader::{load_leads_csv, read_records, ColumnMap};
pub use sample::sample_csv;
pub use types::{clean_company_domain, is_valid_email, split_tech_stack, Lead, LeadRecord};
