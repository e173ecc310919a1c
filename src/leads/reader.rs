use anyhow::{bail, Context, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::LeadRecord;

const NAME_ALIASES: &[&str] = &["name", "full_name", "contact_name", "lead_name"];
const EMAIL_ALIASES: &[&str] = &["email", "email_address", "contact_email"];
const DOMAIN_ALIASES: &[&str] = &[
    "company_domain",
    "domain",
    "website",
    "company_website",
    "company",
];
const JOB_TITLE_ALIASES: &[&str] = &["job_title", "title", "role"];
const TECH_STACK_ALIASES: &[&str] = &["tech_stack", "technologies", "stack"];
const INTENT_ALIASES: &[&str] = &["intent_signal", "intent", "engagement"];
const LINKEDIN_ALIASES: &[&str] = &["linkedin_url", "linkedin"];
const SENIORITY_ALIASES: &[&str] = &["seniority_level", "seniority"];
const COMPANY_SIZE_ALIASES: &[&str] = &["company_size", "size"];
const PHONE_ALIASES: &[&str] = &["phone", "phone_number"];

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub name: usize,
    pub email: usize,
    pub company_domain: usize,
    pub job_title: Option<usize>,
    pub tech_stack: Option<usize>,
    pub intent_signal: Option<usize>,
    pub linkedin_url: Option<usize>,
    pub seniority_level: Option<usize>,
    pub company_size: Option<usize>,
    pub phone: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns by case-insensitive alias. Required columns must exist.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase().replace([' ', '-'], "_"))
            .collect();

        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };

        let mut missing = Vec::new();
        let name = find(NAME_ALIASES);
        let email = find(EMAIL_ALIASES);
        let company_domain = find(DOMAIN_ALIASES);
        if name.is_none() {
            missing.push("name");
        }
        if email.is_none() {
            missing.push("email");
        }
        if company_domain.is_none() {
            missing.push("company_domain");
        }

        match (name, email, company_domain) {
            (Some(name), Some(email), Some(company_domain)) => Ok(Self {
                name,
                email,
                company_domain,
                job_title: find(JOB_TITLE_ALIASES),
                tech_stack: find(TECH_STACK_ALIASES),
                intent_signal: find(INTENT_ALIASES),
                linkedin_url: find(LINKEDIN_ALIASES),
                seniority_level: find(SENIORITY_ALIASES),
                company_size: find(COMPANY_SIZE_ALIASES),
                phone: find(PHONE_ALIASES),
            }),
            _ => bail!("Missing required column(s): {}", missing.join(", ")),
        }
    }

    fn extract(&self, row: &StringRecord) -> LeadRecord {
        let cell = |idx: usize| row.get(idx).map(str::to_string);
        let optional = |idx: Option<usize>| idx.and_then(cell);
        LeadRecord {
            name: cell(self.name),
            email: cell(self.email),
            company_domain: cell(self.company_domain),
            job_title: optional(self.job_title),
            tech_stack: optional(self.tech_stack),
            intent_signal: optional(self.intent_signal),
            linkedin_url: optional(self.linkedin_url),
            seniority_level: optional(self.seniority_level),
            company_size: optional(self.company_size),
            phone: optional(self.phone),
        }
    }
}

/// Read lead rows from any CSV source. Rows stay in file order.
pub fn read_records<R: Read>(source: R) -> Result<Vec<LeadRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("Failed to read CSV header row")?.clone();
    let columns = ColumnMap::from_headers(&headers)?;
    tracing::debug!("Resolved CSV columns: {:?}", columns);

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to parse CSV row {}", i + 1))?;
        records.push(columns.extract(&row));
    }
    Ok(records)
}

/// Read lead rows from a CSV file
pub fn load_leads_csv(path: &Path) -> Result<Vec<LeadRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open lead file at {}", path.display()))?;
    let records = read_records(file)
        .with_context(|| format!("Failed to load leads from {}", path.display()))?;
    tracing::info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_required_columns() {
        let csv = "name,email,company_domain\nJohn Smith,john@techcorp.com,techcorp.com\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("John Smith"));
        assert_eq!(records[0].company_domain.as_deref(), Some("techcorp.com"));
        assert!(records[0].job_title.is_none());
    }

    #[test]
    fn test_header_aliases() {
        let csv = "Full_Name,Email Address,Website\nJane,jane@a.io,https://a.io\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].name.as_deref(), Some("Jane"));
        assert_eq!(records[0].email.as_deref(), Some("jane@a.io"));
        assert_eq!(records[0].company_domain.as_deref(), Some("https://a.io"));
    }

    #[test]
    fn test_optional_columns() {
        let csv = "name,email,domain,title,tech_stack,intent\n\
                   Sam,sam@x.com,x.com,VP of Sales,\"Salesforce, HubSpot\",high\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].job_title.as_deref(), Some("VP of Sales"));
        assert_eq!(records[0].tech_stack.as_deref(), Some("Salesforce, HubSpot"));
        assert_eq!(records[0].intent_signal.as_deref(), Some("high"));
        assert!(records[0].linkedin_url.is_none());
    }

    #[test]
    fn test_profile_columns() {
        let csv = "name,email,company_domain,Seniority,Company Size,Phone Number\n\
                   Sam,sam@x.com,x.com,Senior,Large,+1 (212) 555-0199\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].seniority_level.as_deref(), Some("Senior"));
        assert_eq!(records[0].company_size.as_deref(), Some("Large"));
        assert_eq!(records[0].phone.as_deref(), Some("+1 (212) 555-0199"));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "name,company_domain\nJohn,techcorp.com\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_short_row_leaves_cells_empty() {
        let csv = "name,email,company_domain\nJohn\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].name.as_deref(), Some("John"));
        assert!(records[0].email.is_none());
    }

    #[test]
    fn test_header_only_file() {
        let csv = "name,email,company_domain\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_preserves_row_order() {
        let csv = "name,email,company_domain\nA,a@a.io,a.io\nB,b@b.io,b.io\nC,c@c.io,c.io\n";
        let names: Vec<_> = read_records(csv.as_bytes())
            .unwrap()
            .into_iter()
            .filter_map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_leads_csv(Path::new("/nonexistent/leads.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open lead file"));
    }
}
