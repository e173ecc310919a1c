use anyhow::{Context, Result};

const SAMPLE_LEADS: [(&str, &str, &str); 10] = [
    ("John Smith", "john.smith@techcorp.com", "techcorp.com"),
    ("Sarah Johnson", "sarah.j@innovatesoft.io", "innovatesoft.io"),
    ("Michael Chen", "m.chen@dataworks.net", "dataworks.net"),
    ("Emily Rodriguez", "emily@startupco.com", "startupco.com"),
    ("David Wilson", "dwilson@enterprise-solutions.com", "enterprise-solutions.com"),
    ("Lisa Anderson", "l.anderson@cloudtech.org", "cloudtech.org"),
    ("Robert Taylor", "rtaylor@devops-pro.com", "devops-pro.com"),
    ("Jennifer Lee", "jennifer.lee@aicompany.io", "aicompany.io"),
    ("Mark Thompson", "mark@scalable-systems.net", "scalable-systems.net"),
    ("Amanda Davis", "a.davis@fintech-innovate.com", "fintech-innovate.com"),
];

/// Minimal demo CSV with only the required columns
pub fn sample_csv() -> Result<String> {
    let mut csv = csv::Writer::from_writer(Vec::new());
    csv.write_record(["name", "email", "company_domain"])
        .context("Failed to write sample header")?;
    for (name, email, domain) in SAMPLE_LEADS {
        csv.write_record([name, email, domain])
            .context("Failed to write sample row")?;
    }
    let bytes = csv
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish sample CSV: {}", e))?;
    String::from_utf8(bytes).context("Sample CSV is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{read_records, Lead};

    #[test]
    fn test_sample_is_readable_and_valid() {
        let csv = sample_csv().unwrap();
        assert!(csv.starts_with("name,email,company_domain\n"));

        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 10);
        for record in records {
            assert!(Lead::try_from(record).is_ok());
        }
    }
}
