use super::{Enrichment, EnrichmentProvider};
use crate::leads::{split_tech_stack, CompanySize, Lead, Seniority};
use crate::scoring::IntentSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobCategory {
    DecisionMaker,
    Executive,
    Management,
    Technical,
    Other,
}

impl JobCategory {
    fn titles(&self) -> &'static [&'static str] {
        match self {
            JobCategory::DecisionMaker => &[
                "CEO",
                "Founder",
                "Co-Founder",
                "President",
                "VP Sales",
                "Chief Executive Officer",
                "Managing Director",
            ],
            JobCategory::Executive => &[
                "CTO",
                "VP Engineering",
                "Head of Engineering",
                "Director of Technology",
                "Chief Technology Officer",
                "VP of Product",
                "Head of IT",
            ],
            JobCategory::Management => &[
                "Engineering Manager",
                "Technical Lead",
                "Team Lead",
                "Principal Engineer",
                "Staff Engineer",
                "Senior Technical Lead",
            ],
            JobCategory::Technical => &[
                "Software Engineer",
                "Senior Software Engineer",
                "Full Stack Developer",
                "Frontend Developer",
                "Backend Developer",
                "DevOps Engineer",
                "Site Reliability Engineer",
                "Data Engineer",
                "Machine Learning Engineer",
            ],
            JobCategory::Other => &[
                "Technical Writer",
                "Recruiter",
                "Sales Representative",
                "Account Executive",
                "Customer Success Representative",
            ],
        }
    }
}

const TECH_STACKS: &[&str] = &[
    "React, Node.js, MongoDB",
    "Python, Django, PostgreSQL",
    "Java, Spring Boot, MySQL",
    "Vue.js, Express, Redis",
    "Angular, .NET, SQL Server",
    "Ruby on Rails, PostgreSQL",
    "PHP, Laravel, MySQL",
    "Go, Kubernetes, Docker",
    "Scala, Spark, Cassandra",
    "Swift, iOS, Firebase",
    "Kotlin, Android, SQLite",
    "TypeScript, Next.js, Prisma",
    "Python, AWS, Docker, Kubernetes",
    "React, AWS, Microservices, API",
];

/// Name prefixes and suffixes that suggest a technical role
const ACADEMIC_TITLES: &[&str] = &["dr", "prof", "phd"];

/// Highest engagement count the placeholder will invent
const MAX_ENGAGEMENT: u64 = 15;

/// Generates plausible, repeatable mock data for a lead.
///
/// Choices are driven by a stable hash of the email address, so the same
/// lead always receives the same title, stack and engagement count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEnricher;

impl PlaceholderEnricher {
    fn category(email: &str, name: &str, seed: u64) -> JobCategory {
        let local = email.split('@').next().unwrap_or_default().to_lowercase();
        let has_any = |patterns: &[&str]| patterns.iter().any(|p| local.contains(p));
        let academic = name
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|w| w.trim_matches('.').to_lowercase())
            .any(|w| ACADEMIC_TITLES.contains(&w.as_str()));

        if has_any(&["ceo", "founder", "president", "exec"]) {
            JobCategory::DecisionMaker
        } else if has_any(&["cto", "vp", "head", "director"]) {
            JobCategory::Executive
        } else if has_any(&["dev", "engineer", "tech", "code"]) {
            JobCategory::Technical
        } else if has_any(&["manager", "lead", "principal"]) {
            JobCategory::Management
        } else if academic {
            JobCategory::Technical
        } else {
            // 40% technical, 25% management, 15% executive, 10% decision maker, 10% other
            match seed % 100 {
                0..=39 => JobCategory::Technical,
                40..=64 => JobCategory::Management,
                65..=79 => JobCategory::Executive,
                80..=89 => JobCategory::DecisionMaker,
                _ => JobCategory::Other,
            }
        }
    }

    /// Seniority from the title words, otherwise Mid-level or Senior
    fn seniority(title: &str, seed: u64) -> Seniority {
        Seniority::from_title(title).unwrap_or(if seed % 2 == 0 {
            Seniority::MidLevel
        } else {
            Seniority::Senior
        })
    }

    fn company_size(domain: &str, seed: u64) -> CompanySize {
        if let Some(size) = CompanySize::from_domain(domain) {
            return size;
        }
        // 20% startup, 30% small, 30% medium, 15% large, 5% enterprise
        match seed % 100 {
            0..=19 => CompanySize::Startup,
            20..=49 => CompanySize::Small,
            50..=79 => CompanySize::Medium,
            80..=94 => CompanySize::Large,
            _ => CompanySize::Enterprise,
        }
    }
}

impl EnrichmentProvider for PlaceholderEnricher {
    fn lookup(&self, lead: &Lead) -> Enrichment {
        let email = lead.email.to_lowercase();
        let seed = stable_hash(&email);
        let titles = Self::category(&lead.email, &lead.name, seed).titles();
        let job_title = titles[((seed >> 8) % titles.len() as u64) as usize];
        let stack = TECH_STACKS[((seed >> 16) % TECH_STACKS.len() as u64) as usize];
        let engagement = (seed >> 24) % (MAX_ENGAGEMENT + 1);
        // The lead's own title wins over the generated one
        let title = lead.job_title.as_deref().unwrap_or(job_title);

        Enrichment {
            job_title: Some(job_title.to_string()),
            tech_stack: Some(split_tech_stack(stack)),
            intent_signal: Some(IntentSignal::Count(engagement as u32)),
            linkedin_url: linkedin_url(&lead.name),
            seniority_level: Some(Self::seniority(title, seed >> 32)),
            company_size: Some(Self::company_size(&lead.company_domain, seed >> 40)),
            phone: Some(phone_number(stable_hash(&format!("{}#phone", email)))),
        }
    }
}

/// A US-style number: area code and exchange in 200-999, line in 1000-9999
fn phone_number(seed: u64) -> String {
    let area = 200 + seed % 800;
    let exchange = 200 + (seed >> 16) % 800;
    let line = 1000 + (seed >> 32) % 9000;
    format!("+1 ({}) {}-{}", area, exchange, line)
}

/// Build a LinkedIn profile URL from a display name
pub fn linkedin_url(name: &str) -> Option<String> {
    let slug = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        None
    } else {
        Some(format!("https://linkedin.com/in/{}", slug))
    }
}

/// FNV-1a. Stable across runs and platforms, unlike `DefaultHasher`.
fn stable_hash(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
