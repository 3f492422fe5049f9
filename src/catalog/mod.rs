//! Static assessment content.
//!
//! The domain enumeration, the per-domain content table (titles,
//! roadmaps, resources), the quiz and game definitions and the
//! internship listings.

pub mod internships;
pub mod quiz;

pub use internships::{domain_skills, find_internship, internships, Internship};
pub use quiz::{find_game, find_question, game_result, games, questions, quiz_answer};

use crate::models::DomainTotals;
use std::collections::HashMap;

/// Default career domains, in tie-break order.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "SDE",
    "Data Analyst",
    "Cybersecurity",
    "Cloud",
    "Tester",
    "Product Manager",
];

/// The fixed, ordered set of domains a ledger may track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCatalog {
    domains: Vec<String>,
}

impl DomainCatalog {
    /// Create a catalog from domain names; declaration order is preserved
    /// and later duplicates are dropped.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.into();
            if !unique.contains(&domain) {
                unique.push(domain);
            }
        }
        Self { domains: unique }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// Domain names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Match a free-form label against the catalog keys, ignoring case
    /// and surrounding whitespace.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        self.iter().find(|d| d.eq_ignore_ascii_case(label))
    }

    /// Re-key `totals` onto the catalog: catalog order, zero for missing
    /// domains, unknown domains dropped.
    pub fn normalize(&self, totals: &DomainTotals) -> DomainTotals {
        DomainTotals::from_pairs(self.iter().map(|d| (d, totals.get(d).unwrap_or(0))))
    }
}

impl Default for DomainCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAINS.iter().copied())
    }
}

/// Display copy for a single domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainContent {
    /// Human-readable role title.
    pub title: String,
    pub roadmap: Vec<String>,
    pub resources: Vec<String>,
}

/// Per-domain content, keyed by catalog domain name.
#[derive(Debug, Clone, Default)]
pub struct ContentTable {
    entries: HashMap<String, DomainContent>,
}

impl ContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the content for a domain.
    pub fn insert(&mut self, domain: impl Into<String>, content: DomainContent) {
        self.entries.insert(domain.into(), content);
    }

    pub fn get(&self, domain: &str) -> Option<&DomainContent> {
        self.entries.get(domain)
    }

    /// Find the domain whose title matches `title`, ignoring case.
    pub fn domain_by_title(&self, title: &str) -> Option<&str> {
        let title = title.trim();
        self.entries
            .iter()
            .find(|(_, c)| c.title.eq_ignore_ascii_case(title))
            .map(|(d, _)| d.as_str())
    }

    /// The built-in table covering [`DEFAULT_DOMAINS`].
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (domain, title, roadmap, resources) in BUILTIN_CONTENT {
            table.insert(
                *domain,
                DomainContent {
                    title: title.to_string(),
                    roadmap: roadmap.iter().map(|s| s.to_string()).collect(),
                    resources: resources.iter().map(|s| s.to_string()).collect(),
                },
            );
        }
        table
    }
}

type ContentRow = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
);

const BUILTIN_CONTENT: &[ContentRow] = &[
    (
        "SDE",
        "Software Development Engineer",
        &[
            "Master Data Structures & Algorithms",
            "Learn System Design Basics",
            "Build 3 Full-Stack Projects",
            "Practice Coding Interviews",
        ],
        &[
            "FreeCodeCamp - Full Stack Development",
            "LeetCode - Algorithm Practice",
            "System Design Primer (GitHub)",
            "CS50 - Computer Science Fundamentals",
        ],
    ),
    (
        "Data Analyst",
        "Data Analyst",
        &[
            "Master SQL and Database Concepts",
            "Learn Python/R for Data Analysis",
            "Study Statistics and Data Visualization",
            "Build Portfolio with Real Datasets",
        ],
        &[
            "Kaggle Learn - Data Analysis",
            "Python for Data Analysis (Book)",
            "Tableau Public - Visualization",
            "Google Analytics Academy",
        ],
    ),
    (
        "Cybersecurity",
        "Cybersecurity Specialist",
        &[
            "Learn Network Security Fundamentals",
            "Study Ethical Hacking Techniques",
            "Get Security Certifications (CompTIA)",
            "Practice on Capture The Flag Platforms",
        ],
        &[
            "Cybrary - Free Security Training",
            "OWASP - Web Security",
            "TryHackMe - Hands-on Practice",
            "SANS Reading Room",
        ],
    ),
    (
        "Cloud",
        "Cloud Engineer",
        &[
            "Learn AWS/Azure/GCP Fundamentals",
            "Master Infrastructure as Code",
            "Study DevOps and CI/CD Pipelines",
            "Get Cloud Certifications",
        ],
        &[
            "AWS Free Tier - Hands-on Practice",
            "Terraform Documentation",
            "Docker and Kubernetes Tutorials",
            "Cloud Guru - Certification Prep",
        ],
    ),
    (
        "Tester",
        "Quality Assurance Engineer",
        &[
            "Learn Manual Testing Fundamentals",
            "Master Test Automation Tools",
            "Study API and Performance Testing",
            "Build Testing Framework Projects",
        ],
        &[
            "Selenium WebDriver Documentation",
            "Postman API Testing",
            "JMeter Performance Testing",
            "TestNG/JUnit Frameworks",
        ],
    ),
    (
        "Product Manager",
        "Product Manager",
        &[
            "Learn Product Strategy and Roadmapping",
            "Study User Research and Analytics",
            "Master Agile and Scrum Methodologies",
            "Build Product Case Studies",
        ],
        &[
            "Product School - PM Courses",
            "Google Analytics Certification",
            "Figma - Design Collaboration",
            "Mixpanel - Product Analytics",
        ],
    ),
];
