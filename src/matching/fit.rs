//! Deterministic internship fit scoring.

use crate::catalog::{domain_skills, Internship};

/// Fit is always reported within this range.
pub const FIT_RANGE: (u8, u8) = (25, 100);

/// Fit reported when there are no skills to compare against.
pub const NEUTRAL_FIT: u8 = 50;

/// Added when a listing belongs to the profile's domain.
pub const DOMAIN_BONUS: u32 = 10;

/// Skills and target domain a listing is scored against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillProfile {
    skills: Vec<String>,
    domain: Option<String>,
}

impl SkillProfile {
    /// Blank skills are dropped. With no skills left, the domain's skill
    /// profile stands in.
    pub fn new<I, S>(skills: I, domain: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills: Vec<String> = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if skills.is_empty() {
            if let Some(domain) = domain {
                skills = domain_skills(domain).iter().map(|s| s.to_string()).collect();
            }
        }

        Self {
            skills,
            domain: domain.map(str::to_string),
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Share of the listing's skills the profile covers, as a percentage,
    /// plus [`DOMAIN_BONUS`] for a domain match, clamped to [`FIT_RANGE`].
    pub fn fit(&self, listing: &Internship) -> u8 {
        let base = if self.skills.is_empty() || listing.skills.is_empty() {
            u32::from(NEUTRAL_FIT)
        } else {
            let matched = listing
                .skills
                .iter()
                .filter(|skill| self.skills.iter().any(|own| skills_match(skill, own)))
                .count() as u32;
            let total = listing.skills.len() as u32;
            (matched * 100 + total / 2) / total
        };

        let bonus = match self.domain() {
            Some(domain) if domain == listing.domain => DOMAIN_BONUS,
            _ => 0,
        };

        let (lo, hi) = FIT_RANGE;
        (base + bonus).clamp(u32::from(lo), u32::from(hi)) as u8
    }
}

/// Case-insensitive containment in either direction, so "React" matches
/// "React Native" and "SQL" matches "PostgreSQL".
fn skills_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// A listing with its fit for one profile.
#[derive(Debug, Clone, Copy)]
pub struct RankedInternship {
    pub internship: &'static Internship,
    pub fit: u8,
}

/// Listings sorted by fit descending; ties keep listing order.
pub fn rank_internships(
    listings: &'static [Internship],
    profile: &SkillProfile,
) -> Vec<RankedInternship> {
    let mut ranked: Vec<RankedInternship> = listings
        .iter()
        .map(|internship| RankedInternship {
            internship,
            fit: profile.fit(internship),
        })
        .collect();
    ranked.sort_by_key(|r| std::cmp::Reverse(r.fit));
    ranked
}
