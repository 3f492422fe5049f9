//! Data models for the career assessment.
//!
//! This module contains the core data structures shared by the ledger,
//! the recommender, the orchestrator and the report generator.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Per-domain score contribution of a single event.
pub type DomainDelta = BTreeMap<String, u32>;

/// One answered quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswerEvent {
    /// Identifier of the question being answered.
    pub question_id: u32,
    /// Index of the chosen option within the question.
    pub chosen_option_index: usize,
    /// Text of the chosen option.
    pub answer: String,
    /// Score added to each domain by this answer.
    pub per_domain_delta: DomainDelta,
}

/// The result of one mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScoreEvent {
    /// Identifier of the game.
    pub game_id: String,
    /// Performance score, 0 to 100.
    pub score: u8,
    /// Score added to each domain by this result.
    pub per_domain_delta: DomainDelta,
}

/// Accumulated score per domain, in catalog order.
///
/// The order of entries is the tie-break order used by the recommender.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainTotals {
    entries: Vec<(String, u32)>,
}

impl DomainTotals {
    /// Build totals from `(domain, score)` pairs, keeping their order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(d, s)| (d.into(), s)).collect(),
        }
    }

    /// Score for a domain, or `None` if the domain is not tracked.
    pub fn get(&self, domain: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, s)| *s)
    }

    /// Iterate `(domain, score)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(d, s)| (d.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all domain scores.
    pub fn sum(&self) -> u64 {
        self.entries.iter().map(|(_, s)| u64::from(*s)).sum()
    }

    /// Highest single domain score (0 when empty).
    pub fn max(&self) -> u32 {
        self.entries.iter().map(|(_, s)| *s).max().unwrap_or(0)
    }
}

impl Serialize for DomainTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (domain, score) in &self.entries {
            map.serialize_entry(domain, score)?;
        }
        map.end()
    }
}

/// Which path produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Deterministic score-based heuristic.
    Heuristic,
    /// Refined by the generative-language service.
    External,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationSource::Heuristic => write!(f, "Heuristic"),
            RecommendationSource::External => write!(f, "AI-assisted"),
        }
    }
}

/// A career recommendation derived from domain totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Recommended domain (a catalog key).
    pub recommended_domain: String,
    /// Confidence percentage, 0 to 100.
    pub confidence: u8,
    /// Internship readiness percentage, 0 to 100.
    pub readiness: u8,
    /// Short explanation of the pick.
    pub explanation: String,
    /// Ordered learning roadmap for the domain.
    pub roadmap_steps: Vec<String>,
    /// Suggested learning resources for the domain.
    pub resource_list: Vec<String>,
    /// Path that produced this result.
    pub source: RecommendationSource,
}

/// Coarse grading of the average mini-game score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Strong,
    Solid,
    Developing,
}

impl PerformanceTier {
    /// Tier for an average game score, `None` when no game was played.
    pub fn from_average(average: Option<f64>) -> Option<Self> {
        let avg = average?;
        Some(if avg >= 80.0 {
            PerformanceTier::Strong
        } else if avg >= 65.0 {
            PerformanceTier::Solid
        } else {
            PerformanceTier::Developing
        })
    }

    /// Advice line shown next to the tier.
    pub fn advice(&self, domain: &str) -> String {
        match self {
            PerformanceTier::Strong => format!(
                "You show great potential in {}. You're ready for intermediate-level challenges.",
                domain
            ),
            PerformanceTier::Solid => format!(
                "You have a good foundation in {}. Focus on building practical projects.",
                domain
            ),
            PerformanceTier::Developing => format!(
                "There is room for growth in {}. Consider starting with fundamentals.",
                domain
            ),
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Strong => write!(f, "Strong"),
            PerformanceTier::Solid => write!(f, "Solid"),
            PerformanceTier::Developing => write!(f, "Developing"),
        }
    }
}

/// Metadata about an assessment report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Date and time of the assessment.
    pub assessment_date: DateTime<Utc>,
    /// Model consulted, or "heuristic" when none was.
    pub model_used: String,
    /// Number of quiz questions answered.
    pub questions_answered: usize,
    /// Number of games played.
    pub games_played: usize,
    /// Duration of the analysis step in seconds.
    pub duration_seconds: f64,
}

/// The complete assessment report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Domain totals at the time of analysis.
    pub totals: DomainTotals,
    /// Final recommendation.
    pub recommendation: RecommendationResult,
    /// Retained quiz answers.
    pub quiz_answers: Vec<QuizAnswerEvent>,
    /// Retained game results.
    pub game_results: Vec<GameScoreEvent>,
    /// Average game score, if any game was played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_game_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_tier: Option<PerformanceTier>,
}
