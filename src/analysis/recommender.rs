//! Deterministic domain recommendation.
//!
//! Ranks domains by accumulated score and derives confidence and
//! internship-readiness figures from the totals alone.

use crate::catalog::{ContentTable, DomainCatalog, DomainContent};
use crate::models::{DomainTotals, RecommendationResult, RecommendationSource};
use tracing::debug;

/// Confidence is always reported within this range.
pub const CONFIDENCE_RANGE: (u8, u8) = (60, 95);

/// Readiness is always reported within this range.
pub const READINESS_RANGE: (u8, u8) = (40, 95);

/// Score-based recommender over a fixed domain catalog, backed by a static
/// content table.
#[derive(Debug, Clone)]
pub struct DomainRecommender {
    catalog: DomainCatalog,
    content: ContentTable,
}

impl DomainRecommender {
    pub fn new(catalog: DomainCatalog, content: ContentTable) -> Self {
        Self { catalog, content }
    }

    pub fn catalog(&self) -> &DomainCatalog {
        &self.catalog
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    /// Recommend the highest-scoring domain.
    ///
    /// Totals are first normalized onto the catalog, so ties always go to
    /// the domain declared first in the catalog regardless of how `totals`
    /// was built, and all-zero totals yield the first catalog domain.
    pub fn recommend(&self, totals: &DomainTotals) -> RecommendationResult {
        let totals = self.catalog.normalize(totals);
        let top = rank_domains(&totals)
            .first()
            .map(|(d, s)| (d.to_string(), *s));
        let (domain, top_score) = top.unwrap_or_default();
        debug!("Top domain {} with {} points", domain, top_score);

        let explanation = match self.content.get(&domain) {
            Some(content) => format!(
                "Based on your quiz answers and game performance, you show strong alignment with {}. \
                 Your responses indicate good problem-solving skills and interest in this domain.",
                content.title
            ),
            None => String::new(),
        };
        let (roadmap_steps, resource_list) = self.content_lists(&domain);

        RecommendationResult {
            confidence: confidence(top_score, totals.max()),
            readiness: readiness(totals.sum()),
            recommended_domain: domain,
            explanation,
            roadmap_steps,
            resource_list,
            source: RecommendationSource::Heuristic,
        }
    }

    /// Roadmap and resources for `domain`, empty when the table has no entry.
    pub fn content_lists(&self, domain: &str) -> (Vec<String>, Vec<String>) {
        match self.content.get(domain) {
            Some(DomainContent {
                roadmap, resources, ..
            }) => (roadmap.clone(), resources.clone()),
            None => (Vec::new(), Vec::new()),
        }
    }
}

impl Default for DomainRecommender {
    fn default() -> Self {
        Self::new(DomainCatalog::default(), ContentTable::builtin())
    }
}

/// Domains sorted by score descending; the sort is stable so ties keep
/// their order in `totals`.
pub fn rank_domains(totals: &DomainTotals) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = totals.iter().collect();
    ranked.sort_by_key(|(_, score)| std::cmp::Reverse(*score));
    ranked
}

/// `round(100 * top / max(1, max))`, clamped to [`CONFIDENCE_RANGE`].
pub fn confidence(top_score: u32, max_score: u32) -> u8 {
    let ratio = 100.0 * f64::from(top_score) / f64::from(max_score.max(1));
    let (lo, hi) = CONFIDENCE_RANGE;
    ratio.round().clamp(f64::from(lo), f64::from(hi)) as u8
}

/// `sum * 2`, clamped to [`READINESS_RANGE`].
pub fn readiness(sum: u64) -> u8 {
    let (lo, hi) = READINESS_RANGE;
    sum.saturating_mul(2).clamp(u64::from(lo), u64::from(hi)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_DOMAINS;
    use crate::scoring::ScoreLedger;

    fn totals(pairs: &[(&str, u32)]) -> DomainTotals {
        DomainTotals::from_pairs(pairs.iter().copied())
    }

    fn abc() -> DomainRecommender {
        DomainRecommender::new(DomainCatalog::new(["A", "B", "C"]), ContentTable::builtin())
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let recommender = abc();
        let t = totals(&[("A", 10), ("B", 10), ("C", 5)]);
        for _ in 0..10 {
            assert_eq!(recommender.recommend(&t).recommended_domain, "A");
        }
    }

    #[test]
    fn test_tie_break_ignores_totals_order() {
        let recommender = abc();
        let forward = recommender.recommend(&totals(&[("A", 10), ("B", 10), ("C", 5)]));
        let reversed = recommender.recommend(&totals(&[("C", 5), ("B", 10), ("A", 10)]));
        assert_eq!(forward, reversed);
        assert_eq!(reversed.recommended_domain, "A");

        let result = DomainRecommender::default().recommend(&totals(&[("Cloud", 10), ("SDE", 10)]));
        assert_eq!(result.recommended_domain, "SDE");
    }

    #[test]
    fn test_unknown_domains_are_ignored() {
        let result =
            DomainRecommender::default().recommend(&totals(&[("Astronaut", 50), ("SDE", 1)]));
        assert_eq!(result.recommended_domain, "SDE");
        assert_eq!(result.readiness, 40);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = DomainRecommender::default();
        let t = totals(&[("SDE", 7), ("Cloud", 11), ("Tester", 11)]);
        let first = recommender.recommend(&t);
        let second = recommender.recommend(&t);
        assert_eq!(first, second);
        assert_eq!(first.recommended_domain, "Cloud");
    }

    #[test]
    fn test_sde_scenario() {
        let mut pairs: Vec<(&str, u32)> = DEFAULT_DOMAINS.iter().map(|d| (*d, 0)).collect();
        for (domain, score) in pairs.iter_mut() {
            match *domain {
                "SDE" => *score = 20,
                "Cybersecurity" => *score = 5,
                _ => {}
            }
        }
        let result = DomainRecommender::default().recommend(&totals(&pairs));

        assert_eq!(result.recommended_domain, "SDE");
        assert_eq!(result.confidence, 95);
        assert_eq!(result.readiness, 50);
        assert_eq!(result.source, RecommendationSource::Heuristic);
        assert!(result.explanation.contains("Software Development Engineer"));
        assert_eq!(result.roadmap_steps[0], "Master Data Structures & Algorithms");
        assert_eq!(result.resource_list.len(), 4);
    }

    #[test]
    fn test_empty_ledger_scenario() {
        let ledger = ScoreLedger::new(DomainCatalog::default());
        let result = DomainRecommender::default().recommend(&ledger.current_totals());

        assert_eq!(result.recommended_domain, DEFAULT_DOMAINS[0]);
        assert_eq!(result.confidence, 60);
        assert_eq!(result.readiness, 40);
    }

    #[test]
    fn test_domain_without_content_has_empty_lists() {
        let recommender = DomainRecommender::new(
            DomainCatalog::new(["Astronaut", "SDE"]),
            ContentTable::builtin(),
        );
        let result = recommender.recommend(&totals(&[("Astronaut", 3)]));
        assert_eq!(result.recommended_domain, "Astronaut");
        assert!(result.explanation.is_empty());
        assert!(result.roadmap_steps.is_empty());
        assert!(result.resource_list.is_empty());
    }

    #[test]
    fn test_metrics_stay_in_range() {
        let samples: &[&[(&str, u32)]] = &[
            &[("A", 0), ("B", 0)],
            &[("A", 1), ("B", 0)],
            &[("A", 0), ("B", 1_000_000)],
            &[("A", u32::MAX), ("B", u32::MAX)],
            &[("A", 3), ("B", 4), ("C", 5)],
        ];
        let recommender = abc();
        for sample in samples {
            let result = recommender.recommend(&totals(sample));
            assert!((60..=95).contains(&result.confidence), "{:?}", sample);
            assert!((40..=95).contains(&result.readiness), "{:?}", sample);
        }
    }

    #[test]
    fn test_confidence_and_readiness_formulas() {
        assert_eq!(confidence(0, 0), 60);
        assert_eq!(confidence(20, 20), 95);
        assert_eq!(confidence(70, 100), 70);
        assert_eq!(readiness(0), 40);
        assert_eq!(readiness(25), 50);
        assert_eq!(readiness(1_000), 95);
    }

    #[test]
    fn test_rank_domains_orders_by_score() {
        let t = totals(&[("A", 1), ("B", 9), ("C", 4)]);
        let ranked: Vec<_> = rank_domains(&t).into_iter().map(|(d, _)| d).collect();
        assert_eq!(ranked, vec!["B", "C", "A"]);
    }
}
