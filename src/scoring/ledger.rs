//! Per-session score ledger.
//!
//! The ledger retains the latest quiz answer per question and the latest
//! result per game, and derives domain totals from those retained events.
//! Re-recording a key replaces its earlier contribution.

use crate::catalog::DomainCatalog;
use crate::models::{DomainDelta, DomainTotals, GameScoreEvent, QuizAnswerEvent};
use thiserror::Error;
use tracing::debug;

/// Errors raised when mutating the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A delta referenced a domain outside the catalog.
    #[error("invalid domain key '{0}': not part of the domain catalog")]
    InvalidDomainKey(String),
}

/// Accumulates per-domain scores for one assessment session.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    catalog: DomainCatalog,
    answers: Vec<QuizAnswerEvent>,
    games: Vec<GameScoreEvent>,
}

impl ScoreLedger {
    /// Create an empty ledger over the given catalog.
    pub fn new(catalog: DomainCatalog) -> Self {
        Self {
            catalog,
            answers: Vec::new(),
            games: Vec::new(),
        }
    }

    /// Record a quiz answer, replacing any earlier answer to the same question.
    pub fn record_quiz_answer(&mut self, event: QuizAnswerEvent) -> Result<(), LedgerError> {
        self.validate(&event.per_domain_delta)?;
        debug!(
            "Recording answer {} for question {}",
            event.chosen_option_index, event.question_id
        );
        self.answers.retain(|a| a.question_id != event.question_id);
        self.answers.push(event);
        Ok(())
    }

    /// Record a game result, replacing any earlier result for the same game.
    ///
    /// Scores above 100 are clamped to 100.
    pub fn record_game_score(&mut self, mut event: GameScoreEvent) -> Result<(), LedgerError> {
        self.validate(&event.per_domain_delta)?;
        event.score = event.score.min(100);
        debug!("Recording score {} for game {}", event.score, event.game_id);
        self.games.retain(|g| g.game_id != event.game_id);
        self.games.push(event);
        Ok(())
    }

    /// Current totals for every catalog domain, in catalog order.
    pub fn current_totals(&self) -> DomainTotals {
        let deltas = self
            .answers
            .iter()
            .map(|a| &a.per_domain_delta)
            .chain(self.games.iter().map(|g| &g.per_domain_delta));

        let mut sums: Vec<(String, u32)> = self.catalog.iter().map(|d| (d.to_string(), 0)).collect();
        for delta in deltas {
            for (domain, score) in sums.iter_mut() {
                if let Some(add) = delta.get(domain.as_str()) {
                    *score = score.saturating_add(*add);
                }
            }
        }

        DomainTotals::from_pairs(sums)
    }

    /// Retained quiz answers, in the order they were last recorded.
    pub fn answers(&self) -> &[QuizAnswerEvent] {
        &self.answers
    }

    /// Retained game results, in the order they were last recorded.
    pub fn game_results(&self) -> &[GameScoreEvent] {
        &self.games
    }

    /// True until the first event has been recorded.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.games.is_empty()
    }

    /// Mean of the retained game scores, if any game was played.
    pub fn average_game_score(&self) -> Option<f64> {
        if self.games.is_empty() {
            return None;
        }
        let total: u32 = self.games.iter().map(|g| u32::from(g.score)).sum();
        Some(f64::from(total) / self.games.len() as f64)
    }

    pub fn catalog(&self) -> &DomainCatalog {
        &self.catalog
    }

    fn validate(&self, delta: &DomainDelta) -> Result<(), LedgerError> {
        match delta.keys().find(|d| !self.catalog.contains(d)) {
            Some(bad) => Err(LedgerError::InvalidDomainKey(bad.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(pairs: &[(&str, u32)]) -> DomainDelta {
        pairs.iter().map(|(d, s)| (d.to_string(), *s)).collect()
    }

    fn answer(question_id: u32, pairs: &[(&str, u32)]) -> QuizAnswerEvent {
        QuizAnswerEvent {
            question_id,
            chosen_option_index: 0,
            answer: "option".to_string(),
            per_domain_delta: delta(pairs),
        }
    }

    fn game(game_id: &str, score: u8, pairs: &[(&str, u32)]) -> GameScoreEvent {
        GameScoreEvent {
            game_id: game_id.to_string(),
            score,
            per_domain_delta: delta(pairs),
        }
    }

    fn abc_ledger() -> ScoreLedger {
        ScoreLedger::new(DomainCatalog::new(["A", "B", "C"]))
    }

    #[test]
    fn test_empty_ledger_has_every_domain() {
        let ledger = abc_ledger();
        let totals = ledger.current_totals();
        assert_eq!(totals.iter().map(|(d, _)| d).collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert!(totals.iter().all(|(_, s)| s == 0));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_answers_and_games_accumulate() {
        let mut ledger = abc_ledger();
        ledger.record_quiz_answer(answer(1, &[("A", 3), ("B", 1)])).unwrap();
        ledger.record_quiz_answer(answer(2, &[("A", 2)])).unwrap();
        ledger.record_game_score(game("g1", 90, &[("C", 10)])).unwrap();

        let totals = ledger.current_totals();
        assert_eq!(totals.get("A"), Some(5));
        assert_eq!(totals.get("B"), Some(1));
        assert_eq!(totals.get("C"), Some(10));
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_reanswering_replaces_contribution() {
        let mut replayed = abc_ledger();
        replayed.record_quiz_answer(answer(1, &[("A", 3)])).unwrap();
        replayed.record_game_score(game("g1", 40, &[("B", 6)])).unwrap();
        replayed.record_quiz_answer(answer(1, &[("C", 2)])).unwrap();
        replayed.record_game_score(game("g1", 85, &[("B", 15)])).unwrap();

        let mut latest_only = abc_ledger();
        latest_only.record_quiz_answer(answer(1, &[("C", 2)])).unwrap();
        latest_only.record_game_score(game("g1", 85, &[("B", 15)])).unwrap();

        assert_eq!(replayed.current_totals(), latest_only.current_totals());
        assert_eq!(replayed.answers().len(), 1);
        assert_eq!(replayed.game_results().len(), 1);
        assert_eq!(replayed.game_results()[0].score, 85);
    }

    #[test]
    fn test_invalid_domain_rejected_without_change() {
        let mut ledger = abc_ledger();
        ledger.record_quiz_answer(answer(1, &[("A", 3)])).unwrap();

        let err = ledger
            .record_quiz_answer(answer(1, &[("A", 1), ("Z", 4)]))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidDomainKey("Z".to_string()));

        let err = ledger
            .record_game_score(game("g1", 50, &[("Problem Solving", 8)]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDomainKey(_)));

        // The rejected re-answer did not displace the earlier one.
        assert_eq!(ledger.current_totals().get("A"), Some(3));
        assert!(ledger.game_results().is_empty());
    }

    #[test]
    fn test_game_score_clamped() {
        let mut ledger = abc_ledger();
        ledger.record_game_score(game("g1", 250, &[])).unwrap();
        assert_eq!(ledger.game_results()[0].score, 100);
    }

    #[test]
    fn test_average_game_score() {
        let mut ledger = abc_ledger();
        assert_eq!(ledger.average_game_score(), None);
        ledger.record_game_score(game("g1", 80, &[])).unwrap();
        ledger.record_game_score(game("g2", 60, &[])).unwrap();
        assert_eq!(ledger.average_game_score(), Some(70.0));
    }
}
