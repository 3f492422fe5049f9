//! Recommendation orchestration.
//!
//! Decides between the deterministic recommender and the generative
//! service, validates whatever the service returns, and always resolves
//! with a usable [`RecommendationResult`].

use super::recommender::DomainRecommender;
use crate::llm::{GenerationConfig, GenerativeService, ServiceError};
use crate::models::{
    DomainTotals, GameScoreEvent, QuizAnswerEvent, RecommendationResult, RecommendationSource,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shape the service is asked to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExternalAnalysis {
    recommended_field: String,
    confidence: f64,
    explanation: String,
    internship_readiness: f64,
}

/// Chooses and runs the recommendation path.
pub struct AnalysisOrchestrator {
    recommender: DomainRecommender,
    service: Option<Arc<dyn GenerativeService>>,
    generation: GenerationConfig,
    timeout: Duration,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator that only uses the deterministic path.
    pub fn new(recommender: DomainRecommender) -> Self {
        Self {
            recommender,
            service: None,
            generation: Self::default_generation(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Route analyses through `service`, bounded by `timeout`.
    pub fn with_service(
        mut self,
        service: Arc<dyn GenerativeService>,
        generation: GenerationConfig,
        timeout: Duration,
    ) -> Self {
        self.service = Some(service);
        self.generation = generation;
        self.timeout = timeout;
        self
    }

    pub fn default_generation() -> GenerationConfig {
        GenerationConfig {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 512,
        }
    }

    /// Model name on the external path, `None` when heuristic-only.
    pub fn model_name(&self) -> Option<&str> {
        self.service.as_deref().map(|s| s.model_name())
    }

    /// Produce a recommendation; never fails.
    ///
    /// With no service configured this is the deterministic recommendation.
    /// Otherwise the service is called exactly once, and any failure falls
    /// back to the deterministic result. Totals are keyed onto the catalog
    /// before either path sees them.
    pub async fn analyze(
        &self,
        totals: &DomainTotals,
        answers: &[QuizAnswerEvent],
        games: &[GameScoreEvent],
    ) -> RecommendationResult {
        let totals = self.recommender.catalog().normalize(totals);
        let Some(service) = self.service.as_deref() else {
            debug!("No generative service configured, using heuristic path");
            return self.recommender.recommend(&totals);
        };

        match self.analyze_external(service, &totals, answers, games).await {
            Ok(result) => {
                info!(
                    "Model {} recommended {}",
                    service.model_name(),
                    result.recommended_domain
                );
                result
            }
            Err(e) => {
                warn!("External analysis failed, falling back to heuristic: {}", e);
                self.recommender.recommend(&totals)
            }
        }
    }

    async fn analyze_external(
        &self,
        service: &dyn GenerativeService,
        totals: &DomainTotals,
        answers: &[QuizAnswerEvent],
        games: &[GameScoreEvent],
    ) -> Result<RecommendationResult, ServiceError> {
        let prompt = self.build_prompt(totals, answers, games);

        let text = tokio::time::timeout(self.timeout, service.generate(&prompt, &self.generation))
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout))??;

        let analysis = parse_analysis(&text)?;
        let domain = self.resolve_domain(&analysis.recommended_field).ok_or_else(|| {
            ServiceError::MalformedPayload(format!(
                "unknown recommendedField '{}'",
                analysis.recommended_field
            ))
        })?;

        let (roadmap_steps, resource_list) = self.recommender.content_lists(&domain);

        Ok(RecommendationResult {
            recommended_domain: domain,
            confidence: analysis.confidence.round() as u8,
            readiness: analysis.internship_readiness.round() as u8,
            explanation: analysis.explanation.trim().to_string(),
            roadmap_steps,
            resource_list,
            source: RecommendationSource::External,
        })
    }

    /// Map a service-provided field name to a catalog domain, accepting the
    /// domain key or its display title.
    fn resolve_domain(&self, field: &str) -> Option<String> {
        let catalog = self.recommender.catalog();
        catalog
            .resolve(field)
            .or_else(|| {
                self.recommender
                    .content()
                    .domain_by_title(field)
                    .filter(|d| catalog.contains(d))
            })
            .map(str::to_string)
    }

    /// Natural-language prompt embedding answers, game results and totals.
    pub fn build_prompt(
        &self,
        totals: &DomainTotals,
        answers: &[QuizAnswerEvent],
        games: &[GameScoreEvent],
    ) -> String {
        let mut prompt = String::new();
        prompt.push_str("Analyze this computer science student's career assessment data and recommend the best-fit field.\n\n");

        prompt.push_str("Quiz Answers:\n");
        for answer in answers {
            prompt.push_str(&format!("Q{}: {}\n", answer.question_id, answer.answer));
        }

        prompt.push_str("\nGame Performance Scores:\n");
        for game in games {
            prompt.push_str(&format!("{}: {}/100\n", game.game_id, game.score));
        }

        prompt.push_str("\nDomain Scores:\n");
        for (domain, score) in totals.iter() {
            prompt.push_str(&format!("{}: {}\n", domain, score));
        }

        prompt.push_str("\nAvailable fields:\n");
        for domain in self.recommender.catalog().iter() {
            match self.recommender.content().get(domain) {
                Some(content) => prompt.push_str(&format!("- {} ({})\n", domain, content.title)),
                None => prompt.push_str(&format!("- {}\n", domain)),
            }
        }

        prompt.push_str(
            r#"
Respond with only a JSON object containing:
- recommendedField: the best-fit field name, exactly as listed before the parentheses
- confidence: confidence percentage (0-100)
- explanation: 2-3 sentence explanation of why this field fits
- internshipReadiness: score 0-100 for internship readiness

Focus on the field with the highest domain score but consider the overall profile."#,
        );

        prompt
    }
}

/// Validate a service response against the expected schema.
///
/// Tolerates Markdown code fences and prose around a single JSON object.
fn parse_analysis(text: &str) -> Result<ExternalAnalysis, ServiceError> {
    let json = extract_json_object(text)
        .ok_or_else(|| ServiceError::MalformedPayload("no JSON object in response".to_string()))?;

    let analysis: ExternalAnalysis = serde_json::from_str(json)
        .map_err(|e| ServiceError::MalformedPayload(e.to_string()))?;

    let in_percent_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
    if !in_percent_range(analysis.confidence) {
        return Err(ServiceError::MalformedPayload(format!(
            "confidence {} out of range",
            analysis.confidence
        )));
    }
    if !in_percent_range(analysis.internship_readiness) {
        return Err(ServiceError::MalformedPayload(format!(
            "internshipReadiness {} out of range",
            analysis.internship_readiness
        )));
    }
    if analysis.explanation.trim().is_empty() {
        return Err(ServiceError::MalformedPayload(
            "empty explanation".to_string(),
        ));
    }

    Ok(analysis)
}

/// The span from the first `{` to the last `}`.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContentTable, DomainCatalog};
    use crate::scoring::ScoreLedger;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed body and counts calls.
    struct CannedService {
        body: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl CannedService {
        fn ok(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                body: Err(()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl GenerativeService for CannedService {
        async fn generate(&self, _: &str, _: &GenerationConfig) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .clone()
                .map_err(|_| ServiceError::Connect("http://localhost:1".to_string()))
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    struct HangingService;

    #[async_trait]
    impl GenerativeService for HangingService {
        async fn generate(&self, _: &str, _: &GenerationConfig) -> Result<String, ServiceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }

        fn model_name(&self) -> &str {
            "hanging"
        }
    }

    fn heuristic_only() -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(DomainRecommender::default())
    }

    fn with(service: Arc<dyn GenerativeService>) -> AnalysisOrchestrator {
        heuristic_only().with_service(
            service,
            AnalysisOrchestrator::default_generation(),
            Duration::from_secs(5),
        )
    }

    fn sde_totals() -> DomainTotals {
        DomainTotals::from_pairs([
            ("SDE", 20),
            ("Data Analyst", 0),
            ("Cybersecurity", 5),
            ("Cloud", 0),
            ("Tester", 0),
            ("Product Manager", 0),
        ])
    }

    #[tokio::test]
    async fn test_no_credential_uses_heuristic() {
        let orchestrator = heuristic_only();
        assert_eq!(orchestrator.model_name(), None);

        let result = orchestrator.analyze(&sde_totals(), &[], &[]).await;
        assert_eq!(result.recommended_domain, "SDE");
        assert_eq!(result.confidence, 95);
        assert_eq!(result.readiness, 50);
        assert_eq!(result.source, RecommendationSource::Heuristic);
    }

    #[tokio::test]
    async fn test_empty_ledger_without_credential() {
        let ledger = ScoreLedger::new(DomainCatalog::default());
        let result = heuristic_only()
            .analyze(&ledger.current_totals(), ledger.answers(), ledger.game_results())
            .await;
        assert_eq!(result.recommended_domain, "SDE");
        assert_eq!(result.readiness, 40);
    }

    #[tokio::test]
    async fn test_external_result_is_used() {
        let service = CannedService::ok(
            r#"{"recommendedField": "Cloud Engineer", "confidence": 82.4, "explanation": "You automate everything.", "internshipReadiness": 71}"#,
        );
        let result = with(service.clone()).analyze(&sde_totals(), &[], &[]).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.recommended_domain, "Cloud");
        assert_eq!(result.confidence, 82);
        assert_eq!(result.readiness, 71);
        assert_eq!(result.explanation, "You automate everything.");
        assert_eq!(result.source, RecommendationSource::External);
        // Roadmap and resources always come from the content table.
        assert_eq!(result.roadmap_steps[0], "Learn AWS/Azure/GCP Fundamentals");
    }

    #[tokio::test]
    async fn test_fenced_json_is_repaired() {
        let service = CannedService::ok(
            "Here you go:\n```json\n{\"recommendedField\": \"Tester\", \"confidence\": 77, \"explanation\": \"Detail oriented.\", \"internshipReadiness\": 60, \"roadmap\": [\"ignored\"]}\n```",
        );
        let result = with(service).analyze(&sde_totals(), &[], &[]).await;

        assert_eq!(result.recommended_domain, "Tester");
        assert_eq!(result.source, RecommendationSource::External);
        assert_eq!(result.roadmap_steps[0], "Learn Manual Testing Fundamentals");
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let service = CannedService::ok("{\"recommendedField\": \"SDE\", \"confidence\": ");
        let result = with(service.clone()).analyze(&sde_totals(), &[], &[]).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, heuristic_only().analyze(&sde_totals(), &[], &[]).await);
    }

    #[tokio::test]
    async fn test_non_conforming_payloads_fall_back() {
        let bodies = [
            "I think you should be a developer!",
            r#"{"recommendedField": "Astronaut", "confidence": 90, "explanation": "Stars.", "internshipReadiness": 50}"#,
            r#"{"recommendedField": "SDE", "confidence": 140, "explanation": "Great.", "internshipReadiness": 50}"#,
            r#"{"recommendedField": "SDE", "confidence": "high", "explanation": "Great.", "internshipReadiness": 50}"#,
            r#"{"recommendedField": "SDE", "confidence": 90, "explanation": "  ", "internshipReadiness": 50}"#,
            r#"{"recommendedField": "SDE", "confidence": 90, "explanation": "Great."}"#,
        ];

        for body in bodies {
            let result = with(CannedService::ok(body)).analyze(&sde_totals(), &[], &[]).await;
            assert_eq!(result.source, RecommendationSource::Heuristic, "{}", body);
            assert_eq!(result.recommended_domain, "SDE");
        }
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let service = CannedService::failing();
        let result = with(service.clone()).analyze(&sde_totals(), &[], &[]).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.source, RecommendationSource::Heuristic);
        assert_eq!(result.recommended_domain, "SDE");
    }

    #[tokio::test]
    async fn test_hanging_service_times_out() {
        let orchestrator = heuristic_only().with_service(
            Arc::new(HangingService),
            AnalysisOrchestrator::default_generation(),
            Duration::from_millis(50),
        );
        let result = orchestrator.analyze(&sde_totals(), &[], &[]).await;
        assert_eq!(result.source, RecommendationSource::Heuristic);
    }

    #[tokio::test]
    async fn test_timeout_reports_sub_second_duration() {
        let orchestrator = heuristic_only().with_service(
            Arc::new(HangingService),
            AnalysisOrchestrator::default_generation(),
            Duration::from_millis(50),
        );
        let err = orchestrator
            .analyze_external(&HangingService, &sde_totals(), &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Timeout(d) if d == Duration::from_millis(50)));
        assert_eq!(err.to_string(), "request timed out after 50ms");
    }

    #[tokio::test]
    async fn test_totals_order_and_unknown_keys_do_not_matter() {
        let orchestrator = heuristic_only();

        let tied = DomainTotals::from_pairs([("Cloud", 10), ("SDE", 10)]);
        let result = orchestrator.analyze(&tied, &[], &[]).await;
        assert_eq!(result.recommended_domain, "SDE");

        let reordered = DomainTotals::from_pairs([("SDE", 10), ("Cloud", 10)]);
        assert_eq!(result, orchestrator.analyze(&reordered, &[], &[]).await);

        let unknown = DomainTotals::from_pairs([("Astronaut", 50), ("SDE", 1)]);
        let result = orchestrator.analyze(&unknown, &[], &[]).await;
        assert_eq!(result.recommended_domain, "SDE");
        assert_eq!(result.readiness, 40);
    }

    #[test]
    fn test_prompt_lists_only_catalog_domains() {
        let orchestrator = heuristic_only();
        let totals = orchestrator
            .recommender
            .catalog()
            .normalize(&DomainTotals::from_pairs([("Astronaut", 50), ("Cloud", 2)]));
        let prompt = orchestrator.build_prompt(&totals, &[], &[]);

        assert!(!prompt.contains("Astronaut"));
        assert!(prompt.contains("SDE: 0\nData Analyst: 0\nCybersecurity: 0\nCloud: 2\n"));
    }

    #[tokio::test]
    async fn test_external_domain_missing_from_content_table() {
        let catalog = DomainCatalog::new(["SDE", "Robotics"]);
        let orchestrator = AnalysisOrchestrator::new(DomainRecommender::new(
            catalog,
            ContentTable::builtin(),
        ))
        .with_service(
            CannedService::ok(
                r#"{"recommendedField": "robotics", "confidence": 66, "explanation": "Hands on.", "internshipReadiness": 45}"#,
            ),
            AnalysisOrchestrator::default_generation(),
            Duration::from_secs(5),
        );

        let totals = DomainTotals::from_pairs([("SDE", 1), ("Robotics", 3)]);
        let result = orchestrator.analyze(&totals, &[], &[]).await;
        assert_eq!(result.recommended_domain, "Robotics");
        assert!(result.roadmap_steps.is_empty());
        assert!(result.resource_list.is_empty());
    }

    #[test]
    fn test_prompt_embeds_inputs() {
        let mut ledger = ScoreLedger::new(DomainCatalog::default());
        ledger
            .record_quiz_answer(crate::catalog::quiz_answer(1, 2).unwrap())
            .unwrap();
        ledger
            .record_game_score(crate::catalog::game_result("cyber-chase", 0).unwrap())
            .unwrap();

        let prompt = heuristic_only().build_prompt(
            &ledger.current_totals(),
            ledger.answers(),
            ledger.game_results(),
        );

        assert!(prompt.contains("Q1: Finding patterns in large datasets"));
        assert!(prompt.contains("cyber-chase: 88/100"));
        assert!(prompt.contains("Cybersecurity: 17"));
        assert!(prompt.contains("- Cloud (Cloud Engineer)"));
        assert!(prompt.contains("internshipReadiness"));
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\":1} y"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
