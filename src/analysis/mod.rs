//! Recommendation paths: the deterministic recommender and the
//! orchestrator that optionally consults a generative service.

pub mod orchestrator;
pub mod recommender;

pub use orchestrator::AnalysisOrchestrator;
pub use recommender::DomainRecommender;
