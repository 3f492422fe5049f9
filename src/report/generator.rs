//! Markdown report generation.
//!
//! This module renders an assessment [`Report`] as Markdown or JSON.

use crate::analysis::recommender::rank_domains;
use crate::catalog::{find_game, find_question};
use crate::models::{
    DomainTotals, GameScoreEvent, PerformanceTier, QuizAnswerEvent, RecommendationResult, Report,
    ReportMetadata,
};
use anyhow::Result;

/// Width of the share bar in the totals table.
const BAR_WIDTH: usize = 20;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# SkillSync Career Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_recommendation_section(&report.recommendation));
    output.push_str(&generate_totals_section(&report.totals));
    output.push_str(&generate_roadmap_section(&report.recommendation));
    output.push_str(&generate_performance_section(report));
    output.push_str(&generate_answers_section(&report.quiz_answers));
    output.push_str(&generate_games_section(&report.game_results));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Assessment Date:** {}\n",
        metadata.assessment_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Model Used:** `{}`\n", metadata.model_used));
    section.push_str(&format!(
        "- **Questions Answered:** {}\n",
        metadata.questions_answered
    ));
    section.push_str(&format!("- **Games Played:** {}\n", metadata.games_played));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_recommendation_section(recommendation: &RecommendationResult) -> String {
    let mut section = String::new();

    section.push_str("## Recommendation\n\n");
    section.push_str(&format!(
        "### 🎯 {}\n\n",
        recommendation.recommended_domain
    ));
    section.push_str("| Confidence | Internship Readiness | Source |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {}% | {}% | {} |\n\n",
        recommendation.confidence, recommendation.readiness, recommendation.source
    ));

    if !recommendation.explanation.is_empty() {
        section.push_str(&recommendation.explanation);
        section.push_str("\n\n");
    }

    section
}

/// Domain totals, highest first, with each domain's share of the total.
fn generate_totals_section(totals: &DomainTotals) -> String {
    if totals.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Domain Scores\n\n");
    section.push_str("| Domain | Score | Share |\n");
    section.push_str("|:---|:---:|:---|\n");

    let sum = totals.sum();
    for (domain, score) in rank_domains(totals) {
        section.push_str(&format!(
            "| {} | {} | `{}` |\n",
            domain,
            score,
            share_bar(u64::from(score), sum)
        ));
    }
    section.push('\n');

    section
}

fn share_bar(score: u64, sum: u64) -> String {
    let filled = if sum == 0 {
        0
    } else {
        ((score * BAR_WIDTH as u64 + sum / 2) / sum) as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn generate_roadmap_section(recommendation: &RecommendationResult) -> String {
    let mut section = String::new();

    if !recommendation.roadmap_steps.is_empty() {
        section.push_str("## Roadmap\n\n");
        for (i, step) in recommendation.roadmap_steps.iter().enumerate() {
            section.push_str(&format!("{}. {}\n", i + 1, step));
        }
        section.push('\n');
    }

    if !recommendation.resource_list.is_empty() {
        section.push_str("## Resources\n\n");
        for resource in &recommendation.resource_list {
            section.push_str(&format!("- 📚 {}\n", resource));
        }
        section.push('\n');
    }

    section
}

fn generate_performance_section(report: &Report) -> String {
    let (Some(average), Some(tier)) = (report.average_game_score, report.performance_tier) else {
        return String::new();
    };

    let badge = match tier {
        PerformanceTier::Strong => "🟢",
        PerformanceTier::Solid => "🟡",
        PerformanceTier::Developing => "🟠",
    };

    let mut section = String::new();
    section.push_str("## Game Performance\n\n");
    section.push_str(&format!(
        "{} **{}** (average score {:.0}/100)\n\n",
        badge, tier, average
    ));
    section.push_str(&format!(
        "> {}\n\n",
        tier.advice(&report.recommendation.recommended_domain)
    ));

    section
}

fn generate_answers_section(answers: &[QuizAnswerEvent]) -> String {
    if answers.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Quiz Answers\n\n");

    for answer in answers {
        let prompt = find_question(answer.question_id)
            .map(|q| q.prompt.to_string())
            .unwrap_or_else(|| format!("Question {}", answer.question_id));
        section.push_str(&format!("- **{}**\n  {}\n", prompt, answer.answer));
    }
    section.push('\n');

    section
}

fn generate_games_section(games: &[GameScoreEvent]) -> String {
    if games.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Game Results\n\n");
    section.push_str("| Game | Score |\n");
    section.push_str("|:---|:---:|\n");

    for game in games {
        let title = find_game(&game.game_id).map_or(game.game_id.as_str(), |g| g.title);
        section.push_str(&format!("| {} | {}/100 |\n", title, game.score));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(
        "*Report generated by SkillSync. Remember to take breaks and stay hydrated! 💚*\n",
    );

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
