//! Assessment input: interactive prompts or a scripted answer file.

use crate::catalog::{game_result, games, questions, quiz_answer};
use crate::models::{GameScoreEvent, QuizAnswerEvent};
use crate::scoring::ScoreLedger;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Pre-recorded answers, keyed by question id and game id, each mapped to
/// a zero-based option index.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerScript {
    #[serde(default)]
    pub quiz: BTreeMap<u32, usize>,
    #[serde(default)]
    pub games: BTreeMap<String, usize>,
}

impl AnswerScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse answers file: {}", path.display()))
    }

    /// Record every answer into `ledger`.
    ///
    /// All entries are resolved first; an unknown id or option index fails
    /// the whole script and leaves the ledger untouched.
    pub fn apply(&self, ledger: &mut ScoreLedger) -> Result<()> {
        let mut answers: Vec<QuizAnswerEvent> = Vec::new();
        for (&question_id, &option) in &self.quiz {
            match quiz_answer(question_id, option) {
                Some(event) => answers.push(event),
                None => bail!(
                    "Invalid quiz answer: question {} option {}",
                    question_id,
                    option
                ),
            }
        }

        let mut results: Vec<GameScoreEvent> = Vec::new();
        for (game_id, &option) in &self.games {
            match game_result(game_id, option) {
                Some(event) => results.push(event),
                None => bail!("Invalid game answer: game '{}' option {}", game_id, option),
            }
        }

        debug!(
            "Applying script with {} answers and {} games",
            answers.len(),
            results.len()
        );

        for event in answers {
            ledger.record_quiz_answer(event)?;
        }
        for event in results {
            ledger.record_game_score(event)?;
        }

        Ok(())
    }
}

/// Ask every quiz question and game challenge on `input`/`output`.
///
/// A blank line skips the current item; end of input stops the session
/// with whatever was answered so far.
pub fn run_interactive<R: BufRead, W: Write>(
    ledger: &mut ScoreLedger,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "\n📝 Career Quiz")?;
    for question in questions() {
        writeln!(output, "\nQ{}. {}", question.id, question.prompt)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(output, "   {}) {}", i + 1, option)?;
        }

        match read_choice(input, output, question.options.len())? {
            Choice::Picked(option) => {
                if let Some(event) = quiz_answer(question.id, option) {
                    ledger.record_quiz_answer(event)?;
                }
            }
            Choice::Skipped => continue,
            Choice::Eof => return Ok(()),
        }
    }

    writeln!(output, "\n🎮 Career Games")?;
    for game in games() {
        writeln!(output, "\n{}: {}", game.title, game.description)?;
        writeln!(output, "{}", game.challenge)?;
        for (i, option) in game.options.iter().enumerate() {
            writeln!(output, "   {}) {}", i + 1, option.label)?;
        }

        match read_choice(input, output, game.options.len())? {
            Choice::Picked(option) => {
                if let Some(event) = game_result(game.id, option) {
                    writeln!(output, "   Score: {}/100", event.score)?;
                    ledger.record_game_score(event)?;
                }
            }
            Choice::Skipped => continue,
            Choice::Eof => return Ok(()),
        }
    }

    Ok(())
}

enum Choice {
    Picked(usize),
    Skipped,
    Eof,
}

/// Read a 1-based option number, re-prompting until it is in range.
fn read_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W, count: usize) -> Result<Choice> {
    loop {
        write!(output, "Your choice (1-{}, blank to skip): ", count)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Choice::Eof);
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(Choice::Skipped);
        }

        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Choice::Picked(n - 1)),
            _ => writeln!(output, "   Please enter a number between 1 and {}.", count)?,
        }
    }
}
