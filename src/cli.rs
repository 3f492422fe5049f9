//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SkillSync - career-domain assessment and mentor for CS students
///
/// Answer a short quiz and a few mini-games, get a recommended career
/// domain with a roadmap, chat with the Grewt mentor, and keep healthy
/// coding habits with wellness reminders.
///
/// Examples:
///   skillsync assess
///   skillsync assess --answers answers.json --format json -o report.json
///   skillsync chat
///   skillsync chat --message "How do I prepare for internships?"
///   skillsync remind --watch
///   skillsync internships --skills python,sql
///   skillsync internships --like paytm-data
///   skillsync init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .skillsync.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Gemini model to use
    #[arg(short, long, env = "SKILLSYNC_MODEL", global = true)]
    pub model: Option<String>,

    /// Gemini API key
    ///
    /// Without a key, recommendations use the built-in scoring and the
    /// mentor answers offline.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// State file for chat history and reminder timers
    #[arg(long, value_name = "FILE", global = true)]
    pub state_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Take the career assessment and write a report
    Assess(AssessArgs),

    /// Chat with the Grewt mentor
    Chat(ChatArgs),

    /// Show due wellness reminders
    Remind(RemindArgs),

    /// Browse internships ranked by fit, and like or pass on them
    Internships(InternshipsArgs),

    /// Generate a default .skillsync.toml configuration file
    InitConfig,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AssessArgs {
    /// Answer script instead of interactive prompts
    ///
    /// JSON of the form {"quiz": {"1": 0}, "games": {"bug-buster": 0}}
    /// mapping question ids and game ids to chosen option indices.
    #[arg(short, long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ChatArgs {
    /// Clear the saved chat history first
    #[arg(long)]
    pub reset: bool,

    /// Send a single message and exit
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemindArgs {
    /// Keep running and print reminders as they come due
    #[arg(short, long)]
    pub watch: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InternshipsArgs {
    /// Rank against this domain instead of the last assessment's
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Your skills, comma separated
    ///
    /// Without skills, the domain's typical skill set is used.
    #[arg(short, long, value_name = "SKILLS", value_delimiter = ',')]
    pub skills: Vec<String>,

    /// Like a listing by id
    #[arg(long, value_name = "ID")]
    pub like: Vec<String>,

    /// Pass on a listing by id
    #[arg(long, value_name = "ID")]
    pub pass: Vec<String>,

    /// Also show listings you passed on
    #[arg(short, long)]
    pub all: bool,

    /// Forget all likes and passes first
    #[arg(long)]
    pub reset: bool,

    /// Maximum number of listings to show
    #[arg(short = 'n', long, default_value_t = 8, value_name = "N")]
    pub limit: usize,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref model) = self.model {
            if model.trim().is_empty() {
                return Err("Model name must not be empty".to_string());
            }
        }

        match &self.command {
            Command::Assess(assess) => {
                if let Some(ref answers) = assess.answers {
                    if !answers.is_file() {
                        return Err(format!(
                            "Answers file does not exist: {}",
                            answers.display()
                        ));
                    }
                }
            }
            Command::Chat(chat) => {
                if let Some(ref message) = chat.message {
                    if message.trim().is_empty() {
                        return Err("Chat message must not be empty".to_string());
                    }
                }
            }
            Command::Internships(internships) => {
                if internships.limit == 0 {
                    return Err("Limit must be at least 1".to_string());
                }
                if let Some(id) = internships
                    .like
                    .iter()
                    .find(|id| internships.pass.contains(id))
                {
                    return Err(format!("Cannot both like and pass '{}'", id));
                }
            }
            Command::Remind(_) | Command::InitConfig => {}
        }

        Ok(())
    }
}
