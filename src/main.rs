//! SkillSync - career-domain assessment and mentor CLI
//!
//! Scores quiz answers and mini-game results per career domain, recommends
//! a domain (optionally with help from a Gemini model), chats as the Grewt
//! mentor and keeps wellness reminders on schedule.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, config, answers file, state file, etc.)

mod analysis;
mod catalog;
mod cli;
mod config;
mod llm;
mod matching;
mod models;
mod report;
mod scoring;
mod session;
mod store;
mod wellness;

use analysis::{AnalysisOrchestrator, DomainRecommender};
use anyhow::{bail, Context, Result};
use catalog::{find_internship, internships, ContentTable, DomainCatalog};
use chrono::Utc;
use cli::{Args, AssessArgs, ChatArgs, Command, InternshipsArgs, OutputFormat, RemindArgs};
use config::{Config, DEFAULT_CONFIG_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use llm::mentor::{ChatRole, HISTORY_KEY};
use llm::{ChatMessage, ChatTranscript, GeminiClient, GeminiConfig, GenerativeService, MentorChat};
use matching::{
    rank_internships, InternshipDeck, SkillProfile, Swipe, DECK_KEY, LAST_DOMAIN_KEY,
};
use models::{PerformanceTier, Report, ReportMetadata};
use scoring::ScoreLedger;
use session::AnswerScript;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::{JsonFileStore, KeyValueStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use wellness::{Clock, HealthReminder, ReminderScheduler, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if let Command::InitConfig = args.command {
        return handle_init_config();
    }

    // Config is loaded before logging so its `verbose` setting applies
    let (config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(config.log_level(args.quiet));

    info!("SkillSync v{}", env!("CARGO_PKG_VERSION"));
    source.log();
    debug!("Command: {:?}", args.command);

    if let Err(e) = run(&args, &config).await {
        error!("Command failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .skillsync.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Set GEMINI_API_KEY in your environment to enable AI-assisted analysis.");
    Ok(())
}

/// Initialize logging at `level`.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Command::Assess(assess) => run_assess(config, assess, args.quiet).await,
        Command::Chat(chat) => run_chat(config, chat).await,
        Command::Remind(remind) => run_remind(config, remind).await,
        Command::Internships(browse) => run_internships(config, browse),
        Command::InitConfig => handle_init_config(),
    }
}

/// Where the configuration came from, reported once logging is up.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    Fallback(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", DEFAULT_CONFIG_FILE),
            ConfigSource::Builtin => debug!("No config file found, using defaults"),
            ConfigSource::Fallback(e) => warn!("Failed to load config: {}", e),
        }
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    let (mut config, source) = match args.config {
        // Try explicit config path
        Some(ref config_path) => (
            Config::load(config_path)?,
            ConfigSource::Explicit(config_path.clone()),
        ),
        // Try default location
        None => match Config::load_default() {
            Ok(Some(config)) => (config, ConfigSource::DefaultFile),
            Ok(None) => (Config::default(), ConfigSource::Builtin),
            Err(e) => (Config::default(), ConfigSource::Fallback(e)),
        },
    };

    config.merge_with_args(args);
    Ok((config, source))
}

/// Build the Gemini client when a credential is configured.
fn build_service(config: &Config) -> Result<Option<Arc<dyn GenerativeService>>> {
    let Some(api_key) = config.model.credential() else {
        info!("No API key configured, running offline");
        return Ok(None);
    };

    let gemini = GeminiConfig::new(api_key)
        .with_model(&config.model.name)
        .with_base_url(&config.model.base_url)
        .with_timeout(config.model.timeout());
    let client = GeminiClient::new(gemini).context("Failed to create Gemini client")?;

    Ok(Some(Arc::new(client)))
}

fn open_store(config: &Config) -> Result<JsonFileStore> {
    let store = JsonFileStore::open(&config.general.state_file)
        .context("Failed to open state file")?;
    debug!("Using state file {}", store.path().display());
    Ok(store)
}

fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Run an assessment and write the report.
async fn run_assess(config: &Config, args: &AssessArgs, quiet: bool) -> Result<()> {
    let catalog = DomainCatalog::default();
    debug!("Tracking {} domains", catalog.len());
    let mut ledger = ScoreLedger::new(catalog);

    // Step 1: Collect answers
    match args.answers {
        Some(ref path) => {
            println!("📄 Loading answers from: {}", path.display());
            AnswerScript::load(path)?.apply(&mut ledger)?;
        }
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            session::run_interactive(&mut ledger, &mut input, &mut output)?;
        }
    }

    if ledger.is_empty() {
        warn!("No answers recorded, the recommendation will use the default domain");
    }

    // Step 2: Analyze
    let recommender = DomainRecommender::new(ledger.catalog().clone(), ContentTable::builtin());
    let mut orchestrator = AnalysisOrchestrator::new(recommender);
    if let Some(service) = build_service(config)? {
        orchestrator = orchestrator.with_service(
            service,
            config.model.generation(),
            config.model.timeout(),
        );
    }

    let model_used = orchestrator.model_name().unwrap_or("heuristic").to_string();
    println!("\n🤖 Analyzing your profile...");
    println!("   Model: {}", model_used);

    let start_time = Instant::now();
    let totals = ledger.current_totals();
    debug!("Scoring {} domains, {} points in total", totals.len(), totals.sum());
    let pb = spinner("Finding your best-fit domain...", quiet);
    let recommendation = orchestrator
        .analyze(&totals, ledger.answers(), ledger.game_results())
        .await;
    pb.finish_and_clear();
    let duration = start_time.elapsed().as_secs_f64();

    // Step 3: Build the report
    let average = ledger.average_game_score();
    let report = Report {
        metadata: ReportMetadata {
            assessment_date: Utc::now(),
            model_used,
            questions_answered: ledger.answers().len(),
            games_played: ledger.game_results().len(),
            duration_seconds: duration,
        },
        totals,
        recommendation,
        quiz_answers: ledger.answers().to_vec(),
        game_results: ledger.game_results().to_vec(),
        average_game_score: average,
        performance_tier: PerformanceTier::from_average(average),
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let path = args.output.as_ref().unwrap_or(&config.general.output);
    std::fs::write(path, &output)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    // Print summary
    let rec = &report.recommendation;
    println!("\n📊 Assessment Summary:");
    println!(
        "   🎯 Recommended domain: {} ({} points)",
        rec.recommended_domain,
        report.totals.get(&rec.recommended_domain).unwrap_or(0)
    );
    println!(
        "   Confidence: {}% | Internship readiness: {}% | {}",
        rec.confidence, rec.readiness, rec.source
    );
    if let Some(tier) = report.performance_tier {
        println!("   Game performance: {}", tier);
    }
    if !rec.roadmap_steps.is_empty() {
        println!("   Next step: {}", rec.roadmap_steps[0]);
    }
    println!("   Duration: {:.1}s", duration);
    println!("\n✅ Assessment complete! Report saved to: {}", path.display());

    // Remembered for `internships`; a state-file problem does not fail the assessment
    let remembered = open_store(config)
        .and_then(|mut store| Ok(store.set(LAST_DOMAIN_KEY, &rec.recommended_domain)?));
    if let Err(e) = remembered {
        warn!("Could not remember the recommended domain: {:#}", e);
    }

    Ok(())
}

/// Chat with the mentor, surfacing due reminders before each reply.
async fn run_chat(config: &Config, args: &ChatArgs) -> Result<()> {
    let mut store = open_store(config)?;

    if args.reset {
        store.remove(HISTORY_KEY)?;
        println!("🧹 Chat history cleared.");
    }

    let mut transcript = ChatTranscript::load(&store)?;
    let mentor = MentorChat::new(build_service(config)?, config.chat.generation());
    let mut scheduler = if config.reminders.enabled {
        Some(ReminderScheduler::load(&mut store, SystemClock)?)
    } else {
        None
    };

    if !mentor.is_online() {
        println!("⚠️  No API key configured, Grewt is answering offline.");
    }

    if let Some(ref message) = args.message {
        return chat_turn(&mut store, &mut transcript, scheduler.as_mut(), &mentor, message).await;
    }

    // Show the tail of the saved conversation
    let shown = transcript.messages().len().saturating_sub(6);
    for message in &transcript.messages()[shown..] {
        print_message(message);
    }
    println!("\n(type 'exit' or press Ctrl+D to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        chat_turn(&mut store, &mut transcript, scheduler.as_mut(), &mentor, line).await?;
    }

    println!("👋 Keep growing! 🌱");
    Ok(())
}

async fn chat_turn<C: Clock>(
    store: &mut JsonFileStore,
    transcript: &mut ChatTranscript,
    scheduler: Option<&mut ReminderScheduler<C>>,
    mentor: &MentorChat,
    text: &str,
) -> Result<()> {
    if let Some(scheduler) = scheduler {
        for reminder in scheduler.tick(store)? {
            print_message(transcript.push(ChatRole::Reminder, reminder.message));
        }
    }

    transcript.push(ChatRole::User, text);

    let pb = spinner("Grewt is thinking...", false);
    let reply = mentor.reply(text).await;
    pb.finish_and_clear();

    print_message(transcript.push(ChatRole::Mentor, reply));
    transcript.save(store)?;

    Ok(())
}

fn print_message(message: &ChatMessage) {
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    match message.role {
        ChatRole::User => println!("\n[{}] You: {}", time, message.text),
        ChatRole::Mentor => println!("\n[{}] 🤖 Grewt: {}", time, message.text),
        ChatRole::Reminder => println!("\n[{}] ⏰ {}", time, message.text),
    }
}

/// Rank internships for a domain or skill set, recording likes and passes.
fn run_internships(config: &Config, args: &InternshipsArgs) -> Result<()> {
    let mut store = open_store(config)?;

    let mut deck = if args.reset {
        store.remove(DECK_KEY)?;
        println!("🧹 Cleared liked and passed internships.");
        InternshipDeck::default()
    } else {
        InternshipDeck::load(&store)?
    };

    let mut changed = false;
    for id in &args.like {
        let Some(listing) = find_internship(id) else {
            bail!("Unknown internship id '{}'", id);
        };
        changed |= deck.like(listing.id);
        println!("💖 Liked {} at {}", listing.role, listing.company);
    }
    for id in &args.pass {
        let Some(listing) = find_internship(id) else {
            bail!("Unknown internship id '{}'", id);
        };
        changed |= deck.pass(listing.id);
        println!("👋 Passed on {} at {}", listing.role, listing.company);
    }
    if changed {
        deck.save(&mut store)?;
    }

    let domain = match args.domain {
        Some(ref name) => match DomainCatalog::default().resolve(name) {
            Some(domain) => Some(domain.to_string()),
            None => bail!("Unknown domain '{}'", name),
        },
        None => store.get::<String>(LAST_DOMAIN_KEY)?,
    };
    let profile = SkillProfile::new(&args.skills, domain.as_deref());
    debug!(
        "Ranking internships for domain {:?} with skills {:?}",
        profile.domain(),
        profile.skills()
    );

    match profile.domain() {
        Some(domain) => println!("\n💼 Internships for {}", domain),
        None => println!("\n💼 Internships"),
    }
    if profile.skills().is_empty() {
        println!("   Tip: run `skillsync assess` or pass --skills for a better fit score.");
    } else {
        println!("   Skills: {}", profile.skills().join(", "));
    }

    let shown = rank_internships(internships(), &profile)
        .into_iter()
        .filter(|r| args.all || deck.status(r.internship.id) != Some(Swipe::Passed))
        .take(args.limit);
    for ranked in shown {
        let listing = ranked.internship;
        let mark = match deck.status(listing.id) {
            Some(Swipe::Liked) => " 💖",
            Some(Swipe::Passed) => " (passed)",
            None => "",
        };
        println!(
            "\n{:>3}% FIT  {} at {}{}",
            ranked.fit, listing.role, listing.company, mark
        );
        println!("   id: {}", listing.id);
        println!(
            "   📍 {} | 💰 {} | ⏱️  {}",
            listing.location, listing.stipend, listing.duration
        );
        println!("   {}", listing.description);
        println!("   Skills: {}", listing.skills.join(", "));
        println!("   Requirements: {}", listing.requirements.join(", "));
        println!("   Apply: {}", listing.apply_url);
    }

    println!(
        "\n💖 {} liked, 👋 {} passed.",
        deck.liked().len(),
        deck.passed().len()
    );
    Ok(())
}

/// Check reminders once, or keep checking with --watch.
async fn run_remind(config: &Config, args: &RemindArgs) -> Result<()> {
    let mut store = open_store(config)?;
    let mut scheduler = ReminderScheduler::load(&mut store, SystemClock)?;

    if !args.watch {
        let fired = scheduler.tick(&mut store)?;
        if fired.is_empty() {
            match scheduler.next_due_in() {
                Some((kind, remaining)) => println!(
                    "✅ Nothing due. Next reminder ({}) in {} min.",
                    kind,
                    remaining.as_secs().div_ceil(60)
                ),
                None => println!("✅ Nothing due."),
            }
        }
        for reminder in fired {
            print_reminder(reminder);
        }
        return Ok(());
    }

    let period = Duration::from_secs(config.reminders.tick_seconds.max(1));
    println!(
        "👀 Watching for reminders every {}s (Ctrl+C to stop)...",
        period.as_secs()
    );

    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                for reminder in scheduler.tick(&mut store)? {
                    print_reminder(reminder);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n👋 Stopped watching.");
                break;
            }
        }
    }

    Ok(())
}

fn print_reminder(reminder: &HealthReminder) {
    println!(
        "⏰ [{}] {} (every {} min)",
        Utc::now().with_timezone(&chrono::Local).format("%H:%M"),
        reminder.message,
        reminder.interval().as_secs() / 60
    );
}
