//! Pitchside CLI
//!
//! Summaries, rankings, best XI, record seeds and capture finalization
//! over JSON exports from the storage layer. Results go to stdout as JSON;
//! logs go to stderr, filtered by `RUST_LOG`.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pitchside")]
#[command(about = "Evaluation summaries and live capture finalization", long_about = None)]
struct Cli {
    /// Tracker config (JSON or YAML). Falls back to PITCHSIDE_CONFIG_PATH.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ViewArgs {
    /// Score history JSON file (array of records)
    #[arg(long)]
    history: PathBuf,

    /// Reference day, YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    today: Option<String>,

    /// all | today | last7days | last30days | thisYear | custom
    #[arg(long, default_value = "all")]
    period: String,

    /// Start day of a custom period
    #[arg(long)]
    from: Option<String>,

    /// End day of a custom period
    #[arg(long)]
    to: Option<String>,

    /// Only subjects in this category
    #[arg(long)]
    category: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Profile summary of one subject
    Summary {
        #[arg(long)]
        subject: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Rank every subject by overall average
    Rank {
        /// Squad list JSON file
        #[arg(long)]
        subjects: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Best XI in a 4-3-3
    Squad {
        /// Squad list JSON file
        #[arg(long)]
        subjects: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Pre-fill values for a new record
    Seed {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        history: PathBuf,
    },

    /// Turn a capture log into a record ready for storage
    Finalize {
        #[arg(long)]
        subject: String,

        /// Capture log JSON file (event array or full log)
        #[arg(long)]
        events: PathBuf,

        /// Session day, YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        team: String,

        #[arg(long)]
        category: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use pitchside_cli::{
        load_config, load_events, load_history, load_subjects, parse_date, run_finalize, run_ranking, run_seed,
        run_squad, run_summary,
    };
    use pitchside_core::SessionDescriptor;

    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Summary { subject, view } => {
            let history = load_history(&view.history)?;
            run_summary(&subject, &history, &viewing_context(&view)?, &config)?
        }
        Commands::Rank { subjects, view } => {
            let history = load_history(&view.history)?;
            run_ranking(&load_subjects(&subjects)?, &history, &viewing_context(&view)?)?
        }
        Commands::Squad { subjects, view } => {
            let history = load_history(&view.history)?;
            run_squad(&load_subjects(&subjects)?, &history, &viewing_context(&view)?)?
        }
        Commands::Seed { subject, history } => run_seed(&subject, &load_history(&history)?, &config)?,
        Commands::Finalize { subject, events, date, team, category } => {
            let session = SessionDescriptor::new(parse_date(&date)?, team, category);
            run_finalize(&subject, &load_events(&events)?, session, &config)?
        }
    };

    let rendered = if cli.pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    println!("{}", rendered);
    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchside_core=info,pitchside_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "cli")]
fn viewing_context(view: &ViewArgs) -> Result<pitchside_core::ViewingContext> {
    use pitchside_cli::{parse_date, parse_period};

    let today = match &view.today {
        Some(day) => parse_date(day)?,
        None => chrono::Utc::now().date_naive(),
    };
    let from = view.from.as_deref().map(parse_date).transpose()?;
    let to = view.to.as_deref().map(parse_date).transpose()?;

    let mut ctx = pitchside_core::ViewingContext::new(today).with_period(parse_period(&view.period, from, to)?);
    if let Some(category) = &view.category {
        ctx = ctx.with_category(category.clone());
    }
    Ok(ctx)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pitchside CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
