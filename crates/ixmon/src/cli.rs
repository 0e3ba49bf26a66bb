//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ixmon_types::KbStatus;

#[derive(Parser, Debug)]
#[command(
    name = "ixmon",
    version,
    about = "Certificate health, correlation and metrics for Patient Discovery exchange feeds."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file. Defaults to `./ixmon.toml`, then `<config dir>/ixmon/ixmon.toml`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Health status, metrics and annotated executions.
    Summary(SummaryArgs),

    /// Everything correlated with one request id.
    Drill(DrillArgs),

    /// Knowledge-base articles.
    Kb(KbArgs),

    /// Organization identifier directory.
    Oid(OidArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FeedArgs {
    /// Directory holding the feed files (overrides settings).
    #[arg(long, value_name = "DIR")]
    pub feeds: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub feeds: FeedArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DrillArgs {
    /// PD request id to look up.
    pub request_id: String,

    #[command(flatten)]
    pub feeds: FeedArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct OidArgs {
    /// Show a single OID instead of the whole directory.
    #[arg(long)]
    pub lookup: Option<String>,

    #[command(flatten)]
    pub feeds: FeedArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct KbArgs {
    #[command(subcommand)]
    pub command: KbCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum KbCommands {
    /// List stored articles (seeding the store on first use).
    List(KbListArgs),

    /// Record a governance decision against a case.
    Upsert(KbUpsertArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct KbStoreArgs {
    /// Directory for the article store (overrides settings).
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Directory holding `cases.json`, used to seed an empty store.
    #[arg(long, value_name = "DIR")]
    pub feeds: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct KbListArgs {
    #[command(flatten)]
    pub store: KbStoreArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct KbUpsertArgs {
    /// JSON file holding the governance case.
    #[arg(long, value_name = "FILE")]
    pub case: PathBuf,

    /// Decision text. Falls back to the case's selected decision.
    #[arg(long)]
    pub decision: Option<String>,

    #[arg(long, value_enum, default_value_t = ArticleStatus::Queued)]
    pub status: ArticleStatus,

    #[command(flatten)]
    pub store: KbStoreArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArticleStatus {
    Queued,
    Draft,
    Published,
}

impl From<ArticleStatus> for KbStatus {
    fn from(status: ArticleStatus) -> Self {
        match status {
            ArticleStatus::Queued => KbStatus::Queued,
            ArticleStatus::Draft => KbStatus::Draft,
            ArticleStatus::Published => KbStatus::Published,
        }
    }
}
