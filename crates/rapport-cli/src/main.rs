use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rapport_ai::ProviderConfig;
use rapport_core::{DraftStore, EntityKind, Provider};
use rapport_store::JsonFileDraftStore;
use tracing_subscriber::EnvFilter;

mod display;
mod enrich;
mod sources;

#[derive(Parser, Debug)]
#[command(name = "rapport", about = "CRM onboarding with dual-provider AI enrichment", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich an entity with both providers, compare, and optionally select one
    Enrich(EnrichArgs),
    /// Inspect or discard the saved wizard draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
        #[arg(long, env = "RAPPORT_DRAFT", default_value = "rapport-draft.json")]
        draft: PathBuf,
    },
    /// Simulated data-source connectors
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },
}

#[derive(Args, Debug)]
struct EnrichArgs {
    /// Entity name; taken from the saved draft when omitted
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    website: Option<String>,
    /// Social profile URL (LinkedIn or similar)
    #[arg(long)]
    profile: Option<String>,
    #[arg(long, value_enum, default_value_t = KindArg::Client)]
    kind: KindArg,
    /// Provider to keep: a, b, or whichever the comparison recommends
    #[arg(long, value_enum)]
    select: Option<Choice>,
    /// Owner id to persist the selected record under
    #[arg(long, env = "RAPPORT_OWNER")]
    owner: Option<String>,
    #[arg(long, env = "RAPPORT_DB", default_value = "rapport.duckdb")]
    db: PathBuf,
    #[arg(long, env = "RAPPORT_DRAFT", default_value = "rapport-draft.json")]
    draft: PathBuf,
    #[command(flatten)]
    remote: RemoteArgs,
}

#[derive(Args, Debug)]
struct RemoteArgs {
    #[arg(long, env = "RAPPORT_PROVIDER_A_URL")]
    provider_a_url: String,
    #[arg(long, env = "RAPPORT_PROVIDER_B_URL")]
    provider_b_url: String,
    #[arg(long, env = "RAPPORT_COMPARE_URL")]
    compare_url: String,
    /// Bearer token sent to every function
    #[arg(long, env = "RAPPORT_TOKEN", hide_env_values = true)]
    token: String,
    /// Per-call timeout in seconds
    #[arg(long, env = "RAPPORT_TIMEOUT_SECS", default_value_t = 90)]
    timeout_secs: u64,
}

impl RemoteArgs {
    fn config(&self, endpoint: &str) -> ProviderConfig {
        ProviderConfig::new(endpoint, &self.token)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Client,
    Company,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Client => EntityKind::Client,
            KindArg::Company => EntityKind::Company,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Choice {
    A,
    B,
    Recommended,
}

impl Choice {
    fn resolve(self, recommended: Option<Provider>) -> Result<Provider> {
        match self {
            Choice::A => Ok(Provider::A),
            Choice::B => Ok(Provider::B),
            Choice::Recommended => match recommended {
                Some(p) => Ok(p),
                None => bail!("no comparison is available; select a or b explicitly"),
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum DraftAction {
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
enum SourcesAction {
    /// List the connector catalog
    List,
    /// Connect a connector and stream what it ingests
    Connect {
        connector: String,
        #[arg(long, default_value = "1")]
        client: String,
        /// Manual syncs to run after connecting
        #[arg(long, default_value_t = 0)]
        syncs: u32,
    },
    /// Upload files through the documents connector
    Upload {
        #[arg(required = true)]
        files: Vec<String>,
        #[arg(long, default_value = "1")]
        client: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing::debug!("rapport v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Enrich(args) => enrich::run(args).await,
        Command::Draft { action, draft } => run_draft(action, draft),
        Command::Sources { action } => sources::run(action).await,
    }
}

fn run_draft(action: DraftAction, path: PathBuf) -> Result<()> {
    let store = JsonFileDraftStore::new(&path);
    match action {
        DraftAction::Show => match store
            .load()
            .with_context(|| format!("reading draft {}", path.display()))?
        {
            Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
            None => println!("No saved draft at {}", path.display()),
        },
        DraftAction::Clear => {
            store
                .clear()
                .with_context(|| format!("removing draft {}", path.display()))?;
            println!("Draft cleared.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn recommended_needs_a_comparison() {
        assert_eq!(Choice::Recommended.resolve(Some(Provider::B)).unwrap(), Provider::B);
        assert_eq!(Choice::A.resolve(None).unwrap(), Provider::A);
        assert!(Choice::Recommended.resolve(None).is_err());
    }

    #[test]
    fn sources_connect_parses_syncs() {
        let cli = Cli::try_parse_from(["rapport", "sources", "connect", "zoom", "--syncs", "2"])
            .unwrap();
        match cli.command {
            Command::Sources {
                action: SourcesAction::Connect { connector, client, syncs },
            } => {
                assert_eq!(connector, "zoom");
                assert_eq!(client, "1");
                assert_eq!(syncs, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
