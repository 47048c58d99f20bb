use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wordle_agent::AgentCard;
use wordle_agent::WordList;
use wordle_agent::WordleHandler;
use wordle_agent::WordleServer;

/// Wordle A2A agent server.
#[derive(Parser)]
#[command(name = "wordle-agent")]
struct Cli {
    /// Port to listen on (falls back to the PORT env var, then 5001).
    #[arg(long)]
    port: Option<u16>,

    /// Newline-delimited word list.
    #[arg(long, default_value = "words.txt")]
    dictionary: PathBuf,

    /// Agent card served at /.well-known/agent.json.
    #[arg(long, default_value = "agent_card.json")]
    agent_card: PathBuf,
}

impl Cli {
    fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|port| port.parse().ok()))
            .unwrap_or(5001)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let agent_card = AgentCard::load(&cli.agent_card).context("loading agent card")?;
    let dictionary = WordList::load(&cli.dictionary).context("loading dictionary")?;
    tracing::info!(words = dictionary.len(), "dictionary loaded");

    let handler = WordleHandler::new(dictionary);
    WordleServer::new(handler, agent_card)
        .bind(format!("0.0.0.0:{}", cli.port()))
        .run()
        .await
}
