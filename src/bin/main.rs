//! DigiDock CLI
//!
//!   digidock serve [--port N]             → Run the vault server
//!   digidock upload <file> [--name N]     → Pin a file, output {"ipfsHash": ...}
//!   digidock list                         → Output {"docs": [...]}
//!   digidock delete <hash> [--yes]        → Output {"success": true}
//!
//! Client commands talk to `--server` (or `DIGIDOCK_SERVER`) as the wallet
//! given by `--wallet` (or `DIGIDOCK_WALLET`).
//!
//! Output format:
//!   JSON on stdout, pretty on a tty or with --pretty.
//!   Errors as {"error": ...} on stderr, exit status 1.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;

use digidock::core::paths::{env, DEFAULT_SERVER_URL};
use digidock::logging::init_logging;
use digidock::{
    install_signal_handlers, ApiClient, Notice, SelectedFile, StaticWallet, Vault, VaultApi, VaultConfig, VaultSession,
};

#[derive(Parser)]
#[command(name = "digidock", version, about = "Wallet-keyed document vault on IPFS")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Vault server URL
    #[arg(long, global = true, env = env::SERVER, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Wallet address to act as
    #[arg(long, short = 'w', global = true, env = env::WALLET)]
    wallet: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Upload a file to the vault
    Upload {
        file: PathBuf,
        /// Document name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the wallet's documents
    #[command(alias = "ls")]
    List,
    /// Unpin and remove a document
    Delete {
        /// Content identifier (ipfsHash)
        hash: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let pretty = cli.pretty || io::stdout().is_terminal();

    let result = match &cli.command {
        Command::Serve { port } => cmd_serve(*port).await,
        Command::Upload { file, name } => cmd_upload(&cli, file, name.as_deref()).await,
        Command::List => cmd_list(&cli).await,
        Command::Delete { hash, yes } => cmd_delete(&cli, hash, *yes).await,
    };

    match result {
        Ok(Value::Null) => {}
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({ "error": format!("{:#}", e) }), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

async fn cmd_serve(port: Option<u16>) -> anyhow::Result<Value> {
    let mut config = VaultConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    let vault = Vault::connect(&config).await?;
    let shutdown = install_signal_handlers();
    digidock::server::serve(&config, Arc::new(vault), shutdown).await?;
    Ok(Value::Null)
}

/// Session connected as the configured wallet.
async fn session(cli: &Cli) -> anyhow::Result<VaultSession<ApiClient>> {
    let wallet = cli
        .wallet
        .as_deref()
        .ok_or_else(|| anyhow!("Please connect your wallet. (pass --wallet or set {})", env::WALLET))?;
    let mut session = VaultSession::new(ApiClient::new(&cli.server)?);
    session.connect(&StaticWallet::new(wallet)).await?;
    debug!(server = %cli.server, wallet = %wallet, "session connected");
    Ok(session)
}

async fn cmd_upload(cli: &Cli, file: &Path, name: Option<&str>) -> anyhow::Result<Value> {
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("cannot derive a name from {}", file.display()))?,
    };

    let mut session = session(cli).await?;
    session.select_file(SelectedFile::new(name, bytes));
    match session.upload().await {
        Ok(Notice::Uploaded(hash)) => Ok(json!({ "ipfsHash": hash })),
        Ok(other) => Ok(json!({ "message": other.to_string() })),
        Err(e) => Err(anyhow!("{}: {}", e, e.detail())),
    }
}

async fn cmd_list(cli: &Cli) -> anyhow::Result<Value> {
    // Straight through the API: a session would swallow a failed fetch.
    let session = session(cli).await?;
    let wallet = session.wallet().unwrap_or_default();
    let docs = session.api().list(wallet).await?;
    Ok(json!({ "docs": serde_json::to_value(docs)? }))
}

async fn cmd_delete(cli: &Cli, hash: &str, yes: bool) -> anyhow::Result<Value> {
    let confirmed = yes || confirm(&format!("Delete {}? [y/N] ", hash))?;
    let mut session = session(cli).await?;
    match session.delete(hash, confirmed).await {
        Ok(Some(_)) => Ok(json!({ "success": true })),
        Ok(None) => Ok(json!({ "success": false, "cancelled": true })),
        Err(e) => Err(anyhow!("{}: {}", e, e.detail())),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
