use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{EmptyEpisodePolicy, HttpMediaService, Orchestrator, Seed, Status};
use shared::domain::Production;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "bbquotes", about = "Random quotes and episodes from the Breaking Bad universe")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    /// Directory holding samplequote.json, samplecharacter.json, sampleepisode.json
    /// and optionally sampledeath.json. Defaults to the bundled samples.
    #[arg(long)]
    seed_dir: Option<PathBuf>,
    #[arg(long)]
    empty_episode: Option<EmptyEpisodePolicy>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a random quote with its character and death record.
    Quote {
        #[arg(long)]
        show: Option<String>,
    },
    /// Fetch a random episode.
    Episode {
        #[arg(long)]
        show: Option<String>,
    },
    /// List the shows the API knows about.
    Shows,
}

#[derive(Debug, Clone, Copy)]
enum Pipeline {
    Quote,
    Episode,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(v) = cli.base_url {
        settings.base_url = v;
    }
    if let Some(v) = cli.seed_dir {
        settings.seed_dir = Some(v);
    }
    if let Some(v) = cli.empty_episode {
        settings.empty_episode = v;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (pipeline, show) = match cli.command {
        Command::Shows => {
            for production in Production::known() {
                println!("{production}");
            }
            return Ok(());
        }
        Command::Quote { show } => (Pipeline::Quote, show),
        Command::Episode { show } => (Pipeline::Episode, show),
    };
    let show = Production::new(show.unwrap_or_else(|| settings.production.clone()));

    let base_url = settings.base_url()?;
    let seed = match &settings.seed_dir {
        Some(dir) => Seed::load_from_dir(dir),
        None => Seed::bundled(),
    }
    .context("seed data failed validation")?;

    info!(
        base_url = %base_url,
        production = %show,
        empty_episode = %settings.empty_episode,
        "bbquotes starting"
    );

    let orchestrator = Orchestrator::with_empty_episode_policy(
        Arc::new(HttpMediaService::new(base_url)),
        seed,
        settings.empty_episode,
    );

    let mut events = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        while let Ok(status) = events.recv().await {
            eprintln!("[{}]", status.description());
            if status.is_terminal_for_run() {
                break;
            }
        }
    });

    let status = match pipeline {
        Pipeline::Quote => orchestrator.request_quote(&show).await,
        Pipeline::Episode => orchestrator.request_episode(&show).await,
    };
    let _ = progress.await;

    let view = orchestrator.snapshot().await;
    println!("{}", render::render_view(&view));

    match status {
        Status::Failed(err) => Err(anyhow!(err).context(format!("fetch for '{show}' failed"))),
        _ => Ok(()),
    }
}
