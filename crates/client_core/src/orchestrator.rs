//! Stateful coordinator behind the presentation layer.
//!
//! All held results and the [`Status`] live behind one mutex and are only
//! written here. Each pipeline run takes a fresh generation when it enters
//! `Fetching`; writes from a run whose generation is no longer current are
//! dropped, so the latest trigger always owns the final state.

use std::{fmt, str::FromStr, sync::Arc};

use serde::Deserialize;
use shared::{
    domain::{Character, Episode, Production, Quote},
    error::FetchError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{media_service::MediaService, seed::Seed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Fetching,
    QuoteReady,
    EpisodeReady,
    Failed(FetchError),
}

impl Status {
    pub fn is_terminal_for_run(&self) -> bool {
        !matches!(self, Self::NotStarted | Self::Fetching)
    }

    /// Text the presentation layer shows for this status.
    pub fn description(&self) -> String {
        match self {
            Self::NotStarted => "Nothing fetched yet".to_string(),
            Self::Fetching => "Fetching...".to_string(),
            Self::QuoteReady => "Quote ready".to_string(),
            Self::EpisodeReady => "Episode ready".to_string(),
            Self::Failed(err) => err.to_string(),
        }
    }
}

/// What to do when the episodes listing for a show comes back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyEpisodePolicy {
    /// Report `EpisodeReady` and keep showing the previously held episode.
    #[default]
    KeepStale,
    /// Report `Failed(EmptyResult)`.
    Fail,
}

impl FromStr for EmptyEpisodePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "keep_stale" => Ok(Self::KeepStale),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown empty episode policy '{other}' (expected keep_stale or fail)"
            )),
        }
    }
}

impl fmt::Display for EmptyEpisodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepStale => f.write_str("keep_stale"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Read-only copy of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub status: Status,
    pub quote: Quote,
    pub character: Character,
    pub episode: Episode,
}

struct HeldState {
    view: ViewState,
    generation: u64,
}

enum PipelineError {
    Fetch(FetchError),
    Superseded,
}

impl From<FetchError> for PipelineError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

pub struct Orchestrator {
    service: Arc<dyn MediaService>,
    empty_episode: EmptyEpisodePolicy,
    inner: Mutex<HeldState>,
    events: broadcast::Sender<Status>,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn MediaService>, seed: Seed) -> Arc<Self> {
        Self::with_empty_episode_policy(service, seed, EmptyEpisodePolicy::default())
    }

    pub fn with_empty_episode_policy(
        service: Arc<dyn MediaService>,
        seed: Seed,
        empty_episode: EmptyEpisodePolicy,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            empty_episode,
            inner: Mutex::new(HeldState {
                view: ViewState {
                    status: Status::NotStarted,
                    quote: seed.quote,
                    character: seed.character,
                    episode: seed.episode,
                },
                generation: 0,
            }),
            events,
        })
    }

    pub fn empty_episode_policy(&self) -> EmptyEpisodePolicy {
        self.empty_episode
    }

    pub async fn status(&self) -> Status {
        self.inner.lock().await.view.status.clone()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.inner.lock().await.view.clone()
    }

    /// Every status transition, in the order it was applied.
    pub fn subscribe(&self) -> broadcast::Receiver<Status> {
        self.events.subscribe()
    }

    /// Fetches a quote, its character and the character's death record, in
    /// that order. Each result is committed as soon as it arrives; the first
    /// failure ends the run with `Failed`.
    pub async fn request_quote(&self, production: &Production) -> Status {
        let generation = self.begin().await;
        info!(production = %production, generation, "pipeline: quote requested");

        match self.run_quote(generation, production).await {
            Ok(()) => {
                self.finish(generation, Status::QuoteReady).await;
            }
            Err(PipelineError::Fetch(err)) => {
                warn!(production = %production, generation, error = %err, "pipeline: quote failed");
                self.finish(generation, Status::Failed(err)).await;
            }
            Err(PipelineError::Superseded) => {}
        }

        self.status().await
    }

    /// Fetches one random episode. An empty listing is handled according to
    /// the configured [`EmptyEpisodePolicy`].
    pub async fn request_episode(&self, production: &Production) -> Status {
        let generation = self.begin().await;
        info!(production = %production, generation, "pipeline: episode requested");

        let status = match self.service.get_episode(production).await {
            Ok(Some(episode)) => {
                if self
                    .commit(generation, |view| view.episode = episode)
                    .await
                    .is_err()
                {
                    return self.status().await;
                }
                Status::EpisodeReady
            }
            Ok(None) => match self.empty_episode {
                EmptyEpisodePolicy::KeepStale => {
                    warn!(
                        production = %production,
                        generation,
                        "pipeline: no episodes returned, keeping previous episode"
                    );
                    Status::EpisodeReady
                }
                EmptyEpisodePolicy::Fail => Status::Failed(FetchError::empty("episodes")),
            },
            Err(err) => {
                warn!(production = %production, generation, error = %err, "pipeline: episode failed");
                Status::Failed(err)
            }
        };

        self.finish(generation, status).await;
        self.status().await
    }

    async fn run_quote(
        &self,
        generation: u64,
        production: &Production,
    ) -> Result<(), PipelineError> {
        let quote = self.service.get_quote(production).await?;
        let speaker = quote.character.clone();
        self.commit(generation, |view| view.quote = quote).await?;

        let character = self.service.get_character(&speaker).await?;
        let name = character.name.clone();
        self.commit(generation, |view| view.character = character)
            .await?;

        let death = self.service.get_death(&name).await?;
        debug!(character = %name, dead = death.is_some(), generation, "pipeline: death lookup done");
        self.commit(generation, |view| view.character.death = death)
            .await?;

        Ok(())
    }

    async fn begin(&self) -> u64 {
        let mut guard = self.inner.lock().await;
        guard.generation += 1;
        guard.view.status = Status::Fetching;
        let _ = self.events.send(Status::Fetching);
        guard.generation
    }

    async fn commit(
        &self,
        generation: u64,
        write: impl FnOnce(&mut ViewState),
    ) -> Result<(), PipelineError> {
        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            debug!(
                generation,
                current = guard.generation,
                "pipeline: dropping result from superseded run"
            );
            return Err(PipelineError::Superseded);
        }
        write(&mut guard.view);
        Ok(())
    }

    async fn finish(&self, generation: u64, status: Status) {
        let event = status.clone();
        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            debug!(
                generation,
                current = guard.generation,
                "pipeline: dropping status from superseded run"
            );
            return;
        }
        guard.view.status = status;
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
