//! Business operations over the media API: one transport call each, plus
//! the response-shape specific extraction.

use async_trait::async_trait;
use rand::Rng;
use shared::{
    domain::{Character, Death, Episode, Production, Quote},
    error::FetchError,
    protocol::{
        CharacterQuery, NoQuery, ProductionQuery, CHARACTERS_PATH, DEATHS_PATH, EPISODES_PATH,
        QUOTES_RANDOM_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::transport::JsonTransport;

#[async_trait]
pub trait MediaService: Send + Sync {
    /// A random quote for `production`; the server picks it.
    async fn get_quote(&self, production: &Production) -> Result<Quote, FetchError>;
    /// First character whose name matches; an empty listing is `EmptyResult`.
    async fn get_character(&self, name: &str) -> Result<Character, FetchError>;
    /// Death record for `character_name`, or `None` if the character is alive.
    async fn get_death(&self, character_name: &str) -> Result<Option<Death>, FetchError>;
    /// One episode of `production` picked uniformly, or `None` if there are none.
    async fn get_episode(&self, production: &Production) -> Result<Option<Episode>, FetchError>;
}

/// Chooses an index in `0..len`. `len` is never zero.
pub trait IndexPicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl IndexPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

pub fn first_character(characters: Vec<Character>) -> Result<Character, FetchError> {
    characters
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::empty("characters"))
}

/// Exact, case-sensitive match on the death record's character name.
pub fn find_death(deaths: Vec<Death>, character_name: &str) -> Option<Death> {
    deaths
        .into_iter()
        .find(|death| death.character == character_name)
}

pub fn pick_episode(mut episodes: Vec<Episode>, picker: &dyn IndexPicker) -> Option<Episode> {
    if episodes.is_empty() {
        return None;
    }
    let index = picker.pick(episodes.len()).min(episodes.len() - 1);
    Some(episodes.swap_remove(index))
}

pub struct HttpMediaService {
    transport: JsonTransport,
    picker: Box<dyn IndexPicker>,
}

impl HttpMediaService {
    pub fn new(base_url: Url) -> Self {
        Self::with_transport(JsonTransport::new(base_url))
    }

    pub fn with_transport(transport: JsonTransport) -> Self {
        Self {
            transport,
            picker: Box::new(ThreadRngPicker),
        }
    }

    pub fn with_picker(mut self, picker: impl IndexPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn transport(&self) -> &JsonTransport {
        &self.transport
    }
}

#[async_trait]
impl MediaService for HttpMediaService {
    async fn get_quote(&self, production: &Production) -> Result<Quote, FetchError> {
        self.transport
            .get_json(QUOTES_RANDOM_PATH, &ProductionQuery::new(production))
            .await
    }

    async fn get_character(&self, name: &str) -> Result<Character, FetchError> {
        let characters: Vec<Character> = self
            .transport
            .get_json(
                CHARACTERS_PATH,
                &CharacterQuery {
                    name: name.to_string(),
                },
            )
            .await?;
        debug!(character = name, matches = characters.len(), "media api: character lookup");
        first_character(characters)
    }

    async fn get_death(&self, character_name: &str) -> Result<Option<Death>, FetchError> {
        let deaths: Vec<Death> = self.transport.get_json(DEATHS_PATH, &NoQuery {}).await?;
        Ok(find_death(deaths, character_name))
    }

    async fn get_episode(&self, production: &Production) -> Result<Option<Episode>, FetchError> {
        let episodes: Vec<Episode> = self
            .transport
            .get_json(EPISODES_PATH, &ProductionQuery::new(production))
            .await?;
        debug!(production = %production, count = episodes.len(), "media api: episode listing");
        Ok(pick_episode(episodes, self.picker.as_ref()))
    }
}

#[cfg(test)]
#[path = "tests/media_service_tests.rs"]
mod tests;
