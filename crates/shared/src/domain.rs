use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Show identifier used as the `production` filter on the media API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Production(pub String);

impl Production {
    pub const BREAKING_BAD: &'static str = "Breaking Bad";
    pub const BETTER_CALL_SAUL: &'static str = "Better Call Saul";
    pub const EL_CAMINO: &'static str = "El Camino";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn breaking_bad() -> Self {
        Self::new(Self::BREAKING_BAD)
    }

    pub fn better_call_saul() -> Self {
        Self::new(Self::BETTER_CALL_SAUL)
    }

    pub fn el_camino() -> Self {
        Self::new(Self::EL_CAMINO)
    }

    /// The shows the API is known to serve, in tab order.
    pub fn known() -> [Production; 3] {
        [
            Self::breaking_bad(),
            Self::better_call_saul(),
            Self::el_camino(),
        ]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Production {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Production {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "quote")]
    pub text: String,
    /// Name of the speaking character; resolves through the characters endpoint.
    pub character: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub birthday: String,
    pub occupations: Vec<String>,
    pub images: Vec<Url>,
    pub aliases: Vec<String>,
    pub status: String,
    pub portrayed_by: String,
    /// Filled in by the quote pipeline's death lookup, never by the wire payload.
    #[serde(skip_deserializing, default, skip_serializing_if = "Option::is_none")]
    pub death: Option<Death>,
}

impl Character {
    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub character: String,
    pub image: Url,
    pub details: String,
    pub last_words: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// `season * 100 + episode`, e.g. 305 is season 3 episode 5.
    pub episode: u32,
    pub title: String,
    pub image: Url,
    pub synopsis: String,
    pub written_by: String,
    pub directed_by: String,
    pub air_date: String,
}

impl Episode {
    pub fn season(&self) -> u32 {
        self.episode / 100
    }

    pub fn episode_number(&self) -> u32 {
        self.episode % 100
    }

    pub fn season_episode(&self) -> String {
        format!("Season {} Episode {}", self.season(), self.episode_number())
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
