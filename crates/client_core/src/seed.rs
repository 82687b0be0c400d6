//! Initial values held by the orchestrator before the first fetch completes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use shared::domain::{Character, Death, Episode, Quote};
use thiserror::Error;

pub const QUOTE_FILE: &str = "samplequote.json";
pub const CHARACTER_FILE: &str = "samplecharacter.json";
pub const DEATH_FILE: &str = "sampledeath.json";
pub const EPISODE_FILE: &str = "sampleepisode.json";

const BUNDLED_QUOTE: &str = include_str!("../seed/samplequote.json");
const BUNDLED_CHARACTER: &str = include_str!("../seed/samplecharacter.json");
const BUNDLED_DEATH: &str = include_str!("../seed/sampledeath.json");
const BUNDLED_EPISODE: &str = include_str!("../seed/sampleepisode.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid seed data in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub quote: Quote,
    pub character: Character,
    pub episode: Episode,
}

impl Seed {
    /// Seed data compiled into the binary.
    pub fn bundled() -> Result<Self, SeedError> {
        let mut character: Character = parse(Path::new(CHARACTER_FILE), BUNDLED_CHARACTER)?;
        character.death = Some(parse(Path::new(DEATH_FILE), BUNDLED_DEATH)?);
        Ok(Self {
            quote: parse(Path::new(QUOTE_FILE), BUNDLED_QUOTE)?,
            character,
            episode: parse(Path::new(EPISODE_FILE), BUNDLED_EPISODE)?,
        })
    }

    /// Reads seed files from `dir`. The death file is optional; when present
    /// it is attached to the seed character.
    pub fn load_from_dir(dir: &Path) -> Result<Self, SeedError> {
        let mut character: Character = read(&dir.join(CHARACTER_FILE))?;
        let death_path = dir.join(DEATH_FILE);
        if death_path.exists() {
            character.death = Some(read::<Death>(&death_path)?);
        }
        Ok(Self {
            quote: read(&dir.join(QUOTE_FILE))?,
            character,
            episode: read(&dir.join(EPISODE_FILE))?,
        })
    }
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &raw)
}

fn parse<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<T, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/seed_tests.rs"]
mod tests;
