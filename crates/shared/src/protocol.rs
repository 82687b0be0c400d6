use serde::{Deserialize, Serialize};

use crate::domain::Production;

pub const QUOTES_RANDOM_PATH: &str = "quotes/random";
pub const CHARACTERS_PATH: &str = "characters";
pub const DEATHS_PATH: &str = "deaths";
pub const EPISODES_PATH: &str = "episodes";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionQuery {
    pub production: Production,
}

impl ProductionQuery {
    pub fn new(production: &Production) -> Self {
        Self {
            production: production.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterQuery {
    pub name: String,
}

/// Query for endpoints that take no parameters, such as the deaths listing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoQuery {}
