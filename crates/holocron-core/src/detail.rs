//! Single character lookup.
//!
//! The character fetch is the only failure callers see. The species name
//! is best effort: no reference, or a failed lookup, both resolve to
//! `SpeciesName::Unknown`.

use std::fmt;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::format::UNKNOWN_DISPLAY;
use crate::models::CharacterRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpeciesName {
    Named(String),
    Unknown,
}

impl SpeciesName {
    pub fn as_str(&self) -> &str {
        match self {
            SpeciesName::Named(name) => name,
            SpeciesName::Unknown => UNKNOWN_DISPLAY,
        }
    }
}

impl fmt::Display for SpeciesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CharacterDetail {
    pub character: CharacterRecord,
    pub species: SpeciesName,
}

#[derive(Clone)]
pub struct DetailFetcher {
    client: ApiClient,
}

impl DetailFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch character `id` and resolve its first species.
    pub async fn fetch(&self, id: u32) -> Result<CharacterDetail> {
        let character = self.client.fetch_character(id).await?;
        let species = self.resolve_species(&character).await;

        Ok(CharacterDetail { character, species })
    }

    /// Name of the character's first species. Never fails.
    pub async fn resolve_species(&self, character: &CharacterRecord) -> SpeciesName {
        let Some(url) = character.first_species() else {
            debug!(name = %character.name, "No species reference");
            return SpeciesName::Unknown;
        };

        match self.client.fetch_species(url).await {
            Ok(species) => SpeciesName::Named(species.name),
            Err(e) => {
                warn!(url = url, error = %e, "Error fetching species data");
                SpeciesName::Unknown
            }
        }
    }
}
