use serde::{Deserialize, Serialize};

/// Upstream marker for missing scalar data.
pub const UNKNOWN_SENTINEL: &str = "unknown";

/// A character as returned by `/people/`.
///
/// Scalars are kept as the raw upstream strings (`"172"`, `"unknown"`,
/// `"1,358"`); interpretation happens in `format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub eye_color: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CharacterRecord {
    /// First species reference, if the character has one.
    pub fn first_species(&self) -> Option<&str> {
        self.species.first().map(String::as_str)
    }

    pub fn film_count(&self) -> usize {
        self.films.len()
    }
}
