//! Typed parsing of SWAPI resource URLs.
//!
//! SWAPI links resources by absolute URL (`https://swapi.dev/api/species/1/`).
//! `ResourceRef` pulls out the resource kind and numeric id so callers never
//! slice URL strings by hand.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty resource reference")]
    Empty,

    #[error("Resource reference has no kind segment: {0}")]
    MissingKind(String),

    #[error("Invalid resource id: {0}")]
    InvalidId(String),

    #[error("Unknown resource kind: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    People,
    Films,
    Planets,
    Species,
    Starships,
    Vehicles,
}

impl ResourceKind {
    /// Path segment used by the API for this kind.
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceKind::People => "people",
            ResourceKind::Films => "films",
            ResourceKind::Planets => "planets",
            ResourceKind::Species => "species",
            ResourceKind::Starships => "starships",
            ResourceKind::Vehicles => "vehicles",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "people" => Ok(ResourceKind::People),
            "films" => Ok(ResourceKind::Films),
            "planets" => Ok(ResourceKind::Planets),
            "species" => Ok(ResourceKind::Species),
            "starships" => Ok(ResourceKind::Starships),
            "vehicles" => Ok(ResourceKind::Vehicles),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A parsed `{kind}/{id}` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: u32,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: u32) -> Self {
        Self { kind, id }
    }

    /// Canonical URL for this resource under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/{}/", base_url.trim_end_matches('/'), self.kind, self.id)
    }
}

impl FromStr for ResourceRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        // Query strings never carry the id
        let path = trimmed.split(['?', '#']).next().unwrap_or_default();

        let mut segments = path.split('/').filter(|seg| !seg.is_empty()).rev();
        let id_segment = segments.next().ok_or(ParseError::Empty)?;
        let kind_segment = segments
            .next()
            .ok_or_else(|| ParseError::MissingKind(trimmed.to_string()))?;

        let id = id_segment
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidId(id_segment.to_string()))?;
        let kind = kind_segment.parse::<ResourceKind>()?;

        Ok(Self { kind, id })
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Convenience wrapper around `ResourceRef::from_str`.
pub fn parse_reference(url: &str) -> Result<ResourceRef, ParseError> {
    url.parse()
}
