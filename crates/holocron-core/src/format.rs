//! Display formatting for character records.
//!
//! `format_character` is the single place that turns raw upstream strings
//! into what the roster and detail views print. It is pure: the same record
//! always yields the same `DisplayFields`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::character::{CharacterRecord, UNKNOWN_SENTINEL};
use crate::reference::{ResourceKind, ResourceRef};
use crate::utils::format_number;

/// Shown in place of any value the upstream marks as unknown.
pub const UNKNOWN_DISPLAY: &str = "Unknown";

/// Species tag used when a character has no usable species reference.
pub const UNKNOWN_SPECIES_TAG: &str = "unknown";

/// Shown when the creation timestamp cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    /// Numeric id from the record's canonical url.
    pub id: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub height: String,
    pub mass: String,
    pub created: String,
    pub birth_year: String,
    /// `species-{id}` or `unknown`.
    pub species_tag: String,
    pub film_count: usize,
}

pub fn format_character(character: &CharacterRecord) -> DisplayFields {
    let (first_name, last_name) = split_name(&character.name);

    DisplayFields {
        id: record_id(character),
        first_name,
        last_name,
        height: format_height(&character.height),
        mass: format_mass(&character.mass),
        created: format_created(&character.created),
        birth_year: format_birth_year(&character.birth_year),
        species_tag: species_tag(character),
        film_count: character.film_count(),
    }
}

/// Id of the character itself, taken from its `url`.
pub fn record_id(character: &CharacterRecord) -> Option<u32> {
    match character.url.parse::<ResourceRef>() {
        Ok(r) if r.kind == ResourceKind::People => Some(r.id),
        Ok(r) => {
            debug!(url = %character.url, kind = %r.kind, "Character url points at another resource kind");
            None
        }
        Err(e) => {
            debug!(url = %character.url, error = %e, "Failed to parse character url");
            None
        }
    }
}

/// Split a full name into the first word and the remainder.
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

/// Centimeters to meters: `"172"` becomes `"1.72m"`.
pub fn format_height(height: &str) -> String {
    match parse_measure(height) {
        Some(cm) => format!("{}m", format_number(cm / 100.0)),
        None => UNKNOWN_DISPLAY.to_string(),
    }
}

/// `"77"` becomes `"77kg"`.
pub fn format_mass(mass: &str) -> String {
    match parse_measure(mass) {
        Some(kg) => format!("{}kg", format_number(kg)),
        None => UNKNOWN_DISPLAY.to_string(),
    }
}

/// RFC 3339 timestamp to `MM/DD/YYYY` (UTC).
pub fn format_created(created: &str) -> String {
    match DateTime::parse_from_rfc3339(created) {
        Ok(dt) => dt.with_timezone(&Utc).format("%m/%d/%Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

pub fn format_birth_year(birth_year: &str) -> String {
    display_or_unknown(birth_year)
}

/// `species-{id}` for the first species reference.
pub fn species_tag(character: &CharacterRecord) -> String {
    let Some(url) = character.first_species() else {
        return UNKNOWN_SPECIES_TAG.to_string();
    };

    match url.parse::<ResourceRef>() {
        Ok(r) => format!("species-{}", r.id),
        Err(e) => {
            debug!(url = %url, error = %e, "Failed to parse species reference");
            UNKNOWN_SPECIES_TAG.to_string()
        }
    }
}

/// Maps the upstream sentinel (and blanks) to `"Unknown"`, anything else passes through.
pub fn display_or_unknown(value: &str) -> String {
    if is_unknown(value) {
        UNKNOWN_DISPLAY.to_string()
    } else {
        value.to_string()
    }
}

fn is_unknown(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == UNKNOWN_SENTINEL
}

/// Numeric measurement with thousands separators allowed (`"1,358"`).
fn parse_measure(value: &str) -> Option<f64> {
    if is_unknown(value) {
        return None;
    }
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
