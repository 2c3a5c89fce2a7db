//! Plain-text rendering of roster rows and the detail view.

use std::fmt::Write;

use holocron_core::utils::truncate_string;
use holocron_core::{format_character, CharacterDetail, CharacterRecord};

/// Width of the name column in roster output
const NAME_WIDTH: usize = 24;

pub fn render_roster(characters: &[&CharacterRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<width$}  {:>7}  {:>8}  {:<10}  {:>5}  {:<10}  {}",
        "ID",
        "Name",
        "Height",
        "Mass",
        "Added",
        "Films",
        "Birth Year",
        "Species",
        width = NAME_WIDTH
    );

    for character in characters {
        let fields = format_character(character);
        let id = fields
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>7}  {:>8}  {:<10}  {:>5}  {:<10}  {}",
            id,
            truncate_string(&character.name, NAME_WIDTH),
            fields.height,
            fields.mass,
            fields.created,
            fields.film_count,
            fields.birth_year,
            fields.species_tag,
            width = NAME_WIDTH
        );
    }

    out
}

pub fn render_detail(detail: &CharacterDetail) -> String {
    let fields = format_character(&detail.character);
    let films = if fields.film_count == 1 { "Film" } else { "Films" };

    let mut out = String::new();
    let _ = writeln!(out, "{}", fields.first_name);
    if !fields.last_name.is_empty() {
        let _ = writeln!(out, "{}", fields.last_name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Name:        {}", detail.character.name);
    let _ = writeln!(out, "  Species:     {}", detail.species);
    let _ = writeln!(out, "  Height:      {}", fields.height);
    let _ = writeln!(out, "  Mass:        {}", fields.mass);
    let _ = writeln!(out, "  Added:       {}", fields.created);
    let _ = writeln!(out, "  Appeared In: {} {}", fields.film_count, films);
    let _ = writeln!(out, "  Birth Year:  {}", fields.birth_year);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocron_core::SpeciesName;

    fn luke() -> CharacterRecord {
        serde_json::from_value(serde_json::json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "birth_year": "19BBY",
            "created": "2014-12-09T13:50:51.644000Z",
            "films": ["https://swapi.dev/api/films/1/"],
            "species": [],
            "url": "https://swapi.dev/api/people/1/"
        }))
        .unwrap()
    }

    #[test]
    fn test_render_roster_row() {
        let luke = luke();
        let out = render_roster(&[&luke]);
        let row = out.lines().nth(1).expect("roster should have a data row");

        assert!(row.contains("Luke Skywalker"));
        assert!(row.contains("1.72m"));
        assert!(row.contains("77kg"));
        assert!(row.contains("12/09/2014"));
        assert!(row.trim_start().starts_with('1'));
    }

    #[test]
    fn test_render_roster_header_only_when_empty() {
        assert_eq!(render_roster(&[]).lines().count(), 1);
    }

    #[test]
    fn test_render_detail() {
        let detail = CharacterDetail {
            character: luke(),
            species: SpeciesName::Unknown,
        };
        let out = render_detail(&detail);

        assert!(out.starts_with("Luke\nSkywalker\n"));
        assert!(out.contains("Species:     Unknown"));
        assert!(out.contains("Appeared In: 1 Film"));
        assert!(out.contains("Birth Year:  19BBY"));
    }
}
