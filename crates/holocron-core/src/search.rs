use crate::models::CharacterRecord;
use crate::utils::contains_ignore_case;

/// Characters whose name contains `query`, ignoring case and surrounding
/// whitespace. Catalog order is preserved; an empty query matches everything.
pub fn filter_by_name<'a>(characters: &'a [CharacterRecord], query: &str) -> Vec<&'a CharacterRecord> {
    let needle = query.trim().to_lowercase();
    characters
        .iter()
        .filter(|c| contains_ignore_case(&c.name, &needle))
        .collect()
}
