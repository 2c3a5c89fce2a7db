//! Data models for SWAPI resources.
//!
//! - `CharacterRecord`: one entry from the `people` endpoint
//! - `Species`: the subset of the `species` resource used for display
//! - `Page`: the paginated listing envelope

pub mod character;
pub mod page;
pub mod species;

pub use character::CharacterRecord;
pub use page::Page;
pub use species::Species;
