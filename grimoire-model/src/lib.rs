//! Record types shared across the Grimoire crates.
#![allow(missing_docs)]

pub mod character;
pub mod error;
pub mod ids;
pub mod image;
pub mod spell;

// Intentionally curated re-exports for downstream consumers.
pub use character::CharacterRecord;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{RecordKey, StoreName};
pub use image::{DisplayResource, ImagePayload};
pub use spell::SpellRecord;
