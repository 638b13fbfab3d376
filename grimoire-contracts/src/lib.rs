//! Trait surfaces that describe the collaborators of the Grimoire carousel.
//!
//! The carousel never talks to a database, an image decoder or a template
//! engine directly. It is handed implementations of these traits: the browser
//! binding backs them with JS functions, native tests back them with in-memory
//! fakes.

#![allow(missing_docs)]

pub mod render;
pub mod resource;
pub mod store;

/// Frequently used trait combinators for orchestration crates.
pub mod prelude {
    pub use super::render::{CardFactory, CardPresentation, RenderError, SpellCard};
    pub use super::resource::{ResolveError, ResourceResolver};
    pub use super::store::{RecordStore, StoreError, StoreResult};
}
