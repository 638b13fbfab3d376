//! Browser binding for the Grimoire carousel.
//!
//! Exposes `initializeGrimoireCarousel(modal, ownerKey, deps)` to JavaScript.
//! The DOM surface, input wiring and JS-backed collaborators only build for
//! `wasm32`; the markup helpers and error types build everywhere so they can
//! be tested natively.

#![allow(missing_docs)]

pub mod error;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod collaborators;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(target_arch = "wasm32")]
mod input;

pub use error::{Result, WebError};

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
#[cfg(target_arch = "wasm32")]
pub use entry::{GrimoireCarousel, initialize_grimoire_carousel};
