//! Grimoire carousel core
//!
//! A looping, draggable strip of spell cards. The pieces, leaf first:
//!
//! - [`loop_buffer`] replicates boundary items so motion past either end of
//!   the collection continues seamlessly.
//! - [`engine`] is the navigation state machine (idle, dragging, settling)
//!   that centers the active item and teleports across the loop seam.
//! - [`thumbnails`] tracks the one-per-item thumbnail strip.
//! - [`controller`] routes input events into the engine.
//! - [`lifecycle`] fetches the collection, mounts everything and hands back a
//!   disposal handle.
//!
//! Rendering goes through the [`surface::CarouselSurface`] trait; the browser
//! binding lives in the `grimoire-web` crate.

#![allow(missing_docs)]

pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod loop_buffer;
pub mod surface;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod thumbnails;
pub mod transition;

pub use config::{CarouselConfig, ConfigError, Messages};
pub use controller::CarouselController;
pub use engine::{CarouselEngine, CarouselItem, Direction, DragAnchor, EngineSnapshot, Phase};
pub use error::{CarouselError, Result};
pub use lifecycle::{CarouselHandle, Dependencies, initialize_carousel};
pub use loop_buffer::{LoopBuffer, Origin, Slot};
pub use surface::{Bindings, CarouselSurface};
pub use thumbnails::{Thumbnail, ThumbnailStrip};
pub use transition::{Easing, Transition};
