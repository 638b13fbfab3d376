//! Carousel constants
//!
//! Compiled defaults for loop, motion and presentation behavior. Runtime
//! overrides go through [`crate::config::CarouselConfig`]; tuning of the
//! defaults should happen here so every carousel updates consistently.

/// Loop buffer shape.
pub mod looping {
    /// Boundary items replicated on each side of the real items.
    pub const MAX_CLONE_COUNT: usize = 3;
}

/// Settle animation defaults.
pub mod motion {
    /// Duration of the settle transition (ms).
    pub const SETTLE_DURATION_MS: u64 = 500;
    /// Control points of the settle easing curve (easeInOutQuart-like).
    pub const SETTLE_BEZIER: (f32, f32, f32, f32) = (0.77, 0.0, 0.175, 1.0);
    /// Interval of the optional auto-rotation (ms). Auto-rotation is off
    /// unless a config sets `autoRotateMs`.
    pub const AUTO_ROTATE_INTERVAL_MS: u64 = 4000;
    /// Offsets closer than this (px) count as unchanged, so no transition
    /// will run and no transition-finished event will arrive.
    pub const STILL_OFFSET_EPSILON_PX: f64 = 0.5;
    /// Upper bound accepted for configured durations (ms).
    pub const MAX_DURATION_MS: u64 = 10_000;
}

/// Card presentation inside the strip.
pub mod presentation {
    /// Scale applied to cards mounted in the carousel.
    pub const ITEM_SCALE: f32 = 0.8;
    /// Fixed card height inside the carousel (px).
    pub const CARD_HEIGHT_PX: u32 = 500;
    /// Image shown when a record has no image or the image cannot be resolved.
    pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/160x160/14b8a6/1f2937?text=Magia";
    /// Record kind shown by the spell carousel.
    pub const REQUIRED_KIND: &str = "magia";
}

/// User-facing status messages.
pub mod messages {
    pub const LOADING: &str = "Carregando grimório...";
    pub const NO_LINKED_ITEMS: &str = "Este personagem não conhece magias ou habilidades.";
    pub const NO_MATCHING_ITEMS: &str = "Este personagem não conhece magias.";
}
