//! Carousel configuration.
//!
//! Every field has a compiled default from [`crate::constants`], so a config
//! object only needs to name what it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{looping, messages, motion, presentation};
use crate::transition::Transition;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Config could not be parsed: {0}")]
    Parse(String),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Status texts shown in place of the strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub loading: String,
    pub no_linked_items: String,
    pub no_matching_items: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: messages::LOADING.to_string(),
            no_linked_items: messages::NO_LINKED_ITEMS.to_string(),
            no_matching_items: messages::NO_MATCHING_ITEMS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Upper bound on boundary clones per side; the effective count is
    /// `min(max_clone_count, N)` and zero for a single item.
    pub max_clone_count: usize,
    pub transition: Transition,
    /// Auto-advance interval. `None` disables auto-rotation.
    pub auto_rotate_ms: Option<u64>,
    pub placeholder_image: String,
    /// Only records of this kind are shown.
    pub required_kind: String,
    pub messages: Messages,
    pub item_scale: f32,
    pub card_height_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            max_clone_count: looping::MAX_CLONE_COUNT,
            transition: Transition::default(),
            auto_rotate_ms: None,
            placeholder_image: presentation::PLACEHOLDER_IMAGE.to_string(),
            required_kind: presentation::REQUIRED_KIND.to_string(),
            messages: Messages::default(),
            item_scale: presentation::ITEM_SCALE,
            card_height_px: presentation::CARD_HEIGHT_PX,
        }
    }
}

impl CarouselConfig {
    /// Parse a JSON config object and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with auto-rotation at the standard interval.
    pub fn with_auto_rotate(mut self) -> Self {
        self.auto_rotate_ms = Some(motion::AUTO_ROTATE_INTERVAL_MS);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition.duration_ms > motion::MAX_DURATION_MS {
            return Err(ConfigError::invalid(
                "transition.durationMs",
                format!("{} exceeds {}", self.transition.duration_ms, motion::MAX_DURATION_MS),
            ));
        }
        if !self.transition.easing.is_valid() {
            return Err(ConfigError::invalid(
                "transition.easing",
                "cubic-bezier x values must lie in [0, 1]",
            ));
        }
        if self.auto_rotate_ms == Some(0) {
            return Err(ConfigError::invalid("autoRotateMs", "interval must be positive"));
        }
        if !(self.item_scale.is_finite() && self.item_scale > 0.0) {
            return Err(ConfigError::invalid(
                "itemScale",
                format!("{} is not a positive scale", self.item_scale),
            ));
        }
        if self.card_height_px == 0 {
            return Err(ConfigError::invalid("cardHeightPx", "height must be positive"));
        }
        if self.required_kind.trim().is_empty() {
            return Err(ConfigError::invalid("requiredKind", "kind must not be empty"));
        }
        Ok(())
    }
}
