use async_trait::async_trait;
use grimoire_model::{DisplayResource, SpellRecord};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Card template failed for '{name}': {message}")]
    Template { name: String, message: String },

    #[error("Rendered card is missing element '{0}'")]
    MissingElement(String),
}

/// How a card is laid out when it lives inside the carousel strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPresentation {
    /// Static cards skip entrance animations and hover tilt.
    pub is_static: bool,
    pub scale: f32,
    pub height_px: u32,
}

/// Everything a card template needs for one spell.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellCard {
    pub record: SpellRecord,
    pub image: DisplayResource,
    pub presentation: CardPresentation,
}

/// Builds one self-contained, flip-capable card element per record.
///
/// Invoked once per item, all concurrently; each call must resolve on its own.
#[async_trait(?Send)]
pub trait CardFactory {
    type Element;

    async fn render_card(&self, card: &SpellCard) -> Result<Self::Element, RenderError>;
}
