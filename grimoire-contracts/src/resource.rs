use grimoire_model::{DisplayResource, ImagePayload};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Resource conversion failed: {0}")]
    Conversion(String),
}

/// Turns stored image bytes into something an image element can show
/// (`URL.createObjectURL(bufferToBlob(bytes, mime))` on the page).
///
/// The caller owns the returned resource and is responsible for releasing it.
pub trait ResourceResolver {
    fn resolve(&self, image: &ImagePayload) -> Result<DisplayResource, ResolveError>;
}
