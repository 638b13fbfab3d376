use grimoire_core::CarouselError;
use grimoire_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Missing dependency '{0}'")]
    MissingDependency(&'static str),

    #[error("Dependency '{key}' is unusable: {reason}")]
    InvalidDependency { key: &'static str, reason: String },

    #[error("Invalid owner key: {0}")]
    OwnerKey(#[from] ModelError),

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

impl WebError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        WebError::InvalidDependency {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(err: WebError) -> Self {
        wasm_bindgen::JsError::new(&err.to_string()).into()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
