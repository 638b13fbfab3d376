use grimoire_contracts::store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Owner record lookup failed: {0}")]
    OwnerFetch(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Surface setup failed: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
