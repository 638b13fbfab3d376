use async_trait::async_trait;
use grimoire_model::{CharacterRecord, RecordKey, SpellRecord, StoreName};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Lookup in store '{store}' failed for key {key}: {message}")]
    Lookup {
        store: String,
        key: String,
        message: String,
    },

    #[error("Record {key} in store '{store}' is malformed: {message}")]
    Malformed {
        store: String,
        key: String,
        message: String,
    },
}

impl StoreError {
    pub fn lookup(store: &StoreName, key: &RecordKey, message: impl Into<String>) -> Self {
        StoreError::Lookup {
            store: store.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(store: &StoreName, key: &RecordKey, message: impl Into<String>) -> Self {
        StoreError::Malformed {
            store: store.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed record lookup (`getData(storeName, key)` on the page).
///
/// `Ok(None)` is an absent record, not an error. Lookups resolve on the UI
/// thread, hence `?Send`.
#[async_trait(?Send)]
pub trait RecordStore {
    async fn fetch_character(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<CharacterRecord>>;

    async fn fetch_spell(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<SpellRecord>>;
}
