use crate::error::ModelError;
use std::fmt::{self, Display};

/// Key of a record inside a store.
///
/// Browser object stores hand out either auto-incremented numbers or string
/// keys, and linked-record lists mix both, so the key keeps whichever form the
/// store produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RecordKey {
    Number(i64),
    Text(String),
}

impl RecordKey {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RecordKey::Number(n) => Some(*n),
            RecordKey::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordKey::Number(_) => None,
            RecordKey::Text(s) => Some(s.as_str()),
        }
    }
}

impl Default for RecordKey {
    fn default() -> Self {
        RecordKey::Number(0)
    }
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Number(n) => write!(f, "{n}"),
            RecordKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(value: i64) -> Self {
        RecordKey::Number(value)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        RecordKey::Text(value.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        RecordKey::Text(value)
    }
}

/// JS numbers arrive as `f64`; only integral values are valid keys.
impl TryFrom<f64> for RecordKey {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite()
            && value.fract() == 0.0
            && value.abs() <= (1_i64 << 53) as f64
        {
            Ok(RecordKey::Number(value as i64))
        } else {
            Err(ModelError::InvalidKey(format!("non-integral key {value}")))
        }
    }
}

/// Name of an object store (e.g. the character store or the spell store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreName(String);

impl StoreName {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyStoreName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_become_number_keys() {
        assert_eq!(RecordKey::try_from(42.0), Ok(RecordKey::Number(42)));
        assert!(RecordKey::try_from(1.5).is_err());
        assert!(RecordKey::try_from(f64::NAN).is_err());
    }

    #[test]
    fn blank_store_names_are_rejected() {
        assert_eq!(StoreName::new("  "), Err(ModelError::EmptyStoreName));
        assert_eq!(StoreName::new("spells").map(|s| s.to_string()), Ok("spells".into()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn keys_deserialize_from_numbers_and_strings() {
        let keys: Vec<RecordKey> =
            serde_json::from_str(r#"[7, "fireball"]"#).expect("keys parse");
        assert_eq!(keys, vec![RecordKey::Number(7), RecordKey::from("fireball")]);
    }
}
