use crate::ids::RecordKey;

/// Owner of a spell collection.
///
/// Only the fields the carousel reads are modelled; everything else on the
/// stored record is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<RecordKey>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Keys of linked spell records. Absent and `null` both mean "none".
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Option<Vec<RecordKey>>,
}

impl CharacterRecord {
    pub fn linked_spells(&self) -> &[RecordKey] {
        self.spells.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_spell_list_reads_as_empty() {
        let record = CharacterRecord::default();
        assert!(record.linked_spells().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn null_spell_list_deserializes() {
        let record: CharacterRecord =
            serde_json::from_str(r#"{"id": 3, "name": "Lyra", "spells": null, "hp": 12}"#)
                .expect("record parses");
        assert_eq!(record.id, Some(RecordKey::Number(3)));
        assert!(record.linked_spells().is_empty());
    }
}
