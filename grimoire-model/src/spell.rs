use crate::ids::RecordKey;
use crate::image::ImagePayload;

/// A spell or ability record.
///
/// Field names follow the stored documents (`type`, `resistencia`, `true`).
/// The image bytes are not part of the serialized form: stores hand binary
/// data over separately and attach it with [`SpellRecord::with_image`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpellRecord {
    /// Stores keyed out-of-line omit it; the store fills it from the lookup key.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient::key"))]
    pub id: RecordKey,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient::text"))]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, deserialize_with = "lenient::text")
    )]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub execution: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "resistencia", default))]
    pub resistance: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhance: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "true", default))]
    pub true_effect: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_mime_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub image: Option<ImagePayload>,
}

impl SpellRecord {
    pub fn new(id: impl Into<RecordKey>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Kind comparison is exact; stored kinds are lowercase tags.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            self.image = None;
        } else {
            self.image = Some(ImagePayload::new(bytes, self.image_mime_type.clone()));
        }
        self
    }
}

/// Null-tolerant field readers: `null` reads as the field's default.
#[cfg(feature = "serde")]
mod lenient {
    use serde::{Deserialize, Deserializer};

    use crate::ids::RecordKey;

    pub(super) fn key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RecordKey, D::Error> {
        Ok(Option::<RecordKey>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_bytes_are_dropped() {
        let spell = SpellRecord::new(1, "Spark", "magia").with_image(Vec::new());
        assert!(spell.image.is_none());
    }

    #[test]
    fn image_uses_record_mime_type() {
        let mut spell = SpellRecord::new(1, "Spark", "magia");
        spell.image_mime_type = Some("image/webp".into());
        let spell = spell.with_image(vec![1, 2, 3]);
        assert_eq!(spell.image.map(|i| i.mime_type), Some("image/webp".to_string()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn stored_field_names_map_onto_record() {
        let spell: SpellRecord = serde_json::from_str(
            r#"{"id": "bolt", "name": "Bolt", "type": "magia", "resistencia": "Reflexos", "true": "x", "imageMimeType": "image/jpeg"}"#,
        )
        .expect("spell parses");
        assert!(spell.is_kind("magia"));
        assert_eq!(spell.resistance.as_deref(), Some("Reflexos"));
        assert_eq!(spell.true_effect.as_deref(), Some("x"));
        assert_eq!(spell.image_mime_type.as_deref(), Some("image/jpeg"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_without_inline_id_still_parses() {
        let spell: SpellRecord =
            serde_json::from_str(r#"{"name": "Bolt", "type": "magia"}"#).expect("spell parses");
        assert_eq!(spell.id, RecordKey::default());
        assert_eq!(spell.name, "Bolt");
        assert!(spell.is_kind("magia"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn null_name_and_id_read_as_empty() {
        let spell: SpellRecord =
            serde_json::from_str(r#"{"id": null, "name": null, "type": "magia"}"#)
                .expect("spell parses");
        assert_eq!(spell.id, RecordKey::default());
        assert_eq!(spell.name, "");

        let spell: SpellRecord =
            serde_json::from_str(r#"{"id": 4, "name": null, "type": "magia"}"#)
                .expect("spell parses");
        assert_eq!(spell.id, RecordKey::Number(4));
        assert_eq!(spell.name, "");
    }
}
