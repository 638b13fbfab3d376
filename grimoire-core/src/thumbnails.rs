//! Thumbnail strip: one entry per real item, clones never get one.

use grimoire_model::{DisplayResource, RecordKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Real index of the item this thumbnail selects.
    pub index: usize,
    pub key: RecordKey,
    /// Alt text; the record's name.
    pub label: String,
    pub image: DisplayResource,
}

#[derive(Debug, Clone, Default)]
pub struct ThumbnailStrip {
    thumbnails: Vec<Thumbnail>,
    active: Option<usize>,
}

impl ThumbnailStrip {
    pub fn new(thumbnails: Vec<Thumbnail>) -> Self {
        debug_assert!(thumbnails.iter().enumerate().all(|(i, t)| t.index == i));
        Self {
            thumbnails,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn get(&self, index: usize) -> Option<&Thumbnail> {
        self.thumbnails.get(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Mark `index` active. Returns `true` when the active entry changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.thumbnails.len() || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Resolve a clicked thumbnail's `data-index` attribute to a real index.
    pub fn index_from_attribute(&self, raw: &str) -> Option<usize> {
        raw.trim()
            .parse::<usize>()
            .ok()
            .filter(|index| *index < self.thumbnails.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(n: usize) -> ThumbnailStrip {
        ThumbnailStrip::new(
            (0..n)
                .map(|i| Thumbnail {
                    index: i,
                    key: RecordKey::Number(i as i64),
                    label: format!("Spell {i}"),
                    image: DisplayResource::from("blob:x"),
                })
                .collect(),
        )
    }

    #[test]
    fn activation_tracks_changes_only() {
        let mut strip = strip(3);
        assert_eq!(strip.active(), None);
        assert!(strip.activate(1));
        assert!(!strip.activate(1));
        assert!(!strip.activate(3));
        assert_eq!(strip.active(), Some(1));
    }

    #[test]
    fn data_index_attribute_is_bounds_checked() {
        let strip = strip(4);
        assert_eq!(strip.index_from_attribute("2"), Some(2));
        assert_eq!(strip.index_from_attribute(" 3 "), Some(3));
        assert_eq!(strip.index_from_attribute("4"), None);
        assert_eq!(strip.index_from_attribute("NaN"), None);
        assert_eq!(strip.index_from_attribute("-1"), None);
    }
}
