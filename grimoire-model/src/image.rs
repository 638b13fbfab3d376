/// Raw image bytes as stored alongside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    /// Used when a record carries bytes but no MIME type.
    pub const FALLBACK_MIME: &'static str = "image/png";

    pub fn new(bytes: Vec<u8>, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| Self::FALLBACK_MIME.to_string());
        Self { bytes, mime_type }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reference to something an image element can display (an object URL or any
/// other URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayResource(pub String);

impl DisplayResource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DisplayResource {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DisplayResource {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
