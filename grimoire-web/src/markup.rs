//! Class names, dependency keys and CSS values the binding writes.

/// Elements looked up inside the modal.
pub mod selectors {
    pub const VIEWPORT: &str = ".grimoire-carousel-viewport";
    pub const STRIP: &str = ".grimoire-carousel";
    pub const NAV: &str = ".grimoire-carousel-nav";
    pub const PREV_BUTTON: &str = "#grimoirePrevBtn";
    pub const NEXT_BUTTON: &str = "#grimoireNextBtn";
    pub const THUMBNAIL_NAV: &str = ".grimoire-thumbnail-nav";
    pub const THUMBNAIL_ITEM: &str = ".grimoire-thumbnail-item";
    pub const CARD_3D_CONTAINER: &str = ".card-3d-container";
    pub const RPG_CARD: &str = ".rpg-card";
}

pub mod classes {
    pub const ITEM: &str = "grimoire-carousel-item";
    pub const THUMBNAIL_ITEM: &str = "grimoire-thumbnail-item";
    pub const MESSAGE: &str = "no-spells-message";
    pub const ACTIVE: &str = "active";
    pub const DRAGGING: &str = "dragging";
    pub const IN_CAROUSEL: &str = "in-carousel";
}

/// Keys of the `deps` object handed to `initializeGrimoireCarousel`.
pub mod deps_keys {
    pub const GET_DATA: &str = "getData";
    pub const BUFFER_TO_BLOB: &str = "bufferToBlob";
    pub const RENDER_CARD: &str = "renderCard";
    pub const OWNER_STORE: &str = "CARD_STORE_NAME";
    pub const ITEM_STORE: &str = "SPELL_STORE_NAME";
    pub const CONFIG: &str = "config";
}

pub const DATA_INDEX: &str = "data-index";
pub const IMAGE_URL_FIELD: &str = "imageURL";
pub const IMAGE_FIELD: &str = "image";
pub const STATIC_OPTION: &str = "isStatic";

pub fn translate_x(px: f64) -> String {
    format!("translateX({px}px)")
}

pub fn scale(factor: f32) -> String {
    format!("scale({factor})")
}

pub fn pixels(px: u32) -> String {
    format!("{px}px")
}

/// `display` value for the navigation bar.
pub fn nav_display(visible: bool) -> &'static str {
    if visible { "flex" } else { "none" }
}
