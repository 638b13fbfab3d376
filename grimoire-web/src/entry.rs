//! The exported `initializeGrimoireCarousel` entry point.

use grimoire_core::{CarouselConfig, CarouselHandle, Dependencies, initialize_carousel};
use grimoire_model::{RecordKey, StoreName};
use js_sys::{Function, Reflect};
use tracing::info;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::collaborators::{BlobUrlResolver, JsCardFactory, JsRecordStore};
use crate::dom::DomSurface;
use crate::error::{Result, WebError};
use crate::markup::deps_keys;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Live carousel returned to JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct GrimoireCarousel {
    handle: CarouselHandle,
}

#[wasm_bindgen]
impl GrimoireCarousel {
    /// Remove every listener and stop auto-rotation. Safe to call twice.
    pub fn destroy(&mut self) {
        self.handle.dispose();
    }

    pub fn dispose(&mut self) {
        self.handle.dispose();
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }
}

/// Build the grimoire carousel inside `modal` for the owner record `owner_key`.
#[wasm_bindgen(js_name = initializeGrimoireCarousel)]
pub async fn initialize_grimoire_carousel(
    modal: Element,
    owner_key: JsValue,
    deps: JsValue,
) -> std::result::Result<GrimoireCarousel, JsValue> {
    let owner_key = record_key(&owner_key)?;
    let config = config(&deps)?;
    let surface = DomSurface::locate(&modal).map_err(WebError::from)?;

    let dependencies = Dependencies {
        store: JsRecordStore::new(function(&deps, deps_keys::GET_DATA)?),
        resolver: BlobUrlResolver::new(function(&deps, deps_keys::BUFFER_TO_BLOB)?),
        cards: JsCardFactory::new(function(&deps, deps_keys::RENDER_CARD)?, surface.clone()),
        owner_store: store_name(&deps, deps_keys::OWNER_STORE)?,
        item_store: store_name(&deps, deps_keys::ITEM_STORE)?,
    };

    let handle = initialize_carousel(surface, &owner_key, &dependencies, &config)
        .await
        .map_err(WebError::from)?;
    info!("carousel: ready for owner {}", owner_key);
    Ok(GrimoireCarousel { handle })
}

fn property(deps: &JsValue, key: &'static str) -> Result<JsValue> {
    let value = Reflect::get(deps, &JsValue::from_str(key))
        .map_err(|_| WebError::MissingDependency(key))?;
    if value.is_undefined() || value.is_null() {
        return Err(WebError::MissingDependency(key));
    }
    Ok(value)
}

fn function(deps: &JsValue, key: &'static str) -> Result<Function> {
    property(deps, key)?
        .dyn_into::<Function>()
        .map_err(|_| WebError::invalid(key, "not a function"))
}

fn store_name(deps: &JsValue, key: &'static str) -> Result<StoreName> {
    let raw = property(deps, key)?
        .as_string()
        .ok_or_else(|| WebError::invalid(key, "not a string"))?;
    StoreName::new(raw).map_err(|err| WebError::invalid(key, err.to_string()))
}

fn config(deps: &JsValue) -> Result<CarouselConfig> {
    match property(deps, deps_keys::CONFIG) {
        Ok(value) => serde_wasm_bindgen::from_value(value)
            .map_err(|err| WebError::invalid(deps_keys::CONFIG, err.to_string())),
        Err(_) => Ok(CarouselConfig::default()),
    }
}

fn record_key(value: &JsValue) -> Result<RecordKey> {
    if let Some(number) = value.as_f64() {
        return Ok(RecordKey::try_from(number)?);
    }
    value
        .as_string()
        .map(RecordKey::Text)
        .ok_or_else(|| WebError::OwnerKey(grimoire_model::ModelError::InvalidKey(format!("{value:?}"))))
}
