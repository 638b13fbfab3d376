//! JavaScript-backed implementations of the collaborator traits.

use async_trait::async_trait;
use grimoire_contracts::prelude::{
    CardFactory, RecordStore, RenderError, ResolveError, ResourceResolver, SpellCard, StoreError,
    StoreResult,
};
use grimoire_model::{
    CharacterRecord, DisplayResource, ImagePayload, RecordKey, SpellRecord, StoreName,
};
use js_sys::{ArrayBuffer, Function, Object, Promise, Reflect, Uint8Array};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, HtmlElement, Url};

use crate::dom::DomSurface;
use crate::markup::{self, classes, selectors};

/// Readable text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Call `function` and await the result if it is a promise.
async fn call_async(function: &Function, a: &JsValue, b: &JsValue) -> Result<JsValue, JsValue> {
    let returned = function.call2(&JsValue::NULL, a, b)?;
    JsFuture::from(Promise::resolve(&returned)).await
}

pub(crate) fn key_to_js(key: &RecordKey) -> JsValue {
    match key {
        RecordKey::Number(n) => JsValue::from_f64(*n as f64),
        RecordKey::Text(s) => JsValue::from_str(s),
    }
}

/// `getData(storeName, key)` returning a record object or `undefined`.
#[derive(Debug, Clone)]
pub(crate) struct JsRecordStore {
    get_data: Function,
}

impl JsRecordStore {
    pub(crate) fn new(get_data: Function) -> Self {
        Self { get_data }
    }

    async fn fetch(&self, store: &StoreName, key: &RecordKey) -> StoreResult<Option<JsValue>> {
        let value = call_async(&self.get_data, &JsValue::from_str(store.as_str()), &key_to_js(key))
            .await
            .map_err(|err| StoreError::lookup(store, key, js_message(&err)))?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

const ID_FIELD: &str = "id";

/// Whether `object` carries a non-null `field`.
fn has_field(object: &JsValue, field: &str) -> bool {
    Reflect::get(object, &JsValue::from_str(field))
        .map(|value| !value.is_null() && !value.is_undefined())
        .unwrap_or(false)
}

/// Bytes of an `ArrayBuffer` or typed-array field.
fn binary_field(object: &JsValue, field: &str) -> Option<Vec<u8>> {
    let value = Reflect::get(object, &JsValue::from_str(field)).ok()?;
    if value.is_instance_of::<ArrayBuffer>() || value.is_instance_of::<Uint8Array>() {
        Some(Uint8Array::new(&value).to_vec())
    } else if ArrayBuffer::is_view(&value) {
        let view: js_sys::DataView = value.unchecked_into();
        Some(
            Uint8Array::new_with_byte_offset_and_length(
                &view.buffer(),
                view.byte_offset() as u32,
                view.byte_length() as u32,
            )
            .to_vec(),
        )
    } else {
        None
    }
}

#[async_trait(?Send)]
impl RecordStore for JsRecordStore {
    async fn fetch_character(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<CharacterRecord>> {
        let Some(value) = self.fetch(store, key).await? else {
            return Ok(None);
        };
        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|err| StoreError::malformed(store, key, err.to_string()))
    }

    async fn fetch_spell(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<SpellRecord>> {
        let Some(value) = self.fetch(store, key).await? else {
            return Ok(None);
        };
        let mut record: SpellRecord = serde_wasm_bindgen::from_value(value.clone())
            .map_err(|err| StoreError::malformed(store, key, err.to_string()))?;
        if !has_field(&value, ID_FIELD) {
            record.id = key.clone();
        }
        match binary_field(&value, markup::IMAGE_FIELD) {
            Some(bytes) => Ok(Some(record.with_image(bytes))),
            None => Ok(Some(record)),
        }
    }
}

/// `bufferToBlob(buffer, mimeType)` followed by `URL.createObjectURL`.
#[derive(Debug, Clone)]
pub(crate) struct BlobUrlResolver {
    buffer_to_blob: Function,
}

impl BlobUrlResolver {
    pub(crate) fn new(buffer_to_blob: Function) -> Self {
        Self { buffer_to_blob }
    }
}

impl ResourceResolver for BlobUrlResolver {
    fn resolve(&self, image: &ImagePayload) -> Result<DisplayResource, ResolveError> {
        if image.is_empty() {
            return Err(ResolveError::Empty);
        }
        let bytes = Uint8Array::from(image.bytes.as_slice());
        let blob = self
            .buffer_to_blob
            .call2(&JsValue::NULL, &bytes.buffer(), &JsValue::from_str(&image.mime_type))
            .map_err(|err| ResolveError::Conversion(js_message(&err)))?
            .dyn_into::<Blob>()
            .map_err(|_| ResolveError::Conversion("bufferToBlob did not return a Blob".into()))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|err| ResolveError::Conversion(js_message(&err)))?;
        Ok(DisplayResource(url))
    }
}

/// `renderCard(spellData, { isStatic })` producing the card element, wrapped
/// in a carousel item.
#[derive(Debug, Clone)]
pub(crate) struct JsCardFactory {
    render_card: Function,
    surface: DomSurface,
}

impl JsCardFactory {
    pub(crate) fn new(render_card: Function, surface: DomSurface) -> Self {
        Self {
            render_card,
            surface,
        }
    }

    fn card_data(card: &SpellCard) -> Result<JsValue, RenderError> {
        let template = |message: String| RenderError::Template {
            name: card.record.name.clone(),
            message,
        };
        let data = serde_wasm_bindgen::to_value(&card.record)
            .map_err(|err| template(err.to_string()))?;
        Reflect::set(
            &data,
            &JsValue::from_str(markup::IMAGE_URL_FIELD),
            &JsValue::from_str(card.image.as_str()),
        )
        .map_err(|err| template(js_message(&err)))?;
        Ok(data)
    }

    fn options(card: &SpellCard) -> JsValue {
        let options = Object::new();
        // Setting a plain property on a fresh object cannot throw.
        let _ = Reflect::set(
            &options,
            &JsValue::from_str(markup::STATIC_OPTION),
            &JsValue::from_bool(card.presentation.is_static),
        );
        options.into()
    }

    fn present(&self, card: &SpellCard, element: &HtmlElement) -> Result<HtmlElement, RenderError> {
        let style = element.style();
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", &markup::scale(card.presentation.scale));

        if let Some(container) = query_html(element, selectors::CARD_3D_CONTAINER) {
            let _ = container.style().set_property("height", "100%");
        }
        if let Some(rpg_card) = query_html(element, selectors::RPG_CARD) {
            let _ = rpg_card.class_list().add_1(classes::IN_CAROUSEL);
            let _ = rpg_card
                .style()
                .set_property("height", &markup::pixels(card.presentation.height_px));
        }

        let item = self
            .surface
            .create("div")
            .ok_or_else(|| RenderError::MissingElement(classes::ITEM.into()))?;
        item.set_class_name(classes::ITEM);
        item.append_child(element)
            .map_err(|err| RenderError::Template {
                name: card.record.name.clone(),
                message: js_message(&err),
            })?;
        Ok(item)
    }
}

fn query_html(root: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

#[async_trait(?Send)]
impl CardFactory for JsCardFactory {
    type Element = HtmlElement;

    async fn render_card(&self, card: &SpellCard) -> Result<HtmlElement, RenderError> {
        let data = Self::card_data(card)?;
        let rendered = call_async(&self.render_card, &data, &Self::options(card))
            .await
            .map_err(|err| RenderError::Template {
                name: card.record.name.clone(),
                message: js_message(&err),
            })?;
        let element = rendered.dyn_into::<HtmlElement>().map_err(|_| {
            RenderError::MissingElement(format!("renderCard returned no element for '{}'", card.record.name))
        })?;
        debug!("carousel: rendered card '{}'", card.record.name);
        self.present(card, &element)
    }
}
