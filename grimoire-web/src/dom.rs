//! [`CarouselSurface`] over the modal's DOM.

use std::cell::RefCell;
use std::rc::Rc;

use grimoire_core::{
    Bindings, CarouselConfig, CarouselController, CarouselError, CarouselSurface, Thumbnail,
    Transition,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::input;
use crate::markup::{self, classes, selectors};

/// Handles to the carousel's elements. Clones share the mounted item list.
#[derive(Debug, Clone)]
pub struct DomSurface {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) viewport: HtmlElement,
    pub(crate) strip: HtmlElement,
    pub(crate) nav: HtmlElement,
    pub(crate) prev: HtmlElement,
    pub(crate) next: HtmlElement,
    pub(crate) thumbnail_nav: HtmlElement,
    items: Rc<RefCell<Vec<HtmlElement>>>,
    thumbnails: Rc<RefCell<Vec<HtmlElement>>>,
}

impl DomSurface {
    /// Look up every element the carousel drives inside `modal`.
    pub fn locate(modal: &Element) -> Result<Self, CarouselError> {
        let window =
            web_sys::window().ok_or_else(|| CarouselError::Surface("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| CarouselError::Surface("no document".into()))?;
        Ok(Self {
            viewport: find(modal, selectors::VIEWPORT)?,
            strip: find(modal, selectors::STRIP)?,
            nav: find(modal, selectors::NAV)?,
            prev: find(modal, selectors::PREV_BUTTON)?,
            next: find(modal, selectors::NEXT_BUTTON)?,
            thumbnail_nav: find(modal, selectors::THUMBNAIL_NAV)?,
            window,
            document,
            items: Rc::default(),
            thumbnails: Rc::default(),
        })
    }

    pub(crate) fn create(&self, tag: &str) -> Option<HtmlElement> {
        self.document
            .create_element(tag)
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn thumbnail_element(&self, thumbnail: &Thumbnail) -> Option<HtmlElement> {
        let item = self.create("div")?;
        item.set_class_name(classes::THUMBNAIL_ITEM);
        item.set_attribute(markup::DATA_INDEX, &thumbnail.index.to_string())
            .ok()?;
        let image = self
            .document
            .create_element("img")
            .ok()?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        image.set_src(thumbnail.image.as_str());
        image.set_alt(&thumbnail.label);
        item.append_child(&image).ok()?;
        Some(item)
    }
}

fn find(modal: &Element, selector: &'static str) -> Result<HtmlElement, CarouselError> {
    modal
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| CarouselError::Surface(format!("missing element {selector}")))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        warn!("carousel: could not set {}: {:?}", property, err);
    }
}

fn toggle_class(element: &HtmlElement, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!("carousel: could not toggle {}: {:?}", class, err);
    }
}

impl CarouselSurface for DomSurface {
    type Element = HtmlElement;

    fn show_message(&self, text: &str) {
        self.items.borrow_mut().clear();
        self.strip.set_inner_html("");
        let Some(message) = self.create("div") else {
            self.strip.set_text_content(Some(text));
            return;
        };
        message.set_class_name(classes::MESSAGE);
        message.set_text_content(Some(text));
        if let Err(err) = self.strip.append_child(&message) {
            warn!("carousel: could not show message: {:?}", err);
        }
    }

    fn clear_items(&self) {
        self.items.borrow_mut().clear();
        self.strip.set_inner_html("");
    }

    fn set_nav_visible(&self, visible: bool) {
        set_style(&self.nav, "display", markup::nav_display(visible));
    }

    fn clone_element(&self, element: &HtmlElement) -> Option<HtmlElement> {
        let copy = element
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<HtmlElement>().ok());
        if copy.is_none() {
            warn!("carousel: cloneNode failed");
        }
        copy
    }

    fn append_item(&self, element: &HtmlElement) {
        match self.strip.append_child(element) {
            Ok(_) => self.items.borrow_mut().push(element.clone()),
            Err(err) => warn!("carousel: could not mount item: {:?}", err),
        }
    }

    fn mount_thumbnails(&self, thumbnails: &[Thumbnail]) {
        self.thumbnail_nav.set_inner_html("");
        let mut mounted = self.thumbnails.borrow_mut();
        mounted.clear();
        for thumbnail in thumbnails {
            let Some(element) = self.thumbnail_element(thumbnail) else {
                warn!("carousel: could not build thumbnail {}", thumbnail.index);
                continue;
            };
            if self.thumbnail_nav.append_child(&element).is_ok() {
                mounted.push(element);
            }
        }
    }

    fn item_width(&self) -> f64 {
        self.items
            .borrow()
            .first()
            .map_or(0.0, |item| f64::from(item.offset_width()))
    }

    fn viewport_width(&self) -> f64 {
        f64::from(self.viewport.offset_width())
    }

    fn apply_translate(&self, translate_x: f64, transition: Option<&Transition>) {
        let transition = transition.map_or_else(|| "none".to_string(), Transition::css_value);
        set_style(&self.strip, "transition", &transition);
        set_style(&self.strip, "transform", &markup::translate_x(translate_x));
    }

    fn set_item_active(&self, position: usize, active: bool) {
        if let Some(item) = self.items.borrow().get(position) {
            toggle_class(item, classes::ACTIVE, active);
        }
    }

    fn set_thumbnail_active(&self, index: usize, active: bool) {
        let thumbnails = self.thumbnails.borrow();
        let Some(thumbnail) = thumbnails.get(index) else {
            return;
        };
        toggle_class(thumbnail, classes::ACTIVE, active);
        if active {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Nearest);
            options.set_inline(ScrollLogicalPosition::Center);
            thumbnail.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_dragging(&self, dragging: bool) {
        toggle_class(&self.viewport, classes::DRAGGING, dragging);
    }

    fn bind_input(&self, controller: &CarouselController<Self>, config: &CarouselConfig) -> Bindings {
        input::wire(self, controller, config)
    }
}
