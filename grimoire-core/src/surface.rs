//! The surface the carousel draws on.
//!
//! The engine and lifecycle only speak this trait; the browser binding
//! implements it over the modal's DOM, tests implement it with a recorder.

use std::any::Any;
use std::fmt;

use crate::config::CarouselConfig;
use crate::controller::CarouselController;
use crate::thumbnails::Thumbnail;
use crate::transition::Transition;

pub trait CarouselSurface {
    /// A mounted card element.
    type Element;

    /// Replace the strip's content with a status message.
    fn show_message(&self, text: &str);

    /// Remove messages and items from the strip.
    fn clear_items(&self);

    fn set_nav_visible(&self, visible: bool);

    /// Deep copy of an element. The copy carries none of the original's
    /// listeners. `None` when the copy could not be made.
    fn clone_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Append one element to the strip, in buffer order.
    fn append_item(&self, element: &Self::Element);

    /// Replace the thumbnail strip's entries.
    fn mount_thumbnails(&self, thumbnails: &[Thumbnail]);

    /// Width of a laid-out item (px); `0.0` before layout.
    fn item_width(&self) -> f64;

    fn viewport_width(&self) -> f64;

    /// Set the strip's horizontal translation. `None` applies it instantly.
    fn apply_translate(&self, translate_x: f64, transition: Option<&Transition>);

    fn set_item_active(&self, position: usize, active: bool);

    /// Toggle a thumbnail's highlight; the active one is scrolled into view.
    fn set_thumbnail_active(&self, index: usize, active: bool);

    /// Drag affordance on the viewport.
    fn set_dragging(&self, dragging: bool);

    /// Route input events to `controller` until the returned bindings are
    /// dropped, and start the auto-rotate timer if the config asks for one.
    fn bind_input(&self, controller: &CarouselController<Self>, config: &CarouselConfig) -> Bindings
    where
        Self: Sized;
}

/// RAII guards for wired listeners and timers. Dropping a guard unwires it.
#[derive(Default)]
pub struct Bindings {
    guards: Vec<Box<dyn Any>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<G: Any>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("guards", &self.guards.len())
            .finish()
    }
}
