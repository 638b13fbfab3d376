//! Listener wiring. Every listener is a `gloo` guard pushed into the returned
//! [`Bindings`]; dropping them removes the listeners and stops the timer.

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Interval;
use grimoire_core::{Bindings, CarouselConfig, CarouselController};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, TouchEvent};

use crate::dom::DomSurface;
use crate::markup::{self, selectors};

type Controller = CarouselController<DomSurface>;

pub(crate) fn wire(surface: &DomSurface, controller: &Controller, config: &CarouselConfig) -> Bindings {
    let mut bindings = Bindings::new();

    let c = controller.clone();
    bindings.push(EventListener::new(&surface.next, "click", move |_| c.next()));
    let c = controller.clone();
    bindings.push(EventListener::new(&surface.prev, "click", move |_| c.prev()));

    let c = controller.clone();
    bindings.push(EventListener::new(&surface.thumbnail_nav, "click", move |event| {
        let Some(raw) = clicked_thumbnail_index(event) else {
            return;
        };
        if let Some(index) = c.thumbnail_index(&raw) {
            c.select_thumbnail(index);
        }
    }));

    for kind in ["mousedown", "touchstart"] {
        let c = controller.clone();
        bindings.push(EventListener::new(&surface.viewport, kind, move |event| {
            event.stop_propagation();
            if let Some(x) = pointer_x(event) {
                c.pointer_down(x);
            }
        }));
    }

    for kind in ["mousemove", "touchmove"] {
        let c = controller.clone();
        bindings.push(EventListener::new_with_options(
            &surface.document,
            kind,
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event| {
                let Some(x) = pointer_x(event) else {
                    return;
                };
                if c.pointer_move(x) {
                    event.prevent_default();
                }
            },
        ));
    }

    for kind in ["mouseup", "touchend"] {
        let c = controller.clone();
        bindings.push(EventListener::new(&surface.document, kind, move |_| c.pointer_up()));
    }

    let c = controller.clone();
    bindings.push(EventListener::new(&surface.window, "resize", move |_| c.resize()));

    // Card contents may run their own transitions; only the strip's settles.
    let c = controller.clone();
    let strip: EventTarget = surface.strip.clone().into();
    bindings.push(EventListener::new(&surface.strip, "transitionend", move |event| {
        if event.target().as_ref() == Some(&strip) {
            c.transition_end();
        }
    }));

    // Gestures on the thumbnail strip scroll it; they must not reach the
    // carousel or the modal behind it.
    for kind in ["mousedown", "touchstart", "wheel"] {
        bindings.push(EventListener::new(&surface.thumbnail_nav, kind, |event| {
            event.stop_propagation();
        }));
    }

    if let Some(interval_ms) = config.auto_rotate_ms {
        let c = controller.clone();
        let millis = u32::try_from(interval_ms).unwrap_or(u32::MAX);
        bindings.push(Interval::new(millis, move || c.auto_rotate_tick()));
        debug!("carousel: auto-rotate every {}ms", millis);
    }

    bindings
}

/// Horizontal client position of a mouse event or the first active touch.
fn pointer_x(event: &Event) -> Option<f64> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(f64::from(mouse.client_x()));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn clicked_thumbnail_index(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let item = target.closest(selectors::THUMBNAIL_ITEM).ok()??;
    item.get_attribute(markup::DATA_INDEX)
}
