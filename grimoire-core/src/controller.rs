//! Shared entry point from input events into the engine.
//!
//! Every wired listener holds a clone of the controller. Events arrive on the
//! UI thread one at a time; an event that arrives while another is still being
//! handled (a surface call that dispatches synchronously) is dropped rather
//! than re-entering the engine. After [`CarouselController::shutdown`] every
//! event is ignored.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::engine::{CarouselEngine, Direction, EngineSnapshot};
use crate::surface::CarouselSurface;

pub struct CarouselController<S: CarouselSurface> {
    engine: Rc<RefCell<CarouselEngine<S>>>,
    live: Rc<Cell<bool>>,
}

impl<S: CarouselSurface> Clone for CarouselController<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            live: Rc::clone(&self.live),
        }
    }
}

impl<S: CarouselSurface> CarouselController<S> {
    pub fn new(engine: CarouselEngine<S>) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            live: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Stop routing events into the engine. Idempotent.
    pub fn shutdown(&self) {
        if self.live.replace(false) {
            debug!("carousel: controller shut down");
        }
    }

    pub fn snapshot(&self) -> Option<EngineSnapshot> {
        self.engine.try_borrow().ok().map(|engine| engine.snapshot())
    }

    /// Real index attribute of a clicked thumbnail, validated against the strip.
    pub fn thumbnail_index(&self, raw: &str) -> Option<usize> {
        self.engine
            .try_borrow()
            .ok()
            .and_then(|engine| engine.thumbnails().index_from_attribute(raw))
    }

    fn with_engine<R>(&self, event: &str, f: impl FnOnce(&mut CarouselEngine<S>) -> R) -> Option<R> {
        if !self.live.get() {
            return None;
        }
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => Some(f(&mut engine)),
            Err(_) => {
                debug!("carousel: re-entrant {} event dropped", event);
                None
            }
        }
    }

    /// First draw after setup, without animation.
    pub fn initial_render(&self) {
        self.with_engine("render", |engine| engine.render(false));
    }

    pub fn next(&self) {
        self.with_engine("next", |engine| engine.advance(Direction::Forward));
    }

    pub fn prev(&self) {
        self.with_engine("prev", |engine| engine.advance(Direction::Backward));
    }

    pub fn select_thumbnail(&self, real_index: usize) {
        self.with_engine("thumbnail", |engine| engine.jump_to(real_index));
    }

    pub fn pointer_down(&self, client_x: f64) {
        self.with_engine("pointer-down", |engine| engine.begin_drag(client_x));
    }

    pub fn pointer_move(&self, client_x: f64) -> bool {
        self.with_engine("pointer-move", |engine| engine.continue_drag(client_x))
            .unwrap_or(false)
    }

    pub fn pointer_up(&self) {
        self.with_engine("pointer-up", |engine| engine.end_drag());
    }

    pub fn transition_end(&self) {
        self.with_engine("transition-end", |engine| engine.on_transition_finished());
    }

    pub fn resize(&self) {
        self.with_engine("resize", |engine| engine.on_resize());
    }

    pub fn auto_rotate_tick(&self) {
        self.with_engine("auto-rotate", |engine| engine.advance(Direction::Forward));
    }
}

impl<S: CarouselSurface> fmt::Debug for CarouselController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("live", &self.live.get())
            .field("engine", &self.engine)
            .finish()
    }
}
