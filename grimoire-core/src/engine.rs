//! Carousel engine: index state machine over the loop buffer.
//!
//! The engine owns `current_index` (a signed position in the loop buffer),
//! the applied translation and the interaction phase. It centers the item at
//! `current_index` in the viewport, snaps drags to whole items and teleports
//! the index back into the real range once a settle finishes.

use std::fmt;

use grimoire_model::RecordKey;
use tracing::debug;

use crate::constants::motion;
use crate::loop_buffer::LoopBuffer;
use crate::surface::CarouselSurface;
use crate::thumbnails::ThumbnailStrip;
use crate::transition::Transition;

/// One item of the strip: the record it shows and its mounted element.
#[derive(Debug, Clone)]
pub struct CarouselItem<E> {
    pub key: RecordKey,
    pub element: E,
}

/// Step direction for discrete navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Pointer and strip position captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer_x: f64,
    pub translate_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    /// At rest, transitions enabled.
    #[default]
    Idle,
    /// Pointer captured; the strip follows it 1:1 with transitions disabled.
    Dragging(DragAnchor),
    /// An animated render is running; waiting for it to finish.
    Settling,
}

/// Read-only view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSnapshot {
    pub current_index: isize,
    pub real_index: Option<usize>,
    pub phase: Phase,
    pub translate_x: f64,
}

pub struct CarouselEngine<S: CarouselSurface> {
    surface: S,
    buffer: LoopBuffer<CarouselItem<S::Element>>,
    thumbnails: ThumbnailStrip,
    transition: Transition,
    current_index: isize,
    phase: Phase,
    translate_x: f64,
}

impl<S: CarouselSurface> CarouselEngine<S> {
    /// Start on the first real item. Nothing is drawn until [`Self::render`].
    pub fn new(
        surface: S,
        buffer: LoopBuffer<CarouselItem<S::Element>>,
        thumbnails: ThumbnailStrip,
        transition: Transition,
    ) -> Self {
        let current_index = buffer.clone_count() as isize;
        Self {
            surface,
            buffer,
            thumbnails,
            transition,
            current_index,
            phase: Phase::Idle,
            translate_x: 0.0,
        }
    }

    pub fn current_index(&self) -> isize {
        self.current_index
    }

    /// Which real item is centered: `(current - C) mod N`.
    pub fn real_index(&self) -> Option<usize> {
        self.buffer.real_index_at(self.current_index)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    pub fn buffer(&self) -> &LoopBuffer<CarouselItem<S::Element>> {
        &self.buffer
    }

    pub fn thumbnails(&self) -> &ThumbnailStrip {
        &self.thumbnails
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_index: self.current_index,
            real_index: self.real_index(),
            phase: self.phase,
            translate_x: self.translate_x,
        }
    }

    /// Step one item. Dropped while dragging.
    pub fn advance(&mut self, direction: Direction) -> bool {
        if self.is_dragging() {
            debug!("carousel: advance {:?} dropped during drag", direction);
            return false;
        }
        self.current_index += direction.step();
        self.render(true);
        true
    }

    /// Center real item `real_index`. Dropped while dragging or when the
    /// index is out of range.
    pub fn jump_to(&mut self, real_index: usize) -> bool {
        if self.is_dragging() {
            debug!("carousel: jump to {} dropped during drag", real_index);
            return false;
        }
        let Some(position) = self.buffer.position_of(real_index) else {
            debug!(
                "carousel: jump to {} ignored, only {} items",
                real_index,
                self.buffer.real_count()
            );
            return false;
        };
        self.current_index = position as isize;
        self.render(true);
        true
    }

    /// Center the item at `current_index`, highlight it and its thumbnail.
    pub fn render(&mut self, animated: bool) {
        if self.buffer.is_empty() {
            return;
        }

        let item_width = finite_or_zero(self.surface.item_width());
        let viewport_width = finite_or_zero(self.surface.viewport_width());
        let offset = self.current_index as f64 * item_width - viewport_width / 2.0
            + item_width / 2.0;
        let target = -offset;

        // An unchanged offset or a zero-length transition runs no transition,
        // so no finished event will come back to settle the index.
        let still = animated
            && !matches!(self.phase, Phase::Settling)
            && (target - self.translate_x).abs() < motion::STILL_OFFSET_EPSILON_PX;
        let instant = self.transition.duration_ms == 0;
        let animate = animated && !still && !instant;

        self.translate_x = target;
        self.surface
            .apply_translate(target, animate.then_some(&self.transition));

        for position in 0..self.buffer.len() {
            self.surface
                .set_item_active(position, position as isize == self.current_index);
        }

        if let Some(real) = self.real_index() {
            if self.thumbnails.activate(real) {
                debug!("carousel: thumbnail {} active", real);
            }
            for index in 0..self.thumbnails.len() {
                self.surface.set_thumbnail_active(index, index == real);
            }
        }

        if animate {
            self.phase = Phase::Settling;
        } else if animated {
            self.phase = Phase::Idle;
            self.teleport_if_outside();
        }
    }

    /// The animated render finished: fold the index back into the real range.
    pub fn on_transition_finished(&mut self) {
        if self.is_dragging() {
            return;
        }
        self.phase = Phase::Idle;
        self.teleport_if_outside();
    }

    /// Capture the pointer. Ignored when a drag is already running.
    pub fn begin_drag(&mut self, pointer_x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        if matches!(self.phase, Phase::Settling) {
            // Disabling the transition cancels it, so its finished event
            // never arrives; settle now.
            self.phase = Phase::Idle;
            self.teleport_if_outside();
        }
        self.phase = Phase::Dragging(DragAnchor {
            pointer_x,
            translate_x: self.translate_x,
        });
        self.surface.apply_translate(self.translate_x, None);
        self.surface.set_dragging(true);
        true
    }

    /// Follow the pointer 1:1; the index is untouched until release.
    pub fn continue_drag(&mut self, pointer_x: f64) -> bool {
        let Phase::Dragging(anchor) = self.phase else {
            return false;
        };
        self.translate_x = anchor.translate_x + (pointer_x - anchor.pointer_x);
        self.surface.apply_translate(self.translate_x, None);
        true
    }

    /// Release: snap to the nearest whole item. Dragging content left
    /// (negative delta) moves forward.
    pub fn end_drag(&mut self) -> bool {
        let Phase::Dragging(anchor) = self.phase else {
            return false;
        };
        self.phase = Phase::Idle;
        self.surface.set_dragging(false);

        let item_width = finite_or_zero(self.surface.item_width());
        if item_width <= 0.0 {
            debug!("carousel: drag released before layout, index kept");
            return false;
        }

        let moved = ((anchor.translate_x - self.translate_x) / item_width).round() as isize;
        if moved != 0 {
            debug!("carousel: drag moved {} items", moved);
        }
        self.current_index += moved;
        self.render(true);
        true
    }

    /// Pixel offsets depend on measured widths: redraw instantly.
    pub fn on_resize(&mut self) {
        if matches!(self.phase, Phase::Settling) {
            self.phase = Phase::Idle;
            if self.teleport_if_outside() {
                return;
            }
        }
        self.render(false);
    }

    /// Teleport by whole periods when the index sits on a replica. Returns
    /// whether it moved.
    fn teleport_if_outside(&mut self) -> bool {
        if self.buffer.real_count() == 0 || self.buffer.contains_real(self.current_index) {
            return false;
        }
        let normalized = self.buffer.normalize(self.current_index);
        debug!(
            "carousel: teleport {} -> {}",
            self.current_index, normalized
        );
        self.current_index = normalized;
        self.render(false);
        true
    }
}

impl<S: CarouselSurface> fmt::Debug for CarouselEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("real_count", &self.buffer.real_count())
            .field("clone_count", &self.buffer.clone_count())
            .field("current_index", &self.current_index)
            .field("phase", &self.phase)
            .field("translate_x", &self.translate_x)
            .finish()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, mounted_engine, mounted_engine_with};

    const ITEM_W: f64 = 200.0;
    const VIEWPORT_W: f64 = 1000.0;

    fn engine(n: usize) -> (RecordingSurface, CarouselEngine<RecordingSurface>) {
        let surface = RecordingSurface::new(ITEM_W, VIEWPORT_W);
        let engine = mounted_engine(&surface, n);
        (surface, engine)
    }

    fn centered_translate(index: isize) -> f64 {
        -(index as f64 * ITEM_W - VIEWPORT_W / 2.0 + ITEM_W / 2.0)
    }

    fn step(engine: &mut CarouselEngine<RecordingSurface>, direction: Direction) -> isize {
        assert!(engine.advance(direction));
        let visited = engine.current_index();
        engine.on_transition_finished();
        visited
    }

    #[test]
    fn starts_centered_on_first_real_item() {
        let (surface, engine) = engine(5);
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.real_index(), Some(0));
        assert_eq!(engine.phase(), Phase::Idle);

        let state = surface.state();
        assert_eq!(state.translate_x, centered_translate(3));
        assert_eq!(state.translations.last().map(|(_, t)| *t), Some(None));
        assert_eq!(state.active_items.iter().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(state.active_thumbnails.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(state.scrolled_thumbnail, Some(0));
    }

    #[test]
    fn five_forward_steps_over_five_items_return_to_start() {
        let (surface, mut engine) = engine(5);
        let visited: Vec<isize> = (0..5).map(|_| step(&mut engine, Direction::Forward)).collect();
        assert_eq!(visited, vec![4, 5, 6, 7, 8]);
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.real_index(), Some(0));

        // Teleport lands on the real item the clone at 8 replicated.
        let buffer = engine.buffer();
        assert_eq!(
            buffer.get(8).map(|s| s.value.element.label.clone()),
            buffer.get(3).map(|s| s.value.element.label.clone())
        );
        let state = surface.state();
        assert_eq!(state.translate_x, centered_translate(3));
        assert_eq!(state.translations.last().map(|(_, t)| *t), Some(None));
    }

    #[test]
    fn real_index_cycles_without_skips_or_repeats() {
        let (_surface, mut engine) = engine(4);
        let mut seen = Vec::new();
        for _ in 0..13 {
            step(&mut engine, Direction::Forward);
            seen.push(engine.real_index().expect("real index"));
            assert!(engine.buffer().contains_real(engine.current_index()));
        }
        let expected: Vec<usize> = (1..=13).map(|i| i % 4).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn stepping_back_from_first_item_wraps_to_last() {
        let (_surface, mut engine) = engine(5);
        assert_eq!(step(&mut engine, Direction::Backward), 2);
        assert_eq!(engine.current_index(), 7);
        assert_eq!(engine.real_index(), Some(4));
    }

    #[test]
    fn jump_to_lands_on_requested_item() {
        let (surface, mut engine) = engine(6);
        for k in [5, 0, 3, 3, 1] {
            assert!(engine.jump_to(k));
            engine.on_transition_finished();
            assert_eq!(engine.real_index(), Some(k));
            assert_eq!(surface.state().active_thumbnails.iter().copied().collect::<Vec<_>>(), vec![k]);
        }
    }

    #[test]
    fn jump_to_out_of_range_is_ignored() {
        let (_surface, mut engine) = engine(3);
        assert!(!engine.jump_to(3));
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn dragging_left_advances_by_rounded_item_count() {
        let (surface, mut engine) = engine(5);
        assert!(engine.begin_drag(500.0));
        assert!(surface.state().dragging);
        assert!(engine.continue_drag(20.0));
        assert_eq!(engine.translate_x(), centered_translate(3) - 480.0);
        assert_eq!(engine.current_index(), 3);

        assert!(engine.end_drag());
        assert!(!surface.state().dragging);
        assert_eq!(engine.current_index(), 5);
        assert_eq!(engine.phase(), Phase::Settling);
        engine.on_transition_finished();
        assert_eq!(engine.real_index(), Some(2));
    }

    #[test]
    fn dragging_right_moves_backward_and_wraps() {
        let (_surface, mut engine) = engine(5);
        engine.begin_drag(100.0);
        engine.continue_drag(250.0);
        engine.continue_drag(420.0);
        engine.end_drag();
        assert_eq!(engine.current_index(), 1);
        engine.on_transition_finished();
        assert_eq!(engine.current_index(), 6);
        assert_eq!(engine.real_index(), Some(3));
    }

    #[test]
    fn short_drag_snaps_back_without_moving() {
        let (_surface, mut engine) = engine(5);
        engine.begin_drag(300.0);
        engine.continue_drag(240.0);
        engine.end_drag();
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.translate_x(), centered_translate(3));
    }

    #[test]
    fn navigation_during_drag_is_dropped() {
        let (_surface, mut engine) = engine(5);
        engine.begin_drag(400.0);
        assert!(!engine.advance(Direction::Forward));
        assert!(!engine.advance(Direction::Backward));
        assert!(!engine.jump_to(2));
        assert_eq!(engine.current_index(), 3);
        assert!(engine.is_dragging());
    }

    #[test]
    fn second_drag_start_keeps_first_anchor() {
        let (_surface, mut engine) = engine(5);
        engine.begin_drag(400.0);
        assert!(!engine.begin_drag(900.0));
        engine.continue_drag(200.0);
        assert_eq!(engine.translate_x(), centered_translate(3) - 200.0);
    }

    #[test]
    fn move_and_release_without_drag_are_ignored() {
        let (surface, mut engine) = engine(5);
        let before = surface.state().translations.len();
        assert!(!engine.continue_drag(10.0));
        assert!(!engine.end_drag());
        assert_eq!(surface.state().translations.len(), before);
    }

    #[test]
    fn release_before_layout_keeps_index() {
        let (surface, mut engine) = engine(5);
        engine.begin_drag(500.0);
        engine.continue_drag(0.0);
        surface.set_item_width(0.0);
        assert!(!engine.end_drag());
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!surface.state().dragging);

        // The next gesture still works once layout is back.
        surface.set_item_width(ITEM_W);
        assert!(engine.advance(Direction::Forward));
        assert_eq!(engine.current_index(), 4);
    }

    #[test]
    fn single_item_renormalizes_every_step() {
        let (surface, mut engine) = engine(1);
        assert_eq!(engine.buffer().clone_count(), 0);
        assert_eq!(engine.current_index(), 0);
        for direction in [Direction::Forward, Direction::Forward, Direction::Backward] {
            let visited = step(&mut engine, direction);
            assert_ne!(visited, 0);
            assert_eq!(engine.current_index(), 0);
            assert_eq!(engine.real_index(), Some(0));
        }
        assert_eq!(surface.state().translate_x, centered_translate(0));
    }

    #[test]
    fn unchanged_offset_settles_immediately() {
        let (surface, mut engine) = engine(5);
        engine.begin_drag(300.0);
        engine.end_drag();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(surface.state().translations.last().map(|(_, t)| *t), Some(None));
    }

    #[test]
    fn exactly_one_item_is_active_after_navigation() {
        let (surface, mut engine) = engine(5);
        engine.advance(Direction::Forward);
        engine.advance(Direction::Forward);
        let state = surface.state();
        assert_eq!(state.active_items.iter().copied().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn resize_recenters_instantly() {
        let (surface, mut engine) = engine(5);
        surface.set_viewport_width(600.0);
        engine.on_resize();
        let state = surface.state();
        assert_eq!(state.translate_x, -(3.0 * ITEM_W - 300.0 + ITEM_W / 2.0));
        assert_eq!(state.translations.last().map(|(_, t)| *t), Some(None));
    }

    #[test]
    fn resize_mid_settle_folds_index_back() {
        let (_surface, mut engine) = engine(5);
        for _ in 0..4 {
            step(&mut engine, Direction::Forward);
        }
        engine.advance(Direction::Forward);
        assert_eq!(engine.current_index(), 8);
        engine.on_resize();
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn drag_started_mid_settle_anchors_on_folded_index() {
        let (_surface, mut engine) = engine(5);
        engine.advance(Direction::Backward);
        assert_eq!(engine.current_index(), 2);
        engine.begin_drag(100.0);
        assert_eq!(engine.current_index(), 7);
        match engine.phase() {
            Phase::Dragging(anchor) => assert_eq!(anchor.translate_x, centered_translate(7)),
            other => panic!("expected drag, got {other:?}"),
        }
    }

    #[test]
    fn zero_length_transition_settles_without_finished_event() {
        let surface = RecordingSurface::new(ITEM_W, VIEWPORT_W);
        let transition = Transition {
            duration_ms: 0,
            ..Transition::default()
        };
        let mut engine = mounted_engine_with(&surface, 5, transition);

        for expected in [1, 2, 3, 4, 0, 1, 2, 3] {
            assert!(engine.advance(Direction::Forward));
            assert_eq!(engine.phase(), Phase::Idle);
            assert!(engine.buffer().contains_real(engine.current_index()));
            assert_eq!(engine.real_index(), Some(expected));
        }
        let state = surface.state();
        assert!(state.translations.iter().all(|(_, t)| t.is_none()));
    }
}
