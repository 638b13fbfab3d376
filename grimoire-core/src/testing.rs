//! In-memory collaborators and a recording surface.
//!
//! `RecordingSurface` keeps what a DOM would show (message, mounted items,
//! translation, highlights) and a registry of wired listeners, so tests can
//! fire input the way the browser would and observe the result.

use std::cell::{Cell, Ref, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use grimoire_contracts::prelude::{
    CardFactory, RecordStore, RenderError, ResolveError, ResourceResolver, SpellCard, StoreError,
    StoreResult,
};
use grimoire_model::{
    CharacterRecord, DisplayResource, ImagePayload, RecordKey, SpellRecord, StoreName,
};

use crate::config::CarouselConfig;
use crate::controller::CarouselController;
use crate::engine::{CarouselEngine, CarouselItem};
use crate::lifecycle::Dependencies;
use crate::loop_buffer::LoopBuffer;
use crate::surface::{Bindings, CarouselSurface};
use crate::thumbnails::{Thumbnail, ThumbnailStrip};
use crate::transition::Transition;

pub const OWNER_STORE: &str = "cards";
pub const ITEM_STORE: &str = "spells";

/// Element produced by [`FakeCards`]; clones are flagged as replicas.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeElement {
    pub label: String,
    pub serial: u32,
    pub replica: bool,
}

/// Input events the browser binding wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Next,
    Prev,
    ThumbnailClick,
    PointerDown,
    PointerMove,
    PointerUp,
    TransitionEnd,
    Resize,
    AutoRotate,
}

impl EventKind {
    pub const WIRED: [EventKind; 8] = [
        EventKind::Next,
        EventKind::Prev,
        EventKind::ThumbnailClick,
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::TransitionEnd,
        EventKind::Resize,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Next,
    Prev,
    /// Click on a thumbnail carrying this `data-index` attribute.
    ThumbnailClick(String),
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    TransitionEnd,
    Resize,
    AutoRotateTick,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Next => EventKind::Next,
            InputEvent::Prev => EventKind::Prev,
            InputEvent::ThumbnailClick(_) => EventKind::ThumbnailClick,
            InputEvent::PointerDown(_) => EventKind::PointerDown,
            InputEvent::PointerMove(_) => EventKind::PointerMove,
            InputEvent::PointerUp => EventKind::PointerUp,
            InputEvent::TransitionEnd => EventKind::TransitionEnd,
            InputEvent::Resize => EventKind::Resize,
            InputEvent::AutoRotateTick => EventKind::AutoRotate,
        }
    }
}

#[derive(Debug, Default)]
pub struct SurfaceState {
    pub message: Option<String>,
    pub nav_visible: bool,
    pub items: Vec<FakeElement>,
    pub thumbnails: Vec<Thumbnail>,
    pub translate_x: f64,
    /// Every applied translation with the transition it was applied with.
    pub translations: Vec<(f64, Option<Transition>)>,
    pub active_items: BTreeSet<usize>,
    pub active_thumbnails: BTreeSet<usize>,
    pub scrolled_thumbnail: Option<usize>,
    pub dragging: bool,
    pub item_width: f64,
    pub viewport_width: f64,
    /// Element copies fail while set.
    pub clones_fail: bool,
    next_serial: u32,
}

#[derive(Default)]
struct Wiring {
    listeners: BTreeSet<EventKind>,
    controller: Option<CarouselController<RecordingSurface>>,
}

/// Fake DOM. Clones share state, like handles to the same nodes.
#[derive(Clone)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
    wiring: Rc<RefCell<Wiring>>,
}

impl RecordingSurface {
    pub fn new(item_width: f64, viewport_width: f64) -> Self {
        let state = SurfaceState {
            item_width,
            viewport_width,
            ..SurfaceState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            wiring: Rc::new(RefCell::new(Wiring::default())),
        }
    }

    pub fn state(&self) -> Ref<'_, SurfaceState> {
        self.state.borrow()
    }

    pub fn set_item_width(&self, width: f64) {
        self.state.borrow_mut().item_width = width;
    }

    pub fn fail_clones(&self) {
        self.state.borrow_mut().clones_fail = true;
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.state.borrow_mut().viewport_width = width;
    }

    pub fn listener_count(&self) -> usize {
        self.wiring.borrow().listeners.len()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.wiring.borrow().listeners.contains(&kind)
    }

    /// Deliver `event` to its listener. Returns `false` when nothing is
    /// listening for it.
    pub fn fire(&self, event: InputEvent) -> bool {
        let controller = {
            let wiring = self.wiring.borrow();
            if !wiring.listeners.contains(&event.kind()) {
                return false;
            }
            match wiring.controller.clone() {
                Some(controller) => controller,
                None => return false,
            }
        };
        match event {
            InputEvent::Next => controller.next(),
            InputEvent::Prev => controller.prev(),
            InputEvent::ThumbnailClick(raw) => {
                if let Some(index) = controller.thumbnail_index(&raw) {
                    controller.select_thumbnail(index);
                }
            }
            InputEvent::PointerDown(x) => controller.pointer_down(x),
            InputEvent::PointerMove(x) => {
                controller.pointer_move(x);
            }
            InputEvent::PointerUp => controller.pointer_up(),
            InputEvent::TransitionEnd => controller.transition_end(),
            InputEvent::Resize => controller.resize(),
            InputEvent::AutoRotateTick => controller.auto_rotate_tick(),
        }
        true
    }

    /// Fire a transition end only if the last translation was animated, the
    /// way a browser only reports transitions that actually ran.
    pub fn finish_transition(&self) -> bool {
        let animated = self
            .state
            .borrow()
            .translations
            .last()
            .is_some_and(|(_, transition)| transition.is_some());
        animated && self.fire(InputEvent::TransitionEnd)
    }
}

impl fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("items", &self.state.borrow().items.len())
            .field("listeners", &self.wiring.borrow().listeners)
            .finish()
    }
}

/// Unwires one listener kind when dropped.
struct ListenerGuard {
    kind: EventKind,
    wiring: Rc<RefCell<Wiring>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut wiring = self.wiring.borrow_mut();
        wiring.listeners.remove(&self.kind);
        if wiring.listeners.is_empty() {
            wiring.controller = None;
        }
    }
}

impl CarouselSurface for RecordingSurface {
    type Element = FakeElement;

    fn show_message(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.items.clear();
        state.message = Some(text.to_string());
    }

    fn clear_items(&self) {
        let mut state = self.state.borrow_mut();
        state.items.clear();
        state.message = None;
    }

    fn set_nav_visible(&self, visible: bool) {
        self.state.borrow_mut().nav_visible = visible;
    }

    fn clone_element(&self, element: &FakeElement) -> Option<FakeElement> {
        let mut state = self.state.borrow_mut();
        if state.clones_fail {
            return None;
        }
        state.next_serial += 1;
        Some(FakeElement {
            label: element.label.clone(),
            serial: 10_000 + state.next_serial,
            replica: true,
        })
    }

    fn append_item(&self, element: &FakeElement) {
        self.state.borrow_mut().items.push(element.clone());
    }

    fn mount_thumbnails(&self, thumbnails: &[Thumbnail]) {
        self.state.borrow_mut().thumbnails = thumbnails.to_vec();
    }

    fn item_width(&self) -> f64 {
        let state = self.state.borrow();
        if state.items.is_empty() {
            0.0
        } else {
            state.item_width
        }
    }

    fn viewport_width(&self) -> f64 {
        self.state.borrow().viewport_width
    }

    fn apply_translate(&self, translate_x: f64, transition: Option<&Transition>) {
        let mut state = self.state.borrow_mut();
        state.translate_x = translate_x;
        state.translations.push((translate_x, transition.copied()));
    }

    fn set_item_active(&self, position: usize, active: bool) {
        let mut state = self.state.borrow_mut();
        if active {
            state.active_items.insert(position);
        } else {
            state.active_items.remove(&position);
        }
    }

    fn set_thumbnail_active(&self, index: usize, active: bool) {
        let mut state = self.state.borrow_mut();
        if active {
            state.active_thumbnails.insert(index);
            state.scrolled_thumbnail = Some(index);
        } else {
            state.active_thumbnails.remove(&index);
        }
    }

    fn set_dragging(&self, dragging: bool) {
        self.state.borrow_mut().dragging = dragging;
    }

    fn bind_input(
        &self,
        controller: &CarouselController<Self>,
        config: &CarouselConfig,
    ) -> Bindings {
        let mut kinds: Vec<EventKind> = EventKind::WIRED.to_vec();
        if config.auto_rotate_ms.is_some() {
            kinds.push(EventKind::AutoRotate);
        }

        let mut bindings = Bindings::new();
        let mut wiring = self.wiring.borrow_mut();
        wiring.controller = Some(controller.clone());
        for kind in kinds {
            wiring.listeners.insert(kind);
            bindings.push(ListenerGuard {
                kind,
                wiring: Rc::clone(&self.wiring),
            });
        }
        bindings
    }
}

/// Record store backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: HashMap<RecordKey, CharacterRecord>,
    spells: HashMap<RecordKey, SpellRecord>,
    failing: HashSet<RecordKey>,
    fail_owner: bool,
    spell_lookups: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(mut self, key: impl Into<RecordKey>, spells: Option<Vec<RecordKey>>) -> Self {
        let key = key.into();
        self.characters.insert(
            key.clone(),
            CharacterRecord {
                id: Some(key),
                name: None,
                spells,
            },
        );
        self
    }

    pub fn with_spell(mut self, spell: SpellRecord) -> Self {
        self.spells.insert(spell.id.clone(), spell);
        self
    }

    /// Lookups of `key` fail instead of resolving.
    pub fn failing_spell(mut self, key: impl Into<RecordKey>) -> Self {
        self.failing.insert(key.into());
        self
    }

    /// Owner lookups fail.
    pub fn failing_owner(mut self) -> Self {
        self.fail_owner = true;
        self
    }

    pub fn spell_lookups(&self) -> usize {
        self.spell_lookups.get()
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryStore {
    async fn fetch_character(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<CharacterRecord>> {
        if self.fail_owner {
            return Err(StoreError::lookup(store, key, "store unavailable"));
        }
        Ok(self.characters.get(key).cloned())
    }

    async fn fetch_spell(
        &self,
        store: &StoreName,
        key: &RecordKey,
    ) -> StoreResult<Option<SpellRecord>> {
        self.spell_lookups.set(self.spell_lookups.get() + 1);
        if self.failing.contains(key) {
            return Err(StoreError::lookup(store, key, "transaction aborted"));
        }
        Ok(self.spells.get(key).cloned())
    }
}

/// Resolves images to `blob:` URLs; MIME types in `unsupported` fail.
#[derive(Debug, Default)]
pub struct BlobResolver {
    unsupported: HashSet<String>,
    issued: Cell<u32>,
}

impl BlobResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, mime: &str) -> Self {
        self.unsupported.insert(mime.to_string());
        self
    }
}

impl ResourceResolver for BlobResolver {
    fn resolve(&self, image: &ImagePayload) -> Result<DisplayResource, ResolveError> {
        if image.is_empty() {
            return Err(ResolveError::Empty);
        }
        if self.unsupported.contains(&image.mime_type) {
            return Err(ResolveError::UnsupportedType(image.mime_type.clone()));
        }
        let serial = self.issued.get() + 1;
        self.issued.set(serial);
        Ok(DisplayResource(format!("blob:grimoire/{serial}")))
    }
}

/// Card factory producing [`FakeElement`]s; names in `failing` fail to render.
#[derive(Debug, Default)]
pub struct FakeCards {
    failing: HashSet<String>,
    rendered: RefCell<Vec<SpellCard>>,
}

impl FakeCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Cards passed to the factory, in call order.
    pub fn rendered(&self) -> Vec<SpellCard> {
        self.rendered.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CardFactory for FakeCards {
    type Element = FakeElement;

    async fn render_card(&self, card: &SpellCard) -> Result<FakeElement, RenderError> {
        let serial = {
            let mut rendered = self.rendered.borrow_mut();
            rendered.push(card.clone());
            rendered.len() as u32
        };
        if self.failing.contains(&card.record.name) {
            return Err(RenderError::Template {
                name: card.record.name.clone(),
                message: "template threw".into(),
            });
        }
        Ok(FakeElement {
            label: card.record.name.clone(),
            serial,
            replica: false,
        })
    }
}

pub type FakeDependencies = Dependencies<MemoryStore, BlobResolver, FakeCards>;

/// Dependencies over `store` with a permissive resolver and factory.
pub fn dependencies(store: MemoryStore) -> FakeDependencies {
    dependencies_with(store, BlobResolver::new(), FakeCards::new())
}

pub fn dependencies_with(
    store: MemoryStore,
    resolver: BlobResolver,
    cards: FakeCards,
) -> FakeDependencies {
    Dependencies {
        store,
        resolver,
        cards,
        owner_store: StoreName::new(OWNER_STORE).expect("owner store name"),
        item_store: StoreName::new(ITEM_STORE).expect("item store name"),
    }
}

/// `count` spells of kind `magia` keyed `1..=count`, named `Spell 0..`.
pub fn spell_collection(owner: i64, count: usize) -> MemoryStore {
    let keys: Vec<RecordKey> = (1..=count as i64).map(RecordKey::Number).collect();
    let mut store = MemoryStore::new().with_character(owner, Some(keys.clone()));
    for (i, key) in keys.into_iter().enumerate() {
        store = store.with_spell(SpellRecord::new(key, format!("Spell {i}"), "magia"));
    }
    store
}

/// Engine over `count` items mounted on `surface`, drawn once without
/// animation. Items are labelled `Spell 0..`.
pub fn mounted_engine(surface: &RecordingSurface, count: usize) -> CarouselEngine<RecordingSurface> {
    mounted_engine_with(surface, count, Transition::default())
}

/// [`mounted_engine`] settling with `transition`.
pub fn mounted_engine_with(
    surface: &RecordingSurface,
    count: usize,
    transition: Transition,
) -> CarouselEngine<RecordingSurface> {
    let items = (0..count)
        .map(|i| CarouselItem {
            key: RecordKey::Number(i as i64),
            element: FakeElement {
                label: format!("Spell {i}"),
                serial: i as u32,
                replica: false,
            },
        })
        .collect();
    let buffer = LoopBuffer::build(items, 3, |item: &CarouselItem<FakeElement>| CarouselItem {
        key: item.key.clone(),
        element: FakeElement {
            replica: true,
            ..item.element.clone()
        },
    });
    for slot in buffer.iter() {
        surface.append_item(&slot.value.element);
    }
    let thumbnails = (0..count)
        .map(|i| Thumbnail {
            index: i,
            key: RecordKey::Number(i as i64),
            label: format!("Spell {i}"),
            image: DisplayResource::from("blob:grimoire/test"),
        })
        .collect();
    let mut engine = CarouselEngine::new(
        surface.clone(),
        buffer,
        ThumbnailStrip::new(thumbnails),
        transition,
    );
    engine.render(false);
    engine
}
