//! Carousel setup and teardown.
//!
//! [`initialize_carousel`] fetches the owner's linked records, renders their
//! cards, builds the loop buffer and thumbnails, wires input and draws the
//! first frame. Everything it wires is owned by the returned
//! [`CarouselHandle`].

use std::fmt;

use futures::future::join_all;
use grimoire_contracts::prelude::{
    CardFactory, CardPresentation, RecordStore, ResourceResolver, SpellCard,
};
use grimoire_model::{DisplayResource, RecordKey, SpellRecord, StoreName};
use tracing::{debug, info, warn};

use crate::config::CarouselConfig;
use crate::controller::CarouselController;
use crate::engine::{CarouselEngine, CarouselItem};
use crate::error::Result;
use crate::loop_buffer::LoopBuffer;
use crate::surface::{Bindings, CarouselSurface};
use crate::thumbnails::{Thumbnail, ThumbnailStrip};

/// External collaborators and the stores they read from.
#[derive(Debug, Clone)]
pub struct Dependencies<St, R, F> {
    /// Keyed record lookup.
    pub store: St,
    /// Image bytes to displayable resource.
    pub resolver: R,
    /// Card template.
    pub cards: F,
    /// Store holding the owner records.
    pub owner_store: StoreName,
    /// Store holding the linked item records.
    pub item_store: StoreName,
}

/// Owns a live carousel's listeners. [`CarouselHandle::dispose`] unwires
/// everything; dropping the handle does the same.
#[derive(Default)]
pub struct CarouselHandle {
    active: Option<ActiveCarousel>,
}

struct ActiveCarousel {
    bindings: Bindings,
    shutdown: Box<dyn Fn()>,
}

impl CarouselHandle {
    /// Handle for a carousel that never wired anything (empty state).
    pub fn noop() -> Self {
        Self::default()
    }

    fn active<S>(bindings: Bindings, controller: CarouselController<S>) -> Self
    where
        S: CarouselSurface + 'static,
        S::Element: 'static,
    {
        Self {
            active: Some(ActiveCarousel {
                bindings,
                shutdown: Box::new(move || controller.shutdown()),
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Remove every listener and cancel the auto-rotate timer. Safe to call
    /// more than once.
    pub fn dispose(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        (active.shutdown)();
        let count = active.bindings.len();
        drop(active.bindings);
        info!("carousel: disposed, {} bindings released", count);
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselHandle")
            .field(
                "bindings",
                &self.active.as_ref().map(|active| active.bindings.len()),
            )
            .finish()
    }
}

/// Build the carousel for `owner_key` on `surface`.
///
/// Fails only when the configuration is invalid or the owner lookup itself
/// fails; missing records, unresolvable images and failed card renders are
/// filtered out or replaced locally.
pub async fn initialize_carousel<S, St, R, F>(
    surface: S,
    owner_key: &RecordKey,
    deps: &Dependencies<St, R, F>,
    config: &CarouselConfig,
) -> Result<CarouselHandle>
where
    S: CarouselSurface + Clone + 'static,
    S::Element: 'static,
    St: RecordStore,
    R: ResourceResolver,
    F: CardFactory<Element = S::Element>,
{
    config.validate()?;

    surface.show_message(&config.messages.loading);
    surface.set_nav_visible(false);

    let owner = deps
        .store
        .fetch_character(&deps.owner_store, owner_key)
        .await?;
    let linked: Vec<RecordKey> = owner
        .map(|record| record.linked_spells().to_vec())
        .unwrap_or_default();

    if linked.is_empty() {
        info!("carousel: owner {} has no linked items", owner_key);
        surface.show_message(&config.messages.no_linked_items);
        return Ok(CarouselHandle::noop());
    }

    let spells = fetch_matching(&linked, deps, &config.required_kind).await;
    if spells.is_empty() {
        info!(
            "carousel: owner {} has no items of kind '{}'",
            owner_key, config.required_kind
        );
        surface.show_message(&config.messages.no_matching_items);
        return Ok(CarouselHandle::noop());
    }

    let presentation = CardPresentation {
        is_static: true,
        scale: config.item_scale,
        height_px: config.card_height_px,
    };
    let cards: Vec<SpellCard> = spells
        .into_iter()
        .map(|record| {
            let image = resolve_image(&record, &deps.resolver, config);
            SpellCard {
                record,
                image,
                presentation,
            }
        })
        .collect();

    let rendered = join_all(cards.iter().map(|card| deps.cards.render_card(card))).await;
    let mut items = Vec::with_capacity(cards.len());
    let mut thumbnails = Vec::with_capacity(cards.len());
    for (card, result) in cards.into_iter().zip(rendered) {
        match result {
            Ok(element) => {
                thumbnails.push(Thumbnail {
                    index: items.len(),
                    key: card.record.id.clone(),
                    label: card.record.name.clone(),
                    image: card.image,
                });
                items.push(CarouselItem {
                    key: card.record.id,
                    element,
                });
            }
            Err(err) => warn!("carousel: dropping '{}': {}", card.record.name, err),
        }
    }

    if items.is_empty() {
        surface.show_message(&config.messages.no_matching_items);
        return Ok(CarouselHandle::noop());
    }

    surface.clear_items();
    surface.set_nav_visible(true);
    surface.mount_thumbnails(&thumbnails);

    let replicated = LoopBuffer::try_build(items, config.max_clone_count, |item| {
        surface
            .clone_element(&item.element)
            .map(|element| CarouselItem {
                key: item.key.clone(),
                element,
            })
    });
    let buffer = match replicated {
        Ok(buffer) => buffer,
        Err(items) => {
            warn!("carousel: boundary items could not be copied, looping without replicas");
            LoopBuffer::without_clones(items)
        }
    };
    for slot in buffer.iter() {
        surface.append_item(&slot.value.element);
    }
    info!(
        "carousel: mounted {} items ({} clones per side)",
        buffer.real_count(),
        buffer.clone_count()
    );

    let engine = CarouselEngine::new(
        surface.clone(),
        buffer,
        ThumbnailStrip::new(thumbnails),
        config.transition,
    );
    let controller = CarouselController::new(engine);
    let bindings = surface.bind_input(&controller, config);
    debug!("carousel: {} bindings wired", bindings.len());
    controller.initial_render();

    Ok(CarouselHandle::active(bindings, controller))
}

/// Fetch every linked record concurrently and keep those of `kind`, in link
/// order. Lookup failures and absent records are skipped.
async fn fetch_matching<St, R, F>(
    keys: &[RecordKey],
    deps: &Dependencies<St, R, F>,
    kind: &str,
) -> Vec<SpellRecord>
where
    St: RecordStore,
{
    let results = join_all(
        keys.iter()
            .map(|key| deps.store.fetch_spell(&deps.item_store, key)),
    )
    .await;

    keys.iter()
        .zip(results)
        .filter_map(|(key, result)| match result {
            Ok(Some(record)) if record.is_kind(kind) => Some(record),
            Ok(Some(record)) => {
                debug!("carousel: skipping {} of kind '{}'", key, record.kind);
                None
            }
            Ok(None) => {
                debug!("carousel: linked record {} not found", key);
                None
            }
            Err(err) => {
                warn!("carousel: linked record {} failed: {}", key, err);
                None
            }
        })
        .collect()
}

fn resolve_image<R: ResourceResolver>(
    record: &SpellRecord,
    resolver: &R,
    config: &CarouselConfig,
) -> DisplayResource {
    let Some(image) = record.image.as_ref().filter(|image| !image.is_empty()) else {
        return DisplayResource::from(config.placeholder_image.as_str());
    };
    match resolver.resolve(image) {
        Ok(resource) => resource,
        Err(err) => {
            warn!(
                "carousel: image for '{}' unavailable, using placeholder: {}",
                record.name, err
            );
            DisplayResource::from(config.placeholder_image.as_str())
        }
    }
}
