//! Loop buffer: the real items with replicas of their boundaries on both
//! sides.
//!
//! Layout is `[clones of the last C] ++ [N real items] ++ [clones of the
//! first C]` with `C = min(max_clones, N)`, and `C = 0` when `N <= 1`. Moving
//! past either end of the real range lands on a replica that looks exactly
//! like the real item one period away, so the view can be teleported by `N`
//! slots without a visible jump.

use std::ops::Range;

/// Where a buffer slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Real,
    /// Replica of the real item at this index.
    Clone { of: usize },
}

#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub value: T,
    pub origin: Origin,
}

#[derive(Debug, Clone)]
pub struct LoopBuffer<T> {
    slots: Vec<Slot<T>>,
    real_count: usize,
    clone_count: usize,
}

/// Effective clone count for `real_count` items.
pub fn clone_count_for(real_count: usize, max_clones: usize) -> usize {
    if real_count <= 1 {
        0
    } else {
        max_clones.min(real_count)
    }
}

type Boundaries<T> = (Vec<Slot<T>>, Vec<Slot<T>>);

/// Replicas of the last `clone_count` items (head) and the first
/// `clone_count` items (tail).
fn boundary_slots<T, F>(items: &[T], clone_count: usize, mut replicate: F) -> Option<Boundaries<T>>
where
    F: FnMut(&T) -> Option<T>,
{
    let mut replica = |of: usize| {
        replicate(&items[of]).map(|value| Slot {
            value,
            origin: Origin::Clone { of },
        })
    };
    let head = ((items.len() - clone_count)..items.len())
        .map(&mut replica)
        .collect::<Option<Vec<_>>>()?;
    let tail = (0..clone_count)
        .map(&mut replica)
        .collect::<Option<Vec<_>>>()?;
    Some((head, tail))
}

impl<T> LoopBuffer<T> {
    /// Build the buffer from the real items in order. `replicate` produces an
    /// independent copy of an item; it is never asked to copy a replica.
    pub fn build<F>(items: Vec<T>, max_clones: usize, mut replicate: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        let clone_count = clone_count_for(items.len(), max_clones);
        let (head, tail) = boundary_slots(&items, clone_count, |item| Some(replicate(item)))
            .unwrap_or_default();
        Self::assemble(head, items, tail, clone_count)
    }

    /// Like [`Self::build`] with a fallible `replicate`. When any replica
    /// cannot be made, the items are handed back untouched.
    pub fn try_build<F>(items: Vec<T>, max_clones: usize, replicate: F) -> Result<Self, Vec<T>>
    where
        F: FnMut(&T) -> Option<T>,
    {
        let clone_count = clone_count_for(items.len(), max_clones);
        match boundary_slots(&items, clone_count, replicate) {
            Some((head, tail)) => Ok(Self::assemble(head, items, tail, clone_count)),
            None => Err(items),
        }
    }

    /// The real items alone. The loop still wraps, by teleporting from the
    /// edges, but the seam is visible.
    pub fn without_clones(items: Vec<T>) -> Self {
        Self::assemble(Vec::new(), items, Vec::new(), 0)
    }

    fn assemble(head: Vec<Slot<T>>, items: Vec<T>, tail: Vec<Slot<T>>, clone_count: usize) -> Self {
        let real_count = items.len();
        let mut slots = Vec::with_capacity(real_count + 2 * clone_count);
        slots.extend(head);
        slots.extend(items.into_iter().map(|value| Slot {
            value,
            origin: Origin::Real,
        }));
        slots.extend(tail);
        Self {
            slots,
            real_count,
            clone_count,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `N`.
    pub fn real_count(&self) -> usize {
        self.real_count
    }

    /// `C`.
    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// Buffer positions holding real items: `C..C+N`.
    pub fn real_range(&self) -> Range<usize> {
        self.clone_count..self.clone_count + self.real_count
    }

    pub fn get(&self, position: usize) -> Option<&Slot<T>> {
        self.slots.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<T>> {
        self.slots.iter()
    }

    /// Buffer position of real item `real_index`.
    pub fn position_of(&self, real_index: usize) -> Option<usize> {
        (real_index < self.real_count).then_some(real_index + self.clone_count)
    }

    /// Real item shown at any (possibly out-of-buffer) signed position,
    /// `(position - C) mod N`. `None` for an empty buffer.
    pub fn real_index_at(&self, position: isize) -> Option<usize> {
        if self.real_count == 0 {
            return None;
        }
        let n = self.real_count as isize;
        Some((position - self.clone_count as isize).rem_euclid(n) as usize)
    }

    /// Fold a signed position back into the real range by whole periods.
    pub fn normalize(&self, position: isize) -> isize {
        match self.real_index_at(position) {
            Some(real) => (real + self.clone_count) as isize,
            None => position,
        }
    }

    pub fn contains_real(&self, position: isize) -> bool {
        position >= 0 && self.real_range().contains(&(position as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(n: usize) -> LoopBuffer<String> {
        let items = (0..n).map(|i| format!("item-{i}")).collect();
        LoopBuffer::build(items, 3, |s| format!("{s}'"))
    }

    #[test]
    fn buffer_length_is_n_plus_two_c() {
        for n in 2..12 {
            let buffer = build(n);
            let c = n.min(3);
            assert_eq!(buffer.clone_count(), c);
            assert_eq!(buffer.len(), n + 2 * c, "n = {n}");
        }
    }

    #[test]
    fn real_range_maps_to_original_order() {
        let buffer = build(5);
        for p in buffer.real_range() {
            let slot = buffer.get(p).expect("slot");
            assert_eq!(slot.origin, Origin::Real);
            assert_eq!(slot.value, format!("item-{}", p - 3));
            assert_eq!(buffer.real_index_at(p as isize), Some(p - 3));
        }
    }

    #[test]
    fn boundary_slots_replicate_the_opposite_end() {
        let buffer = build(5);
        let layout: Vec<&str> = buffer.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(
            layout,
            vec![
                "item-2'", "item-3'", "item-4'", "item-0", "item-1", "item-2", "item-3", "item-4",
                "item-0'", "item-1'", "item-2'",
            ]
        );
        assert_eq!(buffer.get(0).map(|s| s.origin), Some(Origin::Clone { of: 2 }));
        assert_eq!(buffer.get(8).map(|s| s.origin), Some(Origin::Clone { of: 0 }));
    }

    #[test]
    fn clone_slots_show_the_item_one_period_away() {
        let buffer = build(4);
        for (p, slot) in buffer.iter().enumerate() {
            if let Origin::Clone { of } = slot.origin {
                assert_eq!(buffer.real_index_at(p as isize), Some(of));
            }
        }
    }

    #[test]
    fn two_items_clone_both_sides_fully() {
        let buffer = build(2);
        assert_eq!(buffer.clone_count(), 2);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn single_and_empty_collections_get_no_clones() {
        let single = build(1);
        assert_eq!(single.clone_count(), 0);
        assert_eq!(single.len(), 1);
        assert_eq!(single.normalize(1), 0);
        assert_eq!(single.normalize(-1), 0);

        let empty = build(0);
        assert!(empty.is_empty());
        assert_eq!(empty.real_index_at(4), None);
        assert_eq!(empty.normalize(4), 4);
    }

    #[test]
    fn replicate_only_sees_real_items() {
        let mut seen = Vec::new();
        let _ = LoopBuffer::build(vec![10, 20, 30, 40], 3, |v| {
            seen.push(*v);
            *v + 1
        });
        seen.sort_unstable();
        assert_eq!(seen, vec![10, 20, 20, 30, 30, 40]);
    }

    #[test]
    fn failed_replica_hands_items_back() {
        let mut calls = 0;
        let result = LoopBuffer::try_build(vec![1, 2, 3, 4], 3, |v| {
            calls += 1;
            (*v != 3).then_some(*v * 10)
        });
        assert_eq!(result.err(), Some(vec![1, 2, 3, 4]));
        assert!(calls > 0);
    }

    #[test]
    fn fallible_build_matches_build_when_every_replica_succeeds() {
        let buffer = LoopBuffer::try_build(vec![1, 2, 3], 3, |v| Some(*v * 10)).expect("built");
        let layout: Vec<i32> = buffer.iter().map(|s| s.value).collect();
        assert_eq!(layout, vec![10, 20, 30, 1, 2, 3, 10, 20, 30]);
    }

    #[test]
    fn buffer_without_clones_still_wraps() {
        let buffer = LoopBuffer::without_clones(vec!['a', 'b', 'c']);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.clone_count(), 0);
        assert_eq!(buffer.normalize(3), 0);
        assert_eq!(buffer.normalize(-1), 2);
    }

    #[test]
    fn normalize_folds_by_whole_periods() {
        let buffer = build(5);
        assert_eq!(buffer.normalize(8), 3);
        assert_eq!(buffer.normalize(2), 7);
        assert_eq!(buffer.normalize(-4), 6);
        assert_eq!(buffer.normalize(14), 4);
        assert!(buffer.contains_real(3));
        assert!(!buffer.contains_real(8));
        assert!(!buffer.contains_real(-1));
    }
}
