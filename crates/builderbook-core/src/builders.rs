//! Indexed builder collection for one curator namespace.
//!
//! A [`BuilderSet`] keeps two structures in lockstep: an ordered `Vec` of
//! builder ids and a map from id to its record plus its current position in
//! that `Vec`. The pair gives O(1) upsert, existence check, lookup, and
//! removal, with removal done swap-with-last: the final element moves into
//! the vacated slot and its recorded position is updated, so the sequence is
//! insertion-ordered only until the first removal and swap-perturbed after
//! that. Enumeration reproduces the current order exactly; it is never
//! re-sorted or compacted by shifting.
//!
//! Invariant: an id has a position in the map if and only if it occupies that
//! slot of the `Vec`. Both sides change inside a single method call, so the
//! invariant holds at every method boundary.

use std::collections::HashMap;

use builderbook_types::flags::BuilderFlags;
use builderbook_types::identity::BuilderId;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    flags: BuilderFlags,
    position: usize,
}

/// The indexed set of builder records in one curator's namespace.
///
/// The set itself carries no authorization; the registry facade gates who may
/// mutate which namespace. The ordered sequence is exposed read-only.
#[derive(Debug, Clone, Default)]
pub struct BuilderSet {
    order: Vec<BuilderId>,
    slots: HashMap<BuilderId, Slot>,
}

/// What [`BuilderSet::upsert`] did with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new record was appended to the sequence.
    Inserted,
    /// An existing record's flags were overwritten in place.
    Updated,
}

impl BuilderSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.order.len(), self.slots.len());
        self.order.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// O(1) membership test via the index.
    pub fn contains(&self, builder: BuilderId) -> bool {
        self.slots.contains_key(&builder)
    }

    /// Look up a builder's stored flags.
    pub fn get(&self, builder: BuilderId) -> Option<&BuilderFlags> {
        self.slots.get(&builder).map(|slot| &slot.flags)
    }

    /// The currently-existing builder ids in current sequence order.
    ///
    /// Repeatable between mutations and never includes removed entries.
    pub fn builders(&self) -> &[BuilderId] {
        &self.order
    }

    /// Iterate over `(id, flags)` pairs in current sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (BuilderId, &BuilderFlags)> {
        self.order.iter().map(|id| (*id, &self.slots[id].flags))
    }

    /// Insert or overwrite a builder record. O(1).
    ///
    /// A new record is appended to the end of the sequence; an existing one
    /// has its flags overwritten in place without moving its position.
    pub fn upsert(&mut self, builder: BuilderId, flags: BuilderFlags) -> Upsert {
        if let Some(slot) = self.slots.get_mut(&builder) {
            slot.flags = flags;
            return Upsert::Updated;
        }
        let position = self.order.len();
        self.order.push(builder);
        self.slots.insert(builder, Slot { flags, position });
        Upsert::Inserted
    }

    /// Remove a builder record swap-with-last. O(1).
    ///
    /// The former last element fills the vacated slot (unless the removed
    /// element was last) and its recorded position is updated to match.
    /// Returns the removed flags, or `None` if no record exists -- the index
    /// entry and the record are destroyed together, never one without the
    /// other.
    pub fn remove(&mut self, builder: BuilderId) -> Option<BuilderFlags> {
        let removed = self.slots.remove(&builder)?;
        let last = self.order.len() - 1;
        if removed.position != last {
            let moved = self.order[last];
            self.order[removed.position] = moved;
            if let Some(slot) = self.slots.get_mut(&moved) {
                slot.position = removed.position;
            }
            debug_assert!(self.slots.contains_key(&moved));
        }
        self.order.truncate(last);
        Some(removed.flags)
    }
}
