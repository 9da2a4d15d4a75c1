//! Stateless flag-equality filtering over a builder set's enumeration.
//!
//! A filter is a `(desired, mask)` pair: for each builder in enumeration
//! order, every flag selected by the mask is compared against the desired
//! record, rejecting on the first mismatch. The empty mask selects nothing
//! and therefore matches every enumerated builder. Results preserve
//! enumeration order; nothing is sorted or paginated.

use builderbook_types::flags::{BuilderFlag, BuilderFlags, FlagSet};
use builderbook_types::identity::BuilderId;

use crate::builders::BuilderSet;

/// Whether `stored` agrees with `desired` on every flag selected by `mask`.
pub fn matches(stored: &BuilderFlags, desired: &BuilderFlags, mask: FlagSet) -> bool {
    for flag in BuilderFlag::ALL {
        if mask.contains(flag) && stored.get(flag) != desired.get(flag) {
            return false;
        }
    }
    true
}

/// Filter a set's enumeration down to the builders matching `(desired, mask)`.
///
/// The result preserves the set's current sequence order and is never longer
/// than the enumeration itself.
pub fn filter_builders(
    set: &BuilderSet,
    desired: &BuilderFlags,
    mask: FlagSet,
) -> Vec<BuilderId> {
    set.iter()
        .filter(|&(_, stored)| matches(stored, desired, mask))
        .map(|(id, _)| id)
        .collect()
}
