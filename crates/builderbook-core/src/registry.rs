//! The registry facade: the complete external operation surface.
//!
//! [`Registry`] owns access control, the curator directory, one
//! [`BuilderSet`] per curator namespace, and the event bus. Every mutating
//! operation takes the caller identity explicitly, validates all of its
//! preconditions before touching any state, applies the change, and then
//! publishes exactly one event mirroring it. Reads are public and never
//! consult the caller.
//!
//! Mutations take `&mut self`, so operations from different callers are
//! serialized structurally; there is no internal locking and no suspension
//! point inside an operation.

use std::collections::HashMap;

use builderbook_types::curator::CuratorEntry;
use builderbook_types::error::{RegistryError, Role};
use builderbook_types::event::RegistryEvent;
use builderbook_types::flags::{BuilderFlags, FlagSet};
use builderbook_types::identity::{AccountId, BuilderId};
use tokio::sync::broadcast;
use tracing::info;

use crate::access::AccessControl;
use crate::builders::BuilderSet;
use crate::directory::CuratorDirectory;
use crate::event::EventBus;
use crate::filter;

/// Default broadcast capacity of the event channel.
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// The multi-tenant builder registry.
///
/// An explicit, injectable value: construct one, pass it `&`/`&mut` to every
/// call site. There are no ambient singletons.
#[derive(Debug)]
pub struct Registry {
    access: AccessControl,
    directory: CuratorDirectory,
    namespaces: HashMap<AccountId, BuilderSet>,
    events: EventBus,
}

impl Registry {
    /// Create a registry with an initial owner and default event capacity.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `owner` is the null identity.
    pub fn new(owner: AccountId) -> Result<Self, RegistryError> {
        Self::with_event_capacity(owner, DEFAULT_EVENT_CAPACITY)
    }

    /// Create a registry with an explicit event channel capacity.
    pub fn with_event_capacity(
        owner: AccountId,
        capacity: usize,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            access: AccessControl::new(owner)?,
            directory: CuratorDirectory::new(),
            namespaces: HashMap::new(),
            events: EventBus::new(capacity),
        })
    }

    // -----------------------------------------------------------------------
    // Role predicates and read helpers
    // -----------------------------------------------------------------------

    /// The current owner.
    pub fn owner(&self) -> AccountId {
        self.access.owner()
    }

    /// Whether `id` is the current owner.
    pub fn is_owner(&self, id: AccountId) -> bool {
        self.access.is_owner(id)
    }

    /// Whether `id` is a registered curator.
    pub fn is_curator(&self, id: AccountId) -> bool {
        self.directory.is_curator(id)
    }

    /// A curator's directory entry, if registered.
    pub fn curator_metadata(&self, curator: AccountId) -> Option<&CuratorEntry> {
        self.directory.get(curator)
    }

    /// Subscribe to the registry's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    // -----------------------------------------------------------------------
    // Owner operations
    // -----------------------------------------------------------------------

    /// Transfer the owner role to `new_owner`. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<(), RegistryError> {
        let previous = self.access.transfer(caller, new_owner)?;
        info!(%previous, %new_owner, "ownership transferred");
        self.events.publish(RegistryEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Register `curator` with opaque metadata. Owner-only.
    pub fn register_curator(
        &mut self,
        caller: AccountId,
        curator: AccountId,
        metadata: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.access.require_owner(caller)?;
        let entry = self.directory.register(curator, metadata)?;
        let metadata = entry.metadata.clone();
        info!(%curator, "curator registered");
        self.events
            .publish(RegistryEvent::CuratorRegistered { curator, metadata });
        Ok(())
    }

    /// Replace `curator`'s metadata. Owner-only.
    pub fn update_curator_metadata(
        &mut self,
        caller: AccountId,
        curator: AccountId,
        metadata: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.access.require_owner(caller)?;
        let entry = self.directory.update_metadata(curator, metadata)?;
        let metadata = entry.metadata.clone();
        info!(%curator, "curator metadata updated");
        self.events
            .publish(RegistryEvent::CuratorUpdated { curator, metadata });
        Ok(())
    }

    /// Remove `curator`'s directory entry. Owner-only.
    ///
    /// The curator's builder records are left intact and remain queryable;
    /// callers must check [`is_curator`](Self::is_curator) before trusting a
    /// namespace's data as current.
    pub fn unregister_curator(
        &mut self,
        caller: AccountId,
        curator: AccountId,
    ) -> Result<(), RegistryError> {
        self.access.require_owner(caller)?;
        self.directory.unregister(curator)?;
        info!(%curator, "curator unregistered");
        self.events
            .publish(RegistryEvent::CuratorUnregistered { curator });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Curator operations (own namespace only)
    // -----------------------------------------------------------------------

    /// Create or overwrite the record for `builder` in the caller's own
    /// namespace. Curator-only.
    ///
    /// First call for a builder appends it to the namespace's ordered
    /// sequence; later calls overwrite the flags in place without moving it.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not a registered curator;
    /// `InvalidArgument` if `builder` is the null identity.
    pub fn set_builder(
        &mut self,
        caller: AccountId,
        builder: BuilderId,
        flags: BuilderFlags,
    ) -> Result<(), RegistryError> {
        self.require_curator(caller)?;
        if builder.is_nil() {
            return Err(RegistryError::InvalidArgument("builder identity is nil"));
        }
        let outcome = self
            .namespaces
            .entry(caller)
            .or_default()
            .upsert(builder, flags);
        info!(curator = %caller, %builder, ?outcome, "builder set");
        self.events.publish(RegistryEvent::BuilderSet {
            curator: caller,
            builder,
            flags,
        });
        Ok(())
    }

    /// Remove the record for `builder` from the caller's own namespace.
    /// Curator-only.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not a registered curator; `NotFound` if
    /// no record exists for the pair.
    pub fn remove_builder(
        &mut self,
        caller: AccountId,
        builder: BuilderId,
    ) -> Result<(), RegistryError> {
        self.require_curator(caller)?;
        let removed = self
            .namespaces
            .get_mut(&caller)
            .and_then(|set| set.remove(builder));
        if removed.is_none() {
            return Err(RegistryError::NotFound("builder record"));
        }
        info!(curator = %caller, %builder, "builder removed");
        self.events.publish(RegistryEvent::BuilderRemoved {
            curator: caller,
            builder,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Public reads
    // -----------------------------------------------------------------------

    /// The builder ids of `curator`'s namespace in current sequence order.
    ///
    /// Does not validate curator existence: an unregistered curator's
    /// surviving data is still listed.
    pub fn list_builders(&self, curator: AccountId) -> Vec<BuilderId> {
        self.namespaces
            .get(&curator)
            .map(|set| set.builders().to_vec())
            .unwrap_or_default()
    }

    /// Whether a record exists for `(curator, builder)`.
    pub fn is_builder_registered(&self, curator: AccountId, builder: BuilderId) -> bool {
        self.namespaces
            .get(&curator)
            .is_some_and(|set| set.contains(builder))
    }

    /// The stored flags for `(curator, builder)`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record exists for the pair.
    pub fn get_builder(
        &self,
        curator: AccountId,
        builder: BuilderId,
    ) -> Result<BuilderFlags, RegistryError> {
        self.namespaces
            .get(&curator)
            .and_then(|set| set.get(builder))
            .copied()
            .ok_or(RegistryError::NotFound("builder record"))
    }

    /// Number of live records in `curator`'s namespace.
    pub fn builder_count(&self, curator: AccountId) -> usize {
        self.namespaces.get(&curator).map_or(0, BuilderSet::len)
    }

    /// The builders of `curator`'s namespace whose flags agree with
    /// `desired` on every flag selected by `mask`, in sequence order.
    ///
    /// An empty mask matches every enumerated builder.
    pub fn query_builders(
        &self,
        curator: AccountId,
        desired: &BuilderFlags,
        mask: FlagSet,
    ) -> Vec<BuilderId> {
        self.namespaces
            .get(&curator)
            .map(|set| filter::filter_builders(set, desired, mask))
            .unwrap_or_default()
    }

    fn require_curator(&self, caller: AccountId) -> Result<(), RegistryError> {
        if self.directory.is_curator(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller,
                required: Role::Curator,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builderbook_types::flags::BuilderFlag;

    fn setup() -> (Registry, AccountId, AccountId) {
        let owner = AccountId::new();
        let curator = AccountId::new();
        let mut registry = Registry::new(owner).unwrap();
        registry
            .register_curator(owner, curator, "meta")
            .unwrap();
        (registry, owner, curator)
    }

    fn active(value: bool) -> BuilderFlags {
        BuilderFlags::new().with(BuilderFlag::Active, value)
    }

    #[test]
    fn set_builder_then_read_back() {
        let (mut registry, _, curator) = setup();
        let builder = BuilderId::new();
        let flags = active(true).with(BuilderFlag::Recommended, true);

        registry.set_builder(curator, builder, flags).unwrap();

        assert!(registry.is_builder_registered(curator, builder));
        assert_eq!(registry.get_builder(curator, builder).unwrap(), flags);
        assert_eq!(registry.list_builders(curator), vec![builder]);
        assert_eq!(registry.builder_count(curator), 1);
    }

    #[test]
    fn remove_builder_destroys_record_and_listing_entry() {
        let (mut registry, _, curator) = setup();
        let builder = BuilderId::new();
        registry.set_builder(curator, builder, active(true)).unwrap();

        registry.remove_builder(curator, builder).unwrap();

        assert!(!registry.is_builder_registered(curator, builder));
        assert!(registry.list_builders(curator).is_empty());
        assert_eq!(
            registry.get_builder(curator, builder),
            Err(RegistryError::NotFound("builder record"))
        );
    }

    #[test]
    fn non_curator_mutations_always_unauthorized() {
        let (mut registry, owner, _) = setup();
        let stranger = AccountId::new();
        let builder = BuilderId::new();

        // Regardless of prior state -- including the owner, who holds no
        // curator role.
        for caller in [stranger, owner] {
            assert!(matches!(
                registry.set_builder(caller, builder, active(true)),
                Err(RegistryError::Unauthorized {
                    required: Role::Curator,
                    ..
                })
            ));
            assert!(matches!(
                registry.remove_builder(caller, builder),
                Err(RegistryError::Unauthorized { .. })
            ));
        }
    }

    #[test]
    fn owner_operations_require_owner_role() {
        let (mut registry, _, curator) = setup();

        let err = registry
            .register_curator(curator, AccountId::new(), "meta")
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Unauthorized {
                required: Role::Owner,
                ..
            }
        ));
        assert!(registry
            .update_curator_metadata(curator, curator, "meta")
            .is_err());
        assert!(registry.unregister_curator(curator, curator).is_err());
        assert!(registry
            .transfer_ownership(curator, AccountId::new())
            .is_err());
    }

    #[test]
    fn set_builder_rejects_nil_builder_without_side_effects() {
        let (mut registry, _, curator) = setup();
        let mut rx = registry.subscribe();

        let err = registry
            .set_builder(curator, BuilderId::nil(), active(true))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
        assert_eq!(registry.builder_count(curator), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn namespace_isolation_between_curators() {
        let (mut registry, owner, c1) = setup();
        let c2 = AccountId::new();
        registry.register_curator(owner, c2, "other").unwrap();

        let shared_builder = BuilderId::new();
        registry.set_builder(c1, shared_builder, active(true)).unwrap();
        registry.set_builder(c2, shared_builder, active(false)).unwrap();

        // Mutating c1's record never leaks into c2's namespace.
        registry.remove_builder(c1, shared_builder).unwrap();
        assert!(!registry.is_builder_registered(c1, shared_builder));
        assert!(registry.is_builder_registered(c2, shared_builder));
        assert_eq!(
            registry.get_builder(c2, shared_builder).unwrap(),
            active(false)
        );
    }

    #[test]
    fn swap_removal_scenario_from_three_builders() {
        let (mut registry, _, curator) = setup();
        let x = BuilderId::new();
        let y = BuilderId::new();
        let z = BuilderId::new();

        registry
            .set_builder(curator, x, active(true).with(BuilderFlag::Recommended, true))
            .unwrap();
        registry.set_builder(curator, y, active(false)).unwrap();
        registry.set_builder(curator, z, active(true)).unwrap();

        assert_eq!(registry.list_builders(curator), vec![x, y, z]);

        let mask = FlagSet::empty().with(BuilderFlag::Active);
        assert_eq!(
            registry.query_builders(curator, &active(true), mask),
            vec![x, z]
        );

        // Removing X swaps Z into X's old slot.
        registry.remove_builder(curator, x).unwrap();
        assert_eq!(registry.list_builders(curator), vec![z, y]);
    }

    #[test]
    fn query_with_empty_mask_equals_listing() {
        let (mut registry, _, curator) = setup();
        for value in [true, false, true] {
            registry
                .set_builder(curator, BuilderId::new(), active(value))
                .unwrap();
        }

        let listed = registry.list_builders(curator);
        let queried = registry.query_builders(curator, &active(true), FlagSet::empty());
        assert_eq!(listed, queried);
    }

    #[test]
    fn query_with_full_mask_is_exact_equality() {
        let (mut registry, _, curator) = setup();
        let exact = BuilderId::new();
        let off_by_one = BuilderId::new();
        let wanted = active(true).with(BuilderFlag::BlobSupport, true);

        registry.set_builder(curator, exact, wanted).unwrap();
        registry
            .set_builder(curator, off_by_one, wanted.with(BuilderFlag::OfacCompliant, true))
            .unwrap();

        assert_eq!(
            registry.query_builders(curator, &wanted, FlagSet::all()),
            vec![exact]
        );
    }

    #[test]
    fn upsert_overwrites_without_moving_position() {
        let (mut registry, _, curator) = setup();
        let a = BuilderId::new();
        let b = BuilderId::new();
        registry.set_builder(curator, a, active(true)).unwrap();
        registry.set_builder(curator, b, active(true)).unwrap();

        registry.set_builder(curator, a, active(false)).unwrap();

        assert_eq!(registry.list_builders(curator), vec![a, b]);
        assert_eq!(registry.get_builder(curator, a).unwrap(), active(false));
        assert_eq!(registry.builder_count(curator), 2);
    }

    #[test]
    fn unregistering_curator_leaves_builder_data_queryable() {
        let (mut registry, owner, curator) = setup();
        let builder = BuilderId::new();
        registry.set_builder(curator, builder, active(true)).unwrap();

        registry.unregister_curator(owner, curator).unwrap();

        assert!(!registry.is_curator(curator));
        assert_eq!(registry.list_builders(curator), vec![builder]);
        assert!(registry.is_builder_registered(curator, builder));
        assert_eq!(
            registry.query_builders(
                curator,
                &active(true),
                FlagSet::empty().with(BuilderFlag::Active)
            ),
            vec![builder]
        );

        // But the unregistered curator can no longer mutate its old data.
        assert!(matches!(
            registry.set_builder(curator, builder, active(false)),
            Err(RegistryError::Unauthorized { .. })
        ));
    }

    #[test]
    fn remove_missing_builder_is_not_found() {
        let (mut registry, _, curator) = setup();
        assert_eq!(
            registry.remove_builder(curator, BuilderId::new()),
            Err(RegistryError::NotFound("builder record"))
        );
    }

    #[test]
    fn transfer_ownership_moves_the_role() {
        let (mut registry, owner, _) = setup();
        let next = AccountId::new();

        registry.transfer_ownership(owner, next).unwrap();

        assert!(registry.is_owner(next));
        assert!(!registry.is_owner(owner));
        assert_eq!(registry.owner(), next);

        // New owner can register curators; old owner cannot.
        assert!(registry
            .register_curator(next, AccountId::new(), "m")
            .is_ok());
        assert!(registry
            .register_curator(owner, AccountId::new(), "m")
            .is_err());
    }

    #[test]
    fn reads_on_unknown_namespace_are_empty_not_errors() {
        let (registry, _, _) = setup();
        let nobody = AccountId::new();
        let builder = BuilderId::new();

        assert!(registry.list_builders(nobody).is_empty());
        assert!(!registry.is_builder_registered(nobody, builder));
        assert!(registry
            .query_builders(nobody, &BuilderFlags::new(), FlagSet::all())
            .is_empty());
        assert_eq!(registry.builder_count(nobody), 0);
        assert!(registry.get_builder(nobody, builder).is_err());
    }

    #[test]
    fn curator_metadata_lifecycle() {
        let (mut registry, owner, curator) = setup();
        assert_eq!(registry.curator_metadata(curator).unwrap().metadata, "meta");

        registry
            .update_curator_metadata(owner, curator, "meta-v2")
            .unwrap();
        assert_eq!(
            registry.curator_metadata(curator).unwrap().metadata,
            "meta-v2"
        );

        registry.unregister_curator(owner, curator).unwrap();
        assert!(registry.curator_metadata(curator).is_none());
    }

    #[test]
    fn failed_precondition_emits_no_event() {
        let (mut registry, owner, curator) = setup();
        let mut rx = registry.subscribe();

        let _ = registry.register_curator(owner, curator, "dup"); // AlreadyExists
        let _ = registry.remove_builder(curator, BuilderId::new()); // NotFound
        let _ = registry.transfer_ownership(curator, AccountId::new()); // Unauthorized

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn events_mirror_committed_mutations_in_order() {
        let (mut registry, owner, curator) = setup();
        let mut rx = registry.subscribe();
        let builder = BuilderId::new();
        let flags = active(true);

        registry.set_builder(curator, builder, flags).unwrap();
        registry.remove_builder(curator, builder).unwrap();
        registry.unregister_curator(owner, curator).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::BuilderSet {
                curator,
                builder,
                flags
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::BuilderRemoved { curator, builder }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::CuratorUnregistered { curator }
        );
        assert!(rx.try_recv().is_err());
    }
}
