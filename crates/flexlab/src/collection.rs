//! The ordered collection of live flex items.
//!
//! [`FlexItemCollection`] owns one [`FlexItemAttributes`] per item and keeps
//! three views of them in lockstep: a slot map for stable identity, a vector
//! for position order, and an identity-to-index lookup table that is rebuilt
//! on every structural change. Anything that needs an item's current position
//! (activation callbacks, commit notifications) resolves it through the
//! lookup at the moment it runs, so a position captured before an earlier
//! removal can never leak into a later dispatch.
//!
//! The collection is also the save/restore boundary: [`serialize_all`]
//! snapshots every item as a [`FlexItemRecord`] in position order, and
//! [`restore_all`] rebuilds the whole collection from such a snapshot.
//!
//! [`serialize_all`]: FlexItemCollection::serialize_all
//! [`restore_all`]: FlexItemCollection::restore_all

use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap, new_key_type};

use flexlab_core::Signal;
use flexlab_core::logging::targets;

use crate::attrs::{FlexItemAttributes, HostKind};
use crate::edit::EditSession;
use crate::error::{Error, Result};
use crate::units::DisplayMetrics;

new_key_type! {
    /// Stable identity of an item within a [`FlexItemCollection`].
    ///
    /// Keys stay valid across other items' insertions and removals and are
    /// never reused for a different item.
    pub struct ItemKey;
}

/// Persisted form of one item: the host kind tag plus the attribute set.
///
/// An ordered sequence of records is the complete persisted state of a
/// collection; there is no additional framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexItemRecord {
    /// Stable host kind tag, see [`HostKind::kind_str`].
    pub kind: String,
    /// The item's attributes at snapshot time.
    pub attrs: FlexItemAttributes,
}

impl FlexItemRecord {
    /// Create a record for an item hosted by `kind`.
    pub fn new(kind: HostKind, attrs: FlexItemAttributes) -> Self {
        Self {
            kind: kind.kind_str().to_string(),
            attrs,
        }
    }
}

/// Signals emitted by a [`FlexItemCollection`].
///
/// All signals fire after the collection has reached its new state, except
/// `about_to_reset` which fires just before a restore tears it down.
pub struct CollectionSignals {
    /// A new item was appended at the given index.
    pub item_added: Signal<usize>,
    /// The item at the given index was removed.
    pub item_removed: Signal<usize>,
    /// The collection is about to be rebuilt from a snapshot.
    pub about_to_reset: Signal<()>,
    /// The collection was rebuilt from a snapshot.
    pub reset: Signal<()>,
    /// An item was activated (e.g. clicked): `(current index, attributes)`.
    pub item_activated: Signal<(usize, FlexItemAttributes)>,
    /// An edit session committed into an item: `(current index, attributes)`.
    /// Fires exactly once per successful commit.
    pub attributes_committed: Signal<(usize, FlexItemAttributes)>,
}

impl Default for CollectionSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionSignals {
    /// Creates a new set of collection signals.
    pub fn new() -> Self {
        Self {
            item_added: Signal::new(),
            item_removed: Signal::new(),
            about_to_reset: Signal::new(),
            reset: Signal::new(),
            item_activated: Signal::new(),
            attributes_committed: Signal::new(),
        }
    }
}

/// An ordered collection of flex items with stable identity.
///
/// Items are addressed two ways: by *position* (`get`, `key_at`) for
/// order-dependent operations, and by [`ItemKey`] for everything that can
/// outlive a structural change, namely activation and the commit/cancel of
/// an [`EditSession`]. The identity-to-index lookup is refreshed by every
/// mutation, so key-based operations always see the current position.
///
/// # Example
///
/// ```
/// use flexlab::{Field, FlexItemAttributes, FlexItemCollection, HostKind};
///
/// let mut items = FlexItemCollection::new(HostKind::FlexLayout);
/// let index = items.append(FlexItemAttributes::new());
/// let key = items.key_at(index).unwrap();
///
/// let mut session = items.open_editor(index).unwrap();
/// session.set_field(Field::FlexGrow, "2.5");
///
/// assert!(items.commit_session(key, &session).unwrap());
/// assert_eq!(items.get(index).unwrap().flex_grow, 2.5);
/// ```
pub struct FlexItemCollection {
    host: HostKind,
    metrics: DisplayMetrics,
    items: SlotMap<ItemKey, FlexItemAttributes>,
    order: Vec<ItemKey>,
    /// Identity -> current index, rebuilt on every structural change.
    indices: SecondaryMap<ItemKey, usize>,
    signals: CollectionSignals,
}

impl FlexItemCollection {
    /// Create an empty collection for the given host kind, with identity
    /// display metrics.
    pub fn new(host: HostKind) -> Self {
        Self::with_metrics(host, DisplayMetrics::default())
    }

    /// Create an empty collection with explicit display metrics.
    pub fn with_metrics(host: HostKind, metrics: DisplayMetrics) -> Self {
        Self {
            host,
            metrics,
            items: SlotMap::with_key(),
            order: Vec::new(),
            indices: SecondaryMap::new(),
            signals: CollectionSignals::new(),
        }
    }

    /// The kind of container hosting these items.
    #[inline]
    pub fn host(&self) -> HostKind {
        self.host
    }

    /// The display metrics edit sessions are opened with.
    #[inline]
    pub fn metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    /// The collection's signals.
    pub fn signals(&self) -> &CollectionSignals {
        &self.signals
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` if the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a new item with the given attributes.
    ///
    /// The item takes the next position; indices of existing items are
    /// untouched and a previously removed item's index is never resurrected
    /// for a different identity. Returns the assigned index.
    pub fn append(&mut self, attrs: FlexItemAttributes) -> usize {
        let index = self.order.len();
        let key = self.items.insert(attrs);
        self.order.push(key);
        self.indices.insert(key, index);

        tracing::debug!(target: targets::COLLECTION, index, "item appended");
        self.signals.item_added.emit(index);
        index
    }

    /// Remove the last item. No-op on an empty collection.
    ///
    /// Removing from the tail leaves every surviving item at its old
    /// position, so no lookup entries besides the removed one change.
    pub fn remove_last(&mut self) {
        let Some(key) = self.order.pop() else {
            return;
        };
        self.items.remove(key);
        self.indices.remove(key);

        let index = self.order.len();
        tracing::debug!(target: targets::COLLECTION, index, "item removed");
        self.signals.item_removed.emit(index);
    }

    /// The key of the item at `index`, if any.
    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.order.get(index).copied()
    }

    /// The current index of the item with the given key, if it still exists.
    pub fn index_of(&self, key: ItemKey) -> Option<usize> {
        self.indices.get(key).copied()
    }

    /// The attributes of the item at `index`.
    pub fn get(&self, index: usize) -> Result<&FlexItemAttributes> {
        let key = self
            .key_at(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.order.len()))?;
        Ok(&self.items[key])
    }

    /// Mutable access to the attributes of the item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut FlexItemAttributes> {
        let key = self
            .key_at(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.order.len()))?;
        Ok(&mut self.items[key])
    }

    /// Open an edit session for the item at `index`.
    ///
    /// The session starts from a copy of the item's current attributes and
    /// the collection's host kind and metrics; the live item stays untouched
    /// until the session is committed back via
    /// [`commit_session`](Self::commit_session).
    pub fn open_editor(&self, index: usize) -> Result<EditSession> {
        let attrs = self.get(index)?;
        Ok(EditSession::new(attrs, self.host, self.metrics))
    }

    /// Dispatch an activation (e.g. a click) for the item with `key`.
    ///
    /// The current index is resolved through the lookup table at call time
    /// and emitted with a copy of the item's attributes on `item_activated`.
    /// A key whose item has left the collection is a stale dispatch and
    /// fails with [`Error::StaleItem`].
    pub fn activate(&self, key: ItemKey) -> Result<usize> {
        let Some(index) = self.index_of(key) else {
            return Err(Error::StaleItem);
        };
        self.signals
            .item_activated
            .emit((index, self.items[key].clone()));
        Ok(index)
    }

    /// Commit an edit session into the item with `key`.
    ///
    /// Returns `Ok(true)` and emits `attributes_committed` exactly once on
    /// success. If the item was removed between session open and commit, the
    /// user's edit has no target any more: the commit is silently discarded
    /// and `Ok(false)` is returned. A session with invalid fields fails with
    /// [`Error::InvalidFields`] before anything is copied.
    pub fn commit_session(&mut self, key: ItemKey, session: &EditSession) -> Result<bool> {
        let Some(index) = self.index_of(key) else {
            tracing::debug!(
                target: targets::COLLECTION,
                "commit target no longer exists, discarding edit"
            );
            return Ok(false);
        };

        let target = &mut self.items[key];
        session.commit(target)?;
        let attrs = target.clone();

        tracing::debug!(target: targets::COLLECTION, index, "attributes committed");
        self.signals.attributes_committed.emit((index, attrs));
        Ok(true)
    }

    /// Cancel an edit session against the item with `key`.
    ///
    /// Restores the attributes captured at session open. Returns `false`
    /// (and does nothing) when the item has already been removed.
    pub fn cancel_session(&mut self, key: ItemKey, session: &EditSession) -> bool {
        if self.index_of(key).is_none() {
            tracing::debug!(
                target: targets::COLLECTION,
                "cancel target no longer exists, nothing to restore"
            );
            return false;
        }
        session.cancel(&mut self.items[key]);
        true
    }

    /// Snapshot every item as a record, in position order.
    pub fn serialize_all(&self) -> Vec<FlexItemRecord> {
        self.order
            .iter()
            .map(|&key| FlexItemRecord::new(self.host, self.items[key].clone()))
            .collect()
    }

    /// Rebuild the collection from a snapshot.
    ///
    /// Existing items are discarded and one item is created per record, in
    /// record order, each re-registered in the identity lookup with its new
    /// position. Records are validated up front: a record with an
    /// unrecognized kind tag fails with [`Error::UnknownItemKind`] and leaves
    /// the collection unchanged.
    pub fn restore_all(&mut self, records: Vec<FlexItemRecord>) -> Result<()> {
        for record in &records {
            HostKind::parse(&record.kind)?;
        }

        self.signals.about_to_reset.emit(());
        self.items.clear();
        self.order.clear();
        self.indices.clear();

        for record in records {
            let key = self.items.insert(record.attrs);
            let index = self.order.len();
            self.order.push(key);
            self.indices.insert(key, index);
        }

        tracing::debug!(
            target: targets::COLLECTION,
            count = self.order.len(),
            "collection restored from snapshot"
        );
        self.signals.reset.emit(());
        Ok(())
    }

    /// Iterate the items' attributes in position order.
    pub fn iter(&self) -> impl Iterator<Item = &FlexItemAttributes> {
        self.order.iter().map(|&key| &self.items[key])
    }
}

impl std::fmt::Debug for FlexItemCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexItemCollection")
            .field("host", &self.host)
            .field("len", &self.order.len())
            .finish()
    }
}
