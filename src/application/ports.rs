//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

/// Marker for types usable as identity keys.
///
/// An identity is an opaque token; nothing is assumed beyond equality and
/// hashing. Any hashable, cloneable, thread-safe type qualifies via the
/// blanket impl, including `String`, `u64`, and tuples thereof.
pub trait IdentityKey: Hash + Eq + Clone + Send + Sync + Debug {}

impl<K> IdentityKey for K where K: Hash + Eq + Clone + Send + Sync + Debug {}

/// Port for obtaining current time.
///
/// This abstraction allows the application layer to work with time
/// without depending on system clock implementation details.
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Port for concurrent per-identity state storage.
///
/// The closure-based accessors are the concurrency contract: an accessor
/// runs while the implementation holds that key's entry lock, so a
/// check-then-mutate sequence inside a single accessor is atomic per
/// identity. Infrastructure provides concrete implementations
/// (ShardedStorage).
pub trait Storage<K, V>: Send + Sync + Debug
where
    K: IdentityKey,
    V: Send + Sync,
{
    /// Access an entry with mutable access, creating it if necessary.
    ///
    /// # Arguments
    /// * `key` - The identity to look up
    /// * `factory` - Function to create a new value if the key is absent
    /// * `accessor` - Function that gets mutable access to the value
    ///
    /// # Returns
    /// The result from the accessor function
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R;

    /// Access an existing entry with mutable access, without creating one.
    ///
    /// Returns `None` when the key is absent. Used by read paths that must
    /// prune state but must not materialize entries for unseen identities.
    fn with_existing_mut<F, R>(&self, key: &K, accessor: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R;

    /// Remove the entry for `key` if the predicate holds for it.
    ///
    /// The predicate runs under the entry lock, so the decision to remove
    /// cannot race with a concurrent mutation of the same key. Returns
    /// whether an entry was removed.
    fn remove_if<F>(&self, key: &K, predicate: F) -> bool
    where
        F: FnOnce(&K, &V) -> bool;

    /// Get the number of entries in the storage.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Clear all entries from the storage.
    fn clear(&self);

    /// Remove entries for which the predicate returns false.
    fn retain<F>(&self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool;
}
