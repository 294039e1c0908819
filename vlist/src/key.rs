#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for item identifiers: hashable with `std`, ordered without it.
#[cfg(feature = "std")]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}
