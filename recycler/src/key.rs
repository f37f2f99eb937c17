#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KindMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KindMap<K, V> = BTreeMap<K, V>;

/// Bound for view kind tags used as recycle pool keys.
///
/// With `feature = "std"` this is `Hash + Eq`; without it, `Ord` (the pool falls back to a
/// `BTreeMap`).
#[cfg(feature = "std")]
pub trait PoolKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> PoolKey for K {}

#[cfg(not(feature = "std"))]
pub trait PoolKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> PoolKey for K {}
