//! Optimized collection types for azui.
//!
//! Re-exports AHash-backed hash collections. Behavior tables and per-target
//! event state are keyed by small integer ids, where AHash outperforms SipHash.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;
