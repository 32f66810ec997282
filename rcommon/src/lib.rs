//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use rcommon::{FixedSeedSource, SeedSource, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let seeds = FixedSeedSource::new(42);
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(seeds.next_seed(), 42);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use rcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifier newtype.
    //!
    //! ```rust
    //! use rcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //!
    //! let generated = SessionId::generate();
    //! assert!(!generated.as_str().is_empty());
    //! ```

    use std::fmt::{Display, Formatter};

    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Creates a fresh random identifier.
        pub fn generate() -> Self {
            Self(Uuid::new_v4().to_string())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod random {
    //! Injectable randomness for values drawn once at configuration time.
    //!
    //! ```rust
    //! use rcommon::{RandomSeedSource, SeedSource};
    //!
    //! let source = RandomSeedSource;
    //! let _seed: u32 = source.next_seed();
    //! ```

    use std::sync::atomic::{AtomicU32, Ordering};

    use uuid::Uuid;

    pub trait SeedSource: Send + Sync {
        fn next_seed(&self) -> u32;
    }

    /// Draws seeds from the operating system generator backing v4 UUIDs.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomSeedSource;

    impl SeedSource for RandomSeedSource {
        fn next_seed(&self) -> u32 {
            let (high, _) = Uuid::new_v4().as_u64_pair();
            (high >> 32) as u32
        }
    }

    /// Always returns the same seed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedSeedSource {
        seed: u32,
    }

    impl FixedSeedSource {
        pub fn new(seed: u32) -> Self {
            Self { seed }
        }
    }

    impl SeedSource for FixedSeedSource {
        fn next_seed(&self) -> u32 {
            self.seed
        }
    }

    /// Returns `start`, `start + 1`, ... and counts how many seeds were drawn.
    #[derive(Debug, Default)]
    pub struct SequentialSeedSource {
        next: AtomicU32,
        drawn: AtomicU32,
    }

    impl SequentialSeedSource {
        pub fn starting_at(start: u32) -> Self {
            Self {
                next: AtomicU32::new(start),
                drawn: AtomicU32::new(0),
            }
        }

        pub fn drawn(&self) -> u32 {
            self.drawn.load(Ordering::SeqCst)
        }
    }

    impl SeedSource for SequentialSeedSource {
        fn next_seed(&self) -> u32 {
            self.drawn.fetch_add(1, Ordering::SeqCst);
            self.next.fetch_add(1, Ordering::SeqCst)
        }
    }
}

pub mod registry {
    //! Generic registry map wrapper used by keyed lookups.
    //!
    //! ```rust
    //! use rcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! assert_eq!(registry.get("alpha"), Some(&1));
    //! assert!(registry.contains_key("alpha"));
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            self.items.insert(key, value)
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use context::SessionId;
pub use future::BoxFuture;
pub use random::{FixedSeedSource, RandomSeedSource, SeedSource, SequentialSeedSource};
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{
        FixedSeedSource, RandomSeedSource, Registry, SeedSource, SequentialSeedSource, SessionId,
    };

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(SessionId::from("session-1".to_string()), session);
    }

    #[test]
    fn generated_session_ids_are_unique() {
        let first = SessionId::generate();
        let second = SessionId::generate();

        assert_ne!(first, second);
    }

    #[test]
    fn fixed_seed_source_repeats_its_seed() {
        let source = FixedSeedSource::new(7);

        assert_eq!(source.next_seed(), 7);
        assert_eq!(source.next_seed(), 7);
    }

    #[test]
    fn sequential_seed_source_counts_draws() {
        let source = SequentialSeedSource::starting_at(10);

        assert_eq!(source.next_seed(), 10);
        assert_eq!(source.next_seed(), 11);
        assert_eq!(source.drawn(), 2);
    }

    #[test]
    fn random_seed_source_is_usable_as_trait_object() {
        let source: &dyn SeedSource = &RandomSeedSource;
        let _ = source.next_seed();
    }

    #[test]
    fn generic_registry_basic_lifecycle() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.insert("alpha".to_string(), 1_u32);
        assert_eq!(registry.get("alpha"), Some(&1));
        assert!(registry.contains_key("alpha"));
        assert_eq!(registry.len(), 1);

        let removed = registry.remove("alpha");
        assert_eq!(removed, Some(1));
        assert!(registry.is_empty());
    }
}
