//! Cache of compiled endpoint routers keyed by type identity.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::endpoint::{CompiledEndpoint, EndpointCodec};
use crate::error::InvalidRouter;
use crate::routable::Routable;

/// Compiled endpoint routers, one per endpoint type.
///
/// Entries are immutable once inserted and live as long as the cache.
/// Failed compilations are not cached, so every request for an invalid
/// endpoint type reports the error.
///
/// # Thread Safety
///
/// Uses `RwLock` for interior mutability. Compilation runs outside the
/// lock; when two threads compile the same type at once, the first insert
/// wins and both receive it.
///
/// # Examples
///
/// ```
/// use endpoint_router::RouterCache;
///
/// let cache = RouterCache::new();
/// let codec = cache.codec::<Option<u32>>().unwrap();
/// assert_eq!(codec.write(&Some(9)), "/9");
/// assert!(cache.contains::<Option<u32>>());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RouterCache {
    compiled: RwLock<HashMap<TypeId, Arc<CompiledEndpoint>>>,
}

impl RouterCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache used by
    /// [`EndpointCodec::shared`] and [`Router::infer`](crate::Router::infer).
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<RouterCache> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns the codec for `E`, compiling it on first request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRouter` if `E` is not a valid endpoint type.
    pub fn codec<E: Routable>(&self) -> Result<EndpointCodec<E>, InvalidRouter> {
        self.get_or_compile::<E>().map(EndpointCodec::from_compiled)
    }

    fn get_or_compile<E: Routable>(&self) -> Result<Arc<CompiledEndpoint>, InvalidRouter> {
        let key = E::type_key().id();

        if let Some(compiled) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!(endpoint = compiled.name(), "router cache hit");
            return Ok(Arc::clone(compiled));
        }

        let compiled = Arc::new(CompiledEndpoint::compile::<E>()?);
        let mut entries = self
            .compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(compiled)))
    }

    /// Returns true if `E` has been compiled into this cache.
    #[must_use]
    pub fn contains<E: Routable>(&self) -> bool {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&E::type_key().id())
    }

    /// Returns the number of cached endpoint types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been compiled into this cache.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
