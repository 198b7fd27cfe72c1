//! The specialization engine: per-type compiled-artifact caching
//!
//! A [`Specializer`] owns two caches keyed by type identity: one for
//! compiled mappers, one for compiled proxy shapes. The defining contract is
//! compile-once, reuse-many: the first request for a type runs extraction
//! and compilation, every later request returns the published artifact, and
//! concurrent first requests agree on a single artifact because the
//! check-compile-store sequence runs under one lock.
//!
//! There is deliberately no process-wide global instance; construct a
//! specializer once at startup and hand it to whoever needs it. Published
//! artifacts are immutable and shareable without further synchronization.

use crate::descriptor::{Reflect, TypeDescriptor, TypeInfo};
use crate::error::{Error, Result};
use crate::mapper::{CompiledMapper, MapperCompiler};
use crate::proxy::{Proxy, ProxyCompiler, ProxyShape};
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::sync::{Arc, Mutex, MutexGuard};

type ArtifactMap = FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Statistics over the engine's caches
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Number of cached compiled mappers
    pub mappers: usize,
    /// Number of cached proxy shapes
    pub proxy_shapes: usize,
    /// Number of registered type names
    pub registered_types: usize,
}

/// Explicitly owned per-type cache of compiled artifacts
#[derive(Default)]
pub struct Specializer {
    mappers: Mutex<ArtifactMap>,
    proxy_shapes: Mutex<ArtifactMap>,
    types: Mutex<FxHashMap<&'static str, TypeInfo>>,
}

impl Specializer {
    /// Create an empty specializer
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<K, V>(mutex: &Mutex<FxHashMap<K, V>>) -> MutexGuard<'_, FxHashMap<K, V>> {
        // A panic while holding the lock leaves only published artifacts
        // behind, all of which stay valid; recover the map.
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the compiled mapper for `T`, compiling it on first request.
    ///
    /// At most one compilation runs per type per process; every caller,
    /// including concurrent first callers, observes the same artifact. A
    /// failed extraction surfaces to this caller and leaves the cache
    /// untouched, so a later call may retry.
    pub fn mapper_for<T: Reflect>(&self) -> Result<Arc<CompiledMapper<T>>> {
        let mut cache = Self::lock(&self.mappers);
        if let Some(artifact) = cache.get(&TypeId::of::<T>()) {
            tracing::debug!(type_name = T::TYPE_NAME, "mapper cache hit");
            return downcast_artifact(Arc::clone(artifact));
        }

        tracing::debug!(type_name = T::TYPE_NAME, "mapper cache miss");
        let descriptor = TypeDescriptor::<T>::extract()?;
        let mapper = Arc::new(MapperCompiler::compile(&descriptor));
        cache.insert(TypeId::of::<T>(), mapper.clone());
        Ok(mapper)
    }

    /// Get the compiled proxy shape for `T`, compiling it on first request.
    /// Same at-most-once and no-poisoning contract as [`Self::mapper_for`].
    pub fn proxy_shape_for<T: Reflect>(&self) -> Result<Arc<ProxyShape<T>>> {
        let mut cache = Self::lock(&self.proxy_shapes);
        if let Some(artifact) = cache.get(&TypeId::of::<T>()) {
            tracing::debug!(type_name = T::TYPE_NAME, "proxy shape cache hit");
            return downcast_artifact(Arc::clone(artifact));
        }

        tracing::debug!(type_name = T::TYPE_NAME, "proxy shape cache miss");
        let descriptor = TypeDescriptor::<T>::extract()?;
        let shape = Arc::new(ProxyCompiler::compile(&descriptor)?);
        cache.insert(TypeId::of::<T>(), shape.clone());
        Ok(shape)
    }

    /// Create a live proxy over a fresh instance of `T`, reusing the cached
    /// shape. One instance per request; the shape compiles at most once.
    pub fn proxy_for<T: Reflect>(&self) -> Result<Proxy<T>> {
        Ok(Proxy::from_shape(self.proxy_shape_for::<T>()?))
    }

    /// Register `T` for name-based resolution
    pub fn register<T: Reflect>(&self) {
        Self::lock(&self.types).insert(T::TYPE_NAME, TypeInfo::of::<T>());
    }

    /// Resolve a type name to its erased descriptor summary.
    ///
    /// Fails with `TypeNotResolvable` for names never registered.
    pub fn resolve(&self, name: &str) -> Result<TypeInfo> {
        Self::lock(&self.types)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TypeNotResolvable(name.to_string()))
    }

    /// Snapshot of cache occupancy
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            mappers: Self::lock(&self.mappers).len(),
            proxy_shapes: Self::lock(&self.proxy_shapes).len(),
            registered_types: Self::lock(&self.types).len(),
        }
    }
}

impl std::fmt::Debug for Specializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Specializer")
            .field("mappers", &stats.mappers)
            .field("proxy_shapes", &stats.proxy_shapes)
            .field("registered_types", &stats.registered_types)
            .finish()
    }
}

fn downcast_artifact<A: Send + Sync + 'static>(artifact: Arc<dyn Any + Send + Sync>) -> Result<Arc<A>> {
    artifact
        .downcast::<A>()
        .map_err(|_| Error::internal("cached artifact stored under the wrong type identity"))
}
