//! # Property Cache
//!
//! Computed properties keyed by shape identity. The cache is an ordinary
//! value: the caller builds it around a [`SectionCalculator`] and shares it by
//! reference or `Arc`.
//!
//! Lookups are single-flight. The map lock is only held to find or insert the
//! cell for a key; the calculation runs inside that cell, so concurrent
//! callers asking for the same shape wait for one computation instead of
//! starting their own. A failed calculation leaves the cell empty and the
//! next call tries again.
//!
//! ## Example
//!
//! ```rust
//! use section_core::cache::PropertyCache;
//! use section_core::calculations::SectionCalculator;
//! use section_core::shapes::Rectangle;
//!
//! let cache = PropertyCache::new(SectionCalculator::default());
//! let plate = Rectangle::new(0.1, 0.01);
//! let first = cache.property_of(&plate).unwrap();
//! let second = cache.property_of(&plate).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cache.computations(), 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::{Property, SectionCalculator};
use crate::errors::{SectionError, SectionResult};
use crate::mesher::{EarcutMesher, Mesher};
use crate::shapes::GeometryProvider;

/// A property and when it was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedProperty {
    pub property: Property,
    pub computed_at: DateTime<Utc>,
}

/// Name and computation time of a cached entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub name: String,
    pub computed_at: DateTime<Utc>,
}

type Slot = Arc<OnceCell<CachedProperty>>;

/// Single-flight cache of computed section properties
pub struct PropertyCache<M: Mesher = EarcutMesher> {
    calculator: SectionCalculator<M>,
    entries: Mutex<HashMap<String, Slot>>,
    computations: AtomicUsize,
}

impl<M: Mesher> PropertyCache<M> {
    pub fn new(calculator: SectionCalculator<M>) -> Self {
        PropertyCache {
            calculator,
            entries: Mutex::new(HashMap::new()),
            computations: AtomicUsize::new(0),
        }
    }

    pub fn calculator(&self) -> &SectionCalculator<M> {
        &self.calculator
    }

    // A panic inside a calculation never happens while the map is locked,
    // so a poisoned map is still consistent.
    fn map(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self, name: &str) -> Slot {
        let mut map = self.map();
        Arc::clone(map.entry(name.to_string()).or_default())
    }

    /// Properties of `shape`, computed at most once per identity.
    pub fn property_of<G: GeometryProvider + ?Sized>(&self, shape: &G) -> SectionResult<Property> {
        let name = shape.identity();
        let slot = self.slot(&name);

        if let Some(cached) = slot.get() {
            debug!(section = %name, "cache hit");
            return Ok(cached.property.clone());
        }

        let cached = slot.get_or_try_init(|| {
            self.computations.fetch_add(1, Ordering::SeqCst);
            let property = self.calculator.calculate(shape)?;
            info!(section = %name, "cached section properties");
            Ok::<_, SectionError>(CachedProperty {
                property,
                computed_at: Utc::now(),
            })
        })?;
        Ok(cached.property.clone())
    }

    /// Cached properties of `name`, without computing.
    pub fn get(&self, name: &str) -> Option<CachedProperty> {
        self.map().get(name).and_then(|slot| slot.get().cloned())
    }

    /// Number of computed entries
    pub fn len(&self) -> usize {
        self.map().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Calculations already running finish into their
    /// own detached cells.
    pub fn clear(&self) {
        self.map().clear();
    }

    /// Computed entries, ordered by name
    pub fn entries(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self
            .map()
            .iter()
            .filter_map(|(name, slot)| {
                slot.get().map(|cached| CacheEntry {
                    name: name.clone(),
                    computed_at: cached.computed_at,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// How many calculations the cache has started
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeCatalog;
    use crate::geometry::Mesh;
    use crate::settings::CalculationSettings;
    use crate::shapes::{Rectangle, Tube};
    use std::thread;

    /// Earcut mesher that counts its calls
    #[derive(Default)]
    struct CountingMesher {
        inner: EarcutMesher,
        calls: AtomicUsize,
    }

    impl Mesher for CountingMesher {
        fn triangulate(&self, geometry: &str) -> SectionResult<Mesh> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.triangulate(geometry)
        }
    }

    fn counting_cache() -> PropertyCache<CountingMesher> {
        PropertyCache::new(SectionCalculator::with_mesher(
            CountingMesher::default(),
            CalculationSettings::default(),
        ))
    }

    #[test]
    fn test_second_lookup_is_a_hit() {
        let cache = counting_cache();
        let tube = Tube::new(0.1, 0.005);
        let first = cache.property_of(&tube).unwrap();
        let calls = cache.calculator().mesher().calls.load(Ordering::SeqCst);
        assert_eq!(calls, first.mesh.iterations);

        let second = cache.property_of(&tube).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.calculator().mesher().calls.load(Ordering::SeqCst), calls);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&tube.identity()).unwrap().property, first);
    }

    #[test]
    fn test_concurrent_lookups_compute_once() {
        let cache = counting_cache();
        let section = ShapeCatalog::standard().resolve("20B1-ASCM").unwrap();

        let results: Vec<Property> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| cache.property_of(&section))).collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });

        assert_eq!(cache.computations(), 1);
        let calls = cache.calculator().mesher().calls.load(Ordering::SeqCst);
        assert_eq!(calls, results[0].mesh.iterations);
        assert!(results.iter().all(|p| *p == results[0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache = PropertyCache::new(SectionCalculator::default());
        let bad = Rectangle::new(-0.1, 0.01);
        assert!(cache.property_of(&bad).is_err());
        assert!(cache.property_of(&bad).is_err());
        assert_eq!(cache.computations(), 2);
        assert!(cache.is_empty());
        assert!(cache.entries().is_empty());
    }

    #[test]
    fn test_entries_and_clear() {
        let cache = PropertyCache::new(SectionCalculator::default());
        cache.property_of(&Rectangle::new(0.2, 0.01)).unwrap();
        cache.property_of(&Rectangle::new(0.1, 0.01)).unwrap();

        let names: Vec<String> = cache.entries().into_iter().map(|e| e.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&names[0]).is_none());
    }
}
