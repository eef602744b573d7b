//! Time-boxed memoization of the public catalog listing.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::domain::catalog::CatalogItem;

struct CachedCatalog {
    items: Vec<CatalogItem>,
    expires_at: Instant,
}

/// Holds the last public catalog listing together with its expiry instant.
///
/// A listing is reused until `ttl` has elapsed since it was loaded, then the
/// next read reloads it. Admin writes call [`CatalogCache::invalidate`] so
/// their changes show up immediately; writes made outside the server become
/// visible after at most `ttl`. A zero `ttl` disables caching.
pub struct CatalogCache {
    ttl: Duration,
    slot: Mutex<Option<CachedCatalog>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Return the cached listing, or run `load` and cache its result.
    ///
    /// Errors from `load` are returned as-is and nothing is cached.
    pub fn get_or_refresh<E, F>(&self, load: F) -> Result<Vec<CatalogItem>, E>
    where
        F: FnOnce() -> Result<Vec<CatalogItem>, E>,
    {
        self.get_or_refresh_at(Instant::now(), load)
    }

    fn get_or_refresh_at<E, F>(&self, now: Instant, load: F) -> Result<Vec<CatalogItem>, E>
    where
        F: FnOnce() -> Result<Vec<CatalogItem>, E>,
    {
        if self.ttl.is_zero() {
            return load();
        }

        // The lock is held across `load` so concurrent misses refresh once.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref().filter(|cached| now < cached.expires_at) {
            return Ok(cached.items.clone());
        }

        let items = load()?;
        *slot = Some(CachedCatalog {
            items: items.clone(),
            expires_at: now + self.ttl,
        });
        Ok(items)
    }

    /// Drop the cached listing so the next read reloads it.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::DateTime;

    use crate::domain::types::{CatalogItemId, ItemName, LicenseStatus};

    fn item(id: &str) -> CatalogItem {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        CatalogItem {
            id: CatalogItemId::new(id).unwrap(),
            name: ItemName::new(id).unwrap(),
            description: None,
            image_url: None,
            source_url: None,
            tags: vec![],
            difficulty: None,
            print_time_hours: None,
            license_status: LicenseStatus::Clear,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn reuses_listing_within_ttl() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let loads = Cell::new(0);
        let start = Instant::now();
        let load = || -> Result<Vec<CatalogItem>, ()> {
            loads.set(loads.get() + 1);
            Ok(vec![item("a")])
        };

        cache.get_or_refresh_at(start, load).unwrap();
        cache
            .get_or_refresh_at(start + Duration::from_secs(59), load)
            .unwrap();
        assert_eq!(loads.get(), 1);

        cache
            .get_or_refresh_at(start + Duration::from_secs(60), load)
            .unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        cache
            .get_or_refresh(|| Ok::<_, ()>(vec![item("a")]))
            .unwrap();
        cache.invalidate();
        let items = cache
            .get_or_refresh(|| Ok::<_, ()>(vec![item("a"), item("b")]))
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert!(cache.get_or_refresh(|| Err::<Vec<CatalogItem>, _>("down")).is_err());
        let items = cache
            .get_or_refresh(|| Ok::<_, &str>(vec![item("a")]))
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn zero_ttl_always_loads() {
        let cache = CatalogCache::disabled();
        let loads = Cell::new(0);
        for _ in 0..3 {
            cache
                .get_or_refresh(|| {
                    loads.set(loads.get() + 1);
                    Ok::<_, ()>(vec![])
                })
                .unwrap();
        }
        assert_eq!(loads.get(), 3);
    }
}
