// SPDX-License-Identifier: MIT
//
// Printer configuration catalog cache.
//
// The catalog lives in a host-scoped key-value store under a fixed key
// with no TTL: once written it is served verbatim until the host clears
// it or a forced refresh overwrites it. A persisted settings flag can
// disable caching entirely. No locking — concurrent refreshes interleave
// and the last writer wins.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use docroute_core::types::PrinterConfig;

use crate::ports::{ConfigCatalogSource, KeyValueStore};

/// Store key holding the serialized catalog.
pub const CATALOG_KEY: &str = "printerConfigs";

/// Settings flag that bypasses the cache on every lookup.
pub const DISABLE_CACHE_KEY: &str = "disable-printer-config-cache";

pub struct CatalogCache {
    source: Arc<dyn ConfigCatalogSource>,
    store: Arc<dyn KeyValueStore>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn ConfigCatalogSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { source, store }
    }

    /// Fetch or serve the catalog.
    ///
    /// `force` skips the cache outright. Otherwise the cache is bypassed
    /// when the disable flag is set or when nothing (or an empty list) is
    /// cached. `None` means "no catalog available" — the resolver then
    /// degrades to its placeholder policy.
    pub async fn get_catalog(&self, force: bool) -> Option<Vec<PrinterConfig>> {
        if force || self.cache_disabled() {
            return self.refresh().await;
        }

        match self.cached() {
            Some(catalog) if !catalog.is_empty() => {
                debug!(entries = catalog.len(), "serving cached printer config catalog");
                Some(catalog)
            }
            _ => self.refresh().await,
        }
    }

    /// Whether the persisted disable-cache flag is set.
    fn cache_disabled(&self) -> bool {
        self.store
            .get(DISABLE_CACHE_KEY)
            .and_then(|v| serde_json::from_str::<bool>(&v).ok())
            .unwrap_or(false)
    }

    /// Read the cached catalog; unparseable or missing values count as absent.
    ///
    /// Entries are parsed individually: one entry for a document type this
    /// build does not know is skipped, not a reason to discard the cache.
    fn cached(&self) -> Option<Vec<PrinterConfig>> {
        let raw = self.store.get(CATALOG_KEY)?;
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "cached printer configs are unreadable — refetching");
                return None;
            }
        };

        let total = entries.len();
        let catalog = PrinterConfig::parse_catalog(entries);
        if catalog.len() < total {
            warn!(
                dropped = total - catalog.len(),
                "skipped unreadable cached printer config entries"
            );
        }
        Some(catalog)
    }

    /// Fetch from the backend and overwrite the cache on non-empty success.
    async fn refresh(&self) -> Option<Vec<PrinterConfig>> {
        match self.source.list_configs().await {
            Ok(catalog) if !catalog.is_empty() => {
                match serde_json::to_string(&catalog) {
                    Ok(serialized) => self.store.set(CATALOG_KEY, &serialized),
                    Err(e) => error!(error = %e, "failed to serialize printer configs for cache"),
                }
                info!(entries = catalog.len(), "printer config catalog refreshed");
                Some(catalog)
            }
            Ok(_) => {
                error!("printer config catalog fetch returned no entries");
                None
            }
            Err(e) => {
                error!(error = %e, "printer config catalog fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use docroute_core::error::{DocrouteError, Result};
    use docroute_core::types::DocumentType;

    use crate::ports::MemoryStore;

    struct CountingSource {
        calls: AtomicUsize,
        response: Result<Vec<PrinterConfig>>,
    }

    impl CountingSource {
        fn returning(catalog: Vec<PrinterConfig>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(catalog),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(DocrouteError::ConfigCatalog("boom".into())),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConfigCatalogSource for CountingSource {
        async fn list_configs(&self) -> Result<Vec<PrinterConfig>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(catalog) => Ok(catalog.clone()),
                Err(_) => Err(DocrouteError::ConfigCatalog("boom".into())),
            }
        }
    }

    fn sample_catalog() -> Vec<PrinterConfig> {
        vec![PrinterConfig {
            printer_name: Some("Default".into()),
            paper: Some("80mm".into()),
            doc_type: Some(DocumentType::Bill),
            height: "100".into(),
            width: "576".into(),
            ..PrinterConfig::default()
        }]
    }

    #[tokio::test]
    async fn second_lookup_serves_cache_without_fetch() {
        let source = Arc::new(CountingSource::returning(sample_catalog()));
        let cache = CatalogCache::new(source.clone(), Arc::new(MemoryStore::new()));

        assert!(cache.get_catalog(false).await.is_some());
        assert!(cache.get_catalog(false).await.is_some());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn disable_flag_forces_every_fetch() {
        let source = Arc::new(CountingSource::returning(sample_catalog()));
        let store = Arc::new(MemoryStore::new());
        store.set(DISABLE_CACHE_KEY, "true");
        let cache = CatalogCache::new(source.clone(), store);

        assert!(cache.get_catalog(false).await.is_some());
        assert!(cache.get_catalog(false).await.is_some());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_yields_no_catalog() {
        let source = Arc::new(CountingSource::failing());
        let store = Arc::new(MemoryStore::new());
        let cache = CatalogCache::new(source, store.clone());

        assert!(cache.get_catalog(false).await.is_none());
        // Nothing cached on failure.
        assert_eq!(store.get(CATALOG_KEY), None);
    }

    #[tokio::test]
    async fn empty_fetch_yields_no_catalog() {
        let source = Arc::new(CountingSource::returning(vec![]));
        let cache = CatalogCache::new(source, Arc::new(MemoryStore::new()));
        assert!(cache.get_catalog(false).await.is_none());
    }

    #[tokio::test]
    async fn unknown_cached_entry_does_not_poison_catalog() {
        let source = Arc::new(CountingSource::failing());
        let store = Arc::new(MemoryStore::new());
        // One entry of a type this build does not know, one valid entry.
        store.set(
            CATALOG_KEY,
            r#"[{"printerName":"Voucher-1","paper":"80mm","type":"VOUCHER","height":"50","width":"576"},
                {"printerName":"Default","paper":"80mm","type":"BILL","height":"100","width":"576"}]"#,
        );
        let cache = CatalogCache::new(source.clone(), store);

        let catalog = cache.get_catalog(false).await.expect("catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].printer_name.as_deref(), Some("Default"));
        // Served from cache — no fetch attempted.
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn explicit_force_overwrites_cache() {
        let source = Arc::new(CountingSource::returning(sample_catalog()));
        let store = Arc::new(MemoryStore::new());
        store.set(CATALOG_KEY, r#"[{"printerName":"Stale","height":"1","width":"1"}]"#);
        let cache = CatalogCache::new(source.clone(), store.clone());

        let catalog = cache.get_catalog(true).await.expect("catalog");
        assert_eq!(catalog[0].printer_name.as_deref(), Some("Default"));
        assert_eq!(source.call_count(), 1);
        assert!(store.get(CATALOG_KEY).expect("cached").contains("Default"));
    }
}
