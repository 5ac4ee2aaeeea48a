// SPDX-License-Identifier: MIT
//
// Collaborator ports consumed by the print engine.
//
// The engine owns the branching logic and failure policy; everything that
// touches a network, a screen, or host-scoped storage sits behind one of
// these traits so it can be swapped for tests or a different host.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use docroute_core::error::Result;
use docroute_core::types::{
    DocumentType, PrinterConfig, PrinterVersionInfo, RasterPayload, ResolvedDocument,
    StructuredPrintJob,
};

/// Resolves a document id into renderable content via the generator backend.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// May fail or return a document with empty html; the orchestrator
    /// treats both as fatal to the current attempt.
    async fn resolve(
        &self,
        document_id: &str,
        api_context: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<ResolvedDocument>;
}

/// Live registry of printer names keyed by filter token
/// (e.g. "pos" → "EPSON TM-T88", "labelPharmacy" → "ZD421-PH").
#[async_trait]
pub trait PrinterRegistry: Send + Sync {
    async fn list_printers(&self) -> Result<HashMap<String, String>>;
}

/// Reports the POS print agent's firmware version.
#[async_trait]
pub trait PrinterVersionSource: Send + Sync {
    async fn current_version_info(&self) -> Result<PrinterVersionInfo>;
}

/// Fetches the full printer configuration catalog from the
/// personalization service.
#[async_trait]
pub trait ConfigCatalogSource: Send + Sync {
    async fn list_configs(&self) -> Result<Vec<PrinterConfig>>;
}

/// Delivers print jobs to the physical printers. Fire-and-observe:
/// outcomes are logged by the engine, never retried.
#[async_trait]
pub trait PrinterTransport: Send + Sync {
    async fn send_image(&self, payload: RasterPayload, doc_type: DocumentType) -> Result<()>;
    async fn send_structured(&self, job: StructuredPrintJob) -> Result<()>;
}

/// User-visible notification channel. Side-effect only — nothing the
/// engine does depends on these calls succeeding.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Host-scoped string key-value storage backing the catalog cache and the
/// persisted flags. The host decides the actual lifetime (browser
/// session/local storage in the original deployment).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Rasterizes staged HTML into raw RGBA pixels.
///
/// The engine owns staging and encoding; the actual layout/paint step is a
/// host capability (headless browser, webview, …).
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, stage: &crate::raster::RenderStage) -> Result<RasterImage>;
}

/// Raw pixel output of a [`Rasterizer`], RGBA, row-major.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// In-memory [`KeyValueStore`] — the default host stand-in and the test
/// double of choice.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("store lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().expect("store lock").remove(key);
    }
}
