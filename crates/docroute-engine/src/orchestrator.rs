// SPDX-License-Identifier: MIT
//
// Top-level print orchestration.
//
// One `execute` call is one print attempt: resolve the document, branch
// on its declared framework version, and drive the chosen pipeline to
// completion. Failures never propagate to the caller — they surface
// through the notification channel and the log, per pipeline policy.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument, warn};

use docroute_core::types::{DocumentType, FrameworkType, ResolvedDocument};
use docroute_core::EngineConfig;

use crate::cache::CatalogCache;
use crate::gate::{self, GateDecision};
use crate::ports::{
    ConfigCatalogSource, DocumentSource, KeyValueStore, Notifier, PrinterRegistry,
    PrinterTransport, PrinterVersionSource, Rasterizer,
};
use crate::raster::{self, RenderStage};
use crate::{identity, job, resolver};

/// Persisted one-shot flag: the optional-update warning has been shown.
/// Set once, never cleared by this engine.
pub const WARNING_SENT_KEY: &str = "printer-update-warning-sent";

/// Everything the orchestrator talks to. All network and host concerns
/// live behind these ports.
pub struct Collaborators {
    pub documents: Arc<dyn DocumentSource>,
    pub registry: Arc<dyn PrinterRegistry>,
    pub versions: Arc<dyn PrinterVersionSource>,
    pub catalog: Arc<dyn ConfigCatalogSource>,
    pub transport: Arc<dyn PrinterTransport>,
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<dyn KeyValueStore>,
    pub rasterizer: Arc<dyn Rasterizer>,
}

/// One print request as handed in by the host application.
#[derive(Debug, Clone)]
pub struct PrintRequest {
    pub document_id: String,
    /// Opaque context forwarded to the document generator backend.
    pub api_context: Value,
    pub headers: HashMap<String, String>,
    pub preview: bool,
}

pub struct PrintOrchestrator {
    documents: Arc<dyn DocumentSource>,
    registry: Arc<dyn PrinterRegistry>,
    versions: Arc<dyn PrinterVersionSource>,
    transport: Arc<dyn PrinterTransport>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn KeyValueStore>,
    rasterizer: Arc<dyn Rasterizer>,
    cache: CatalogCache,
    config: EngineConfig,
}

impl PrintOrchestrator {
    pub fn new(collab: Collaborators, config: EngineConfig) -> Self {
        let cache = CatalogCache::new(collab.catalog, collab.store.clone());
        Self {
            documents: collab.documents,
            registry: collab.registry,
            versions: collab.versions,
            transport: collab.transport,
            notifier: collab.notifier,
            store: collab.store,
            rasterizer: collab.rasterizer,
            cache,
            config,
        }
    }

    /// Run one print attempt end to end. Never fails to the caller.
    #[instrument(skip_all, fields(document_id = %request.document_id, preview = request.preview))]
    pub async fn execute(&self, request: PrintRequest) {
        // Validation failures notify but do not abort: the backend may
        // still resolve the document, and historically did.
        if request.document_id.trim().is_empty() {
            warn!("print requested without a document id");
            self.notifier
                .error("Document id is missing — the print request may be incomplete.");
        }
        if request.headers.is_empty() {
            warn!("print requested without request headers");
            self.notifier
                .error("Request headers are missing — the print request may be incomplete.");
        }

        let document = match self
            .documents
            .resolve(&request.document_id, &request.api_context, &request.headers)
            .await
        {
            Ok(doc) if !doc.html.trim().is_empty() => doc,
            Ok(_) => {
                error!("document resolved empty — aborting print attempt");
                self.notifier.error("The document could not be generated.");
                return;
            }
            Err(e) => {
                error!(error = %e, "document resolution failed — aborting print attempt");
                self.notifier.error("The document could not be generated.");
                return;
            }
        };

        // Independent branches, deliberately not else-if: an unrecognized
        // framework version routes through neither pipeline.
        let framework = document.options.framework_type;
        if framework == FrameworkType::V1 {
            if let Err(e) = self.run_raster_pipeline(&document).await {
                // Logged only — no user notification on raster failure.
                error!(error = %e, "raster pipeline failed");
            }
        }
        if framework == FrameworkType::V2 {
            self.run_structured_pipeline(&document, request.preview).await;
        }
        if framework == FrameworkType::Unknown {
            warn!("document declares an unrecognized framework version — nothing printed");
        }
    }

    /// Pipeline V1: rasterize the document and send it as a JPEG.
    async fn run_raster_pipeline(&self, document: &ResolvedDocument) -> docroute_core::error::Result<()> {
        let stage = RenderStage::new(document.html.clone(), &document.options, &self.config);
        let payload =
            raster::rasterize_to_payload(self.rasterizer.as_ref(), &stage, &self.config).await?;

        match self
            .transport
            .send_image(payload, DocumentType::Bill)
            .await
        {
            Ok(()) => info!("raster print job sent"),
            Err(e) => error!(error = %e, "raster print job submission failed"),
        }
        Ok(())
    }

    /// Pipeline V2: gate on firmware version, resolve config, submit a
    /// structured job.
    async fn run_structured_pipeline(&self, document: &ResolvedDocument, preview: bool) {
        // Version check is fail-open: an unreachable version endpoint
        // must not stop printing.
        let version_info = match self.versions.current_version_info().await {
            Ok(info) => Some(info),
            Err(e) => {
                error!(error = %e, "printer version check failed — proceeding ungated");
                None
            }
        };

        let already_warned = self.store.get(WARNING_SENT_KEY).is_some();
        match gate::evaluate(version_info.as_ref(), already_warned) {
            GateDecision::Block => {
                self.notifier.error(
                    "A mandatory printer update is pending. Update the print agent before printing.",
                );
                return;
            }
            GateDecision::WarnOnce => {
                self.notifier
                    .warning("A printer update is available. Consider updating the print agent.");
                self.store.set(WARNING_SENT_KEY, "true");
            }
            GateDecision::Proceed => {}
        }

        // Registry lookup is also fail-open: without it the resolver just
        // skips the name-match step.
        let registry = match self.registry.list_printers().await {
            Ok(map) => map,
            Err(e) => {
                error!(error = %e, "printer registry lookup failed — resolving without a printer name");
                HashMap::new()
            }
        };
        let printer_name = identity::identify(
            &registry,
            document.doc_type,
            document.options.category.as_deref(),
        );

        let catalog = self.cache.get_catalog(false).await.unwrap_or_default();
        let config = resolver::resolve(
            &catalog,
            printer_name.as_deref(),
            document.options.paper.as_deref(),
            document.doc_type,
        );

        let job = job::compose(
            document.html.clone(),
            config,
            document.doc_type,
            document.options.angle.as_deref(),
            preview,
        );

        match self.transport.send_structured(job).await {
            Ok(()) => info!("structured print job sent"),
            Err(e) => error!(error = %e, "structured print job submission failed"),
        }
    }
}
