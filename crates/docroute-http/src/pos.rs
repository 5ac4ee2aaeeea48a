// SPDX-License-Identifier: MIT
//
// POS print agent client.
//
// One client covers the local agent's whole surface: printer registry,
// firmware version info, structured job submission, and raster image
// printing. Label images are routed to the separate ZPL agent; every
// other image goes to the agent's bill endpoint.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use docroute_core::error::{DocrouteError, Result};
use docroute_core::types::{
    DocumentType, PrinterVersionInfo, RasterPayload, StructuredPrintJob,
};
use docroute_engine::ports::{PrinterRegistry, PrinterTransport, PrinterVersionSource};

use crate::config::HttpConfig;

pub struct PosAgentClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl PosAgentClient {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn pos_url(&self, path: &str) -> String {
        HttpConfig::join(&self.config.pos_base_url, path)
    }

    /// Image endpoint for a document type: labels print through the ZPL
    /// agent, everything else through the POS bill endpoint.
    fn image_url(&self, doc_type: DocumentType) -> String {
        if doc_type == DocumentType::Label {
            HttpConfig::join(&self.config.zpl_base_url, "api/ZPLPrinter")
        } else {
            self.pos_url("pos/print/bill")
        }
    }
}

#[async_trait]
impl PrinterRegistry for PosAgentClient {
    #[instrument(skip(self))]
    async fn list_printers(&self) -> Result<HashMap<String, String>> {
        let url = self.pos_url("pos/printHtml/printerNames");
        debug!(%url, "listing printers");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DocrouteError::PrinterRegistry(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::PrinterRegistry(e.to_string()))?;

        response
            .json::<HashMap<String, String>>()
            .await
            .map_err(|e| DocrouteError::PrinterRegistry(format!("malformed registry: {e}")))
    }
}

#[async_trait]
impl PrinterVersionSource for PosAgentClient {
    #[instrument(skip(self))]
    async fn current_version_info(&self) -> Result<PrinterVersionInfo> {
        let url = self.pos_url("system/systemInfo");
        debug!(%url, "fetching print agent version info");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DocrouteError::VersionSource(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::VersionSource(e.to_string()))?;

        response
            .json::<PrinterVersionInfo>()
            .await
            .map_err(|e| DocrouteError::VersionSource(format!("malformed version info: {e}")))
    }
}

#[async_trait]
impl PrinterTransport for PosAgentClient {
    #[instrument(skip(self, payload), fields(doc_type = %doc_type))]
    async fn send_image(&self, payload: RasterPayload, doc_type: DocumentType) -> Result<()> {
        let url = self.image_url(doc_type);

        self.http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DocrouteError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::Transport(e.to_string()))?;

        info!(%url, "raster image accepted by print agent");
        Ok(())
    }

    #[instrument(skip(self, job), fields(doc_type = %job.doc_type, driver = ?job.driver))]
    async fn send_structured(&self, job: StructuredPrintJob) -> Result<()> {
        let url = self.pos_url("pos/printHtml/execute");

        self.http
            .post(&url)
            .json(&job)
            .send()
            .await
            .map_err(|e| DocrouteError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::Transport(e.to_string()))?;

        info!(%url, "structured job accepted by print agent");
        Ok(())
    }
}
