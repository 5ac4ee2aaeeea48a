// SPDX-License-Identifier: MIT
//
// Personalization service client — source of the printer config catalog.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use docroute_core::error::{DocrouteError, Result};
use docroute_core::types::PrinterConfig;
use docroute_engine::ports::ConfigCatalogSource;

use crate::config::HttpConfig;

pub struct PersonalizationClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl PersonalizationClient {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn catalog_url(&self) -> String {
        HttpConfig::join(
            &self.config.api_base_url,
            "csi-personalization-service/printer-config",
        )
    }
}

#[async_trait]
impl ConfigCatalogSource for PersonalizationClient {
    #[instrument(skip(self))]
    async fn list_configs(&self) -> Result<Vec<PrinterConfig>> {
        let url = self.catalog_url();
        debug!(%url, "fetching printer config catalog");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DocrouteError::ConfigCatalog(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::ConfigCatalog(e.to_string()))?;

        let entries = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| DocrouteError::ConfigCatalog(format!("malformed catalog: {e}")))?;

        // Entries are parsed individually so one unknown document type
        // does not take the whole catalog down.
        let total = entries.len();
        let catalog = PrinterConfig::parse_catalog(entries);
        if catalog.len() < total {
            warn!(
                dropped = total - catalog.len(),
                "skipped unreadable printer config entries"
            );
        }
        Ok(catalog)
    }
}
