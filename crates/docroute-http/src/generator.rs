// SPDX-License-Identifier: MIT
//
// Document generator client.
//
// Resolves a document id into renderable HTML by POSTing the caller's
// api context to the generator backend. The caller-supplied headers are
// forwarded verbatim (tenant/module routing lives in them).

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use docroute_core::error::{DocrouteError, Result};
use docroute_core::types::ResolvedDocument;
use docroute_engine::ports::DocumentSource;

use crate::config::HttpConfig;

pub struct GeneratorClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl GeneratorClient {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn resolve_url(&self, document_id: &str) -> String {
        let path = format!(
            "document-generator-core/generate/pdf/{document_id}?lang=en&internationalization=false"
        );
        HttpConfig::join(&self.config.api_base_url, &path)
    }
}

#[async_trait]
impl DocumentSource for GeneratorClient {
    #[instrument(skip(self, api_context, headers))]
    async fn resolve(
        &self,
        document_id: &str,
        api_context: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<ResolvedDocument> {
        let url = self.resolve_url(document_id);
        debug!(%url, "resolving document");

        let mut request = self.http.post(&url).json(api_context);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DocrouteError::DocumentFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| DocrouteError::DocumentFetch(e.to_string()))?;

        response
            .json::<ResolvedDocument>()
            .await
            .map_err(|e| DocrouteError::DocumentFetch(format!("malformed response: {e}")))
    }
}
