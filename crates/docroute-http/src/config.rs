// SPDX-License-Identifier: MIT
//
// Endpoint configuration for the HTTP clients.

use serde::{Deserialize, Serialize};

/// Base URLs for the three backends docroute talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Document generator + personalization API gateway.
    pub api_base_url: String,
    /// Local POS print agent (registry, version info, structured jobs,
    /// bill images).
    pub pos_base_url: String,
    /// Local ZPL label print agent (label images).
    pub zpl_base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://dev.cloudsolutions.com.sa/csi-api".into(),
            pos_base_url: "http://localhost:8981".into(),
            zpl_base_url: "http://localhost:9000".into(),
        }
    }
}

impl HttpConfig {
    /// Join a path onto a base URL, tolerating a trailing slash on the base.
    pub(crate) fn join(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
