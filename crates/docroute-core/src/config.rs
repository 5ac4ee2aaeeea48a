// SPDX-License-Identifier: MIT
//
// Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the print engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock wait between staging the raster container and
    /// rasterizing it, so layout and fonts can settle.
    pub settle_delay_ms: u64,
    /// JPEG quality for raster output (1-100).
    pub jpeg_quality: u8,
    /// Force absolute positioning on the raster container to suppress
    /// stray whitespace in some templates.
    pub whitespace_fix: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 200,
            jpeg_quality: 92,
            whitespace_fix: false,
        }
    }
}
