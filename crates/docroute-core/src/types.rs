// SPDX-License-Identifier: MIT
//
// Core domain types for the docroute print router.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Document categories the router knows how to print.
///
/// The wire representation matches the backend enum (`BILL`, `LABEL`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Bill,
    Label,
    Wristband,
    Prescription,
}

impl DocumentType {
    /// Base token used to filter the printer registry.
    ///
    /// Bills go to POS receipt printers, labels to label printers, and
    /// everything else to wristband printers.
    pub fn base_filter_token(&self) -> &'static str {
        match self {
            Self::Bill => "pos",
            Self::Label => "label",
            _ => "wristband",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bill => "BILL",
            Self::Label => "LABEL",
            Self::Wristband => "WRISTBAND",
            Self::Prescription => "PRESCRIPTION",
        };
        write!(f, "{s}")
    }
}

/// Which print pipeline a document's template was authored for.
///
/// Absent on the wire means V1. Anything other than "v1"/"v2" routes
/// through neither pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameworkType {
    #[serde(rename = "v1")]
    V1,
    #[serde(rename = "v2")]
    V2,
    #[serde(other)]
    Unknown,
}

impl Default for FrameworkType {
    fn default() -> Self {
        Self::V1
    }
}

/// Per-document print options carried alongside the resolved template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOptions {
    #[serde(default)]
    pub framework_type: FrameworkType,
    /// Raster container width (V1 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Unit for `width` ("px" when absent).
    #[serde(
        default,
        rename = "viewportSizingTypeWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub width_unit: Option<String>,
    /// Printer category refining the registry lookup (V2 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Requested paper size, e.g. "80mm" (V2 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    /// Explicit rotation override, e.g. "90" (V2 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
}

/// A document resolved from the generator backend, ready to print.
///
/// Immutable for the duration of one print attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDocument {
    pub html: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub options: DocumentOptions,
}

/// Firmware version report from the POS print agent.
///
/// Transient — fetched per print attempt, never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterVersionInfo {
    pub current_version: String,
    pub latest_version: String,
    #[serde(default)]
    pub mandatory_version: bool,
}

impl PrinterVersionInfo {
    /// Whether the agent is behind the latest published firmware.
    pub fn update_available(&self) -> bool {
        compare_versions(&self.latest_version, &self.current_version) == Ordering::Greater
    }
}

/// Order two dotted version strings.
///
/// Segments are compared numerically when both parse, falling back to
/// string comparison otherwise. Missing trailing segments count as zero,
/// so "1.2" == "1.2.0".
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let seg_a: Vec<&str> = a.split('.').collect();
    let seg_b: Vec<&str> = b.split('.').collect();
    for i in 0..seg_a.len().max(seg_b.len()) {
        let sa = seg_a.get(i).copied().unwrap_or("0");
        let sb = seg_b.get(i).copied().unwrap_or("0");
        let ord = match (sa.trim().parse::<u64>(), sb.trim().parse::<u64>()) {
            (Ok(na), Ok(nb)) => na.cmp(&nb),
            _ => sa.cmp(sb),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// One entry of the printer configuration catalog.
///
/// Typed fields cover what the router actually branches on; anything else
/// the personalization service sends is preserved in `extra` and flows
/// unchanged into submitted jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_type: Option<DocumentType>,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub width: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PrinterConfig {
    /// The unsized template returned when no catalog entry matches.
    ///
    /// Printing never blocks on a missing config — it degrades to this.
    pub fn placeholder() -> Self {
        Self {
            height: String::new(),
            width: String::new(),
            ..Self::default()
        }
    }

    /// Parse raw catalog entries one at a time, dropping any that do not
    /// deserialize — the backend enum is open-ended, so an entry for a
    /// document type this build does not know must not take the rest of
    /// the catalog down with it.
    pub fn parse_catalog(entries: Vec<serde_json::Value>) -> Vec<Self> {
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

/// Output driver for structured print jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintDriver {
    /// ESC/POS receipt driver (bills).
    Epos,
    /// Zebra label driver (everything else).
    Zpl,
}

/// CSS-style overflow policy applied to the rendered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Visible,
    Hidden,
}

/// Payload submitted to the structured (V2) print endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPrintJob {
    pub html_string: String,
    pub preview: bool,
    pub driver: PrintDriver,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    pub height: String,
    pub width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload submitted to the raster (V1) print endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterPayload {
    /// JPEG image, base64-encoded.
    pub base64_image: String,
}
