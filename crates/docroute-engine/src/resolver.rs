// SPDX-License-Identifier: MIT
//
// Printer configuration resolution.
//
// Selects the best-matching catalog entry for a (printer, paper, document
// type) tuple. Misconfiguration never blocks printing — the worst case is
// an unsized placeholder template.

use tracing::debug;

use docroute_core::types::{DocumentType, PrinterConfig};

/// Catalog entries named exactly this are the shared fallback.
const DEFAULT_ENTRY_NAME: &str = "Default";

/// Pick a configuration from a catalog snapshot.
///
/// Ordered, first match wins:
/// 1. entry whose name *contains* `printer_name` with exact paper/type;
/// 2. the literal "Default" entry with exact paper/type;
/// 3. [`PrinterConfig::placeholder`].
pub fn resolve(
    catalog: &[PrinterConfig],
    printer_name: Option<&str>,
    paper: Option<&str>,
    doc_type: DocumentType,
) -> PrinterConfig {
    if let Some(name) = printer_name {
        if let Some(found) = catalog.iter().find(|c| {
            c.printer_name
                .as_deref()
                .is_some_and(|n| n.contains(name))
                && paper_matches(c, paper)
                && c.doc_type == Some(doc_type)
        }) {
            debug!(printer = name, "matched catalog entry by printer name");
            return found.clone();
        }
    }

    if let Some(default) = catalog.iter().find(|c| {
        c.printer_name.as_deref() == Some(DEFAULT_ENTRY_NAME)
            && paper_matches(c, paper)
            && c.doc_type == Some(doc_type)
    }) {
        debug!("matched Default catalog entry");
        return default.clone();
    }

    debug!("no catalog entry matched — degrading to unsized placeholder");
    PrinterConfig::placeholder()
}

fn paper_matches(config: &PrinterConfig, paper: Option<&str>) -> bool {
    config.paper.as_deref() == paper
}
