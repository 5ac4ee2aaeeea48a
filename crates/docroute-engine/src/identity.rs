// SPDX-License-Identifier: MIT
//
// Printer identity resolution.
//
// Maps a document type (plus an optional category) onto the lookup key
// used against the live printer registry. Category-specific names take
// priority; the bare base token is the fallback.

use std::collections::HashMap;

use tracing::debug;

use docroute_core::types::DocumentType;

/// Build the registry filter key for a document type and category.
///
/// With a category the key is the concatenation of the base token and the
/// category ("label" + "Pharmacy" → "labelPharmacy").
pub fn filter_key(doc_type: DocumentType, category: Option<&str>) -> String {
    let base = doc_type.base_filter_token();
    match category {
        Some(cat) => format!("{base}{cat}"),
        None => base.to_string(),
    }
}

/// Resolve the printer name for a document type against the registry.
///
/// Tries the combined category key first, then the bare base token.
/// Returns `None` when the registry knows neither — downstream config
/// resolution then skips the name-match step entirely.
pub fn identify(
    registry: &HashMap<String, String>,
    doc_type: DocumentType,
    category: Option<&str>,
) -> Option<String> {
    let combined = filter_key(doc_type, category);
    let base = doc_type.base_filter_token();

    let name = registry
        .get(&combined)
        .or_else(|| registry.get(base))
        .cloned();

    debug!(key = %combined, fallback = base, found = name.is_some(), "printer identity lookup");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_category_uses_base_token() {
        let reg = registry(&[("pos", "EPSON TM-T88"), ("label", "ZD421")]);
        assert_eq!(
            identify(&reg, DocumentType::Bill, None).as_deref(),
            Some("EPSON TM-T88")
        );
        assert_eq!(
            identify(&reg, DocumentType::Label, None).as_deref(),
            Some("ZD421")
        );
    }

    #[test]
    fn category_key_takes_priority() {
        let reg = registry(&[("label", "ZD421"), ("labelPharmacy", "ZD421-PH")]);
        assert_eq!(
            identify(&reg, DocumentType::Label, Some("Pharmacy")).as_deref(),
            Some("ZD421-PH")
        );
    }

    #[test]
    fn missing_category_key_falls_back_to_base() {
        let reg = registry(&[("label", "ZD421")]);
        assert_eq!(
            identify(&reg, DocumentType::Label, Some("Pharmacy")).as_deref(),
            Some("ZD421")
        );
    }

    #[test]
    fn wristband_token_covers_remaining_types() {
        let reg = registry(&[("wristband", "HC100")]);
        assert_eq!(
            identify(&reg, DocumentType::Wristband, None).as_deref(),
            Some("HC100")
        );
        assert_eq!(
            identify(&reg, DocumentType::Prescription, None).as_deref(),
            Some("HC100")
        );
    }

    #[test]
    fn unknown_everything_yields_none() {
        let reg = registry(&[]);
        assert_eq!(identify(&reg, DocumentType::Bill, Some("Cafe")), None);
    }
}
