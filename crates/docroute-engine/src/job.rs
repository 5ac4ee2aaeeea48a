// SPDX-License-Identifier: MIT
//
// Structured (V2) print job composition.
//
// Takes a resolved catalog entry by value — the cache hands out clones,
// so overlaying here never corrupts the cached catalog.

use docroute_core::types::{
    DocumentType, Overflow, PrintDriver, PrinterConfig, StructuredPrintJob,
};

/// Overlay a catalog entry into a submittable job.
///
/// The effective document type prefers the catalog value over the
/// requested one and selects the output driver: bills go through the
/// ESC/POS driver with vertical overflow visible (receipts grow), all
/// other types through ZPL with overflow clipped. Horizontal overflow is
/// always hidden. Rotation prefers the explicit angle override, falls
/// back to the catalog, and is pinned to "0" in preview mode.
pub fn compose(
    html: String,
    config: PrinterConfig,
    requested_type: DocumentType,
    angle: Option<&str>,
    preview: bool,
) -> StructuredPrintJob {
    let doc_type = config.doc_type.unwrap_or(requested_type);

    let (driver, overflow_y) = if doc_type == DocumentType::Bill {
        (PrintDriver::Epos, Overflow::Visible)
    } else {
        (PrintDriver::Zpl, Overflow::Hidden)
    };

    let rotation = if preview {
        Some("0".to_string())
    } else {
        angle.map(str::to_string).or(config.rotation)
    };

    StructuredPrintJob {
        html_string: html,
        preview,
        driver,
        overflow_x: Overflow::Hidden,
        overflow_y,
        doc_type,
        printer_name: config.printer_name,
        paper: config.paper,
        height: config.height,
        width: config.width,
        rotation,
        extra: config.extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_config() -> PrinterConfig {
        PrinterConfig {
            printer_name: Some("Default".into()),
            paper: Some("80mm".into()),
            doc_type: Some(DocumentType::Bill),
            height: "100".into(),
            width: "576".into(),
            rotation: Some("90".into()),
            ..PrinterConfig::default()
        }
    }

    #[test]
    fn bill_uses_epos_with_visible_vertical_overflow() {
        let job = compose("<p/>".into(), bill_config(), DocumentType::Bill, None, false);
        assert_eq!(job.driver, PrintDriver::Epos);
        assert_eq!(job.overflow_y, Overflow::Visible);
        assert_eq!(job.overflow_x, Overflow::Hidden);
    }

    #[test]
    fn non_bill_uses_zpl_with_clipped_overflow() {
        let config = PrinterConfig {
            doc_type: Some(DocumentType::Label),
            ..bill_config()
        };
        let job = compose("<p/>".into(), config, DocumentType::Label, None, false);
        assert_eq!(job.driver, PrintDriver::Zpl);
        assert_eq!(job.overflow_y, Overflow::Hidden);
        assert_eq!(job.overflow_x, Overflow::Hidden);
    }

    #[test]
    fn catalog_type_wins_over_requested() {
        // Placeholder configs have no type — the requested one applies.
        let job = compose(
            String::new(),
            PrinterConfig::placeholder(),
            DocumentType::Wristband,
            None,
            false,
        );
        assert_eq!(job.doc_type, DocumentType::Wristband);

        let job = compose(String::new(), bill_config(), DocumentType::Label, None, false);
        assert_eq!(job.doc_type, DocumentType::Bill);
    }

    #[test]
    fn rotation_prefers_angle_override() {
        let job = compose(String::new(), bill_config(), DocumentType::Bill, Some("180"), false);
        assert_eq!(job.rotation.as_deref(), Some("180"));

        let job = compose(String::new(), bill_config(), DocumentType::Bill, None, false);
        assert_eq!(job.rotation.as_deref(), Some("90"));
    }

    #[test]
    fn preview_pins_rotation_to_zero() {
        let job = compose(String::new(), bill_config(), DocumentType::Bill, Some("180"), true);
        assert_eq!(job.rotation.as_deref(), Some("0"));
        assert!(job.preview);
    }
}
