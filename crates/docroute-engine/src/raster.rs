// SPDX-License-Identifier: MIT
//
// Raster (V1) pipeline staging and encoding.
//
// Stages the resolved HTML in an offscreen container, waits a fixed
// settle delay for layout and fonts, rasterizes through the host port,
// flattens onto white, and JPEG-encodes the result for transport.
// Ordering is the contract: stage → settle → rasterize → encode.

use std::io::Cursor;

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tokio::time::{sleep, Duration};
use tracing::{debug, instrument};

use docroute_core::error::{DocrouteError, Result};
use docroute_core::types::{DocumentOptions, RasterPayload};
use docroute_core::EngineConfig;

use crate::ports::{RasterImage, Rasterizer};

/// Reserved id of the offscreen render container. Concurrent prints
/// against the same host would collide on it; callers serialize attempts.
pub const STAGE_CONTAINER_ID: &str = "docroute-render-stage";

/// Offscreen container description handed to the [`Rasterizer`].
///
/// The fixed styling keeps the capture deterministic: white background,
/// black text, heavy font weight, and a negative stacking order so the
/// stage never visibly renders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStage {
    pub container_id: &'static str,
    pub html: String,
    /// CSS width, e.g. "800px". `None` lets the container size itself.
    pub width: Option<String>,
    pub background: &'static str,
    pub text_color: &'static str,
    pub font_weight: u16,
    pub z_index: i32,
    /// Force absolute positioning to suppress stray whitespace in some
    /// templates.
    pub position_absolute: bool,
}

impl RenderStage {
    /// Build the stage for a document's HTML and options.
    ///
    /// The width unit defaults to "px" when the options carry a bare
    /// number.
    pub fn new(html: String, options: &DocumentOptions, config: &EngineConfig) -> Self {
        let width = options.width.map(|w| {
            let unit = options.width_unit.as_deref().unwrap_or("px");
            format!("{w}{unit}")
        });

        Self {
            container_id: STAGE_CONTAINER_ID,
            html,
            width,
            background: "#ffffff",
            text_color: "#000000",
            font_weight: 900,
            z_index: -10,
            position_absolute: config.whitespace_fix,
        }
    }
}

/// Drive one staged document through settle, rasterization, and encoding.
#[instrument(skip_all, fields(width = ?stage.width))]
pub async fn rasterize_to_payload(
    rasterizer: &dyn Rasterizer,
    stage: &RenderStage,
    config: &EngineConfig,
) -> Result<RasterPayload> {
    // Fixed wall-clock settle so layout and fonts stabilize before capture.
    sleep(Duration::from_millis(config.settle_delay_ms)).await;

    let raster = rasterizer.rasterize(stage).await?;
    debug!(
        width = raster.width,
        height = raster.height,
        "raster capture complete"
    );

    let jpeg = encode_jpeg(&raster, config.jpeg_quality)?;
    Ok(RasterPayload {
        base64_image: base64::engine::general_purpose::STANDARD.encode(jpeg),
    })
}

/// Flatten RGBA pixels onto a white background and JPEG-encode them.
pub fn encode_jpeg(raster: &RasterImage, quality: u8) -> Result<Vec<u8>> {
    let expected = raster.width as usize * raster.height as usize * 4;
    if raster.rgba.len() != expected {
        return Err(DocrouteError::ImageEncode(format!(
            "pixel buffer is {} bytes, expected {expected} for {}x{}",
            raster.rgba.len(),
            raster.width,
            raster.height
        )));
    }

    let rgb = flatten_on_white(&raster.rgba);

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
        .map_err(|e| DocrouteError::ImageEncode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Alpha-composite each pixel over opaque white.
fn flatten_on_white(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as u32;
            [px[0], px[1], px[2]]
                .into_iter()
                .map(move |c| ((c as u32 * a + 255 * (255 - a)) / 255) as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docroute_core::types::FrameworkType;

    fn opaque_red(width: u32, height: u32) -> RasterImage {
        let rgba = [255u8, 0, 0, 255].repeat((width * height) as usize);
        RasterImage { width, height, rgba }
    }

    #[test]
    fn stage_width_defaults_to_px() {
        let options = DocumentOptions {
            framework_type: FrameworkType::V1,
            width: Some(800.0),
            ..DocumentOptions::default()
        };
        let stage = RenderStage::new("<p>hi</p>".into(), &options, &EngineConfig::default());
        assert_eq!(stage.width.as_deref(), Some("800px"));
    }

    #[test]
    fn stage_honors_explicit_unit_and_whitespace_fix() {
        let options = DocumentOptions {
            width: Some(100.0),
            width_unit: Some("vw".into()),
            ..DocumentOptions::default()
        };
        let config = EngineConfig {
            whitespace_fix: true,
            ..EngineConfig::default()
        };
        let stage = RenderStage::new(String::new(), &options, &config);
        assert_eq!(stage.width.as_deref(), Some("100vw"));
        assert!(stage.position_absolute);
        assert_eq!(stage.z_index, -10);
        assert_eq!(stage.background, "#ffffff");
    }

    #[test]
    fn transparent_pixels_flatten_to_white() {
        let rgb = flatten_on_white(&[0, 0, 0, 0]);
        assert_eq!(rgb, vec![255, 255, 255]);
    }

    #[test]
    fn half_alpha_blends_toward_white() {
        let rgb = flatten_on_white(&[0, 0, 0, 128]);
        // Black at ~50% alpha over white lands near mid-grey.
        assert!(rgb.iter().all(|&c| (126..=128).contains(&c)));
    }

    #[test]
    fn encode_produces_jpeg_magic() {
        let jpeg = encode_jpeg(&opaque_red(4, 4), 90).expect("encode");
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_rejects_short_buffer() {
        let bad = RasterImage {
            width: 4,
            height: 4,
            rgba: vec![0; 10],
        };
        assert!(encode_jpeg(&bad, 90).is_err());
    }
}
