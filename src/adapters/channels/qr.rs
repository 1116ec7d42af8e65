//! Scannable rendering of credential payloads.

use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

/// Smallest side of the rendered image, in pixels.
const MIN_SIDE_PX: u32 = 290;

/// SVG document encoding `payload` as a QR code, black on white with a
/// quiet zone.
pub fn credential_svg(payload: &str) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(MIN_SIDE_PX, MIN_SIDE_PX)
        .quiet_zone(true)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}
