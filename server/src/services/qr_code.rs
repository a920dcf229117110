//! QR rendering to PNG data URIs

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use serde_json::Value;

use crate::error::GatewayError;

pub const DEFAULT_SIZE: u32 = 256;
pub const MAX_SIZE: u32 = 512;
/// Quiet zone, in modules, on every side.
pub const MARGIN_MODULES: usize = 2;

/// Text actually encoded for a request payload.
pub fn payload_text(payload: &Value) -> Result<String, GatewayError> {
    match payload {
        Value::Null => Err(GatewayError::BadRequest("payload is required".to_string())),
        Value::String(text) => Ok(text.clone()),
        other => Ok(other.to_string()),
    }
}

pub fn effective_size(requested: Option<f64>) -> u32 {
    match requested {
        Some(size) if size.is_finite() && size >= 1.0 => (size.floor() as u32).min(MAX_SIZE),
        _ => DEFAULT_SIZE,
    }
}

/// Renders `text` as a `size` x `size` grayscale PNG.
///
/// Output depends only on the inputs, so equal requests yield equal bytes.
pub fn render_png(text: &str, size: u32) -> Result<Vec<u8>, GatewayError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
        .map_err(|err| GatewayError::Internal(format!("QR encoding failed: {err}")))?;
    let width = code.width();
    let colors = code.to_colors();
    let total = (width + 2 * MARGIN_MODULES) as u64;
    let size = size.clamp(1, MAX_SIZE);

    let module_at = |pixel: u32| -> Option<usize> {
        let module = (pixel as u64 * total / size as u64) as usize;
        module
            .checked_sub(MARGIN_MODULES)
            .filter(|module| *module < width)
    };

    let img = GrayImage::from_fn(size, size, |x, y| match (module_at(x), module_at(y)) {
        (Some(col), Some(row)) if colors[row * width + col] == Color::Dark => Luma([0u8]),
        _ => Luma([255u8]),
    });

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| GatewayError::Internal(format!("PNG encoding failed: {err}")))?;
    Ok(bytes)
}

pub fn data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
