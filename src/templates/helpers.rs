use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Luma};
use minijinja::Value;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

use crate::core::RenderResult;

/// Pixels per QR module.
pub const QR_MODULE_SIZE: u32 = 4;
/// Light border around the symbol, in modules.
pub const QR_BORDER_MODULES: u32 = 1;

/// Encodes `data` as a black-on-white PNG QR code (error correction L,
/// smallest version that fits).
pub fn generate_qr_png(data: &str) -> RenderResult<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    let width = code.width();
    let img_size = (width as u32 + 2 * QR_BORDER_MODULES) * QR_MODULE_SIZE;

    let mut image = ImageBuffer::from_pixel(img_size, img_size, Luma([255u8]));

    for y in 0..width {
        for x in 0..width {
            if code[(x, y)] != Color::Dark {
                continue;
            }

            let left = (x as u32 + QR_BORDER_MODULES) * QR_MODULE_SIZE;
            let top = (y as u32 + QR_BORDER_MODULES) * QR_MODULE_SIZE;
            for dy in 0..QR_MODULE_SIZE {
                for dx in 0..QR_MODULE_SIZE {
                    image.put_pixel(left + dx, top + dy, Luma([0u8]));
                }
            }
        }
    }

    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)?;

    Ok(buffer)
}

/// Same as [`generate_qr_png`], base64 encoded without a data-URI prefix.
pub fn generate_qr_base64(data: &str) -> RenderResult<String> {
    let png = generate_qr_png(data)?;
    Ok(BASE64.encode(png))
}

/// `qr_code(text)` template function, for templates that embed extra codes.
pub fn qr_code_function(data: Value) -> Result<Value, minijinja::Error> {
    let text = data.as_str()
        .ok_or_else(|| minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "QR data must be a string"
        ))?;

    generate_qr_base64(text)
        .map(Value::from)
        .map_err(|e| minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            e.to_string()
        ))
}
