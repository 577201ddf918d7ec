//! Image preparation for inference requests.
//!
//! Decodes the uploaded bytes, applies the EXIF rotation, re-encodes the
//! result as PNG and wraps it in base64 so it can be embedded in a JSON body.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use i2v_models::{ImageEncoding, PreparedImage};

use crate::error::{MediaError, MediaResult};
use crate::orientation::read_rotation;

/// Prepare an uploaded image for submission.
///
/// Orientation metadata is best effort: if it is missing or unreadable the
/// image is used as decoded. Only a failure to decode the pixels themselves
/// is an error.
pub fn prepare(raw: &[u8]) -> MediaResult<PreparedImage> {
    let reader = ImageReader::new(Cursor::new(raw)).with_guessed_format()?;
    let format = reader.format();
    let mut decoder = reader.into_decoder()?;

    let rotation = read_rotation(&mut decoder);
    let image = rotation.apply(DynamicImage::from_decoder(decoder)?);

    let png = encode_png(&image)?;
    let prepared = PreparedImage::new(
        STANDARD.encode(&png),
        ImageEncoding::Base64Png,
        image.width(),
        image.height(),
    );

    debug!(
        ?format,
        encoding = prepared.encoding().as_str(),
        rotation_degrees = rotation.degrees(),
        width = prepared.width(),
        height = prepared.height(),
        png_bytes = png.len(),
        "Prepared input image"
    );

    Ok(prepared)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> MediaResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Recover the PNG bytes carried by a prepared image.
pub fn decode_png(prepared: &PreparedImage) -> MediaResult<Vec<u8>> {
    match prepared.encoding() {
        ImageEncoding::Base64Png => Ok(STANDARD.decode(prepared.data())?),
    }
}
