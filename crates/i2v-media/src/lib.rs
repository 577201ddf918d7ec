//! Input image preparation.
//!
//! This crate provides:
//! - EXIF orientation correction (fails open on bad metadata)
//! - PNG re-encoding and base64 wrapping for JSON request bodies

pub mod error;
pub mod orientation;
pub mod prepare;

pub use error::{MediaError, MediaResult};
pub use orientation::Rotation;
pub use prepare::{decode_png, encode_png, prepare};
