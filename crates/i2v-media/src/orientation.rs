//! EXIF orientation handling.
//!
//! Only the pure rotations are corrected (EXIF values 3, 6 and 8). Mirrored
//! orientations and anything unreadable leave the pixels untouched.

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder};
use tracing::debug;

/// Counter-clockwise rotation to apply to the decoded pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Counter-clockwise angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }

    /// Rotate the image, expanding the canvas for quarter turns.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        // image's rotate90/rotate270 are clockwise
        match self {
            Rotation::None => image,
            Rotation::Ccw90 => image.rotate270(),
            Rotation::Ccw180 => image.rotate180(),
            Rotation::Ccw270 => image.rotate90(),
        }
    }
}

impl From<Orientation> for Rotation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Rotate180 => Rotation::Ccw180,
            Orientation::Rotate90 => Rotation::Ccw270,
            Orientation::Rotate270 => Rotation::Ccw90,
            _ => Rotation::None,
        }
    }
}

/// Read the rotation a decoder's metadata asks for.
///
/// Never fails: unreadable metadata means no rotation.
pub fn read_rotation<D: ImageDecoder>(decoder: &mut D) -> Rotation {
    match decoder.orientation() {
        Ok(orientation) => Rotation::from(orientation),
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable orientation metadata");
            Rotation::None
        }
    }
}
