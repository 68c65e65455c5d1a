use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("box {x},{y} {width}x{height} exceeds image bounds {image_width}x{image_height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// Extracts the boxed region of a frame as a new frame.
///
/// The box must already lie inside the frame; an out-of-range box is a
/// detector defect and surfaces as an error rather than being silently
/// clamped.
pub fn crop_face(frame: &Frame, face: &FaceBox) -> Result<Frame, CropError> {
    if !face.fits_within(frame.width(), frame.height()) {
        return Err(CropError::OutOfBounds {
            x: face.x,
            y: face.y,
            width: face.width,
            height: face.height,
            image_width: frame.width(),
            image_height: frame.height(),
        });
    }

    let channels = frame.channels() as usize;
    let src = frame.as_ndarray();
    let mut data = Vec::with_capacity(face.width as usize * face.height as usize * channels);

    for row in face.y..face.y + face.height {
        for col in face.x..face.x + face.width {
            for c in 0..channels {
                data.push(src[[row as usize, col as usize, c]]);
            }
        }
    }

    Ok(Frame::new(data, face.width, face.height, frame.channels()))
}

/// Deterministic artifact filename: `{base}_{seq}_{x}_{y}_{w}_{h}.jpg`.
///
/// `sequence_index` is 1-based in detector order.
pub fn artifact_filename(base_name: &str, sequence_index: usize, face: &FaceBox) -> String {
    format!(
        "{base_name}_{sequence_index}_{}_{}_{}_{}.jpg",
        face.x, face.y, face.width, face.height
    )
}
