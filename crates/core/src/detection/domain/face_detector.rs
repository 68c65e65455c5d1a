use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Domain interface for face detection.
///
/// Implementations must not mutate the frame, may return an empty list,
/// and are responsible for clamping every returned box to the frame
/// bounds. The returned order is preserved as the extraction sequence.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
