/// A detected face bounding box in pixel coordinates.
///
/// Origin is the source image's top left; width and height are never
/// negative. Detectors are responsible for clamping boxes to image
/// bounds before handing them to the extraction layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the box lies entirely inside an image of the given size.
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.x as u64 + self.width as u64 <= image_width as u64
            && self.y as u64 + self.height as u64 <= image_height as u64
    }
}
