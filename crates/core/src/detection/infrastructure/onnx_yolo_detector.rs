/// YOLO face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference, and NMS post-processing.
/// Boxes are clamped to frame bounds before leaving the detector, so the
/// extraction layer can slice them without further checks.
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Fallback YOLO model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// YOLO face detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        // Try to read input size from model metadata (NCHW: [1, 3, H, W])
        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // shape is [N, C, H, W] — use H (they should be equal for square input)
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let fw = frame.width();
        let fh = frame.height();

        // 1. Preprocess: letterbox + normalize → NCHW float32
        let (input_tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // YOLO output shape is [1, num_features, num_detections] (transposed)
        // or [1, num_detections, num_features]. Handle both.
        let (num_dets, num_feats) = if shape.len() == 3 {
            if shape[1] < shape[2] {
                // [1, features, detections] → transpose
                (shape[2], shape[1])
            } else {
                (shape[1], shape[2])
            }
        } else {
            return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
        };

        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;
        let transposed = shape.len() == 3 && shape[1] < shape[2];

        // 3. Parse detections
        let mut raw_dets = Vec::new();
        for i in 0..num_dets {
            let row = if transposed {
                // Read column i from transposed layout
                (0..num_feats)
                    .map(|f| data[f * num_dets + i])
                    .collect::<Vec<f32>>()
            } else {
                data[i * num_feats..(i + 1) * num_feats].to_vec()
            };

            // row format: [cx, cy, w, h, conf, ...]
            if row.len() < 5 {
                continue;
            }
            let conf = row[4] as f64;
            if conf < self.confidence {
                continue;
            }

            let cx = row[0] as f64;
            let cy = row[1] as f64;
            let w = row[2] as f64;
            let h = row[3] as f64;

            // Convert from letterbox coords back to original frame coords
            let x1 = ((cx - w / 2.0) - pad_x as f64) / scale;
            let y1 = ((cy - h / 2.0) - pad_y as f64) / scale;
            let x2 = ((cx + w / 2.0) - pad_x as f64) / scale;
            let y2 = ((cy + h / 2.0) - pad_y as f64) / scale;

            raw_dets.push(RawDetection {
                x1,
                y1,
                x2,
                y2,
                confidence: conf,
            });
        }

        // 4. NMS, then clamp into integer pixel boxes
        let filtered = nms(&mut raw_dets, NMS_IOU_THRESH);
        Ok(clamped_boxes(&filtered, fw, fh))
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to `target_size` × `target_size`.
///
/// Returns `(NCHW float32 tensor, scale, pad_x, pad_y)`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Build padded image (filled with 114/255 gray, YOLO convention)
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize + copy into padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// Post-processing
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct RawDetection {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    confidence: f64,
}

/// Clamp detections to frame bounds as integer pixel boxes.
///
/// A detection lying entirely outside the frame (the letterbox padding
/// region can produce these) clamps to zero width or height and is
/// dropped rather than handed downstream as an uncroppable box.
fn clamped_boxes(dets: &[RawDetection], frame_width: u32, frame_height: u32) -> Vec<FaceBox> {
    dets.iter()
        .map(|d| clamp_to_frame(d, frame_width, frame_height))
        .filter(|b| b.area() > 0)
        .collect()
}

fn clamp_to_frame(det: &RawDetection, frame_width: u32, frame_height: u32) -> FaceBox {
    let x1 = det.x1.max(0.0).min(frame_width as f64) as u32;
    let y1 = det.y1.max(0.0).min(frame_height as f64) as u32;
    let x2 = det.x2.max(0.0).min(frame_width as f64) as u32;
    let y2 = det.y2.max(0.0).min(frame_height as f64) as u32;
    FaceBox::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
}

/// Greedy NMS: sort by confidence descending, suppress overlapping boxes.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(dets[i].clone());
        for j in (i + 1)..dets.len() {
            if suppressed[j] {
                continue;
            }
            let iou = bbox_iou(
                &[dets[i].x1, dets[i].y1, dets[i].x2, dets[i].y2],
                &[dets[j].x1, dets[j].y1, dets[j].x2, dets[j].y2],
            );
            if iou > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 frame → letterbox to 640x640
        // Scale = min(640/200, 640/100) = min(3.2, 6.4) = 3.2
        // new_w = 640, new_h = 320
        // pad_x = 0, pad_y = 160
        let data = vec![128u8; 200 * 100 * 3];
        let frame = Frame::new(data, 200, 100, 3);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 3.2).abs() < 0.01);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 160);
    }

    #[test]
    fn test_letterbox_square_frame() {
        let data = vec![128u8; 100 * 100 * 3];
        let frame = Frame::new(data, 100, 100, 3);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 6.4).abs() < 0.01);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 0);
    }

    #[test]
    fn test_letterbox_values_normalized() {
        // Use a wide frame so there's vertical padding
        let data = vec![255u8; 100 * 50 * 3];
        let frame = Frame::new(data, 100, 50, 3);
        let (tensor, _, pad_x, pad_y) = letterbox(&frame, 640);

        // Wide frame: scale = 640/100 = 6.4, new_w=640, new_h=320, pad_y=160
        assert_eq!(pad_x, 0);
        assert!(pad_y > 0);

        // Check a pixel in the image region is ~1.0
        let y = pad_y as usize + 1;
        let x = pad_x as usize + 1;
        assert!((tensor[[0, 0, y, x]] - 1.0).abs() < 0.01);

        // Check a pad pixel (top-left, outside image region) is ~114/255
        let pad_val = 114.0 / 255.0;
        assert!((tensor[[0, 0, 0, 0]] - pad_val).abs() < 0.01);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let mut dets = vec![
            RawDetection {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
                confidence: 0.9,
            },
            RawDetection {
                x1: 5.0,
                y1: 5.0,
                x2: 105.0,
                y2: 105.0,
                confidence: 0.8,
            },
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_non_overlapping() {
        let mut dets = vec![
            RawDetection {
                x1: 0.0,
                y1: 0.0,
                x2: 50.0,
                y2: 50.0,
                confidence: 0.9,
            },
            RawDetection {
                x1: 200.0,
                y1: 200.0,
                x2: 250.0,
                y2: 250.0,
                confidence: 0.8,
            },
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_nms_empty_input() {
        let mut dets: Vec<RawDetection> = Vec::new();
        let kept = nms(&mut dets, 0.3);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_clamp_to_frame_inside() {
        let det = RawDetection {
            x1: 10.0,
            y1: 20.0,
            x2: 60.0,
            y2: 100.0,
            confidence: 0.9,
        };
        assert_eq!(clamp_to_frame(&det, 200, 200), FaceBox::new(10, 20, 50, 80));
    }

    #[test]
    fn test_clamp_to_frame_negative_origin() {
        let det = RawDetection {
            x1: -15.0,
            y1: -5.0,
            x2: 40.0,
            y2: 30.0,
            confidence: 0.9,
        };
        let b = clamp_to_frame(&det, 200, 200);
        assert_eq!(b, FaceBox::new(0, 0, 40, 30));
        assert!(b.fits_within(200, 200));
    }

    #[test]
    fn test_clamp_to_frame_past_edges() {
        let det = RawDetection {
            x1: 150.0,
            y1: 150.0,
            x2: 250.0,
            y2: 250.0,
            confidence: 0.9,
        };
        let b = clamp_to_frame(&det, 200, 200);
        assert_eq!(b, FaceBox::new(150, 150, 50, 50));
        assert!(b.fits_within(200, 200));
    }

    #[test]
    fn test_clamped_boxes_drop_detections_outside_frame() {
        let dets = vec![
            RawDetection {
                x1: -50.0,
                y1: 10.0,
                x2: -5.0,
                y2: 40.0,
                confidence: 0.9,
            },
            RawDetection {
                x1: 10.0,
                y1: 10.0,
                x2: 60.0,
                y2: 60.0,
                confidence: 0.8,
            },
            RawDetection {
                x1: 210.0,
                y1: 210.0,
                x2: 260.0,
                y2: 260.0,
                confidence: 0.7,
            },
        ];
        // Boxes fully left of and fully past the frame clamp to zero area
        // and must not survive; the in-frame box does.
        let boxes = clamped_boxes(&dets, 200, 200);
        assert_eq!(boxes, vec![FaceBox::new(10, 10, 50, 50)]);
    }

    #[test]
    fn test_bbox_iou_no_overlap() {
        assert_relative_eq!(
            bbox_iou(&[0.0, 0.0, 10.0, 10.0], &[20.0, 20.0, 30.0, 30.0]),
            0.0
        );
    }

    #[test]
    fn test_bbox_iou_perfect() {
        let b = [0.0, 0.0, 10.0, 10.0];
        assert_relative_eq!(bbox_iou(&b, &b), 1.0);
    }

    #[test]
    fn test_bbox_iou_partial_overlap() {
        // a: [0,0]-[10,10], b: [5,5]-[15,15]
        // intersection 25, union 175
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [5.0, 5.0, 15.0, 15.0];
        assert_relative_eq!(bbox_iou(&a, &b), 25.0 / 175.0);
    }
}
