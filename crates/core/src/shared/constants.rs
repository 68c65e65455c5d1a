pub const YOLO_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/akanametov/yolov8-face/releases/download/v0.0.0/yolov8n-face.onnx";

/// Extensions accepted by the ingest scan (lowercase, without dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Files are hashed in fixed-size chunks so memory use stays bounded
/// regardless of file size.
pub const HASH_CHUNK_SIZE: usize = 8192;
