use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use faceharvest_core::detection::domain::face_detector::FaceDetector;
use faceharvest_core::detection::infrastructure::model_resolver;
use faceharvest_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_CONFIDENCE,
};
use faceharvest_core::imaging::infrastructure::file_image_reader::FileImageReader;
use faceharvest_core::imaging::infrastructure::file_image_writer::FileImageWriter;
use faceharvest_core::ingest::hasher::CollisionPolicy;
use faceharvest_core::pipeline::batch_extract_use_case::{
    BatchExtractUseCase, ErrorPolicy, RunDirs,
};
use faceharvest_core::pipeline::run_logger::{BenchmarkRunLogger, PlainRunLogger, RunLogger};
use faceharvest_core::shared::constants::{YOLO_MODEL_NAME, YOLO_MODEL_URL};

/// Bulk face extraction: hash-deduplicates an image directory, crops
/// every detected face, and sorts sources into processed / no-faces.
#[derive(Parser)]
#[command(name = "faceharvest")]
struct Cli {
    /// Path to an input directory or single image file.
    #[arg(short, long)]
    input: PathBuf,

    /// Destination for extracted face crops.
    #[arg(short, long, default_value = "Output")]
    output: PathBuf,

    /// Destination for source images with at least one detected face.
    #[arg(short, long, default_value = "Processed")]
    processed: PathBuf,

    /// Destination for source images with no detected face.
    #[arg(short, long, default_value = "No Faces")]
    nofaces: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Report per-stage timing statistics at the end of the run.
    #[arg(long)]
    benchmark: bool,

    /// Continue past per-item errors instead of aborting the batch.
    #[arg(long)]
    keep_going: bool,

    /// What to do when two inputs have identical content: overwrite, skip, or error.
    #[arg(long, default_value = "overwrite")]
    on_collision: String,
}

fn main() {
    // Informational output is part of the program's contract, so the
    // default filter is info rather than env_logger's error.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let dirs = RunDirs {
        output: cli.output,
        processed: cli.processed,
        no_faces: cli.nofaces,
    };
    // Destinations are created up front; the input directory never is.
    fs::create_dir_all(&dirs.output)?;
    fs::create_dir_all(&dirs.processed)?;
    fs::create_dir_all(&dirs.no_faces)?;

    let detector = build_detector(cli.confidence)?;
    let logger: Box<dyn RunLogger> = if cli.benchmark {
        Box::new(BenchmarkRunLogger::new())
    } else {
        Box::new(PlainRunLogger)
    };
    let error_policy = if cli.keep_going {
        ErrorPolicy::KeepGoing
    } else {
        ErrorPolicy::FailFast
    };

    let mut use_case = BatchExtractUseCase::new(
        Box::new(FileImageReader::new()),
        Box::new(FileImageWriter::new()),
        detector,
        logger,
        parse_collision_policy(&cli.on_collision),
        error_policy,
    );

    let report = use_case.execute(&cli.input, &dirs)?;
    log::info!(
        "Extracted {} faces from {} images ({} without faces, {} failed)",
        report.faces_extracted,
        report.with_faces,
        report.no_faces.len(),
        report.failures.len()
    );
    Ok(())
}

fn build_detector(confidence: f64) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    Ok(Box::new(OnnxYoloDetector::new(&model_path, confidence)?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input path not found: {}", cli.input.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    let valid_policies = ["overwrite", "skip", "error"];
    if !valid_policies.contains(&cli.on_collision.as_str()) {
        return Err(format!(
            "Collision policy must be one of: overwrite, skip, error, got '{}'",
            cli.on_collision
        )
        .into());
    }
    Ok(())
}

fn parse_collision_policy(policy: &str) -> CollisionPolicy {
    match policy {
        "skip" => CollisionPolicy::Skip,
        "error" => CollisionPolicy::Error,
        _ => CollisionPolicy::Overwrite,
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
