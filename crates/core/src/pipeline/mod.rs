pub mod batch_extract_use_case;
pub mod run_logger;
