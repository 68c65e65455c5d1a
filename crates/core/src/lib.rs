pub mod detection;
pub mod extraction;
pub mod imaging;
pub mod ingest;
pub mod pipeline;
pub mod shared;
