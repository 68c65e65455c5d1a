pub mod file_image_reader;
pub mod file_image_writer;
