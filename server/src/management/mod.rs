pub mod artifact_manager;
pub mod cleanup_manager;
pub mod detection_manager;
pub mod detection_parser;
pub mod detector_runner;
pub mod invoice_manager;
pub mod server;
pub mod utils;
pub mod weight_extractor;
