pub mod config;
pub mod detection;
pub mod invoice;
pub mod log;
