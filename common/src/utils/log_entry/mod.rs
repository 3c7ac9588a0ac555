pub mod detection;
pub mod invoice;
pub mod io;
pub mod network;
pub mod system;
