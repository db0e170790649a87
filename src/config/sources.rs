//! Configuration sources layered by the loader.

pub mod environment;
pub mod global_file;
