pub mod error;
pub mod file;
pub mod memory;
pub mod source;
