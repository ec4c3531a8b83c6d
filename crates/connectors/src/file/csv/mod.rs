pub mod adapter;
pub mod error;
pub mod metadata;
pub mod settings;
pub mod source;
pub mod types;
