pub mod builder;
pub mod error;
pub mod parser;

pub use builder::parse;
pub use error::ParseError;
