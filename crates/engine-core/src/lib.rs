pub mod error;
pub mod executor;
pub mod join;
pub mod plan;
pub mod projection;

pub use error::QueryError;
pub use executor::QueryExecutor;
