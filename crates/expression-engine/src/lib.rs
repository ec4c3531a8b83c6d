pub mod condition;
pub mod error;

pub use condition::{Comparator, Condition, Filter, evaluate};
pub use error::{ExpressionError, Result};
