mod constraint_operation_error;
pub mod moving_averages;
mod search_error;
pub mod sequence_generators;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use search_error::SearchError;
pub(crate) use trail::Trail;
