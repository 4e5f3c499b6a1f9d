mod error;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;
#[cfg(test)]
mod test_repo;

pub use error::{OperationError, Result};
