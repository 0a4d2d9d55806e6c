pub mod amortization;
pub mod assumptions;
pub mod error;
pub mod projection;
pub mod rates;
pub mod types;

#[cfg(feature = "vehicle")]
pub mod vehicle;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "history")]
pub mod history;

pub use assumptions::ModelAssumptions;
pub use error::FinanceError;
pub use types::*;

/// Standard result type for all household-finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;
