pub mod error;
pub mod parse;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "planning")]
pub mod planning;

#[cfg(feature = "readiness")]
pub mod readiness;

#[cfg(feature = "credit_building")]
pub mod credit_building;

#[cfg(feature = "credit_health")]
pub mod credit_health;

pub use error::CreditAnchorError;
pub use types::*;

/// Standard result type for all credit-anchor operations
pub type CreditAnchorResult<T> = Result<T, CreditAnchorError>;
