//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The Account entity, its identifier and owning user
//! - `limits`: Configurable rule thresholds
//! - `operation`: Withdraw and transfer operations
//! - `error`: Error types for the engine

pub mod account;
pub mod error;
pub mod limits;
pub mod operation;

pub use account::{Account, AccountId, User};
pub use error::PaymentError;
pub use limits::{AccountLimits, LOW_FUNDS_LIMIT, PAY_IN_LIMIT};
pub use operation::{Operation, OperationType};
