//! Error types for the money movement engine
//!
//! This module defines all error types that can occur while validating,
//! applying and persisting money movements, plus the I/O and parsing errors
//! raised by the command-line host.
//!
//! # Error Categories
//!
//! - **Rule Errors**: Insufficient funds, pay-in limit exceeded, invalid amount
//! - **Collaborator Errors**: Account not found, persistence failures, notification failures
//! - **Concurrency Errors**: Stale account versions rejected at persistence time
//! - **Host Errors**: File not found, I/O failures, malformed CSV

use super::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the engine
///
/// Each variant includes the context needed to explain the failure to the
/// caller of a use case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The repository has no account with this identifier
    #[error("Account {account} not found")]
    AccountNotFound { account: AccountId },

    /// An account with this identifier already exists in the repository
    #[error("Account {account} already exists")]
    DuplicateAccount { account: AccountId },

    /// Amount is zero or negative
    ///
    /// Every movement must be strictly positive.
    #[error("Invalid amount {amount} for account {account}")]
    InvalidAmount { account: AccountId, amount: Decimal },

    /// Withdrawal would drive the balance below zero
    ///
    /// The account state remains unchanged.
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    /// Pay-in would push the cumulative paid-in total over the limit
    ///
    /// The account state remains unchanged.
    #[error(
        "Pay-in limit exceeded for account {account}: paid in {paid_in}, requested {requested}, limit {limit}"
    )]
    PayInLimitExceeded {
        account: AccountId,
        paid_in: Decimal,
        requested: Decimal,
        limit: Decimal,
    },

    /// Transfer source and destination are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccountTransfer { account: AccountId },

    /// The repository failed to store an account
    ///
    /// Not retried. Mutations applied earlier in the same use case are not rolled back.
    #[error("Failed to persist account {account}: {message}")]
    PersistenceError { account: AccountId, message: String },

    /// The stored account changed since it was loaded
    #[error("Account {account} was modified concurrently: expected version {expected}, found {found}")]
    ConcurrentModification {
        account: AccountId,
        /// Version the caller loaded
        expected: u64,
        /// Version currently stored
        found: u64,
    },

    /// The notification collaborator failed to deliver a notice
    #[error("Failed to notify {email}: {message}")]
    NotificationFailed { email: String, message: String },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        account: AccountId,
    },

    /// A worker running a group of operations stopped before reporting its results
    #[error("Operation group task failed: {message}")]
    TaskFailed { message: String },
}

// Conversion from io::Error to PaymentError
impl From<std::io::Error> for PaymentError {
    fn from(error: std::io::Error) -> Self {
        PaymentError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to PaymentError
impl From<csv::Error> for PaymentError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PaymentError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl PaymentError {
    /// Create an IoError error
    pub fn io(message: impl Into<String>) -> Self {
        PaymentError::IoError {
            message: message.into(),
        }
    }

    /// Create a ParseError error
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        PaymentError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        PaymentError::AccountNotFound { account }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountId) -> Self {
        PaymentError::DuplicateAccount { account }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(account: AccountId, amount: Decimal) -> Self {
        PaymentError::InvalidAmount { account, amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        PaymentError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a PayInLimitExceeded error
    pub fn pay_in_limit_exceeded(
        account: AccountId,
        paid_in: Decimal,
        requested: Decimal,
        limit: Decimal,
    ) -> Self {
        PaymentError::PayInLimitExceeded {
            account,
            paid_in,
            requested,
            limit,
        }
    }

    /// Create a SameAccountTransfer error
    pub fn same_account_transfer(account: AccountId) -> Self {
        PaymentError::SameAccountTransfer { account }
    }

    /// Create a PersistenceError error
    pub fn persistence(account: AccountId, message: impl Into<String>) -> Self {
        PaymentError::PersistenceError {
            account,
            message: message.into(),
        }
    }

    /// Create a ConcurrentModification error
    pub fn concurrent_modification(account: AccountId, expected: u64, found: u64) -> Self {
        PaymentError::ConcurrentModification {
            account,
            expected,
            found,
        }
    }

    /// Create a NotificationFailed error
    pub fn notification_failed(email: &str, message: impl Into<String>) -> Self {
        PaymentError::NotificationFailed {
            email: email.to_string(),
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        PaymentError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a TaskFailed error
    pub fn task_failed(message: impl Into<String>) -> Self {
        PaymentError::TaskFailed {
            message: message.into(),
        }
    }

    /// Whether the error comes from a business rule rather than infrastructure
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidAmount { .. }
                | PaymentError::InsufficientFunds { .. }
                | PaymentError::PayInLimitExceeded { .. }
                | PaymentError::SameAccountTransfer { .. }
        )
    }
}
