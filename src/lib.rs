//! Money Movement Engine Library
//!
//! # Overview
//!
//! This library enforces the rules for moving money out of and between
//! accounts: a withdrawal never drives a balance below zero, an account can
//! never be paid more than its cumulative pay-in limit, and users are
//! notified when their funds run low or they approach that limit.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, AccountId, Operation, PaymentError)
//! - [`core`] - Business logic components:
//!   - [`core::rules`] - Withdrawal and pay-in checks and their mutations
//!   - [`core::withdraw_money`] / [`core::transfer_money`] - Use cases
//!   - [`core::traits`] - Account repository and notification seams
//!   - [`core::engine`] - Operation dispatch
//! - [`io`] - CSV readers and the account report writer
//! - [`strategy`] - Sync and async processing of an operations file
//! - [`cli`] - CLI arguments parsing
//!
//! # Rules
//!
//! - **Withdraw**: rejected if the balance would go negative; notifies the
//!   user if the remaining balance is below the low-funds limit
//! - **Pay in**: rejected if the cumulative paid-in total would exceed the
//!   pay-in limit; notifies the user if the remaining headroom is below the
//!   low-funds limit
//! - **Transfer**: a withdrawal from one account and a pay-in to another, both
//!   checked before either account changes

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    AccountRepository, InMemoryAccountRepository, LogNotificationService, NotificationService,
    OperationEngine, TransferMoney, WithdrawMoney,
};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, AccountLimits, Operation, OperationType, PaymentError, User,
    LOW_FUNDS_LIMIT, PAY_IN_LIMIT,
};
