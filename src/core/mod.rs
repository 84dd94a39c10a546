//! Core business logic module
//!
//! This module contains the money movement components:
//! - `rules` - Withdrawal and pay-in checks on the Account entity
//! - `traits` - Repository and notification collaborator seams
//! - `withdraw_money` / `transfer_money` - The two use cases
//! - `engine` - Dispatches parsed operations to the use cases
//! - `repository` - Single-threaded in-memory account repository
//! - `notification` - Log-based notifier used by the command-line host
//! - `async` - Concurrent repository and batch processor

pub mod engine;
pub mod notification;
pub mod r#async;
pub mod repository;
pub mod rules;
pub mod traits;
pub mod transfer_money;
pub mod withdraw_money;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::OperationEngine;
pub use notification::LogNotificationService;
pub use r#async::{BatchProcessor, ConcurrentAccountRepository};
pub use repository::InMemoryAccountRepository;
pub use traits::{AccountRepository, NotificationService};
pub use transfer_money::TransferMoney;
pub use withdraw_money::WithdrawMoney;
