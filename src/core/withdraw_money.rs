//! Withdraw money use case
//!
//! Loads one account, validates and applies the withdrawal, and persists the
//! result. A rejected withdrawal is never persisted.

use crate::core::traits::{AccountRepository, NotificationService};
use crate::types::{AccountId, PaymentError};
use rust_decimal::Decimal;

/// Single-account withdrawal
pub struct WithdrawMoney<R, N> {
    repository: R,
    notifier: N,
}

impl<R: AccountRepository, N: NotificationService> WithdrawMoney<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        WithdrawMoney {
            repository,
            notifier,
        }
    }

    /// Withdraw `amount` from the account identified by `account_id`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The amount is not positive or exceeds the balance
    /// - The low-funds notice cannot be delivered
    /// - The repository refuses the write
    pub fn execute(&self, account_id: AccountId, amount: Decimal) -> Result<(), PaymentError> {
        let mut account = self.repository.get_account_by_id(account_id)?;

        account.withdraw(amount, &self.notifier)?;

        self.repository.update(&account)?;

        tracing::debug!(account = %account_id, %amount, balance = %account.balance, "withdrawal completed");
        Ok(())
    }
}
