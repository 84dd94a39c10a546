//! Transfer money use case
//!
//! Moves an amount from one account to another. Both legs are validated
//! before either account is mutated, and both accounts are persisted in a
//! single `update_all` call.

use crate::core::traits::{AccountRepository, NotificationService};
use crate::types::{AccountId, PaymentError};
use rust_decimal::Decimal;

/// Two-account transfer
pub struct TransferMoney<R, N> {
    repository: R,
    notifier: N,
}

impl<R: AccountRepository, N: NotificationService> TransferMoney<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        TransferMoney {
            repository,
            notifier,
        }
    }

    /// Transfer `amount` from `from_account_id` to `to_account_id`
    ///
    /// Sequence: load both, check the withdrawal leg, check the pay-in leg,
    /// apply both, persist both. A failing check leaves both accounts untouched,
    /// though a low-funds notice fired by the first check is not recalled when
    /// the second check fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source and destination are the same account. This is checked before
    ///   any load, so it takes precedence over `AccountNotFound`
    /// - Either account does not exist
    /// - The source has insufficient funds or the amount is not positive
    /// - The destination would exceed its pay-in limit
    /// - A notice cannot be delivered
    /// - The repository refuses the write
    pub fn execute(
        &self,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
    ) -> Result<(), PaymentError> {
        if from_account_id == to_account_id {
            return Err(PaymentError::same_account_transfer(from_account_id));
        }

        let mut from = self.repository.get_account_by_id(from_account_id)?;
        let mut to = self.repository.get_account_by_id(to_account_id)?;

        from.check_withdrawal(amount, &self.notifier)?;
        to.check_pay_in(amount, &self.notifier)?;

        from.apply_withdrawal(amount);
        to.apply_pay_in(amount);

        self.repository.update_all(&[&from, &to])?;

        tracing::debug!(
            from = %from_account_id,
            to = %to_account_id,
            %amount,
            "transfer completed"
        );
        Ok(())
    }
}
