//! Account rules
//!
//! Withdrawals and pay-ins are split into a check phase and an apply phase.
//! A check validates the movement against the account's limits, fires any
//! warning notice, and never mutates. An apply mutates unconditionally and
//! must only follow a successful check for the same amount.
//!
//! Splitting the phases lets a transfer validate both legs before touching
//! either account.

use crate::core::traits::NotificationService;
use crate::types::{Account, PaymentError};
use rust_decimal::Decimal;

impl Account {
    /// Validate a withdrawal of `amount`
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `InsufficientFunds` if the balance would go below zero
    /// - `ArithmeticOverflow` if the balance or withdrawn total cannot be represented
    /// - Whatever the notifier returns if the low-funds notice fails
    ///
    /// When the balance left after the withdrawal is below the low-funds limit
    /// the user is notified once, and the check still succeeds.
    pub fn check_withdrawal(
        &self,
        amount: Decimal,
        notifier: &dyn NotificationService,
    ) -> Result<(), PaymentError> {
        self.ensure_positive(amount)?;

        let projected_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| PaymentError::arithmetic_overflow("withdrawal", self.id()))?;
        self.withdrawn
            .checked_sub(amount)
            .ok_or_else(|| PaymentError::arithmetic_overflow("withdrawal", self.id()))?;

        if projected_balance < Decimal::ZERO {
            return Err(PaymentError::insufficient_funds(
                self.id(),
                self.balance,
                amount,
            ));
        }

        if projected_balance < self.limits.low_funds_limit {
            tracing::debug!(account = %self.id(), %projected_balance, "funds low after withdrawal");
            notifier.notify_funds_low(&self.user.email)?;
        }

        Ok(())
    }

    /// Debit `amount` from the balance and record it as withdrawn
    ///
    /// Both sums were verified by `check_withdrawal`.
    pub fn apply_withdrawal(&mut self, amount: Decimal) {
        self.balance -= amount;
        self.withdrawn -= amount;
    }

    /// Validate a pay-in of `amount`
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `PayInLimitExceeded` if the cumulative paid-in total would pass the limit
    /// - `ArithmeticOverflow` if the balance or paid-in total cannot be represented
    /// - Whatever the notifier returns if the approaching-limit notice fails
    ///
    /// When less than the low-funds limit of headroom would remain under the
    /// pay-in limit the user is notified once, and the check still succeeds.
    pub fn check_pay_in(
        &self,
        amount: Decimal,
        notifier: &dyn NotificationService,
    ) -> Result<(), PaymentError> {
        self.ensure_positive(amount)?;

        let projected_paid_in = self
            .paid_in
            .checked_add(amount)
            .ok_or_else(|| PaymentError::arithmetic_overflow("pay-in", self.id()))?;
        self.balance
            .checked_add(amount)
            .ok_or_else(|| PaymentError::arithmetic_overflow("pay-in", self.id()))?;

        if projected_paid_in > self.limits.pay_in_limit {
            return Err(PaymentError::pay_in_limit_exceeded(
                self.id(),
                self.paid_in,
                amount,
                self.limits.pay_in_limit,
            ));
        }

        if self.limits.pay_in_limit - projected_paid_in < self.limits.low_funds_limit {
            tracing::debug!(account = %self.id(), %projected_paid_in, "approaching pay-in limit");
            notifier.notify_approaching_pay_in_limit(&self.user.email)?;
        }

        Ok(())
    }

    /// Credit `amount` to the balance and record it as paid in
    ///
    /// Both sums were verified by `check_pay_in`.
    pub fn apply_pay_in(&mut self, amount: Decimal) {
        self.balance += amount;
        self.paid_in += amount;
    }

    /// Check then apply a withdrawal
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        notifier: &dyn NotificationService,
    ) -> Result<(), PaymentError> {
        self.check_withdrawal(amount, notifier)?;
        self.apply_withdrawal(amount);
        Ok(())
    }

    /// Check then apply a pay-in
    pub fn pay_in(
        &mut self,
        amount: Decimal,
        notifier: &dyn NotificationService,
    ) -> Result<(), PaymentError> {
        self.check_pay_in(amount, notifier)?;
        self.apply_pay_in(amount);
        Ok(())
    }

    fn ensure_positive(&self, amount: Decimal) -> Result<(), PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::invalid_amount(self.id(), amount));
        }
        Ok(())
    }
}
