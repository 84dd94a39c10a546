//! Collaborator traits for account storage and notification delivery
//!
//! The use cases only talk to the outside world through these two traits.
//! Both take `&self` so that a single handle can be shared by several use
//! cases (and, for thread-safe implementations, by several threads).

use crate::types::{Account, AccountId, PaymentError};
use std::sync::Arc;

/// Trait for loading and persisting accounts
///
/// Implementations own the lifetime of the stored accounts. `get_account_by_id`
/// hands out a copy; changes only become visible once passed back to `update`.
pub trait AccountRepository {
    /// Load an account, failing with `AccountNotFound` if it does not exist
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError>;

    /// Persist an account previously loaded from this repository
    fn update(&self, account: &Account) -> Result<(), PaymentError>;

    /// Persist several accounts as one unit of work
    ///
    /// The default implementation persists the accounts one after another and
    /// stops at the first failure, so earlier writes stay in place. Storage that
    /// can do better should override it.
    fn update_all(&self, accounts: &[&Account]) -> Result<(), PaymentError> {
        for account in accounts {
            self.update(account)?;
        }
        Ok(())
    }
}

/// Trait for delivering account notices to users
///
/// Delivery failures are returned to the caller; the engine does not swallow them.
pub trait NotificationService {
    /// Tell the user their balance is running low
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError>;

    /// Tell the user they are close to the pay-in limit
    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError>;
}

impl<T: AccountRepository + ?Sized> AccountRepository for &T {
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError> {
        (**self).get_account_by_id(id)
    }

    fn update(&self, account: &Account) -> Result<(), PaymentError> {
        (**self).update(account)
    }

    fn update_all(&self, accounts: &[&Account]) -> Result<(), PaymentError> {
        (**self).update_all(accounts)
    }
}

impl<T: AccountRepository + ?Sized> AccountRepository for Arc<T> {
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError> {
        (**self).get_account_by_id(id)
    }

    fn update(&self, account: &Account) -> Result<(), PaymentError> {
        (**self).update(account)
    }

    fn update_all(&self, accounts: &[&Account]) -> Result<(), PaymentError> {
        (**self).update_all(accounts)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for &T {
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError> {
        (**self).notify_funds_low(email)
    }

    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError> {
        (**self).notify_approaching_pay_in_limit(email)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for Arc<T> {
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError> {
        (**self).notify_funds_low(email)
    }

    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError> {
        (**self).notify_approaching_pay_in_limit(email)
    }
}
