//! Test doubles for the collaborator traits

use crate::core::repository::InMemoryAccountRepository;
use crate::core::traits::{AccountRepository, NotificationService};
use crate::types::{Account, AccountId, PaymentError};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FundsLow(String),
    ApproachingPayInLimit(String),
}

/// Notifier that remembers every notice it was asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for RecordingNotifier {
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError> {
        self.sent
            .borrow_mut()
            .push(Notice::FundsLow(email.to_string()));
        Ok(())
    }

    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError> {
        self.sent
            .borrow_mut()
            .push(Notice::ApproachingPayInLimit(email.to_string()));
        Ok(())
    }
}

/// Notifier whose every delivery fails
#[derive(Debug, Clone, Copy)]
pub struct FailingNotifier;

impl NotificationService for FailingNotifier {
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError> {
        Err(PaymentError::notification_failed(email, "delivery refused"))
    }

    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError> {
        Err(PaymentError::notification_failed(email, "delivery refused"))
    }
}

/// Repository wrapper that records writes and can refuse them
///
/// `update_all` is left to the trait default so every persisted account goes
/// through `update` and shows up in `updated()`.
#[derive(Debug, Default)]
pub struct RecordingRepository {
    inner: InMemoryAccountRepository,
    updated: RefCell<Vec<AccountId>>,
    fail_on: Cell<Option<AccountId>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, account: Account) {
        self.inner
            .insert(account)
            .expect("seeded accounts must be unique");
    }

    pub fn stored(&self, id: AccountId) -> Account {
        self.inner
            .get_account_by_id(id)
            .expect("account must have been seeded")
    }

    /// Ids passed to `update`, in call order
    pub fn updated(&self) -> Vec<AccountId> {
        self.updated.borrow().clone()
    }

    /// Make every `update` of this account fail with a persistence error
    pub fn fail_updates_of(&self, id: AccountId) {
        self.fail_on.set(Some(id));
    }
}

impl AccountRepository for RecordingRepository {
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError> {
        self.inner.get_account_by_id(id)
    }

    fn update(&self, account: &Account) -> Result<(), PaymentError> {
        if self.fail_on.get() == Some(account.id()) {
            return Err(PaymentError::persistence(account.id(), "storage offline"));
        }
        self.updated.borrow_mut().push(account.id());
        self.inner.update(account)
    }
}
