//! Operation processing engine
//!
//! This module provides the OperationEngine that routes each parsed operation
//! to the matching use case, sharing one repository and one notifier between
//! them.

use crate::core::traits::{AccountRepository, NotificationService};
use crate::core::transfer_money::TransferMoney;
use crate::core::withdraw_money::WithdrawMoney;
use crate::types::{Operation, PaymentError};

/// Operation processing engine
///
/// Generic over the repository and notifier so the same engine drives both
/// the single-threaded and the concurrent processing strategies.
#[derive(Debug)]
pub struct OperationEngine<R, N> {
    repository: R,
    notifier: N,
}

impl<R: AccountRepository, N: NotificationService> OperationEngine<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        OperationEngine {
            repository,
            notifier,
        }
    }

    /// Process a single operation
    ///
    /// # Errors
    ///
    /// Returns whatever the selected use case returns; the repository is
    /// left exactly as the use case left it.
    pub fn process(&self, operation: Operation) -> Result<(), PaymentError> {
        match operation {
            Operation::Withdraw { account, amount } => {
                WithdrawMoney::new(&self.repository, &self.notifier).execute(account, amount)
            }
            Operation::Transfer { from, to, amount } => {
                TransferMoney::new(&self.repository, &self.notifier).execute(from, to, amount)
            }
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}
