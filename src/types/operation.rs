//! Operation types accepted by the engine
//!
//! An operation is one invocation of a use case: a withdrawal from a single
//! account or a transfer between two accounts.

use super::account::AccountId;
use rust_decimal::Decimal;

/// Kind of operation, as named in the operations CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Debit funds from one account
    Withdraw,

    /// Move funds from one account to another
    Transfer,
}

/// A parsed, ready-to-run operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Withdraw `amount` from `account`
    Withdraw { account: AccountId, amount: Decimal },

    /// Move `amount` from `from` to `to`
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
}

impl Operation {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Operation::Withdraw { .. } => OperationType::Withdraw,
            Operation::Transfer { .. } => OperationType::Transfer,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Operation::Withdraw { amount, .. } | Operation::Transfer { amount, .. } => *amount,
        }
    }

    /// Every account this operation reads or writes
    pub fn accounts(&self) -> impl Iterator<Item = AccountId> {
        let (first, second) = match *self {
            Operation::Withdraw { account, .. } => (account, None),
            Operation::Transfer { from, to, .. } => (from, Some(to)),
        };
        std::iter::once(first).chain(second)
    }
}
