//! Account-related types for the money movement engine
//!
//! This module defines the Account entity, its identifier and the owning user.
//! The rules that validate and mutate an account live in [`crate::core::rules`].

use super::limits::AccountLimits;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque account identifier
///
/// Assigned by the owning infrastructure when the account is created and
/// never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        AccountId(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        AccountId(uuid)
    }

    /// Access the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(AccountId)
    }
}

/// Identity owning an account
///
/// Only the email address is needed by the engine: it is the destination
/// of low-funds and approaching-limit notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        User {
            email: email.into(),
        }
    }
}

/// Account state
///
/// Holds the running totals for one account. `balance`, `withdrawn` and
/// `paid_in` only ever change together, through the check/apply operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,

    /// Owner of the account, target of notifications
    pub user: User,

    /// Current spendable amount
    pub balance: Decimal,

    /// Running total of all withdrawals
    ///
    /// Each withdrawal subtracts from this value, so it is zero or negative.
    pub withdrawn: Decimal,

    /// Running total of all pay-ins
    ///
    /// Never exceeds `limits.pay_in_limit`.
    pub paid_in: Decimal,

    /// Thresholds the rules are evaluated against
    pub limits: AccountLimits,

    /// Optimistic concurrency token, bumped by the repository on every write
    pub(crate) version: u64,
}

impl Account {
    /// Create a new account with zero balances and the default limits
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier assigned by the owning infrastructure
    /// * `user` - The owning user
    ///
    /// # Returns
    ///
    /// A new Account with:
    /// - balance = 0
    /// - withdrawn = 0
    /// - paid_in = 0
    /// - version = 0
    pub fn new(id: AccountId, user: User) -> Self {
        Self::with_limits(id, user, AccountLimits::default())
    }

    /// Create a new account with zero balances and explicit limits
    pub fn with_limits(id: AccountId, user: User, limits: AccountLimits) -> Self {
        Account {
            id,
            user,
            balance: Decimal::ZERO,
            withdrawn: Decimal::ZERO,
            paid_in: Decimal::ZERO,
            limits,
            version: 0,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Version of the stored state this copy was loaded from
    pub fn version(&self) -> u64 {
        self.version
    }
}
