//! In-memory account repository
//!
//! This module provides the `InMemoryAccountRepository` struct which holds
//! the state of all accounts for single-threaded processing.
//!
//! The repository is responsible for:
//! - Seeding accounts with their identifier and owner before any operation runs
//! - Handing out copies of stored accounts to the use cases
//! - Rejecting writes of stale copies (optimistic versioning)
//! - Persisting multi-account writes all-or-nothing
//! - Providing sorted account listings for output

use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId, PaymentError};
use std::cell::RefCell;
use std::collections::HashMap;

/// Single-threaded account storage
///
/// Uses interior mutability so the repository can be shared by reference
/// between use cases, matching the `&self` methods of `AccountRepository`.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    /// Map of account IDs to stored account states
    accounts: RefCell<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    /// Create a new repository with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with accounts
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if two accounts share an identifier.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self, PaymentError> {
        let repository = Self::new();
        for account in accounts {
            repository.insert(account)?;
        }
        Ok(repository)
    }

    /// Add a new account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if an account with the same id is already stored.
    pub fn insert(&self, account: Account) -> Result<(), PaymentError> {
        let mut accounts = self.accounts.borrow_mut();
        if accounts.contains_key(&account.id()) {
            return Err(PaymentError::duplicate_account(account.id()));
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.borrow().is_empty()
    }

    /// Get all accounts sorted by account ID
    ///
    /// Sorting gives deterministic output for CSV generation.
    pub fn get_all_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.borrow().values().cloned().collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }
}

/// Check that `account` may overwrite what is stored for its id
pub(crate) fn verify_version(
    stored: Option<&Account>,
    account: &Account,
) -> Result<(), PaymentError> {
    let stored = stored.ok_or_else(|| PaymentError::account_not_found(account.id()))?;
    if stored.version != account.version {
        return Err(PaymentError::concurrent_modification(
            account.id(),
            account.version,
            stored.version,
        ));
    }
    Ok(())
}

/// Copy of `account` as it should be stored after a successful write
pub(crate) fn next_version(account: &Account) -> Account {
    let mut stored = account.clone();
    stored.version = account.version + 1;
    stored
}

impl AccountRepository for InMemoryAccountRepository {
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError> {
        self.accounts
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| PaymentError::account_not_found(id))
    }

    fn update(&self, account: &Account) -> Result<(), PaymentError> {
        self.update_all(&[account])
    }

    /// Verify every account first, then write them all
    fn update_all(&self, accounts: &[&Account]) -> Result<(), PaymentError> {
        let mut stored = self.accounts.borrow_mut();

        for account in accounts {
            verify_version(stored.get(&account.id()), account)?;
        }

        for account in accounts {
            stored.insert(account.id(), next_version(account));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        let mut account = Account::new(AccountId::generate(), User::new("e@mail.com"));
        account.balance = balance;
        account
    }

    #[test]
    fn test_new_creates_empty_repository() {
        let repository = InMemoryAccountRepository::new();
        assert!(repository.is_empty());
        assert_eq!(repository.get_all_accounts().len(), 0);
    }

    #[test]
    fn test_get_returns_copy_of_stored_account() {
        let stored = account(dec!(10));
        let id = stored.id();
        let repository = InMemoryAccountRepository::with_accounts([stored.clone()]).unwrap();

        let mut loaded = repository.get_account_by_id(id).unwrap();
        assert_eq!(loaded, stored);

        loaded.balance = dec!(99);
        assert_eq!(repository.get_account_by_id(id).unwrap().balance, dec!(10));
    }

    #[test]
    fn test_get_unknown_account_fails() {
        let repository = InMemoryAccountRepository::new();
        let id = AccountId::generate();

        assert_eq!(
            repository.get_account_by_id(id),
            Err(PaymentError::account_not_found(id))
        );
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let first = account(dec!(1));
        let repository = InMemoryAccountRepository::new();
        repository.insert(first.clone()).unwrap();

        assert_eq!(
            repository.insert(first.clone()),
            Err(PaymentError::duplicate_account(first.id()))
        );
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_update_persists_and_bumps_version() {
        let repository = InMemoryAccountRepository::with_accounts([account(dec!(10))]).unwrap();
        let id = repository.get_all_accounts()[0].id();

        let mut loaded = repository.get_account_by_id(id).unwrap();
        loaded.balance = dec!(5);
        repository.update(&loaded).unwrap();

        let reloaded = repository.get_account_by_id(id).unwrap();
        assert_eq!(reloaded.balance, dec!(5));
        assert_eq!(reloaded.version(), 1);
    }

    #[test]
    fn test_update_with_stale_copy_fails() {
        let repository = InMemoryAccountRepository::with_accounts([account(dec!(10))]).unwrap();
        let id = repository.get_all_accounts()[0].id();

        let first = repository.get_account_by_id(id).unwrap();
        let second = repository.get_account_by_id(id).unwrap();
        repository.update(&first).unwrap();

        assert_eq!(
            repository.update(&second),
            Err(PaymentError::concurrent_modification(id, 0, 1))
        );
    }

    #[test]
    fn test_update_of_unknown_account_fails() {
        let repository = InMemoryAccountRepository::new();
        let orphan = account(dec!(1));

        assert_eq!(
            repository.update(&orphan),
            Err(PaymentError::account_not_found(orphan.id()))
        );
    }

    #[test]
    fn test_update_all_is_all_or_nothing() {
        let repository =
            InMemoryAccountRepository::with_accounts([account(dec!(10)), account(dec!(20))])
                .unwrap();
        let ids: Vec<AccountId> = repository
            .get_all_accounts()
            .iter()
            .map(|a| a.id())
            .collect();

        let mut fresh = repository.get_account_by_id(ids[0]).unwrap();
        let mut stale = repository.get_account_by_id(ids[1]).unwrap();
        repository
            .update(&repository.get_account_by_id(ids[1]).unwrap())
            .unwrap();

        fresh.balance = dec!(0);
        stale.balance = dec!(0);
        let result = repository.update_all(&[&fresh, &stale]);

        assert!(matches!(
            result,
            Err(PaymentError::ConcurrentModification { .. })
        ));
        assert_eq!(repository.get_account_by_id(ids[0]).unwrap().balance, dec!(10));
        assert_eq!(repository.get_account_by_id(ids[0]).unwrap().version(), 0);
    }

    #[test]
    fn test_get_all_accounts_is_sorted_by_id() {
        let repository = InMemoryAccountRepository::with_accounts(
            (0..5).map(|_| account(Decimal::ZERO)),
        )
        .unwrap();

        let ids: Vec<AccountId> = repository
            .get_all_accounts()
            .iter()
            .map(|a| a.id())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids, sorted);
    }
}
