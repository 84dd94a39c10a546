//! Thread-safe account repository for async batch processing
//!
//! This module provides the `ConcurrentAccountRepository` struct, which stores
//! account states in a concurrent map so that several worker threads can run
//! use cases against it at the same time.
//!
//! # Design
//!
//! Reads go straight to a `DashMap` and never block each other. Every write,
//! single or multi-account, goes through one commit lock: the stored versions
//! are verified and the new states inserted while the lock is held. A stale
//! copy is therefore always detected, and a multi-account write is never seen
//! half-applied by another writer.
//!
//! # Thread Safety
//!
//! All methods take `&self` and are safe to call from multiple threads. The
//! commit lock only serialises writers; readers may observe one account of a
//! multi-account write before the other.

use crate::core::repository::{next_version, verify_version};
use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId, PaymentError};
use dashmap::DashMap;
use std::sync::{Mutex, MutexGuard};

/// Thread-safe account storage with optimistic versioning
#[derive(Debug, Default)]
pub struct ConcurrentAccountRepository {
    /// Concurrent HashMap storing account states by account ID
    accounts: DashMap<AccountId, Account>,

    /// Serialises writers
    commit: Mutex<()>,
}

impl ConcurrentAccountRepository {
    /// Create a new empty ConcurrentAccountRepository
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
        let _guard = self.lock(account.id())?;
        if self.accounts.contains_key(&account.id()) {
            return Err(PaymentError::duplicate_account(account.id()));
        }
        self.accounts.insert(account.id(), account);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Get all accounts sorted by account ID
    ///
    /// The returned vector is a snapshot; accounts may change right after.
    pub fn get_all_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }

    fn lock(&self, account: AccountId) -> Result<MutexGuard<'_, ()>, PaymentError> {
        self.commit
            .lock()
            .map_err(|_| PaymentError::persistence(account, "commit lock poisoned"))
    }
}

impl AccountRepository for ConcurrentAccountRepository {
    fn get_account_by_id(&self, id: AccountId) -> Result<Account, PaymentError> {
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| PaymentError::account_not_found(id))
    }

    fn update(&self, account: &Account) -> Result<(), PaymentError> {
        self.update_all(&[account])
    }

    /// Verify every account first, then write them all, under the commit lock
    fn update_all(&self, accounts: &[&Account]) -> Result<(), PaymentError> {
        let Some(first) = accounts.first() else {
            return Ok(());
        };
        let _guard = self.lock(first.id())?;

        for account in accounts {
            let stored = self
                .accounts
                .get(&account.id())
                .map(|entry| entry.value().clone());
            verify_version(stored.as_ref(), account)?;
        }

        for account in accounts {
            self.accounts.insert(account.id(), next_version(account));
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
    use std::sync::Arc;
    use std::thread;

    fn account(balance: Decimal) -> Account {
        let mut account = Account::new(AccountId::generate(), User::new("e@mail.com"));
        account.balance = balance;
        account
    }

    #[test]
    fn test_insert_and_get() {
        let stored = account(dec!(10));
        let repository = ConcurrentAccountRepository::new();
        repository.insert(stored.clone()).unwrap();

        assert_eq!(repository.get_account_by_id(stored.id()).unwrap(), stored);
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let stored = account(dec!(10));
        let repository = ConcurrentAccountRepository::with_accounts([stored.clone()]).unwrap();

        assert_eq!(
            repository.insert(stored.clone()),
            Err(PaymentError::duplicate_account(stored.id()))
        );
    }

    #[test]
    fn test_get_unknown_account_fails() {
        let repository = ConcurrentAccountRepository::new();
        let id = AccountId::generate();

        assert_eq!(
            repository.get_account_by_id(id),
            Err(PaymentError::account_not_found(id))
        );
    }

    #[test]
    fn test_update_bumps_version_and_rejects_stale_copies() {
        let stored = account(dec!(10));
        let id = stored.id();
        let repository = ConcurrentAccountRepository::with_accounts([stored]).unwrap();

        let mut first = repository.get_account_by_id(id).unwrap();
        let second = repository.get_account_by_id(id).unwrap();
        first.balance = dec!(1);
        repository.update(&first).unwrap();

        assert_eq!(
            repository.update(&second),
            Err(PaymentError::concurrent_modification(id, 0, 1))
        );
        let reloaded = repository.get_account_by_id(id).unwrap();
        assert_eq!(reloaded.balance, dec!(1));
        assert_eq!(reloaded.version(), 1);
    }

    #[test]
    fn test_update_all_is_all_or_nothing() {
        let a = account(dec!(10));
        let b = account(dec!(20));
        let repository = ConcurrentAccountRepository::with_accounts([a.clone(), b.clone()]).unwrap();

        let orphan = account(dec!(30));
        let mut a_copy = repository.get_account_by_id(a.id()).unwrap();
        a_copy.balance = dec!(0);

        let result = repository.update_all(&[&a_copy, &orphan]);

        assert_eq!(result, Err(PaymentError::account_not_found(orphan.id())));
        assert_eq!(repository.get_account_by_id(a.id()).unwrap().balance, dec!(10));
    }

    #[test]
    fn test_update_all_with_no_accounts_is_a_no_op() {
        let repository = ConcurrentAccountRepository::new();
        assert_eq!(repository.update_all(&[]), Ok(()));
    }

    #[test]
    fn test_concurrent_writers_of_same_version_only_one_wins() {
        let stored = account(dec!(100));
        let id = stored.id();
        let repository = Arc::new(ConcurrentAccountRepository::with_accounts([stored]).unwrap());

        // Every writer loads its copy before any of them commits.
        let copies: Vec<Account> = (0..8)
            .map(|_| repository.get_account_by_id(id).unwrap())
            .collect();

        let handles: Vec<_> = copies
            .into_iter()
            .enumerate()
            .map(|(i, mut copy)| {
                let repository = Arc::clone(&repository);
                thread::spawn(move || {
                    assert_eq!(copy.version(), 0);
                    copy.balance = Decimal::from(i);
                    repository.update(&copy).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(repository.get_account_by_id(id).unwrap().version(), 1);
    }

    #[test]
    fn test_get_all_accounts_sorted() {
        let repository =
            ConcurrentAccountRepository::with_accounts((0..10).map(|_| account(Decimal::ZERO)))
                .unwrap();

        let accounts = repository.get_all_accounts();
        assert_eq!(accounts.len(), 10);
        assert!(accounts.windows(2).all(|pair| pair[0].id() < pair[1].id()));
    }
}
