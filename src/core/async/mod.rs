//! Concurrent implementations of core components
//!
//! - **ConcurrentAccountRepository**: Thread-safe account storage using DashMap
//! - **BatchProcessor**: Runs account-disjoint groups of operations in parallel
//!
//! # Thread Safety
//!
//! Reads on different accounts proceed in parallel. Writes go through a
//! single commit lock and are checked against the version each account was
//! loaded at, so a stale write is rejected rather than lost.

pub mod account_repository;
pub mod batch_processor;

pub use account_repository::ConcurrentAccountRepository;
pub use batch_processor::{BatchProcessor, ProcessingResult};
