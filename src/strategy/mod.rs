//! Processing strategies
//!
//! A strategy owns the whole run: load the accounts, stream the operations
//! through the use cases, and write the final account states.
//!
//! - `sync` - one operation at a time on the calling thread
//! - `async` - batched, with account-disjoint groups running concurrently

use crate::cli::StrategyType;
use crate::types::{AccountLimits, PaymentError};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

pub trait ProcessingStrategy: Send + Sync {
    /// Run every operation in `operations_path` against the accounts in
    /// `accounts_path` and write the resulting accounts to `output`
    ///
    /// # Errors
    ///
    /// Only fatal problems are returned: unreadable files, a malformed
    /// accounts file, or a failure writing the output. Individual bad or
    /// rejected operations are logged and skipped.
    fn process(
        &self,
        accounts_path: &Path,
        operations_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), PaymentError>;
}

pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    limits: AccountLimits,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(limits)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, limits))
        }
    }
}

/// Log an operation the engine refused
pub(crate) fn log_rejection(operation: &crate::types::Operation, error: &PaymentError) {
    tracing::warn!(
        operation = ?operation.operation_type(),
        amount = %operation.amount(),
        "Operation rejected: {}",
        error
    );
}
