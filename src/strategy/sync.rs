//! Synchronous processing strategy
//!
//! Streams operations with a blocking `csv` reader and runs each one to
//! completion before reading the next.

use crate::core::notification::LogNotificationService;
use crate::core::repository::InMemoryAccountRepository;
use crate::core::OperationEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::{read_accounts, SyncReader};
use crate::strategy::{log_rejection, ProcessingStrategy};
use crate::types::{AccountLimits, PaymentError};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    limits: AccountLimits,
}

impl SyncProcessingStrategy {
    pub fn new(limits: AccountLimits) -> Self {
        Self { limits }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        operations_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), PaymentError> {
        let repository =
            InMemoryAccountRepository::with_accounts(read_accounts(accounts_path, self.limits)?)?;
        let engine = OperationEngine::new(repository, LogNotificationService);

        let reader = SyncReader::new(operations_path)?;

        let (mut applied, mut skipped) = (0usize, 0usize);
        for result in reader {
            match result {
                Ok(operation) => match engine.process(operation) {
                    Ok(()) => applied += 1,
                    Err(e) => {
                        log_rejection(&operation, &e);
                        skipped += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!("Skipping operation: {}", e);
                    skipped += 1;
                }
            }
        }

        tracing::info!(applied, skipped, "processing finished");

        write_accounts_csv(&engine.repository().get_all_accounts(), output)
    }
}
