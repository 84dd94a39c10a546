//! Asynchronous processing strategy
//!
//! Reads operations in batches with `csv-async` over a tokio file and hands
//! each batch to the `BatchProcessor`, which runs account-disjoint groups
//! concurrently on a multi-threaded runtime. Batches run one after another,
//! so the final state matches the synchronous strategy.

use crate::core::notification::LogNotificationService;
use crate::core::r#async::{BatchProcessor, ConcurrentAccountRepository};
use crate::core::OperationEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::{open_error, read_accounts};
use crate::strategy::{log_rejection, ProcessingStrategy};
use crate::types::{AccountLimits, PaymentError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Batch processing configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of operations read per batch
    pub batch_size: usize,

    /// Worker threads available to run groups concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a config, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    limits: AccountLimits,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, limits: AccountLimits) -> Self {
        Self { config, limits }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        operations_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), PaymentError> {
        let repository = Arc::new(ConcurrentAccountRepository::with_accounts(read_accounts(
            accounts_path,
            self.limits,
        )?)?);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| PaymentError::io(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(async {
            let engine = Arc::new(OperationEngine::new(
                Arc::clone(&repository),
                LogNotificationService,
            ));
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(operations_path)
                .await
                .map_err(|e| open_error(operations_path, e))?;
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let (mut applied, mut skipped) = (0usize, 0usize);
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for processed in processor.process_batch(batch).await? {
                    match &processed.result {
                        Ok(()) => applied += 1,
                        Err(e) => {
                            log_rejection(&processed.operation, e);
                            skipped += 1;
                        }
                    }
                }
            }

            tracing::info!(applied, rejected = skipped, "processing finished");
            Ok::<(), PaymentError>(())
        })?;

        write_accounts_csv(&repository.get_all_accounts(), output)
    }
}
