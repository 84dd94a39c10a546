//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which runs a batch of
//! operations concurrently while keeping every account's operations in input
//! order.
//!
//! # Design
//!
//! A transfer touches two accounts, so a batch cannot simply be split by one
//! key. Instead, operations that share an account (directly, or through a
//! chain of other operations) are put in the same group. Groups are disjoint
//! in the accounts they touch and run in parallel; the operations inside a
//! group run one after another in their original order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<OperationEngine<R, N>>  (shared use-case dispatcher)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::engine::OperationEngine;
use crate::core::traits::{AccountRepository, NotificationService};
use crate::types::{AccountId, Operation, PaymentError};

/// Result of processing a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was processed
    pub operation: Operation,

    /// The result of processing (success or error)
    pub result: Result<(), PaymentError>,
}

/// Batch processor with account-based partitioning
#[derive(Debug)]
pub struct BatchProcessor<R, N> {
    /// Shared operation engine
    ///
    /// Wrapped in Arc to enable sharing across async tasks.
    engine: Arc<OperationEngine<R, N>>,
}

impl<R, N> Clone for BatchProcessor<R, N> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<R, N> BatchProcessor<R, N>
where
    R: AccountRepository + Send + Sync + 'static,
    N: NotificationService + Send + Sync + 'static,
{
    pub fn new(engine: Arc<OperationEngine<R, N>>) -> Self {
        Self { engine }
    }

    /// Partition a batch into groups that share no account
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one group
    /// - Operations sharing an account are in the same group
    /// - Operations inside a group keep their original relative order
    /// - Groups are returned in order of their first operation
    pub fn partition_by_accounts(&self, batch: Vec<Operation>) -> Vec<Vec<Operation>> {
        let mut groups = DisjointSet::new(batch.len());
        let mut first_seen: HashMap<AccountId, usize> = HashMap::new();

        for (index, operation) in batch.iter().enumerate() {
            for account in operation.accounts() {
                match first_seen.get(&account) {
                    Some(&other) => groups.union(index, other),
                    None => {
                        first_seen.insert(account, index);
                    }
                }
            }
        }

        let mut partitions: Vec<Vec<Operation>> = Vec::new();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();

        for (index, operation) in batch.into_iter().enumerate() {
            let root = groups.find(index);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                partitions.push(Vec::new());
                partitions.len() - 1
            });
            partitions[slot].push(operation);
        }

        partitions
    }

    /// Process one group of operations sequentially, in order
    ///
    /// Errors are captured in the results and do not stop the group.
    pub async fn process_group(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for operation in operations {
            let result = self.engine.process(operation);
            results.push(ProcessingResult { operation, result });
        }

        results
    }

    /// Process a batch of operations with account-based partitioning
    ///
    /// 1. Partitions the batch into account-disjoint groups
    /// 2. Spawns a tokio task per group
    /// 3. Waits for all tasks and collects their results
    ///
    /// Results are grouped by partition, not in input order.
    ///
    /// # Errors
    ///
    /// Returns `TaskFailed` if any group task panicked or was cancelled. Every
    /// task is still awaited first, so no group is left running.
    pub async fn process_batch(
        &self,
        batch: Vec<Operation>,
    ) -> Result<Vec<ProcessingResult>, PaymentError> {
        let partitions = self.partition_by_accounts(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for operations in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_group(operations).await
            }));
        }

        let mut results = Vec::new();
        let mut failure = None;
        for task in tasks {
            match task.await {
                Ok(group_results) => results.extend(group_results),
                Err(e) => {
                    tracing::error!("Operation group task failed: {}", e);
                    failure.get_or_insert_with(|| PaymentError::task_failed(e.to_string()));
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(results),
        }
    }
}

/// Union-find over operation indices
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_a.max(root_b)] = root_a.min(root_b);
        }
    }
}
