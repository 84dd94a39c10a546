//! Asynchronous CSV reader for operations
//!
//! Reads operations in batches with `csv-async`. Bad rows are logged and
//! dropped so a batch only ever contains runnable operations.

use crate::io::csv_format::{convert_operation_record, OperationCsvRecord};
use crate::types::Operation;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Async reader producing batches of operations
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read up to `batch_size` operations
    ///
    /// An empty batch means the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Operation> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<OperationCsvRecord>();

        while batch.len() < batch_size {
            let Some(record) = records.next().await else {
                break;
            };
            self.line_num += 1;

            match record {
                Ok(csv_record) => match convert_operation_record(csv_record) {
                    Ok(operation) => batch.push(operation),
                    Err(e) => tracing::warn!(line = self.line_num, "Skipping operation: {}", e),
                },
                Err(e) => tracing::warn!(line = self.line_num, "CSV parse error: {}", e),
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;
    use rust_decimal_macros::dec;

    const ACC1: &str = "00000000-0000-0000-0000-000000000001";
    const ACC2: &str = "00000000-0000-0000-0000-000000000002";

    fn reader(content: String) -> AsyncReader<Cursor<Vec<u8>>> {
        AsyncReader::new(Cursor::new(content.into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut async_reader = reader(format!(
            "type,from,to,amount\nwithdraw,{ACC1},,1\ntransfer,{ACC1},{ACC2},2\nwithdraw,{ACC2},,3\n"
        ));

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].amount(), dec!(1));
        assert_eq!(
            batch[1],
            Operation::Transfer {
                from: ACC1.parse().unwrap(),
                to: ACC2.parse().unwrap(),
                amount: dec!(2),
            }
        );

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].amount(), dec!(3));

        assert!(async_reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = reader("type,from,to,amount\n".to_string());
        assert!(async_reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let mut async_reader = reader(format!(
            "type,from,to,amount\ndeposit,{ACC1},,1\ntransfer,{ACC1},,1\nwithdraw,{ACC1},,abc\nwithdraw,{ACC1},,4\n"
        ));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].amount(), dec!(4));
    }

    #[tokio::test]
    async fn test_async_reader_case_insensitive_type() {
        let mut async_reader = reader(format!(
            "type,from,to,amount\nWITHDRAW,{ACC1},,1\nTransfer,{ACC1},{ACC2},2\n"
        ));

        assert_eq!(async_reader.read_batch(10).await.len(), 2);
    }
}
