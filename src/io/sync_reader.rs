//! Synchronous CSV readers
//!
//! `SyncReader` streams the operations file one record at a time through an
//! iterator; `read_accounts` loads the whole accounts file up front, since
//! every account must exist before the first operation runs.

use crate::io::csv_format::{
    convert_account_record, convert_operation_record, AccountCsvRecord, OperationCsvRecord,
};
use crate::types::{Account, AccountLimits, Operation, PaymentError};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

pub(crate) fn open_error(path: &Path, error: std::io::Error) -> PaymentError {
    if error.kind() == ErrorKind::NotFound {
        PaymentError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        PaymentError::io(format!(
            "Failed to open file '{}': {}",
            path.display(),
            error
        ))
    }
}

fn csv_reader(file: File) -> csv::Reader<File> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .buffer_capacity(8 * 1024)
        .from_reader(file)
}

/// Synchronous operations reader
///
/// Yields one `Result` per data row. A bad row produces a `ParseError`
/// carrying its line number (header is line 1) and does not stop the
/// iteration.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    pub fn new(path: &Path) -> Result<Self, PaymentError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        Ok(Self {
            reader: csv_reader(file),
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Operation, PaymentError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<OperationCsvRecord>();
        let record = deserializer.next()?;
        self.line_num += 1;

        Some(match record {
            Ok(csv_record) => convert_operation_record(csv_record)
                .map_err(|e| PaymentError::parse(Some(self.line_num), e)),
            Err(e) => Err(PaymentError::parse(Some(self.line_num), e.to_string())),
        })
    }
}

/// Load every account from the accounts file
///
/// # Errors
///
/// Unlike the operations file, any bad row here is fatal: a missing file,
/// a malformed record or a duplicate id aborts the load.
pub fn read_accounts(path: &Path, limits: AccountLimits) -> Result<Vec<Account>, PaymentError> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv_reader(file);

    let mut accounts: Vec<Account> = Vec::new();
    let mut seen = HashSet::new();
    for (index, record) in reader.deserialize::<AccountCsvRecord>().enumerate() {
        let line = index as u64 + 2;
        let record = record.map_err(|e| PaymentError::parse(Some(line), e.to_string()))?;
        let account =
            convert_account_record(record, limits).map_err(|e| PaymentError::parse(Some(line), e))?;

        if !seen.insert(account.id()) {
            return Err(PaymentError::duplicate_account(account.id()));
        }
        accounts.push(account);
    }

    tracing::debug!(count = accounts.len(), path = %path.display(), "accounts loaded");
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ACC1: &str = "00000000-0000-0000-0000-000000000001";
    const ACC2: &str = "00000000-0000-0000-0000-000000000002";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert_eq!(
            result.unwrap_err(),
            PaymentError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_operations() {
        let csv_content = format!(
            "type,from,to,amount\nwithdraw,{ACC1},,100.0\ntransfer,{ACC1},{ACC2},50\n"
        );
        let file = create_temp_csv(&csv_content);

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Ok(Operation::Withdraw {
                account: ACC1.parse().unwrap(),
                amount: dec!(100.0),
            })
        );
        assert_eq!(
            records[1],
            Ok(Operation::Transfer {
                from: ACC1.parse().unwrap(),
                to: ACC2.parse().unwrap(),
                amount: dec!(50),
            })
        );
    }

    #[test]
    fn test_sync_reader_rejects_short_row_without_amount() {
        let csv_content = format!("type,from,to,amount\nwithdraw,{ACC1}\n");
        let file = create_temp_csv(&csv_content);

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        assert!(matches!(
            records[0],
            Err(PaymentError::ParseError { line: Some(2), .. })
        ));
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let csv_content = format!(
            "type,from,to,amount\nwithdraw,{ACC1},,1\nwithdraw,{ACC1},,invalid\nwithdraw,{ACC1},,2\n"
        );
        let file = create_temp_csv(&csv_content);

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(matches!(error, PaymentError::ParseError { line: Some(3), .. }));
        assert!(error.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let csv_content = format!("type,from,to,amount\n  withdraw  ,  {ACC1}  ,  ,  10.0  \n");
        let file = create_temp_csv(&csv_content);

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_read_accounts() {
        let csv_content = format!(
            "id,email,balance,withdrawn,paid_in\n{ACC1},a@mail.com,1000,-50,0\n{ACC2},b@mail.com,0,0,3000\n"
        );
        let file = create_temp_csv(&csv_content);

        let accounts = read_accounts(file.path(), AccountLimits::default()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].user.email, "a@mail.com");
        assert_eq!(accounts[0].balance, dec!(1000));
        assert_eq!(accounts[0].withdrawn, dec!(-50));
        assert_eq!(accounts[1].paid_in, dec!(3000));
    }

    #[test]
    fn test_read_accounts_rejects_duplicate_ids() {
        let csv_content = format!(
            "id,email,balance,withdrawn,paid_in\n{ACC1},a@mail.com,1,0,0\n{ACC1},b@mail.com,2,0,0\n"
        );
        let file = create_temp_csv(&csv_content);

        let result = read_accounts(file.path(), AccountLimits::default());

        assert_eq!(
            result.unwrap_err(),
            PaymentError::duplicate_account(ACC1.parse().unwrap())
        );
    }

    #[test]
    fn test_read_accounts_malformed_row_is_fatal() {
        let csv_content = format!(
            "id,email,balance,withdrawn,paid_in\n{ACC1},a@mail.com,1,0,0\nnot-a-uuid,b@mail.com,2,0,0\n"
        );
        let file = create_temp_csv(&csv_content);

        let result = read_accounts(file.path(), AccountLimits::default());

        assert!(matches!(
            result,
            Err(PaymentError::ParseError { line: Some(3), .. })
        ));
    }

    #[test]
    fn test_read_accounts_missing_file() {
        let result = read_accounts(Path::new("missing-accounts.csv"), AccountLimits::default());
        assert!(matches!(result, Err(PaymentError::FileNotFound { .. })));
    }
}
