//! CSV format handling for accounts and operations
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization of both input files
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, AccountId, AccountLimits, Operation, PaymentError, User};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for the operations file
///
/// Matches the input CSV format with columns: type, from, to, amount.
/// `to` is only meaningful for transfers and may be left empty for
/// withdrawals.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OperationCsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub from: String,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// CSV record structure for the accounts file
///
/// Matches the input CSV format with columns: id, email, balance, withdrawn,
/// paid_in. Missing numeric columns default to zero.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountCsvRecord {
    pub id: String,
    pub email: String,
    pub balance: Option<String>,
    pub withdrawn: Option<String>,
    pub paid_in: Option<String>,
}

fn parse_account_id(value: &str, label: &str) -> Result<AccountId, String> {
    AccountId::from_str(value.trim()).map_err(|e| format!("Invalid {} '{}': {}", label, value, e))
}

fn parse_amount(value: Option<&str>, column: &str) -> Result<Option<Decimal>, String> {
    match value.map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => Decimal::from_str(amount_str)
            .map(Some)
            .map_err(|_| format!("Invalid {} '{}'", column, amount_str)),
        _ => Ok(None),
    }
}

/// Convert an OperationCsvRecord to an Operation
///
/// This function:
/// - Parses the operation type (case-insensitive) into an Operation variant
/// - Parses the account identifiers as UUIDs
/// - Parses the amount into a Decimal
/// - Validates that the amount is present, and that transfers name a destination
///
/// Amount sign is not checked here; the account rules reject non-positive
/// amounts with a typed error.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Operation) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_operation_record(record: OperationCsvRecord) -> Result<Operation, String> {
    let from = parse_account_id(&record.from, "source account id")?;

    let amount = parse_amount(record.amount.as_deref(), "amount")?.ok_or_else(|| {
        format!(
            "{} operation for account {} requires an amount",
            record.op_type, from
        )
    })?;

    match record.op_type.to_lowercase().as_str() {
        "withdraw" => Ok(Operation::Withdraw {
            account: from,
            amount,
        }),
        "transfer" => {
            let to = match record.to.as_deref().map(str::trim) {
                Some(to) if !to.is_empty() => parse_account_id(to, "destination account id")?,
                _ => {
                    return Err(format!(
                        "transfer from account {} requires a destination account",
                        from
                    ))
                }
            };
            Ok(Operation::Transfer { from, to, amount })
        }
        _ => Err(format!(
            "Invalid operation type: '{}' for account {}",
            record.op_type, from
        )),
    }
}

/// Convert an AccountCsvRecord to an Account carrying the given limits
///
/// Rows whose totals could never have been reached through the account
/// rules (negative balance, positive withdrawn, paid_in outside the limit)
/// are rejected.
pub fn convert_account_record(
    record: AccountCsvRecord,
    limits: AccountLimits,
) -> Result<Account, String> {
    let id = parse_account_id(&record.id, "account id")?;

    let email = record.email.trim();
    if email.is_empty() {
        return Err(format!("Account {} has no email", id));
    }

    let mut account = Account::with_limits(id, User::new(email), limits);
    account.balance = parse_amount(record.balance.as_deref(), "balance")?.unwrap_or_default();
    account.withdrawn =
        parse_amount(record.withdrawn.as_deref(), "withdrawn")?.unwrap_or_default();
    account.paid_in = parse_amount(record.paid_in.as_deref(), "paid_in")?.unwrap_or_default();

    if account.balance < Decimal::ZERO {
        return Err(format!(
            "Account {} has negative balance {}",
            id, account.balance
        ));
    }
    if account.withdrawn > Decimal::ZERO {
        return Err(format!(
            "Account {} has positive withdrawn total {}",
            id, account.withdrawn
        ));
    }
    if account.paid_in < Decimal::ZERO || account.paid_in > limits.pay_in_limit {
        return Err(format!(
            "Account {} has paid_in {} outside 0..={}",
            id, account.paid_in, limits.pay_in_limit
        ));
    }

    Ok(account)
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: id, email, balance, withdrawn,
/// paid_in. Accounts are sorted by id for deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), PaymentError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "email", "balance", "withdrawn", "paid_in"])
        .map_err(|e| PaymentError::io(format!("Failed to write CSV header: {}", e)))?;

    let mut sorted_accounts: Vec<&Account> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|account| account.id());

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id().to_string(),
                account.user.email.clone(),
                format!("{:.4}", account.balance),
                format!("{:.4}", account.withdrawn),
                format!("{:.4}", account.paid_in),
            ])
            .map_err(|e| PaymentError::io(format!("Failed to write account record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| PaymentError::io(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
