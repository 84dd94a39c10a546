use crate::strategy::BatchConfig;
use crate::types::AccountLimits;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Apply withdrawals and transfers to a set of accounts
#[derive(Parser, Debug)]
#[command(name = "money-engine")]
#[command(
    about = "Apply withdrawals and transfers to accounts, enforcing balance and pay-in rules",
    long_about = None
)]
pub struct CliArgs {
    /// Accounts CSV file path
    #[arg(
        long = "accounts",
        value_name = "ACCOUNTS",
        help = "Path to the accounts CSV file (id,email,balance,withdrawn,paid_in)"
    )]
    pub accounts_file: PathBuf,

    /// Operations CSV file path
    #[arg(
        value_name = "OPERATIONS",
        help = "Path to the operations CSV file (type,from,to,amount)"
    )]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads for concurrent groups (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of operation groups processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Cumulative pay-in limit per account
    #[arg(
        long = "pay-in-limit",
        value_name = "AMOUNT",
        env = "MONEY_ENGINE_PAY_IN_LIMIT",
        help = "Maximum total that may be paid into an account (default: 4000)"
    )]
    pub pay_in_limit: Option<Decimal>,

    /// Low-funds notification threshold
    #[arg(
        long = "low-funds-limit",
        value_name = "AMOUNT",
        env = "MONEY_ENGINE_LOW_FUNDS_LIMIT",
        help = "Threshold below which users are notified (default: 500)"
    )]
    pub low_funds_limit: Option<Decimal>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// `BatchConfig::new` with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the account limits from CLI arguments or environment
    pub fn to_account_limits(&self) -> AccountLimits {
        let default = AccountLimits::default();
        AccountLimits::new(
            self.pay_in_limit.unwrap_or(default.pay_in_limit),
            self.low_funds_limit.unwrap_or(default.low_funds_limit),
        )
    }
}
