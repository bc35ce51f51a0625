use crate::config::toml_config::AppConfig;
use crate::domain::client::ClientProfile;
use crate::domain::loan::LoanApplication;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "lending.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "lending")]
#[command(about = "Client and loan records for a lending office")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding one record file per client
    #[arg(long)]
    pub records_dir: Option<String>,

    /// Write records with the original tool's label text
    #[arg(long)]
    pub legacy_labels: Option<bool>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a new client and write its record
    RegisterClient(RegisterClientArgs),
    /// Issue a loan to an existing client, optionally taking initial payments
    IssueLoan(IssueLoanArgs),
    /// Apply a payment to one of a client's loans
    Pay(PayArgs),
    /// Print the receipt for one loan
    Receipt(ReceiptArgs),
    /// Print a client with all loans as JSON
    Show(ShowArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RegisterClientArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub sector: String,
    #[arg(long)]
    pub province: String,
    /// 10 digits, no separators
    #[arg(long)]
    pub phone: String,
    /// 10 digits, no separators
    #[arg(long)]
    pub mobile: String,
    #[arg(long)]
    pub email: String,
}

impl RegisterClientArgs {
    pub fn profile(&self) -> ClientProfile {
        ClientProfile {
            name: self.name.clone(),
            surname: self.surname.clone(),
            address: self.address.clone(),
            sector: self.sector.clone(),
            province: self.province.clone(),
            phone: self.phone.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct IssueLoanArgs {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub loan: String,
    #[arg(long, allow_negative_numbers = true)]
    pub principal: f64,
    /// Monthly interest in percent; a trailing `%` is accepted
    #[arg(long, value_parser = parse_rate, allow_negative_numbers = true)]
    pub rate: f64,
    /// Length of the loan in months
    #[arg(long)]
    pub period: u32,
    #[arg(long)]
    pub collateral: String,
    /// Payment to apply right after issuing; repeat for several
    #[arg(long = "payment", allow_negative_numbers = true)]
    pub payments: Vec<f64>,
}

impl IssueLoanArgs {
    pub fn application(&self) -> LoanApplication {
        LoanApplication {
            loan_id: self.loan.trim().to_string(),
            principal: self.principal,
            rate: self.rate,
            period_months: self.period,
            collateral: self.collateral.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PayArgs {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub loan: String,
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,
}

#[derive(Debug, Clone, Args)]
pub struct ReceiptArgs {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub loan: String,
    /// Receipt date as DD/MM/YYYY; defaults to today
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub client: String,
}

pub fn parse_rate(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().trim_end_matches('%').trim_end();
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a percentage", raw))
}

impl Cli {
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }

    /// Command-line flags win over the configuration file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.records_dir {
            config.storage.records_dir = dir.clone();
            tracing::info!("🔧 Records directory overridden to: {}", dir);
        }
        if let Some(legacy) = self.legacy_labels {
            config.storage.preserve_legacy_labels = legacy;
            tracing::info!("🔧 Legacy labels overridden to: {}", legacy);
        }
    }
}
