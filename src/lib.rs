pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::FileRecordStore;
pub use app::Session;
pub use config::AppConfig;
pub use domain::client::{Client, ClientProfile};
pub use domain::loan::{Loan, LoanApplication, LoanSnapshot};
pub use domain::receipt::Receipt;
pub use domain::ports::RecordStore;
pub use utils::error::{LendingError, Result};
