use anyhow::Context;
use clap::Parser;
use lending_records::config::cli::{Cli, Command};
use lending_records::utils::error::ErrorSeverity;
use lending_records::utils::logger;
use lending_records::utils::validation::{Validate, DATE_FORMAT};
use lending_records::{AppConfig, FileRecordStore, LendingError, Session};

fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = execute(cli) {
        let exit_code = report(&e);
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    let store = FileRecordStore::from_config(&config.storage);
    tracing::debug!("Using records directory {}", store.base_path().display());
    let mut session = Session::with_currency(store, config.display.currency_prefix.clone());

    run(&mut session, cli.command)?;
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let (config_path, explicit) = cli.config_path();
    let mut config = AppConfig::load(&config_path, explicit)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Prints the failure for the clerk and returns the process exit code.
fn report(err: &anyhow::Error) -> i32 {
    let Some(e) = err.downcast_ref::<LendingError>() else {
        tracing::error!("❌ Command failed: {:#}", err);
        eprintln!("❌ {:#}", err);
        return 1;
    };

    tracing::error!(
        "❌ Command failed: {:#} (Category: {:?}, Severity: {:?})",
        err,
        e.category(),
        e.severity()
    );

    // Context layers (config loading) lead the message.
    if err.chain().count() > 1 {
        eprintln!("❌ {}: {}", err, e.user_friendly_message());
    } else {
        eprintln!("❌ {}", e.user_friendly_message());
    }
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 使用者可修正的錯誤
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn run(session: &mut Session<FileRecordStore>, command: Command) -> Result<(), LendingError> {
    match command {
        Command::RegisterClient(args) => {
            let client = session.register_client(args.id.trim(), args.profile())?;
            println!(
                "Client registered: {} (client ID: {})",
                client.profile().full_name(),
                client.client_id()
            );
        }
        Command::IssueLoan(args) => {
            let mut client = session.load_client(&args.client)?;
            let prefix = session.currency_prefix().to_string();

            let loan = session.register_loan(&mut client, args.application())?;
            println!("Total owed: {}{:.2}", prefix, loan.total_owed());
            println!("Monthly installment: {}{:.2}", prefix, loan.installment());

            // Payments go to the loan just issued, even if an older loan
            // shares its number. A rejected payment still keeps the loan and
            // earlier payments.
            let mut rejected = None;
            for amount in &args.payments {
                match session.pay_latest_loan(&mut client, *amount) {
                    Ok(_) => {
                        if let Some(loan) = client.loans().last() {
                            println!("{}", loan.format_balance_with(&prefix));
                        }
                    }
                    Err(e) => {
                        rejected = Some(e);
                        break;
                    }
                }
            }

            session.save_client(&client)?;
            if let Some(e) = rejected {
                return Err(e);
            }
        }
        Command::Pay(args) => {
            let mut client = session.load_client(&args.client)?;
            session.apply_payment(&mut client, &args.loan, args.amount)?;
            session.save_client(&client)?;
            println!(
                "{}",
                client
                    .loan(&args.loan)?
                    .format_balance_with(session.currency_prefix())
            );
        }
        Command::Receipt(args) => {
            let client = session.load_client(&args.client)?;
            let date = args
                .date
                .unwrap_or_else(|| chrono::Local::now().format(DATE_FORMAT).to_string());
            let receipt = session.issue_receipt(&client, &args.loan, &date)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!("{}", receipt);
            }
        }
        Command::Show(args) => {
            let client = session.load_client(&args.client)?;
            println!("{}", serde_json::to_string_pretty(&client)?);
        }
    }
    Ok(())
}
