#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn lending(workdir: &Path, args: &[&str]) -> Output {
    let records = workdir.join("clientes");
    Command::new(env!("CARGO_BIN_EXE_lending"))
        .current_dir(workdir)
        .arg("--records-dir")
        .arg(&records)
        .args(args)
        .output()
        .unwrap()
}

fn register(workdir: &Path, id: &str) {
    let output = lending(
        workdir,
        &[
            "register-client",
            "--id",
            id,
            "--name",
            "Luis",
            "--surname",
            "Castillo",
            "--address",
            "Av. Duarte 100",
            "--sector",
            "Villa Consuelo",
            "--province",
            "Distrito Nacional",
            "--phone",
            "8095550303",
            "--mobile",
            "8295550404",
            "--email",
            "luis.castillo@correo.do",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

fn issue(workdir: &Path, client: &str, loan: &str, principal: &str, payments: &[&str]) -> Output {
    let mut args = vec![
        "issue-loan",
        "--client",
        client,
        "--loan",
        loan,
        "--principal",
        principal,
        "--rate",
        "0",
        "--period",
        "1",
        "--collateral",
        "Motor",
    ];
    for amount in payments {
        args.push("--payment");
        args.push(*amount);
    }
    lending(workdir, &args)
}

fn balances(workdir: &Path, client: &str) -> Vec<f64> {
    let output = lending(workdir, &["show", "--client", client]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["loans"]
        .as_array()
        .unwrap()
        .iter()
        .map(|loan| loan["balance"].as_f64().unwrap())
        .collect()
}

#[test]
fn test_issue_payment_reaches_new_loan_with_reused_number() {
    let temp_dir = TempDir::new().unwrap();
    register(temp_dir.path(), "C-10");

    assert!(issue(temp_dir.path(), "C-10", "L1", "1000", &[]).status.success());
    let output = issue(temp_dir.path(), "C-10", "L1", "5000", &["100"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Loan balance: RD$4900.00"));

    assert_eq!(balances(temp_dir.path(), "C-10"), vec![1000.0, 4900.0]);
}

#[test]
fn test_rejected_issue_payment_keeps_loan_and_earlier_payments() {
    let temp_dir = TempDir::new().unwrap();
    register(temp_dir.path(), "C-11");

    let output = issue(temp_dir.path(), "C-11", "L1", "500", &["100", "1000"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(balances(temp_dir.path(), "C-11"), vec![400.0]);
}

#[test]
fn test_exit_codes_follow_severity() {
    let temp_dir = TempDir::new().unwrap();
    register(temp_dir.path(), "C-12");
    assert!(issue(temp_dir.path(), "C-12", "L1", "500", &[]).status.success());

    let output = lending(temp_dir.path(), &["show", "--client", "nobody"]);
    assert_eq!(output.status.code(), Some(2));

    let output = lending(
        temp_dir.path(),
        &["pay", "--client", "C-12", "--loan", "L1", "--amount", "600"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(balances(temp_dir.path(), "C-12"), vec![500.0]);

    let output = lending(
        temp_dir.path(),
        &["--config", "/nonexistent/lending.toml", "show", "--client", "C-12"],
    );
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load configuration"));

    let broken = temp_dir.path().join("broken.toml");
    std::fs::write(&broken, "[storage\nrecords_dir = 1").unwrap();
    let output = lending(
        temp_dir.path(),
        &["--config", broken.to_str().unwrap(), "show", "--client", "C-12"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_register_refuses_existing_record() {
    let temp_dir = TempDir::new().unwrap();
    register(temp_dir.path(), "C-13");

    let output = lending(
        temp_dir.path(),
        &[
            "register-client",
            "--id",
            "C-13",
            "--name",
            "Otro",
            "--surname",
            "Cliente",
            "--address",
            "Calle 1",
            "--sector",
            "Centro",
            "--province",
            "Santiago",
            "--phone",
            "8095550000",
            "--mobile",
            "8295550000",
            "--email",
            "otro@correo.do",
        ],
    );
    assert_eq!(output.status.code(), Some(2));

    let record = std::fs::read_to_string(temp_dir.path().join("clientes/C-13.txt")).unwrap();
    assert!(record.starts_with("Nombre:     Luis\n"));
}
