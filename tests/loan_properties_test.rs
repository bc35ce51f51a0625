use lending_records::utils::validation::{is_valid_date, is_valid_email, is_valid_phone};
use lending_records::{LendingError, Loan, LoanApplication};

fn issue(principal: f64, rate: f64, period_months: u32) -> Loan {
    Loan::issue(LoanApplication {
        loan_id: "PROP".to_string(),
        principal,
        rate,
        period_months,
        collateral: "Garantia solidaria".to_string(),
    })
    .unwrap()
}

/// Deterministic spread of inputs; enough variety without a property-testing crate.
fn sample_terms() -> Vec<(f64, f64, u32)> {
    let principals = [0.0, 0.01, 1.0, 99.99, 1500.0, 10000.0, 250_000.5, 7_777_777.77];
    let rates = [0.0, 0.5, 1.0, 2.75, 5.0, 12.0, 33.3];
    let periods = [1, 2, 3, 7, 12, 36, 120, 480];

    let mut terms = Vec::new();
    for &p in &principals {
        for &r in &rates {
            for &n in &periods {
                terms.push((p, r, n));
            }
        }
    }
    terms
}

#[test]
fn test_schedule_identities() {
    for (p, r, n) in sample_terms() {
        let loan = issue(p, r, n);
        let expected_total = p + p * (r / 100.0) * f64::from(n);
        let tolerance = 1e-9 * expected_total.max(1.0);

        assert!((loan.total_owed() - expected_total).abs() <= tolerance, "{p} {r} {n}");
        assert!(
            (loan.installment() * f64::from(n) - loan.total_owed()).abs() <= tolerance,
            "{p} {r} {n}"
        );
        assert_eq!(loan.balance(), loan.total_owed());
    }
}

#[test]
fn test_balance_after_valid_payment_sequences() {
    for (p, r, n) in sample_terms() {
        let mut loan = issue(p, r, n);
        let mut paid = 0.0;
        // Pay a fixed fraction of the remaining balance a few times, then settle.
        for _ in 0..5 {
            let amount = loan.balance() * 0.3;
            loan.apply_payment(amount).unwrap();
            paid += amount;
            assert!(loan.balance() >= 0.0);
            assert!(loan.balance() <= loan.total_owed());
        }
        let expected = loan.total_owed() - paid;
        assert!((loan.balance() - expected).abs() <= 1e-9 * loan.total_owed().max(1.0));

        let rest = loan.balance();
        loan.apply_payment(rest).unwrap();
        assert_eq!(loan.balance(), 0.0);
        assert_eq!(loan.payments().len(), 6);
    }
}

#[test]
fn test_overdraw_changes_nothing() {
    for (p, r, n) in sample_terms().into_iter().filter(|(p, _, _)| *p > 0.0) {
        let mut loan = issue(p, r, n);
        loan.apply_payment(loan.total_owed() / 2.0).unwrap();
        let balance = loan.balance();
        let history = loan.payments().to_vec();

        let err = loan.apply_payment(balance * 1.5 + 0.01).unwrap_err();
        assert!(matches!(err, LendingError::InsufficientBalanceError { .. }));
        assert_eq!(loan.balance(), balance);
        assert_eq!(loan.payments(), history.as_slice());
    }
}

#[test]
fn test_reference_example() {
    let mut loan = issue(10000.0, 5.0, 12);
    assert_eq!(loan.interest_total(), 6000.0);
    assert_eq!(loan.total_owed(), 16000.0);
    assert_eq!(format!("{:.2}", loan.installment()), "1333.33");

    loan.apply_payment(5000.0).unwrap();
    assert_eq!(loan.balance(), 11000.0);
    assert!(loan.apply_payment(20000.0).is_err());
    assert_eq!(loan.balance(), 11000.0);
}

#[test]
fn test_validator_examples() {
    assert!(is_valid_phone("1234567890"));
    assert!(!is_valid_phone("123-456-7890"));
    assert!(!is_valid_phone("12345"));

    assert!(is_valid_email("a@b.com"));
    assert!(!is_valid_email("a@b"));
    assert!(is_valid_email("a.b+c@d-e.co"));

    assert!(is_valid_date("05/03/2024"));
    assert!(!is_valid_date("05/13/2024"));
}
