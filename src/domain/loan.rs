use crate::utils::error::{LendingError, Result};
use crate::utils::validation::{
    validate_loan_number, validate_non_empty, validate_non_negative, validate_positive_period,
    validate_single_line, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_PREFIX: &str = "RD$";

/// Terms of a loan as collected by the input layer, before any math runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_id: String,
    pub principal: f64,
    /// Monthly interest as a percentage, e.g. `5.0` for 5%.
    pub rate: f64,
    pub period_months: u32,
    pub collateral: String,
}

impl Validate for LoanApplication {
    fn validate(&self) -> Result<()> {
        validate_loan_number("loan number", &self.loan_id)?;
        validate_non_negative("principal", self.principal)?;
        validate_non_negative("interest rate", self.rate)?;
        validate_positive_period("period", self.period_months)?;
        validate_non_empty("collateral", &self.collateral)?;
        validate_single_line("collateral", &self.collateral)?;
        Ok(())
    }
}

/// The seven values a client record keeps per loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub loan_id: String,
    pub principal: f64,
    pub rate: f64,
    pub period_months: u32,
    pub collateral: String,
    pub balance: f64,
    pub installment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    loan_id: String,
    principal: f64,
    rate: f64,
    period_months: u32,
    collateral: String,
    interest_total: f64,
    total_owed: f64,
    installment: f64,
    balance: f64,
    payments: Vec<f64>,
}

/// Flat interest: `rate` percent of the principal is charged every month.
fn amortize(principal: f64, rate: f64, period_months: u32) -> (f64, f64, f64) {
    let monthly_interest = principal * (rate / 100.0);
    let interest_total = monthly_interest * f64::from(period_months);
    let total_owed = principal + interest_total;
    let installment = total_owed / f64::from(period_months);
    (interest_total, total_owed, installment)
}

impl Loan {
    /// Validates the application and computes the repayment schedule.
    pub fn issue(application: LoanApplication) -> Result<Self> {
        application.validate()?;

        let (interest_total, total_owed, installment) = amortize(
            application.principal,
            application.rate,
            application.period_months,
        );

        tracing::debug!(
            loan_id = %application.loan_id,
            total_owed,
            installment,
            "issued loan"
        );

        Ok(Self {
            loan_id: application.loan_id,
            principal: application.principal,
            rate: application.rate,
            period_months: application.period_months,
            collateral: application.collateral.trim().to_string(),
            interest_total,
            total_owed,
            installment,
            balance: total_owed,
            payments: Vec::new(),
        })
    }

    /// Rebuilds a loan from a stored snapshot. The stored balance and
    /// installment win over anything recomputed; payment history is not
    /// part of the snapshot and starts empty.
    pub fn restore(snapshot: LoanSnapshot) -> Self {
        let (interest_total, total_owed, _) =
            amortize(snapshot.principal, snapshot.rate, snapshot.period_months);
        Self {
            loan_id: snapshot.loan_id,
            principal: snapshot.principal,
            rate: snapshot.rate,
            period_months: snapshot.period_months,
            collateral: snapshot.collateral,
            interest_total,
            total_owed,
            installment: snapshot.installment,
            balance: snapshot.balance,
            payments: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> LoanSnapshot {
        LoanSnapshot {
            loan_id: self.loan_id.clone(),
            principal: self.principal,
            rate: self.rate,
            period_months: self.period_months,
            collateral: self.collateral.clone(),
            balance: self.balance,
            installment: self.installment,
        }
    }

    /// Applies a payment and returns the new balance. A payment larger than
    /// the balance is rejected and leaves the loan untouched.
    pub fn apply_payment(&mut self, amount: f64) -> Result<f64> {
        validate_non_negative("payment amount", amount)?;

        if amount > self.balance {
            tracing::warn!(
                loan_id = %self.loan_id,
                requested = amount,
                balance = self.balance,
                "payment rejected"
            );
            return Err(LendingError::InsufficientBalanceError {
                loan_id: self.loan_id.clone(),
                requested: amount,
                balance: self.balance,
            });
        }

        self.payments.push(amount);
        self.balance -= amount;
        if self.balance < 0.0 {
            self.balance = 0.0;
        }

        tracing::info!(loan_id = %self.loan_id, amount, balance = self.balance, "payment applied");
        Ok(self.balance)
    }

    pub fn format_balance(&self) -> String {
        self.format_balance_with(DEFAULT_CURRENCY_PREFIX)
    }

    pub fn format_balance_with(&self, currency_prefix: &str) -> String {
        format!("Loan balance: {}{:.2}", currency_prefix, self.balance)
    }

    pub fn loan_id(&self) -> &str {
        &self.loan_id
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn period_months(&self) -> u32 {
        self.period_months
    }

    pub fn collateral(&self) -> &str {
        &self.collateral
    }

    pub fn interest_total(&self) -> f64 {
        self.interest_total
    }

    pub fn total_owed(&self) -> f64 {
        self.total_owed
    }

    pub fn installment(&self) -> f64 {
        self.installment
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Payments applied since this loan was issued or loaded.
    pub fn payments(&self) -> &[f64] {
        &self.payments
    }

    pub fn amount_paid(&self) -> f64 {
        self.payments.iter().sum()
    }

    pub fn is_settled(&self) -> bool {
        self.balance == 0.0
    }
}
