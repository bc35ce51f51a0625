use crate::domain::client::Client;
use crate::utils::error::Result;
use crate::utils::validation::validate_date;
use serde::Serialize;
use std::fmt;

/// Detail block handed to the client for one loan on a given date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub client_id: String,
    pub date: String,
    pub full_name: String,
    pub loan_id: String,
    pub principal: f64,
    pub rate: f64,
    pub period_months: u32,
    pub installment: f64,
    pub total_owed: f64,
    pub collateral: String,
    pub balance: f64,
    #[serde(skip)]
    pub currency_prefix: String,
}

impl Receipt {
    pub fn for_loan(
        client: &Client,
        loan_id: &str,
        date: &str,
        currency_prefix: &str,
    ) -> Result<Self> {
        validate_date("receipt date", date)?;
        let loan = client.loan(loan_id)?;

        Ok(Self {
            client_id: client.client_id().to_string(),
            date: date.to_string(),
            full_name: client.profile().full_name(),
            loan_id: loan.loan_id().to_string(),
            principal: loan.principal(),
            rate: loan.rate(),
            period_months: loan.period_months(),
            installment: loan.installment(),
            total_owed: loan.total_owed(),
            collateral: loan.collateral().to_string(),
            balance: loan.balance(),
            currency_prefix: currency_prefix.to_string(),
        })
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = &self.currency_prefix;
        writeln!(f, "--- LOAN DETAILS ---")?;
        writeln!(f, "- Client ID:          {}", self.client_id)?;
        writeln!(f, "- Date:               {}", self.date)?;
        writeln!(f, "- Name:               {}", self.full_name)?;
        writeln!(f, "- Loan number:        {}", self.loan_id)?;
        writeln!(f, "- Principal:          {}{:.2}", cur, self.principal)?;
        writeln!(f, "- Interest rate:      {}%", self.rate)?;
        writeln!(f, "- Period:             {} months", self.period_months)?;
        writeln!(f, "- Installment:        {}{:.2}", cur, self.installment)?;
        writeln!(f, "- Total owed:         {}{:.2}", cur, self.total_owed)?;
        writeln!(f, "- Collateral:         {}", self.collateral)?;
        write!(f, "- Remaining balance:  {}{:.2}", cur, self.balance)
    }
}
