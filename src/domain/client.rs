use crate::domain::loan::{Loan, LoanApplication};
use crate::utils::error::{LendingError, Result};
use crate::utils::validation::{
    validate_email, validate_identifier, validate_non_empty, validate_phone, validate_single_line,
    Validate,
};
use serde::{Deserialize, Serialize};

/// Contact fields of a client, in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub surname: String,
    pub address: String,
    pub sector: String,
    pub province: String,
    pub phone: String,
    pub mobile: String,
    pub email: String,
}

impl ClientProfile {
    /// Field names paired with values, in the order they are stored.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("surname", self.surname.as_str()),
            ("address", self.address.as_str()),
            ("sector", self.sector.as_str()),
            ("province", self.province.as_str()),
            ("phone", self.phone.as_str()),
            ("mobile", self.mobile.as_str()),
            ("email", self.email.as_str()),
        ]
    }

    /// Surrounding whitespace would not survive a save/load cycle.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            address: self.address.trim().to_string(),
            sector: self.sector.trim().to_string(),
            province: self.province.trim().to_string(),
            phone: self.phone.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl Validate for ClientProfile {
    fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            validate_single_line(field, value)?;
        }
        validate_non_empty("name", &self.name)?;
        validate_non_empty("surname", &self.surname)?;
        validate_non_empty("address", &self.address)?;
        validate_non_empty("sector", &self.sector)?;
        validate_non_empty("province", &self.province)?;
        validate_phone("phone", &self.phone)?;
        validate_phone("mobile", &self.mobile)?;
        validate_email("email", &self.email)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    client_id: String,
    #[serde(flatten)]
    profile: ClientProfile,
    loans: Vec<Loan>,
}

impl Client {
    /// Registers a new client after checking the identifier and every
    /// contact field.
    pub fn register(client_id: impl Into<String>, profile: ClientProfile) -> Result<Self> {
        let client_id = client_id.into();
        validate_identifier("client id", &client_id)?;
        let profile = profile.trimmed();
        profile.validate()?;
        Ok(Self::from_parts(client_id, profile, Vec::new()))
    }

    /// Assembles a client from already-trusted parts, as read back from a record.
    pub fn from_parts(client_id: String, profile: ClientProfile, loans: Vec<Loan>) -> Self {
        Self {
            client_id,
            profile,
            loans,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn profile(&self) -> &ClientProfile {
        &self.profile
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Appends a loan. Loan numbers are not checked for uniqueness; lookups
    /// resolve to the first loan with a matching number.
    pub fn add_loan(&mut self, loan: Loan) -> &Loan {
        if self.find_loan(loan.loan_id()).is_some() {
            tracing::warn!(
                client_id = %self.client_id,
                loan_id = %loan.loan_id(),
                "loan number already used by this client"
            );
        }
        self.loans.push(loan);
        &self.loans[self.loans.len() - 1]
    }

    pub fn issue_loan(&mut self, application: LoanApplication) -> Result<&Loan> {
        let loan = Loan::issue(application)?;
        Ok(self.add_loan(loan))
    }

    pub fn find_loan(&self, loan_id: &str) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.loan_id() == loan_id)
    }

    pub fn loan_mut(&mut self, loan_id: &str) -> Result<&mut Loan> {
        let client_id = &self.client_id;
        self.loans
            .iter_mut()
            .find(|loan| loan.loan_id() == loan_id)
            .ok_or_else(|| LendingError::LoanNotFoundError {
                client_id: client_id.clone(),
                loan_id: loan_id.to_string(),
            })
    }

    /// The most recently added loan, whatever its number.
    pub fn last_loan_mut(&mut self) -> Option<&mut Loan> {
        self.loans.last_mut()
    }

    pub fn loan(&self, loan_id: &str) -> Result<&Loan> {
        self.find_loan(loan_id)
            .ok_or_else(|| LendingError::LoanNotFoundError {
                client_id: self.client_id.clone(),
                loan_id: loan_id.to_string(),
            })
    }

    pub fn total_balance(&self) -> f64 {
        self.loans.iter().map(Loan::balance).sum()
    }
}
