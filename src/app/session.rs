use crate::core::RecordStore;
use crate::domain::client::{Client, ClientProfile};
use crate::domain::loan::{Loan, LoanApplication, DEFAULT_CURRENCY_PREFIX};
use crate::domain::receipt::Receipt;
use crate::utils::error::{LendingError, Result};

/// The operations an office clerk performs, bound to one record store for the
/// lifetime of a run.
pub struct Session<S: RecordStore> {
    store: S,
    currency_prefix: String,
    registered: Vec<String>,
}

impl<S: RecordStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self::with_currency(store, DEFAULT_CURRENCY_PREFIX)
    }

    pub fn with_currency(store: S, currency_prefix: impl Into<String>) -> Self {
        Self {
            store,
            currency_prefix: currency_prefix.into(),
            registered: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn currency_prefix(&self) -> &str {
        &self.currency_prefix
    }

    /// Identifiers of clients registered during this session, oldest first.
    pub fn registered_clients(&self) -> &[String] {
        &self.registered
    }

    /// Validates and persists a new client. An identifier that already has a
    /// record is refused so an existing client is never overwritten.
    pub fn register_client(&mut self, client_id: &str, profile: ClientProfile) -> Result<Client> {
        let client = Client::register(client_id, profile)?;
        if self.store.exists(client.client_id())? {
            return Err(LendingError::AlreadyExistsError {
                client_id: client.client_id().to_string(),
            });
        }

        self.store.save(&client)?;
        self.registered.push(client.client_id().to_string());
        tracing::info!(
            client_id = %client.client_id(),
            "Registered client {}",
            client.profile().full_name()
        );
        Ok(client)
    }

    pub fn load_client(&self, client_id: &str) -> Result<Client> {
        self.store.load(client_id)
    }

    pub fn save_client(&self, client: &Client) -> Result<()> {
        self.store.save(client)
    }

    /// Issues a loan to `client`. Nothing is written until `save_client`.
    pub fn register_loan<'c>(
        &self,
        client: &'c mut Client,
        application: LoanApplication,
    ) -> Result<&'c Loan> {
        let loan = client.issue_loan(application)?;
        tracing::info!(
            loan_id = %loan.loan_id(),
            "Total owed: {}{:.2}, installment: {}{:.2}",
            self.currency_prefix,
            loan.total_owed(),
            self.currency_prefix,
            loan.installment()
        );
        Ok(loan)
    }

    /// Applies a payment and returns the loan's new balance.
    pub fn apply_payment(&self, client: &mut Client, loan_id: &str, amount: f64) -> Result<f64> {
        client.loan_mut(loan_id)?.apply_payment(amount)
    }

    /// Pays toward the loan added last, which is the one just issued even when
    /// an older loan shares its number.
    pub fn pay_latest_loan(&self, client: &mut Client, amount: f64) -> Result<f64> {
        let client_id = client.client_id().to_string();
        match client.last_loan_mut() {
            Some(loan) => loan.apply_payment(amount),
            None => Err(LendingError::LoanNotFoundError {
                client_id,
                loan_id: String::new(),
            }),
        }
    }

    pub fn issue_receipt(&self, client: &Client, loan_id: &str, date: &str) -> Result<Receipt> {
        if client.loans().is_empty() {
            return Err(LendingError::LoanNotFoundError {
                client_id: client.client_id().to_string(),
                loan_id: loan_id.to_string(),
            });
        }
        Receipt::for_loan(client, loan_id, date, &self.currency_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FileRecordStore;
    use crate::core::labels::LEGACY_LABELS;
    use crate::domain::client::tests::{sample_application, sample_profile};
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir) -> Session<FileRecordStore> {
        Session::new(FileRecordStore::new(temp_dir.path(), "txt", &LEGACY_LABELS))
    }

    #[test]
    fn test_register_persists_and_refuses_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);

        session.register_client("C-1", sample_profile()).unwrap();
        assert!(session.store().exists("C-1").unwrap());
        assert_eq!(session.registered_clients(), &["C-1".to_string()]);

        let err = session.register_client("C-1", sample_profile()).unwrap_err();
        assert!(matches!(err, LendingError::AlreadyExistsError { .. }));
        assert_eq!(session.registered_clients().len(), 1);
    }

    #[test]
    fn test_invalid_profile_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);

        let mut profile = sample_profile();
        profile.mobile = "12345".to_string();
        assert!(session.register_client("C-1", profile).is_err());
        assert!(!session.store().exists("C-1").unwrap());
    }

    #[test]
    fn test_loan_lifecycle_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        session.register_client("C-1", sample_profile()).unwrap();

        let mut client = session.load_client("C-1").unwrap();
        session.register_loan(&mut client, sample_application("L-1", 10000.0)).unwrap();
        assert_eq!(session.apply_payment(&mut client, "L-1", 5000.0).unwrap(), 11000.0);
        session.save_client(&client).unwrap();

        let mut reloaded = session.load_client("C-1").unwrap();
        let loan = reloaded.loan("L-1").unwrap();
        assert_eq!(loan.balance(), 11000.0);
        assert!(loan.payments().is_empty());

        let err = session.apply_payment(&mut reloaded, "L-1", 20000.0).unwrap_err();
        assert!(matches!(err, LendingError::InsufficientBalanceError { .. }));
        assert_eq!(reloaded.loan("L-1").unwrap().balance(), 11000.0);
    }

    #[test]
    fn test_payment_at_issue_reaches_new_loan_with_reused_number() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        let mut client = session.register_client("C-1", sample_profile()).unwrap();

        let err = session.pay_latest_loan(&mut client, 10.0).unwrap_err();
        assert!(matches!(err, LendingError::LoanNotFoundError { .. }));

        session.register_loan(&mut client, sample_application("L-1", 1000.0)).unwrap();
        session.register_loan(&mut client, sample_application("L-1", 5000.0)).unwrap();
        assert_eq!(session.pay_latest_loan(&mut client, 100.0).unwrap(), 7900.0);

        assert_eq!(client.loans()[0].balance(), 1600.0);
        assert_eq!(client.loans()[1].balance(), 7900.0);
    }

    #[test]
    fn test_receipt_requires_loans() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        let client = session.register_client("C-1", sample_profile()).unwrap();

        assert!(matches!(
            session.issue_receipt(&client, "L-1", "05/03/2024"),
            Err(LendingError::LoanNotFoundError { .. })
        ));
    }
}
