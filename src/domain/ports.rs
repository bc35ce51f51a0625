use crate::domain::client::Client;
use crate::utils::error::Result;

/// Whole-record persistence keyed by client identifier. Reads and writes are
/// blocking and last-writer-wins.
pub trait RecordStore {
    /// Fails with `NotFoundError` when no record exists for `client_id`.
    fn load(&self, client_id: &str) -> Result<Client>;
    fn save(&self, client: &Client) -> Result<()>;
    fn exists(&self, client_id: &str) -> Result<bool>;
}
