// Domain layer: clients, loans, receipts and the storage port. No I/O here.

pub mod client;
pub mod loan;
pub mod ports;
pub mod receipt;
