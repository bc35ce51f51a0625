pub mod labels;
pub mod reader;
pub mod writer;

pub use crate::domain::ports::RecordStore;
pub use crate::utils::error::Result;
pub use labels::RecordLabels;
pub use reader::read_record;
pub use writer::{write_record, RecordWriter};
