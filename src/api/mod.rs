pub mod client;
pub mod models;
pub mod records;

pub use client::ApiClient;
pub use models::{ContactFields, ContactRecord, NewContact};
pub use records::{AirtableTable, RecordStore};
