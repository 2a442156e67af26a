//! Row-store boundary.
//!
//! The dashboard talks to two collections through [`RowStore`]: filtered
//! reads and upsert-by-key. The browser build plugs in a PostgREST client;
//! tests use [`MemoryStore`].

pub mod error;
pub mod memory;
pub mod ops;
pub mod query;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use query::{OrderBy, RangeFilter, RowQuery, TextSearch};

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Rfps,
    Inventory,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Rfps => "rfps",
            Collection::Inventory => "inventory",
        }
    }
}

#[async_trait(?Send)]
pub trait RowStore {
    async fn read_rows(&self, query: &RowQuery) -> Result<Vec<Value>, StoreError>;

    /// Insert-or-replace keyed on `key_column`.
    async fn upsert_row(
        &self,
        collection: Collection,
        key_column: &str,
        record: Value,
    ) -> Result<(), StoreError>;
}
