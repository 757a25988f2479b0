use crate::mvi::Intent;
use crate::record::Record;
use crate::view::StatusFilter;

#[derive(Debug, Clone)]
pub enum InventoryIntent {
    /// A list request went out. `query` is the search text, `None` for the
    /// full list.
    ListingStarted { token: u64, query: Option<String> },
    ListingLoaded { token: u64, items: Vec<Record> },
    ListingFailed { token: u64, message: String },
    /// The list request was dropped before it finished.
    ListingAbandoned { token: u64 },
    Created { record: Record },
    Updated { record: Record },
    Deleted { id: String },
    /// A write, lookup or form submission failed.
    ActionFailed { message: String },
    FilterSelected { filter: StatusFilter },
}

impl Intent for InventoryIntent {}
