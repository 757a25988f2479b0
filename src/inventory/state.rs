use crate::mvi::UiState;
use crate::record::Record;
use crate::view::{counts_by_status, filter_by_status, StatusCounts, StatusFilter};

/// Everything the list view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryState {
    /// Server order: newest first.
    pub items: Vec<Record>,
    /// True while the latest list request is outstanding.
    pub loading: bool,
    /// Outcome of the last failed operation; replaced by the next outcome.
    pub error: Option<String>,
    pub filter: StatusFilter,
    /// Active free-text search; `None` means `items` is the full list.
    pub query: Option<String>,
    /// Token of the most recent list request.
    pub listing_token: u64,
}

impl UiState for InventoryState {}

impl InventoryState {
    /// Items after the status filter.
    pub fn visible_items(&self) -> Vec<Record> {
        filter_by_status(&self.items, self.filter)
    }

    /// Tally over every loaded item, ignoring the status filter.
    pub fn counts(&self) -> StatusCounts {
        counts_by_status(&self.items)
    }

    pub fn is_searching(&self) -> bool {
        self.query.is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.items.iter().find(|r| r.id == id)
    }
}
