//! State store for the record list.
//!
//! [`Inventory`] runs remote calls and feeds their outcomes through
//! [`InventoryReducer`]; [`InventoryState`] is what the list view renders.

mod error;
mod intent;
mod reducer;
mod state;
mod store;

pub use error::SubmitError;
pub use intent::InventoryIntent;
pub use reducer::InventoryReducer;
pub use state::InventoryState;
pub use store::Inventory;
