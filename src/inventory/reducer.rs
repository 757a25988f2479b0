use crate::inventory::intent::InventoryIntent;
use crate::inventory::state::InventoryState;
use crate::mvi::Reducer;

pub struct InventoryReducer;

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Intent = InventoryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            InventoryIntent::ListingStarted { token, query } => InventoryState {
                loading: true,
                error: None,
                query,
                listing_token: token,
                ..state
            },
            InventoryIntent::ListingLoaded { token, items } => {
                if token != state.listing_token {
                    // Superseded by a newer list request
                    return state;
                }
                InventoryState {
                    items,
                    loading: false,
                    ..state
                }
            }
            InventoryIntent::ListingFailed { token, message } => {
                if token != state.listing_token {
                    return state;
                }
                InventoryState {
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
            InventoryIntent::ListingAbandoned { token } => {
                if token != state.listing_token {
                    return state;
                }
                InventoryState {
                    loading: false,
                    ..state
                }
            }
            InventoryIntent::Created { record } => {
                let mut items = state.items;
                items.retain(|r| r.id != record.id);
                items.insert(0, record);
                InventoryState {
                    items,
                    error: None,
                    ..state
                }
            }
            InventoryIntent::Updated { record } => {
                let mut items = state.items;
                if let Some(slot) = items.iter_mut().find(|r| r.id == record.id) {
                    *slot = record;
                }
                InventoryState {
                    items,
                    error: None,
                    ..state
                }
            }
            InventoryIntent::Deleted { id } => {
                let mut items = state.items;
                items.retain(|r| r.id != id);
                InventoryState {
                    items,
                    error: None,
                    ..state
                }
            }
            InventoryIntent::ActionFailed { message } => InventoryState {
                error: Some(message),
                ..state
            },
            InventoryIntent::FilterSelected { filter } => InventoryState { filter, ..state },
        }
    }
}
