//! Model-View-Intent primitives for the state store.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Remote calls happen outside the reducer; their outcomes come back in as
//! intents, so every state change is a pure transition.

/// Marker trait for view-model state.
///
/// States are cloned to snapshot them and compared to detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Marker trait for user actions and remote-call outcomes.
pub trait Intent: Send + 'static {}

/// The only place where state transitions happen.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// `(State, Intent) -> State`, with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
