//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place where state transitions happen.
///
/// Must be pure: no I/O, no clock, no randomness.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
