//! Model-View-Intent primitives shared by every state slice.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Selector ──→ View
//!    ↑          │                                 │
//!    │          └──→ Effect ──→ HTTP ──┐          │
//!    └─────────────────────────────────┴──────────┘
//! ```
//!
//! - **State**: plain data, replaced wholesale on every transition
//! - **Intent**: a request from the view or an outcome from an effect
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
