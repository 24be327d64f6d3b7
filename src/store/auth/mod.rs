//! Authentication slice.

mod intent;
mod reducer;
pub mod selectors;
mod state;

pub use intent::AuthIntent;
pub use reducer::AuthReducer;
pub use state::AuthState;
