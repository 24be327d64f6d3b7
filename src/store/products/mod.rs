//! Product catalog slice.

mod intent;
mod reducer;
pub mod selectors;
mod state;

pub use intent::ProductsIntent;
pub use reducer::ProductsReducer;
pub use state::ProductState;
