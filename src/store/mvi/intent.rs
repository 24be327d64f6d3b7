//! Base trait for intents (requests and outcomes).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User requests (log in, load a page, delete a product)
/// - Effect outcomes (API succeeded or failed)
/// - Pure UI changes (set filter, clear error)
pub trait Intent: Clone + std::fmt::Debug + Send + 'static {}
