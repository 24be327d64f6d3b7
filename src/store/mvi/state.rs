//! Base trait for state slices.

/// Marker trait for state slices.
///
/// States should be:
/// - Cloneable (views receive snapshots)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (the value at application start)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
