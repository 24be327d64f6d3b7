//! Text views over the store: rendering, confirmation, filter input and
//! the list controller.

mod controller;
mod dialog;
mod filters;
mod render;

pub use controller::ListController;
pub use dialog::ConfirmDialog;
pub use filters::{debounce_filters, FilterEdit, FilterForm};
pub use render::{
    active_filters, empty_state, notification, pagination_summary, product_card, product_detail,
    product_list,
};
