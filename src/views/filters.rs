//! Search/category filter input with debouncing.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::api::ProductFilter;

/// Raw filter inputs as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    pub category: String,
}

impl FilterForm {
    pub fn from_filter(filter: &ProductFilter) -> Self {
        Self {
            search: filter.search.clone().unwrap_or_default(),
            category: filter.category.clone().unwrap_or_default(),
        }
    }
}

/// Input to [`debounce_filters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    /// A keystroke-level change, subject to the quiet period.
    Edit(FilterForm),
    /// The filters were applied elsewhere (e.g. cleared). Drops any pending
    /// edit and records `form` as the last forwarded value without sending it.
    Reset(FilterForm),
}

/// Forward the latest edit once `period` passes without another one.
///
/// An edit equal to the last one forwarded is swallowed. The returned
/// channel closes after `edits` closes and any pending edit is flushed.
pub fn debounce_filters(
    mut edits: mpsc::UnboundedReceiver<FilterEdit>,
    period: Duration,
) -> mpsc::UnboundedReceiver<FilterForm> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut pending: Option<FilterForm> = None;
        let mut last_sent: Option<FilterForm> = None;

        loop {
            let next = if pending.is_some() {
                match timeout(period, edits.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        // Quiet period elapsed.
                        if let Some(form) = pending.take() {
                            if !emit(&tx, form, &mut last_sent) {
                                return;
                            }
                        }
                        continue;
                    }
                }
            } else {
                edits.recv().await
            };

            match next {
                Some(FilterEdit::Edit(form)) => pending = Some(form),
                Some(FilterEdit::Reset(form)) => {
                    tracing::debug!("Filter reset");
                    pending = None;
                    last_sent = Some(form);
                }
                None => {
                    if let Some(form) = pending.take() {
                        emit(&tx, form, &mut last_sent);
                    }
                    return;
                }
            }
        }
    });

    rx
}

/// Returns false once the receiver is gone.
fn emit(
    tx: &mpsc::UnboundedSender<FilterForm>,
    form: FilterForm,
    last_sent: &mut Option<FilterForm>,
) -> bool {
    if last_sent.as_ref() == Some(&form) {
        tracing::debug!("Filter unchanged, skipping");
        return true;
    }
    *last_sent = Some(form.clone());
    tx.send(form).is_ok()
}
