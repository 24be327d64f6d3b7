//! Read-only projections of the auth slice.

use crate::api::User;
use crate::store::auth::state::AuthState;
use crate::store::AppState;

pub fn auth_state(state: &AppState) -> &AuthState {
    &state.auth
}

pub fn user(state: &AppState) -> Option<&User> {
    auth_state(state).user.as_ref()
}

pub fn is_authenticated(state: &AppState) -> bool {
    auth_state(state).is_authenticated
}

pub fn auth_loading(state: &AppState) -> bool {
    auth_state(state).loading
}

pub fn auth_error(state: &AppState) -> Option<&str> {
    auth_state(state).error.as_deref()
}

pub fn token(state: &AppState) -> Option<&str> {
    auth_state(state).token.as_deref()
}

/// Display name, or `""` when logged out.
pub fn user_name(state: &AppState) -> &str {
    user(state).map(|u| u.name.as_str()).unwrap_or("")
}

pub fn user_email(state: &AppState) -> &str {
    user(state).map(|u| u.email.as_str()).unwrap_or("")
}
