use crate::api::User;
use crate::store::mvi::UiState;

/// `is_authenticated` implies `user` and `token` are both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState for AuthState {}
