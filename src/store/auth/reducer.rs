use crate::api::AuthResponse;
use crate::store::auth::intent::AuthIntent;
use crate::store::auth::state::AuthState;
use crate::store::mvi::Reducer;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Login { .. } | AuthIntent::Register { .. } => AuthState {
                loading: true,
                error: None,
                ..state
            },
            AuthIntent::LoginSucceeded { response }
            | AuthIntent::RegisterSucceeded { response } => authenticated(response),
            AuthIntent::LoginFailed { error } | AuthIntent::RegisterFailed { error } => {
                AuthState {
                    error: Some(error),
                    ..AuthState::default()
                }
            }
            AuthIntent::Logout | AuthIntent::SessionInvalid => AuthState::default(),
            // Rehydration is decided by the effect; it answers with
            // `SetUser` or `SessionInvalid`.
            AuthIntent::Initialize => state,
            AuthIntent::SetUser { user, token } => AuthState {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                ..state
            },
            AuthIntent::ClearError => AuthState {
                error: None,
                ..state
            },
        }
    }
}

fn authenticated(response: AuthResponse) -> AuthState {
    AuthState {
        user: Some(response.user),
        token: Some(response.access_token),
        is_authenticated: true,
        loading: false,
        error: None,
    }
}
