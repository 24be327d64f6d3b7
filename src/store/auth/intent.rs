use crate::api::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum AuthIntent {
    Login { credentials: LoginRequest },
    LoginSucceeded { response: AuthResponse },
    LoginFailed { error: String },
    Register { user_data: RegisterRequest },
    RegisterSucceeded { response: AuthResponse },
    RegisterFailed { error: String },
    /// User asked to log out. Clears storage, navigates to login.
    Logout,
    /// Rehydrate from storage at startup.
    Initialize,
    /// Restored a stored session whose token is still live.
    SetUser { user: User, token: String },
    /// Startup found no usable session. Same state effect as `Logout`,
    /// without the "session closed" notification.
    SessionInvalid,
    ClearError,
}

impl Intent for AuthIntent {}
