use anyhow::{bail, Result};

use super::{invalid, prompt, stdin_lines};
use crate::cli::Session;
use crate::forms::{LoginForm, RegisterForm};
use crate::store::auth::{selectors, AuthIntent};

fn print_user(session: &Session) {
    session.store().select(|state| {
        println!(
            "Signed in as {} <{}>",
            selectors::user_name(state),
            selectors::user_email(state)
        );
    });
}

pub async fn login(session: &mut Session, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt(&mut stdin_lines(), "Password: ")
            .await?
            .unwrap_or_default(),
    };

    let form = LoginForm { email, password };
    let credentials = match form.to_request() {
        Ok(request) => request,
        Err(errors) => return invalid(errors),
    };

    session.store().dispatch(AuthIntent::Login { credentials });
    session.settle().await.report()?;
    print_user(session);
    Ok(())
}

pub async fn register(
    session: &mut Session,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let form = RegisterForm {
        name,
        email,
        password,
        confirm_password,
    };
    let user_data = match form.to_request() {
        Ok(request) => request,
        Err(errors) => return invalid(errors),
    };

    session.store().dispatch(AuthIntent::Register { user_data });
    session.settle().await.report()?;
    print_user(session);
    Ok(())
}

pub async fn logout(session: &mut Session) -> Result<()> {
    session.store().dispatch(AuthIntent::Logout);
    session.settle().await.report()
}

pub fn whoami(session: &Session) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in");
    }
    print_user(session);
    Ok(())
}
