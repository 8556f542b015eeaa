use crate::backend::models::Credentials;
use crate::forms::{LoginForm, Validate};
use crate::web::{AppError, AppState, Notice, render};
use axum::{
    Form, Router,
    extract::State,
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{info, warn};

pub const LOGIN_FAILED: &str = "Login Failed! Check your credentials.";
pub const TOKEN_COOKIE: &str = "token";

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", get(show).post(submit))
}

#[derive(Serialize, Default)]
struct LoginPage {
    email: String,
    error: Option<String>,
}

fn render_page(page: &LoginPage) -> Result<Html<String>, AppError> {
    render::page("login", "Login", "/login", page)
}

async fn show() -> Result<Html<String>, AppError> {
    render_page(&LoginPage::default())
}

/// RFC 6265 `cookie-octet`s only: no whitespace, quotes, commas,
/// semicolons or backslashes.
fn is_cookie_value(token: &str) -> bool {
    token
        .bytes()
        .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(err) = form.validate() {
        return Ok(render_page(&LoginPage {
            email: form.email,
            error: Some(err.to_string()),
        })?
        .into_response());
    }

    match state.backend.login(&Credentials::from(&form)).await {
        Ok(login) => {
            info!(email = %form.email.trim(), "Login successful");
            let mut response = Redirect::to(&Notice::LoggedIn.redirect_target()).into_response();
            match login.token.filter(|token| !token.is_empty()) {
                Some(token) if is_cookie_value(&token) => {
                    let cookie = format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
                    response
                        .headers_mut()
                        .insert(header::SET_COOKIE, HeaderValue::from_str(&cookie)?);
                }
                Some(_) => warn!("Backend token is not a valid cookie value, not storing it"),
                None => {}
            }
            Ok(response)
        }
        Err(err) => {
            warn!(error = %err, "Login failed");
            let message = err
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            Ok(render_page(&LoginPage {
                email: form.email,
                error: Some(message),
            })?
            .into_response())
        }
    }
}
