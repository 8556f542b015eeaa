use crate::backend::models::ContactMessage;
use crate::forms::{ContactForm, Validate};
use crate::web::{AppError, AppState, render};
use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::get,
};
use serde::Serialize;
use tracing::{error, info};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", get(show).post(submit))
}

#[derive(Serialize, Default)]
struct ContactPage {
    form: ContactForm,
    success: Option<&'static str>,
    error: Option<String>,
}

fn render_page(page: &ContactPage) -> Result<Html<String>, AppError> {
    render::page("contact", "Contact", "/contact", page)
}

async fn show() -> Result<Html<String>, AppError> {
    render_page(&ContactPage::default())
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>, AppError> {
    if let Err(err) = form.validate() {
        return render_page(&ContactPage {
            form,
            success: None,
            error: Some(err.to_string()),
        });
    }

    match state.backend.send_contact(&ContactMessage::from(&form)).await {
        Ok(()) => {
            info!("Contact message sent");
            render_page(&ContactPage {
                form: ContactForm::default(),
                success: Some(SENT_MESSAGE),
                error: None,
            })
        }
        Err(err) => {
            error!(error = %err, "Failed to send contact message");
            render_page(&ContactPage {
                form,
                success: None,
                error: Some(FAILED_MESSAGE.to_string()),
            })
        }
    }
}
