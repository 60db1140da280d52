//! Authentication route handlers.
//!
//! Handles demo login, registration, and logout against the session store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use super::NavView;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::middleware::auth::LOGIN_PATH;
use crate::state::AppState;

/// Where shoppers land after signing in.
const DASHBOARD_PATH: &str = "/dashboard";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
    pub email: String,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: NavView,
    pub name: String,
    pub email: String,
    pub errors: FieldErrors,
}

/// Display the login page.
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    LoginTemplate {
        nav: NavView::from_state(&state),
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let mut stores = state.stores();
    match stores.session.login(form.email.trim(), &form.password) {
        Ok(identity) => {
            set_sentry_user(&identity.id, Some(identity.email.as_str()));
            Redirect::to(DASHBOARD_PATH).into_response()
        }
        Err(e) => LoginTemplate {
            nav: NavView::from_stores(&stores),
            email: form.email,
            error: Some(e.to_string()),
        }
        .into_response(),
    }
}

/// Display the registration page.
pub async fn register_page(State(state): State<AppState>) -> impl IntoResponse {
    RegisterTemplate {
        nav: NavView::from_state(&state),
        name: String::new(),
        email: String::new(),
        errors: FieldErrors::new(),
    }
}

/// Handle registration form submission.
#[instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let mut stores = state.stores();
    match form.validate() {
        Ok(email) => {
            let identity = stores.session.register(&form.name, email, &form.password);
            set_sentry_user(&identity.id, Some(identity.email.as_str()));
            Redirect::to(DASHBOARD_PATH).into_response()
        }
        Err(errors) => RegisterTemplate {
            nav: NavView::from_stores(&stores),
            name: form.name,
            email: form.email,
            errors,
        }
        .into_response(),
    }
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.stores().session.logout();
    clear_sentry_user();
    Redirect::to(LOGIN_PATH)
}
