//! Checkout route handlers.
//!
//! Checkout is two form steps. The delivery form is validated first; the
//! payment form then carries the delivery fields as hidden inputs, so no
//! checkout state lives on the server between the steps.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use pharmacart_core::Price;
use tracing::instrument;

use super::NavView;
use super::cart::TotalsView;
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::forms::{DeliveryForm, FieldErrors, PaymentForm};
use crate::middleware::RequireAuth;
use crate::services::{CheckoutError, place_order};
use crate::state::AppState;

/// Banner shown when the gateway does not approve a payment.
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";

/// Banner shown when a second payment is submitted before the first finishes.
pub const PAYMENT_IN_PROGRESS: &str = "A payment is already in progress. Please wait for it to finish.";

/// Delivery step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/delivery.html")]
pub struct CheckoutTemplate {
    pub nav: NavView,
    pub form: DeliveryForm,
    pub errors: FieldErrors,
    pub totals: TotalsView,
    pub error: Option<&'static str>,
}

/// Payment step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/payment.html")]
pub struct PaymentTemplate {
    pub nav: NavView,
    pub delivery: DeliveryForm,
    pub card_number: String,
    pub expiry: String,
    pub errors: FieldErrors,
    pub totals: TotalsView,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub nav: NavView,
    pub total: String,
    pub email: String,
}

/// Render the delivery step, or send an empty cart back to the cart page.
fn delivery_step(
    state: &AppState,
    form: DeliveryForm,
    errors: FieldErrors,
    error: Option<&'static str>,
) -> Response {
    let stores = state.stores();
    if stores.cart.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        nav: NavView::from_stores(&stores),
        form,
        errors,
        totals: stores.cart.totals().into(),
        error,
    }
    .into_response()
}

/// Render the payment step, or send an empty cart back to the cart page.
fn payment_step(state: &AppState, form: &PaymentForm, errors: FieldErrors) -> Response {
    let stores = state.stores();
    if stores.cart.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    PaymentTemplate {
        nav: NavView::from_stores(&stores),
        delivery: form.delivery.clone(),
        card_number: form.card_number.clone(),
        expiry: form.expiry.clone(),
        errors,
        totals: stores.cart.totals().into(),
    }
    .into_response()
}

/// Display the delivery form, prefilled with the shopper's email.
#[instrument(skip_all, fields(user_id = %identity.id))]
pub async fn show(State(state): State<AppState>, RequireAuth(identity): RequireAuth) -> Response {
    let form = DeliveryForm {
        email: identity.email.to_string(),
        ..DeliveryForm::default()
    };
    delivery_step(&state, form, FieldErrors::new(), None)
}

/// Validate the delivery form and move on to payment.
#[instrument(skip_all, fields(user_id = %identity.id))]
pub async fn submit_delivery(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Form(form): Form<DeliveryForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return delivery_step(&state, form, errors, None);
    }

    let stores = state.stores();
    if stores.cart.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    PaymentTemplate {
        nav: NavView::from_stores(&stores),
        delivery: form,
        card_number: String::new(),
        expiry: String::new(),
        errors: FieldErrors::new(),
        totals: stores.cart.totals().into(),
    }
    .into_response()
}

/// Validate the card, take payment, and record the order.
#[instrument(skip_all, fields(user_id = %identity.id))]
pub async fn pay(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Form(form): Form<PaymentForm>,
) -> Result<Response, AppError> {
    let customer = match form.delivery.validate() {
        Ok(customer) => customer,
        Err(errors) => return Ok(delivery_step(&state, form.delivery, errors, None)),
    };
    if let Err(errors) = form.validate_card() {
        return Ok(payment_step(&state, &form, errors));
    }

    add_breadcrumb("checkout", "Payment submitted", &[]);
    let email = customer.email.to_string();

    match place_order(state.clone(), customer).await {
        Ok(order) => Ok(SuccessTemplate {
            nav: NavView::from_state(&state),
            total: Price::inr(order.total).display(),
            email,
        }
        .into_response()),
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart").into_response()),
        Err(CheckoutError::InProgress) => Ok(delivery_step(
            &state,
            form.delivery,
            FieldErrors::new(),
            Some(PAYMENT_IN_PROGRESS),
        )),
        Err(CheckoutError::Payment(e)) => {
            tracing::warn!(error = %e, "Payment failed");
            Ok(delivery_step(
                &state,
                form.delivery,
                FieldErrors::new(),
                Some(PAYMENT_FAILED),
            ))
        }
        Err(e) => Err(e.into()),
    }
}
