use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::contact_handler::{
    list_contactos_handler, method_not_allowed_handler, submit_contact_handler,
};
use crate::service::contact_service::ContactServiceImpl;

/// Public contact routes. Each route accepts exactly one method; anything
/// else falls through to the 405 handler without side effects.
pub fn contact_router(service: Arc<ContactServiceImpl>) -> Router {
    Router::new()
        .route(
            "/api/contact",
            post(submit_contact_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/api/getContactos",
            get(list_contactos_handler).fallback(method_not_allowed_handler),
        )
        .with_state(service)
}
