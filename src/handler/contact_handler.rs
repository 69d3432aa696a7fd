use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{error, info, warn};

use crate::dto::contact_dto::{ContactRequest, SubmitContactResponse};
use crate::service::contact_service::{ContactService, ContactServiceImpl, SubmissionOutcome};
use crate::util::error::HandlerError;
use crate::validation::validate_all;

/// POST /api/contact
///
/// The trust boundary: the payload is re-validated here no matter what the
/// client claims to have checked. A filled honeypot fails like any other
/// field so automated callers learn nothing from the response shape.
pub async fn submit_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Json(request): Json<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[submit_contact_handler] Handler called");

    if let Err(fields) = validate_all(&request) {
        warn!("[submit_contact_handler] Invalid submission: {:?}", fields.keys());
        return Err(HandlerError::validation("Datos inválidos", fields));
    }

    match service.submit_contact(request.into_payload()).await {
        SubmissionOutcome::Persisted(record) => Ok(Json(SubmitContactResponse {
            success: true,
            data: record,
            email: "sent".to_string(),
        })),
        SubmissionOutcome::PersistedNotNotified(_) => Err(HandlerError::internal(
            "Guardado, pero falló el envío del correo.",
        )),
        SubmissionOutcome::PersistFailed(e) => {
            error!("[submit_contact_handler] Persistence failed: {e}");
            Err(HandlerError::internal("Error al guardar en BD"))
        }
    }
}

/// GET /api/getContactos
///
/// Read-back for the operator: every stored submission, most recent first.
pub async fn list_contactos_handler(
    State(service): State<Arc<ContactServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let contactos = service.list_contacts().await.map_err(|e| {
        error!("[list_contactos_handler] Failed to list contacts: {e}");
        HandlerError::internal("Error al consultar la base de datos")
    })?;
    Ok(Json(contactos))
}

/// Fallback for requests hitting a known route with the wrong method.
/// No side effects: the datastore is never touched.
pub async fn method_not_allowed_handler() -> HandlerError {
    HandlerError::method_not_allowed("Método no permitido")
}
