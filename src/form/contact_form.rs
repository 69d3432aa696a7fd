use tracing::{debug, warn};

use crate::dto::contact_dto::{ContactPayload, ContactRequest, FieldErrors};
use crate::form::transport::{SubmissionTransport, TransportError};
use crate::validation::{validate_all, validate_field, Field};

/// Interaction state of the contact form.
///
/// A confirmed success resets the draft and returns the form to `Idle`;
/// `Failed` preserves the draft so the user does not retype, and any edit
/// from there moves back to `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Editing,
    Submitting,
    Failed,
}

/// Why a submit attempt did not reach the network.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A request for this form is already in flight.
    InFlight,
    /// Full validation failed; field errors were surfaced instead.
    Invalid,
}

/// Owns the mutable submission draft and drives the submit lifecycle.
///
/// Client-side validation here is a UX aid only; the endpoint re-validates
/// authoritatively.
pub struct ContactForm<T: SubmissionTransport> {
    transport: T,
    draft: ContactRequest,
    state: FormState,
    field_errors: FieldErrors,
    status: Option<String>,
}

impl<T: SubmissionTransport> ContactForm<T> {
    pub fn new(transport: T) -> Self {
        ContactForm {
            transport,
            draft: ContactRequest::default(),
            state: FormState::Idle,
            field_errors: FieldErrors::new(),
            status: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &ContactRequest {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// User-facing status line, mirroring the page's status paragraph.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Record a keystroke: update the draft field, re-validate just that
    /// field, and move to `Editing`. Ignored while a submit is in flight.
    pub fn set_field(&mut self, field: Field, value: &str) {
        if self.state == FormState::Submitting {
            debug!("Ignoring edit while submitting");
            return;
        }

        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Email => self.draft.email = value.to_string(),
            Field::Celular => self.draft.celular = value.to_string(),
            Field::Message => self.draft.message = value.to_string(),
            Field::Empresa => self.draft.empresa = value.to_string(),
        }

        match validate_field(field, value) {
            Ok(()) => {
                self.field_errors.remove(field.as_str());
            }
            Err(message) => {
                self.field_errors.insert(field.as_str(), message);
            }
        }

        self.state = FormState::Editing;
    }

    /// Start a submit cycle. On success the form is `Submitting` and the
    /// returned payload (honeypot stripped) must be carried by the transport
    /// exactly once; `complete_submit` finishes the cycle.
    pub fn begin_submit(&mut self) -> Result<ContactPayload, SubmitBlocked> {
        if self.state == FormState::Submitting {
            warn!("Submit ignored: a request is already in flight");
            return Err(SubmitBlocked::InFlight);
        }

        if let Err(errors) = validate_all(&self.draft) {
            self.field_errors = errors;
            self.state = FormState::Editing;
            self.status = Some("Por favor revisa los campos marcados.".to_string());
            return Err(SubmitBlocked::Invalid);
        }

        self.field_errors.clear();
        self.state = FormState::Submitting;
        self.status = Some("Enviando...".to_string());
        Ok(self.draft.clone().into_payload())
    }

    /// Finish a submit cycle with the transport's result. Success clears the
    /// draft and returns to `Idle`; failure keeps the draft intact.
    pub fn complete_submit(&mut self, result: Result<(), TransportError>) {
        match result {
            Ok(()) => {
                self.draft = ContactRequest::default();
                self.field_errors.clear();
                self.state = FormState::Idle;
                self.status = Some("¡Mensaje enviado con éxito!".to_string());
            }
            Err(e) => {
                debug!("Submission failed: {e}");
                self.state = FormState::Failed;
                self.status = Some("Ocurrió un error al enviar.".to_string());
            }
        }
    }

    /// Full submit cycle: validate, send once, apply the result.
    pub async fn submit(&mut self) {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(_) => return,
        };
        let result = self.transport.send(&payload).await;
        self.complete_submit(result);
    }
}
