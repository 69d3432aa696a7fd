use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::dto::contact_dto::ContactPayload;
use crate::model::contact::ContactRecord;
use crate::repository::contact_repo::ContactRepository;
use crate::util::email::ContactNotifier;
use crate::util::error::ServiceError;

/// Terminal outcome of the persist-then-notify saga.
///
/// Persistence is the durability-critical step: notification runs only after
/// a successful write, and its failure leaves the record stored. Each step is
/// attempted exactly once.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Stored and the operator was notified.
    Persisted(ContactRecord),
    /// Stored, but the notification send failed; requires operator follow-up
    /// via the read-back endpoint.
    PersistedNotNotified(ContactRecord),
    /// Nothing was stored; the submission is lost.
    PersistFailed(ServiceError),
}

#[async_trait]
pub trait ContactService: Send + Sync {
    /// Run the persist-then-notify saga for an already-validated payload.
    async fn submit_contact(&self, payload: ContactPayload) -> SubmissionOutcome;
    /// All stored submissions, most recent first.
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ServiceError>;
}

pub struct ContactServiceImpl {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub notifier: Arc<dyn ContactNotifier>,
}

impl ContactServiceImpl {
    pub fn new(contact_repo: Arc<dyn ContactRepository>, notifier: Arc<dyn ContactNotifier>) -> Self {
        ContactServiceImpl {
            contact_repo,
            notifier,
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, payload), fields(nombre = %payload.name))]
    async fn submit_contact(&self, payload: ContactPayload) -> SubmissionOutcome {
        info!("Registering new contact submission");

        let record = ContactRecord {
            id: None,
            nombre: payload.name,
            correo: payload.email,
            celular: payload.celular,
            mensaje: payload.message,
            creado_el: None,
        };

        let stored = match self.contact_repo.create(record).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Failed to persist contact submission: {e}");
                return SubmissionOutcome::PersistFailed(ServiceError::from(e));
            }
        };

        match self.notifier.notify_contact(&stored).await {
            Ok(()) => {
                info!("Contact submission stored and operator notified");
                SubmissionOutcome::Persisted(stored)
            }
            Err(e) => {
                // The record is durable; only the alert was lost.
                warn!("Contact stored but notification failed: {e}");
                SubmissionOutcome::PersistedNotNotified(stored)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ServiceError> {
        info!("Listing contact submissions");
        let res = self.contact_repo.list_recent().await;
        match &res {
            Ok(records) => info!("Fetched {} contact submissions", records.len()),
            Err(e) => error!("Failed to list contact submissions: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
