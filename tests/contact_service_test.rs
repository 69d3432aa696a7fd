use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use foreverus_backend::dto::contact_dto::ContactPayload;
use foreverus_backend::model::contact::ContactRecord;
use foreverus_backend::repository::contact_repo::ContactRepository;
use foreverus_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use foreverus_backend::service::contact_service::{
    ContactService, ContactServiceImpl, SubmissionOutcome,
};
use foreverus_backend::util::email::{ContactNotifier, EmailError};

struct FakeRepo {
    create_calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl ContactRepository for FakeRepo {
    async fn create(&self, record: ContactRecord) -> RepositoryResult<ContactRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::database("write failed"));
        }
        let mut stored = record;
        stored.id = Some(bson::oid::ObjectId::new());
        stored.creado_el = Some(chrono::Utc::now().to_rfc3339());
        Ok(stored)
    }

    async fn list_recent(&self) -> RepositoryResult<Vec<ContactRecord>> {
        Ok(Vec::new())
    }
}

struct FakeNotifier {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl ContactNotifier for FakeNotifier {
    async fn notify_contact(&self, _record: &ContactRecord) -> Result<(), EmailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(EmailError::SmtpError("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

fn service(
    repo_fails: bool,
    notifier_fails: bool,
) -> (ContactServiceImpl, Arc<FakeRepo>, Arc<FakeNotifier>) {
    let repo = Arc::new(FakeRepo {
        create_calls: AtomicUsize::new(0),
        fail: repo_fails,
    });
    let notifier = Arc::new(FakeNotifier {
        calls: AtomicUsize::new(0),
        fail: notifier_fails,
    });
    (
        ContactServiceImpl::new(repo.clone(), notifier.clone()),
        repo,
        notifier,
    )
}

fn payload() -> ContactPayload {
    ContactPayload {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        celular: "5544332211".to_string(),
        message: "Quiero más información".to_string(),
    }
}

#[tokio::test]
async fn test_both_steps_succeed() {
    let (service, repo, notifier) = service(false, false);

    let outcome = service.submit_contact(payload()).await;
    let record = match outcome {
        SubmissionOutcome::Persisted(record) => record,
        other => panic!("expected Persisted, got {:?}", other),
    };

    assert_eq!(record.nombre, "Ana");
    assert_eq!(record.correo, "ana@example.com");
    assert!(record.id.is_some());
    assert!(record.creado_el.is_some());
    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_persist_failure_is_terminal() {
    let (service, repo, notifier) = service(true, false);

    let outcome = service.submit_contact(payload()).await;
    assert!(matches!(outcome, SubmissionOutcome::PersistFailed(_)));

    // Persistence is a precondition for notification
    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_notify_failure_keeps_record() {
    let (service, repo, notifier) = service(false, true);

    let outcome = service.submit_contact(payload()).await;
    let record = match outcome {
        SubmissionOutcome::PersistedNotNotified(record) => record,
        other => panic!("expected PersistedNotNotified, got {:?}", other),
    };

    assert!(record.creado_el.is_some());
    // Single-shot semantics: one write, one send attempt, no retries
    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}
