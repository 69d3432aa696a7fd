use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // for .oneshot()

use foreverus_backend::model::contact::ContactRecord;
use foreverus_backend::repository::contact_repo::ContactRepository;
use foreverus_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use foreverus_backend::router::contact_router::contact_router;
use foreverus_backend::service::contact_service::ContactServiceImpl;
use foreverus_backend::util::email::{ContactNotifier, EmailError};

struct FakeContactRepository {
    records: Mutex<Vec<ContactRecord>>,
    create_calls: AtomicUsize,
    fail: bool,
}

impl FakeContactRepository {
    fn new(fail: bool) -> Self {
        FakeContactRepository {
            records: Mutex::new(Vec::new()),
            create_calls: AtomicUsize::new(0),
            fail,
        }
    }

    fn seed(&self, nombre: &str, creado_el: &str) {
        self.records.lock().unwrap().push(ContactRecord {
            id: Some(bson::oid::ObjectId::new()),
            nombre: nombre.to_string(),
            correo: format!("{}@example.com", nombre.to_lowercase()),
            celular: "5544332211".to_string(),
            mensaje: "Quiero más información".to_string(),
            creado_el: Some(creado_el.to_string()),
        });
    }
}

#[async_trait]
impl ContactRepository for FakeContactRepository {
    async fn create(&self, record: ContactRecord) -> RepositoryResult<ContactRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::database("connection refused"));
        }
        let mut stored = record;
        stored.id = Some(bson::oid::ObjectId::new());
        stored.creado_el = Some(chrono::Utc::now().to_rfc3339());
        self.records.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_recent(&self) -> RepositoryResult<Vec<ContactRecord>> {
        if self.fail {
            return Err(RepositoryError::database("connection refused"));
        }
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.creado_el.cmp(&a.creado_el));
        Ok(records)
    }
}

struct FakeNotifier {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeNotifier {
    fn new(fail: bool) -> Self {
        FakeNotifier {
            calls: AtomicUsize::new(0),
            fail,
        }
    }
}

#[async_trait]
impl ContactNotifier for FakeNotifier {
    async fn notify_contact(&self, _record: &ContactRecord) -> Result<(), EmailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(EmailError::SmtpError("550 rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

fn setup_app(
    repo_fails: bool,
    notifier_fails: bool,
) -> (Router, Arc<FakeContactRepository>, Arc<FakeNotifier>) {
    let repo = Arc::new(FakeContactRepository::new(repo_fails));
    let notifier = Arc::new(FakeNotifier::new(notifier_fails));
    let service = Arc::new(ContactServiceImpl::new(repo.clone(), notifier.clone()));
    (contact_router(service), repo, notifier)
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Ana",
        "email": "ana@example.com",
        "celular": "5544332211",
        "message": "Quiero más información",
        "empresa": ""
    })
}

fn post_contact(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_submission_end_to_end() {
    let (app, repo, notifier) = setup_app(false, false);

    let resp = app.oneshot(post_contact(&valid_body())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email"], "sent");
    assert_eq!(body["data"]["nombre"], "Ana");
    assert_eq!(body["data"]["correo"], "ana@example.com");
    assert_eq!(body["data"]["celular"], "5544332211");
    assert_eq!(body["data"]["mensaje"], "Quiero más información");
    assert!(!body["data"]["creado_el"].is_null());

    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_honeypot_treated_as_empty() {
    let (app, _, _) = setup_app(false, false);

    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("empresa");
    let resp = app.oneshot(post_contact(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_celular_rejected_without_persistence() {
    let (app, repo, notifier) = setup_app(false, false);

    let mut body = valid_body();
    body["celular"] = json!("12a");
    let resp = app.oneshot(post_contact(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Datos inválidos");
    assert!(body["fields"]["celular"].is_string());

    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_filled_honeypot_rejected_like_any_field_error() {
    let (app, repo, _) = setup_app(false, false);

    let mut body = valid_body();
    body["empresa"] = json!("Acme Inc");
    let resp = app.oneshot(post_contact(&body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    // Same shape as any validation failure: nothing hints at the honeypot
    assert_eq!(body["error"], "Datos inválidos");
    assert!(body["fields"]["empresa"].is_string());

    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_persistence_failure_skips_notification() {
    let (app, repo, notifier) = setup_app(true, false);

    let resp = app.oneshot(post_contact(&valid_body())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Error al guardar en BD");

    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_notification_failure_after_persistence() {
    let (app, repo, notifier) = setup_app(false, true);

    let resp = app.oneshot(post_contact(&valid_body())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Guardado, pero falló el envío del correo.");

    // The record was written exactly once and survives the failed send
    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(repo.records.lock().unwrap().len(), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_on_submission_endpoint_returns_405() {
    let (app, repo, _) = setup_app(false, false);

    let req = Request::builder()
        .method("GET")
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Método no permitido");
    assert_eq!(repo.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_post_on_readback_endpoint_returns_405() {
    let (app, _, _) = setup_app(false, false);

    let req = Request::builder()
        .method("POST")
        .uri("/api/getContactos")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_readback_returns_most_recent_first() {
    let (app, repo, _) = setup_app(false, false);
    repo.seed("Ana", "2026-01-01T10:00:00+00:00");
    repo.seed("Luis", "2026-03-01T10:00:00+00:00");
    repo.seed("Marta", "2026-02-01T10:00:00+00:00");

    let req = Request::builder()
        .method("GET")
        .uri("/api/getContactos")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Luis", "Marta", "Ana"]);
}

#[tokio::test]
async fn test_readback_failure_hides_datastore_detail() {
    let (app, _, _) = setup_app(true, false);

    let req = Request::builder()
        .method("GET")
        .uri("/api/getContactos")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Error al consultar la base de datos");
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));
}
