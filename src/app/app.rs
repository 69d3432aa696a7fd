use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::email_conf::EmailConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::contact_repo::MongoContactRepository;
use crate::router::contact_router::contact_router;
use crate::service::contact_service::ContactServiceImpl;
use crate::util::email::SmtpEmailService;

pub struct App {
    config: AppConfig,
    router: Router,
    pub contact_service: Arc<ContactServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let email_config = EmailConfig::from_env().expect("Email config error");

        let contact_repo = Arc::new(
            MongoContactRepository::new(&mongo_config)
                .await
                .expect("Contact repo error"),
        );
        let notifier = Arc::new(SmtpEmailService::new(email_config).expect("Email service error"));
        let contact_service = Arc::new(ContactServiceImpl::new(contact_repo, notifier));

        let router = Self::create_router(contact_service.clone());

        App {
            config,
            router,
            contact_service,
        }
    }

    fn create_router(contact_service: Arc<ContactServiceImpl>) -> Router {
        Router::new()
            .merge(contact_router(contact_service))
            .route("/health", get(|| async { "OK" }))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
