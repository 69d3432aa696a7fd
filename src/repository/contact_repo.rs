use crate::config::mongo_conf::MongoConfig;
use crate::model::contact::ContactRecord;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact submission, assigning its id and creation timestamp.
    async fn create(&self, record: ContactRecord) -> RepositoryResult<ContactRecord>;
    /// All stored submissions, most recent first.
    async fn list_recent(&self) -> RepositoryResult<Vec<ContactRecord>>;
}

pub struct MongoContactRepository {
    collection: mongodb::Collection<ContactRecord>,
}

impl MongoContactRepository {
    /// Create a new MongoContactRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{
            options::{ClientOptions, Credential, ResolverConfig},
            Client,
        };

        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
                .await?;
        client_options.app_name = Some("ForeverUsBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(
            config.connection_timeout_secs,
        ));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection_name = config.contact_collection.as_deref().unwrap_or("contactos");
        let collection = db.collection::<ContactRecord>(collection_name);
        Ok(MongoContactRepository { collection })
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    #[tracing::instrument(skip(self, record), fields(nombre = %record.nombre))]
    async fn create(&self, record: ContactRecord) -> RepositoryResult<ContactRecord> {
        info!("Creating new contact submission");
        let mut new_record = record;
        // Durable identity is assigned here, never by the caller
        new_record.id = Some(ObjectId::new());
        new_record.creado_el = Some(chrono::Utc::now().to_rfc3339());

        let result = self.collection.insert_one(new_record.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Contact submission stored successfully");
                Ok(new_record)
            }
            Err(e) => {
                error!("Failed to store contact submission: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to store contact submission: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_recent(&self) -> RepositoryResult<Vec<ContactRecord>> {
        info!("Listing contact submissions, most recent first");
        let options = FindOptions::builder()
            .sort(doc! { "creado_el": -1 })
            .build();
        let cursor = self.collection.find(None, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut records = Vec::new();
                while let Some(record) = cursor.next().await {
                    match record {
                        Ok(r) => records.push(r),
                        Err(e) => {
                            error!("Failed to deserialize contact submission: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize contact submission: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} contact submissions", records.len());
                Ok(records)
            }
            Err(e) => {
                error!("Failed to list contact submissions: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list contact submissions: {}",
                    e
                )))
            }
        }
    }
}
