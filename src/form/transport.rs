use async_trait::async_trait;

use crate::dto::contact_dto::ContactPayload;

/// Transport failure as seen by the form controller. The controller never
/// inspects server-side detail beyond "it did not succeed".
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Carries one submission payload to the endpoint. One call per
/// user-triggered submit cycle; implementations do not retry.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError>;
}

/// HTTP transport posting the payload as JSON, with a bounded request
/// timeout so an unresponsive endpoint cannot hang the form forever.
pub struct HttpSubmissionTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionTransport {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        Ok(HttpSubmissionTransport {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}
