use crate::{
    config::GeneratorConfig,
    error::{GeneratorError, Result},
    models::{GenerationRequest, GenerationResult},
    transport::traits::GenerationTransport,
};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GeneratorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let form = request.to_form()?;

        log::info!(
            "POST {} (prompt: {} chars, style: {}, image: {})",
            self.endpoint,
            request.prompt.chars().count(),
            request.style,
            request
                .image
                .as_ref()
                .map(|image| image.file_name.as_str())
                .unwrap_or("none")
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(format!("Generation request failed: {}", e)))?;

        // The body decides the outcome, not the status line.
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("Generation service answered HTTP {}", status);
        }

        serde_json::from_str::<GenerationResult>(&body).map_err(|e| {
            GeneratorError::Transport(format!(
                "malformed response body (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
