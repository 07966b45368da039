//! Generative Language API client (Gemini text, Imagen images)

use crate::config::BackendConfig;
use crate::error::{GenerationError, Result};
use crate::generation::decoder::ResponseDecoder;
use crate::generation::wire;
use crate::generation::{GenerationClient, GenerationKind, GenerationRequest, GenerationResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

/// Client for the Generative Language API
pub struct GoogleGenerationClient {
    http: Client,
    config: BackendConfig,
}

impl GoogleGenerationClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GenerationError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Self::with_http_client(config, http)
    }

    /// Create a client around an injected HTTP client
    pub fn with_http_client(config: BackendConfig, http: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.trimmed_base_url(),
            model,
            method
        )
    }

    /// POST a JSON body and return the raw success body
    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<String> {
        let mut builder = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(body);

        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| GenerationError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned status {} for {}", status.as_u16(), url);
            return Err(GenerationError::Transport {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response.text().await.map_err(|e| {
            GenerationError::Network {
                message: format!("Failed to read response body: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl GenerationClient for GoogleGenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        match request.kind() {
            GenerationKind::Text => {
                let url = self.endpoint(&self.config.text_model, "generateContent");
                debug!(
                    model = %self.config.text_model,
                    structured = request.schema().is_some(),
                    with_image = request.image_input().is_some(),
                    "Sending text generation request"
                );
                let body = self.post(&url, &wire::text_body(request)).await?;
                ResponseDecoder::decode_text(&body, request.schema())
            }
            GenerationKind::Image => {
                let url = self.endpoint(&self.config.image_model, "predict");
                debug!(
                    model = %self.config.image_model,
                    sample_count = request.sample_count(),
                    "Sending image generation request"
                );
                let body = self.post(&url, &wire::image_body(request)).await?;
                ResponseDecoder::decode_images(&body)
            }
        }
    }

    fn backend_name(&self) -> &str {
        "google"
    }
}
