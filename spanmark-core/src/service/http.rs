//! HTTP client for the annotation service.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::error::{Result, SpanmarkError};
use crate::model::Annotation;
use crate::submit::BatchRequest;

use super::{AnnotationService, BatchAnnotationResult};

/// Connection settings for the annotation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            token: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ServiceConfig {
    /// Read `SPANMARK_API_URL` and `SPANMARK_API_TOKEN`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SPANMARK_API_URL") {
            config.base_url = url;
        }
        if let Ok(token) = std::env::var("SPANMARK_API_TOKEN") {
            config.token = Some(token);
        }
        config
    }
}

/// Annotation service over HTTP.
pub struct HttpAnnotationService {
    client: Client,
    config: ServiceConfig,
}

impl HttpAnnotationService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpanmarkError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ServiceConfig::from_env())
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| SpanmarkError::Transport(format!("invalid API token: {}", e)))?,
            );
        }
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Map HTTP status to the error taxonomy: 401 is the distinguished
    /// auth failure, every other non-success collapses into a transport
    /// error the caller shows generically.
    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SpanmarkError::AuthExpired);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpanmarkError::Transport(format!(
                "service error ({}): {}",
                status, body
            )));
        }
        Ok(response)
    }
}

impl AnnotationService for HttpAnnotationService {
    fn batch_annotate(
        &self,
        project_id: &str,
        request: &BatchRequest,
    ) -> Result<BatchAnnotationResult> {
        tracing::info!(
            "submitting batch of {} documents for project {}",
            request.document_ids.len(),
            project_id
        );

        let response = self
            .client
            .post(self.url(&format!("annotations/batch/{}", project_id)))
            .headers(self.headers()?)
            .json(request)
            .send()
            .map_err(|e| SpanmarkError::Transport(format!("batch request failed: {}", e)))?;

        Self::check(response)?
            .json()
            .map_err(|e| SpanmarkError::Transport(format!("failed to parse batch response: {}", e)))
    }

    fn get_annotations(&self, document_id: &str) -> Result<Vec<Annotation>> {
        tracing::debug!("fetching annotations for document {}", document_id);

        let response = self
            .client
            .get(self.url(&format!("annotations/document/{}", document_id)))
            .headers(self.headers()?)
            .send()
            .map_err(|e| SpanmarkError::Transport(format!("annotation fetch failed: {}", e)))?;

        Self::check(response)?
            .json()
            .map_err(|e| SpanmarkError::Transport(format!("failed to parse annotations: {}", e)))
    }

    fn save_annotations(&self, document_id: &str, annotations: &[Annotation]) -> Result<()> {
        tracing::info!(
            "saving {} annotations for document {}",
            annotations.len(),
            document_id
        );

        let response = self
            .client
            .put(self.url(&format!("annotations/document/{}", document_id)))
            .headers(self.headers()?)
            .json(&annotations)
            .send()
            .map_err(|e| SpanmarkError::Transport(format!("save failed: {}", e)))?;

        Self::check(response)?;
        Ok(())
    }
}
