use crate::core::error::AppError;
use crate::core::remote::{ApiError, RemoteWorkflow, UpdateResult, WorkflowApi};
use crate::core::sanitizer::TransmitDocument;
use crate::core::types::ErrorCategory;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

/// ASCII set for encoding path segments (slashes included).
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%');

pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";
pub const PUSH_REF_HEADER: &str = "push-ref";

/// HTTP client for the n8n public REST API.
#[derive(Clone)]
pub struct N8nClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    push_ref: String,
}

impl N8nClient {
    pub fn new(base_url: &Url, api_key: &str, push_ref: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("flowsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorCategory::InternalError,
                    "Failed to build HTTP client",
                    Box::new(e),
                )
            })?;
        Ok(N8nClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            push_ref: push_ref.to_string(),
        })
    }

    pub fn push_ref(&self) -> &str {
        &self.push_ref
    }

    fn workflows_url(&self) -> String {
        format!("{}/workflows", self.base_url)
    }

    fn workflow_url(&self, id: &str) -> String {
        format!(
            "{}/workflows/{}",
            self.base_url,
            utf8_percent_encode(id, PATH_SEGMENT_ENCODE_SET)
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .header(PUSH_REF_HEADER, &self.push_ref)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait]
impl WorkflowApi for N8nClient {
    async fn create_workflow(
        &self,
        document: &TransmitDocument,
    ) -> Result<RemoteWorkflow, ApiError> {
        let url = self.workflows_url();
        tracing::debug!("POST {}", url);
        let response = self.send(self.http.post(&url).json(document)).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        decode_workflow(response).await
    }

    async fn update_workflow(&self, id: &str, document: &TransmitDocument) -> UpdateResult {
        let url = self.workflow_url(id);
        tracing::debug!("PUT {}", url);
        let response = match self.send(self.http.put(&url).json(document)).await {
            Ok(response) => response,
            Err(err) => return UpdateResult::Failed(err),
        };
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return UpdateResult::NotFound;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return UpdateResult::Failed(status_error(status, &body));
        }
        match decode_workflow(response).await {
            Ok(workflow) => UpdateResult::Updated(workflow),
            Err(err) => UpdateResult::Failed(err),
        }
    }
}

async fn decode_workflow(response: reqwest::Response) -> Result<RemoteWorkflow, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(RemoteWorkflow::default());
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Build an [`ApiError::Status`] from a non-success response body.
///
/// JSON bodies contribute `message` and `code` and are kept whole as `details`; any
/// other body becomes the message.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(|value| match value {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
    };

    let message = field("message").unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    });

    ApiError::Status {
        status: status.as_u16(),
        code: field("code"),
        message,
        details: parsed.filter(Value::is_object),
    }
}
