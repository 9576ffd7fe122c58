//! HTTP transport over reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Request};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Transport};
use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::token::TokenSource;

/// Sends JSON requests to the backend.
///
/// The `Authorization` header is taken from the token source for each
/// request; when no token is stored the header is omitted.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the outgoing request without sending it.
    pub fn build_request(&self, request: &ApiRequest) -> Result<Request> {
        let url = format!(
            "{base}/{path}",
            base = self.base_url,
            path = request.path.trim_start_matches('/')
        );

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = self.tokens.token() {
            let value = HeaderValue::from_str(&token)
                .map_err(|_| AppError::config("Stored API token is not a valid header value"))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let http_request = self.build_request(&request)?;
        tracing::debug!("{} {}", request.method, request.path);

        let response = self.client.execute(http_request).await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("{} {} -> {}", request.method, request.path, status.as_u16());

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => {
                    return Err(AppError::Status {
                        status: status.as_u16(),
                        body: text,
                    });
                }
                Err(e) => return Err(AppError::invalid_response(format!("response is not JSON: {e}"))),
            }
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
