//! REST client for the hotel backend.
//!
//! Every call goes through one [`ApiClient`], which delegates the wire work
//! to a [`Transport`] and classifies the response into an [`ApiOutcome`].

pub mod envelope;
pub mod http;
mod rooms;
mod users;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::token::TokenSource;

pub use envelope::ApiOutcome;
pub use http::HttpTransport;

/// A request relative to the configured base address.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Raw response: status code and decoded JSON body (`Null` when empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Shared client used by every form.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over HTTP using the configured base address and token source.
    pub fn http(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config, tokens)?)))
    }

    async fn execute(&self, method: Method, path: String, body: Option<Value>) -> Result<ApiResponse> {
        self.transport.send(ApiRequest { method, path, body }).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport that replays scripted responses and records requests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::error::AppError;

    enum Scripted {
        Respond(ApiResponse),
        Unreachable,
    }

    #[derive(Default)]
    pub struct ScriptedTransport {
        script: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, status: u16, body: Value) -> &Self {
            self.script
                .lock()
                .unwrap()
                .push_back(Scripted::Respond(ApiResponse { status, body }));
            self
        }

        pub fn unreachable(&self) -> &Self {
            self.script.lock().unwrap().push_back(Scripted::Unreachable);
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request.clone());
            match self.script.lock().unwrap().pop_front() {
                Some(Scripted::Respond(response)) => Ok(response),
                Some(Scripted::Unreachable) => Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                None => panic!("unexpected request: {} {}", request.method, request.path),
            }
        }
    }

    pub fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::new(transport.clone())
    }
}
