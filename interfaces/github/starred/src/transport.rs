use std::time::Duration;

use reqwest::{header::HeaderMap, Client, Method, StatusCode};
use thiserror::Error;

/// One outbound call: method, absolute URL, headers and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends a request and hands back the raw status and body.
///
/// Status codes are not interpreted here; that is the client's job.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|source| TransportError::ClientBuild { source })?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| TransportError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::ResponseRead { source })?;

        Ok(ApiResponse { status, body })
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("ClientBuild: {source}")]
    ClientBuild {
        source: reqwest::Error,
    },

    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
