use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Method, StatusCode,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::transport::{ApiRequest, Transport, TransportError};
use crate::types::StarredRepository;

pub const API_ROOT: &str = "https://api.github.com";
pub const PER_PAGE: usize = 100;

const ACCEPT_STAR_JSON: &str = "application/vnd.github.v3.star+json";
const CLIENT_USER_AGENT: &str = "ghs-client/0.1.0";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Authenticated client for the starred-repository resource.
#[derive(Debug, Clone)]
pub struct GitHubClient<T> {
    transport: T,
    api_root: String,
    token: String,
}

impl<T: Transport> GitHubClient<T> {
    pub fn new(transport: T, api_root: impl Into<String>, token: impl Into<String>) -> Self {
        let api_root = api_root.into().trim_end_matches('/').to_string();
        Self {
            transport,
            api_root,
            token: token.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn headers(&self) -> Result<HeaderMap, RequestError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|source| RequestError::InvalidToken { source })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_STAR_JSON));
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        Ok(headers)
    }

    /// Issues one request and parses the body of a successful response.
    ///
    /// Returns `Ok(None)` for a 2xx response without a body (e.g. 204).
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, RequestError> {
        debug!(%method, url, "github request");

        let response = self
            .transport
            .send(ApiRequest {
                method: method.clone(),
                url: url.to_string(),
                headers: self.headers()?,
                body,
            })
            .await?;

        if !response.status.is_success() {
            return Err(RequestError::UnexpectedStatus {
                method,
                url: url.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|source| RequestError::DeserializeResponseBody { source })
    }

    pub fn starred_page_url(&self, page: usize) -> String {
        format!(
            "{}/user/starred?type=all&per_page={PER_PAGE}&page={page}",
            self.api_root
        )
    }

    pub fn starred_repo_url(&self, full_name: &str) -> String {
        format!("{}/user/starred/{full_name}", self.api_root)
    }

    /// Fetches one page (1-based) of the authenticated user's stars.
    pub async fn fetch_starred_page(
        &self,
        page: usize,
    ) -> Result<Vec<StarredRepository>, FetchStarredPageError> {
        let document = self
            .request(Method::GET, &self.starred_page_url(page), None)
            .await?
            .ok_or(FetchStarredPageError::EmptyBody { page })?;

        serde_json::from_value(document)
            .map_err(|source| FetchStarredPageError::DeserializeStarredPage { page, source })
    }

    /// Removes the authenticated user's star from `full_name` (owner/name).
    pub async fn delete_star(&self, full_name: &str) -> Result<(), DeleteStarError> {
        self.request(Method::DELETE, &self.starred_repo_url(full_name), None)
            .await
            .map_err(|source| DeleteStarError::Request {
                full_name: full_name.to_string(),
                source,
            })?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("InvalidToken: {source}")]
    InvalidToken {
        source: InvalidHeaderValue,
    },

    #[error("Transport: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },

    #[error("UnexpectedStatus: {method} {url} returned {status}: {body}")]
    UnexpectedStatus {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchStarredPageError {
    #[error("Request: {source}")]
    Request {
        #[from]
        source: RequestError,
    },

    #[error("EmptyBody: page {page} returned no document")]
    EmptyBody {
        page: usize,
    },

    #[error("DeserializeStarredPage: page {page}: {source}")]
    DeserializeStarredPage {
        page: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DeleteStarError {
    #[error("DeleteStar {full_name}: {source}")]
    Request {
        full_name: String,
        source: RequestError,
    },
}
