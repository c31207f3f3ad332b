//! HTTP client for the backend API (alert persistence and anomaly scoring).

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AlertServiceConfig;
use crate::credentials::BearerToken;
use crate::errors::{Error, Result};

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    detail: Option<String>,
    message: Option<String>,
}

/// Thin JSON client over the backend API root.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    api_root: String,
    auth_header: Option<HeaderValue>,
}

impl ApiClient {
    /// Build a client for `config.api_base_url`, optionally authenticated.
    pub fn new(config: &AlertServiceConfig, token: Option<&BearerToken>) -> Result<Self> {
        let auth_header = token
            .map(|t| {
                HeaderValue::from_str(&t.header_value())
                    .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_root: config.api_root().to_string(),
            auth_header,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("[Api] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::RemoteFailure(format!("Request failed: {}", e)))?;

        let body = Self::checked_body(response).await?;
        serde_json::from_str(&body).map_err(Error::from)
    }

    /// POST a JSON body; the response body is only checked for status.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        debug!("[Api] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::RemoteFailure(format!("Request failed: {}", e)))?;

        Self::checked_body(response).await.map(|_| ())
    }

    async fn checked_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::RemoteFailure(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::RemoteFailure(error_message(status.as_u16(), &body)));
        }
        Ok(body)
    }
}

/// Best-effort message for a non-2xx response.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(msg) = err.detail.or(err.message) {
            return format!("HTTP {}: {}", status, msg);
        }
    }
    let snippet: String = body.chars().take(200).collect();
    if snippet.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = AlertServiceConfig {
            api_base_url: "http://localhost:8000/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config, None).unwrap();
        assert_eq!(client.url("/alerts/"), "http://localhost:8000/api/alerts/");
        assert_eq!(client.url("ai/status"), "http://localhost:8000/api/ai/status");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_token_enables_auth_header() {
        let token = BearerToken::new("abc");
        let client = ApiClient::new(&AlertServiceConfig::default(), Some(&token)).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(
            client.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(422, r#"{"detail":"threshold_value required"}"#),
            "HTTP 422: threshold_value required"
        );
        assert_eq!(error_message(502, ""), "HTTP 502");
        assert_eq!(error_message(500, "boom"), "HTTP 500: boom");
    }
}
