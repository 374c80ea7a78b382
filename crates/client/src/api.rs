//! HTTP transport for the project endpoints.
//!
//! [`ProjectTransport`] is the seam between the fetch service and the
//! network: it performs one authenticated `GET <base>/<path>` and
//! returns the body of a successful response. [`HttpTransport`] is the
//! production implementation over [`reqwest`].

use async_trait::async_trait;

use crate::config::ClientConfig;

/// Errors from the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Project API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Performs authenticated GET requests against the project API.
#[async_trait]
pub trait ProjectTransport: Send + Sync {
    /// Fetch `<base>/<path>` with `token` as the bearer credential and
    /// return the body of a successful response.
    async fn get(&self, path: &str, token: &str) -> Result<String, TransportError>;
}

/// [`ProjectTransport`] over a pooled [`reqwest::Client`].
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport whose client enforces the configured request
    /// timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a transport reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Ensure the response has a success status code, returning a
    /// [`TransportError::Status`] with the body text otherwise.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ProjectTransport for HttpTransport {
    async fn get(&self, path: &str, token: &str) -> Result<String, TransportError> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "Requesting project API");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let transport =
            HttpTransport::with_client(reqwest::Client::new(), "http://host/api/projects/".into());
        assert_eq!(transport.url_for("42"), "http://host/api/projects/42");
        assert_eq!(
            transport.url_for("?namespace=public"),
            "http://host/api/projects/?namespace=public"
        );
    }

    #[test]
    fn new_uses_configured_base_url() {
        let config = ClientConfig {
            base_url: "http://localhost:9000".into(),
            request_timeout_secs: 5,
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:9000");
    }

    #[test]
    fn status_error_display() {
        let err = TransportError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(err.to_string(), "Project API error (404): not found");
    }

    #[test]
    fn request_error_display() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = TransportError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
