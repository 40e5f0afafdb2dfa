//! Async HTTP client wrapping reqwest.
//!
//! Not a browser, just HTTP requests. One attempt per request: there is no
//! retry or backoff, and any transport failure is returned to the caller.

use crate::config::ScrapeConfig;
use crate::error::{PanelError, PanelResult};
use std::time::Duration;

/// Response from an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Return the body of a 2xx response, or `UnexpectedStatus`.
    pub fn into_success_body(self) -> PanelResult<String> {
        if (200..300).contains(&self.status) {
            Ok(self.body)
        } else {
            Err(PanelError::UnexpectedStatus {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// HTTP client shared by the session acquirer and both resolvers.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the configured per-request timeout.
    ///
    /// No default user-agent is installed: the dashboard GET goes out with
    /// reqwest's defaults and the resolvers set their own headers.
    pub fn new(config: &ScrapeConfig) -> PanelResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> PanelResult<HttpResponse> {
        tracing::debug!("GET {url}");
        let r = self.client.get(url).send().await?;
        Self::read_response(url, r).await
    }

    /// POST a pre-encoded body verbatim with the given headers.
    ///
    /// The body is never re-encoded, so callers own the exact bytes on the
    /// wire (the bootstrap form is double-encoded on purpose).
    pub async fn post_raw(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> PanelResult<HttpResponse> {
        tracing::debug!("POST {url} ({} bytes)", body.len());

        let mut builder = self.client.post(url);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let r = builder.body(body).send().await?;
        Self::read_response(url, r).await
    }

    async fn read_response(url: &str, r: reqwest::Response) -> PanelResult<HttpResponse> {
        let status = r.status().as_u16();
        let body = r.text().await?;

        tracing::debug!("{url} -> {status} ({} bytes)", body.len());

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}

/// Build a `multipart/form-data` body carrying a single text field.
///
/// Returns the body and the matching content-type header value. The
/// boundary is caller-chosen so the request is byte-for-byte reproducible.
pub fn form_data_body(boundary: &str, field: &str, value: &str) -> (String, String) {
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"\r\n\
         \r\n\
         {value}\r\n\
         --{boundary}--\r\n"
    );
    let content_type = format!("multipart/form-data; boundary={boundary}");
    (body, content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(&ScrapeConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_success_body_passes_2xx() {
        let resp = HttpResponse {
            url: "https://example.com".to_string(),
            status: 200,
            body: "ok".to_string(),
        };
        assert_eq!(resp.into_success_body().unwrap(), "ok");
    }

    #[test]
    fn test_success_body_rejects_non_2xx() {
        let resp = HttpResponse {
            url: "https://example.com/x".to_string(),
            status: 410,
            body: "gone".to_string(),
        };
        match resp.into_success_body() {
            Err(PanelError::UnexpectedStatus { url, status }) => {
                assert_eq!(url, "https://example.com/x");
                assert_eq!(status, 410);
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_form_data_body_layout() {
        let (body, content_type) =
            form_data_body("---011000010111000001101001", "targetSheet", "Sheet ");
        assert_eq!(
            body,
            "-----011000010111000001101001\r\n\
             Content-Disposition: form-data; name=\"targetSheet\"\r\n\
             \r\n\
             Sheet \r\n\
             -----011000010111000001101001--\r\n"
        );
        assert_eq!(
            content_type,
            "multipart/form-data; boundary=---011000010111000001101001"
        );
    }
}
