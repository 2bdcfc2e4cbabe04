//! Upstream origin fetch.

use std::time::Duration;

use http::header::{CACHE_CONTROL, CONTENT_TYPE, REFERER};
use http::HeaderMap;
use url::Url;

use crate::source::error::{SourceError, SourceResult};
use crate::source::resolver::ResolvedSource;

/// Outbound GET client for origin-fetch mode.
///
/// One GET per request, no retries. The whole upstream body is buffered
/// before being handed onward.
#[derive(Debug, Clone)]
pub struct OriginClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl OriginClient {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Use a caller-supplied client (connection pool reuse, proxies).
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Issue one GET against `url` and propagate status, `Content-Type` and
    /// `Cache-Control` unchanged.
    ///
    /// A scheme-less `url` (no override, no referer) fails inside the
    /// client and surfaces as [`SourceError::Transport`]; no default host
    /// is substituted.
    pub async fn fetch(&self, url: &str) -> SourceResult<ResolvedSource> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Origin returned non-success status");
            return Err(SourceError::Upstream {
                url: url.to_string(),
                status,
            });
        }

        let content_type = header_string(response.headers(), CONTENT_TYPE);
        let cache_control = header_string(response.headers(), CACHE_CONTROL);
        let body = response.bytes().await?;

        tracing::debug!(url = %url, status = %status, bytes = body.len(), "Origin fetch complete");

        Ok(ResolvedSource {
            status,
            content_type,
            cache_control,
            body,
        })
    }
}

/// Extract the scheme+host origin from the client's referer header.
///
/// The referer is a full URL with path (e.g.
/// `https://test.example.com/some-path/?foo=bar`), so it is parsed first and
/// the origin extracted from it. Unparseable or absent referers yield
/// `None`.
pub fn referer_origin(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(REFERER)?.to_str().ok()?;
    let url = Url::parse(referer).ok()?;
    Some(url.origin().ascii_serialization())
}

fn header_string(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_referer_origin_strips_path_and_query() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_static("https://ref.example.com/page?x=1"),
        );
        assert_eq!(
            referer_origin(&headers),
            Some("https://ref.example.com".to_string())
        );
    }

    #[test]
    fn test_referer_origin_keeps_non_default_port() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_static("http://ref.example.com:8080/page"),
        );
        assert_eq!(
            referer_origin(&headers),
            Some("http://ref.example.com:8080".to_string())
        );
    }

    #[test]
    fn test_referer_origin_absent_or_invalid() {
        let headers = HeaderMap::new();
        assert_eq!(referer_origin(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("not a url"));
        assert_eq!(referer_origin(&headers), None);
    }
}
