//! HTTP retrieval of judge pages.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Client;

use super::{ProblemError, ProblemResult};

/// Judges serve stripped or blocked pages to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of raw page HTML.
pub trait PageFetcher {
    fn fetch_html(&self, url: &str) -> impl Future<Output = ProblemResult<String>> + Send;
}

/// Fetches pages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> ProblemResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ProblemError::Fetch {
                url: String::new(),
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> ProblemResult<String> {
        let fetch_err = |reason: String| ProblemError::Fetch {
            url: url.to_string(),
            reason,
        };

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("status {status}")));
        }

        response.text().await.map_err(|e| fetch_err(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(HttpFetcher::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch_html("not a url").await.unwrap_err();
        assert!(matches!(err, ProblemError::Fetch { url, .. } if url == "not a url"));
    }
}
