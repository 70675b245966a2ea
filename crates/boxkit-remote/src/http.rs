use crate::{ManifestFetcher, RemoteError};
use std::io::Read;
use std::time::Duration;

/// Settings for fetching remote manifests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub auth_token: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            auth_token: None,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_owned());
        self
    }
}

/// Fetches manifests over HTTP(S) with a global per-request timeout.
pub struct HttpFetcher {
    config: FetchConfig,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Self { config, agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl ManifestFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, RemoteError> {
        tracing::debug!("GET {url}");
        let mut req = self.agent.get(url);
        if let Some(ref token) = self.config.auth_token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = match req.call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(RemoteError::NotFound(url.to_owned()));
            }
            Err(ureq::Error::StatusCode(code)) => {
                return Err(RemoteError::Http(format!("HTTP {code} for {url}")));
            }
            Err(e) => {
                return Err(RemoteError::Http(e.to_string()));
            }
        };

        let mut reader = resp.into_body().into_reader();
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| RemoteError::Http(e.to_string()))?;
        String::from_utf8(body)
            .map_err(|_| RemoteError::Http(format!("manifest at {url} is not valid UTF-8")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_three_seconds() {
        assert_eq!(FetchConfig::default().timeout, Duration::from_secs(3));
    }

    #[test]
    fn builder_sets_token_and_timeout() {
        let config = FetchConfig::default()
            .with_timeout(Duration::from_millis(500))
            .with_token("secret");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn unreachable_host_is_http_error() {
        let fetcher = HttpFetcher::new(FetchConfig::default().with_timeout(Duration::from_secs(1)));
        // Port 9 (discard) on loopback is closed on any sane test host.
        let err = fetcher.fetch("http://127.0.0.1:9/distrobox.ini").unwrap_err();
        assert!(matches!(err, RemoteError::Http(_)), "{err}");
    }
}
