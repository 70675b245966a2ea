//! Manifest loading for boxkit.
//!
//! A manifest is named by a local path or an `http(s)://` URL. This crate
//! decides which one an input is ([`ManifestSource`]), reads local files, and
//! fetches remote ones through a [`ManifestFetcher`] (the ureq-backed
//! [`http::HttpFetcher`] by default) with a short timeout.

pub mod http;
pub mod source;

pub use http::{FetchConfig, HttpFetcher};
pub use source::{load_manifest_text, load_with, ManifestSource, DEFAULT_MANIFEST};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("file {0} does not exist")]
    NotFound(String),
}

/// Retrieves manifest text from a URL.
pub trait ManifestFetcher {
    fn fetch(&self, url: &str) -> Result<String, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_input() {
        let err = RemoteError::NotFound("./distrobox.ini".to_owned());
        assert_eq!(err.to_string(), "file ./distrobox.ini does not exist");
    }
}
