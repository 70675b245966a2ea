use crate::http::HttpFetcher;
use crate::{ManifestFetcher, RemoteError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manifest used when no `--file` is given.
pub const DEFAULT_MANIFEST: &str = "./distrobox.ini";

/// Where a manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Local(PathBuf),
    Remote(String),
}

impl ManifestSource {
    /// An existing local path wins; otherwise `http://` and `https://`
    /// inputs are fetched; anything else does not exist.
    pub fn detect(input: &str) -> Result<Self, RemoteError> {
        let path = Path::new(input);
        if path.exists() {
            return Ok(Self::Local(path.to_path_buf()));
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return Ok(Self::Remote(input.to_owned()));
        }
        Err(RemoteError::NotFound(input.to_owned()))
    }

    pub fn load(&self, fetcher: &dyn ManifestFetcher) -> Result<String, RemoteError> {
        match self {
            Self::Local(path) => {
                debug!("reading manifest {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            Self::Remote(url) => {
                info!("fetching manifest from {url}");
                fetcher.fetch(url)
            }
        }
    }
}

/// Detect and load with an explicit fetcher.
pub fn load_with(input: &str, fetcher: &dyn ManifestFetcher) -> Result<String, RemoteError> {
    ManifestSource::detect(input)?.load(fetcher)
}

/// Load manifest text from a local path or URL using the default fetcher.
pub fn load_manifest_text(input: &str) -> Result<String, RemoteError> {
    load_with(input, &HttpFetcher::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingFetcher {
        urls: RefCell<Vec<String>>,
    }

    impl ManifestFetcher for RecordingFetcher {
        fn fetch(&self, url: &str) -> Result<String, RemoteError> {
            self.urls.borrow_mut().push(url.to_owned());
            Ok("[remote]\nimage=alpine\n".to_owned())
        }
    }

    fn recorder() -> RecordingFetcher {
        RecordingFetcher {
            urls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn existing_path_is_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distrobox.ini");
        std::fs::write(&path, "[a]\n").unwrap();
        let source = ManifestSource::detect(path.to_str().unwrap()).unwrap();
        assert_eq!(source, ManifestSource::Local(path));
    }

    #[test]
    fn url_is_remote() {
        let source = ManifestSource::detect("https://example.com/distrobox.ini").unwrap();
        assert_eq!(
            source,
            ManifestSource::Remote("https://example.com/distrobox.ini".to_owned())
        );
    }

    #[test]
    fn missing_non_url_is_not_found() {
        let err = ManifestSource::detect("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[test]
    fn local_file_is_read_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.ini");
        std::fs::write(&path, "[local]\n").unwrap();
        let fetcher = recorder();
        let text = load_with(path.to_str().unwrap(), &fetcher).unwrap();
        assert_eq!(text, "[local]\n");
        assert!(fetcher.urls.borrow().is_empty());
    }

    #[test]
    fn remote_input_goes_through_fetcher() {
        let fetcher = recorder();
        let text = load_with("http://example.test/m.ini", &fetcher).unwrap();
        assert!(text.starts_with("[remote]"));
        assert_eq!(*fetcher.urls.borrow(), vec!["http://example.test/m.ini"]);
    }
}
