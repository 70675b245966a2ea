//! HTTP fetch integration tests.
//!
//! A tiny_http server is started on a random loopback port and the real
//! `HttpFetcher` is pointed at it. No mocks.

use boxkit_remote::{load_with, FetchConfig, HttpFetcher, ManifestFetcher, RemoteError};
use std::sync::Arc;
use std::thread::JoinHandle;
use tiny_http::{Response, Server, StatusCode};

struct ManifestServer {
    url: String,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl ManifestServer {
    /// Serve `body` at `/distrobox.ini` and 404 everywhere else. Requests that
    /// carry a bearer token other than `expected_token` get a 401.
    fn start(body: &'static str, expected_token: Option<&'static str>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let port = server.server_addr().to_ip().unwrap().port();
        let srv = Arc::clone(&server);
        let handle = std::thread::spawn(move || {
            for req in srv.incoming_requests() {
                let authorized = match expected_token {
                    None => true,
                    Some(token) => req.headers().iter().any(|h| {
                        h.field.equiv("Authorization")
                            && h.value.as_str() == format!("Bearer {token}")
                    }),
                };
                let resp = if !authorized {
                    Response::from_string("unauthorized").with_status_code(StatusCode(401))
                } else if req.url() == "/distrobox.ini" {
                    Response::from_string(body)
                } else {
                    Response::from_string("missing").with_status_code(StatusCode(404))
                };
                let _ = req.respond(resp);
            }
        });
        Self {
            url: format!("http://127.0.0.1:{port}"),
            server,
            handle: Some(handle),
        }
    }
}

impl Drop for ManifestServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

const MANIFEST: &str = "[web]\nimage=alpine:latest\ninit_hooks=\"echo hi\"\n";

#[test]
fn fetches_manifest_body() {
    let server = ManifestServer::start(MANIFEST, None);
    let fetcher = HttpFetcher::default();
    let text = fetcher
        .fetch(&format!("{}/distrobox.ini", server.url))
        .unwrap();
    assert_eq!(text, MANIFEST);
}

#[test]
fn missing_remote_manifest_is_not_found() {
    let server = ManifestServer::start(MANIFEST, None);
    let err = HttpFetcher::default()
        .fetch(&format!("{}/other.ini", server.url))
        .unwrap_err();
    assert!(matches!(err, RemoteError::NotFound(_)), "{err}");
}

#[test]
fn bearer_token_is_sent() {
    let server = ManifestServer::start(MANIFEST, Some("s3cret"));
    let url = format!("{}/distrobox.ini", server.url);

    let anonymous = HttpFetcher::default().fetch(&url).unwrap_err();
    assert!(anonymous.to_string().contains("401"), "{anonymous}");

    let fetcher = HttpFetcher::new(FetchConfig::default().with_token("s3cret"));
    assert_eq!(fetcher.fetch(&url).unwrap(), MANIFEST);
}

#[test]
fn load_with_detects_url_input() {
    let server = ManifestServer::start(MANIFEST, None);
    let text = load_with(
        &format!("{}/distrobox.ini", server.url),
        &HttpFetcher::default(),
    )
    .unwrap();
    assert!(text.starts_with("[web]"));
}
