//! Progress-reporting download tests against a mock server.

mod common;

use futures_util::StreamExt;
use prism_core::{Error, SessionScope};
use prism_http::{Downloader, HttpClient, Progress};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{mock_root, session};

#[tokio::test]
async fn downloads_body_and_reports_progress() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();

    Mock::given(method("GET"))
        .and(path("/api/v1/dl/abc"))
        .and(header("x-session-id", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let scope = SessionScope::ephemeral(session(&server, "A"));
    let downloader = Downloader::new(HttpClient::for_scope(&scope).unwrap());
    let url = mock_root(&server).api_url("dl/abc");

    let mut destination = Vec::new();
    let updates: Vec<Progress> = downloader
        .download(&url, &mut destination)
        .map(|progress| progress.unwrap())
        .collect()
        .await;

    assert_eq!(destination, body);
    let last = updates.last().unwrap();
    assert_eq!(last.bytes_read, body.len() as u64);
    assert_eq!(last.content_length, Some(body.len() as u64));
    assert_eq!(last.percent(), Some(100.0));
    assert!(
        updates
            .windows(2)
            .all(|pair| pair[0].bytes_read < pair[1].bytes_read)
    );
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dl/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let downloader = Downloader::new(HttpClient::anonymous().unwrap());
    let url = mock_root(&server).api_url("dl/missing");

    let mut destination = Vec::new();
    let results: Vec<_> = downloader
        .download(&url, &mut destination)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert!(matches!(&results[0], Err(Error::Protocol(e)) if e.status == 404));
    assert!(destination.is_empty());
}

#[test]
fn percent_of_unknown_length_is_none() {
    let progress = Progress {
        bytes_read: 10,
        content_length: None,
    };
    assert_eq!(progress.percent(), None);
}
