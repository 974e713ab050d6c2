//! Integration tests for document loading, run against a loopback server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Barrier, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use wren_browser::{
    FontdueFontMetrics, LoadError, load_document, load_in_background, normalize_address,
    parse_html_string, spawn_load,
};
use wren_common::{ClientConfig, FetchErrorKind, HttpClient, UrlError};
use wren_html::Token;
use wren_layout::{ApproximateFontMetrics, LayoutConfig, TextStyle};

/// Answer every connection with `response`. Returns `host:port`.
fn serve(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let authority = listener.local_addr().unwrap().to_string();

    let _server = thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap_or(0) > 0 && line != "\r\n" {
                line.clear();
            }
            let _ = stream.write_all(response.as_bytes());
        }
    });

    authority
}

/// An address on which nothing is listening.
fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let authority = listener.local_addr().unwrap().to_string();
    drop(listener);
    format!("http://{authority}/")
}

fn client() -> HttpClient {
    HttpClient::new(ClientConfig::default().with_timeout(Duration::from_secs(5)))
}

const PAGE: &str = "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\n\r\n\
                    <html><style>p{}</style><p>Hello <b>world</b></p></html>";

#[test]
fn test_normalize_address() {
    assert_eq!(
        normalize_address("example.com"),
        Some("http://example.com".to_string())
    );
    assert_eq!(
        normalize_address("  https://example.com/a  "),
        Some("https://example.com/a".to_string())
    );
    assert_eq!(
        normalize_address("ftp://example.com"),
        Some("ftp://example.com".to_string())
    );
    assert_eq!(normalize_address(""), None);
    assert_eq!(normalize_address(" \t\n"), None);
}

#[test]
fn test_parse_html_string() {
    let document = parse_html_string("<p>Hi <b>there</b></p>");
    assert_eq!(document.text, "Hi there");
    assert_eq!(document.source(), "<p>Hi <b>there</b></p>");
    assert_eq!(document.tokens.len(), 6);
    assert_eq!(document.tokens[2], Token::tag("b"));
    assert!(document.address.is_empty());
    assert!(document.final_url.is_none());
    assert!(document.status.is_none());
    assert!(document.headers.is_empty());
}

#[test]
fn test_document_warnings() {
    let document = parse_html_string("<p>ok</p><script>never closed");
    assert_eq!(document.text, "ok");
    assert_eq!(document.warnings.len(), 1);
    assert!(document.warnings[0].contains("<script>"));

    assert!(parse_html_string("<p>ok</p>").warnings.is_empty());
}

#[test]
fn test_concurrent_documents_keep_their_own_warnings() {
    for _ in 0..50 {
        let barrier = Arc::new(Barrier::new(2));

        let clean_barrier = Arc::clone(&barrier);
        let clean = thread::spawn(move || {
            let _ = clean_barrier.wait();
            parse_html_string(&"<p>clean page</p>".repeat(2000)).warnings
        });
        let broken_barrier = Arc::clone(&barrier);
        let broken = thread::spawn(move || {
            let _ = broken_barrier.wait();
            parse_html_string("<script>never closed").warnings
        });

        assert!(clean.join().unwrap().is_empty());
        assert_eq!(broken.join().unwrap().len(), 1);
    }
}

#[test]
fn test_loaded_document_warnings() {
    let authority = serve("HTTP/1.0 200 OK\r\n\r\n<p>cut <b");
    let document = load_document(&authority, &client()).unwrap();
    assert_eq!(document.text, "cut ");
    assert_eq!(document.warnings.len(), 1);
    assert!(document.warnings[0].contains("unterminated tag"));
}

#[test]
fn test_document_layout_is_rebuilt_per_call() {
    let document = parse_html_string("<b>bold</b> plain words here");
    let metrics = ApproximateFontMetrics::default();

    let wide = document.layout(&metrics, &LayoutConfig::new(800));
    assert_eq!(wide.len(), 4);
    assert!(wide.items()[0].style.bold);
    assert_eq!(wide.items()[1].style, TextStyle::NORMAL);
    assert!(wide.iter().all(|item| item.y == wide.items()[0].y));

    let narrow = document.layout(&metrics, &LayoutConfig::new(60));
    assert_eq!(narrow.len(), 4);
    assert!(narrow.last_baseline() > wide.last_baseline());
    assert_eq!(document.layout(&metrics, &LayoutConfig::new(800)), wide);
}

#[test]
fn test_load_document() {
    let authority = serve(PAGE);
    let address = format!("http://{authority}/index.html");
    let document = load_document(&address, &client()).unwrap();

    assert_eq!(document.address, address);
    assert_eq!(document.status, Some(200));
    assert_eq!(document.headers.get("content-type"), Some("text/html"));
    assert_eq!(
        document.final_url.as_ref().unwrap().canonical_string(),
        format!("http://{authority}/index.html")
    );
    assert_eq!(document.text, "Hello world");
    assert!(document.source().starts_with("<html><style>"));
}

#[test]
fn test_load_document_adds_missing_scheme() {
    let authority = serve(PAGE);
    let document = load_document(&format!("  {authority}  "), &client()).unwrap();
    assert_eq!(document.address, format!("http://{authority}"));
    assert_eq!(document.final_url.unwrap().path(), "/");
}

#[test]
fn test_error_pages_are_documents() {
    let authority = serve("HTTP/1.0 404 Not Found\r\n\r\n<h1>Not here</h1>");
    let document = load_document(&authority, &client()).unwrap();
    assert_eq!(document.status, Some(404));
    assert_eq!(document.text, "Not here");
}

#[test]
fn test_blank_address() {
    let error = load_document("   ", &client()).unwrap_err();
    assert!(matches!(error, LoadError::EmptyAddress));
}

#[test]
fn test_unsupported_scheme() {
    let error = load_document("ftp://example.com/", &client()).unwrap_err();
    assert!(matches!(error, LoadError::Url(UrlError::InvalidScheme(_))));
}

#[test]
fn test_fetch_failure() {
    match load_document(&closed_address(), &client()).unwrap_err() {
        LoadError::Fetch(error) => assert_eq!(error.kind(), FetchErrorKind::ConnectFailure),
        other => panic!("Expected fetch error, got {other:?}"),
    }
}

#[test]
fn test_spawn_load_calls_back_once() {
    let authority = serve(PAGE);
    let (sender, receiver) = mpsc::channel();
    let worker = spawn_load(authority, client(), move |result| {
        sender.send(result.map(|document| document.text)).unwrap();
    });
    worker.join().unwrap();

    assert_eq!(receiver.recv().unwrap().unwrap(), "Hello world");
    assert!(receiver.recv().is_err());
}

#[test]
fn test_load_in_background_wait() {
    let authority = serve(PAGE);
    let document = load_in_background(authority, client()).wait().unwrap();
    assert_eq!(document.text, "Hello world");
}

#[test]
fn test_load_in_background_reports_errors() {
    let error = load_in_background(closed_address(), client())
        .wait()
        .unwrap_err();
    assert!(matches!(error, LoadError::Fetch(_)));
}

#[test]
fn test_try_take_polls_until_done() {
    let authority = serve(PAGE);
    let pending = load_in_background(authority, client());
    let deadline = Instant::now() + Duration::from_secs(5);

    let result = loop {
        if let Some(result) = pending.try_take() {
            break result;
        }
        assert!(Instant::now() < deadline, "load did not finish");
        thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(result.unwrap().text, "Hello world");
}

#[test]
fn test_font_from_invalid_bytes() {
    let error = FontdueFontMetrics::from_bytes(b"definitely not a font", 16.0).unwrap_err();
    assert!(matches!(error, LoadError::Font(_)));
}

#[test]
fn test_font_from_missing_file() {
    let error = FontdueFontMetrics::from_file("/nonexistent/wren/font.ttf", 16.0).unwrap_err();
    match error {
        LoadError::Font(message) => assert!(message.contains("/nonexistent/wren/font.ttf")),
        other => panic!("Expected font error, got {other:?}"),
    }
}
