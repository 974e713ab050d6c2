//! High-level browser API for the Wren browser.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - normalize an address, fetch it, and tokenize the
//!   body
//! - **Layout** - lay a loaded document out for any font metrics and viewport
//! - **Background Loading** - run a load off the caller's thread and hand the
//!   result back through a callback or a single-shot channel
//! - **Font Metrics** - measurement backed by a real font through `fontdue`
//!
//! # Not Yet Implemented
//!
//! - Local file loading
//! - Resource loading (images, stylesheets, scripts)

pub mod font_metrics;
pub mod worker;

pub use wren_common as common;
pub use wren_html as html;
pub use wren_layout as layout;

pub use font_metrics::FontdueFontMetrics;
pub use worker::{PendingLoad, load_in_background, spawn_load};

use thiserror::Error;
use wren_common::net::Headers;
use wren_common::warning::clear_warnings;
use wren_common::{FetchError, FetchResponse, HttpClient, Url, UrlError};
use wren_html::text::text_content;
use wren_html::{Token, lex_with_issues};
use wren_layout::{DisplayList, FontMetrics, LayoutConfig};

/// A fetched (or inline) document, tokenized and ready to lay out.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The address as it was loaded, after normalization. Empty for inline
    /// markup.
    pub address: String,

    /// URL of the final response after redirects. `None` for inline markup.
    pub final_url: Option<Url>,

    /// Status code of the final response. `None` for inline markup.
    pub status: Option<u16>,

    /// Headers of the final response.
    pub headers: Headers,

    /// Decoded HTML source
    pub html_source: String,

    /// HTML tokens
    pub tokens: Vec<Token>,

    /// Plain text of the document
    pub text: String,

    /// Malformed input tolerated while tokenizing this document
    pub warnings: Vec<String>,
}

impl LoadedDocument {
    fn from_source(address: String, html_source: String) -> Self {
        let (tokens, warnings) = lex_with_issues(&html_source);
        let text = text_content(&tokens);
        Self {
            address,
            final_url: None,
            status: None,
            headers: Headers::new(),
            html_source,
            tokens,
            text,
            warnings,
        }
    }

    /// Lay the document out for `metrics` and `config`.
    ///
    /// The display list is rebuilt from the tokens on every call, so a
    /// resize or font change is just another call.
    #[must_use]
    pub fn layout(&self, metrics: &dyn FontMetrics, config: &LayoutConfig) -> DisplayList {
        wren_layout::layout(&self.tokens, metrics, config)
    }

    /// The raw decoded HTML, for "view source".
    #[must_use]
    pub fn source(&self) -> &str {
        &self.html_source
    }
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing but whitespace was given as the address.
    #[error("no address given")]
    EmptyAddress,

    /// The address could not be parsed as a URL.
    #[error("invalid address: {0}")]
    Url(#[from] UrlError),

    /// The fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A font could not be loaded.
    #[error("failed to load font: {0}")]
    Font(String),

    /// The background worker went away without sending a result.
    #[error("load worker exited without a result")]
    WorkerDisconnected,
}

/// Turn what a user typed into a loadable address.
///
/// Surrounding whitespace is trimmed and `http://` is prepended when no
/// scheme separator is present. Returns `None` for blank input.
#[must_use]
pub fn normalize_address(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

/// Load a document from an address.
///
/// This is the main entry point for a navigation. It:
/// - normalizes and parses the address
/// - fetches it with `client`, following redirects
/// - tokenizes the body and renders its plain text
///
/// Any response that completes is a document, including 4xx and 5xx pages.
/// The printed-warning history of a previous navigation is cleared first.
///
/// # Errors
///
/// [`LoadError::EmptyAddress`] for blank input, [`LoadError::Url`] when the
/// address is not an http(s) URL, and [`LoadError::Fetch`] when the fetch
/// fails.
pub fn load_document(address: &str, client: &HttpClient) -> Result<LoadedDocument, LoadError> {
    clear_warnings();

    let address = normalize_address(address).ok_or(LoadError::EmptyAddress)?;
    let url = Url::parse(&address)?;
    let FetchResponse {
        final_url,
        status,
        reason,
        headers,
        body,
        ..
    } = client.fetch(&url)?;
    log::info!("loaded {final_url} ({status} {reason})");

    let mut document = LoadedDocument::from_source(address, body);
    document.final_url = Some(final_url);
    document.status = Some(status);
    document.headers = headers;
    Ok(document)
}

/// Parse an HTML string into a [`LoadedDocument`] without fetching.
#[must_use]
pub fn parse_html_string(html: &str) -> LoadedDocument {
    LoadedDocument::from_source(String::new(), html.to_string())
}
