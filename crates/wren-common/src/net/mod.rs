//! Minimal HTTP/1.0 client.
//!
//! [RFC 1945 Hypertext Transfer Protocol -- HTTP/1.0](https://www.rfc-editor.org/rfc/rfc1945)
//!
//! Every hop opens a fresh connection, sends one `GET` with
//! `Connection: close`, and reads the body until the server closes the
//! stream. Chunked transfer coding and content codings are rejected rather
//! than decoded. Redirects are followed up to a configured limit.

mod connection;
mod response;

use std::io;
use std::time::Duration;

use log::Level;
use strum_macros::Display;
use thiserror::Error;

use crate::url::{Url, UrlError};
use connection::Connection;

pub use response::{FetchResponse, Headers, StatusLine, decode_body, decode_latin1};

/// Connect, read, and write timeout applied to every hop.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirects followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Product token sent in the `User-Agent` header.
pub const USER_AGENT: &str = concat!("Wren/", env!("CARGO_PKG_VERSION"));

/// Headers whose presence aborts the fetch. Neither transfer codings nor
/// content codings are decoded.
const UNSUPPORTED_ENCODING_HEADERS: [&str; 2] = ["transfer-encoding", "content-encoding"];

/// Where in a hop an I/O failure or timeout happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchStage {
    /// Opening the TCP connection.
    #[strum(to_string = "connect")]
    Connect,
    /// Negotiating TLS.
    #[strum(to_string = "TLS handshake")]
    TlsHandshake,
    /// Writing the request.
    #[strum(to_string = "sending request")]
    Request,
    /// Reading the status line and headers.
    #[strum(to_string = "reading response head")]
    Head,
    /// Reading the body.
    #[strum(to_string = "reading response body")]
    Body,
}

/// Errors that end a fetch. None of them are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL, or a redirect target, could not be parsed.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// Name resolution or the TCP connect failed.
    #[error("failed to connect to {address}: {source}")]
    ConnectFailure {
        /// `host:port` that was being dialed.
        address: String,
        /// Underlying error.
        source: io::Error,
    },

    /// TLS negotiation or certificate verification failed.
    #[error("TLS handshake with {host} failed: {message}")]
    TlsFailure {
        /// Host name used for verification.
        host: String,
        /// Description from the TLS backend.
        message: String,
    },

    /// The peer did not respond within the configured timeout.
    #[error("timed out during {stage}")]
    Timeout {
        /// What the client was doing when the timer expired.
        stage: FetchStage,
    },

    /// Any other I/O failure on an established connection.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// The connection closed before a status line arrived.
    #[error("empty response: connection closed before a status line was received")]
    EmptyResponse,

    /// The status line is not `HTTP/x.y CODE [REASON]`.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// A header line has no `:` separator.
    #[error("malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    /// The response uses `Transfer-Encoding` or `Content-Encoding`.
    #[error("unsupported encoding: {header}: {value}")]
    UnsupportedEncoding {
        /// Lowercased header name.
        header: String,
        /// Header value as received.
        value: String,
    },

    /// A 3xx response had no `Location` header.
    #[error("redirect ({status}) without Location header")]
    MissingRedirectLocation {
        /// The redirect status code.
        status: u16,
    },

    /// More than the allowed number of redirects were returned.
    #[error("too many redirects (limit {max})")]
    TooManyRedirects {
        /// The configured limit.
        max: usize,
    },
}

/// The kind of a [`FetchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchErrorKind {
    /// See [`FetchError::InvalidUrl`].
    InvalidUrl,
    /// See [`FetchError::ConnectFailure`].
    ConnectFailure,
    /// See [`FetchError::TlsFailure`].
    TlsFailure,
    /// See [`FetchError::Timeout`].
    Timeout,
    /// See [`FetchError::Transport`].
    Transport,
    /// See [`FetchError::EmptyResponse`].
    EmptyResponse,
    /// See [`FetchError::MalformedStatusLine`].
    MalformedStatusLine,
    /// See [`FetchError::MalformedHeaderLine`].
    MalformedHeaderLine,
    /// See [`FetchError::UnsupportedEncoding`].
    UnsupportedEncoding,
    /// See [`FetchError::MissingRedirectLocation`].
    MissingRedirectLocation,
    /// See [`FetchError::TooManyRedirects`].
    TooManyRedirects,
}

impl FetchError {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::InvalidUrl(_) => FetchErrorKind::InvalidUrl,
            Self::ConnectFailure { .. } => FetchErrorKind::ConnectFailure,
            Self::TlsFailure { .. } => FetchErrorKind::TlsFailure,
            Self::Timeout { .. } => FetchErrorKind::Timeout,
            Self::Transport(_) => FetchErrorKind::Transport,
            Self::EmptyResponse => FetchErrorKind::EmptyResponse,
            Self::MalformedStatusLine(_) => FetchErrorKind::MalformedStatusLine,
            Self::MalformedHeaderLine(_) => FetchErrorKind::MalformedHeaderLine,
            Self::UnsupportedEncoding { .. } => FetchErrorKind::UnsupportedEncoding,
            Self::MissingRedirectLocation { .. } => FetchErrorKind::MissingRedirectLocation,
            Self::TooManyRedirects { .. } => FetchErrorKind::TooManyRedirects,
        }
    }
}

/// Client settings. Passed explicitly; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Applied to connect, each read, and each write.
    pub timeout: Duration,
    /// Redirects to follow before failing with
    /// [`FetchError::TooManyRedirects`].
    pub max_redirects: usize,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Log each redirect hop at `info` level instead of `debug`.
    pub trace_redirects: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: USER_AGENT.to_string(),
            trace_redirects: false,
        }
    }
}

impl ClientConfig {
    /// Set the per-operation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect limit.
    #[must_use]
    pub const fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set the `User-Agent` value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable redirect tracing.
    #[must_use]
    pub const fn with_trace_redirects(mut self, trace_redirects: bool) -> Self {
        self.trace_redirects = trace_redirects;
        self
    }
}

/// Blocking HTTP/1.0 client.
///
/// Holds only configuration, so it is cheap to clone and safe to move to a
/// worker thread. Each [`fetch`](Self::fetch) owns its connections
/// exclusively.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    /// Create a client with the given settings.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The client's settings.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET` `url`, following redirects, and return the final response.
    ///
    /// Non-3xx statuses, including 4xx and 5xx, are returned as responses.
    /// Redirect cycles are not detected; the redirect limit bounds them.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`]. The connection for the failing hop is closed
    /// before the error is returned.
    pub fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let mut current = url.clone();
        let mut redirects = 0;

        loop {
            log::debug!("GET {current}");
            let mut connection = Connection::open(&current, self.config.timeout)?;
            connection.send(&build_request(&current, &self.config.user_agent))?;
            let (status_line, headers) = connection.read_head()?;
            log::debug!(
                "{} {} {} from {}",
                status_line.version,
                status_line.status,
                status_line.reason,
                current.authority()
            );

            reject_unsupported_encodings(&headers)?;

            if status_line.is_redirect() {
                let location = headers
                    .get("location")
                    .filter(|location| !location.is_empty())
                    .ok_or(FetchError::MissingRedirectLocation {
                        status: status_line.status,
                    })?;
                connection.close();

                redirects += 1;
                if redirects > self.config.max_redirects {
                    return Err(FetchError::TooManyRedirects {
                        max: self.config.max_redirects,
                    });
                }
                let next = current.resolve(location)?;

                let level = if self.config.trace_redirects {
                    Level::Info
                } else {
                    Level::Debug
                };
                log::log!(level, "redirect {}: {current} -> {next}", status_line.status);
                current = next;
                continue;
            }

            let body = connection.read_body()?;
            connection.close();

            return Ok(FetchResponse {
                final_url: current,
                version: status_line.version,
                status: status_line.status,
                reason: status_line.reason,
                headers,
                body,
            });
        }
    }
}

/// Parse `address` and fetch it with a client built from `config`.
///
/// # Errors
///
/// [`FetchError::InvalidUrl`] if `address` does not parse, otherwise any
/// error from [`HttpClient::fetch`].
pub fn fetch_url(address: &str, config: &ClientConfig) -> Result<FetchResponse, FetchError> {
    let url = Url::parse(address)?;
    HttpClient::new(config.clone()).fetch(&url)
}

/// [RFC 1945 § 5 Request](https://www.rfc-editor.org/rfc/rfc1945#section-5)
///
/// The exact bytes sent for one hop.
#[must_use]
pub fn build_request(url: &Url, user_agent: &str) -> String {
    format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {user_agent}\r\nConnection: close\r\n\r\n",
        url.path(),
        url.host()
    )
}

fn reject_unsupported_encodings(headers: &Headers) -> Result<(), FetchError> {
    for header in UNSUPPORTED_ENCODING_HEADERS {
        if let Some(value) = headers.get(header) {
            return Err(FetchError::UnsupportedEncoding {
                header: header.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
