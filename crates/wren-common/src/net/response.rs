//! Response-side types: status line, header map, and body decoding.
//!
//! [RFC 1945 § 6 Response](https://www.rfc-editor.org/rfc/rfc1945#section-6)

use std::collections::BTreeMap;

use super::FetchError;
use crate::url::Url;

/// [RFC 1945 § 6.1 Status-Line](https://www.rfc-editor.org/rfc/rfc1945#section-6.1)
///
/// "Status-Line = HTTP-Version SP Status-Code SP Reason-Phrase CRLF"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Protocol version, e.g. `HTTP/1.0`.
    pub version: String,
    /// Three-digit status code.
    pub status: u16,
    /// Reason phrase. May be empty.
    pub reason: String,
}

impl StatusLine {
    /// Parse a status line with its trailing CRLF already removed.
    ///
    /// The line is split on the first two spaces. The reason phrase is
    /// optional; the version must start with `HTTP/` and the status code
    /// must be a number between 100 and 999.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MalformedStatusLine`] when any of those checks
    /// fail.
    pub fn parse(line: &str) -> Result<Self, FetchError> {
        let malformed = || FetchError::MalformedStatusLine(line.to_string());

        let mut parts = line.splitn(3, ' ');
        let version = parts.next().unwrap_or_default();
        if !version.starts_with("HTTP/") {
            return Err(malformed());
        }
        let status = parts
            .next()
            .and_then(|code| code.parse::<u16>().ok())
            .filter(|code| (100..=999).contains(code))
            .ok_or_else(malformed)?;
        let reason = parts.next().unwrap_or_default().trim();

        Ok(Self {
            version: version.to_string(),
            status,
            reason: reason.to_string(),
        })
    }

    /// Whether this is a 3xx status.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        self.status >= 300 && self.status < 400
    }
}

/// Response headers keyed by lowercased name.
///
/// Values are trimmed of surrounding whitespace. When a name repeats, the
/// last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    /// Create an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record a header, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: &str, value: &str) {
        let _ = self
            .entries
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Look up a header by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no headers were received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The result of a completed fetch.
///
/// Only the final hop of a redirect chain is kept.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL that produced this response, after following redirects.
    pub final_url: Url,
    /// Protocol version from the status line.
    pub version: String,
    /// Status code of the final response.
    pub status: u16,
    /// Reason phrase of the final response.
    pub reason: String,
    /// Headers of the final response.
    pub headers: Headers,
    /// Decoded response body.
    pub body: String,
}

impl FetchResponse {
    /// Whether the final status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Decode a response body to text.
///
/// UTF-8 is tried first. Anything that is not valid UTF-8 is read as
/// ISO-8859-1, which maps every byte to a code point, so decoding never
/// fails.
#[must_use]
pub fn decode_body(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|error| decode_latin1(error.as_bytes()))
}

/// Map each byte to the code point with the same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
