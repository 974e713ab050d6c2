//! URL parsing, canonicalization, and reference resolution.
//!
//! [RFC 3986 § 3 Syntax Components](https://www.rfc-editor.org/rfc/rfc3986#section-3)
//!
//! Only absolute `http` and `https` URLs are supported. Userinfo, query
//! strings, and fragments are not isolated: they stay inside [`Url::path`]
//! verbatim, and nothing is percent-decoded.

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Separator between the scheme and the authority.
const SCHEME_SEPARATOR: &str = "://";

/// Errors produced while parsing or resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The input has no `://` separator, or its scheme is not `http`/`https`.
    #[error("invalid scheme in URL '{0}' (expected http:// or https://)")]
    InvalidScheme(String),

    /// The explicit port is not a positive 16-bit integer.
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    /// Nothing between `://` and the start of the path.
    #[error("URL has an empty host")]
    EmptyHost,
}

/// [RFC 3986 § 3.1 Scheme](https://www.rfc-editor.org/rfc/rfc3986#section-3.1)
///
/// The schemes a [`Url`] can carry. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    /// Plaintext HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// The port used when the URL does not name one.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    /// Whether connections for this scheme are wrapped in TLS.
    #[must_use]
    pub const fn is_secure(self) -> bool {
        matches!(self, Self::Https)
    }
}

/// An absolute `http`/`https` URL split into the parts a request needs.
///
/// Values are immutable once built; resolving a redirect produces a new
/// `Url` rather than modifying an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
}

impl Url {
    /// Parse an absolute URL of the form `scheme://host[:port][/path]`.
    ///
    /// When nothing follows the host, the path is `/`.
    ///
    /// # Errors
    ///
    /// - [`UrlError::InvalidScheme`] if `://` is missing or the scheme is not
    ///   exactly `http` or `https`.
    /// - [`UrlError::InvalidPort`] if an explicit port is not a positive integer
    ///   that fits in a `u16`.
    /// - [`UrlError::EmptyHost`] if the host is empty.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let (scheme, rest) = input
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| UrlError::InvalidScheme(input.to_string()))?;
        let scheme =
            Scheme::from_str(scheme).map_err(|_| UrlError::InvalidScheme(input.to_string()))?;

        // "example.com" is treated as "example.com/".
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let path = format!("/{path}");

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, parse_port(port)?),
            None => (authority, scheme.default_port()),
        };
        if host.is_empty() {
            return Err(UrlError::EmptyHost);
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path,
        })
    }

    /// The URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The host name, without any port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, explicit or defaulted from the scheme.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The request target. Always begins with `/` and may carry a query or
    /// fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `host` or `host:port`, with the port omitted when it is the scheme
    /// default.
    #[must_use]
    pub fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Rebuild `scheme://host[:port]path`.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority(), self.path)
    }

    /// [RFC 3986 § 5.2 Relative Resolution](https://www.rfc-editor.org/rfc/rfc3986#section-5.2)
    ///
    /// Resolve `location` (typically a redirect's `Location` header) against
    /// this URL.
    ///
    /// Absolute references are parsed on their own. Network-path (`//host`),
    /// absolute-path, query-only, fragment-only, and relative-path references
    /// take the missing parts from `self`. Dot segments are removed from the
    /// merged path; the query and fragment are carried through untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`Url::parse`] error when the reference (or the URL built
    /// from it) is not a valid `http`/`https` URL.
    pub fn resolve(&self, location: &str) -> Result<Self, UrlError> {
        let location = location.trim();

        if has_scheme(location) {
            return Self::parse(location);
        }

        if location.starts_with("//") {
            return Self::parse(&format!("{}:{location}", self.scheme));
        }

        let (base_path, _) = split_suffix(&self.path);
        let target = if location.is_empty() {
            self.path.clone()
        } else if location.starts_with('#') {
            let base_without_fragment = self
                .path
                .split_once('#')
                .map_or(self.path.as_str(), |(before, _)| before);
            format!("{base_without_fragment}{location}")
        } else if location.starts_with('?') {
            format!("{base_path}{location}")
        } else {
            let (reference_path, reference_suffix) = split_suffix(location);
            let merged = if reference_path.starts_with('/') {
                reference_path.to_string()
            } else {
                // RFC 3986 § 5.2.3: everything up to and including the last
                // "/" of the base path, followed by the reference.
                let directory = base_path.rfind('/').map_or("/", |i| &base_path[..=i]);
                format!("{directory}{reference_path}")
            };
            format!("{}{reference_suffix}", remove_dot_segments(&merged))
        };

        Ok(Self {
            scheme: self.scheme,
            host: self.host.clone(),
            port: self.port,
            path: target,
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_port(port: &str) -> Result<u16, UrlError> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(UrlError::InvalidPort(port.to_string())),
        Ok(port) => Ok(port),
    }
}

/// [RFC 3986 § 3.1](https://www.rfc-editor.org/rfc/rfc3986#section-3.1)
///
/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, followed by `:`.
fn has_scheme(reference: &str) -> bool {
    let Some((candidate, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split a path-and-suffix string at the first `?` or `#`.
fn split_suffix(target: &str) -> (&str, &str) {
    target
        .find(['?', '#'])
        .map_or((target, ""), |i| target.split_at(i))
}

/// [RFC 3986 § 5.2.4 Remove Dot Segments](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.4)
///
/// Works segment by segment rather than with the RFC's string-rewriting
/// loop; the output is the same for absolute paths.
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let last = segments.len().saturating_sub(1);

    for (index, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if index == last {
                    output.push("");
                }
            }
            ".." => {
                let _ = output.pop();
                if index == last {
                    output.push("");
                }
            }
            other => output.push(other),
        }
    }

    format!("/{}", output.join("/"))
}
