//! Common infrastructure for the Wren browser.
//!
//! This crate provides the pieces every other component builds on:
//! - **URL** - parsing, canonical form, and redirect target resolution
//! - **Networking** - a blocking HTTP/1.0 client with redirect following
//! - **Warning System** - deduplicated warnings for tolerated malformed input

pub mod net;
pub mod url;
pub mod warning;

pub use net::{ClientConfig, FetchError, FetchErrorKind, FetchResponse, HttpClient};
pub use url::{Scheme, Url, UrlError};
