#![cfg_attr(docsrs, feature(doc_cfg))]

//! Parsing and ranking of HTTP quality-factor headers.
//!
//! `Accept`, `Accept-Language`, `Accept-Charset` and `Accept-Encoding` carry a
//! comma separated list of alternatives, each with an optional `q` weight:
//!
//! ```text
//! Accept: application/json;q=0.9, text/plain;q=0.8, text/html, text/xml, */*;q=0.1
//! ```
//!
//! This crate splits such a value into [`Item`]s and ranks them for content
//! negotiation, most preferred first.
//!
//! # Ranking
//!
//! | Key | Rule |
//! |-----|------|
//! | error | items whose value or `q` failed to parse go last |
//! | `q` | higher weight first |
//! | parameters | for the same value, more parameters first |
//! | family wildcard | `*/*` (or `*`) after everything else |
//! | single-level wildcard | `text/*` after exact values |
//!
//! Any remaining tie keeps the order of the header.
//!
//! # Example
//!
//! ```
//! let accept = qheader::accept("application/json;q=0.9,text/plain;q=0.8,text/html,text/xml,*/*;q=0.1");
//! let values = accept.iter().map(|item| item.value.as_str()).collect::<Vec<_>>();
//! assert_eq!(values, ["text/html", "text/xml", "application/json", "text/plain", "*/*"]);
//! assert_eq!(accept.value(), Some("text/html"));
//! ```
//!
//! # Lenient parsing
//!
//! Parsing never fails as a whole. A `q` that is not a number in `0..=1`
//! is recorded in [`Item::error`] and the item is ranked last. A segment with
//! nothing before its first `;` is dropped. Items with `q=0` are kept unless
//! [`Parser::skip_rejected`] is set.
//!
//! # Reuse
//!
//! Under heavy load, [`ItemPool`] lets a [`Parser`] reuse item allocations.
//! Items return to the pool only when the caller calls [`QHeader::recycle`].
//!
//! # Feature flags
//!
//! | Feature | Description | Default? |
//! |---------|-------------|----------|
//! | `http` | [`QualityHeaders`] for `http::HeaderMap` and requests | ✔️ |

mod error;
mod item;
mod params;
mod parser;
mod pool;
mod rank;

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
mod headers;

pub use error::ItemError;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub use headers::QualityHeaders;
pub use item::Item;
pub use params::Params;
pub use parser::{Parser, QHeader};
pub use pool::{DEFAULT_POOL_CAPACITY, ItemPool};
pub use rank::{Wildcard, sort_items};

/// Parse and rank `header` with the family wildcard token `any`.
///
/// # Panics
///
/// Panics if `any` is not `*/*`, `*` or the empty string. The token is chosen
/// by the calling code, never by the header, so this is a programming error.
#[must_use]
pub fn parse(header: &str, any: &str) -> QHeader {
    let Some(wildcard) = Wildcard::from_token(any) else {
        panic!("invalid wildcard token `{any}`, expected `*/*`, `*` or an empty string");
    };
    parse_with(header, wildcard)
}

/// Parse and rank `header` with `wildcard`.
#[inline]
#[must_use]
pub fn parse_with(header: &str, wildcard: Wildcard) -> QHeader {
    Parser::new(wildcard).parse(header)
}

/// Parse an `Accept` header value.
#[inline]
#[must_use]
pub fn accept(header: &str) -> QHeader {
    parse_with(header, Wildcard::AnyMime)
}

/// Parse an `Accept-Language` header value.
#[inline]
#[must_use]
pub fn accept_language(header: &str) -> QHeader {
    parse_with(header, Wildcard::Any)
}

/// Parse an `Accept-Charset` header value.
#[inline]
#[must_use]
pub fn accept_charset(header: &str) -> QHeader {
    parse_with(header, Wildcard::Any)
}

/// Parse an `Accept-Encoding` header value.
#[inline]
#[must_use]
pub fn accept_encoding(header: &str) -> QHeader {
    parse_with(header, Wildcard::Any)
}
