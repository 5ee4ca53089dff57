//! Lookup of quality-factor headers on `http` types.

use http::header::{ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE, AsHeaderName};
use http::{HeaderMap, Request, request::Parts};

use crate::{Parser, QHeader, Wildcard};

/// Read quality-factor headers from a header collection.
///
/// Repeated header fields are combined into one ranked list. Values that are
/// not visible ASCII are skipped.
///
/// # Example
///
/// ```
/// use http::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
/// use qheader::QualityHeaders;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-tw;q=0.5,zh-cn;q=0.8,en;q=0.8"));
/// assert_eq!(headers.accept_language().value(), Some("zh-cn"));
/// ```
pub trait QualityHeaders {
    /// The headers to read from.
    fn header_map(&self) -> &HeaderMap;

    /// Parse and rank every value of the header `name` with `wildcard`.
    fn quality_header<K: AsHeaderName>(&self, name: K, wildcard: Wildcard) -> QHeader {
        let values = self.header_map().get_all(name).into_iter().filter_map(|value| {
            value
                .to_str()
                .inspect_err(|e| tracing::debug!(error = %e, "header value is not visible ascii"))
                .ok()
        });
        Parser::new(wildcard).parse_all(values)
    }

    /// Ranked `Accept` header.
    fn accept(&self) -> QHeader {
        self.quality_header(ACCEPT, Wildcard::AnyMime)
    }

    /// Ranked `Accept-Language` header.
    fn accept_language(&self) -> QHeader {
        self.quality_header(ACCEPT_LANGUAGE, Wildcard::Any)
    }

    /// Ranked `Accept-Charset` header.
    fn accept_charset(&self) -> QHeader {
        self.quality_header(ACCEPT_CHARSET, Wildcard::Any)
    }

    /// Ranked `Accept-Encoding` header.
    fn accept_encoding(&self) -> QHeader {
        self.quality_header(ACCEPT_ENCODING, Wildcard::Any)
    }
}

impl QualityHeaders for HeaderMap {
    #[inline]
    fn header_map(&self) -> &HeaderMap {
        self
    }
}

impl<B> QualityHeaders for Request<B> {
    #[inline]
    fn header_map(&self) -> &HeaderMap {
        self.headers()
    }
}

impl QualityHeaders for Parts {
    #[inline]
    fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}
