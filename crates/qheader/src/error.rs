use std::num::ParseFloatError;

use thiserror::Error;

/// Errors recorded on an [`Item`](crate::Item) while parsing a header segment.
///
/// These never abort parsing of a header: the failing item is kept (or, for
/// [`ItemError::MissingValue`], dropped by the parser) and the remaining
/// segments are still processed.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    /// The segment starts with a parameter delimiter, so no value could be isolated.
    #[error("missing value before parameter delimiter.")]
    MissingValue,

    /// The `q` parameter is not a valid finite number.
    #[error("invalid quality value `{value}`: {source}")]
    InvalidQuality {
        /// The raw text of the `q` parameter.
        value: String,
        /// The underlying float parse error.
        #[source]
        source: ParseFloatError,
    },

    /// The `q` parameter is a number but is not within `0..=1`.
    #[error("quality value `{value}` is out of range 0..=1.")]
    OutOfRange {
        /// The raw text of the `q` parameter.
        value: String,
    },
}

impl ItemError {
    /// Returns `true` if this error concerns the `q` weight rather than the value.
    #[inline]
    #[must_use]
    pub fn is_quality(&self) -> bool {
        matches!(self, Self::InvalidQuality { .. } | Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ItemError::MissingValue.to_string(),
            "missing value before parameter delimiter."
        );
        let source = "x.9".parse::<f32>().unwrap_err();
        let err = ItemError::InvalidQuality {
            value: "x.9".to_owned(),
            source,
        };
        assert!(err.to_string().starts_with("invalid quality value `x.9`"));
        assert!(err.is_quality());
        assert!(!ItemError::MissingValue.is_quality());
    }
}
