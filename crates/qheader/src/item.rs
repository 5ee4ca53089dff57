//! A single comma-separated alternative of a quality-factor header.

use std::fmt::{self, Display, Formatter};

use crate::{ItemError, Params, Wildcard};

/// One alternative of a quality-factor header.
///
/// `zh-cmt;q=0.8, zh-cmn;q=1` is split into two `Item`s.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Item {
    /// The segment as it appeared in the header, without surrounding whitespace.
    pub raw: String,
    /// Main value, e.g. `application/json` for `application/json;q=0.9`.
    ///
    /// Empty when the segment starts with `;`.
    pub value: String,
    /// All parameters, `q` included.
    ///
    /// `application/json;q=0.9;level=1;p` gives `q=0.9`, `level=1` and `p=`.
    pub params: Params,
    /// Parsed weight of the `q` parameter, `1.0` if it is absent.
    ///
    /// Only meaningful when [`error`](Self::error) is `None`.
    pub q: f32,
    /// Set if the value or the `q` parameter failed to parse.
    ///
    /// Items with an error are ranked after all others.
    pub error: Option<ItemError>,
}

impl Default for Item {
    #[inline]
    fn default() -> Self {
        Self {
            raw: String::new(),
            value: String::new(),
            params: Params::new(),
            q: 1.0,
            error: None,
        }
    }
}

impl Item {
    /// Create an item with the given value and weight, without parameters.
    #[must_use]
    pub fn new(value: impl Into<String>, q: f32) -> Self {
        Self {
            value: value.into(),
            q,
            ..Default::default()
        }
    }

    /// Parse one segment, such as `text/html;q=0.8;level=1`.
    ///
    /// This never fails: problems are recorded in [`Item::error`].
    /// The `q` parameter is looked up by name, so it does not need to be the
    /// last parameter.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        let mut item = Self::default();
        item.parse_into(segment);
        item
    }

    /// Parse `segment` into `self`, reusing the existing allocations.
    pub fn parse_into(&mut self, segment: &str) {
        self.reset();
        let segment = segment.trim();
        self.raw.push_str(segment);

        let mut fragments = segment.split(';');
        let value = fragments.next().unwrap_or_default().trim();
        if value.is_empty() {
            self.q = 0.0;
            self.error = Some(ItemError::MissingValue);
            return;
        }
        self.value.push_str(value);

        for fragment in fragments {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            let (name, value) = match fragment.split_once('=') {
                Some((name, value)) => (name.trim_end(), value.trim_start()),
                None => (fragment, ""),
            };
            if name.is_empty() {
                tracing::trace!(segment, fragment, "parameter without name ignored");
                continue;
            }
            self.params.insert(name, value);
        }

        let quality = self
            .params
            .get("q")
            .filter(|q| !q.is_empty())
            .map(parse_quality);
        match quality {
            Some(Ok(q)) => self.q = q,
            Some(Err(e)) => {
                tracing::debug!(segment, error = %e, "invalid quality value");
                self.q = 0.0;
                self.error = Some(e);
            }
            None => {}
        }
    }

    /// Reset to the state of [`Item::default`], keeping allocated buffers.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.value.clear();
        self.params.clear();
        self.q = 1.0;
        self.error = None;
    }

    /// Returns `true` if the value is a single-level wildcard such as `text/*`.
    #[inline]
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.value.ends_with("/*")
    }

    /// Returns `true` if the value is the family wildcard `wildcard`.
    ///
    /// Always `false` for [`Wildcard::None`].
    #[inline]
    #[must_use]
    pub fn is_any(&self, wildcard: Wildcard) -> bool {
        wildcard != Wildcard::None && self.value == wildcard.as_str()
    }

    /// Returns `true` if the item parsed cleanly and was not refused with `q=0`.
    #[inline]
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.error.is_none() && self.q > 0.0
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            write!(f, "{}{}", self.value, self.params)
        } else {
            f.write_str(&self.raw)
        }
    }
}

fn parse_quality(text: &str) -> Result<f32, ItemError> {
    let q = text
        .parse::<f32>()
        .map_err(|source| ItemError::InvalidQuality {
            value: text.to_owned(),
            source,
        })?;
    if (0.0..=1.0).contains(&q) {
        // Fold `-0` into `0`.
        Ok(q + 0.0)
    } else {
        Err(ItemError::OutOfRange {
            value: text.to_owned(),
        })
    }
}
