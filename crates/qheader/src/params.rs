//! Parameter list attached to a header item.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

/// Parameters of an [`Item`](crate::Item), such as `q` and `level` in
/// `text/html;q=0.8;level=1`.
///
/// Names are stored ASCII-lowercased and are unique; values are kept as written.
/// A parameter without `=value` has an empty value.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Params(SmallVec<[(String, String); 4]>);

impl Params {
    /// Create an empty `Params`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Returns the value of the parameter named `name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if a parameter named `name` exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a parameter, replacing the value of an existing one with the same name.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let mut name = name.into();
        name.make_ascii_lowercase();
        let value = value.into();
        if let Some((_, old)) = self.0.iter_mut().find(|(key, _)| *key == name) {
            return Some(std::mem::replace(old, value));
        }
        self.0.push((name, value));
        None
    }

    /// Number of parameters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Remove all parameters, keeping the allocated storage.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            if value.is_empty() {
                write!(f, ";{name}")?;
            } else {
                write!(f, ";{name}={value}")?;
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
