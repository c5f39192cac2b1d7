//! Insertion-ordered parameter map

use rustc_hash::FxHashMap;

use super::{SerializeParameter, TraceParameter};
use crate::{Error, Result};

/// Named parameters in insertion order.
///
/// Order is what makes the derived auxiliary data reproducible: two maps
/// built with the same inserts serialize to the same bytes. Names are
/// unique; inserting an existing name replaces the value in place.
///
/// Values default to [`TraceParameter`]; any [`SerializeParameter`] type
/// can be stored instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceParameterMap<P = TraceParameter> {
    entries: Vec<(String, P)>,
    index: FxHashMap<String, usize>,
}

impl TraceParameterMap {
    /// Create an empty map of [`TraceParameter`] values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P> Default for TraceParameterMap<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<P> TraceParameterMap<P> {
    /// Insert a parameter, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, parameter: impl Into<P>) -> Option<P> {
        let name = name.into();
        let parameter = parameter.into();
        if let Some(&slot) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[slot].1, parameter));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, parameter));
        None
    }

    /// Get a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&P> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    /// Check if a parameter exists.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, parameter)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Iterate over names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<P: SerializeParameter> TraceParameterMap<P> {
    /// Concatenate every parameter's bytes in insertion order.
    ///
    /// No lengths or separators are written between parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] naming the first parameter that fails;
    /// bytes accumulated so far are discarded.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        for (name, parameter) in &self.entries {
            let bytes = parameter.serialize().map_err(|e| Error::Serialization {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            buffer.extend_from_slice(&bytes);
        }
        tracing::trace!(
            parameters = self.entries.len(),
            bytes = buffer.len(),
            "serialized trace parameters"
        );
        Ok(buffer)
    }
}

impl<N, P> FromIterator<(N, P)> for TraceParameterMap<P>
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (name, parameter) in iter {
            map.insert(name, parameter);
        }
        map
    }
}

impl<'a, P> IntoIterator for &'a TraceParameterMap<P> {
    type Item = (&'a str, &'a P);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
