//! Attribute groups
//!
//! An attribute group is a named bundle of 0-10 ratings (step 0.5).
//! Every score record carries a technical and a physical group and,
//! for records created after the tactical schema landed, a tactical one.
//!
//! Groups keep their keys in first-insertion order. Ranking tie-breaks
//! depend on that order, so the group is backed by a `Vec` rather than a
//! hash map and serializes as an ordered JSON object.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lowest valid rating.
pub const RATING_MIN: f64 = 0.0;
/// Highest valid rating.
pub const RATING_MAX: f64 = 10.0;

/// Which of the three rating bundles an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Technical,
    Physical,
    Tactical,
}

impl GroupType {
    /// All groups in ranking order.
    pub const ALL: [GroupType; 3] = [GroupType::Technical, GroupType::Physical, GroupType::Tactical];

    pub fn label(&self) -> &'static str {
        match self {
            GroupType::Technical => "Technical",
            GroupType::Physical => "Physical",
            GroupType::Tactical => "Tactical",
        }
    }
}

/// Ordered mapping from attribute key to rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeGroup {
    entries: Vec<(String, f64)>,
}

impl AttributeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from `(key, value)` pairs. Later duplicates overwrite
    /// earlier ones but keep the original position.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut group = Self::new();
        for (key, value) in pairs {
            group.set(key, value);
        }
        group
    }

    /// Group where every key in `keys` holds the same value.
    pub fn filled<K: AsRef<str>>(keys: &[K], value: f64) -> Self {
        Self::from_pairs(keys.iter().map(|k| (k.as_ref().to_string(), value)))
    }

    /// Insert or overwrite a rating.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// Keys whose rating falls outside [0, 10].
    ///
    /// Values are never clamped by the core; this only lets the boundary
    /// layer report suspicious input.
    pub fn out_of_range_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| !(RATING_MIN..=RATING_MAX).contains(v))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AttributeGroup {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for AttributeGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct AttributeGroupVisitor;

impl<'de> Visitor<'de> for AttributeGroupVisitor {
    type Value = AttributeGroup;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of attribute key to numeric rating")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut group = AttributeGroup::new();
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            group.set(key, value);
        }
        Ok(group)
    }
}

impl<'de> Deserialize<'de> for AttributeGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeGroupVisitor)
    }
}
