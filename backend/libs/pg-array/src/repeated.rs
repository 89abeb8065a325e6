//! Growable ordered collection used as the in-memory side of an array column.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Ordered, appendable sequence of values owned by a single entity field.
///
/// An absent value is always represented as an empty field, never as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepeatedField<T>(Vec<T>);

impl<T> RepeatedField<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Build a field by iterating `values` once and appending each element.
    pub fn from_collection<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut field = Self::new();
        field.extend(values);
        field
    }

    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for RepeatedField<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RepeatedField<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> Extend<T> for RepeatedField<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> FromIterator<T> for RepeatedField<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_collection(iter)
    }
}

impl<T> IntoIterator for RepeatedField<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RepeatedField<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> From<Vec<T>> for RepeatedField<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> From<RepeatedField<T>> for Vec<T> {
    fn from(field: RepeatedField<T>) -> Self {
        field.0
    }
}

impl From<&[&str]> for RepeatedField<String> {
    fn from(values: &[&str]) -> Self {
        values.iter().map(|v| v.to_string()).collect()
    }
}
