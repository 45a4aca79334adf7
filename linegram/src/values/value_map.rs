//! Identifier-keyed captures produced by parsers

use super::error::{ValueError, ValueResult};
use super::scalar::Scalar;
use std::any::Any;
use std::collections::hash_map;
use std::collections::HashMap;

/// A captured value: one scalar, or the ordered scalars of a repetition
#[derive(Debug, Clone)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Value {
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    fn shape(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
        }
    }
}

/// Identifier to value mapping; re-insertion overwrites
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: HashMap<String, Value>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single scalar
    pub fn single(id: &str, scalar: Scalar) -> Self {
        let mut map = Self::new();
        map.insert(id, scalar);
        map
    }

    pub fn insert(&mut self, id: &str, scalar: Scalar) {
        self.entries.insert(id.to_string(), Value::Scalar(scalar));
    }

    pub fn insert_value(&mut self, id: &str, value: Value) {
        self.entries.insert(id.to_string(), value);
    }

    pub fn insert_list(&mut self, id: &str, scalars: Vec<Scalar>) {
        self.entries.insert(id.to_string(), Value::List(scalars));
    }

    /// Append to the list under `id`, creating it if absent.
    ///
    /// An existing scalar becomes the first element of the list.
    pub fn push(&mut self, id: &str, scalar: Scalar) {
        let entry = self
            .entries
            .entry(id.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if let Value::Scalar(first) = entry {
            *entry = Value::List(vec![first.clone()]);
        }
        if let Value::List(list) = entry {
            list.push(scalar);
        }
    }

    /// Append `value` to the list under `id` as a single element.
    ///
    /// A list value is nested as one scalar holding `Vec<Scalar>`, so each
    /// repetition of a list-producing parser stays a separate group.
    pub fn append(&mut self, id: &str, value: &Value) {
        match value {
            Value::Scalar(scalar) => self.push(id, scalar.clone()),
            Value::List(scalars) => self.push(id, Scalar::new(scalars.clone())),
        }
    }

    pub fn get(&self, id: &str) -> ValueResult<&Value> {
        self.entries
            .get(id)
            .ok_or_else(|| ValueError::NotFound { id: id.to_string() })
    }

    pub fn scalar(&self, id: &str) -> ValueResult<&Scalar> {
        match self.get(id)? {
            Value::Scalar(scalar) => Ok(scalar),
            other => Err(ValueError::ShapeMismatch {
                id: id.to_string(),
                expected: "scalar",
                found: other.shape(),
            }),
        }
    }

    pub fn list(&self, id: &str) -> ValueResult<&[Scalar]> {
        match self.get(id)? {
            Value::List(list) => Ok(list),
            other => Err(ValueError::ShapeMismatch {
                id: id.to_string(),
                expected: "list",
                found: other.shape(),
            }),
        }
    }

    /// Typed scalar lookup
    pub fn get_as<T: Any>(&self, id: &str) -> ValueResult<&T> {
        self.scalar(id)?.get::<T>()
    }

    /// Typed list lookup; every element must hold a `T`
    pub fn list_as<T: Any>(&self, id: &str) -> ValueResult<Vec<&T>> {
        self.list(id)?.iter().map(|s| s.get::<T>()).collect()
    }

    /// Copy every entry of `other` into this map, overwriting on collision
    pub fn merge(&mut self, other: &ValueMap) {
        for (id, value) in &other.entries {
            self.entries.insert(id.clone(), value.clone());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
