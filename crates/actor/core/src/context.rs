//! Shared actor data snapshot.
//!
//! A [`Context`] is a typed key/value map the owning actor injects into its
//! states and abilities. It is replaced wholesale by `set_context` (no deep
//! merge) and read through typed accessors that fall back to a caller
//! default instead of raising: a missing key is silent, a type mismatch is
//! logged. The same type carries transition payloads.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single typed value stored in a [`Context`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Vec3(Vec3),
    Str(String),
}

impl ContextValue {
    /// Human-readable name of the variant, used in mismatch logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContextValue::Bool(_) => "bool",
            ContextValue::Int(_) => "int",
            ContextValue::Float(_) => "float",
            ContextValue::Vec3(_) => "vec3",
            ContextValue::Str(_) => "str",
        }
    }
}

/// Read-mostly snapshot of actor data keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    values: BTreeMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one if the key was present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: ContextValue,
    ) -> Option<ContextValue> {
        self.values.insert(key.into(), value)
    }

    /// Builder-style insert for constructing payloads inline.
    pub fn with(mut self, key: impl Into<String>, value: ContextValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fetches a bool, falling back to `default` when the key is absent or
    /// holds another type.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(ContextValue::Bool(value)) => *value,
            Some(other) => self.mismatch(key, "bool", other, default),
            None => default,
        }
    }

    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(ContextValue::Int(value)) => *value,
            Some(other) => self.mismatch(key, "int", other, default),
            None => default,
        }
    }

    pub fn float_or(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(ContextValue::Float(value)) => *value,
            Some(other) => self.mismatch(key, "float", other, default),
            None => default,
        }
    }

    pub fn vec3_or(&self, key: &str, default: Vec3) -> Vec3 {
        match self.values.get(key) {
            Some(ContextValue::Vec3(value)) => *value,
            Some(other) => self.mismatch(key, "vec3", other, default),
            None => default,
        }
    }

    pub fn str_or(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(ContextValue::Str(value)) => value.clone(),
            Some(other) => self.mismatch(key, "str", other, default.to_owned()),
            None => default.to_owned(),
        }
    }

    fn mismatch<T>(&self, key: &str, expected: &str, found: &ContextValue, default: T) -> T {
        warn!(
            target: "actor_core::context",
            key,
            expected,
            found = found.kind(),
            "context type mismatch, using default"
        );
        default
    }
}
