//! Key/value context handed to every hook and lifecycle callback.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::renderer::RenderOptions;

/// A JSON object of pipeline-wide settings (`format`, `sanitize`,
/// `linkTarget`, ...) plus anything plugins or callers add.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PluginContext {
    values: Map<String, Value>,
}

impl PluginContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// The global keys derived from render options.
    pub fn from_render_options(options: &RenderOptions) -> Self {
        let mut ctx = Self::new();
        ctx.insert("format", options.format.as_str());
        ctx.insert("sanitize", options.sanitize);
        ctx.insert(
            "linkTarget",
            options.link_target.clone().unwrap_or_default(),
        );
        ctx
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Shallow merge: keys in `other` overwrite keys here.
    pub fn merge(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.values.insert(key, value);
        }
    }

    /// A copy with `options` stored under the `options` key.
    pub fn with_options(&self, options: Map<String, Value>) -> Self {
        let mut ctx = self.clone();
        ctx.values.insert("options".to_string(), Value::Object(options));
        ctx
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
