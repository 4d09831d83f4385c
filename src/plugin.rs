//! Plugins and the hook manager that runs them at the five pipeline points.
//!
//! A [`Plugin`] is a named, prioritized bundle of hook functions built with
//! a small builder:
//!
//! ```rust
//! use markpipe::plugin::{Plugin, PluginKind};
//!
//! let shout = Plugin::new("shout", PluginKind::Transform)
//!     .with_priority(1)
//!     .before_parse(|text, _ctx| Ok(Some(text.to_uppercase())));
//! ```
//!
//! Hooks return `Ok(Some(value))` to replace the value being threaded,
//! `Ok(None)` to leave it alone, or `Err` to report a failure. Failures and
//! panics are logged and skipped; they never abort the pipeline.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::renderer::RenderOutput;
use crate::syntax::Node;

pub mod builtin;
mod context;
mod error;
pub mod hooks;
mod manager;

pub use context::PluginContext;
pub use error::PluginError;
pub use hooks::{
    HookEntry, HookKind, HookPayload, HookTable, LifecycleHook, NodeRenderHook, OutputHook,
    TextHook, TreeHook,
};
pub use manager::{ManagerOverride, PluginManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Adds or reinterprets markdown syntax
    Syntax,
    /// Changes how nodes are rendered
    Renderer,
    /// Rewrites the tree or the output
    Transform,
    /// Adds derived content (tables of contents and the like)
    Extension,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluginKind::Syntax => "syntax",
            PluginKind::Renderer => "renderer",
            PluginKind::Transform => "transform",
            PluginKind::Extension => "extension",
        };
        f.write_str(name)
    }
}

/// The hook functions a plugin declares, at most one per kind.
#[derive(Clone, Default)]
pub struct PluginHooks {
    pub before_parse: Option<TextHook>,
    pub after_parse: Option<TreeHook>,
    pub before_render: Option<TreeHook>,
    pub after_render: Option<OutputHook>,
    pub render_node: Option<NodeRenderHook>,
}

impl PluginHooks {
    pub fn kinds(&self) -> Vec<HookKind> {
        let mut kinds = Vec::new();
        if self.before_parse.is_some() {
            kinds.push(HookKind::BeforeParse);
        }
        if self.after_parse.is_some() {
            kinds.push(HookKind::AfterParse);
        }
        if self.before_render.is_some() {
            kinds.push(HookKind::BeforeRender);
        }
        if self.after_render.is_some() {
            kinds.push(HookKind::AfterRender);
        }
        if self.render_node.is_some() {
            kinds.push(HookKind::RenderNode);
        }
        kinds
    }
}

#[derive(Clone)]
pub struct Plugin {
    pub name: String,
    pub kind: PluginKind,
    pub priority: i32,
    pub hooks: PluginHooks,
    pub init: Option<LifecycleHook>,
    pub destroy: Option<LifecycleHook>,
}

impl Plugin {
    pub fn new(name: impl Into<String>, kind: PluginKind) -> Self {
        Self {
            name: name.into(),
            kind,
            priority: 0,
            hooks: PluginHooks::default(),
            init: None,
            destroy: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn before_parse(
        mut self,
        hook: impl Fn(&str, &PluginContext) -> Result<Option<String>, PluginError> + 'static,
    ) -> Self {
        self.hooks.before_parse = Some(Rc::new(hook));
        self
    }

    pub fn after_parse(
        mut self,
        hook: impl Fn(&Node, &PluginContext) -> Result<Option<Node>, PluginError> + 'static,
    ) -> Self {
        self.hooks.after_parse = Some(Rc::new(hook));
        self
    }

    pub fn before_render(
        mut self,
        hook: impl Fn(&Node, &PluginContext) -> Result<Option<Node>, PluginError> + 'static,
    ) -> Self {
        self.hooks.before_render = Some(Rc::new(hook));
        self
    }

    pub fn after_render(
        mut self,
        hook: impl Fn(&RenderOutput, &PluginContext) -> Result<Option<RenderOutput>, PluginError>
        + 'static,
    ) -> Self {
        self.hooks.after_render = Some(Rc::new(hook));
        self
    }

    pub fn render_node(
        mut self,
        hook: impl Fn(&Node, &PluginContext) -> Result<Option<RenderOutput>, PluginError> + 'static,
    ) -> Self {
        self.hooks.render_node = Some(Rc::new(hook));
        self
    }

    pub fn on_init(
        mut self,
        hook: impl Fn(&PluginContext) -> Result<(), PluginError> + 'static,
    ) -> Self {
        self.init = Some(Rc::new(hook));
        self
    }

    pub fn on_destroy(
        mut self,
        hook: impl Fn(&PluginContext) -> Result<(), PluginError> + 'static,
    ) -> Self {
        self.destroy = Some(Rc::new(hook));
        self
    }

    pub fn hook_kinds(&self) -> Vec<HookKind> {
        self.hooks.kinds()
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("hooks", &self.hook_kinds())
            .field("init", &self.init.is_some())
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}

/// Per-registration settings.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Registration id; defaults to the plugin name.
    pub id: Option<String>,
    /// Passed to `init` under the context's `options` key.
    pub options: Map<String, Value>,
}

impl RegisterOptions {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            options: Map::new(),
        }
    }

    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }
}
