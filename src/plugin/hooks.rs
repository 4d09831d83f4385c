//! Hook kinds, payloads, and per-kind priority-ordered hook tables.

use std::fmt;
use std::rc::Rc;

use crate::renderer::RenderOutput;
use crate::syntax::Node;

use super::{PluginContext, PluginError};

/// The five pipeline extension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookKind {
    BeforeParse,
    AfterParse,
    BeforeRender,
    AfterRender,
    RenderNode,
}

impl HookKind {
    pub const ALL: [HookKind; 5] = [
        HookKind::BeforeParse,
        HookKind::AfterParse,
        HookKind::BeforeRender,
        HookKind::AfterRender,
        HookKind::RenderNode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::BeforeParse => "BEFORE_PARSE",
            HookKind::AfterParse => "AFTER_PARSE",
            HookKind::BeforeRender => "BEFORE_RENDER",
            HookKind::AfterRender => "AFTER_RENDER",
            HookKind::RenderNode => "RENDER_NODE",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `BEFORE_PARSE`: source text in, replacement text out.
pub type TextHook = Rc<dyn Fn(&str, &PluginContext) -> Result<Option<String>, PluginError>>;
/// `AFTER_PARSE` / `BEFORE_RENDER`: tree in, replacement tree out.
pub type TreeHook = Rc<dyn Fn(&Node, &PluginContext) -> Result<Option<Node>, PluginError>>;
/// `AFTER_RENDER`: render output in, replacement output out.
pub type OutputHook =
    Rc<dyn Fn(&RenderOutput, &PluginContext) -> Result<Option<RenderOutput>, PluginError>>;
/// `RENDER_NODE`: `Some` replaces the default rendering of the node.
pub type NodeRenderHook =
    Rc<dyn Fn(&Node, &PluginContext) -> Result<Option<RenderOutput>, PluginError>>;
/// `init` / `destroy` callbacks.
pub type LifecycleHook = Rc<dyn Fn(&PluginContext) -> Result<(), PluginError>>;

/// The value threaded through one data-carrying hook chain.
#[derive(Debug, Clone, PartialEq)]
pub enum HookPayload {
    BeforeParse(String),
    AfterParse(Node),
    BeforeRender(Node),
    AfterRender(RenderOutput),
}

impl HookPayload {
    pub fn kind(&self) -> HookKind {
        match self {
            HookPayload::BeforeParse(_) => HookKind::BeforeParse,
            HookPayload::AfterParse(_) => HookKind::AfterParse,
            HookPayload::BeforeRender(_) => HookKind::BeforeRender,
            HookPayload::AfterRender(_) => HookKind::AfterRender,
        }
    }
}

/// One registered hook function and the plugin that owns it.
#[derive(Clone)]
pub struct HookEntry<F> {
    pub plugin_id: String,
    pub priority: i32,
    pub hook: F,
}

/// Hooks of one kind, highest priority first; equal priorities keep
/// registration order.
#[derive(Clone)]
pub struct HookTable<F> {
    entries: Vec<HookEntry<F>>,
}

impl<F> Default for HookTable<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> HookTable<F> {
    /// Inserts before the first entry with strictly lower priority.
    pub fn insert(&mut self, entry: HookEntry<F>) {
        let at = self
            .entries
            .iter()
            .position(|e| e.priority < entry.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
    }

    /// Drops every entry owned by `plugin_id`; returns how many were removed.
    pub fn remove_plugin(&mut self, plugin_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.plugin_id != plugin_id);
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookEntry<F>> {
        self.entries.iter()
    }

    pub fn plugin_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.plugin_id.as_str()).collect()
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
}
