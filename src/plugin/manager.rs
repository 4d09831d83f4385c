//! Plugin registration and hook dispatch.

use std::panic::{self, AssertUnwindSafe};

use serde_json::{Map, Value};

use crate::renderer::{NodeOverride, RenderOutput};
use crate::syntax::Node;

use super::hooks::{HookEntry, HookTable};
use super::{
    HookKind, HookPayload, NodeRenderHook, OutputHook, Plugin, PluginContext, PluginError,
    PluginKind, RegisterOptions, TextHook, TreeHook,
};

struct Registered {
    id: String,
    plugin: Plugin,
}

/// Registry of plugins and their hooks, one ordered table per hook kind.
///
/// Hook functions are reference counted closures, so a manager is confined
/// to the thread that built it.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Registered>,
    /// Every id ever passed to `register`, in first-seen order.
    seen_ids: Vec<String>,
    before_parse: HookTable<TextHook>,
    after_parse: HookTable<TreeHook>,
    before_render: HookTable<TreeHook>,
    after_render: HookTable<OutputHook>,
    render_node: HookTable<NodeRenderHook>,
    context: PluginContext,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin` and returns its id (`options.id`, else the plugin
    /// name). Registering an id that is already live changes nothing.
    pub fn register(&mut self, plugin: Plugin, options: RegisterOptions) -> String {
        let id = options.id.clone().unwrap_or_else(|| plugin.name.clone());
        if !self.seen_ids.contains(&id) {
            self.seen_ids.push(id.clone());
        }

        if self.is_registered(&id) {
            log::warn!("Plugin '{}' is already registered, skipping", id);
            return id;
        }

        if let Some(init) = &plugin.init {
            let ctx = self.context.with_options(options.options);
            if let Err(err) = guarded(|| init(&ctx)) {
                log::error!("Plugin '{}' failed to initialize: {}", id, err);
            }
        }

        let priority = plugin.priority;
        let hooks = &plugin.hooks;
        if let Some(hook) = &hooks.before_parse {
            self.before_parse.insert(entry(&id, priority, hook));
        }
        if let Some(hook) = &hooks.after_parse {
            self.after_parse.insert(entry(&id, priority, hook));
        }
        if let Some(hook) = &hooks.before_render {
            self.before_render.insert(entry(&id, priority, hook));
        }
        if let Some(hook) = &hooks.after_render {
            self.after_render.insert(entry(&id, priority, hook));
        }
        if let Some(hook) = &hooks.render_node {
            self.render_node.insert(entry(&id, priority, hook));
        }

        log::debug!(
            "Registered plugin '{}' ({}, priority {}) with hooks {:?}",
            id,
            plugin.kind,
            priority,
            plugin.hook_kinds()
        );
        self.plugins.push(Registered {
            id: id.clone(),
            plugin,
        });
        id
    }

    /// Calls `destroy`, removes every hook the plugin owns, and forgets it.
    /// Returns `false` for ids that are not registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(index) = self.plugins.iter().position(|p| p.id == id) else {
            return false;
        };
        let Registered { plugin, .. } = self.plugins.remove(index);

        if let Some(destroy) = &plugin.destroy
            && let Err(err) = guarded(|| destroy(&self.context))
        {
            log::error!("Plugin '{}' failed to clean up: {}", id, err);
        }

        let removed = self.before_parse.remove_plugin(id)
            + self.after_parse.remove_plugin(id)
            + self.before_render.remove_plugin(id)
            + self.after_render.remove_plugin(id)
            + self.render_node.remove_plugin(id);
        log::debug!("Unregistered plugin '{}' ({} hooks removed)", id, removed);
        true
    }

    /// Unregisters every id ever passed to [`register`](Self::register).
    pub fn unregister_all(&mut self) {
        for id in self.seen_ids.clone() {
            self.unregister(&id);
        }
    }

    /// Unregisters everything and forgets the registration history.
    pub fn clear(&mut self) {
        self.unregister_all();
        self.seen_ids.clear();
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.id == id)
    }

    pub fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.id == id).map(|p| &p.plugin)
    }

    /// Registered `(id, plugin)` pairs in registration order.
    pub fn plugins(&self) -> impl Iterator<Item = (&str, &Plugin)> {
        self.plugins.iter().map(|p| (p.id.as_str(), &p.plugin))
    }

    pub fn plugins_by_kind(&self, kind: PluginKind) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.plugin.kind == kind)
            .map(|p| &p.plugin)
            .collect()
    }

    pub fn hook_count(&self, kind: HookKind) -> usize {
        match kind {
            HookKind::BeforeParse => self.before_parse.len(),
            HookKind::AfterParse => self.after_parse.len(),
            HookKind::BeforeRender => self.before_render.len(),
            HookKind::AfterRender => self.after_render.len(),
            HookKind::RenderNode => self.render_node.len(),
        }
    }

    /// Plugin ids in the order their hooks of `kind` run.
    pub fn hook_order(&self, kind: HookKind) -> Vec<&str> {
        match kind {
            HookKind::BeforeParse => self.before_parse.plugin_ids(),
            HookKind::AfterParse => self.after_parse.plugin_ids(),
            HookKind::BeforeRender => self.before_render.plugin_ids(),
            HookKind::AfterRender => self.after_render.plugin_ids(),
            HookKind::RenderNode => self.render_node.plugin_ids(),
        }
    }

    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    /// Merges `partial` into the manager-held context.
    pub fn set_context(&mut self, partial: Map<String, Value>) {
        self.context.merge(partial);
    }

    /// The stored context overlaid with `ctx`; keys in `ctx` win.
    fn merged_context(&self, ctx: &PluginContext) -> PluginContext {
        let mut merged = self.context.clone();
        merged.merge(ctx.as_map().clone());
        merged
    }

    /// Runs the chain for the payload's kind and returns the final value.
    /// Hooks see the stored context overlaid with `ctx`.
    pub fn execute_hook(&self, payload: HookPayload, ctx: &PluginContext) -> HookPayload {
        match payload {
            HookPayload::BeforeParse(text) => {
                HookPayload::BeforeParse(self.run_before_parse(text, ctx))
            }
            HookPayload::AfterParse(node) => HookPayload::AfterParse(self.run_after_parse(node, ctx)),
            HookPayload::BeforeRender(node) => {
                HookPayload::BeforeRender(self.run_before_render(node, ctx))
            }
            HookPayload::AfterRender(output) => {
                HookPayload::AfterRender(self.run_after_render(output, ctx))
            }
        }
    }

    pub fn run_before_parse(&self, text: String, ctx: &PluginContext) -> String {
        let ctx = &self.merged_context(ctx);
        run_chain(&self.before_parse, HookKind::BeforeParse, text, ctx, |hook, acc, ctx| {
            hook(acc.as_str(), ctx)
        })
    }

    pub fn run_after_parse(&self, node: Node, ctx: &PluginContext) -> Node {
        let ctx = &self.merged_context(ctx);
        run_chain(&self.after_parse, HookKind::AfterParse, node, ctx, |hook, acc, ctx| {
            hook(acc, ctx)
        })
    }

    pub fn run_before_render(&self, node: Node, ctx: &PluginContext) -> Node {
        let ctx = &self.merged_context(ctx);
        run_chain(&self.before_render, HookKind::BeforeRender, node, ctx, |hook, acc, ctx| {
            hook(acc, ctx)
        })
    }

    pub fn run_after_render(&self, output: RenderOutput, ctx: &PluginContext) -> RenderOutput {
        let ctx = &self.merged_context(ctx);
        run_chain(&self.after_render, HookKind::AfterRender, output, ctx, |hook, acc, ctx| {
            hook(acc, ctx)
        })
    }

    /// Offers `node` to the `RENDER_NODE` chain; the first `Some` wins.
    pub fn render_node(&self, node: &Node, ctx: &PluginContext) -> Option<RenderOutput> {
        self.offer_node(node, &self.merged_context(ctx))
    }

    fn offer_node(&self, node: &Node, ctx: &PluginContext) -> Option<RenderOutput> {
        for entry in self.render_node.iter() {
            match guarded(|| (entry.hook)(node, ctx)) {
                Ok(Some(output)) => return Some(output),
                Ok(None) => {}
                Err(err) => report(&entry.plugin_id, HookKind::RenderNode, &err),
            }
        }
        None
    }

    /// A [`NodeOverride`] that consults this manager's `RENDER_NODE` chain.
    pub fn node_override(&self, ctx: &PluginContext) -> ManagerOverride<'_> {
        ManagerOverride {
            manager: self,
            ctx: self.merged_context(ctx),
        }
    }
}

/// Adapter handed to the render processor.
pub struct ManagerOverride<'a> {
    manager: &'a PluginManager,
    ctx: PluginContext,
}

impl NodeOverride for ManagerOverride<'_> {
    fn render_node(&self, node: &Node) -> Option<RenderOutput> {
        if self.manager.render_node.is_empty() {
            return None;
        }
        self.manager.offer_node(node, &self.ctx)
    }
}

fn entry<F: Clone>(id: &str, priority: i32, hook: &F) -> HookEntry<F> {
    HookEntry {
        plugin_id: id.to_string(),
        priority,
        hook: hook.clone(),
    }
}

/// Threads `acc` through every hook in `table`. `Some` replaces the
/// accumulator; `None`, errors, and panics leave it unchanged.
fn run_chain<F, T>(
    table: &HookTable<F>,
    kind: HookKind,
    mut acc: T,
    ctx: &PluginContext,
    call: impl Fn(&F, &T, &PluginContext) -> Result<Option<T>, PluginError>,
) -> T {
    for entry in table.iter() {
        log::trace!("Running {} hook of '{}'", kind, entry.plugin_id);
        match guarded(|| call(&entry.hook, &acc, ctx)) {
            Ok(Some(value)) => acc = value,
            Ok(None) => {}
            Err(err) => report(&entry.plugin_id, kind, &err),
        }
    }
    acc
}

/// Runs `f`, turning a panic into [`PluginError::Panicked`].
fn guarded<T>(f: impl FnOnce() -> Result<T, PluginError>) -> Result<T, PluginError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(PluginError::Panicked(message))
        }
    }
}

fn report(plugin_id: &str, kind: HookKind, err: &PluginError) {
    log::error!("Plugin '{}' failed in {} hook: {}", plugin_id, kind, err);
}
