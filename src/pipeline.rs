//! The hooked pipeline: BEFORE_PARSE, parse, AFTER_PARSE, BEFORE_RENDER,
//! render (with RENDER_NODE overrides), AFTER_RENDER.

use crate::config::Config;
use crate::parser::parse_with_mode;
use crate::plugin::builtin;
use crate::plugin::{Plugin, PluginContext, PluginManager, RegisterOptions};
use crate::renderer::{Components, RenderOptions, RenderOutput, RenderProcessor};
use crate::syntax::Node;

pub struct Pipeline {
    config: Config,
    plugins: PluginManager,
    processor: RenderProcessor,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Pipeline {
    /// Builds a pipeline with the builtin plugins enabled in `config`.
    pub fn new(config: Config) -> Self {
        let mut plugins = PluginManager::new();
        plugins.set_context(config.context_values());

        let toggles = config.plugins;
        let enabled = [
            (toggles.table, builtin::table as fn() -> Plugin),
            (toggles.task_list, builtin::task_list),
            (toggles.toc, builtin::table_of_contents),
            (toggles.footnote, builtin::footnote),
        ];
        for (on, make) in enabled {
            if on {
                plugins.register(make(), RegisterOptions::default());
            }
        }

        let processor = RenderProcessor::new(config.render_options());
        Self {
            config,
            plugins,
            processor,
        }
    }

    /// A pipeline with no plugins at all.
    pub fn bare(config: Config) -> Self {
        let processor = RenderProcessor::new(config.render_options());
        let mut plugins = PluginManager::new();
        plugins.set_context(config.context_values());
        Self {
            config,
            plugins,
            processor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginManager {
        &mut self.plugins
    }

    /// Registers an extra plugin; returns its id.
    pub fn register(&mut self, plugin: Plugin, options: RegisterOptions) -> String {
        self.plugins.register(plugin, options)
    }

    pub fn render_processor(&self) -> &RenderProcessor {
        &self.processor
    }

    /// Replaces the render options and refreshes the matching context keys.
    pub fn update_render_options(&mut self, options: RenderOptions) {
        self.config.format = options.format;
        self.config.sanitize = options.sanitize;
        self.config.link_target = options.link_target.clone().unwrap_or_default();
        self.plugins.set_context(self.config.context_values());
        self.processor.update_options(options);
    }

    /// Components for the element-tree renderer.
    pub fn set_components(&mut self, components: Components) {
        let options = RenderOptions {
            components,
            ..self.processor.options().clone()
        };
        self.processor.update_options(options);
    }

    /// Source text to document tree, through the parse hooks.
    pub fn parse(&self, input: &str) -> Node {
        let ctx = &PluginContext::new();
        let text = self.plugins.run_before_parse(input.to_string(), ctx);
        let doc = parse_with_mode(&text, self.config.parser);
        log::debug!("Parsed {} top-level blocks", doc.children.len());
        self.plugins.run_after_parse(doc, ctx)
    }

    /// Document tree to output, through the render hooks.
    pub fn render(&self, doc: &Node) -> RenderOutput {
        let ctx = &PluginContext::new();
        let doc = self.plugins.run_before_render(doc.clone(), ctx);
        let output = self
            .processor
            .render_with(&doc, &self.plugins.node_override(ctx));
        self.plugins.run_after_render(output, ctx)
    }

    /// Parses and renders `input`.
    pub fn process(&self, input: &str) -> RenderOutput {
        self.render(&self.parse(input))
    }
}
