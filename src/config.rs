use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::parser::ParseMode;
use crate::renderer::{OutputFormat, RenderOptions};

/// Which builtin plugins a pipeline registers.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PluginToggles {
    /// Pipe tables
    pub table: bool,
    /// `[ ]` / `[x]` list items
    pub task_list: bool,
    /// Heading ids and the `[TOC]` marker
    pub toc: bool,
    /// `[^id]` references and definitions
    pub footnote: bool,
}

impl Default for PluginToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl PluginToggles {
    pub fn all() -> Self {
        Self {
            table: true,
            task_list: true,
            toc: true,
            footnote: true,
        }
    }

    pub fn none() -> Self {
        Self {
            table: false,
            task_list: false,
            toc: false,
            footnote: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    /// Escape text and filter script URLs when rendering.
    pub sanitize: bool,
    /// Link `target`; an empty string omits the attribute.
    pub link_target: String,
    /// Passed through to plugins as the `theme` context key.
    pub theme: String,
    pub parser: ParseMode,
    pub plugins: PluginToggles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            sanitize: true,
            link_target: "_blank".to_string(),
            theme: "default".to_string(),
            parser: ParseMode::Direct,
            plugins: PluginToggles::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            sanitize: self.sanitize,
            link_target: Some(self.link_target.clone()).filter(|t| !t.is_empty()),
            ..RenderOptions::default()
        }
    }

    /// Global keys every hook sees in its context.
    pub fn context_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("format".into(), Value::from(self.format.as_str()));
        values.insert("sanitize".into(), Value::from(self.sanitize));
        values.insert("linkTarget".into(), Value::from(self.link_target.as_str()));
        values.insert("theme".into(), Value::from(self.theme.as_str()));
        values
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.config.sanitize = sanitize;
        self
    }

    pub fn link_target(mut self, target: &str) -> Self {
        self.config.link_target = target.to_string();
        self
    }

    pub fn theme(mut self, theme: &str) -> Self {
        self.config.theme = theme.to_string();
        self
    }

    pub fn parser(mut self, mode: ParseMode) -> Self {
        self.config.parser = mode;
        self
    }

    pub fn plugins(mut self, plugins: PluginToggles) -> Self {
        self.config.plugins = plugins;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".markpipe.toml", "markpipe.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("markpipe").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    let p = dirs::config_dir()?.join("markpipe").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .markpipe.toml, markpipe.toml
/// 3) $XDG_CONFIG_HOME/markpipe/config.toml, then the platform config dir
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = user_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
