use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;

use markpipe::config::{self, Config, PluginToggles};
use markpipe::plugin::builtin::builtin_plugins;
use markpipe::syntax::utils::{Heading, ImageRef, LinkRef};
use markpipe::{
    OutputFormat, ParseMode, Pipeline, RenderOutput, extract_headings, extract_images,
    extract_links, plain_text, reading_time, tokenize,
};

mod cli;
use cli::{Cli, Commands, FormatArg, ModeArg};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

#[derive(Serialize)]
struct Outline {
    headings: Vec<Heading>,
    links: Vec<LinkRef>,
    images: Vec<ImageRef>,
    words: usize,
    reading_minutes: usize,
}

fn to_json<T: Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Tree => OutputFormat::Tree,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

impl From<ModeArg> for ParseMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Direct => ParseMode::Direct,
            ModeArg::Tokenized => ParseMode::Tokenized,
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            format,
            no_sanitize,
            link_target,
            no_plugins,
        } => {
            let mut cfg = load_config(cli.config.as_deref(), &file)?;
            if let Some(format) = format {
                cfg.format = format.into();
            }
            if no_sanitize {
                cfg.sanitize = false;
            }
            if let Some(target) = link_target {
                cfg.link_target = target;
            }
            if no_plugins {
                cfg.plugins = PluginToggles::none();
            }

            let input = read_all(file.as_ref())?;
            match Pipeline::new(cfg).process(&input) {
                RenderOutput::Tree(tree) => println!("{}", to_json(&tree)?),
                RenderOutput::Html(out) | RenderOutput::Text(out) => println!("{out}"),
            }
            Ok(())
        }
        Commands::Parse {
            file,
            mode,
            no_plugins,
        } => {
            let mut cfg = load_config(cli.config.as_deref(), &file)?;
            if let Some(mode) = mode {
                cfg.parser = mode.into();
            }

            let input = read_all(file.as_ref())?;
            let pipeline = if no_plugins {
                Pipeline::bare(cfg)
            } else {
                Pipeline::new(cfg)
            };
            println!("{}", to_json(&pipeline.parse(&input))?);
            Ok(())
        }
        Commands::Tokens { file } => {
            let input = read_all(file.as_ref())?;
            println!("{}", to_json(&tokenize(&input))?);
            Ok(())
        }
        Commands::Outline {
            file,
            words_per_minute,
        } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let input = read_all(file.as_ref())?;
            let doc = Pipeline::new(cfg).parse(&input);
            let outline = Outline {
                headings: extract_headings(&doc),
                links: extract_links(&doc),
                images: extract_images(&doc),
                words: plain_text(&doc).split_whitespace().count(),
                reading_minutes: reading_time(&doc, words_per_minute),
            };
            println!("{}", to_json(&outline)?);
            Ok(())
        }
        Commands::Plugins => {
            for plugin in builtin_plugins() {
                let hooks: Vec<_> = plugin
                    .hook_kinds()
                    .iter()
                    .map(|k| k.as_str())
                    .collect();
                println!(
                    "{:<16} {:<10} priority {:>2}  {}",
                    plugin.name,
                    plugin.kind.to_string(),
                    plugin.priority,
                    hooks.join(", ")
                );
            }
            Ok(())
        }
    }
}
