use std::env;
use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

use cli::Cli;

const BIN: &str = "markpipe";

fn write_completions(outdir: &Path) -> Result<()> {
    let mut cmd = Cli::command();
    for shell in [
        Shell::Bash,
        Shell::Fish,
        Shell::Zsh,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        generate_to(shell, &mut cmd, BIN, outdir)?;
    }
    Ok(())
}

fn write_man_page(cmd: Command, title: &str, dir: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd).title(title).render(&mut buffer)?;
    fs::write(dir.join(format!("{title}.1")), buffer)
}

/// `markpipe.1` plus `markpipe-<command>.1` for render, parse, tokens and
/// plugins.
fn write_man_pages(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let cmd = Cli::command();
    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let title = format!("{BIN}-{}", sub.get_name());
        write_man_page(sub.clone(), &title, dir)?;
    }
    write_man_page(cmd, BIN, dir)
}

fn main() -> Result<()> {
    if let Some(outdir) = env::var_os("OUT_DIR") {
        write_completions(Path::new(&outdir))?;
    }
    write_man_pages(&PathBuf::from("target/man"))?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
