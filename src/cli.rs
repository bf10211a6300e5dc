//! CLI: translate loot tables → (java | ir), or list the known kinds.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use lootgen::{Category, EmitOptions, Indent, Registry, TableEvent};

use crate::driver::{self, DriverSettings, Outcome};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate loot-table JSON into Fabric loot-table builder code
#[derive(Parser, Debug)]
#[command(name = "lootgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate and print the builder code, one guarded block per table
    Java(JavaOut),
    /// translate and print the intermediate representation as JSON
    Ir(IrOut),
    /// list the registered discriminators per category
    Kinds,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer selecting the loot table in each document (e.g. /data/table)
    #[arg(long)]
    json_pointer: Option<String>,

    /// keys of files outside a datapack layout are taken relative to this directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// namespace for keys not derived from a datapack layout
    #[arg(long, default_value = lootgen::ident::DEFAULT_NAMESPACE)]
    namespace: String,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct EmitSettings {
    /// JSON file with emit options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// how pools are merged into the host table
    #[arg(long, value_enum)]
    event: Option<TableEvent>,

    /// `tab` or a number of spaces
    #[arg(long)]
    indent: Option<Indent>,
}

#[derive(clap::Parser, Debug)]
struct JavaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    emit_settings: EmitSettings,

    /// output .java file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct IrOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            root: self.root.clone(),
            namespace: self.namespace.clone(),
            json_pointer: self.json_pointer.clone(),
        }
    }

    fn load_process(&self, registry: &Registry) -> anyhow::Result<Vec<Outcome>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        tracing::debug!(files = source_paths.len(), "resolved inputs");
        Ok(driver::translate_all(registry, &self.driver_settings(), &source_paths))
    }
}

impl EmitSettings {
    fn resolve(&self) -> anyhow::Result<EmitOptions> {
        let mut options = match self.config.as_deref() {
            Some(path) => EmitOptions::load(path)?,
            None => EmitOptions::default(),
        };
        if let Some(event) = self.event {
            options.event = event;
        }
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        }
    }

    pub fn run(&self) -> anyhow::Result<ExitCode> {
        let registry = Registry::vanilla()?;
        match &self.cmd {
            Command::Java(target) => {
                let options = target.emit_settings.resolve()?;
                let outcomes = target.input_settings.load_process(&registry)?;
                let mut blocks = Vec::new();
                for outcome in &outcomes {
                    if let Ok(table) = &outcome.result {
                        blocks.push(driver::render_java(&outcome.path, table, &options));
                    }
                }
                write_output(target.out.as_deref(), &blocks.join("\n"))?;
                Ok(report(&outcomes))
            }
            Command::Ir(target) => {
                let outcomes = target.input_settings.load_process(&registry)?;
                let tables: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).collect();
                let src = serde_json::to_string_pretty(&tables).context("failed to serialize IR")?;
                write_output(target.out.as_deref(), &format!("{src}\n"))?;
                Ok(report(&outcomes))
            }
            Command::Kinds => {
                for category in Category::ALL {
                    println!("{}", category.to_string().bold());
                    for kind in registry.kinds(category) {
                        println!("  {kind}");
                    }
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{src}");
            Ok(())
        }
    }
}

/// Per-file failures plus a one-line summary on stderr; non-zero exit if anything failed.
fn report(outcomes: &[Outcome]) -> ExitCode {
    let failed: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().err()).collect();
    for error in &failed {
        eprintln!("{} {error}", "❌".red());
    }
    let ok = outcomes.len() - failed.len();
    eprintln!(
        "{} translated, {} failed",
        ok.to_string().green(),
        if failed.is_empty() { failed.len().to_string().normal() } else { failed.len().to_string().red() },
    );
    if failed.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                // an explicit glob must match something
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
            matched.sort();
            out.append(&mut matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
