//! Golden-file runner: every `fixtures/**/*.json` is converted and compared byte-for-byte
//! with the `.java` file next to it.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lootgen::{EmitOptions, Identifier, Registry};
use pretty_assertions::StrComparison;

#[derive(Parser, Debug)]
struct Cli {
    /// fixture root; keys are derived relative to it
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// overwrite the expected `.java` files with the current output
    #[arg(long)]
    bless: bool,
}

enum Verdict {
    Pass,
    Blessed,
    Mismatch { expected: String, actual: String },
    Error(anyhow::Error),
}

fn check(registry: &Registry, cli: &Cli, path: &Path) -> Verdict {
    let actual = match convert(registry, &cli.fixtures, path) {
        Ok(actual) => actual,
        Err(error) => return Verdict::Error(error),
    };
    let expected_path = path.with_extension("java");
    if cli.bless {
        return match std::fs::write(&expected_path, &actual) {
            Ok(()) => Verdict::Blessed,
            Err(error) => Verdict::Error(error.into()),
        };
    }
    match std::fs::read_to_string(&expected_path) {
        Ok(expected) if expected == actual => Verdict::Pass,
        Ok(expected) => Verdict::Mismatch { expected, actual },
        Err(error) => Verdict::Error(
            anyhow::Error::from(error).context(format!("missing {}", expected_path.display())),
        ),
    }
}

fn convert(registry: &Registry, root: &Path, path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)?;
    let key = Identifier::from_table_path(path, Some(root), lootgen::ident::DEFAULT_NAMESPACE)?;
    Ok(lootgen::convert(registry, key, &text, &EmitOptions::default())?)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let registry = Registry::vanilla()?;
    let pattern = format!("{}/**/*.json", cli.fixtures.display());
    let mut paths = glob::glob(&pattern)
        .context("invalid fixture pattern")?
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    let mut failed = 0usize;
    for path in &paths {
        let name = path.strip_prefix(&cli.fixtures).unwrap_or(path.as_path()).display();
        match check(&registry, &cli, path) {
            Verdict::Pass => println!("✅ {name}"),
            Verdict::Blessed => println!("📝 {name}"),
            Verdict::Mismatch { expected, actual } => {
                failed += 1;
                println!("❌ {name}");
                println!("{}", StrComparison::new(&expected, &actual));
            }
            Verdict::Error(error) => {
                failed += 1;
                println!("❌ {name}: {}", format!("{error:#}").red());
            }
        }
    }

    let passed = paths.len() - failed;
    println!("{} passed, {} failed", passed.to_string().green(), failed.to_string().red());
    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
