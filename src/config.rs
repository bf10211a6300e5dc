//! Emitter options, optionally loaded from a JSON config file.
//!
//! ```json
//! { "event": "replace", "indent": "tab", "table_builder_var": "builder" }
//! ```
//!
//! Every key is optional; unknown keys are rejected with the path they were found at.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::path_de::{PathDeError, from_slice_with_path, from_str_with_path};

/// How emitted pools are merged into the host table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TableEvent {
    /// Append every pool to the table builder.
    #[default]
    Modify,
    /// Merge the first pool's entries into the original table's first pool.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentRepr")]
pub enum Indent {
    Tab,
    Spaces(u8),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    /// Text of one indentation level.
    pub fn unit(self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(n as usize),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Width(u8),
    Name(String),
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(repr: IndentRepr) -> Result<Self, Self::Error> {
        match repr {
            IndentRepr::Width(0) => Err("indent width must be at least 1".to_string()),
            IndentRepr::Width(n) => Ok(Indent::Spaces(n)),
            IndentRepr::Name(name) => name.parse(),
        }
    }
}

impl FromStr for Indent {
    type Err = String;

    /// `tab` or a number of spaces.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case("tab") {
            return Ok(Indent::Tab);
        }
        match raw.parse::<u8>() {
            Ok(0) | Err(_) => Err(format!("expected `tab` or a number of spaces, found `{raw}`")),
            Ok(n) => Ok(Indent::Spaces(n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    pub event: TableEvent,
    pub indent: Indent,
    /// Host variable holding the registry key of the table being loaded.
    pub key_var: String,
    pub table_builder_var: String,
    /// Host variable holding the registry lookup (enchantments are resolved through it).
    pub registries_var: String,
    /// Prefix of the per-pool builder variables (`lootPool0`, `lootPool1`, ...).
    pub pool_var: String,
    /// Host variable holding the original table (replace mode).
    pub original_var: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            event: TableEvent::Modify,
            indent: Indent::default(),
            key_var: "key".to_string(),
            table_builder_var: "tableBuilder".to_string(),
            registries_var: "registries".to_string(),
            pool_var: "lootPool".to_string(),
            original_var: "original".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: PathDeError,
    },
}

impl EmitOptions {
    pub fn from_json(src: &str) -> Result<Self, PathDeError> {
        from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let options = from_slice_with_path(&bytes)
            .map_err(|source| ConfigError::Invalid { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), ?options, "loaded emit options");
        Ok(options)
    }
}
