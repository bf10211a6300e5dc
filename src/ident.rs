//! Namespaced identifiers (`namespace:path`) and registry-key derivation from file paths.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

static NAMESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_.-]+$").unwrap());
static PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_./-]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier `{0}`")]
pub struct InvalidIdentifier(pub String);

/// A resource location. Parsing a bare path fills in the `minecraft` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub fn new(namespace: &str, path: &str) -> Result<Self, InvalidIdentifier> {
        if NAMESPACE.is_match(namespace) && PATH.is_match(path) {
            Ok(Self { namespace: namespace.to_string(), path: path.to_string() })
        } else {
            Err(InvalidIdentifier(format!("{namespace}:{path}")))
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_vanilla(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }

    /// Registry key of a loot table file.
    ///
    /// - `…/data/<ns>/loot_table/<path>.json` (or `loot_tables/`) → `<ns>:<path>`
    /// - a file under `root` → `<namespace>:<path relative to root>`
    /// - anything else → `<namespace>:<file stem>`
    pub fn from_table_path(
        file: &Path,
        root: Option<&Path>,
        namespace: &str,
    ) -> Result<Self, InvalidIdentifier> {
        let parts = path_parts(file);

        let datapack = parts.windows(3).position(|w| {
            w[0] == "data" && (w[2] == "loot_table" || w[2] == "loot_tables")
        });
        if let Some(at) = datapack {
            let rest = &parts[at + 3..];
            if !rest.is_empty() {
                return Self::new(&parts[at + 1], &strip_json(&rest.join("/")));
            }
        }

        if let Some(rel) = root.and_then(|root| file.strip_prefix(root).ok()) {
            let rel = path_parts(rel);
            if !rel.is_empty() {
                return Self::new(namespace, &strip_json(&rel.join("/")));
            }
        }

        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(namespace, &stem)
    }
}

fn path_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

fn strip_json(path: &str) -> String {
    path.strip_suffix(".json").unwrap_or(path).to_string()
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, raw),
        }
        .map_err(|_| InvalidIdentifier(raw.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
