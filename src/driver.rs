//! File-level batch processing around the core: read → parse → (pointer) → translate.
//!
//! Files are independent, so they are processed on the rayon pool; results come back in
//! input order and a failing file never stops the others.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use lootgen::ident::InvalidIdentifier;
use lootgen::{EmitOptions, Identifier, LootTable, Registry, TableEvent};

#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// Keys are derived relative to this directory when no datapack layout is found.
    pub root: Option<PathBuf>,
    pub namespace: String,
    /// Selects the loot table inside each document (RFC 6901).
    pub json_pointer: Option<String>,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            root: None,
            namespace: lootgen::ident::DEFAULT_NAMESPACE.to_string(),
            json_pointer: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{}: cannot read file: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: cannot derive a registry key: {source}", .path.display())]
    Key {
        path: PathBuf,
        source: InvalidIdentifier,
    },
    #[error("{}: JSON pointer `{pointer}` selects nothing", .path.display())]
    Pointer { path: PathBuf, pointer: String },
    #[error("{}: {source}", .path.display())]
    Convert {
        path: PathBuf,
        source: lootgen::Error,
    },
}

#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub result: Result<LootTable, DriverError>,
}

pub fn translate_file(
    registry: &Registry,
    settings: &DriverSettings,
    path: &Path,
) -> Result<LootTable, DriverError> {
    let convert = |source: lootgen::Error| DriverError::Convert { path: path.to_path_buf(), source };

    let text = std::fs::read_to_string(path)
        .map_err(|source| DriverError::Read { path: path.to_path_buf(), source })?;
    let key = Identifier::from_table_path(path, settings.root.as_deref(), &settings.namespace)
        .map_err(|source| DriverError::Key { path: path.to_path_buf(), source })?;
    let document = lootgen::parse(&text).map_err(|e| convert(e.into()))?;
    let root = match settings.json_pointer.as_deref() {
        None => &document,
        Some(pointer) => document.pointer(pointer).ok_or_else(|| DriverError::Pointer {
            path: path.to_path_buf(),
            pointer: pointer.to_string(),
        })?,
    };
    let table = lootgen::translate(registry, key, root).map_err(|e| convert(e.into()))?;
    tracing::info!(path = %path.display(), key = %table.key, pools = table.pools.len(), "translated");
    Ok(table)
}

pub fn translate_all(registry: &Registry, settings: &DriverSettings, paths: &[PathBuf]) -> Vec<Outcome> {
    paths
        .par_iter()
        .map(|path| {
            let result = translate_file(registry, settings, path);
            if let Err(error) = &result {
                tracing::warn!("{error}");
            }
            Outcome { path: path.clone(), result }
        })
        .collect()
}

/// Emit one table, noting what the chosen event leaves out.
pub fn render_java(path: &Path, table: &LootTable, options: &EmitOptions) -> String {
    if options.event == TableEvent::Replace {
        if table.pools.len() > 1 {
            tracing::warn!(
                path = %path.display(),
                pools = table.pools.len(),
                "replace mode only merges the first pool; the others are dropped"
            );
        }
        if !table.functions.is_empty() {
            tracing::warn!(path = %path.display(), "replace mode drops table-level functions");
        }
    }
    lootgen::emit(table, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CARROT: &str = r#"{"pools":[{"rolls":1,"entries":[{"type":"minecraft:item","name":"minecraft:carrot"}]}]}"#;

    fn write(dir: &Path, rel: &str, text: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn keys_come_from_the_datapack_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "pack/data/mymod/loot_table/chests/vault.json", CARROT);
        let registry = Registry::vanilla().unwrap();
        let table = translate_file(&registry, &DriverSettings::default(), &path).unwrap();
        assert_eq!(table.key.to_string(), "mymod:chests/vault");
    }

    #[test]
    fn failures_are_isolated_and_order_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "a.json", CARROT);
        let bad = write(dir.path(), "b.json", r#"{"pools":[{"rolls":1,"entries":[]}]}"#);
        let broken = write(dir.path(), "c.json", "{");
        let missing = dir.path().join("d.json");
        let settings = DriverSettings { root: Some(dir.path().to_path_buf()), ..DriverSettings::default() };

        let registry = Registry::vanilla().unwrap();
        let paths = vec![good.clone(), bad.clone(), broken, missing];
        let outcomes = translate_all(&registry, &settings, &paths);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].path, good);
        assert_eq!(outcomes[0].result.as_ref().unwrap().key.to_string(), "minecraft:a");
        match &outcomes[1].result {
            Err(DriverError::Convert { path, source: lootgen::Error::Schema(err) }) => {
                assert_eq!(path, &bad);
                assert_eq!(err.path.to_string(), "pools[0].entries");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            outcomes[2].result,
            Err(DriverError::Convert { source: lootgen::Error::MalformedInput(_), .. })
        ));
        assert!(matches!(outcomes[3].result, Err(DriverError::Read { .. })));
    }

    #[test]
    fn json_pointer_selects_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let wrapped = format!(r#"{{"meta": 1, "table": {CARROT}}}"#);
        let path = write(dir.path(), "wrapped.json", &wrapped);
        let registry = Registry::vanilla().unwrap();

        let settings = DriverSettings { json_pointer: Some("/table".into()), ..DriverSettings::default() };
        let table = translate_file(&registry, &settings, &path).unwrap();
        assert_eq!(table.pools.len(), 1);

        let settings = DriverSettings { json_pointer: Some("/nope".into()), ..DriverSettings::default() };
        let err = translate_file(&registry, &settings, &path).unwrap_err();
        assert!(matches!(err, DriverError::Pointer { .. }));
    }

    #[test]
    fn errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.json", r#"{"pools":[{"entries":[{"type":"empty"}]}]}"#);
        let registry = Registry::vanilla().unwrap();
        let err = translate_file(&registry, &DriverSettings::default(), &path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.json"));
        assert!(message.ends_with("pools[0]: missing required field `rolls`"));
    }
}
