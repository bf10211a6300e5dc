//! Loot-table JSON → builder-chain source.
//!
//! ```text
//! text ──parse──▶ serde_json::Value ──translate──▶ ir::LootTable ──emit──▶ Java source
//! ```
//!
//! The three stages are pure functions; file discovery and I/O belong to the binary.

pub mod config;
pub mod emit;
pub mod error;
pub mod ident;
pub mod ir;
pub mod kinds;
pub mod path_de;
pub mod registry;
pub mod translate;
pub mod value;

pub use config::{EmitOptions, Indent, TableEvent};
pub use emit::Emitter;
pub use error::{Error, MalformedInputError, RegistrationError, SchemaError, SchemaErrorKind};
pub use ident::Identifier;
pub use ir::LootTable;
pub use registry::{Category, Registry};
pub use translate::Translator;

use serde_json::Value;

pub fn parse(text: &str) -> Result<Value, MalformedInputError> {
    value::parse(text)
}

pub fn translate(registry: &Registry, key: Identifier, root: &Value) -> Result<LootTable, SchemaError> {
    Translator::new(registry).translate(key, root)
}

pub fn emit(table: &LootTable, options: &EmitOptions) -> String {
    Emitter::new(options).emit(table)
}

/// `parse` → `translate` → `emit` in one call.
pub fn convert(
    registry: &Registry,
    key: Identifier,
    text: &str,
    options: &EmitOptions,
) -> Result<String, Error> {
    let root = parse(text)?;
    let table = translate(registry, key, &root)?;
    Ok(emit(&table, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Identifier {
        "chests/igloo_chest".parse().unwrap()
    }

    #[test]
    fn convert_runs_all_three_stages() {
        let registry = Registry::vanilla().unwrap();
        let text = r#"{"pools":[{"rolls":1,"entries":[{"type":"minecraft:item","name":"minecraft:carrot"}],"conditions":[{"condition":"minecraft:random_chance","chance":0.5}]}]}"#;
        let out = convert(&registry, key(), text, &EmitOptions::default()).unwrap();
        assert!(out.starts_with(
            r#"if (key.equals(RegistryKey.of(RegistryKeys.LOOT_TABLE, Identifier.of("minecraft:chests/igloo_chest")))) {"#
        ));
        assert_eq!(out.matches("LootPool.builder()").count(), 1);
        assert_eq!(out.matches(".with(").count(), 1);
        assert!(out.contains(".with(ItemEntry.builder(Items.CARROT))"));
        assert!(out.contains(".conditionally(RandomChanceLootCondition.builder(0.5F))"));
    }

    #[test]
    fn convert_surfaces_stage_errors_unmodified() {
        let registry = Registry::vanilla().unwrap();
        let err = convert(&registry, key(), "{\"pools\": [", &EmitOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let err = convert(&registry, key(), r#"{"pools": [{"rolls": 1, "entries": []}]}"#, &EmitOptions::default())
            .unwrap_err();
        match err {
            Error::Schema(err) => assert_eq!(err.path.to_string(), "pools[0].entries"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
