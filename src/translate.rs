//! JSON tree → IR.
//!
//! Depth-first walk over `pools`; every polymorphic node (entry, condition, function,
//! number provider) is dispatched through the [`Registry`] by its discriminator. Converters
//! recurse back through the same methods, so nesting depth is unbounded and every error
//! carries the path of the node that caused it.
//!
//! Default policy:
//! - entry `weight` → 1, `quality` → 0
//! - pool `bonus_rolls` → `Constant(0)`
//! - a bare number wherever a number provider is expected → `Constant(that number)`

use serde_json::Value;

use crate::error::{SchemaError, SchemaErrorKind};
use crate::ident::Identifier;
use crate::ir::{DEFAULT_QUALITY, DEFAULT_WEIGHT, Condition, Entry, Function, LootTable, NumberProvider, Pool};
use crate::registry::{Category, Registry};
use crate::value::{Node, shape_of};

pub struct Translator<'r> {
    registry: &'r Registry,
}

impl<'r> Translator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Translate one loot-table document. All-or-nothing: the first violation aborts.
    pub fn translate(&self, key: Identifier, root: &Value) -> Result<LootTable, SchemaError> {
        let root = Node::root(root);
        root.as_mapping()?;

        let context = root.field("type")?.map(|n| n.as_ident()).transpose()?;
        let random_sequence = root.field("random_sequence")?.map(|n| n.as_ident()).transpose()?;
        let pools = root
            .list("pools")?
            .iter()
            .map(|node| self.pool(node))
            .collect::<Result<Vec<_>, _>>()?;
        let functions = self.functions(&root, "functions")?;

        tracing::trace!(%key, pools = pools.len(), "translated loot table");
        Ok(LootTable { key, context, random_sequence, pools, functions })
    }

    pub fn pool(&self, node: &Node<'_>) -> Result<Pool, SchemaError> {
        node.as_mapping()?;
        let rolls = self.number_provider(&node.required("rolls")?)?;
        let bonus_rolls = self
            .opt_number_provider(node, "bonus_rolls")?
            .unwrap_or_else(NumberProvider::zero);
        let entries = node
            .non_empty_list("entries")?
            .iter()
            .map(|entry| self.entry(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pool {
            rolls,
            bonus_rolls,
            entries,
            conditions: self.conditions(node, "conditions")?,
            functions: self.functions(node, "functions")?,
        })
    }

    // -------- entries --------

    pub fn entry(&self, node: &Node<'_>) -> Result<Entry, SchemaError> {
        let kind = node.discriminator(Category::Entry)?;
        let convert = self.registry.entry(&kind, node.path())?;
        Ok(Entry {
            kind: convert(self, node)?,
            weight: node.opt_i32("weight")?.unwrap_or(DEFAULT_WEIGHT),
            quality: node.opt_i32("quality")?.unwrap_or(DEFAULT_QUALITY),
            conditions: self.conditions(node, "conditions")?,
            functions: self.functions(node, "functions")?,
        })
    }

    /// A required, non-empty list of entries under `field` (composite entry children).
    pub fn entries(&self, parent: &Node<'_>, field: &str) -> Result<Vec<Entry>, SchemaError> {
        parent
            .non_empty_list(field)?
            .iter()
            .map(|node| self.entry(node))
            .collect()
    }

    // -------- conditions --------

    pub fn condition(&self, node: &Node<'_>) -> Result<Condition, SchemaError> {
        let kind = node.discriminator(Category::Condition)?;
        let convert = self.registry.condition(&kind, node.path())?;
        convert(self, node)
    }

    /// An optional list of conditions under `field`; absent means none.
    pub fn conditions(&self, parent: &Node<'_>, field: &str) -> Result<Vec<Condition>, SchemaError> {
        parent.list(field)?.iter().map(|node| self.condition(node)).collect()
    }

    // -------- functions --------

    pub fn function(&self, node: &Node<'_>) -> Result<Function, SchemaError> {
        let kind = node.discriminator(Category::Function)?;
        let convert = self.registry.function(&kind, node.path())?;
        Ok(Function {
            kind: convert(self, node)?,
            conditions: self.conditions(node, "conditions")?,
        })
    }

    pub fn functions(&self, parent: &Node<'_>, field: &str) -> Result<Vec<Function>, SchemaError> {
        parent.list(field)?.iter().map(|node| self.function(node)).collect()
    }

    // -------- number providers --------

    pub fn number_provider(&self, node: &Node<'_>) -> Result<NumberProvider, SchemaError> {
        match node.value() {
            Value::Number(_) => Ok(NumberProvider::constant(node.as_num()?)),
            Value::Object(_) => {
                let kind = node.discriminator(Category::NumberProvider)?;
                let convert = self.registry.number_provider(&kind, node.path())?;
                convert(self, node)
            }
            other => Err(node.error(SchemaErrorKind::WrongShape {
                expected: "number or mapping",
                found: shape_of(other),
            })),
        }
    }

    pub fn opt_number_provider(
        &self,
        parent: &Node<'_>,
        field: &str,
    ) -> Result<Option<NumberProvider>, SchemaError> {
        parent.field(field)?.map(|node| self.number_provider(&node)).transpose()
    }

    pub fn required_number_provider(
        &self,
        parent: &Node<'_>,
        field: &str,
    ) -> Result<NumberProvider, SchemaError> {
        self.number_provider(&parent.required(field)?)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
