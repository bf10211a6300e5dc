//! IR → host source text.
//!
//! One guarded block per table:
//!
//! ```java
//! if (key.equals(RegistryKey.of(RegistryKeys.LOOT_TABLE, Identifier.of("ns:path")))) {
//!     LootPool.Builder lootPool0 = LootPool.builder()
//!         .rolls(...)
//!         .with(...);
//!     tableBuilder.pool(lootPool0);
//! }
//! ```
//!
//! Pure and deterministic: the same table and options always give byte-identical text.

pub mod expr;
pub mod java;

use crate::config::{EmitOptions, TableEvent};
use crate::ir::{LootTable, Pool};

use expr::{Expr, push_indent};
use java::{Lowering, registry_key};

pub struct Emitter<'o> {
    options: &'o EmitOptions,
}

impl<'o> Emitter<'o> {
    pub fn new(options: &'o EmitOptions) -> Self {
        Self { options }
    }

    pub fn emit(&self, table: &LootTable) -> String {
        let options = self.options;
        let indent = options.indent.unit();
        let lowering = Lowering::new(options);

        // Statements grouped into paragraphs; paragraphs are separated by one empty line.
        let mut paragraphs: Vec<Vec<String>> = Vec::new();
        match options.event {
            TableEvent::Modify => {
                for (index, pool) in table.pools.iter().enumerate() {
                    paragraphs.push(vec![
                        self.pool_declaration(&lowering, index, pool, &indent),
                        format!("{}.pool({}{index});", options.table_builder_var, options.pool_var),
                    ]);
                }
                if !table.functions.is_empty() {
                    let apply = format!("{}.apply", options.table_builder_var);
                    paragraphs.push(
                        table
                            .functions
                            .iter()
                            .map(|f| {
                                let call = Expr::call(apply.clone(), vec![lowering.function(f)]);
                                format!("{};", call.render(&indent, 1))
                            })
                            .collect(),
                    );
                }
            }
            TableEvent::Replace => {
                if let Some(pool) = table.pools.first() {
                    paragraphs.push(vec![
                        self.pool_declaration(&lowering, 0, pool, &indent),
                        format!(
                            "return mergePools({}, {}0.build());",
                            options.original_var, options.pool_var
                        ),
                    ]);
                }
            }
        }

        let guard = registry_key("RegistryKeys.LOOT_TABLE", &table.key).render(&indent, 0);
        let mut out = format!("if ({}.equals({guard})) {{\n", options.key_var);
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for statement in paragraph {
                push_indent(&mut out, &indent, 1);
                out.push_str(statement);
                out.push('\n');
            }
        }
        out.push_str("}\n");
        out
    }

    fn pool_declaration(&self, lowering: &Lowering<'_>, index: usize, pool: &Pool, indent: &str) -> String {
        format!(
            "LootPool.Builder {}{index} = {};",
            self.options.pool_var,
            lowering.pool(pool).render(indent, 1)
        )
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
