// Entry kinds (`type` field). `weight`, `quality`, `conditions` and `functions` are read by the
// translator, not here. Composite builders only take `conditionally`, so the composites refuse
// the other three.

use crate::error::{RegistrationError, SchemaError, SchemaErrorKind};
use crate::ir::{Entry, EntryKind};
use crate::registry::Registry;
use crate::translate::Translator;
use crate::value::Node;

pub fn register(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry
        .register_entry("minecraft:empty", empty)?
        .register_entry("minecraft:item", item)?
        .register_entry("minecraft:tag", tag)?
        .register_entry("minecraft:loot_table", loot_table)?
        .register_entry("minecraft:dynamic", dynamic)?
        .register_entry("minecraft:alternatives", alternatives)?
        .register_entry("minecraft:group", group)?
        .register_entry("minecraft:sequence", sequence)?;
    Ok(())
}

fn empty(_: &Translator<'_>, _: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Empty)
}

fn item(_: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Item { name: node.ident_field("name")? })
}

fn tag(_: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Tag {
        name: node.ident_field("name")?,
        expand: node.bool_field("expand")?,
    })
}

// Only references by id; an inline table object is a wrong-shape error.
fn loot_table(_: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::LootTable { value: node.ident_field("value")? })
}

fn dynamic(_: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Dynamic { name: node.ident_field("name")? })
}

fn alternatives(tr: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Alternatives { children: children(tr, node)? })
}

fn group(tr: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Group { children: children(tr, node)? })
}

fn sequence(tr: &Translator<'_>, node: &Node<'_>) -> Result<EntryKind, SchemaError> {
    Ok(EntryKind::Sequence { children: children(tr, node)? })
}

const LEAF_ONLY: [&str; 3] = ["weight", "quality", "functions"];

fn children(tr: &Translator<'_>, node: &Node<'_>) -> Result<Vec<Entry>, SchemaError> {
    for name in LEAF_ONLY {
        if let Some(field) = node.field(name)? {
            return Err(field.error(SchemaErrorKind::InvalidValue(format!(
                "`{name}` is only allowed on leaf entries"
            ))));
        }
    }
    tr.entries(node, "children")
}

#[cfg(test)]
mod tests {
    use crate::error::SchemaErrorKind;
    use crate::ir::{Entry, EntryKind};
    use crate::registry::Registry;
    use crate::translate::Translator;
    use crate::value::Node;
    use serde_json::{Value, json};

    fn entry(v: Value) -> Result<Entry, crate::error::SchemaError> {
        let registry = Registry::vanilla().unwrap();
        Translator::new(&registry).entry(&Node::root(&v))
    }

    #[test]
    fn leaf_kinds() {
        let e = entry(json!({"type": "minecraft:tag", "name": "minecraft:logs", "expand": true})).unwrap();
        assert_eq!(e.kind, EntryKind::Tag { name: "minecraft:logs".parse().unwrap(), expand: true });

        let e = entry(json!({"type": "loot_table", "value": "minecraft:chests/simple_dungeon"})).unwrap();
        assert_eq!(
            e.kind,
            EntryKind::LootTable { value: "minecraft:chests/simple_dungeon".parse().unwrap() }
        );

        let e = entry(json!({"type": "dynamic", "name": "minecraft:contents"})).unwrap();
        assert_eq!(e.kind, EntryKind::Dynamic { name: "minecraft:contents".parse().unwrap() });
    }

    #[test]
    fn tag_requires_expand() {
        let err = entry(json!({"type": "tag", "name": "minecraft:logs"})).unwrap_err();
        assert_eq!(err.reason, SchemaErrorKind::MissingField("expand".into()));
    }

    #[test]
    fn composites_keep_child_order_and_entry_fields() {
        let e = entry(json!({
            "type": "minecraft:alternatives",
            "conditions": [{"condition": "survives_explosion"}],
            "children": [
                {"type": "item", "name": "minecraft:b", "weight": 3, "quality": -1},
                {"type": "item", "name": "minecraft:a"}
            ]
        }))
        .unwrap();
        let children = e.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, EntryKind::Item { name: "minecraft:b".parse().unwrap() });
        assert_eq!((children[0].weight, children[0].quality), (3, -1));
        assert_eq!((children[1].weight, children[1].quality), (1, 0));
        assert_eq!(e.conditions.len(), 1);
    }

    #[test]
    fn composites_refuse_leaf_only_fields() {
        let children = json!([{"type": "item", "name": "minecraft:stone"}]);
        for (kind, field, value) in [
            ("alternatives", "weight", json!(3)),
            ("group", "quality", json!(1)),
            ("sequence", "functions", json!([{"function": "explosion_decay"}])),
        ] {
            let mut v = json!({"type": kind, "children": children.clone()});
            v[field] = value;
            let err = entry(v).unwrap_err();
            assert_eq!(err.path.to_string(), field);
            assert_eq!(
                err.reason,
                SchemaErrorKind::InvalidValue(format!("`{field}` is only allowed on leaf entries"))
            );
        }
    }

    #[test]
    fn composites_need_children() {
        let err = entry(json!({"type": "group", "children": []})).unwrap_err();
        assert_eq!(err.path.to_string(), "children");
        assert_eq!(err.reason, SchemaErrorKind::EmptyList("children".into()));
    }

    #[test]
    fn invalid_item_identifier() {
        let err = entry(json!({"type": "item", "name": "Not An Id"})).unwrap_err();
        assert_eq!(err.path.to_string(), "name");
        assert_eq!(err.reason, SchemaErrorKind::InvalidIdentifier("Not An Id".into()));
    }
}
